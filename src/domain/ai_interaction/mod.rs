pub mod model;
pub mod repository;

pub use model::{AiInteraction, ChatTurn};
pub use repository::AiInteractionRepository;

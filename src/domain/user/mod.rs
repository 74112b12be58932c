pub mod model;
pub mod repository;

pub use model::{Profile, ProfileUpdate, User};
pub use repository::UserRepository;

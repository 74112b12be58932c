//! Domain layer: models, repository traits and the error taxonomy.

pub mod ai_interaction;
pub mod error;
pub mod favorite;
pub mod menu;
pub mod repositories;
pub mod reservation;
pub mod restaurant;
pub mod review;
pub mod user;

pub use error::{DomainError, DomainResult};
pub use repositories::RepositoryProvider;

//! # VENU
//!
//! Restaurant discovery and table reservation backend with an
//! LLM-powered dining concierge ("Alfred").
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities and repository traits
//! - **application**: Services orchestrating bookings, catalog context
//!   and the concierge pipeline, plus the outbound model port
//! - **infrastructure**: SeaORM persistence and the Gemini client
//! - **api**: REST API with Swagger documentation
//! - **auth**: JWT authentication and password hashing

pub mod api;
pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::{init_database, DatabaseConfig};
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;

// Re-export API router
pub use api::create_api_router;

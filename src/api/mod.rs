//! HTTP API: router, handlers and the boundary error type.

pub mod error;
pub mod handlers;
pub mod router;

pub use error::{ApiError, ApiResult};
pub use router::create_api_router;

//! Infrastructure layer: database access and external model clients.

pub mod ai;
pub mod database;

//! HTTP handlers, one module per resource.

pub mod concierge;
pub mod health;
pub mod menus;
pub mod reservations;
pub mod restaurants;
pub mod users;

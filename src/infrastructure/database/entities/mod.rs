//! SeaORM entities

pub mod ai_interaction;
pub mod favorite;
pub mod menu;
pub mod menu_item;
pub mod menu_to_item;
pub mod reservation;
pub mod restaurant;
pub mod review;
pub mod user;

//! Database migrations

use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users;
mod m20250301_000002_create_restaurants;
mod m20250301_000003_create_menus;
mod m20250301_000004_create_menu_items;
mod m20250301_000005_create_menu_to_item;
mod m20250301_000006_create_reservations;
mod m20250301_000007_create_reviews;
mod m20250301_000008_create_favorites;
mod m20250301_000009_create_ai_interactions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users::Migration),
            Box::new(m20250301_000002_create_restaurants::Migration),
            Box::new(m20250301_000003_create_menus::Migration),
            Box::new(m20250301_000004_create_menu_items::Migration),
            Box::new(m20250301_000005_create_menu_to_item::Migration),
            Box::new(m20250301_000006_create_reservations::Migration),
            Box::new(m20250301_000007_create_reviews::Migration),
            Box::new(m20250301_000008_create_favorites::Migration),
            Box::new(m20250301_000009_create_ai_interactions::Migration),
        ]
    }
}

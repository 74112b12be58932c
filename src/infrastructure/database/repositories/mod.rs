//! SeaORM repository implementations

pub mod ai_interaction_repository;
pub mod favorite_repository;
pub mod menu_repository;
pub mod repository_provider;
pub mod reservation_repository;
pub mod restaurant_repository;
pub mod review_repository;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::Utc;
    use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
    use sea_orm_migration::MigratorTrait;

    use crate::infrastructure::database::entities::{restaurant, user};
    use crate::infrastructure::database::migrator::Migrator;

    pub async fn connect_memory() -> DatabaseConnection {
        // A fresh pooled connection would see an empty memory database,
        // so the pool is pinned to a single connection.
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1);
        let db = Database::connect(options)
            .await
            .expect("in-memory sqlite");
        Migrator::up(&db, None).await.expect("migrations");
        db
    }

    pub async fn seed_user(db: &DatabaseConnection, id: &str, email: &str) {
        user::ActiveModel {
            id: Set(id.to_string()),
            name: Set("Test User".to_string()),
            email: Set(email.to_string()),
            phone_number: Set("0244000000".to_string()),
            password_hash: Set("$2b$04$not-a-real-hash".to_string()),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
        }
        .insert(db)
        .await
        .expect("seed user");
    }

    pub async fn seed_restaurant(db: &DatabaseConnection, id: i32, name: &str, cuisine: &str) {
        restaurant::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            cuisine_type: Set(cuisine.to_string()),
            location: Set("Osu, Accra".to_string()),
            price_range: Set("$$".to_string()),
            average_rating: Set(0.0),
            total_reviews: Set(0),
            image_url: Set(None),
            status: Set("Available".to_string()),
        }
        .insert(db)
        .await
        .expect("seed restaurant");
    }
}

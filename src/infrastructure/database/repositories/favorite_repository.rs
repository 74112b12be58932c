//! SeaORM implementation of FavoriteRepository
//!
//! Toggle without check-then-act: delete first, and when nothing was
//! deleted insert with ON CONFLICT DO NOTHING. Two concurrent toggles can
//! interleave but can never produce a duplicate pair, and each caller
//! reports the state its own branch established.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};
use tracing::debug;

use crate::domain::favorite::FavoriteRepository;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::favorite;

pub struct SeaOrmFavoriteRepository {
    db: DatabaseConnection,
}

impl SeaOrmFavoriteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_err(e: DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

#[async_trait]
impl FavoriteRepository for SeaOrmFavoriteRepository {
    async fn toggle(&self, user_id: &str, restaurant_id: i32) -> DomainResult<bool> {
        debug!("Toggling favorite: user={} restaurant={}", user_id, restaurant_id);

        let deleted = favorite::Entity::delete_many()
            .filter(favorite::Column::UserId.eq(user_id))
            .filter(favorite::Column::RestaurantId.eq(restaurant_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if deleted.rows_affected > 0 {
            return Ok(false);
        }

        let model = favorite::ActiveModel {
            user_id: Set(user_id.to_string()),
            restaurant_id: Set(restaurant_id),
        };
        let insert = favorite::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([favorite::Column::UserId, favorite::Column::RestaurantId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&self.db)
            .await;

        match insert {
            Ok(_) => Ok(true),
            // A concurrent toggle won the insert; the pair exists either way.
            Err(DbErr::RecordNotInserted) => Ok(true),
            Err(e) => Err(db_err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::test_support::{
        connect_memory, seed_restaurant, seed_user,
    };

    #[tokio::test]
    async fn toggle_flips_state_each_time() {
        let db = connect_memory().await;
        seed_user(&db, "u1", "u1@example.com").await;
        seed_restaurant(&db, 1, "Santoku", "Japanese").await;
        let repo = SeaOrmFavoriteRepository::new(db);

        assert!(repo.toggle("u1", 1).await.unwrap());
        assert!(!repo.toggle("u1", 1).await.unwrap());
        assert!(repo.toggle("u1", 1).await.unwrap());
    }

    #[tokio::test]
    async fn toggle_is_per_user() {
        let db = connect_memory().await;
        seed_user(&db, "u1", "u1@example.com").await;
        seed_user(&db, "u2", "u2@example.com").await;
        seed_restaurant(&db, 1, "Santoku", "Japanese").await;
        let repo = SeaOrmFavoriteRepository::new(db);

        assert!(repo.toggle("u1", 1).await.unwrap());
        // u2's first toggle favorites independently of u1's state
        assert!(repo.toggle("u2", 1).await.unwrap());
        assert!(!repo.toggle("u1", 1).await.unwrap());
    }
}

//! SeaORM implementation of ReviewRepository
//!
//! The review insert and the restaurant aggregate update commit together;
//! a failed aggregate write rolls the review back.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;

use crate::domain::review::{NewReview, Review, ReviewDigest, ReviewRepository, ReviewWithAuthor};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{restaurant, review, user};

pub struct SeaOrmReviewRepository {
    db: DatabaseConnection,
}

impl SeaOrmReviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: review::Model) -> Review {
    Review {
        id: m.id,
        restaurant_id: m.restaurant_id,
        user_id: m.user_id,
        rating: m.rating,
        comment: m.comment,
        created_at: m.created_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

#[async_trait]
impl ReviewRepository for SeaOrmReviewRepository {
    async fn add(&self, new: NewReview) -> DomainResult<Review> {
        debug!(
            "Adding review: restaurant={} user={} rating={}",
            new.restaurant_id, new.user_id, new.rating
        );

        let txn = self.db.begin().await.map_err(db_err)?;

        let existing = restaurant::Entity::find_by_id(new.restaurant_id)
            .one(&txn)
            .await
            .map_err(db_err)?;
        let Some(existing) = existing else {
            return Err(DomainError::not_found(
                "Restaurant",
                "id",
                new.restaurant_id.to_string(),
            ));
        };

        let model = review::ActiveModel {
            id: NotSet,
            restaurant_id: Set(new.restaurant_id),
            user_id: Set(new.user_id),
            rating: Set(new.rating),
            comment: Set(new.comment),
            created_at: Set(Utc::now()),
        };
        let inserted = model.insert(&txn).await.map_err(db_err)?;

        let ratings: Vec<i32> = review::Entity::find()
            .filter(review::Column::RestaurantId.eq(new.restaurant_id))
            .all(&txn)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|r| r.rating)
            .collect();

        let total = ratings.len() as i32;
        let sum: i32 = ratings.iter().sum();
        let average = (sum as f64 / total as f64 * 10.0).round() / 10.0;

        let mut active: restaurant::ActiveModel = existing.into();
        active.average_rating = Set(average);
        active.total_reviews = Set(total);
        active.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn list_for_restaurant(&self, restaurant_id: i32) -> DomainResult<Vec<ReviewWithAuthor>> {
        let rows = review::Entity::find()
            .filter(review::Column::RestaurantId.eq(restaurant_id))
            .order_by_desc(review::Column::CreatedAt)
            .order_by_desc(review::Column::Id)
            .find_also_related(user::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|(model, author)| ReviewWithAuthor {
                author_name: author
                    .map(|u| u.name)
                    .unwrap_or_else(|| "Anonymous".to_string()),
                review: model_to_domain(model),
            })
            .collect())
    }

    async fn recent_digest_for_user(
        &self,
        user_id: &str,
        limit: u64,
    ) -> DomainResult<Vec<ReviewDigest>> {
        let rows = review::Entity::find()
            .filter(review::Column::UserId.eq(user_id))
            .order_by_desc(review::Column::CreatedAt)
            .order_by_desc(review::Column::Id)
            .limit(limit)
            .find_also_related(restaurant::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .filter_map(|(model, rest)| {
                rest.map(|r| ReviewDigest {
                    restaurant_name: r.name,
                    cuisine_type: r.cuisine_type,
                    rating: model.rating,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::EntityTrait;

    use crate::infrastructure::database::entities::restaurant;
    use crate::infrastructure::database::repositories::test_support::{
        connect_memory, seed_restaurant, seed_user,
    };

    fn new_review(restaurant_id: i32, user_id: &str, rating: i32) -> NewReview {
        NewReview {
            restaurant_id,
            user_id: user_id.to_string(),
            rating,
            comment: "Great jollof".to_string(),
        }
    }

    #[tokio::test]
    async fn add_updates_restaurant_aggregates() {
        let db = connect_memory().await;
        seed_user(&db, "u1", "u1@example.com").await;
        seed_restaurant(&db, 1, "Asanka Local", "Ghanaian").await;
        let repo = SeaOrmReviewRepository::new(db.clone());

        repo.add(new_review(1, "u1", 5)).await.unwrap();
        repo.add(new_review(1, "u1", 4)).await.unwrap();

        let rest = restaurant::Entity::find_by_id(1)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rest.total_reviews, 2);
        assert_eq!(rest.average_rating, 4.5);
    }

    #[tokio::test]
    async fn add_rejects_unknown_restaurant() {
        let db = connect_memory().await;
        seed_user(&db, "u1", "u1@example.com").await;
        let repo = SeaOrmReviewRepository::new(db);

        let err = repo.add(new_review(99, "u1", 5)).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn list_includes_author_names_newest_first() {
        let db = connect_memory().await;
        seed_user(&db, "u1", "u1@example.com").await;
        seed_restaurant(&db, 1, "Asanka Local", "Ghanaian").await;
        let repo = SeaOrmReviewRepository::new(db);

        repo.add(new_review(1, "u1", 3)).await.unwrap();
        repo.add(new_review(1, "u1", 5)).await.unwrap();

        let reviews = repo.list_for_restaurant(1).await.unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].review.rating, 5);
        assert_eq!(reviews[0].author_name, "Test User");
    }

    #[tokio::test]
    async fn digest_caps_at_limit() {
        let db = connect_memory().await;
        seed_user(&db, "u1", "u1@example.com").await;
        seed_restaurant(&db, 1, "Asanka Local", "Ghanaian").await;
        let repo = SeaOrmReviewRepository::new(db);

        for rating in 1..=5 {
            repo.add(new_review(1, "u1", rating)).await.unwrap();
        }

        let digest = repo.recent_digest_for_user("u1", 3).await.unwrap();
        assert_eq!(digest.len(), 3);
        assert_eq!(digest[0].rating, 5);
        assert_eq!(digest[0].restaurant_name, "Asanka Local");
    }
}

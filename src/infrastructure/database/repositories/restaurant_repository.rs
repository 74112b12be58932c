//! SeaORM implementation of RestaurantRepository

use std::collections::HashSet;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::domain::restaurant::{Restaurant, RestaurantRepository, RestaurantStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{favorite, restaurant};

pub struct SeaOrmRestaurantRepository {
    db: DatabaseConnection,
}

impl SeaOrmRestaurantRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn favorite_ids_of(&self, user_id: &str) -> DomainResult<HashSet<i32>> {
        let rows = favorite::Entity::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(|f| f.restaurant_id).collect())
    }
}

pub(crate) fn model_to_domain(m: restaurant::Model) -> Restaurant {
    Restaurant {
        id: m.id,
        name: m.name,
        cuisine_type: m.cuisine_type,
        location: m.location,
        price_range: m.price_range,
        average_rating: m.average_rating,
        total_reviews: m.total_reviews,
        image_url: m.image_url,
        status: RestaurantStatus::from_str(&m.status),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

#[async_trait]
impl RestaurantRepository for SeaOrmRestaurantRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Restaurant>> {
        let model = restaurant::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list_annotated(&self, viewer: Option<&str>) -> DomainResult<Vec<(Restaurant, bool)>> {
        let models = restaurant::Entity::find()
            .order_by_asc(restaurant::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        // One membership query for the whole page, never one per row.
        let favorited = match viewer {
            Some(user_id) => self.favorite_ids_of(user_id).await?,
            None => HashSet::new(),
        };

        Ok(models
            .into_iter()
            .map(|m| {
                let marked = favorited.contains(&m.id);
                (model_to_domain(m), marked)
            })
            .collect())
    }

    async fn find_favorited_by(&self, user_id: &str) -> DomainResult<Vec<Restaurant>> {
        let ids = self.favorite_ids_of(user_id).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = restaurant::Entity::find()
            .filter(restaurant::Column::Id.is_in(ids))
            .order_by_asc(restaurant::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_all(&self) -> DomainResult<Vec<Restaurant>> {
        let models = restaurant::Entity::find()
            .order_by_asc(restaurant::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}

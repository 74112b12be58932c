//! Restaurant context cache
//!
//! Holds the catalog summary string fed into the concierge prompt. Built
//! lazily from the restaurants table, reused until a catalog-affecting
//! write (a review changing the aggregates) invalidates it.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{DomainResult, RepositoryProvider};

pub struct RestaurantContextCache {
    repos: Arc<dyn RepositoryProvider>,
    summary: RwLock<Option<String>>,
}

impl RestaurantContextCache {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            repos,
            summary: RwLock::new(None),
        }
    }

    /// The cached summary, building it on first use after startup or
    /// invalidation.
    pub async fn get(&self) -> DomainResult<String> {
        {
            let guard = self.summary.read().await;
            if let Some(cached) = guard.as_ref() {
                return Ok(cached.clone());
            }
        }
        self.refresh().await
    }

    /// Force a rebuild from the database.
    pub async fn refresh(&self) -> DomainResult<String> {
        let restaurants = self.repos.restaurants().find_all().await?;
        debug!("Rebuilding restaurant context ({} entries)", restaurants.len());

        let mut lines = Vec::with_capacity(restaurants.len() + 1);
        lines.push("AVAILABLE RESTAURANTS (use the ID when making reservations):".to_string());
        for r in restaurants {
            lines.push(format!(
                "- [ID: {}] {} ({}): {}. Price: {}. Rating: {:.1}/5 ({} reviews).",
                r.id,
                r.name,
                r.cuisine_type,
                r.location,
                r.price_range,
                r.average_rating,
                r.total_reviews,
            ));
        }
        let built = lines.join("\n");

        let mut guard = self.summary.write().await;
        *guard = Some(built.clone());
        Ok(built)
    }

    /// Drop the cached summary; the next `get` rebuilds it.
    pub async fn invalidate(&self) {
        let mut guard = self.summary.write().await;
        *guard = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::review::NewReview;
    use crate::infrastructure::database::repositories::test_support::{
        connect_memory, seed_restaurant, seed_user,
    };
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;

    #[tokio::test]
    async fn summary_lists_restaurants_with_ids() {
        let db = connect_memory().await;
        seed_restaurant(&db, 1, "Asanka Local", "Ghanaian").await;
        seed_restaurant(&db, 2, "Santoku", "Japanese").await;
        let cache = RestaurantContextCache::new(Arc::new(SeaOrmRepositoryProvider::new(db)));

        let summary = cache.get().await.unwrap();
        assert!(summary.contains("[ID: 1] Asanka Local (Ghanaian)"));
        assert!(summary.contains("[ID: 2] Santoku (Japanese)"));
    }

    #[tokio::test]
    async fn invalidate_picks_up_catalog_changes() {
        let db = connect_memory().await;
        seed_user(&db, "u1", "u1@example.com").await;
        seed_restaurant(&db, 1, "Asanka Local", "Ghanaian").await;
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db));
        let cache = RestaurantContextCache::new(repos.clone());

        let before = cache.get().await.unwrap();
        assert!(before.contains("Rating: 0.0/5 (0 reviews)"));

        repos
            .reviews()
            .add(NewReview {
                restaurant_id: 1,
                user_id: "u1".to_string(),
                rating: 4,
                comment: "Solid waakye".to_string(),
            })
            .await
            .unwrap();

        // Stale until invalidated
        assert_eq!(cache.get().await.unwrap(), before);

        cache.invalidate().await;
        let after = cache.get().await.unwrap();
        assert!(after.contains("Rating: 4.0/5 (1 reviews)"));
    }
}

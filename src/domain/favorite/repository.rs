//! Favorite repository interface
//!
//! A favorite is a bare (user, restaurant) pair; there is no model struct.

use async_trait::async_trait;

use crate::domain::error::DomainResult;

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Flip the favorite mark atomically: delete the pair if present,
    /// otherwise insert it (conflict-tolerant). Returns the resulting
    /// state, `true` when the restaurant is now favorited.
    async fn toggle(&self, user_id: &str, restaurant_id: i32) -> DomainResult<bool>;
}

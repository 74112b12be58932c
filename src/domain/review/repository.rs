//! Review repository interface

use async_trait::async_trait;

use super::model::{NewReview, Review, ReviewDigest, ReviewWithAuthor};
use crate::domain::error::DomainResult;

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Insert a review and fold it into the restaurant's `average_rating`
    /// and `total_reviews` within a single transaction.
    async fn add(&self, review: NewReview) -> DomainResult<Review>;

    /// All reviews of a restaurant with author names, newest first.
    async fn list_for_restaurant(&self, restaurant_id: i32) -> DomainResult<Vec<ReviewWithAuthor>>;

    /// The user's most recent reviews joined with restaurant name and
    /// cuisine, newest first, capped at `limit`.
    async fn recent_digest_for_user(
        &self,
        user_id: &str,
        limit: u64,
    ) -> DomainResult<Vec<ReviewDigest>>;
}

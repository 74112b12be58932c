//! Restaurant repository interface

use async_trait::async_trait;

use super::model::Restaurant;
use crate::domain::error::DomainResult;

#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Restaurant>>;

    /// Full catalog. For an identified viewer each entry carries whether
    /// that viewer has favorited it, resolved by set membership rather
    /// than a per-row lookup.
    async fn list_annotated(&self, viewer: Option<&str>) -> DomainResult<Vec<(Restaurant, bool)>>;

    /// Only the restaurants the given user has favorited.
    async fn find_favorited_by(&self, user_id: &str) -> DomainResult<Vec<Restaurant>>;

    /// Every restaurant, for catalog summary assembly.
    async fn find_all(&self) -> DomainResult<Vec<Restaurant>>;
}

//! Menu repository interface

use async_trait::async_trait;

use super::model::{Menu, MenuItem, MenuUpdate, NewMenu};
use crate::domain::error::DomainResult;

#[async_trait]
pub trait MenuRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Menu>>;

    /// Active menus of a restaurant.
    async fn find_active_for_restaurant(&self, restaurant_id: i32) -> DomainResult<Vec<Menu>>;

    /// Available items of a menu, ordered by their display position.
    async fn items_for_menu(&self, menu_id: i32) -> DomainResult<Vec<MenuItem>>;

    async fn create(&self, menu: NewMenu) -> DomainResult<Menu>;

    async fn update(&self, id: i32, update: MenuUpdate) -> DomainResult<Menu>;

    /// Marks the menu inactive. Rows are never removed.
    async fn soft_delete(&self, id: i32) -> DomainResult<()>;
}

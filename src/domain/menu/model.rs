//! Menu domain model

use rust_decimal::Decimal;

/// A named card of items offered by a restaurant. Deletion is soft via
/// `is_active`.
#[derive(Debug, Clone)]
pub struct Menu {
    pub id: i32,
    pub restaurant_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct NewMenu {
    pub restaurant_id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MenuUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl MenuUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.is_active.is_none()
    }
}

/// An item as it appears on a menu, already filtered to available entries
/// and carrying its position on the card.
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub display_order: i32,
}

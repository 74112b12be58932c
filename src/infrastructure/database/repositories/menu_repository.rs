//! SeaORM implementation of MenuRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;

use crate::domain::menu::{Menu, MenuItem, MenuRepository, MenuUpdate, NewMenu};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{menu, menu_item, menu_to_item};

pub struct SeaOrmMenuRepository {
    db: DatabaseConnection,
}

impl SeaOrmMenuRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: menu::Model) -> Menu {
    Menu {
        id: m.id,
        restaurant_id: m.restaurant_id,
        name: m.name,
        description: m.description,
        is_active: m.is_active,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

#[async_trait]
impl MenuRepository for SeaOrmMenuRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Menu>> {
        let model = menu::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_active_for_restaurant(&self, restaurant_id: i32) -> DomainResult<Vec<Menu>> {
        let models = menu::Entity::find()
            .filter(menu::Column::RestaurantId.eq(restaurant_id))
            .filter(menu::Column::IsActive.eq(true))
            .order_by_asc(menu::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn items_for_menu(&self, menu_id: i32) -> DomainResult<Vec<MenuItem>> {
        let rows = menu_to_item::Entity::find()
            .filter(menu_to_item::Column::MenuId.eq(menu_id))
            .filter(menu_to_item::Column::IsAvailable.eq(true))
            .order_by_asc(menu_to_item::Column::DisplayOrder)
            .find_also_related(menu_item::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut items = Vec::with_capacity(rows.len());
        for (link, item) in rows {
            let item = item.ok_or_else(|| {
                DomainError::Storage(format!("menu_to_item row without item: {}", link.item_id))
            })?;
            items.push(MenuItem {
                id: item.id,
                name: item.name,
                description: item.description,
                price: item.price,
                category: item.category,
                display_order: link.display_order,
            });
        }
        Ok(items)
    }

    async fn create(&self, new: NewMenu) -> DomainResult<Menu> {
        debug!("Creating menu '{}' for restaurant {}", new.name, new.restaurant_id);

        let model = menu::ActiveModel {
            id: NotSet,
            restaurant_id: Set(new.restaurant_id),
            name: Set(new.name),
            description: Set(new.description),
            is_active: Set(true),
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn update(&self, id: i32, update: MenuUpdate) -> DomainResult<Menu> {
        let existing = menu::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::not_found("Menu", "id", id.to_string()));
        };

        let mut active: menu::ActiveModel = existing.into();
        if let Some(name) = update.name {
            active.name = Set(name);
        }
        if let Some(description) = update.description {
            active.description = Set(Some(description));
        }
        if let Some(is_active) = update.is_active {
            active.is_active = Set(is_active);
        }

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(updated))
    }

    async fn soft_delete(&self, id: i32) -> DomainResult<()> {
        let existing = menu::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::not_found("Menu", "id", id.to_string()));
        };

        let mut active: menu::ActiveModel = existing.into();
        active.is_active = Set(false);
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}

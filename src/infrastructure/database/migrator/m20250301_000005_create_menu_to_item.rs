//! Create menu_to_item join table
//!
//! Composite primary key, one row per item placement on a menu card.

use sea_orm_migration::prelude::*;

use super::m20250301_000003_create_menus::Menus;
use super::m20250301_000004_create_menu_items::MenuItems;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MenuToItem::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MenuToItem::MenuId).integer().not_null())
                    .col(ColumnDef::new(MenuToItem::ItemId).integer().not_null())
                    .col(
                        ColumnDef::new(MenuToItem::DisplayOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(MenuToItem::IsAvailable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .primary_key(
                        Index::create()
                            .col(MenuToItem::MenuId)
                            .col(MenuToItem::ItemId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_menu_to_item_menu")
                            .from(MenuToItem::Table, MenuToItem::MenuId)
                            .to(Menus::Table, Menus::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_menu_to_item_item")
                            .from(MenuToItem::Table, MenuToItem::ItemId)
                            .to(MenuItems::Table, MenuItems::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MenuToItem::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum MenuToItem {
    Table,
    MenuId,
    ItemId,
    DisplayOrder,
    IsAvailable,
}

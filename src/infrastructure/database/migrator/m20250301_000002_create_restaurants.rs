//! Create restaurants table
//!
//! Carries the denormalized review aggregates (average_rating,
//! total_reviews) updated transactionally by review inserts.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Restaurants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Restaurants::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Restaurants::Name).string().not_null())
                    .col(ColumnDef::new(Restaurants::CuisineType).string().not_null())
                    .col(ColumnDef::new(Restaurants::Location).string().not_null())
                    .col(ColumnDef::new(Restaurants::PriceRange).string().not_null())
                    .col(
                        ColumnDef::new(Restaurants::AverageRating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Restaurants::TotalReviews)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Restaurants::ImageUrl).string())
                    .col(
                        ColumnDef::new(Restaurants::Status)
                            .string()
                            .not_null()
                            .default("Available"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_restaurants_cuisine")
                    .table(Restaurants::Table)
                    .col(Restaurants::CuisineType)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Restaurants::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Restaurants {
    Table,
    Id,
    Name,
    CuisineType,
    Location,
    PriceRange,
    AverageRating,
    TotalReviews,
    ImageUrl,
    Status,
}

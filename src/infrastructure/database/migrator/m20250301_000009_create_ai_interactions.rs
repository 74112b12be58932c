//! Create ai_interactions table (append-only concierge log)

use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AiInteractions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AiInteractions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AiInteractions::UserId).string().not_null())
                    .col(ColumnDef::new(AiInteractions::UserPrompt).text().not_null())
                    .col(
                        ColumnDef::new(AiInteractions::AlfredResponse)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AiInteractions::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ai_interactions_user")
                            .from(AiInteractions::Table, AiInteractions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ai_interactions_user_time")
                    .table(AiInteractions::Table)
                    .col(AiInteractions::UserId)
                    .col(AiInteractions::Timestamp)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AiInteractions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum AiInteractions {
    Table,
    Id,
    UserId,
    UserPrompt,
    AlfredResponse,
    Timestamp,
}

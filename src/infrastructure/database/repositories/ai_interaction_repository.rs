//! SeaORM implementation of AiInteractionRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::domain::ai_interaction::{AiInteractionRepository, ChatTurn};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::ai_interaction;

pub struct SeaOrmAiInteractionRepository {
    db: DatabaseConnection,
}

impl SeaOrmAiInteractionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

#[async_trait]
impl AiInteractionRepository for SeaOrmAiInteractionRepository {
    async fn append(&self, user_id: &str, prompt: &str, response: &str) -> DomainResult<()> {
        let model = ai_interaction::ActiveModel {
            id: NotSet,
            user_id: Set(user_id.to_string()),
            user_prompt: Set(prompt.to_string()),
            alfred_response: Set(response.to_string()),
            timestamp: Set(Utc::now()),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn recent_for_user(&self, user_id: &str, limit: u64) -> DomainResult<Vec<ChatTurn>> {
        let models = ai_interaction::Entity::find()
            .filter(ai_interaction::Column::UserId.eq(user_id))
            .order_by_desc(ai_interaction::Column::Timestamp)
            .order_by_desc(ai_interaction::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models
            .into_iter()
            .map(|m| ChatTurn {
                user_prompt: m.user_prompt,
                alfred_response: m.alfred_response,
            })
            .collect())
    }

    async fn count_for_user(&self, user_id: &str) -> DomainResult<u64> {
        ai_interaction::Entity::find()
            .filter(ai_interaction::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::test_support::{
        connect_memory, seed_user,
    };

    #[tokio::test]
    async fn append_increments_count() {
        let db = connect_memory().await;
        seed_user(&db, "u1", "u1@example.com").await;
        let repo = SeaOrmAiInteractionRepository::new(db);

        assert_eq!(repo.count_for_user("u1").await.unwrap(), 0);
        repo.append("u1", "any sushi places?", "Try Santoku.").await.unwrap();
        repo.append("u1", "book a table", "Done.").await.unwrap();
        assert_eq!(repo.count_for_user("u1").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn recent_is_newest_first_and_capped() {
        let db = connect_memory().await;
        seed_user(&db, "u1", "u1@example.com").await;
        let repo = SeaOrmAiInteractionRepository::new(db);

        for i in 1..=7 {
            repo.append("u1", &format!("q{}", i), &format!("a{}", i))
                .await
                .unwrap();
        }

        let recent = repo.recent_for_user("u1", 5).await.unwrap();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].user_prompt, "q7");
        assert_eq!(recent[4].user_prompt, "q3");
    }
}

//! Concierge interaction log interface

use async_trait::async_trait;

use super::model::ChatTurn;
use crate::domain::error::DomainResult;

#[async_trait]
pub trait AiInteractionRepository: Send + Sync {
    /// Append one exchange to the log.
    async fn append(&self, user_id: &str, prompt: &str, response: &str) -> DomainResult<()>;

    /// The user's most recent exchanges, newest first, capped at `limit`.
    async fn recent_for_user(&self, user_id: &str, limit: u64) -> DomainResult<Vec<ChatTurn>>;

    async fn count_for_user(&self, user_id: &str) -> DomainResult<u64>;
}

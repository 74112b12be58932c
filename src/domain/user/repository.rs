//! User repository interface

use async_trait::async_trait;

use super::model::{Profile, ProfileUpdate, User};
use crate::domain::error::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new account. Fails with `Conflict` on duplicate email.
    async fn create(&self, user: User) -> DomainResult<User>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Apply a partial update and return the resulting profile.
    async fn update_profile(&self, id: &str, update: ProfileUpdate) -> DomainResult<Profile>;
}

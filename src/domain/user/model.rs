//! User domain model

use chrono::{DateTime, Utc};

/// A registered account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The subset of account fields exposed to the owner.
#[derive(Debug, Clone)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub phone_number: String,
}

impl From<User> for Profile {
    fn from(u: User) -> Self {
        Self {
            name: u.name,
            email: u.email,
            phone_number: u.phone_number,
        }
    }
}

/// Partial profile update. `password_hash` is already hashed by the caller.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub password_hash: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone_number.is_none() && self.password_hash.is_none()
    }
}

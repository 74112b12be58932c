//! Review domain model

use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Review {
    pub id: i32,
    pub restaurant_id: i32,
    pub user_id: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Input for a new review. Rating is range-checked by the caller before it
/// reaches the repository.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub restaurant_id: i32,
    pub user_id: String,
    pub rating: i32,
    pub comment: String,
}

/// A review joined with its author's display name.
#[derive(Debug, Clone)]
pub struct ReviewWithAuthor {
    pub review: Review,
    pub author_name: String,
}

/// A compact line of taste signal fed to the concierge prompt.
#[derive(Debug, Clone)]
pub struct ReviewDigest {
    pub restaurant_name: String,
    pub cuisine_type: String,
    pub rating: i32,
}

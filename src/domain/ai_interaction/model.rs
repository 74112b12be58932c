//! Concierge interaction log model

use chrono::{DateTime, Utc};

/// One logged concierge exchange.
#[derive(Debug, Clone)]
pub struct AiInteraction {
    pub id: i32,
    pub user_id: String,
    pub user_prompt: String,
    pub alfred_response: String,
    pub timestamp: DateTime<Utc>,
}

/// The prompt/response pair replayed into the conversational context.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub user_prompt: String,
    pub alfred_response: String,
}

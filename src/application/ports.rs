//! Outbound ports for the concierge pipeline.

use async_trait::async_trait;
use thiserror::Error;

/// Raw tool-call arguments as the model produced them. Nothing here is
/// trusted until `ReservationService` has validated it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationCall {
    pub restaurant_id: String,
    pub date: String,
    pub time: String,
    pub party_size: i64,
}

/// The model's answer, decoded into exactly one of three shapes at the
/// client boundary so the pipeline never touches provider JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply {
    /// The model invoked the reservation tool.
    ToolCall(ReservationCall),
    /// A plain conversational answer.
    Text(String),
    /// No usable part in the response.
    Empty,
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model call failed: {0}")]
    Call(String),
    #[error("unexpected model response: {0}")]
    Decode(String),
}

/// Seam between the concierge pipeline and the generative model provider.
#[async_trait]
pub trait ConciergeModel: Send + Sync {
    async fn generate(
        &self,
        system_instruction: &str,
        user_input: &str,
    ) -> Result<ModelReply, ModelError>;
}

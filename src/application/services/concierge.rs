//! Alfred, the dining concierge
//!
//! Pipeline per ask: assemble context (catalog summary, the user's recent
//! reviews, recent chat turns), call the model with the reservation tool
//! declared, branch on the decoded reply, and log the exchange whatever
//! happened. The caller gets a reply on every path; when the pipeline
//! fails before producing one, the fixed fallback line is returned and
//! flagged as degraded.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, warn};

use crate::application::ports::{ConciergeModel, ModelReply, ReservationCall};
use crate::application::services::catalog_context::RestaurantContextCache;
use crate::application::services::reservation::ReservationService;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

/// Returned verbatim whenever Alfred cannot answer.
pub const FALLBACK_REPLY: &str =
    "I apologize, Alfred is currently unavailable. Please try again in a few moments.";

const RESERVATION_APOLOGY: &str =
    "I ran into a problem while making that reservation. Please double-check the details and try again.";

const REVIEW_CONTEXT_LIMIT: u64 = 5;
const CHAT_HISTORY_LIMIT: u64 = 5;

/// The outcome of one ask. `degraded` marks the fallback path.
#[derive(Debug)]
pub struct ConciergeReply {
    pub reply: String,
    pub degraded: bool,
}

pub struct ConciergeService {
    repos: Arc<dyn RepositoryProvider>,
    reservations: Arc<ReservationService>,
    context: Arc<RestaurantContextCache>,
    model: Option<Arc<dyn ConciergeModel>>,
}

impl ConciergeService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        reservations: Arc<ReservationService>,
        context: Arc<RestaurantContextCache>,
        model: Option<Arc<dyn ConciergeModel>>,
    ) -> Self {
        Self {
            repos,
            reservations,
            context,
            model,
        }
    }

    /// Run the pipeline and log the exchange. Logging is best-effort: a
    /// failed write is reported but never loses the reply.
    pub async fn ask(&self, user_id: &str, user_input: &str) -> ConciergeReply {
        let (reply, degraded) = match self.produce_reply(user_id, user_input).await {
            Ok(reply) => (reply, false),
            Err(e) => {
                warn!("Concierge pipeline failed for user {}: {}", user_id, e);
                (FALLBACK_REPLY.to_string(), true)
            }
        };

        if let Err(e) = self
            .repos
            .ai_interactions()
            .append(user_id, user_input, &reply)
            .await
        {
            error!("Failed to record concierge interaction: {}", e);
        }

        ConciergeReply { reply, degraded }
    }

    async fn produce_reply(&self, user_id: &str, user_input: &str) -> DomainResult<String> {
        let Some(model) = self.model.as_ref() else {
            return Err(DomainError::Upstream(
                "no generative model configured".to_string(),
            ));
        };

        let system_instruction = self.build_system_instruction(user_id).await?;

        let reply = model
            .generate(&system_instruction, user_input)
            .await
            .map_err(|e| DomainError::Upstream(e.to_string()))?;

        match reply {
            ModelReply::ToolCall(call) => Ok(self.execute_reservation(user_id, call).await),
            ModelReply::Text(text) => Ok(text),
            ModelReply::Empty => {
                warn!("Model returned neither text nor a tool call");
                Ok(FALLBACK_REPLY.to_string())
            }
        }
    }

    async fn build_system_instruction(&self, user_id: &str) -> DomainResult<String> {
        let catalog = self.context.get().await?;

        let reviews = self
            .repos
            .reviews()
            .recent_digest_for_user(user_id, REVIEW_CONTEXT_LIMIT)
            .await?;
        let preferences = if reviews.is_empty() {
            "The user has not submitted any reviews; base recommendations on general appeal."
                .to_string()
        } else {
            reviews
                .iter()
                .map(|d| {
                    format!(
                        "- Rated {} ({}) {}/5.",
                        d.restaurant_name, d.cuisine_type, d.rating
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        };

        let mut turns = self
            .repos
            .ai_interactions()
            .recent_for_user(user_id, CHAT_HISTORY_LIMIT)
            .await?;
        // Stored newest-first; the prompt wants chronological order.
        turns.reverse();
        let history = if turns.is_empty() {
            "This is the start of a new session.".to_string()
        } else {
            turns
                .iter()
                .map(|t| format!("USER: {}\nALFRED: {}", t.user_prompt, t.alfred_response))
                .collect::<Vec<_>>()
                .join("\n---\n")
        };

        Ok(format!(
            "You are Alfred, the personal dining concierge of VENU, a restaurant \
discovery and table reservation platform.\n\
Current time: {now} GMT.\n\n\
{catalog}\n\n\
USER PREFERENCES (from their recent reviews):\n{preferences}\n\n\
RECENT CONVERSATION:\n{history}\n\n\
RULES:\n\
- Only recommend restaurants from the list above.\n\
- To book a table, call the makeReservation function with the restaurant ID \
from the list, the date as YYYY-MM-DD, the time as HH:MM and the party size.\n\
- If any reservation detail is missing, ask for it instead of guessing.\n\
- Keep replies short, warm and practical.",
            now = Utc::now().format("%Y-%m-%d %H:%M"),
        ))
    }

    /// Validate the tool-call arguments and book through the shared
    /// reservation service. Failures here produce an apologetic sentence,
    /// not a pipeline error: the model answered, the booking did not.
    async fn execute_reservation(&self, user_id: &str, call: ReservationCall) -> String {
        let result = match call.restaurant_id.trim().parse::<i32>() {
            Ok(restaurant_id) => {
                self.reservations
                    .create(
                        user_id,
                        Some(restaurant_id),
                        Some(&call.date),
                        Some(&call.time),
                        Some(call.party_size),
                    )
                    .await
            }
            Err(_) => Err(DomainError::validation(format!(
                "Model supplied a non-numeric restaurant id: {:?}",
                call.restaurant_id
            ))),
        };

        match result {
            Ok(reservation) => {
                let name = self
                    .repos
                    .restaurants()
                    .find_by_id(reservation.restaurant_id)
                    .await
                    .ok()
                    .flatten()
                    .map(|r| r.name)
                    .unwrap_or_else(|| "the restaurant".to_string());
                format!(
                    "I've booked a table for {} at {} on {} at {}. Enjoy your meal!",
                    reservation.party_size,
                    name,
                    reservation.reservation_date,
                    reservation.reservation_time.format("%H:%M"),
                )
            }
            Err(e) => {
                warn!("Tool-call reservation failed for user {}: {}", user_id, e);
                RESERVATION_APOLOGY.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::application::ports::ModelError;
    use crate::infrastructure::database::repositories::test_support::{
        connect_memory, seed_restaurant, seed_user,
    };
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;

    struct StubModel {
        reply: ModelReply,
    }

    #[async_trait]
    impl ConciergeModel for StubModel {
        async fn generate(&self, _: &str, _: &str) -> Result<ModelReply, ModelError> {
            Ok(self.reply.clone())
        }
    }

    struct FailingModel;

    #[async_trait]
    impl ConciergeModel for FailingModel {
        async fn generate(&self, _: &str, _: &str) -> Result<ModelReply, ModelError> {
            Err(ModelError::Call("connection refused".to_string()))
        }
    }

    async fn build(model: Option<Arc<dyn ConciergeModel>>) -> (ConciergeService, Arc<dyn RepositoryProvider>) {
        let db = connect_memory().await;
        seed_user(&db, "u1", "u1@example.com").await;
        seed_restaurant(&db, 7, "Santoku", "Japanese").await;
        let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db));
        let reservations = Arc::new(ReservationService::new(repos.clone()));
        let context = Arc::new(RestaurantContextCache::new(repos.clone()));
        (
            ConciergeService::new(repos.clone(), reservations, context, model),
            repos,
        )
    }

    #[tokio::test]
    async fn text_reply_is_returned_and_logged() {
        let model = Arc::new(StubModel {
            reply: ModelReply::Text("Try Santoku for sushi.".to_string()),
        });
        let (svc, repos) = build(Some(model)).await;

        let out = svc.ask("u1", "any sushi places?").await;
        assert!(!out.degraded);
        assert_eq!(out.reply, "Try Santoku for sushi.");
        assert_eq!(repos.ai_interactions().count_for_user("u1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn tool_call_books_a_table_and_confirms() {
        let model = Arc::new(StubModel {
            reply: ModelReply::ToolCall(ReservationCall {
                restaurant_id: "7".to_string(),
                date: "2026-09-01".to_string(),
                time: "19:30".to_string(),
                party_size: 2,
            }),
        });
        let (svc, repos) = build(Some(model)).await;

        let out = svc.ask("u1", "book me a table at Santoku").await;
        assert!(!out.degraded);
        assert!(out.reply.contains("Santoku"));
        assert!(out.reply.contains("19:30"));

        let bookings = repos.reservations().find_for_user("u1").await.unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].0.party_size, 2);
    }

    #[tokio::test]
    async fn invalid_tool_arguments_apologize_without_booking() {
        let model = Arc::new(StubModel {
            reply: ModelReply::ToolCall(ReservationCall {
                restaurant_id: "Santoku".to_string(),
                date: "2026-09-01".to_string(),
                time: "19:30".to_string(),
                party_size: 2,
            }),
        });
        let (svc, repos) = build(Some(model)).await;

        let out = svc.ask("u1", "book me a table").await;
        assert!(!out.degraded);
        assert_eq!(out.reply, RESERVATION_APOLOGY);
        assert!(repos.reservations().find_for_user("u1").await.unwrap().is_empty());
        // The apology is still logged as the exchange outcome
        assert_eq!(repos.ai_interactions().count_for_user("u1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn model_failure_falls_back_and_still_logs() {
        let (svc, repos) = build(Some(Arc::new(FailingModel))).await;

        let out = svc.ask("u1", "hello").await;
        assert!(out.degraded);
        assert_eq!(out.reply, FALLBACK_REPLY);
        assert_eq!(repos.ai_interactions().count_for_user("u1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn missing_model_takes_the_fallback_path() {
        let (svc, repos) = build(None).await;

        let out = svc.ask("u1", "hello").await;
        assert!(out.degraded);
        assert_eq!(out.reply, FALLBACK_REPLY);
        assert_eq!(repos.ai_interactions().count_for_user("u1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn empty_reply_returns_fallback_without_degrading() {
        let model = Arc::new(StubModel {
            reply: ModelReply::Empty,
        });
        let (svc, _) = build(Some(model)).await;

        let out = svc.ask("u1", "hello").await;
        assert!(!out.degraded);
        assert_eq!(out.reply, FALLBACK_REPLY);
    }
}

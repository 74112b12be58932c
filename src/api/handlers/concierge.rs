//! Alfred concierge handler

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::api::error::{ApiError, ApiResult};
use crate::application::services::ConciergeService;
use crate::auth::AuthenticatedUser;

#[derive(Clone)]
pub struct ConciergeHandlerState {
    pub concierge: Arc<ConciergeService>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AskRequest {
    pub user_input: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AskResponse {
    pub reply: String,
}

/// Ask Alfred
#[utoipa::path(
    post,
    path = "/alfred/ask",
    request_body = AskRequest,
    responses(
        (status = 200, description = "Alfred's reply", body = AskResponse),
        (status = 400, description = "Empty input"),
        (status = 500, description = "Pipeline failed; body carries the fallback line")
    ),
    security(("bearer_auth" = [])),
    tag = "alfred"
)]
pub async fn ask(
    State(state): State<ConciergeHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(req): Json<AskRequest>,
) -> ApiResult<Response> {
    let user_input = match req.user_input {
        Some(input) if !input.trim().is_empty() => input,
        _ => return Err(ApiError::Validation("Input required".to_string())),
    };

    let outcome = state.concierge.ask(&auth.user_id, &user_input).await;

    if outcome.degraded {
        return Ok((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": outcome.reply })),
        )
            .into_response());
    }
    Ok(Json(AskResponse {
        reply: outcome.reply,
    })
    .into_response())
}

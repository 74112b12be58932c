//! Reservation handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::error::ApiResult;
use crate::application::services::ReservationService;
use crate::auth::AuthenticatedUser;
use crate::domain::reservation::Reservation;
use crate::domain::restaurant::RestaurantSummary;

#[derive(Clone)]
pub struct ReservationHandlerState {
    pub reservations: Arc<ReservationService>,
}

// ── DTOs ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReservationRequest {
    pub restaurant_id: Option<i32>,
    pub reservation_date: Option<String>,
    pub reservation_time: Option<String>,
    pub party_size: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationMessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantSummaryDto {
    pub name: String,
    pub location: String,
    pub cuisine_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserReservationDto {
    pub id: i32,
    pub restaurant_id: i32,
    pub reservation_date: String,
    pub reservation_time: String,
    pub party_size: i32,
    pub status: String,
    pub restaurants: RestaurantSummaryDto,
}

impl UserReservationDto {
    fn new(reservation: Reservation, restaurant: RestaurantSummary) -> Self {
        Self {
            id: reservation.id,
            restaurant_id: reservation.restaurant_id,
            reservation_date: reservation.reservation_date.to_string(),
            reservation_time: reservation.reservation_time.format("%H:%M").to_string(),
            party_size: reservation.party_size,
            status: reservation.status.as_str().to_string(),
            restaurants: RestaurantSummaryDto {
                name: restaurant.name,
                location: restaurant.location,
                cuisine_type: restaurant.cuisine_type,
                image_url: restaurant.image_url,
            },
        }
    }
}

// ── Handlers ────────────────────────────────────────────────────

/// Book a table
#[utoipa::path(
    post,
    path = "/reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = ReservationMessageResponse),
        (status = 400, description = "Missing or malformed fields")
    ),
    security(("bearer_auth" = [])),
    tag = "reservations"
)]
pub async fn create_reservation(
    State(state): State<ReservationHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(req): Json<CreateReservationRequest>,
) -> ApiResult<(StatusCode, Json<ReservationMessageResponse>)> {
    state
        .reservations
        .create(
            &auth.user_id,
            req.restaurant_id,
            req.reservation_date.as_deref(),
            req.reservation_time.as_deref(),
            req.party_size,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ReservationMessageResponse {
            message: "Reservation successfully created.".to_string(),
        }),
    ))
}

/// The authenticated user's reservations, most recent date first
#[utoipa::path(
    get,
    path = "/reservations/user",
    responses((status = 200, description = "Reservations", body = [UserReservationDto])),
    security(("bearer_auth" = [])),
    tag = "reservations"
)]
pub async fn list_user_reservations(
    State(state): State<ReservationHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> ApiResult<Json<Vec<UserReservationDto>>> {
    let listed = state.reservations.list_for_user(&auth.user_id).await?;
    Ok(Json(
        listed
            .into_iter()
            .map(|(r, summary)| UserReservationDto::new(r, summary))
            .collect(),
    ))
}

//! Catalog handlers: restaurant listing, reviews and the favorites toggle.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::error::{ApiError, ApiResult};
use crate::application::services::RestaurantContextCache;
use crate::auth::AuthenticatedUser;
use crate::domain::restaurant::Restaurant;
use crate::domain::review::{NewReview, Review, ReviewWithAuthor};
use crate::domain::RepositoryProvider;

#[derive(Clone)]
pub struct CatalogHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub context: Arc<RestaurantContextCache>,
}

// ── DTOs ────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantDto {
    pub id: i32,
    pub name: String,
    pub cuisine_type: String,
    pub location: String,
    pub price_range: String,
    pub average_rating: f64,
    pub total_reviews: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub status: String,
    /// Present on listings for an identified viewer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

impl RestaurantDto {
    fn annotated(r: Restaurant, is_favorite: Option<bool>) -> Self {
        Self {
            id: r.id,
            name: r.name,
            cuisine_type: r.cuisine_type,
            location: r.location,
            price_range: r.price_range,
            average_rating: r.average_rating,
            total_reviews: r.total_reviews,
            image_url: r.image_url,
            status: r.status.as_str().to_string(),
            is_favorite,
        }
    }
}

impl From<Restaurant> for RestaurantDto {
    fn from(r: Restaurant) -> Self {
        Self::annotated(r, None)
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListRestaurantsParams {
    /// "favorites" narrows the listing to the viewer's favorites
    pub filter: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewDto {
    pub id: i32,
    pub restaurant_id: i32,
    pub user_id: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
}

impl From<Review> for ReviewDto {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            restaurant_id: r.restaurant_id,
            user_id: r.user_id,
            rating: r.rating,
            comment: r.comment,
            created_at: r.created_at,
            author_name: None,
        }
    }
}

impl From<ReviewWithAuthor> for ReviewDto {
    fn from(r: ReviewWithAuthor) -> Self {
        let mut dto = Self::from(r.review);
        dto.author_name = Some(r.author_name);
        dto
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddReviewRequest {
    pub rating: Option<i64>,
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddReviewResponse {
    pub message: String,
    pub review: ReviewDto,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ToggleFavoriteRequest {
    pub restaurant_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ToggleFavoriteResponse {
    pub message: String,
    pub is_favorite: bool,
}

// ── Handlers ────────────────────────────────────────────────────

/// List the catalog, annotated with the viewer's favorites
#[utoipa::path(
    get,
    path = "/restaurants",
    params(ListRestaurantsParams),
    responses(
        (status = 200, description = "Restaurants", body = [RestaurantDto]),
        (status = 403, description = "favorites filter without identity")
    ),
    tag = "restaurants"
)]
pub async fn list_restaurants(
    State(state): State<CatalogHandlerState>,
    Query(params): Query<ListRestaurantsParams>,
    viewer: Option<Extension<AuthenticatedUser>>,
) -> ApiResult<Json<Vec<RestaurantDto>>> {
    if params.filter.as_deref() == Some("favorites") {
        let Some(Extension(user)) = viewer else {
            return Err(ApiError::Forbidden(
                "Must be logged in to view favorites.".to_string(),
            ));
        };
        let favorites = state
            .repos
            .restaurants()
            .find_favorited_by(&user.user_id)
            .await?;
        return Ok(Json(
            favorites
                .into_iter()
                .map(|r| RestaurantDto::annotated(r, Some(true)))
                .collect(),
        ));
    }

    let viewer_id = viewer.as_ref().map(|ext| ext.0.user_id.as_str());
    let listed = state.repos.restaurants().list_annotated(viewer_id).await?;
    Ok(Json(
        listed
            .into_iter()
            .map(|(r, marked)| RestaurantDto::annotated(r, Some(marked)))
            .collect(),
    ))
}

/// A single restaurant
#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    params(("id" = i32, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "Restaurant", body = RestaurantDto),
        (status = 404, description = "Unknown restaurant")
    ),
    tag = "restaurants"
)]
pub async fn get_restaurant(
    State(state): State<CatalogHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<RestaurantDto>> {
    let restaurant = state.repos.restaurants().find_by_id(id).await?;
    let Some(restaurant) = restaurant else {
        return Err(ApiError::NotFound("Restaurant not found.".to_string()));
    };
    Ok(Json(restaurant.into()))
}

/// Reviews of a restaurant, newest first
#[utoipa::path(
    get,
    path = "/restaurants/{id}/reviews",
    params(("id" = i32, Path, description = "Restaurant ID")),
    responses((status = 200, description = "Reviews with author names", body = [ReviewDto])),
    tag = "restaurants"
)]
pub async fn list_reviews(
    State(state): State<CatalogHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Vec<ReviewDto>>> {
    let reviews = state.repos.reviews().list_for_restaurant(id).await?;
    Ok(Json(reviews.into_iter().map(ReviewDto::from).collect()))
}

/// Submit a review; updates the restaurant's aggregates atomically
#[utoipa::path(
    post,
    path = "/restaurants/{id}/reviews",
    params(("id" = i32, Path, description = "Restaurant ID")),
    request_body = AddReviewRequest,
    responses(
        (status = 201, description = "Review created", body = AddReviewResponse),
        (status = 400, description = "Missing fields or rating out of range"),
        (status = 403, description = "No identity")
    ),
    security(("bearer_auth" = [])),
    tag = "restaurants"
)]
pub async fn add_review(
    State(state): State<CatalogHandlerState>,
    Path(id): Path<i32>,
    viewer: Option<Extension<AuthenticatedUser>>,
    Json(req): Json<AddReviewRequest>,
) -> ApiResult<(StatusCode, Json<AddReviewResponse>)> {
    let Some(Extension(user)) = viewer else {
        return Err(ApiError::Unauthenticated);
    };

    let (Some(rating), Some(comment)) = (req.rating, req.comment) else {
        return Err(ApiError::Validation(
            "Rating and comment are required.".to_string(),
        ));
    };
    if !(1..=5).contains(&rating) {
        return Err(ApiError::Validation(
            "Rating must be between 1 and 5.".to_string(),
        ));
    }

    let review = state
        .repos
        .reviews()
        .add(NewReview {
            restaurant_id: id,
            user_id: user.user_id,
            rating: rating as i32,
            comment,
        })
        .await?;

    // The catalog summary now carries stale aggregates.
    state.context.invalidate().await;

    Ok((
        StatusCode::CREATED,
        Json(AddReviewResponse {
            message: "Review added successfully.".to_string(),
            review: review.into(),
        }),
    ))
}

/// Flip the favorite mark for a restaurant
#[utoipa::path(
    post,
    path = "/favorites/toggle",
    request_body = ToggleFavoriteRequest,
    responses(
        (status = 201, description = "Favorited", body = ToggleFavoriteResponse),
        (status = 200, description = "Unfavorited", body = ToggleFavoriteResponse),
        (status = 400, description = "Missing restaurant_id"),
        (status = 403, description = "No identity")
    ),
    security(("bearer_auth" = [])),
    tag = "restaurants"
)]
pub async fn toggle_favorite(
    State(state): State<CatalogHandlerState>,
    viewer: Option<Extension<AuthenticatedUser>>,
    Json(req): Json<ToggleFavoriteRequest>,
) -> ApiResult<(StatusCode, Json<ToggleFavoriteResponse>)> {
    let Some(Extension(user)) = viewer else {
        return Err(ApiError::Unauthenticated);
    };
    let Some(restaurant_id) = req.restaurant_id else {
        return Err(ApiError::Validation(
            "Restaurant ID is required.".to_string(),
        ));
    };

    let is_favorite = state
        .repos
        .favorites()
        .toggle(&user.user_id, restaurant_id)
        .await?;

    let (status, message) = if is_favorite {
        (StatusCode::CREATED, "Favorited successfully.")
    } else {
        (StatusCode::OK, "Unfavorited successfully.")
    };
    Ok((
        status,
        Json(ToggleFavoriteResponse {
            message: message.to_string(),
            is_favorite,
        }),
    ))
}

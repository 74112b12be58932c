//! Menu handlers: listings plus the authenticated menu CRUD.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::error::{ApiError, ApiResult};
use crate::auth::AuthenticatedUser;
use crate::domain::menu::{Menu, MenuItem, MenuUpdate, NewMenu};
use crate::domain::RepositoryProvider;

#[derive(Clone)]
pub struct MenuHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
}

// ── DTOs ────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct MenuDto {
    pub id: i32,
    pub restaurant_id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
}

impl From<Menu> for MenuDto {
    fn from(m: Menu) -> Self {
        Self {
            id: m.id,
            restaurant_id: m.restaurant_id,
            name: m.name,
            description: m.description,
            is_active: m.is_active,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MenuItemDto {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub category: String,
    pub display_order: i32,
}

impl From<MenuItem> for MenuItemDto {
    fn from(i: MenuItem) -> Self {
        Self {
            id: i.id,
            name: i.name,
            description: i.description,
            price: i.price,
            category: i.category,
            display_order: i.display_order,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMenuRequest {
    pub restaurant_id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMenuRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MenuResponse {
    pub message: String,
    pub menu: MenuDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MenuMessageResponse {
    pub message: String,
}

// ── Handlers ────────────────────────────────────────────────────

/// Active menus of a restaurant
#[utoipa::path(
    get,
    path = "/restaurants/{id}/menus",
    params(("id" = i32, Path, description = "Restaurant ID")),
    responses((status = 200, description = "Active menus", body = [MenuDto])),
    tag = "menus"
)]
pub async fn restaurant_menus(
    State(state): State<MenuHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Vec<MenuDto>>> {
    let menus = state.repos.menus().find_active_for_restaurant(id).await?;
    Ok(Json(menus.into_iter().map(MenuDto::from).collect()))
}

/// A single menu
#[utoipa::path(
    get,
    path = "/menus/{id}",
    params(("id" = i32, Path, description = "Menu ID")),
    responses(
        (status = 200, description = "Menu", body = MenuDto),
        (status = 404, description = "Unknown menu")
    ),
    tag = "menus"
)]
pub async fn get_menu(
    State(state): State<MenuHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<MenuDto>> {
    let menu = state.repos.menus().find_by_id(id).await?;
    let Some(menu) = menu else {
        return Err(ApiError::NotFound("Menu not found.".to_string()));
    };
    Ok(Json(menu.into()))
}

/// Available items of a menu, in display order
#[utoipa::path(
    get,
    path = "/menus/{id}/items",
    params(("id" = i32, Path, description = "Menu ID")),
    responses((status = 200, description = "Items", body = [MenuItemDto])),
    tag = "menus"
)]
pub async fn list_items(
    State(state): State<MenuHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Vec<MenuItemDto>>> {
    let items = state.repos.menus().items_for_menu(id).await?;
    Ok(Json(items.into_iter().map(MenuItemDto::from).collect()))
}

/// Create a menu
#[utoipa::path(
    post,
    path = "/menus",
    request_body = CreateMenuRequest,
    responses(
        (status = 201, description = "Menu created", body = MenuResponse),
        (status = 400, description = "Missing restaurant_id or name"),
        (status = 403, description = "No identity")
    ),
    security(("bearer_auth" = [])),
    tag = "menus"
)]
pub async fn create_menu(
    State(state): State<MenuHandlerState>,
    viewer: Option<Extension<AuthenticatedUser>>,
    Json(req): Json<CreateMenuRequest>,
) -> ApiResult<(StatusCode, Json<MenuResponse>)> {
    if viewer.is_none() {
        return Err(ApiError::Unauthenticated);
    }
    let (Some(restaurant_id), Some(name)) = (req.restaurant_id, req.name) else {
        return Err(ApiError::Validation(
            "Restaurant ID and name are required.".to_string(),
        ));
    };

    let menu = state
        .repos
        .menus()
        .create(NewMenu {
            restaurant_id,
            name,
            description: req.description,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(MenuResponse {
            message: "Menu created successfully.".to_string(),
            menu: menu.into(),
        }),
    ))
}

/// Update a menu
#[utoipa::path(
    put,
    path = "/menus/{id}",
    params(("id" = i32, Path, description = "Menu ID")),
    request_body = UpdateMenuRequest,
    responses(
        (status = 200, description = "Menu updated", body = MenuResponse),
        (status = 400, description = "No fields given"),
        (status = 403, description = "No identity"),
        (status = 404, description = "Unknown menu")
    ),
    security(("bearer_auth" = [])),
    tag = "menus"
)]
pub async fn update_menu(
    State(state): State<MenuHandlerState>,
    Path(id): Path<i32>,
    viewer: Option<Extension<AuthenticatedUser>>,
    Json(req): Json<UpdateMenuRequest>,
) -> ApiResult<Json<MenuResponse>> {
    if viewer.is_none() {
        return Err(ApiError::Unauthenticated);
    }
    let update = MenuUpdate {
        name: req.name,
        description: req.description,
        is_active: req.is_active,
    };
    if update.is_empty() {
        return Err(ApiError::Validation(
            "No data provided for update.".to_string(),
        ));
    }

    let menu = state.repos.menus().update(id, update).await?;
    Ok(Json(MenuResponse {
        message: "Menu updated successfully.".to_string(),
        menu: menu.into(),
    }))
}

/// Soft-delete a menu
#[utoipa::path(
    delete,
    path = "/menus/{id}",
    params(("id" = i32, Path, description = "Menu ID")),
    responses(
        (status = 200, description = "Menu deactivated", body = MenuMessageResponse),
        (status = 403, description = "No identity"),
        (status = 404, description = "Unknown menu")
    ),
    security(("bearer_auth" = [])),
    tag = "menus"
)]
pub async fn delete_menu(
    State(state): State<MenuHandlerState>,
    Path(id): Path<i32>,
    viewer: Option<Extension<AuthenticatedUser>>,
) -> ApiResult<Json<MenuMessageResponse>> {
    if viewer.is_none() {
        return Err(ApiError::Unauthenticated);
    }
    state.repos.menus().soft_delete(id).await?;
    Ok(Json(MenuMessageResponse {
        message: "Menu deleted successfully.".to_string(),
    }))
}

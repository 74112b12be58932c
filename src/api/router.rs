//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers::{concierge, health, menus, reservations, restaurants, users};
use crate::application::services::{ConciergeService, ReservationService, RestaurantContextCache};
use crate::auth::jwt::JwtConfig;
use crate::auth::middleware::{auth_middleware, optional_auth_middleware, AuthState};
use crate::domain::RepositoryProvider;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token from POST /users/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health,
        // Users
        users::signup,
        users::login,
        users::update_profile,
        users::get_profile,
        // Restaurants
        restaurants::list_restaurants,
        restaurants::get_restaurant,
        restaurants::list_reviews,
        restaurants::add_review,
        restaurants::toggle_favorite,
        // Menus
        menus::restaurant_menus,
        menus::get_menu,
        menus::list_items,
        menus::create_menu,
        menus::update_menu,
        menus::delete_menu,
        // Reservations
        reservations::create_reservation,
        reservations::list_user_reservations,
        // Alfred
        concierge::ask,
    ),
    components(
        schemas(
            health::HealthResponse,
            users::SignupRequest,
            users::LoginRequest,
            users::LoginResponse,
            users::SessionUser,
            users::UpdateProfileRequest,
            users::UpdateProfileResponse,
            users::ProfileDto,
            users::MessageResponse,
            restaurants::RestaurantDto,
            restaurants::ReviewDto,
            restaurants::AddReviewRequest,
            restaurants::AddReviewResponse,
            restaurants::ToggleFavoriteRequest,
            restaurants::ToggleFavoriteResponse,
            menus::MenuDto,
            menus::MenuItemDto,
            menus::CreateMenuRequest,
            menus::UpdateMenuRequest,
            menus::MenuResponse,
            menus::MenuMessageResponse,
            reservations::CreateReservationRequest,
            reservations::ReservationMessageResponse,
            reservations::UserReservationDto,
            reservations::RestaurantSummaryDto,
            concierge::AskRequest,
            concierge::AskResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Liveness probe"),
        (name = "users", description = "Signup, login and profile management. The login token goes into `Authorization: Bearer <token>`."),
        (name = "restaurants", description = "Catalog browsing, reviews and favorites"),
        (name = "menus", description = "Menu cards and their items; deletion is soft"),
        (name = "reservations", description = "Table bookings"),
        (name = "alfred", description = "The AI dining concierge"),
    ),
    info(
        title = "VENU API",
        version = "0.1.0",
        description = "REST API for the VENU restaurant discovery and table reservation platform."
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
    reservations_service: Arc<ReservationService>,
    context: Arc<RestaurantContextCache>,
    concierge_service: Arc<ConciergeService>,
) -> Router {
    let middleware_state = AuthState {
        jwt_config: jwt_config.clone(),
    };

    let user_state = users::UserHandlerState {
        repos: repos.clone(),
        jwt_config,
    };
    let catalog_state = restaurants::CatalogHandlerState {
        repos: repos.clone(),
        context,
    };
    let menu_state = menus::MenuHandlerState {
        repos: repos.clone(),
    };
    let reservation_state = reservations::ReservationHandlerState {
        reservations: reservations_service,
    };
    let concierge_state = concierge::ConciergeHandlerState {
        concierge: concierge_service,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Account routes (public)
    let user_routes = Router::new()
        .route("/users", post(users::signup))
        .route("/users/login", post(users::login))
        .with_state(user_state.clone());

    // Account routes (protected)
    let user_protected_routes = Router::new()
        .route("/users/{id}", patch(users::update_profile))
        .route("/profile", get(users::get_profile))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(user_state);

    // Catalog routes. Optional auth: anonymous browsing is allowed, the
    // write handlers demand the identity extension themselves.
    let catalog_routes = Router::new()
        .route("/restaurants", get(restaurants::list_restaurants))
        .route("/restaurants/{id}", get(restaurants::get_restaurant))
        .route(
            "/restaurants/{id}/reviews",
            get(restaurants::list_reviews).post(restaurants::add_review),
        )
        .route("/favorites/toggle", post(restaurants::toggle_favorite))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            optional_auth_middleware,
        ))
        .with_state(catalog_state);

    // Menu routes, same optional-auth pattern: reads are public, the
    // CRUD handlers require the identity extension.
    let menu_routes = Router::new()
        .route("/restaurants/{id}/menus", get(menus::restaurant_menus))
        .route("/menus", post(menus::create_menu))
        .route(
            "/menus/{id}",
            get(menus::get_menu)
                .put(menus::update_menu)
                .delete(menus::delete_menu),
        )
        .route("/menus/{id}/items", get(menus::list_items))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            optional_auth_middleware,
        ))
        .with_state(menu_state);

    // Reservation routes (protected)
    let reservation_routes = Router::new()
        .route("/reservations", post(reservations::create_reservation))
        .route(
            "/reservations/user",
            get(reservations::list_user_reservations),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(reservation_state);

    // Concierge routes (protected)
    let concierge_routes = Router::new()
        .route("/alfred/ask", post(concierge::ask))
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(concierge_state);

    Router::new()
        .route("/health", get(health::health))
        .merge(user_routes)
        .merge(user_protected_routes)
        .merge(catalog_routes)
        .merge(menu_routes)
        .merge(reservation_routes)
        .merge(concierge_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use sea_orm::DatabaseConnection;
    use serde_json::{json, Value};
    use tower::Service;

    use crate::application::services::FALLBACK_REPLY;
    use crate::infrastructure::database::repositories::test_support::{
        connect_memory, seed_restaurant,
    };
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;

    fn build_app(db: DatabaseConnection) -> Router {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db));
        let jwt_config = JwtConfig {
            secret: "router-test-secret".to_string(),
            expiration_hours: 1,
            issuer: "venu-service".to_string(),
        };
        let reservations = Arc::new(ReservationService::new(repos.clone()));
        let context = Arc::new(RestaurantContextCache::new(repos.clone()));
        let concierge = Arc::new(ConciergeService::new(
            repos.clone(),
            reservations.clone(),
            context.clone(),
            None,
        ));
        create_api_router(repos, jwt_config, reservations, context, concierge)
    }

    async fn test_app() -> Router {
        let db = connect_memory().await;
        seed_restaurant(&db, 1, "Mama's Kitchen", "Ghanaian").await;
        seed_restaurant(&db, 2, "Sakura Garden", "Japanese").await;
        build_app(db)
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let mut svc = app.clone().into_service::<Body>();
        let response = svc.call(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn signup_and_login(app: &Router, email: &str) -> String {
        let (status, _) = send(
            app,
            json_request(
                "POST",
                "/users",
                None,
                json!({
                    "name": "Ama Serwaa",
                    "email": email,
                    "phone_number": "0244123456",
                    "password": "secret123",
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(
            app,
            json_request(
                "POST",
                "/users/login",
                None,
                json!({ "email": email, "password": "secret123" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["name"], "Ama Serwaa");
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let app = test_app().await;
        let (status, body) = send(&app, get_request("/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_signup_rejects_duplicate_email() {
        let app = test_app().await;
        signup_and_login(&app, "ama@example.com").await;

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/users",
                None,
                json!({
                    "name": "Other",
                    "email": "ama@example.com",
                    "phone_number": "0200000000",
                    "password": "another1",
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "User with this email already exists.");
    }

    #[tokio::test]
    async fn test_signup_rejects_missing_fields_and_bad_email() {
        let app = test_app().await;

        let (status, _) = send(
            &app,
            json_request("POST", "/users", None, json!({ "name": "Ama" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/users",
                None,
                json!({
                    "name": "Ama",
                    "email": "not-an-email",
                    "phone_number": "0244123456",
                    "password": "secret123",
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "A valid email address is required.");
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_is_unauthorized() {
        let app = test_app().await;
        signup_and_login(&app, "kofi@example.com").await;

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/users/login",
                None,
                json!({ "email": "kofi@example.com", "password": "wrong-pass" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Not Allowed");
    }

    #[tokio::test]
    async fn test_profile_requires_token() {
        let app = test_app().await;
        let (status, body) = send(&app, get_request("/profile", None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Access forbidden. User not authenticated.");
    }

    #[tokio::test]
    async fn test_profile_roundtrip_and_foreign_update_rejected() {
        let app = test_app().await;
        let token = signup_and_login(&app, "ama@example.com").await;

        let (status, body) = send(&app, get_request("/profile", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Ama Serwaa");
        assert_eq!(body["email"], "ama@example.com");

        let (status, body) = send(
            &app,
            json_request(
                "PATCH",
                "/users/somebody-else",
                Some(&token),
                json!({ "name": "Mallory" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "You can only modify your own profile.");
    }

    #[tokio::test]
    async fn test_reservation_lifecycle() {
        let app = test_app().await;
        let token = signup_and_login(&app, "ama@example.com").await;

        // No token
        let (status, _) = send(
            &app,
            json_request("POST", "/reservations", None, json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        // Missing fields
        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/reservations",
                Some(&token),
                json!({ "restaurant_id": 1 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/reservations",
                Some(&token),
                json!({
                    "restaurant_id": 1,
                    "reservation_date": "2026-09-01",
                    "reservation_time": "19:30",
                    "party_size": 2,
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Reservation successfully created.");

        let (status, body) = send(&app, get_request("/reservations/user", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        let listed = body.as_array().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["reservation_time"], "19:30");
        assert_eq!(listed[0]["status"], "Confirmed");
        assert_eq!(listed[0]["restaurants"]["name"], "Mama's Kitchen");
    }

    #[tokio::test]
    async fn test_favorites_toggle_and_filter() {
        let app = test_app().await;
        let token = signup_and_login(&app, "ama@example.com").await;

        let (status, _) = send(
            &app,
            get_request("/restaurants?filter=favorites", None),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        // Zero favorites is an empty listing, not an error
        let (status, body) = send(
            &app,
            get_request("/restaurants?filter=favorites", Some(&token)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/favorites/toggle",
                Some(&token),
                json!({ "restaurant_id": 1 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["is_favorite"], true);

        let (status, body) = send(&app, get_request("/restaurants", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        let listed = body.as_array().unwrap();
        let marked: Vec<bool> = listed
            .iter()
            .map(|r| r["is_favorite"].as_bool().unwrap())
            .collect();
        assert!(marked.contains(&true));
        assert!(marked.contains(&false));

        let (status, body) = send(
            &app,
            get_request("/restaurants?filter=favorites", Some(&token)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        // Second toggle removes the mark
        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/favorites/toggle",
                Some(&token),
                json!({ "restaurant_id": 1 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_favorite"], false);
    }

    #[tokio::test]
    async fn test_review_updates_restaurant_aggregates() {
        let app = test_app().await;
        let token = signup_and_login(&app, "ama@example.com").await;

        // Anonymous submission is rejected
        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/restaurants/1/reviews",
                None,
                json!({ "rating": 4, "comment": "Lovely jollof." }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/restaurants/1/reviews",
                Some(&token),
                json!({ "rating": 9, "comment": "Too good." }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Rating must be between 1 and 5.");

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/restaurants/1/reviews",
                Some(&token),
                json!({ "rating": 4, "comment": "Lovely jollof." }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["review"]["rating"], 4);

        let (status, body) = send(&app, get_request("/restaurants/1", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["average_rating"], 4.0);
        assert_eq!(body["total_reviews"], 1);

        let (status, body) = send(&app, get_request("/restaurants/1/reviews", None)).await;
        assert_eq!(status, StatusCode::OK);
        let listed = body.as_array().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["author_name"], "Ama Serwaa");
    }

    #[tokio::test]
    async fn test_unknown_restaurant_is_404() {
        let app = test_app().await;
        let (status, body) = send(&app, get_request("/restaurants/99", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Restaurant not found.");
    }

    #[tokio::test]
    async fn test_menu_crud_requires_identity() {
        let app = test_app().await;
        let token = signup_and_login(&app, "ama@example.com").await;

        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/menus",
                None,
                json!({ "restaurant_id": 1, "name": "Lunch" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/menus",
                Some(&token),
                json!({ "restaurant_id": 1, "name": "Lunch" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let menu_id = body["menu"]["id"].as_i64().unwrap();

        // Anonymous reads still work
        let (status, body) = send(
            &app,
            get_request(&format!("/menus/{menu_id}"), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Lunch");
        assert_eq!(body["is_active"], true);

        let (status, _) = send(
            &app,
            json_request(
                "DELETE",
                &format!("/menus/{menu_id}"),
                Some(&token),
                json!({}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        // Soft-deleted menus disappear from the restaurant listing
        let (status, body) = send(&app, get_request("/restaurants/1/menus", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_alfred_requires_token_and_input() {
        let app = test_app().await;
        let (status, _) = send(
            &app,
            json_request("POST", "/alfred/ask", None, json!({ "user_input": "Hi" })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let token = signup_and_login(&app, "ama@example.com").await;
        let (status, body) = send(
            &app,
            json_request("POST", "/alfred/ask", Some(&token), json!({ "user_input": "  " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Input required");
    }

    #[tokio::test]
    async fn test_alfred_without_model_degrades_to_fallback() {
        let app = test_app().await;
        let token = signup_and_login(&app, "ama@example.com").await;

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/alfred/ask",
                Some(&token),
                json!({ "user_input": "Recommend somewhere for dinner" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], FALLBACK_REPLY);
    }
}

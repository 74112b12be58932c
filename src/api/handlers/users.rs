//! Account handlers: signup, login, profile read and update.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::ValidateEmail;

use crate::api::error::{ApiError, ApiResult};
use crate::auth::{create_token, hash_password, verify_password, AuthenticatedUser, JwtConfig};
use crate::domain::user::{Profile, ProfileUpdate, User};
use crate::domain::RepositoryProvider;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone)]
pub struct UserHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub jwt_config: JwtConfig,
}

// ── DTOs ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: SessionUser,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileDto {
    pub name: String,
    pub email: String,
    pub phone_number: String,
}

impl From<Profile> for ProfileDto {
    fn from(p: Profile) -> Self {
        Self {
            name: p.name,
            email: p.email,
            phone_number: p.phone_number,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpdateProfileResponse {
    pub message: String,
    pub user: ProfileDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

// ── Handlers ────────────────────────────────────────────────────

/// Register a new account
#[utoipa::path(
    post,
    path = "/users",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, description = "Missing field, invalid email, short password or duplicate email")
    ),
    tag = "users"
)]
pub async fn signup(
    State(state): State<UserHandlerState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let SignupRequest {
        name: Some(name),
        email: Some(email),
        phone_number: Some(phone_number),
        password: Some(password),
    } = req
    else {
        return Err(ApiError::Validation("All fields are required.".to_string()));
    };

    if !email.validate_email() {
        return Err(ApiError::Validation(
            "A valid email address is required.".to_string(),
        ));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(
            "Password must be at least 6 characters.".to_string(),
        ));
    }

    let password_hash =
        hash_password(&password).map_err(|e| ApiError::Internal(e.to_string()))?;
    let now = Utc::now();
    state
        .repos
        .users()
        .create(User {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            phone_number,
            password_hash,
            created_at: now,
            updated_at: now,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User created successfully.".to_string(),
        }),
    ))
}

/// Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 400, description = "Unknown email"),
        (status = 401, description = "Wrong password")
    ),
    tag = "users"
)]
pub async fn login(
    State(state): State<UserHandlerState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let LoginRequest {
        email: Some(email),
        password: Some(password),
    } = req
    else {
        return Err(ApiError::Validation(
            "Email and password are required.".to_string(),
        ));
    };

    let user = state.repos.users().find_by_email(&email).await?;
    let Some(user) = user else {
        return Err(ApiError::Validation("Cannot find user".to_string()));
    };

    let matches =
        verify_password(&password, &user.password_hash).map_err(|e| ApiError::Internal(e.to_string()))?;
    if !matches {
        return Err(ApiError::InvalidCredentials("Not Allowed".to_string()));
    }

    let token = create_token(&user.id, &user.name, &state.jwt_config)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(LoginResponse {
        message: "Success".to_string(),
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_config.expiration_hours * 3600,
        user: SessionUser {
            id: user.id,
            email: user.email,
            name: user.name,
        },
    }))
}

/// Update the authenticated user's profile
#[utoipa::path(
    patch,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User ID, must match the token subject")),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UpdateProfileResponse),
        (status = 400, description = "No fields given or password too short"),
        (status = 403, description = "Attempt to modify another user's profile")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn update_profile(
    State(state): State<UserHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<UpdateProfileResponse>> {
    if id != auth.user_id {
        return Err(ApiError::Forbidden(
            "You can only modify your own profile.".to_string(),
        ));
    }

    let password_hash = match req.password {
        Some(password) => {
            if password.len() < MIN_PASSWORD_LEN {
                return Err(ApiError::Validation(
                    "Password must be at least 6 characters.".to_string(),
                ));
            }
            Some(hash_password(&password).map_err(|e| ApiError::Internal(e.to_string()))?)
        }
        None => None,
    };

    let update = ProfileUpdate {
        name: req.name,
        phone_number: req.phone_number,
        password_hash,
    };
    if update.is_empty() {
        return Err(ApiError::Validation(
            "No data provided for update.".to_string(),
        ));
    }

    let profile = state.repos.users().update_profile(&id, update).await?;
    Ok(Json(UpdateProfileResponse {
        message: "Profile updated successfully.".to_string(),
        user: profile.into(),
    }))
}

/// The authenticated user's profile
#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Profile", body = ProfileDto),
        (status = 404, description = "Account row missing")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn get_profile(
    State(state): State<UserHandlerState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> ApiResult<Json<ProfileDto>> {
    let user = state.repos.users().find_by_id(&auth.user_id).await?;
    let Some(user) = user else {
        return Err(ApiError::NotFound("User data not found.".to_string()));
    };
    Ok(Json(ProfileDto::from(Profile::from(user))))
}

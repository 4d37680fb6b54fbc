use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, UserDto};
use crate::api::validation::{validate_email, validate_name, validate_password};
use crate::state::SharedState;

const SESSION_USER_KEY: &str = "user_id";

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Rejects requests without a logged-in session. Applied as a `route_layer`
/// on every registry route; login and register stay outside it.
pub async fn auth_middleware(
    session: Session,
    request: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    if let Ok(Some(user_id)) = session.get::<i32>(SESSION_USER_KEY).await {
        tracing::Span::current().record("user_id", user_id);
        return Ok(next.run(request).await);
    }

    let response = (StatusCode::UNAUTHORIZED, "Unauthorized");
    Ok(response.into_response())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
pub async fn register(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let name = validate_name(&payload.name)?.to_string();
    let email = validate_email(&payload.email)?.to_lowercase();
    validate_password(&payload.password)?;

    if state
        .store
        .user_email_exists(&email)
        .await
        .map_err(|e| ApiError::internal(format!("Registration lookup failed: {e}")))?
    {
        return Err(ApiError::Conflict(
            "A user with this email already exists".to_string(),
        ));
    }

    let user = state
        .store
        .create_user(&name, &email, &payload.password)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create user: {e}")))?;

    tracing::info!("Registered user {}", user.email);

    Ok(Json(ApiResponse::success(UserDto {
        id: user.id,
        name: user.name,
        email: user.email,
    })))
}

/// POST /auth/login
/// Unknown email and wrong password produce the same generic failure.
pub async fn login(
    State(state): State<Arc<SharedState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    if payload.email.is_empty() {
        return Err(ApiError::validation("Email is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let email = payload.email.trim().to_lowercase();

    let user = state
        .store
        .authenticate_user(&email, &payload.password)
        .await
        .map_err(|e| ApiError::internal(format!("Authentication error: {e}")))?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    if let Err(e) = session.insert(SESSION_USER_KEY, user.id).await {
        return Err(ApiError::internal(format!("Failed to create session: {e}")));
    }

    Ok(Json(ApiResponse::success(UserDto {
        id: user.id,
        name: user.name,
        email: user.email,
    })))
}

/// POST /auth/logout
pub async fn logout(session: Session) -> impl IntoResponse {
    let _ = session.flush().await;
    (StatusCode::OK, "Logged out")
}

/// GET /auth/me
pub async fn get_current_user(
    State(state): State<Arc<SharedState>>,
    session: Session,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user_id = get_session_user_id(&session).await?;

    let user = state
        .store
        .get_user(user_id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to get user: {e}")))?
        .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

    Ok(Json(ApiResponse::success(UserDto {
        id: user.id,
        name: user.name,
        email: user.email,
    })))
}

// ============================================================================
// Helpers
// ============================================================================

async fn get_session_user_id(session: &Session) -> Result<i32, ApiError> {
    session
        .get::<i32>(SESSION_USER_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))
}

//! Authentication route handlers.
//!
//! Signup, login, and logout. Login stores the user's identity in the
//! session; every cart/checkout/order handler reads it back from there.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use sanchi_core::UserId;

use crate::error::{self, AppError};
use crate::middleware::{RequireAuth, clear_current_user, set_current_user};
use crate::models::{CurrentUser, User};
use crate::services::AuthService;
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Signup request body.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Signup response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub message: &'static str,
    pub user_id: UserId,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub user: User,
}

/// Generic message response body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// =============================================================================
// Handlers
// =============================================================================

/// Create a new account.
///
/// POST /api/signup
///
/// # Errors
///
/// Returns `AppError` when a field is missing/invalid or the email is taken.
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let auth = AuthService::new(state.pool());
    let user = auth.signup(&req.name, &req.email, &req.password).await?;

    tracing::info!(user_id = %user.id, "account created");

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully",
            user_id: user.id,
        }),
    ))
}

/// Login and establish the session.
///
/// POST /api/login
///
/// # Errors
///
/// Returns `AppError` for unknown emails, wrong passwords, or session
/// failures.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let auth = AuthService::new(state.pool());
    let user = auth.login(&req.email, &req.password).await?;

    set_current_user(&session, &CurrentUser::from(&user)).await?;
    error::set_sentry_user(&user.id, Some(user.email.as_str()));

    tracing::info!(user_id = %user.id, "login successful");

    Ok(Json(LoginResponse {
        message: "Login successful",
        user,
    }))
}

/// Destroy the session.
///
/// POST /api/logout
///
/// # Errors
///
/// Returns `AppError` if the session cannot be cleared.
pub async fn logout(session: Session) -> Result<Json<MessageResponse>, AppError> {
    clear_current_user(&session).await?;
    error::clear_sentry_user();

    Ok(Json(MessageResponse {
        message: "Logged out",
    }))
}

/// The current session's profile.
///
/// GET /api/me
pub async fn me(RequireAuth(user): RequireAuth) -> Json<CurrentUser> {
    Json(user)
}

//! Auth handlers — login, logout, me.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use gatehouse_auth::aggregate::Auth;
use gatehouse_core::error::{AppError, ErrorKind};
use gatehouse_entity::user::Credentials;

use crate::dto::request::LoginRequest;
use crate::dto::response::{ApiResponse, LoginResponse, MessageResponse, UserResponse};
use crate::extractors::Identity;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let credentials = Credentials::new(req.email, req.password);

    let auth = state
        .auth_service
        .login(&credentials)
        .await
        .map_err(|e| match e.kind {
            // Unknown email and wrong password look identical on the wire.
            ErrorKind::NotFound | ErrorKind::Authentication => {
                AppError::authentication("invalid email or password")
            }
            _ => e,
        })?;

    let user = auth
        .user
        .ok_or_else(|| AppError::internal("login succeeded without a user"))?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        auth_token: auth.auth_token,
        user: UserResponse::from(user),
    })))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let mut auth = Auth::with_token(identity.token.clone());
    state.auth_service.logout(&mut auth).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Logged out successfully".to_string(),
    })))
}

/// GET /api/auth/me
///
/// Re-validates the caller's token (including the revocation check) and
/// resolves the owning user.
pub async fn me(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let mut auth = Auth::with_token(identity.token.clone());
    state.auth_service.validate(&mut auth).await?;

    let user = auth
        .user
        .ok_or_else(|| AppError::internal("validate succeeded without a user"))?;

    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}

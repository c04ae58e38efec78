//! Role-gate middleware — decodes the bearer token and enforces a minimum role.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

use gatehouse_core::error::AppError;
use gatehouse_entity::user::Role;
use gatehouse_service::context::RequestContext;

use crate::state::AppState;

/// Gate admitting any successfully authenticated caller.
pub async fn require_member(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(state, Role::Member, request, next).await
}

/// Gate admitting admin and root callers.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(state, Role::Admin, request, next).await
}

/// Gate admitting root callers only.
pub async fn require_root(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(state, Role::Root, request, next).await
}

/// Decodes the caller's token, checks it against the required minimum role,
/// and forwards the request enriched with a typed [`RequestContext`].
///
/// Exactly one response is produced per request: either the downstream
/// handler's, or a single unauthorized rejection.
async fn authorize(
    state: AppState,
    required: Role,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())?.to_string();

    let claims = state.codec.decode(&token)?;

    let role = claims
        .role
        .filter(|role| Role::satisfies(required, Some(*role)))
        .ok_or_else(|| AppError::authorization("insufficient privileges"))?;

    let profile_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::authentication("invalid or expired token"))?;

    request
        .extensions_mut()
        .insert(RequestContext::new(profile_id, role, token));

    Ok(next.run(request).await)
}

/// Extracts the bearer token from the `Authorization` header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))
}

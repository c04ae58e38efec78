//! `Identity` extractor — the typed request context placed by the role gate.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use gatehouse_core::error::AppError;
use gatehouse_service::context::RequestContext;

use crate::state::AppState;

/// Extracted authenticated caller context available in handlers.
///
/// Only present on routes behind one of the role gates; requesting it on an
/// ungated route rejects the request.
#[derive(Debug, Clone)]
pub struct Identity(pub RequestContext);

impl Identity {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for Identity {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .map(Identity)
            .ok_or_else(|| AppError::authentication("Missing authentication context"))
    }
}

/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require a
 * session. It extracts and verifies the bearer token from the
 * Authorization header and provides the account ID to handlers.
 */

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::sessions::SessionKeys;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::Role;

const MSG_UNAUTHENTICATED: &str = "Authentication required";

/// Authenticated account data extracted from the session token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub account_id: Uuid,
    pub email: String,
    pub role: Role,
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the token from the Authorization header
/// 2. Verifies the token
/// 3. Extracts the account ID from the claims
/// 4. Attaches an `AuthenticatedUser` to the request extensions
///
/// Returns 401 Unauthorized if the token is missing or invalid
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let user = authenticate(&app_state.sessions, request.headers().get(AUTHORIZATION).and_then(|h| h.to_str().ok()))?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Verify an Authorization header value
///
/// # Returns
/// The authenticated account, or `Unauthorized`
pub fn authenticate(sessions: &SessionKeys, header: Option<&str>) -> Result<AuthenticatedUser, BackendError> {
    let header = header.ok_or_else(|| {
        tracing::warn!("Missing Authorization header");
        BackendError::unauthorized(MSG_UNAUTHENTICATED)
    })?;

    // Format: "Bearer <token>"
    let token = header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        BackendError::unauthorized(MSG_UNAUTHENTICATED)
    })?;

    let claims = sessions.verify(token.trim()).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthorized(MSG_UNAUTHENTICATED)
    })?;

    let account_id = claims.account_id().map_err(|e| {
        tracing::warn!("Invalid account ID in token: {:?}", e);
        BackendError::unauthorized(MSG_UNAUTHENTICATED)
    })?;

    Ok(AuthenticatedUser {
        account_id,
        email: claims.email,
        role: claims.role,
    })
}

/// Axum extractor for the authenticated account
///
/// Reads the `AuthenticatedUser` attached by `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthorized(MSG_UNAUTHENTICATED)
            })?;

        Ok(AuthUser(user))
    }
}

/**
 * Sign-in Handler
 *
 * This module implements the authentication handler for POST /api/auth/signin.
 *
 * # Authentication Process
 *
 * 1. Reject empty email or password
 * 2. Verify the credentials (`CredentialVerifier`)
 * 3. Issue a session token
 * 4. Return token, expiry and the public account fields
 *
 * # Security
 *
 * - Unknown account and wrong password return the same 401 body
 * - The distinction is only logged
 * - Passwords are never logged or returned
 */
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::backend::auth::handlers::types::{AuthSettings, SigninRequest, SigninResponse};
use crate::backend::auth::sessions::SessionKeys;
use crate::backend::auth::verifier::{CredentialVerifier, Verification};
use crate::backend::db::{AccountStore, Connector};
use crate::backend::error::{BackendError, MSG_INVALID_CREDENTIALS};
use crate::backend::server::state::AppState;
use crate::shared::FieldError;

/// Sign-in handler
///
/// # Arguments
///
/// * `State(state)` - Application state (verifier, session keys)
/// * `payload` - Sign-in request containing email and password
///
/// # Returns
///
/// `200 OK` with session token, expiry and account
///
/// # Errors
///
/// * `400 Bad Request` - Empty email or password, or malformed body
/// * `401 Unauthorized` - Unknown account or wrong password (same body)
/// * `503 Service Unavailable` - Storage could not be reached
/// * `408 Request Timeout` - Overall deadline exceeded
/// * `500 Internal Server Error` - Lookup, comparison or token failure
///
/// # Example Request
///
/// ```http
/// POST /api/auth/signin HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "email": "ada@example.com",
///   "password": "securepassword123"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "expiresAt": "2026-11-17T09:30:00Z",
///   "user": { "id": "...", "name": "Ada", "email": "ada@example.com", "role": "user", ... }
/// }
/// ```
pub async fn signin(
    State(state): State<AppState>,
    payload: Result<Json<SigninRequest>, JsonRejection>,
) -> Result<Json<SigninResponse>, BackendError> {
    let Json(request) = payload?;
    let response = process_signin(&state.verifier, &state.sessions, &state.auth, request).await?;
    Ok(Json(response))
}

/// Check credentials and issue a session
pub async fn process_signin<C>(
    verifier: &CredentialVerifier<C>,
    sessions: &SessionKeys,
    settings: &AuthSettings,
    request: SigninRequest,
) -> Result<SigninResponse, BackendError>
where
    C: Connector,
    C::Handle: AccountStore,
{
    let mut missing = Vec::new();
    if request.email.trim().is_empty() {
        missing.push(FieldError::new("email", "Email is required"));
    }
    if request.password.is_empty() {
        missing.push(FieldError::new("password", "Password is required"));
    }
    if !missing.is_empty() {
        tracing::warn!("Sign-in rejected: missing credentials");
        return Err(BackendError::validation(missing));
    }

    tracing::info!("Sign-in request for: {}", request.email);

    let outcome = tokio::time::timeout(
        settings.request_timeout,
        verifier.verify(&request.email, &request.password),
    )
    .await
    .map_err(|_| {
        BackendError::timeout(format!("sign-in exceeded {:?}", settings.request_timeout))
    })??;

    let account = match outcome {
        Verification::Verified(account) => account,
        Verification::Mismatch => {
            tracing::warn!("Invalid password for account: {}", request.email);
            return Err(BackendError::unauthorized(MSG_INVALID_CREDENTIALS));
        }
        Verification::NoSuchAccount => {
            tracing::warn!("No account found for: {}", request.email);
            return Err(BackendError::unauthorized(MSG_INVALID_CREDENTIALS));
        }
    };

    let session = sessions
        .issue(&account)
        .map_err(|e| BackendError::unexpected(format!("failed to create token: {:?}", e)))?;

    tracing::info!("Account signed in: {} ({})", account.email, account.id);

    Ok(SigninResponse {
        token: session.token,
        expires_at: session.expires_at,
        user: account.view(),
    })
}

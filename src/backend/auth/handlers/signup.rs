/**
 * Signup Handler
 *
 * This module implements the account registration handler for
 * POST /api/auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate name, email and password (all problems reported at once)
 * 2. Normalize the email
 * 3. Get the storage handle from the connection cache
 * 4. Check whether an account with this email exists (bounded lookup)
 * 5. Hash the password with bcrypt
 * 6. Insert the account; the storage UNIQUE constraint settles races
 * 7. Return the public account fields
 *
 * Steps 3 to 6 run under the overall request deadline. The insert is the
 * last step, so a request that times out before it has stored nothing.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::accounts::{Account, NewAccount};
use crate::backend::auth::handlers::types::{AuthSettings, SignupRequest, SignupResponse};
use crate::backend::auth::password::hash_password;
use crate::backend::db::{discard_if_unavailable, AccountStore, ConnectionCache, Connector, StoreError};
use crate::backend::error::{BackendError, MSG_DUPLICATE_ACCOUNT};
use crate::backend::server::state::AppState;
use crate::shared::{validate_signup, ValidSignup};

const MSG_CREATED: &str = "User created successfully";

/// Sign up handler
///
/// # Arguments
///
/// * `State(state)` - Application state (connection cache, auth settings)
/// * `payload` - Signup request body; a malformed body is a 400
///
/// # Returns
///
/// `201 Created` with a message and the public account fields
///
/// # Errors
///
/// * `400 Bad Request` - Validation failure (with `errors` list), malformed
///   body, or an account with this email already exists
/// * `503 Service Unavailable` - Storage could not be reached
/// * `408 Request Timeout` - Existence check or overall deadline exceeded
/// * `500 Internal Server Error` - Anything else
///
/// # Example Request
///
/// ```http
/// POST /api/auth/signup HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "name": "Ada",
///   "email": "ada@example.com",
///   "password": "securepassword123"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "message": "User created successfully",
///   "user": {
///     "id": "123e4567-e89b-12d3-a456-426614174000",
///     "name": "Ada",
///     "email": "ada@example.com",
///     "role": "user",
///     "createdAt": "2026-10-18T09:30:00.000Z",
///     "updatedAt": "2026-10-18T09:30:00.000Z"
///   }
/// }
/// ```
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SignupResponse>), BackendError> {
    let Json(request) = payload?;

    let account = process_signup(&state.accounts, &state.auth, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: MSG_CREATED.to_string(),
            user: account.view(),
        }),
    ))
}

/// Validate a signup request and register the account
///
/// Validation runs before the connection cache is touched, so invalid
/// input never opens or uses a storage connection.
pub async fn process_signup<C>(
    cache: &ConnectionCache<C>,
    settings: &AuthSettings,
    request: SignupRequest,
) -> Result<Account, BackendError>
where
    C: Connector,
    C::Handle: AccountStore,
{
    tracing::info!("Signup request for email: {}", request.email);

    let input = validate_signup(&request.name, &request.email, &request.password).map_err(|e| {
        tracing::warn!("Signup rejected: {}", e);
        BackendError::from(e)
    })?;

    match tokio::time::timeout(
        settings.request_timeout,
        register_account(cache, settings, input),
    )
    .await
    {
        Ok(result) => result,
        Err(_) => Err(BackendError::timeout(format!(
            "signup exceeded {:?}",
            settings.request_timeout
        ))),
    }
}

/// Store a validated signup
///
/// # Errors
///
/// * `Conflict` - found by the existence check or rejected by the store's
///   uniqueness constraint
/// * `ServiceUnavailable` - connection could not be established, or was
///   lost during a query (the cached handle is then discarded)
/// * `Timeout` - existence check exceeded the lookup timeout
/// * `Unexpected` - any other lookup, hashing or insert failure
pub async fn register_account<C>(
    cache: &ConnectionCache<C>,
    settings: &AuthSettings,
    input: ValidSignup,
) -> Result<Account, BackendError>
where
    C: Connector,
    C::Handle: AccountStore,
{
    let conn = cache.get().await?;

    let existing = match tokio::time::timeout(settings.lookup_timeout, conn.find_by_email(&input.email)).await {
        Ok(Ok(existing)) => existing,
        Ok(Err(e)) => {
            return Err(match discard_if_unavailable(cache, &conn, e) {
                StoreError::Unavailable(detail) => BackendError::unavailable(detail),
                other => {
                    tracing::error!("Existence check failed: {}", other);
                    BackendError::unexpected(format!("existence check failed: {}", other))
                }
            });
        }
        Err(_) => {
            tracing::warn!("Existence check for {} exceeded {:?}", input.email, settings.lookup_timeout);
            return Err(BackendError::timeout("existence check timed out"));
        }
    };

    if existing.is_some() {
        tracing::warn!("Account already exists: {}", input.email);
        return Err(BackendError::conflict(MSG_DUPLICATE_ACCOUNT));
    }

    let ValidSignup {
        name,
        email,
        password,
    } = input;

    let password_hash = hash_password(password, settings.bcrypt_cost)
        .await
        .map_err(|e| BackendError::unexpected(format!("failed to hash password: {}", e)))?;

    let account = conn
        .insert(NewAccount::user(email, name, password_hash))
        .await
        .map_err(|e| {
            let e = discard_if_unavailable(cache, &conn, e);
            if e == StoreError::Duplicate {
                tracing::warn!("Account created concurrently, insert rejected");
            }
            BackendError::from(e)
        })?;

    tracing::info!("Account created: {} ({})", account.email, account.id);
    Ok(account)
}

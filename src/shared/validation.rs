/**
 * Signup Input Validation
 *
 * Shape checks for signup input. All checks run before any storage access,
 * and every failing field is reported rather than only the first.
 *
 * # Rules
 *
 * - `name`: at least 2 characters after trimming
 * - `email`: a syntactically valid address (see `is_valid_email`)
 * - `password`: at least 8 characters, at most 72 bytes (bcrypt's input
 *   limit)
 */
use crate::shared::error::{FieldError, SharedError};

/// Minimum display name length, in characters, after trimming
pub const MIN_NAME_CHARS: usize = 2;

/// Minimum password length, in characters
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Maximum password length, in bytes; bcrypt ignores anything past this
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Longest address accepted (RFC 5321 path limit)
const MAX_EMAIL_LEN: usize = 254;

/// Signup input that passed validation
///
/// `name` is trimmed and `email` is normalized. The password is kept as
/// given; it only ever leaves this struct to be hashed.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidSignup {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for ValidSignup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidSignup")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Canonical form of an account identifier
///
/// Identifiers are compared case-insensitively, so every lookup and insert
/// goes through this function.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate email address syntax
///
/// Accepts `local@domain` where:
/// - the local part is non-empty, has no whitespace, and does not start or
///   end with a dot
/// - the domain has at least two dot-separated labels, each non-empty,
///   made of ASCII alphanumerics and hyphens, not starting or ending with
///   a hyphen
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.len() > MAX_EMAIL_LEN {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty()
        || local.starts_with('.')
        || local.ends_with('.')
        || local.contains("..")
        || local.chars().any(|c| c.is_whitespace() || c == '@' || c.is_control())
    {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

/// Validate signup input
///
/// # Arguments
/// * `name` - Display name as submitted
/// * `email` - Email as submitted
/// * `password` - Password as submitted
///
/// # Returns
/// The trimmed / normalized input, or a `ValidationError` listing every
/// field problem in `name`, `email`, `password` order.
pub fn validate_signup(name: &str, email: &str, password: &str) -> Result<ValidSignup, SharedError> {
    let mut errors = Vec::new();

    let name = name.trim();
    if name.chars().count() < MIN_NAME_CHARS {
        errors.push(FieldError::new("name", "Name must be at least 2 characters"));
    }

    let email = email.trim();
    if !is_valid_email(email) {
        errors.push(FieldError::new("email", "Invalid email address"));
    }

    if password.chars().count() < MIN_PASSWORD_CHARS {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 8 characters",
        ));
    } else if password.len() > MAX_PASSWORD_BYTES {
        errors.push(FieldError::new(
            "password",
            "Password must be at most 72 bytes",
        ));
    }

    if !errors.is_empty() {
        return Err(SharedError::validation(errors));
    }

    Ok(ValidSignup {
        name: name.to_string(),
        email: normalize_email(email),
        password: password.to_string(),
    })
}

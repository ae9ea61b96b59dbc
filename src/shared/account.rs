/**
 * Account Types
 *
 * This module defines the account role and the public view of an account.
 * The public view is what every endpoint returns; it never carries the
 * credential hash.
 */
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Role held by an account
///
/// Every account has exactly one role. New signups are always `User`;
/// `Executor` accounts act on behalf of a deceased account holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Ordinary account holder
    #[default]
    User,
    /// Executor of an account holder's estate
    Executor,
}

impl Role {
    /// Storage and wire representation of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Executor => "executor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "executor" => Ok(Role::Executor),
            other => Err(SharedError::invalid_role(other)),
        }
    }
}

/// Public account fields
///
/// Returned by signup, sign-in and the session lookup endpoint.
/// Does not include the credential hash or anything derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    /// Account ID (UUID)
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Normalized (lowercase) email address
    pub email: String,
    /// Account role
    pub role: Role,
    /// Set by the storage layer on insert
    pub created_at: DateTime<Utc>,
    /// Set by the storage layer on insert
    pub updated_at: DateTime<Utc>,
}

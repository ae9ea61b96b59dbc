/**
 * Account Model and Database Operations
 *
 * This module defines the stored account record and the sqlx queries on it.
 * Queries take the normalized email; normalization happens in
 * `shared::validation::normalize_email` before any lookup or insert.
 */

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::db::StoreError;
use crate::shared::{AccountView, Role};

/// Account as stored
///
/// `password_hash` never leaves the backend; use `Account::view` for
/// anything returned to a client.
#[derive(Clone)]
pub struct Account {
    /// Unique account ID (UUID)
    pub id: Uuid,
    /// Normalized email address (unique, case-insensitive)
    pub email: String,
    /// Display name
    pub name: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// Account role
    pub role: Role,
    /// Created at timestamp (set by the store)
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp (set by the store)
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password_hash", &"[REDACTED]")
            .field("role", &self.role)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

impl Account {
    /// Public fields of this account
    pub fn view(&self) -> AccountView {
        AccountView {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Values supplied by the application when creating an account
#[derive(Clone)]
pub struct NewAccount {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: Role,
}

impl NewAccount {
    /// A new `User` account with a fresh ID
    pub fn user(email: String, name: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            password_hash,
            role: Role::User,
        }
    }
}

/// Row shape as read from SQLite (role still a string)
#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    name: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = StoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse::<Role>()
            .map_err(|e| StoreError::Corrupt(format!("account {}: {}", row.id, e)))?;
        Ok(Account {
            id: row.id,
            email: row.email,
            name: row.name,
            password_hash: row.password_hash,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Create a new account
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `account` - Account values (email already normalized, password already hashed)
///
/// # Returns
/// Created account, or `StoreError::Duplicate` if the email is taken
pub async fn create_account(pool: &SqlitePool, account: NewAccount) -> Result<Account, StoreError> {
    let row = sqlx::query_as::<_, AccountRow>(
        r#"
        INSERT INTO accounts (id, email, name, password_hash, role)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, email, name, password_hash, role, created_at, updated_at
        "#,
    )
    .bind(account.id)
    .bind(&account.email)
    .bind(&account.name)
    .bind(&account.password_hash)
    .bind(account.role.as_str())
    .fetch_one(pool)
    .await?;

    Account::try_from(row)
}

/// Get account by email
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `email` - Normalized email
///
/// # Returns
/// Account or None if not found
pub async fn get_account_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<Account>, StoreError> {
    let row = sqlx::query_as::<_, AccountRow>(
        r#"
        SELECT id, email, name, password_hash, role, created_at, updated_at
        FROM accounts
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    row.map(Account::try_from).transpose()
}

/// Get account by ID
pub async fn get_account_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Account>, StoreError> {
    let row = sqlx::query_as::<_, AccountRow>(
        r#"
        SELECT id, email, name, password_hash, role, created_at, updated_at
        FROM accounts
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(Account::try_from).transpose()
}

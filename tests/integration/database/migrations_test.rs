//! Database migration tests
//!
//! Tests to ensure migrations run correctly and the schema enforces what
//! the account store relies on.

#[cfg(feature = "ssr")]
mod tests {
    use crate::common::database::{run_migrations, TestDatabase};
    use uuid::Uuid;

    async fn insert(pool: &sqlx::SqlitePool, email: &str) -> Result<sqlx::sqlite::SqliteQueryResult, sqlx::Error> {
        sqlx::query("INSERT INTO accounts (id, email, name, password_hash) VALUES (?, ?, ?, ?)")
            .bind(Uuid::new_v4())
            .bind(email)
            .bind("Ada")
            .bind("$2b$04$hash")
            .execute(pool)
            .await
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = TestDatabase::new();
        let pool = db.pool().await;
        let result = run_migrations(&pool).await;
        assert!(result.is_ok(), "Migrations should run again without error");
    }

    #[tokio::test]
    async fn test_accounts_table_exists() {
        let db = TestDatabase::new();
        let pool = db.pool().await;

        let result = sqlx::query("SELECT 1 FROM accounts LIMIT 1").execute(&pool).await;
        assert!(result.is_ok(), "Accounts table should exist");
    }

    #[tokio::test]
    async fn test_email_unique_ignoring_case() {
        let db = TestDatabase::new();
        let pool = db.pool().await;

        insert(&pool, "ada@example.com").await.unwrap();
        let err = insert(&pool, "ADA@example.com").await.unwrap_err();
        let is_unique = err
            .as_database_error()
            .map(|e| e.is_unique_violation())
            .unwrap_or(false);
        assert!(is_unique, "expected unique violation, got {:?}", err);
    }

    #[tokio::test]
    async fn test_storage_sets_defaults() {
        let db = TestDatabase::new();
        let pool = db.pool().await;
        insert(&pool, "ada@example.com").await.unwrap();

        let (role, created_at, updated_at): (String, String, String) =
            sqlx::query_as("SELECT role, created_at, updated_at FROM accounts")
                .fetch_one(&pool)
                .await
                .unwrap();

        assert_eq!(role, "user");
        assert!(chrono::DateTime::parse_from_rfc3339(&created_at).is_ok());
        assert_eq!(created_at, updated_at);
    }
}

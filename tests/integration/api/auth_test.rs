//! Authentication API integration tests
//!
//! Tests for signup, sign-in and the current-account endpoint.

#[cfg(feature = "ssr")]
mod tests {
    use axum::body::Bytes;
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;

    use crate::common::auth_helpers::{auth_header, create_test_server, signin_token, signup_test_user};
    use crate::common::database::{config_for_url, TestDatabase};
    use crate::{assert_contains, assert_error_body};

    #[tokio::test]
    async fn test_signup_success() {
        let db = TestDatabase::new();
        let server = create_test_server(db.config()).await;

        let response = server
            .post("/api/auth/signup")
            .json(&serde_json::json!({
                "name": "Ada",
                "email": "Ada@Example.com",
                "password": "password123"
            }))
            .await;

        assert_eq!(response.status_code(), StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "User created successfully");

        let user = &body["user"];
        assert_eq!(user["name"], "Ada");
        assert_eq!(user["email"], "ada@example.com");
        assert_eq!(user["role"], "user");
        assert!(user["id"].is_string());
        assert!(user["createdAt"].is_string());
        assert!(user["updatedAt"].is_string());
        assert!(user.get("password").is_none());
        assert!(user.get("passwordHash").is_none());
        assert!(!body.to_string().contains("password123"));
    }

    #[tokio::test]
    async fn test_signup_stores_hash_not_plaintext() {
        let db = TestDatabase::new();
        let server = create_test_server(db.config()).await;
        signup_test_user(&server, "Ada", "ada@example.com", "password123").await;

        let pool = db.pool().await;
        let stored: String = sqlx::query_scalar("SELECT password_hash FROM accounts WHERE email = ?")
            .bind("ada@example.com")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert!(stored != "password123");
        assert!(bcrypt::verify("password123", &stored).unwrap());
    }

    #[tokio::test]
    async fn test_signup_validation_lists_every_field() {
        let db = TestDatabase::new();
        let server = create_test_server(db.config()).await;

        let response = server
            .post("/api/auth/signup")
            .json(&serde_json::json!({
                "name": "A",
                "email": "not-an-email",
                "password": "short"
            }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_error_body!(body, 400, "Invalid input");

        let fields: Vec<&str> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["name", "email", "password"]);
    }

    #[tokio::test]
    async fn test_signup_missing_field_is_a_validation_error() {
        let db = TestDatabase::new();
        let server = create_test_server(db.config()).await;

        let response = server
            .post("/api/auth/signup")
            .json(&serde_json::json!({ "name": "Ada", "email": "ada@example.com" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["errors"][0]["field"], "password");
    }

    #[tokio::test]
    async fn test_signup_short_password_opens_no_connection() {
        let db = TestDatabase::new();
        let server = create_test_server(db.config()).await;

        let response = server
            .post("/api/auth/signup")
            .json(&serde_json::json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "1234567"
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        let health: serde_json::Value = server.get("/health").await.json();
        assert_eq!(health["database"], "idle");
        assert!(!db.path().exists());
    }

    #[tokio::test]
    async fn test_signup_malformed_body() {
        let db = TestDatabase::new();
        let server = create_test_server(db.config()).await;

        let response = server
            .post("/api/auth/signup")
            .bytes(Bytes::from_static(b"{\"name\": \"Ada\", "))
            .content_type("application/json")
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_error_body!(body, 400, "Invalid request body");
    }

    #[tokio::test]
    async fn test_signup_duplicate_email_keeps_first_account() {
        let db = TestDatabase::new();
        let server = create_test_server(db.config()).await;

        let first = signup_test_user(&server, "Al", "A@B.com", "password123").await;

        let response = server
            .post("/api/auth/signup")
            .json(&serde_json::json!({
                "name": "Al2",
                "email": "a@b.com",
                "password": "password456"
            }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_error_body!(body, 400, "User with this email already exists");

        // The first account is untouched: its password still works
        let token = signin_token(&server, "a@b.com", "password123").await;
        let (name, value) = auth_header(&token);
        let me: serde_json::Value = server.get("/api/auth/me").add_header(name, value).await.json();
        assert_eq!(me["id"], first.id.as_str());
        assert_eq!(me["name"], "Al");
    }

    #[tokio::test]
    async fn test_signup_unreachable_storage() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("missing").join("ledger.db").display());
        let server = create_test_server(config_for_url(url)).await;

        let response = server
            .post("/api/auth/signup")
            .json(&serde_json::json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "password123"
            }))
            .await;

        assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        let body: serde_json::Value = response.json();
        assert_error_body!(body, 503, "Database connection failed. Please try again later.");
        assert!(!body.to_string().contains("missing"));
    }

    #[tokio::test]
    async fn test_signin_success() {
        let db = TestDatabase::new();
        let server = create_test_server(db.config()).await;
        let user = signup_test_user(&server, "Ada", "ada@example.com", "password123").await;

        let response = server
            .post("/api/auth/signin")
            .json(&serde_json::json!({
                "email": "ADA@example.com",
                "password": "password123"
            }))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert!(body["token"].as_str().map(|t| !t.is_empty()).unwrap_or(false));
        assert!(body["expiresAt"].is_string());
        assert_eq!(body["user"]["id"], user.id.as_str());
        assert!(body["user"].get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn test_signin_failures_are_indistinguishable() {
        let db = TestDatabase::new();
        let server = create_test_server(db.config()).await;
        signup_test_user(&server, "Ada", "ada@example.com", "password123").await;

        let wrong_password = server
            .post("/api/auth/signin")
            .json(&serde_json::json!({ "email": "ada@example.com", "password": "password124" }))
            .await;
        let unknown_account = server
            .post("/api/auth/signin")
            .json(&serde_json::json!({ "email": "bob@example.com", "password": "password123" }))
            .await;

        assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_account.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_password.text(), unknown_account.text());
        assert_contains!(wrong_password.text(), "Invalid email or password");
    }

    #[tokio::test]
    async fn test_signin_empty_fields() {
        let db = TestDatabase::new();
        let server = create_test_server(db.config()).await;

        let response = server
            .post("/api/auth/signin")
            .json(&serde_json::json!({ "email": "", "password": "" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_me_requires_token() {
        let db = TestDatabase::new();
        let server = create_test_server(db.config()).await;

        let response = server.get("/api/auth/me").await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

        let (name, value) = auth_header("invalid_token");
        let response = server.get("/api/auth/me").add_header(name, value).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_me_returns_account() {
        let db = TestDatabase::new();
        let server = create_test_server(db.config()).await;
        let user = signup_test_user(&server, "Ada", "ada@example.com", "password123").await;
        let token = signin_token(&server, &user.email, &user.password).await;

        let (name, value) = auth_header(&token);
        let response = server.get("/api/auth/me").add_header(name, value).await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["email"], "ada@example.com");
        assert_eq!(body["role"], "user");
    }

    #[tokio::test]
    async fn test_me_for_deleted_account() {
        let db = TestDatabase::new();
        let server = create_test_server(db.config()).await;
        let user = signup_test_user(&server, "Ada", "ada@example.com", "password123").await;
        let token = signin_token(&server, &user.email, &user.password).await;

        let pool = db.pool().await;
        sqlx::query("DELETE FROM accounts").execute(&pool).await.unwrap();

        let (name, value) = auth_header(&token);
        let response = server.get("/api/auth/me").add_header(name, value).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }
}

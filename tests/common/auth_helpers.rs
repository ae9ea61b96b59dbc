//! Authentication test helpers
//!
//! Provides a test server over a temporary database, and helpers for
//! signing up, signing in and building Authorization headers.

#[cfg(feature = "ssr")]
use axum::http::{header::AUTHORIZATION, HeaderName, HeaderValue, StatusCode};
#[cfg(feature = "ssr")]
use axum_test::TestServer;
#[cfg(feature = "ssr")]
use legacy_ledger::backend::server::create_app;
#[cfg(feature = "ssr")]
use legacy_ledger::shared::AppConfig;

/// Test user credentials
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Create a test server for the given configuration
#[cfg(feature = "ssr")]
pub async fn create_test_server(config: AppConfig) -> TestServer {
    let app = create_app(config).await.expect("Failed to create app");
    TestServer::new(app).expect("Failed to create test server")
}

/// Sign up through the API and return the created user
#[cfg(feature = "ssr")]
pub async fn signup_test_user(server: &TestServer, name: &str, email: &str, password: &str) -> TestUser {
    let response = server
        .post("/api/auth/signup")
        .json(&serde_json::json!({
            "name": name,
            "email": email,
            "password": password,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "signup failed: {}", response.text());

    let body: serde_json::Value = response.json();
    TestUser {
        id: body["user"]["id"].as_str().unwrap_or_default().to_string(),
        name: body["user"]["name"].as_str().unwrap_or_default().to_string(),
        email: body["user"]["email"].as_str().unwrap_or_default().to_string(),
        password: password.to_string(),
    }
}

/// Sign in through the API and return the session token
#[cfg(feature = "ssr")]
pub async fn signin_token(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/api/auth/signin")
        .json(&serde_json::json!({ "email": email, "password": password }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK, "signin failed: {}", response.text());

    let body: serde_json::Value = response.json();
    body["token"].as_str().unwrap_or_default().to_string()
}

/// Authorization header for a session token
#[cfg(feature = "ssr")]
pub fn auth_header(token: &str) -> (HeaderName, HeaderValue) {
    let value = HeaderValue::from_str(&format!("Bearer {}", token)).expect("Invalid header value");
    (AUTHORIZATION, value)
}

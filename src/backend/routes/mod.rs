//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, trace layer, fallback
//! ├── api_routes.rs   - Authentication endpoints
//! └── health.rs       - Health probe
//! ```
//!
//! # Routes
//!
//! - `GET /health` - Liveness and storage status
//! - `POST /api/auth/signup` - Account registration
//! - `POST /api/auth/signin` - Sign-in
//! - `GET /api/auth/me` - Current account

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

/// Health probe
pub mod health;

// Re-export commonly used functions
pub use router::create_router;

//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Temporary SQLite databases
//! - Test server and authentication helpers
//! - Custom assertion macros

pub mod assertions;
pub mod auth_helpers;
pub mod database;

// Re-export commonly used utilities
pub use auth_helpers::*;
pub use database::*;

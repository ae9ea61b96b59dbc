//! Test suite for Legacy Ledger
//!
//! This module organizes all tests

pub mod common;

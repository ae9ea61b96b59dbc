//! Custom assertion macros and utilities
//!
//! Provides assertion macros with more descriptive failure output.

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}

/// Assert that a JSON error body has the given status and message
#[macro_export]
macro_rules! assert_error_body {
    ($body:expr, $status:expr, $message:expr) => {
        assert_eq!($body["status"], $status, "unexpected status in {}", $body);
        assert_eq!($body["error"], $message, "unexpected message in {}", $body);
    };
}

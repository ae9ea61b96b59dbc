//! Property-based tests for signup validation
//!
//! Uses proptest to generate inputs and verify validation properties

use legacy_ledger::shared::{normalize_email, validate_signup};
use proptest::prelude::*;

fn email_strategy() -> impl Strategy<Value = String> {
    ("[a-zA-Z0-9][a-zA-Z0-9_+]{0,15}", "[a-zA-Z0-9]{1,12}", "[a-zA-Z]{2,6}")
        .prop_map(|(local, host, tld)| format!("{}@{}.{}", local, host, tld))
}

proptest! {
    #[test]
    fn test_normalize_email_is_idempotent(email in "[ a-zA-Z0-9@._+-]{0,40}") {
        let once = normalize_email(&email);
        prop_assert_eq!(normalize_email(&once), once.clone());
        prop_assert_eq!(once.to_lowercase(), once);
    }

    #[test]
    fn test_short_password_always_rejected(password in "[a-zA-Z0-9!@#]{0,7}") {
        let err = validate_signup("Alice", "alice@example.com", &password).unwrap_err();
        let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
        prop_assert_eq!(fields, vec!["password"]);
    }

    #[test]
    fn test_well_formed_signup_accepted(
        name in "[a-zA-Z]{2,20}",
        email in email_strategy(),
        password in "[a-zA-Z0-9!@#]{8,40}",
    ) {
        let valid = validate_signup(&name, &email, &password).unwrap();
        prop_assert_eq!(valid.email, email.to_lowercase());
        prop_assert_eq!(valid.password, password);
    }

    #[test]
    fn test_name_is_trimmed(
        name in "[a-zA-Z]{2,20}",
        left in " {0,4}",
        right in " {0,4}",
    ) {
        let padded = format!("{}{}{}", left, name, right);
        let valid = validate_signup(&padded, "a@example.com", "password123").unwrap();
        prop_assert_eq!(valid.name, name);
    }
}

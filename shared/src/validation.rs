//! Validation utilities for the Axis accounting platform
//!
//! Includes Iraq-specific phone validation for the customer fields.

use rust_decimal::Decimal;

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate a required free-text field is non-empty after trimming
pub fn require_non_empty(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        Err("Field must not be empty")
    } else {
        Ok(())
    }
}

/// Validate a price or amount is not negative
pub fn validate_non_negative(amount: Decimal) -> Result<(), &'static str> {
    if amount < Decimal::ZERO {
        Err("Amount cannot be negative")
    } else {
        Ok(())
    }
}

/// Validate an expense amount is strictly positive
pub fn validate_positive(amount: Decimal) -> Result<(), &'static str> {
    if amount <= Decimal::ZERO {
        Err("Amount must be positive")
    } else {
        Ok(())
    }
}

/// Trim an optional free-text field, mapping blank input to `None`.
///
/// Used for fields that are stored as entered but must not persist
/// whitespace padding or empty strings (contact email/phone, reference
/// number overrides).
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Duplicate-import guard: case-sensitive exact match against existing
/// material names. A weak heuristic, not a strong dedup key.
pub fn is_duplicate_name(existing: &[String], candidate: &str) -> bool {
    existing.iter().any(|name| name == candidate)
}

// ============================================================================
// Iraq-Specific Validations
// ============================================================================

/// Validate an Iraqi phone number format
/// Accepts: 07712345678, 0771-234-5678, +9647712345678
pub fn validate_iraqi_phone(phone: &str) -> Result<(), &'static str> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    // Iraqi mobile: 11 digits starting with 07 (e.g., 07712345678)
    if digits.len() == 11 && digits.starts_with("07") {
        return Ok(());
    }
    // International format with country code: 964 then 10 digits without 0
    if digits.len() == 13 && digits.starts_with("9647") {
        return Ok(());
    }
    // Landline: 10 digits starting with 0 (area code + number)
    if digits.len() == 10 && digits.starts_with('0') {
        return Ok(());
    }

    Err("Invalid Iraqi phone number format")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_validate_email_valid() {
        assert!(validate_email("customer@example.com").is_ok());
        assert!(validate_email("user.name@domain.iq").is_ok());
    }

    #[test]
    fn test_validate_email_invalid() {
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@domain").is_err());
        assert!(validate_email("@.").is_err());
    }

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("Acme").is_ok());
        assert!(require_non_empty("").is_err());
        assert!(require_non_empty("   ").is_err());
    }

    #[test]
    fn test_amount_validations() {
        assert!(validate_non_negative(Decimal::ZERO).is_ok());
        assert!(validate_non_negative(dec("10.5")).is_ok());
        assert!(validate_non_negative(dec("-0.01")).is_err());

        assert!(validate_positive(dec("0.01")).is_ok());
        assert!(validate_positive(Decimal::ZERO).is_err());
        assert!(validate_positive(dec("-5")).is_err());
    }

    #[test]
    fn test_duplicate_name_is_case_sensitive() {
        let existing = vec!["Aluminum Sheet".to_string(), "Hinge".to_string()];
        assert!(is_duplicate_name(&existing, "Hinge"));
        assert!(!is_duplicate_name(&existing, "hinge"));
        assert!(!is_duplicate_name(&existing, "Rivet"));
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(
            normalize_optional(Some(" customer@example.com ")).as_deref(),
            Some("customer@example.com")
        );
        assert_eq!(normalize_optional(Some("   ")), None);
        assert_eq!(normalize_optional(Some("")), None);
        assert_eq!(normalize_optional(None), None);
    }

    #[test]
    fn test_validate_iraqi_phone_valid() {
        // Standard Iraqi mobile
        assert!(validate_iraqi_phone("07712345678").is_ok());
        // With dashes
        assert!(validate_iraqi_phone("0771-234-5678").is_ok());
        // International format
        assert!(validate_iraqi_phone("+9647712345678").is_ok());
        assert!(validate_iraqi_phone("9647712345678").is_ok());
        // Landline
        assert!(validate_iraqi_phone("0661234567").is_ok());
    }

    #[test]
    fn test_validate_iraqi_phone_invalid() {
        assert!(validate_iraqi_phone("12345").is_err());
        assert!(validate_iraqi_phone("1234567890123456").is_err());
        assert!(validate_iraqi_phone("abcdefghijk").is_err());
    }
}

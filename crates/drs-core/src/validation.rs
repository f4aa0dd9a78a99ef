//! # Validation Module
//!
//! Local input validation for Donation Receipt Studio.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE (client, before any network call)                │
//! │  └── Blank-input check: blank submissions never reach the wire         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Parsing service (remote)                                     │
//! │  └── Semantic extraction: "Donor name not found", etc.                 │
//! │                                                                         │
//! │  Defense in depth: each layer catches a different class of errors      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};

/// Validates email text before it is submitted for parsing.
///
/// ## Rules
/// - Must not be empty or whitespace-only
///
/// The text itself is free-form; all semantic checks belong to the parsing
/// service.
///
/// ## Example
/// ```rust
/// use drs_core::validation::validate_email_text;
///
/// assert!(validate_email_text("Dear Donor, ...").is_ok());
/// assert!(validate_email_text("").is_err());
/// assert!(validate_email_text("   \n\t ").is_err());
/// ```
pub fn validate_email_text(text: &str) -> ValidationResult<()> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyEmailText);
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_text() {
        assert!(validate_email_text("Dear John, thank you for your donation").is_ok());

        assert!(validate_email_text("").is_err());
        assert!(validate_email_text("   ").is_err());
        assert!(validate_email_text("\n\t\r\n").is_err());
    }

    #[test]
    fn test_blank_rejection_message() {
        let err = validate_email_text("  ").unwrap_err();
        assert_eq!(err.to_string(), "Please paste the email content first.");
    }
}

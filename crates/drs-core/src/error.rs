//! # Error Types
//!
//! Domain-specific error types for drs-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  drs-core errors (this file)                                           │
//! │  ├── ValidationError  - Local input checks (never reach the network)   │
//! │  └── StateError       - Rejected state machine transitions             │
//! │                                                                         │
//! │  drs-gateway errors (separate crate)                                   │
//! │  └── GatewayError     - Parse/receipt service failures                 │
//! │                                                                         │
//! │  drs-app errors (orchestration layer)                                  │
//! │  └── AppError         - What the view layer sees (serialized)          │
//! │                                                                         │
//! │  Flow: ValidationError / StateError / GatewayError → AppError → View   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Each error variant maps to a user-facing message
//! 3. Errors are enum variants, never bare Strings

use thiserror::Error;

use crate::preview::PreviewPhase;

// =============================================================================
// Validation Error
// =============================================================================

/// Local input validation errors.
///
/// These are detected before any network call is issued and never
/// correspond to a server response.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The user submitted a blank (empty or whitespace-only) email text.
    ///
    /// The message matches what the view layer shows next to the input box.
    #[error("Please paste the email content first.")]
    EmptyEmailText,

    /// A donation record carried a negative amount.
    #[error("Donation amount must be non-negative, got {amount}")]
    NegativeAmount { amount: f64 },

    /// A donation record carried a NaN or infinite amount.
    #[error("Donation amount is not a finite number")]
    NonFiniteAmount,
}

// =============================================================================
// State Error
// =============================================================================

/// Rejected state machine transitions.
///
/// Illegal transitions (e.g. marking a preview `Ready` that was never
/// requested) are representable as errors instead of silent UI glitches.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StateError {
    /// The preview state machine was asked to perform a transition its
    /// table does not allow.
    #[error("Illegal preview transition: {from} -> {to}")]
    IllegalPreviewTransition { from: PreviewPhase, to: PreviewPhase },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::EmptyEmailText.to_string(),
            "Please paste the email content first."
        );

        let err = ValidationError::NegativeAmount { amount: -5.0 };
        assert_eq!(
            err.to_string(),
            "Donation amount must be non-negative, got -5"
        );
    }

    #[test]
    fn test_state_error_message() {
        let err = StateError::IllegalPreviewTransition {
            from: PreviewPhase::Unrequested,
            to: PreviewPhase::Ready,
        };
        assert_eq!(
            err.to_string(),
            "Illegal preview transition: unrequested -> ready"
        );
    }
}

//! # App Error Type
//!
//! Unified error type for session intents.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Error Flow in Donation Receipt Studio                      │
//! │                                                                         │
//! │  View Layer                   Orchestration                             │
//! │  ──────────                   ─────────────                             │
//! │                                                                         │
//! │  submit / download / …                                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Session Intent                                                  │  │
//! │  │  Result<T, AppError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Blank input? ──── ValidationError::EmptyEmailText ──┐          │  │
//! │  │         │                                            │          │  │
//! │  │         ▼                                            ▼          │  │
//! │  │  Service failure? ── GatewayError::ParseRejected ── AppError ──►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Every failure is also captured into the operation's OperationStatus   │
//! │  and rendered until a later success or an explicit reset clears it.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use drs_core::{OperationKind, StateError, ValidationError};
use drs_gateway::GatewayError;

use crate::save::SaveError;

/// Error surfaced from session intents.
///
/// ## Serialization
/// This is what the view layer receives when an intent fails:
/// ```json
/// {
///   "code": "PARSE_ERROR",
///   "message": "Donor name not found"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for session intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Blank input submitted for parsing (detected locally)
    ValidationError,

    /// The parsing request failed (rejection or transport)
    ParseError,

    /// PDF generation, preview, or save failed
    ReceiptError,

    /// An operation of the same kind is already in flight
    Busy,

    /// The intent is not available in the current view state
    InvalidState,

    /// Unexpected internal failure
    Internal,
}

impl AppError {
    /// Creates a new app error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a busy error for an operation kind whose status is InFlight.
    pub fn busy(kind: OperationKind) -> Self {
        AppError::new(
            ErrorCode::Busy,
            format!("A {} operation is already in progress", kind),
        )
    }

    /// Creates an invalid-state error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::InvalidState, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts local validation errors to app errors.
impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::new(ErrorCode::ValidationError, err.to_string())
    }
}

/// Converts gateway errors to app errors.
impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        let code = match err {
            GatewayError::ParseRejected { .. } | GatewayError::ParseFailed => ErrorCode::ParseError,
            GatewayError::ReceiptFailed | GatewayError::PreviewFailed => ErrorCode::ReceiptError,
            GatewayError::InvalidConfig(_) => ErrorCode::Internal,
        };
        AppError::new(code, err.to_string())
    }
}

/// Converts rejected state transitions to app errors.
impl From<StateError> for AppError {
    fn from(err: StateError) -> Self {
        AppError::invalid_state(err.to_string())
    }
}

/// Converts save failures to app errors.
impl From<SaveError> for AppError {
    fn from(err: SaveError) -> Self {
        AppError::new(ErrorCode::ReceiptError, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

// =============================================================================
// Unit Tests
// =============================================================================

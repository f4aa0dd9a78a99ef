//! # Gateway Error Types
//!
//! Failure taxonomy for the HTTP boundary.
//!
//! ## Propagation Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Error Surfacing Rules                             │
//! │                                                                         │
//! │  /api/parse      non-2xx with {"detail": "..."}  → detail VERBATIM     │
//! │  /api/parse      non-2xx without detail, or      → generic parse       │
//! │                  transport failure                  message             │
//! │  /api/download-* any failure                     → generic receipt     │
//! │                                                     message             │
//! │  /api/preview-*  any failure                     → generic preview     │
//! │                                                     message (retryable) │
//! │                                                                         │
//! │  The underlying transport cause is logged, never shown to the user.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Errors raised by the request gateway.
///
/// Each variant's `Display` is the exact user-facing message; the view layer
/// renders these strings directly.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    /// The parsing service rejected the email with a detail message
    /// (e.g. "Donor name not found"). Surfaced verbatim.
    #[error("{detail}")]
    ParseRejected { detail: String },

    /// Parsing failed without a server-supplied detail (malformed response,
    /// transport failure, non-JSON error body).
    #[error("Failed to parse email. Please check the format.")]
    ParseFailed,

    /// Receipt generation or download failed.
    #[error("Could not generate PDF.")]
    ReceiptFailed,

    /// Preview generation failed; the user may retry manually.
    #[error("Failed to generate PDF preview. Please try again.")]
    PreviewFailed,

    /// The service configuration is unusable (bad base URL, client build
    /// failure). Raised at startup, not per request.
    #[error("Invalid gateway configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience type alias for Results with GatewayError.
pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_detail_is_verbatim() {
        let err = GatewayError::ParseRejected {
            detail: "Donor name not found".to_string(),
        };
        assert_eq!(err.to_string(), "Donor name not found");
    }

    #[test]
    fn test_generic_messages() {
        assert_eq!(
            GatewayError::ParseFailed.to_string(),
            "Failed to parse email. Please check the format."
        );
        assert_eq!(
            GatewayError::ReceiptFailed.to_string(),
            "Could not generate PDF."
        );
        assert_eq!(
            GatewayError::PreviewFailed.to_string(),
            "Failed to generate PDF preview. Please try again."
        );
    }
}

//! # Domain Types
//!
//! Core types shared across the workspace: the parsed donation record, the
//! per-operation async status marker, and the top-level view state.
//!
//! ## Type Relationships
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       drs-core Types                                    │
//! │                                                                         │
//! │  ViewState                      OperationStatus (one per kind)          │
//! │  ─────────                      ──────────────────────────────          │
//! │  Initial ──parse ok──► Parsed   Idle ──start──► InFlight                │
//! │     ▲                    │           InFlight ──► Succeeded | Failed    │
//! │     └──────reset─────────┘                                              │
//! │                                                                         │
//! │  ParsedDonation                                                         │
//! │  ──────────────                                                         │
//! │  Immutable record produced by a successful parse. Replaced wholesale    │
//! │  on re-parse, discarded on reset. Serializes to the camelCase JSON     │
//! │  the receipt service expects.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};

// =============================================================================
// Parsed Donation
// =============================================================================

/// Structured donation fields extracted from email text by the remote
/// parsing service.
///
/// ## Wire Format
/// Field names follow the service's camelCase JSON:
/// ```json
/// {
///   "receiptNumber": "RCPT-20241215-4821",
///   "date": "2024-12-15",
///   "charityName": "Hope Foundation",
///   "charityNumber": "CH123456",
///   "donorName": "John Doe",
///   "transactionId": "TXN-12345",
///   "paymentMethod": "Credit Card",
///   "amount": 100.0
/// }
/// ```
///
/// ## Ownership
/// Owned by the session once created. Never mutated in place: a re-parse
/// replaces the whole record, a reset discards it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDonation {
    /// Receipt number assigned by the parsing service (e.g. RCPT-20241215-4821)
    pub receipt_number: String,

    /// Date of the donation
    pub date: NaiveDate,

    /// Name of the charity organization
    pub charity_name: String,

    /// Charity registration number
    pub charity_number: String,

    /// Name of the donor as extracted from the email greeting
    pub donor_name: String,

    /// Unique transaction identifier from the payment provider
    pub transaction_id: String,

    /// Method of payment (e.g. Credit Card, PayPal)
    pub payment_method: String,

    /// Donation amount in dollars (non-negative)
    pub amount: f64,
}

impl ParsedDonation {
    /// Checks the record's local invariants.
    ///
    /// The parsing service owns semantic validation of the email content;
    /// the client only enforces that the amount is a non-negative finite
    /// number before accepting the record into session state.
    pub fn validate(&self) -> ValidationResult<()> {
        if !self.amount.is_finite() {
            return Err(ValidationError::NonFiniteAmount);
        }
        if self.amount < 0.0 {
            return Err(ValidationError::NegativeAmount {
                amount: self.amount,
            });
        }
        Ok(())
    }
}

// =============================================================================
// Operation Status
// =============================================================================

/// The kind of asynchronous operation a status belongs to.
///
/// Each kind has an independent [`OperationStatus`]; the invariant is at
/// most one `InFlight` status per kind at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Parsing the pasted email text
    Parse,
    /// Generating and saving the PDF receipt
    Download,
    /// Generating the inline PDF preview
    PreviewGenerate,
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationKind::Parse => write!(f, "parse"),
            OperationKind::Download => write!(f, "download"),
            OperationKind::PreviewGenerate => write!(f, "preview-generate"),
        }
    }
}

/// Per-operation async lifecycle marker.
///
/// ## Lifecycle
/// ```text
/// Idle ──start──► InFlight ──success──► Succeeded
///                    │
///                    └─────failure────► Failed(message)
/// ```
///
/// A `Failed` message is rendered to the user until cleared by a subsequent
/// successful operation or an explicit reset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "message")]
pub enum OperationStatus {
    /// No operation of this kind has run since the last reset/success cycle.
    #[default]
    Idle,

    /// The operation is awaiting a network completion. The trigger for this
    /// operation kind is disabled until the status leaves this state.
    InFlight,

    /// The operation failed; the message is shown to the user.
    Failed(String),

    /// The operation completed successfully.
    Succeeded,
}

impl OperationStatus {
    /// Returns true while a request of this kind is outstanding.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, OperationStatus::InFlight)
    }

    /// Returns true if the last run of this operation failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, OperationStatus::Failed(_))
    }

    /// Returns the failure message, if any.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            OperationStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

// =============================================================================
// View State
// =============================================================================

/// The top-level view the user is looking at.
///
/// `Initial` holds only the email text and the parse status. `Parsed`
/// additionally holds the donation record, the download status, and the
/// nested preview tab state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    /// Paste-and-parse screen.
    #[default]
    Initial,

    /// Review screen with the extracted donation fields.
    Parsed,
}

impl std::fmt::Display for ViewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewState::Initial => write!(f, "initial"),
            ViewState::Parsed => write!(f, "parsed"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

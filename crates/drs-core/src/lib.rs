//! # drs-core: Pure Domain Logic for Donation Receipt Studio
//!
//! This crate is the **heart** of Donation Receipt Studio. It contains the
//! domain types and rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                Donation Receipt Studio Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    User Intents                                 │   │
//! │  │    paste email ──► parse ──► preview tab ──► download          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    drs-app (Orchestration)                      │   │
//! │  │    DonationSession, ReceiptResource, PreviewPane                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ drs-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  preview  │  │ filename  │  │ validation│  │   │
//! │  │   │ Donation  │  │  phases   │  │  derive   │  │   rules   │  │   │
//! │  │   │  Status   │  │  table    │  │ fallback  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  drs-gateway (HTTP Boundary)                    │   │
//! │  │        /api/parse, /api/download-receipt, /api/preview-receipt  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ParsedDonation, OperationStatus, ViewState)
//! - [`preview`] - Preview tab state machine with explicit transition table
//! - [`filename`] - Receipt filename derivation (header or fallback)
//! - [`validation`] - Local input validation (runs before any network call)
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network and file system access is FORBIDDEN here
//! 3. **Explicit Transitions**: Illegal state changes are rejected `Err`s, never
//!    silent glitches
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod filename;
pub mod preview;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use drs_core::ParsedDonation` instead of
// `use drs_core::types::ParsedDonation`

pub use error::{StateError, ValidationError};
pub use preview::{PreviewPhase, PreviewState, PreviewTab};
pub use types::{OperationKind, OperationStatus, ParsedDonation, ViewState};

//! # drs-app: Orchestration Layer
//!
//! The client-side orchestration layer of Donation Receipt Studio: the
//! session state machine that sequences parsing, editing, previewing, and
//! downloading, together with the lifecycle of every binary PDF artifact.
//!
//! ## Module Organization
//! ```text
//! drs_app/
//! ├── lib.rs          ◄─── You are here (exports & tracing setup)
//! ├── session.rs      ◄─── DonationSession state machine + shared wrapper
//! ├── resource.rs     ◄─── ReceiptResource (download/preview materialization)
//! ├── artifact.rs     ◄─── BinaryArtifact + owning ArtifactStore
//! ├── preview.rs      ◄─── PreviewPane (nested tab state machine)
//! ├── save.rs         ◄─── SaveTarget trait + DiskSaver
//! └── error.rs        ◄─── AppError (serializable code + message)
//! ```
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  user intent (parse / download / reset / switch tab)                   │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  DonationSession ──► RequestGateway (network)                          │
//! │        │                     │                                          │
//! │        │                     ▼                                          │
//! │        │             ReceiptResource (binary handling)                  │
//! │        ▼                                                                │
//! │  state update ──► view re-render (snapshot)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Scheduling is single-threaded and cooperative: all work is event-driven
//! and suspension occurs only at network call boundaries. The session
//! requires exclusive access for every intent, so operations of the same
//! kind can never overlap.

pub mod artifact;
pub mod error;
pub mod preview;
pub mod resource;
pub mod save;
pub mod session;

pub use artifact::{ArtifactStore, BinaryArtifact};
pub use error::{AppError, ErrorCode};
pub use preview::{PreviewPane, TabAction};
pub use resource::{PreviewHandle, ReceiptResource};
pub use save::{DiskSaver, SaveError, SaveTarget, SavedReceipt};
pub use session::{DonationSession, SessionSnapshot, SessionState};

#[cfg(test)]
pub(crate) mod testing;

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=drs=trace` - Show trace for drs crates only
/// - Default: INFO level
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,drs=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

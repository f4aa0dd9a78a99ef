//! # Donation Session
//!
//! The single source of truth for the client: view state, email text, the
//! last parsed donation, per-operation statuses, and the preview pane. All
//! user intents funnel through here.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Session Transitions                              │
//! │                                                                         │
//! │  Initial ──submit(blank)──► Initial  (validation error, no network)    │
//! │  Initial ──submit(text)───► parsing ──ok──► Parsed                     │
//! │                                │                                        │
//! │                                └──err──► Initial (text preserved)      │
//! │                                                                         │
//! │  Parsed ──resubmit──► same rule as submit                              │
//! │  Parsed ──download──► downloading ──ok/err──► Parsed                   │
//! │  Parsed ──reset────► Initial (everything cleared and released)         │
//! │                                                                         │
//! │  In-flight guard per operation kind: a second submit while the parse   │
//! │  is outstanding (or download while downloading) is rejected BUSY.      │
//! │  The outstanding request itself is never cancelled; a stale preview    │
//! │  response is discarded by its parse-generation token.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use drs_core::validation::validate_email_text;
use drs_core::{OperationKind, OperationStatus, ParsedDonation, PreviewTab, ViewState};
use drs_gateway::RequestGateway;

use crate::error::AppError;
use crate::preview::{PreviewPane, TabAction};
use crate::resource::ReceiptResource;
use crate::save::{SaveTarget, SavedReceipt};

// =============================================================================
// Session Snapshot
// =============================================================================

/// Serializable projection of the session for the view layer.
///
/// Produced after every intent so the view can re-render from a single
/// consistent value instead of querying individual fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Which screen the user is on.
    pub view: ViewState,

    /// Current contents of the email text box.
    pub email_text: String,

    /// The parsed donation, present only in the Parsed view.
    pub donation: Option<ParsedDonation>,

    /// Status of the parse operation.
    pub parse_status: OperationStatus,

    /// Status of the download operation.
    pub download_status: OperationStatus,

    /// Status of the preview generation.
    pub preview_status: OperationStatus,

    /// Active preview tab.
    pub active_tab: PreviewTab,

    /// Inline reference for the ready preview PDF.
    pub preview_ref: Option<String>,

    /// Whether the preview area is expanded.
    pub preview_visible: bool,

    /// Last error message, rendered until a success or reset clears it.
    pub last_error: Option<String>,
}

// =============================================================================
// Donation Session
// =============================================================================

/// Session state machine sequencing parse, download, preview, and reset.
///
/// Generic over the gateway and the save sink so tests inject in-process
/// doubles. Every intent takes `&mut self`: exclusive access is what
/// guarantees operations never interleave mid-transition.
#[derive(Debug)]
pub struct DonationSession<G, S> {
    gateway: G,
    saver: S,
    resource: ReceiptResource,
    email_text: String,
    donation: Option<ParsedDonation>,
    parse_status: OperationStatus,
    download_status: OperationStatus,
    last_error: Option<String>,
    /// Bumped on every successful parse; preview artifacts are keyed by it,
    /// so anything fetched for an earlier parse can never be served again.
    generation: u64,
    preview: PreviewPane,
}

impl<G, S> DonationSession<G, S>
where
    G: RequestGateway,
    S: SaveTarget,
{
    /// Creates a session in the Initial view.
    pub fn new(gateway: G, saver: S) -> Self {
        DonationSession {
            gateway,
            saver,
            resource: ReceiptResource::new(),
            email_text: String::new(),
            donation: None,
            parse_status: OperationStatus::Idle,
            download_status: OperationStatus::Idle,
            last_error: None,
            generation: 0,
            preview: PreviewPane::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Which screen the user is on: Parsed exactly when a donation is held.
    pub fn view(&self) -> ViewState {
        if self.donation.is_some() {
            ViewState::Parsed
        } else {
            ViewState::Initial
        }
    }

    /// Current email text.
    pub fn email_text(&self) -> &str {
        &self.email_text
    }

    /// The parsed donation, if any.
    pub fn donation(&self) -> Option<&ParsedDonation> {
        self.donation.as_ref()
    }

    /// Status of the parse operation.
    pub fn parse_status(&self) -> &OperationStatus {
        &self.parse_status
    }

    /// Status of the download operation.
    pub fn download_status(&self) -> &OperationStatus {
        &self.download_status
    }

    /// Last error message, if one is being rendered.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The preview pane.
    pub fn preview(&self) -> &PreviewPane {
        &self.preview
    }

    /// Number of live PDF artifacts held by the session.
    pub fn live_artifacts(&self) -> usize {
        self.resource.live_artifacts()
    }

    /// Serializable projection for the view layer.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            view: self.view(),
            email_text: self.email_text.clone(),
            donation: self.donation.clone(),
            parse_status: self.parse_status.clone(),
            download_status: self.download_status.clone(),
            preview_status: self.preview.status(),
            active_tab: self.preview.active_tab(),
            preview_ref: self.preview.inline_ref().map(str::to_string),
            preview_visible: self.preview.is_visible(),
            last_error: self.last_error.clone(),
        }
    }

    // =========================================================================
    // Intents
    // =========================================================================

    /// Updates the email text box.
    pub fn set_email_text(&mut self, text: impl Into<String>) {
        self.email_text = text.into();
    }

    /// Submits the email text for parsing.
    ///
    /// Blank or whitespace-only text is rejected locally with zero network
    /// calls. Success replaces the donation wholesale, clears the previous
    /// error, and invalidates any cached preview. Failure records the error
    /// and returns to the Initial view with the email text preserved.
    pub async fn submit(&mut self) -> Result<(), AppError> {
        if self.parse_status.is_in_flight() {
            return Err(AppError::busy(OperationKind::Parse));
        }

        if let Err(err) = validate_email_text(&self.email_text) {
            debug!("Blank submission rejected before any network call");
            self.parse_status = OperationStatus::Failed(err.to_string());
            self.last_error = Some(err.to_string());
            return Err(err.into());
        }

        debug!(chars = self.email_text.len(), "Submitting email text for parsing");
        self.parse_status = OperationStatus::InFlight;

        let outcome = match self.gateway.parse(&self.email_text).await {
            Ok(donation) => donation
                .validate()
                .map(|_| donation)
                .map_err(AppError::from),
            Err(err) => Err(AppError::from(err)),
        };

        match outcome {
            Ok(donation) => {
                info!(receipt_number = %donation.receipt_number, "Email parsed");

                // New parse: anything previewed for the old donation is stale.
                self.generation += 1;
                self.resource.invalidate_preview();
                self.preview = PreviewPane::new();

                self.donation = Some(donation);
                self.parse_status = OperationStatus::Succeeded;
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err.message, "Parse failed");

                self.resource.invalidate_preview();
                self.preview = PreviewPane::new();

                self.donation = None;
                self.parse_status = OperationStatus::Failed(err.message.clone());
                self.last_error = Some(err.message.clone());
                Err(err)
            }
        }
    }

    /// Replaces the donation with user-edited field values.
    ///
    /// The edited record flows into later downloads (those always fetch
    /// fresh bytes); an already-generated preview keeps the rendition it was
    /// built from until the next parse.
    pub fn update_donation(&mut self, donation: ParsedDonation) -> Result<(), AppError> {
        if self.donation.is_none() {
            return Err(AppError::invalid_state("No parsed donation to edit"));
        }
        donation.validate()?;
        self.donation = Some(donation);
        Ok(())
    }

    /// Downloads the receipt PDF and saves it through the sink.
    ///
    /// Only available in the Parsed view. Every invocation fetches fresh
    /// bytes; failure records the error and the view stays Parsed.
    pub async fn download(&mut self) -> Result<SavedReceipt, AppError> {
        let donation = match &self.donation {
            Some(donation) => donation.clone(),
            None => return Err(AppError::invalid_state("No parsed donation to download")),
        };

        if self.download_status.is_in_flight() {
            return Err(AppError::busy(OperationKind::Download));
        }

        debug!(receipt_number = %donation.receipt_number, "Downloading receipt");
        self.download_status = OperationStatus::InFlight;

        match self
            .resource
            .materialize_download(&self.gateway, &self.saver, &donation)
            .await
        {
            Ok(saved) => {
                info!(filename = %saved.filename, "Receipt downloaded");
                self.download_status = OperationStatus::Succeeded;
                self.last_error = None;
                Ok(saved)
            }
            Err(err) => {
                warn!(error = %err.message, "Download failed");
                self.download_status = OperationStatus::Failed(err.message.clone());
                self.last_error = Some(err.message.clone());
                Err(err)
            }
        }
    }

    /// Switches the preview tab, lazily generating the PDF on first access.
    ///
    /// A generation failure lands on the pane (with its retry affordance)
    /// rather than in the session-level error banner.
    pub async fn select_preview_tab(&mut self, tab: PreviewTab) -> Result<(), AppError> {
        if self.donation.is_none() {
            return Err(AppError::invalid_state("No parsed donation to preview"));
        }

        if self.preview.select_tab(tab) == TabAction::Generate {
            self.drive_preview().await;
        }
        Ok(())
    }

    /// Retries a failed preview generation. User-initiated only.
    pub async fn retry_preview(&mut self) -> Result<(), AppError> {
        if self.donation.is_none() {
            return Err(AppError::invalid_state("No parsed donation to preview"));
        }

        if self.preview.retry()? == TabAction::Generate {
            self.drive_preview().await;
        }
        Ok(())
    }

    /// Collapses or expands the preview area without touching its state.
    pub fn toggle_preview_visibility(&mut self) -> Result<(), AppError> {
        if self.donation.is_none() {
            return Err(AppError::invalid_state("No parsed donation to preview"));
        }
        self.preview.toggle_visibility();
        Ok(())
    }

    /// Returns to the Initial view.
    ///
    /// Clears the email text, donation, and error; releases every artifact;
    /// rebuilds the preview pane as Unrequested.
    pub fn reset(&mut self) {
        info!("Session reset");
        self.email_text.clear();
        self.donation = None;
        self.parse_status = OperationStatus::Idle;
        self.download_status = OperationStatus::Idle;
        self.last_error = None;
        self.preview = PreviewPane::new();
        self.resource.release_all();
    }

    /// Runs one preview generation and records the outcome on the pane.
    async fn drive_preview(&mut self) {
        let donation = match &self.donation {
            Some(donation) => donation.clone(),
            // Callers guard on the donation; nothing to do if it vanished.
            None => return,
        };

        let outcome = self
            .resource
            .materialize_preview(&self.gateway, &donation, self.generation)
            .await;

        let record = match outcome {
            Ok(handle) => self.preview.complete(handle.inline_ref),
            Err(err) => self.preview.fail(err.message),
        };
        if let Err(err) = record {
            // The pane was not Loading; the artifact stays cached for the
            // next legal request of the same generation.
            warn!(error = %err, "Preview outcome discarded");
        }
    }
}

// =============================================================================
// Shared Session Wrapper
// =============================================================================

/// Shared, lock-guarded session for embedding in a concurrent shell.
///
/// Each intent acquires the lock for its full duration, so intents are
/// serialized exactly as the `&mut self` methods require.
#[derive(Debug)]
pub struct SessionState<G, S> {
    inner: Arc<Mutex<DonationSession<G, S>>>,
}

impl<G, S> Clone for SessionState<G, S> {
    fn clone(&self) -> Self {
        SessionState {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<G, S> SessionState<G, S>
where
    G: RequestGateway,
    S: SaveTarget,
{
    /// Wraps a session for shared access.
    pub fn new(session: DonationSession<G, S>) -> Self {
        SessionState {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Sets the email text and submits it for parsing.
    pub async fn submit(&self, text: impl Into<String>) -> Result<SessionSnapshot, AppError> {
        let mut session = self.inner.lock().await;
        session.set_email_text(text);
        session.submit().await?;
        Ok(session.snapshot())
    }

    /// Downloads and saves the receipt PDF.
    pub async fn download(&self) -> Result<SavedReceipt, AppError> {
        self.inner.lock().await.download().await
    }

    /// Switches the preview tab.
    pub async fn select_preview_tab(&self, tab: PreviewTab) -> Result<SessionSnapshot, AppError> {
        let mut session = self.inner.lock().await;
        session.select_preview_tab(tab).await?;
        Ok(session.snapshot())
    }

    /// Retries a failed preview generation.
    pub async fn retry_preview(&self) -> Result<SessionSnapshot, AppError> {
        let mut session = self.inner.lock().await;
        session.retry_preview().await?;
        Ok(session.snapshot())
    }

    /// Toggles the preview area visibility.
    pub async fn toggle_preview_visibility(&self) -> Result<SessionSnapshot, AppError> {
        let mut session = self.inner.lock().await;
        session.toggle_preview_visibility()?;
        Ok(session.snapshot())
    }

    /// Resets the session to the Initial view.
    pub async fn reset(&self) -> SessionSnapshot {
        let mut session = self.inner.lock().await;
        session.reset();
        session.snapshot()
    }

    /// Current projection of the session.
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.inner.lock().await.snapshot()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Preview Pane
//!
//! Tab controller for the post-parse preview area.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Preview Lifecycle                                  │
//! │                                                                         │
//! │   Styled tab ◄──────────────────► PDF Preview tab                       │
//! │   (no network, renders            (lazy: first selection requests       │
//! │    parsed fields directly)         generation, later ones reuse it)     │
//! │                                                                         │
//! │   unrequested ──► loading ──► ready                                     │
//! │                      │          (terminal until the next parse)         │
//! │                      ▼                                                   │
//! │                   failed ──► loading   (explicit retry only)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pane holds no bytes. It keeps the revocable inline reference handed
//! out by the resource layer and the phase of the generation attempt; the
//! session drives the actual network call whenever `select_tab` or `retry`
//! asks for one.

use drs_core::preview::validate_transition;
use drs_core::{OperationStatus, PreviewPhase, PreviewState, PreviewTab, StateError};

/// What the session must do after a tab interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabAction {
    /// Nothing to drive; the pane renders from existing state.
    None,

    /// Kick off (or retry) PDF generation for the active donation.
    Generate,
}

/// State of the preview tabs for one parsed donation.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewPane {
    active_tab: PreviewTab,
    state: PreviewState,
    inline_ref: Option<String>,
    visible: bool,
}

impl Default for PreviewPane {
    fn default() -> Self {
        PreviewPane {
            active_tab: PreviewTab::default(),
            state: PreviewState::default(),
            inline_ref: None,
            visible: true,
        }
    }
}

impl PreviewPane {
    /// Creates a fresh pane: styled tab active, PDF unrequested.
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently active tab.
    pub fn active_tab(&self) -> PreviewTab {
        self.active_tab
    }

    /// Phase of the PDF generation attempt.
    pub fn state(&self) -> &PreviewState {
        &self.state
    }

    /// Inline reference for the ready PDF, if any.
    pub fn inline_ref(&self) -> Option<&str> {
        self.inline_ref.as_deref()
    }

    /// Whether the preview area is expanded.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Collapses or expands the preview area.
    ///
    /// Purely cosmetic: generation state and the cached artifact are
    /// untouched, so re-expanding never refetches.
    pub fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
    }

    /// Switches to a tab.
    ///
    /// Selecting the PDF tab for the first time starts generation; every
    /// later selection is a plain view switch.
    pub fn select_tab(&mut self, tab: PreviewTab) -> TabAction {
        self.active_tab = tab;

        if tab == PreviewTab::PdfPreview && self.state.phase() == PreviewPhase::Unrequested {
            // First look at the PDF tab: generation is lazy until now.
            self.state = PreviewState::Loading;
            return TabAction::Generate;
        }

        TabAction::None
    }

    /// Retries a failed generation.
    ///
    /// Only valid from the failed phase; a ready or in-flight preview
    /// rejects the transition.
    pub fn retry(&mut self) -> Result<TabAction, StateError> {
        // Unrequested -> loading is legal in the table, but only
        // `select_tab` may take it; retry is reserved for failures.
        if self.state.phase() != PreviewPhase::Failed {
            return Err(StateError::IllegalPreviewTransition {
                from: self.state.phase(),
                to: PreviewPhase::Loading,
            });
        }
        validate_transition(self.state.phase(), PreviewPhase::Loading)?;
        self.state = PreviewState::Loading;
        self.inline_ref = None;
        Ok(TabAction::Generate)
    }

    /// Records a successful generation.
    pub fn complete(&mut self, inline_ref: String) -> Result<(), StateError> {
        validate_transition(self.state.phase(), PreviewPhase::Ready)?;
        self.state = PreviewState::Ready;
        self.inline_ref = Some(inline_ref);
        Ok(())
    }

    /// Records a failed generation.
    ///
    /// The failure stays on the pane (with a retry affordance) rather than
    /// escalating to the session-level error banner.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), StateError> {
        validate_transition(self.state.phase(), PreviewPhase::Failed)?;
        self.state = PreviewState::Failed(message.into());
        self.inline_ref = None;
        Ok(())
    }

    /// The generation attempt viewed as an operation status.
    pub fn status(&self) -> OperationStatus {
        match &self.state {
            PreviewState::Unrequested => OperationStatus::Idle,
            PreviewState::Loading => OperationStatus::InFlight,
            PreviewState::Ready => OperationStatus::Succeeded,
            PreviewState::Failed(message) => OperationStatus::Failed(message.clone()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_pane_defaults() {
        let pane = PreviewPane::new();
        assert_eq!(pane.active_tab(), PreviewTab::Styled);
        assert_eq!(pane.state().phase(), PreviewPhase::Unrequested);
        assert!(pane.inline_ref().is_none());
        assert!(pane.is_visible());
    }

    #[test]
    fn test_first_pdf_tab_selection_generates() {
        let mut pane = PreviewPane::new();
        assert_eq!(pane.select_tab(PreviewTab::PdfPreview), TabAction::Generate);
        assert_eq!(pane.state().phase(), PreviewPhase::Loading);
        assert_eq!(pane.status(), OperationStatus::InFlight);
    }

    #[test]
    fn test_styled_tab_never_generates() {
        let mut pane = PreviewPane::new();
        assert_eq!(pane.select_tab(PreviewTab::Styled), TabAction::None);
        assert_eq!(pane.state().phase(), PreviewPhase::Unrequested);
    }

    #[test]
    fn test_later_pdf_selections_reuse() {
        let mut pane = PreviewPane::new();
        pane.select_tab(PreviewTab::PdfPreview);
        pane.complete("pdf-blob://abc".to_string()).unwrap();

        pane.select_tab(PreviewTab::Styled);
        assert_eq!(pane.select_tab(PreviewTab::PdfPreview), TabAction::None);
        assert_eq!(pane.state().phase(), PreviewPhase::Ready);
        assert_eq!(pane.inline_ref(), Some("pdf-blob://abc"));
    }

    #[test]
    fn test_failure_and_retry() {
        let mut pane = PreviewPane::new();
        pane.select_tab(PreviewTab::PdfPreview);
        pane.fail("Failed to generate PDF preview. Please try again.")
            .unwrap();
        assert_eq!(
            pane.status(),
            OperationStatus::Failed(
                "Failed to generate PDF preview. Please try again.".to_string()
            )
        );

        assert_eq!(pane.retry().unwrap(), TabAction::Generate);
        assert_eq!(pane.state().phase(), PreviewPhase::Loading);
    }

    #[test]
    fn test_retry_rejected_unless_failed() {
        let mut pane = PreviewPane::new();
        assert!(pane.retry().is_err()); // Unrequested

        pane.select_tab(PreviewTab::PdfPreview);
        pane.complete("pdf-blob://abc".to_string()).unwrap();
        assert!(pane.retry().is_err()); // Ready is terminal
    }

    #[test]
    fn test_complete_requires_loading() {
        let mut pane = PreviewPane::new();
        assert!(pane.complete("pdf-blob://abc".to_string()).is_err());
    }

    #[test]
    fn test_toggle_visibility_preserves_state() {
        let mut pane = PreviewPane::new();
        pane.select_tab(PreviewTab::PdfPreview);
        pane.complete("pdf-blob://abc".to_string()).unwrap();

        pane.toggle_visibility();
        assert!(!pane.is_visible());
        assert_eq!(pane.state().phase(), PreviewPhase::Ready);
        assert_eq!(pane.inline_ref(), Some("pdf-blob://abc"));

        pane.toggle_visibility();
        assert!(pane.is_visible());
    }
}

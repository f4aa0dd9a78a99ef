//! # Preview Tab State Machine
//!
//! The Parsed view nests a preview pane with two tabs. The PDF tab is lazy:
//! the first time it is selected, one preview-generation request is issued;
//! after that, tab switches are pure display toggles.
//!
//! ## Transition Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Preview Generation Phases                            │
//! │                                                                         │
//! │  Unrequested ──select PDF tab──► Loading                               │
//! │                                     │                                   │
//! │                          ┌──────────┴──────────┐                        │
//! │                          ▼                     ▼                        │
//! │                       Ready                 Failed                      │
//! │                   (inline display)     (manual retry only)              │
//! │                                            │                            │
//! │                                            └──retry──► Loading          │
//! │                                                                         │
//! │  Switching back to the Styled tab NEVER alters the phase.              │
//! │  A new parse or a reset rebuilds the whole state (not a transition).   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::StateError;

// =============================================================================
// Preview Tab
// =============================================================================

/// The tab currently selected in the preview pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewTab {
    /// Styled HTML rendition of the receipt (no network involved).
    #[default]
    Styled,

    /// Inline PDF rendition fetched from the preview endpoint.
    PdfPreview,
}

impl std::fmt::Display for PreviewTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreviewTab::Styled => write!(f, "styled"),
            PreviewTab::PdfPreview => write!(f, "pdf_preview"),
        }
    }
}

// =============================================================================
// Preview Phase / State
// =============================================================================

/// Discriminant of [`PreviewState`], used in the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewPhase {
    Unrequested,
    Loading,
    Ready,
    Failed,
}

impl std::fmt::Display for PreviewPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreviewPhase::Unrequested => write!(f, "unrequested"),
            PreviewPhase::Loading => write!(f, "loading"),
            PreviewPhase::Ready => write!(f, "ready"),
            PreviewPhase::Failed => write!(f, "failed"),
        }
    }
}

/// Lifecycle of the lazily generated PDF preview.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "phase", content = "message")]
pub enum PreviewState {
    /// The PDF tab has never been selected for the current donation.
    #[default]
    Unrequested,

    /// A preview-generation request is outstanding.
    Loading,

    /// The preview artifact is available for inline display.
    Ready,

    /// Generation failed; the user may retry manually.
    Failed(String),
}

impl PreviewState {
    /// Returns the phase discriminant of this state.
    pub fn phase(&self) -> PreviewPhase {
        match self {
            PreviewState::Unrequested => PreviewPhase::Unrequested,
            PreviewState::Loading => PreviewPhase::Loading,
            PreviewState::Ready => PreviewPhase::Ready,
            PreviewState::Failed(_) => PreviewPhase::Failed,
        }
    }

    /// Returns the failure message, if any.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            PreviewState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Phases a preview may legally move to from `from`.
pub fn allowed_transitions(from: PreviewPhase) -> &'static [PreviewPhase] {
    use PreviewPhase::*;
    match from {
        Unrequested => &[Loading],
        Loading => &[Ready, Failed],
        Ready => &[],
        Failed => &[Loading],
    }
}

/// Validates a preview phase transition against the table.
///
/// Illegal transitions are rejected calls, not panics, so a misbehaving
/// caller surfaces as an error the orchestration layer can log.
pub fn validate_transition(from: PreviewPhase, to: PreviewPhase) -> Result<(), StateError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(StateError::IllegalPreviewTransition { from, to })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_generation_path() {
        assert!(validate_transition(PreviewPhase::Unrequested, PreviewPhase::Loading).is_ok());
        assert!(validate_transition(PreviewPhase::Loading, PreviewPhase::Ready).is_ok());
        assert!(validate_transition(PreviewPhase::Loading, PreviewPhase::Failed).is_ok());
    }

    #[test]
    fn test_retry_is_the_only_exit_from_failed() {
        assert!(validate_transition(PreviewPhase::Failed, PreviewPhase::Loading).is_ok());
        assert!(validate_transition(PreviewPhase::Failed, PreviewPhase::Ready).is_err());
        assert!(validate_transition(PreviewPhase::Failed, PreviewPhase::Unrequested).is_err());
    }

    #[test]
    fn test_ready_is_terminal_until_rebuild() {
        for to in [
            PreviewPhase::Unrequested,
            PreviewPhase::Loading,
            PreviewPhase::Failed,
        ] {
            assert!(validate_transition(PreviewPhase::Ready, to).is_err());
        }
    }

    #[test]
    fn test_cannot_skip_loading() {
        assert!(validate_transition(PreviewPhase::Unrequested, PreviewPhase::Ready).is_err());
        assert!(validate_transition(PreviewPhase::Unrequested, PreviewPhase::Failed).is_err());
    }

    #[test]
    fn test_phase_and_message_accessors() {
        let failed = PreviewState::Failed("no luck".to_string());
        assert_eq!(failed.phase(), PreviewPhase::Failed);
        assert_eq!(failed.error_message(), Some("no luck"));
        assert_eq!(PreviewState::default().phase(), PreviewPhase::Unrequested);
        assert_eq!(PreviewState::Ready.error_message(), None);
    }

    #[test]
    fn test_default_tab_is_styled() {
        assert_eq!(PreviewTab::default(), PreviewTab::Styled);
    }
}

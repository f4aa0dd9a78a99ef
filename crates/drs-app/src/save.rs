//! # Save Target
//!
//! The "save to disk" side effect behind a trait seam, so tests can record
//! save actions instead of touching the file system.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

/// Errors raised while saving a receipt.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Writing the file failed.
    #[error("Could not save receipt: {0}")]
    Io(#[from] std::io::Error),
}

/// Record of a completed save action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedReceipt {
    /// Filename the receipt was saved under.
    pub filename: String,

    /// Number of bytes written.
    pub bytes_written: usize,
}

/// Sink for download artifacts.
///
/// Production uses [`DiskSaver`]; tests substitute a recording double.
pub trait SaveTarget: Send + Sync {
    /// Persists the receipt bytes under the given filename.
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<SavedReceipt, SaveError>;
}

/// Saves receipts into a fixed downloads directory.
#[derive(Debug, Clone)]
pub struct DiskSaver {
    directory: PathBuf,
}

impl DiskSaver {
    /// Creates a saver writing into `directory` (created on first save).
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        DiskSaver {
            directory: directory.into(),
        }
    }

    /// The configured downloads directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl SaveTarget for DiskSaver {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<SavedReceipt, SaveError> {
        std::fs::create_dir_all(&self.directory)?;

        // The filename comes from a response header; keep only the final
        // path component so it cannot escape the downloads directory.
        let safe_name = Path::new(filename)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Receipt.pdf".to_string());

        let path = self.directory.join(&safe_name);
        std::fs::write(&path, bytes)?;

        info!(path = %path.display(), bytes = bytes.len(), "Receipt saved");

        Ok(SavedReceipt {
            filename: safe_name,
            bytes_written: bytes.len(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

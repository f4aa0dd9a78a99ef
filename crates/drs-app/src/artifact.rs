//! # Binary Artifacts
//!
//! Owns every generated PDF in memory and hands out revocable references.
//!
//! ## Ownership Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Artifact Ownership                                 │
//! │                                                                         │
//! │  ArtifactStore (sole owner)                                            │
//! │  ────────────────────────────                                          │
//! │                                                                         │
//! │  acquire(bytes) ─────────► new handle, exactly one live per artifact   │
//! │                                                                         │
//! │  inline_ref(id) ─────────► pdf-blob://{uuid} while live, None after    │
//! │                            release (the reference is REVOCABLE)        │
//! │                                                                         │
//! │  release(id) ────────────► frees the bytes; releasing an already-      │
//! │                            released handle is a NO-OP, not an error    │
//! │                                                                         │
//! │  Stale artifacts MUST be released before or immediately after          │
//! │  replacement. This bounds memory growth and is a hard invariant,       │
//! │  not an optimization.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use uuid::Uuid;

/// An opaque handle to generated PDF bytes.
///
/// Artifacts are created only as results of successful network operations
/// and live inside the [`ArtifactStore`]; no other component holds or
/// releases them directly.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryArtifact {
    id: Uuid,
    bytes: Vec<u8>,
}

impl BinaryArtifact {
    fn new(bytes: Vec<u8>) -> Self {
        BinaryArtifact {
            id: Uuid::new_v4(),
            bytes,
        }
    }

    /// Handle identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The PDF bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size of the artifact in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true for a zero-length artifact.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Revocable reference usable for inline display.
    ///
    /// Valid only while the artifact is live in its store; the store stops
    /// resolving it after release.
    pub fn inline_ref(&self) -> String {
        format!("pdf-blob://{}", self.id)
    }
}

/// The sole owner of binary artifacts.
#[derive(Debug, Default)]
pub struct ArtifactStore {
    artifacts: HashMap<Uuid, BinaryArtifact>,
}

impl ArtifactStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of generated bytes and returns the new handle id.
    pub fn acquire(&mut self, bytes: Vec<u8>) -> Uuid {
        let artifact = BinaryArtifact::new(bytes);
        let id = artifact.id;
        self.artifacts.insert(id, artifact);
        id
    }

    /// Looks up a live artifact.
    pub fn get(&self, id: Uuid) -> Option<&BinaryArtifact> {
        self.artifacts.get(&id)
    }

    /// Resolves the inline reference for a live artifact.
    ///
    /// Returns `None` once the handle has been released: the reference is
    /// revoked together with the bytes.
    pub fn inline_ref(&self, id: Uuid) -> Option<String> {
        self.artifacts.get(&id).map(BinaryArtifact::inline_ref)
    }

    /// Releases an artifact's bytes.
    ///
    /// Releasing an already-released (or unknown) handle is a no-op.
    /// Returns true if the handle was live.
    pub fn release(&mut self, id: Uuid) -> bool {
        self.artifacts.remove(&id).is_some()
    }

    /// Releases every live artifact.
    pub fn release_all(&mut self) {
        self.artifacts.clear();
    }

    /// Number of live handles.
    pub fn live_count(&self) -> usize {
        self.artifacts.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Receipt Resource
//!
//! Materializes receipt PDFs through the gateway and owns their lifecycle.
//!
//! ## Caching Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     PDF Materialization                                  │
//! │                                                                         │
//! │  Download                    Preview                                    │
//! │  ────────                    ───────                                    │
//! │  fetch ─► save ─► release    fetch ─► cache per parse generation        │
//! │  (bytes NEVER cached)        (repeat requests reuse the cached          │
//! │                               artifact; a new parse invalidates it)     │
//! │                                                                         │
//! │  A stale preview artifact is released before its replacement is         │
//! │  cached. Memory holds at most one live preview at a time.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;
use uuid::Uuid;

use drs_core::filename::fallback_filename;
use drs_core::ParsedDonation;
use drs_gateway::RequestGateway;

use crate::artifact::ArtifactStore;
use crate::error::AppError;
use crate::save::{SaveTarget, SavedReceipt};

/// Resolved preview artifact handed to the preview pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewHandle {
    /// Store handle for the cached artifact.
    pub artifact_id: Uuid,

    /// Revocable inline reference for embedding.
    pub inline_ref: String,
}

#[derive(Debug, Clone, Copy)]
struct CachedPreview {
    generation: u64,
    artifact_id: Uuid,
}

/// Fetches receipt PDFs and owns the resulting artifacts.
#[derive(Debug, Default)]
pub struct ReceiptResource {
    store: ArtifactStore,
    cached_preview: Option<CachedPreview>,
}

impl ReceiptResource {
    /// Creates an empty resource.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the receipt PDF and saves it through the sink.
    ///
    /// Download bytes are never cached: the artifact is released as soon as
    /// the save completes, whether it succeeded or failed. The filename comes
    /// from the response header when present, otherwise from the receipt
    /// number.
    pub async fn materialize_download<G, S>(
        &mut self,
        gateway: &G,
        saver: &S,
        donation: &ParsedDonation,
    ) -> Result<SavedReceipt, AppError>
    where
        G: RequestGateway + ?Sized,
        S: SaveTarget + ?Sized,
    {
        let payload = gateway.fetch_receipt(donation).await?;

        let filename = payload
            .filename
            .clone()
            .unwrap_or_else(|| fallback_filename(&donation.receipt_number));

        let id = self.store.acquire(payload.bytes);
        let result = match self.store.get(id) {
            Some(artifact) => saver
                .save(&filename, artifact.bytes())
                .map_err(AppError::from),
            None => Err(AppError::internal("download artifact missing from store")),
        };
        self.store.release(id);

        if let Ok(saved) = &result {
            debug!(filename = %saved.filename, bytes = saved.bytes_written, "Download materialized");
        }

        result
    }

    /// Fetches the preview PDF, or reuses the cached artifact.
    ///
    /// `generation` is the parse generation the preview belongs to. A cached
    /// artifact from the same generation is reused without touching the
    /// network; one from an older generation is released and replaced.
    pub async fn materialize_preview<G>(
        &mut self,
        gateway: &G,
        donation: &ParsedDonation,
        generation: u64,
    ) -> Result<PreviewHandle, AppError>
    where
        G: RequestGateway + ?Sized,
    {
        if let Some(cached) = self.cached_preview {
            if cached.generation == generation {
                if let Some(inline_ref) = self.store.inline_ref(cached.artifact_id) {
                    debug!(generation, "Reusing cached preview artifact");
                    return Ok(PreviewHandle {
                        artifact_id: cached.artifact_id,
                        inline_ref,
                    });
                }
            }
        }

        let payload = gateway.fetch_preview(donation).await?;

        // The stale artifact goes before its replacement is cached.
        if let Some(stale) = self.cached_preview.take() {
            self.store.release(stale.artifact_id);
        }

        let artifact_id = self.store.acquire(payload.bytes);
        self.cached_preview = Some(CachedPreview {
            generation,
            artifact_id,
        });

        let inline_ref = self
            .store
            .inline_ref(artifact_id)
            .ok_or_else(|| AppError::internal("preview artifact missing from store"))?;

        debug!(generation, %artifact_id, "Preview materialized");

        Ok(PreviewHandle {
            artifact_id,
            inline_ref,
        })
    }

    /// Releases the cached preview artifact, if any.
    pub fn invalidate_preview(&mut self) {
        if let Some(cached) = self.cached_preview.take() {
            self.store.release(cached.artifact_id);
        }
    }

    /// Releases every live artifact.
    pub fn release_all(&mut self) {
        self.cached_preview = None;
        self.store.release_all();
    }

    /// Number of live artifacts held by this resource.
    pub fn live_artifacts(&self) -> usize {
        self.store.live_count()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{pdf_payload, sample_donation, MockGateway, RecordingSaver};
    use drs_gateway::GatewayError;

    #[tokio::test]
    async fn test_download_uses_header_filename_and_releases() {
        let gateway = MockGateway::new();
        gateway.enqueue_receipt(Ok(pdf_payload(Some("Receipt-42.pdf"))));
        let saver = RecordingSaver::new();
        let mut resource = ReceiptResource::new();

        let saved = resource
            .materialize_download(&gateway, &saver, &sample_donation())
            .await
            .unwrap();

        assert_eq!(saved.filename, "Receipt-42.pdf");
        assert_eq!(resource.live_artifacts(), 0);
        assert_eq!(saver.saves().len(), 1);
    }

    #[tokio::test]
    async fn test_download_falls_back_to_receipt_number() {
        let gateway = MockGateway::new();
        gateway.enqueue_receipt(Ok(pdf_payload(None)));
        let saver = RecordingSaver::new();
        let mut resource = ReceiptResource::new();

        let saved = resource
            .materialize_download(&gateway, &saver, &sample_donation())
            .await
            .unwrap();

        assert_eq!(saved.filename, "Receipt-42.pdf");
    }

    #[tokio::test]
    async fn test_failed_save_still_releases_artifact() {
        let gateway = MockGateway::new();
        gateway.enqueue_receipt(Ok(pdf_payload(Some("Receipt-42.pdf"))));
        let saver = RecordingSaver::failing();
        let mut resource = ReceiptResource::new();

        let err = resource
            .materialize_download(&gateway, &saver, &sample_donation())
            .await
            .unwrap_err();

        assert_eq!(err.code, crate::error::ErrorCode::ReceiptError);
        assert_eq!(resource.live_artifacts(), 0);
    }

    #[tokio::test]
    async fn test_preview_is_cached_per_generation() {
        let gateway = MockGateway::new();
        gateway.enqueue_preview(Ok(pdf_payload(None)));
        let mut resource = ReceiptResource::new();
        let donation = sample_donation();

        let first = resource
            .materialize_preview(&gateway, &donation, 1)
            .await
            .unwrap();
        let second = resource
            .materialize_preview(&gateway, &donation, 1)
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(gateway.preview_count(), 1); // Second request hit the cache
        assert_eq!(resource.live_artifacts(), 1);
    }

    #[tokio::test]
    async fn test_new_generation_releases_stale_preview() {
        let gateway = MockGateway::new();
        gateway.enqueue_preview(Ok(pdf_payload(None)));
        gateway.enqueue_preview(Ok(pdf_payload(None)));
        let mut resource = ReceiptResource::new();
        let donation = sample_donation();

        let first = resource
            .materialize_preview(&gateway, &donation, 1)
            .await
            .unwrap();
        let second = resource
            .materialize_preview(&gateway, &donation, 2)
            .await
            .unwrap();

        assert_ne!(first.artifact_id, second.artifact_id);
        assert_eq!(gateway.preview_count(), 2);
        assert_eq!(resource.live_artifacts(), 1); // Stale artifact was released
    }

    #[tokio::test]
    async fn test_failed_preview_leaves_no_artifact() {
        let gateway = MockGateway::new();
        gateway.enqueue_preview(Err(GatewayError::PreviewFailed));
        let mut resource = ReceiptResource::new();

        let err = resource
            .materialize_preview(&gateway, &sample_donation(), 1)
            .await
            .unwrap_err();

        assert_eq!(
            err.message,
            "Failed to generate PDF preview. Please try again."
        );
        assert_eq!(resource.live_artifacts(), 0);
    }

    #[tokio::test]
    async fn test_failed_refetch_does_not_serve_stale_generation() {
        let gateway = MockGateway::new();
        gateway.enqueue_preview(Ok(pdf_payload(None)));
        gateway.enqueue_preview(Err(GatewayError::PreviewFailed));
        gateway.enqueue_preview(Ok(pdf_payload(None)));
        let mut resource = ReceiptResource::new();
        let donation = sample_donation();

        resource
            .materialize_preview(&gateway, &donation, 1)
            .await
            .unwrap();
        resource
            .materialize_preview(&gateway, &donation, 2)
            .await
            .unwrap_err();

        // A retry for generation 2 must go back to the network rather than
        // reuse the generation 1 artifact.
        resource
            .materialize_preview(&gateway, &donation, 2)
            .await
            .unwrap();
        assert_eq!(gateway.preview_count(), 3);
        assert_eq!(resource.live_artifacts(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_preview_releases() {
        let gateway = MockGateway::new();
        gateway.enqueue_preview(Ok(pdf_payload(None)));
        let mut resource = ReceiptResource::new();

        resource
            .materialize_preview(&gateway, &sample_donation(), 1)
            .await
            .unwrap();
        assert_eq!(resource.live_artifacts(), 1);

        resource.invalidate_preview();
        assert_eq!(resource.live_artifacts(), 0);
    }
}

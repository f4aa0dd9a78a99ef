//! # RequestGateway Trait
//!
//! The sole API boundary between the orchestration layer and the network.
//! drs-app depends on this trait, never on reqwest directly, so tests can
//! substitute an in-process double that records calls.

use async_trait::async_trait;

use drs_core::ParsedDonation;

use crate::error::GatewayResult;

/// A binary PDF payload returned by the receipt service.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfPayload {
    /// Raw PDF bytes.
    pub bytes: Vec<u8>,

    /// Filename recovered from the `content-disposition` response header,
    /// if the service supplied one.
    pub filename: Option<String>,
}

/// Boundary component translating domain calls into outbound requests and
/// normalizing results.
///
/// ## Contract
/// - Each call is attempted exactly once; no automatic retries
/// - Every failure is a [`GatewayError`](crate::GatewayError) whose
///   `Display` is the user-facing message
#[async_trait]
pub trait RequestGateway: Send + Sync {
    /// Sends raw email text to the parsing endpoint.
    ///
    /// Non-success responses are mapped to a `ParseRejected` carrying the
    /// server's `detail` message when present, else the generic parse
    /// failure.
    async fn parse(&self, email_text: &str) -> GatewayResult<ParsedDonation>;

    /// Requests the downloadable PDF receipt for a donation.
    async fn fetch_receipt(&self, donation: &ParsedDonation) -> GatewayResult<PdfPayload>;

    /// Requests the inline-preview PDF for a donation.
    ///
    /// Same payload contract as [`fetch_receipt`](Self::fetch_receipt) but
    /// targets the preview endpoint; callers display the result inline
    /// instead of saving it.
    async fn fetch_preview(&self, donation: &ParsedDonation) -> GatewayResult<PdfPayload>;
}

//! # HTTP Gateway
//!
//! Production [`RequestGateway`] implementation over reqwest.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      HttpGateway Request Flow                           │
//! │                                                                         │
//! │  parse(text)                                                           │
//! │    │ POST {base}/api/parse  body {"emailText": "..."}                  │
//! │    ├── 2xx JSON ──────────────────────► Ok(ParsedDonation)             │
//! │    ├── non-2xx {"detail": msg} ───────► Err(ParseRejected { msg })     │
//! │    └── transport / bad body ──────────► Err(ParseFailed)               │
//! │                                                                         │
//! │  fetch_receipt(donation) / fetch_preview(donation)                     │
//! │    │ POST {base}/api/download-receipt | /api/preview-receipt           │
//! │    │ body: full donation JSON                                          │
//! │    ├── 2xx binary ────────────────────► Ok(PdfPayload { bytes,         │
//! │    │     (content-disposition header      filename })                  │
//! │    │      parsed for filename=)                                        │
//! │    └── anything else ─────────────────► Err(ReceiptFailed |            │
//! │                                             PreviewFailed)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use drs_core::filename::filename_from_disposition;
use drs_core::ParsedDonation;

use crate::config::ServiceConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::{PdfPayload, RequestGateway};

/// Request body for the parsing endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ParseRequest<'a> {
    email_text: &'a str,
}

/// Error body the service returns on rejection.
#[derive(Debug, Deserialize)]
struct RejectionBody {
    detail: String,
}

/// HTTP client for the parse/receipt service.
pub struct HttpGateway {
    client: reqwest::Client,
    config: ServiceConfig,
}

impl HttpGateway {
    /// Builds a gateway from a validated configuration.
    pub fn new(config: ServiceConfig) -> GatewayResult<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                GatewayError::InvalidConfig(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(HttpGateway { client, config })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Shared binary-fetch path for the receipt and preview endpoints.
    async fn fetch_pdf(
        &self,
        url: String,
        donation: &ParsedDonation,
        failure: GatewayError,
    ) -> GatewayResult<PdfPayload> {
        debug!(url = %url, receipt = %donation.receipt_number, "Requesting PDF");

        let response = match self.client.post(&url).json(donation).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "PDF request transport failure");
                return Err(failure);
            }
        };

        if !response.status().is_success() {
            warn!(url = %url, status = %response.status(), "PDF request rejected");
            return Err(failure);
        }

        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(filename_from_disposition);

        match response.bytes().await {
            Ok(bytes) => Ok(PdfPayload {
                bytes: bytes.to_vec(),
                filename,
            }),
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to read PDF body");
                Err(failure)
            }
        }
    }
}

#[async_trait]
impl RequestGateway for HttpGateway {
    async fn parse(&self, email_text: &str) -> GatewayResult<ParsedDonation> {
        let url = self.config.parse_url();
        debug!(url = %url, bytes = email_text.len(), "Submitting email text for parsing");

        let response = match self
            .client
            .post(&url)
            .json(&ParseRequest { email_text })
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "Parse request transport failure");
                return Err(GatewayError::ParseFailed);
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(parse_rejection(status, &body));
        }

        match response.json::<ParsedDonation>().await {
            Ok(donation) => Ok(donation),
            Err(e) => {
                warn!(url = %url, error = %e, "Parse response was not a donation record");
                Err(GatewayError::ParseFailed)
            }
        }
    }

    async fn fetch_receipt(&self, donation: &ParsedDonation) -> GatewayResult<PdfPayload> {
        self.fetch_pdf(
            self.config.download_url(),
            donation,
            GatewayError::ReceiptFailed,
        )
        .await
    }

    async fn fetch_preview(&self, donation: &ParsedDonation) -> GatewayResult<PdfPayload> {
        self.fetch_pdf(
            self.config.preview_url(),
            donation,
            GatewayError::PreviewFailed,
        )
        .await
    }
}

/// Maps a non-success parse response to the surfaced error.
///
/// The server's `detail` message is used verbatim when the body carries one;
/// anything else collapses into the generic parse failure.
fn parse_rejection(status: StatusCode, body: &str) -> GatewayError {
    match serde_json::from_str::<RejectionBody>(body) {
        Ok(rejection) => GatewayError::ParseRejected {
            detail: rejection.detail,
        },
        Err(_) => {
            warn!(status = %status, "Parse rejection without detail body");
            GatewayError::ParseFailed
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
    fn test_rejection_detail_surfaced_verbatim() {
        let err = parse_rejection(
            StatusCode::BAD_REQUEST,
            r#"{"detail": "Donor name not found"}"#,
        );
        assert_eq!(
            err,
            GatewayError::ParseRejected {
                detail: "Donor name not found".to_string()
            }
        );
    }

    #[test]
    fn test_rejection_without_detail_is_generic() {
        assert_eq!(
            parse_rejection(StatusCode::INTERNAL_SERVER_ERROR, "oops"),
            GatewayError::ParseFailed
        );
        assert_eq!(
            parse_rejection(StatusCode::BAD_REQUEST, r#"{"error": "nope"}"#),
            GatewayError::ParseFailed
        );
        assert_eq!(
            parse_rejection(StatusCode::BAD_GATEWAY, ""),
            GatewayError::ParseFailed
        );
    }

    #[test]
    fn test_parse_request_wire_format() {
        let body = serde_json::to_value(ParseRequest {
            email_text: "Dear Donor...",
        })
        .unwrap();
        assert_eq!(body["emailText"], "Dear Donor...");
    }

    #[test]
    fn test_gateway_rejects_bad_config() {
        assert!(HttpGateway::new(ServiceConfig::new("not-a-url")).is_err());
        assert!(HttpGateway::new(ServiceConfig::default()).is_ok());
    }
}

//! # Service Configuration
//!
//! The gateway's only configuration is the base address of the
//! parse/receipt service and a request timeout. There is no config file and
//! no persisted state: defaults, overridden by environment variables.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     DRS_API_URL=https://receipts.example.org                           │
//! │     DRS_API_TIMEOUT_SECS=30                                            │
//! │                                                                         │
//! │  2. Default Values                                                     │
//! │     http://localhost:8000, 30 second timeout                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{GatewayError, GatewayResult};

/// Default base address of the parse/receipt service (local development).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Connection settings for the parse/receipt service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base address of the service, scheme included.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServiceConfig {
    /// Creates a config pointing at the given base address.
    pub fn new(base_url: impl Into<String>) -> Self {
        ServiceConfig {
            base_url: base_url.into(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Builds a config from defaults plus environment overrides.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("DRS_API_URL") {
            debug!(url = %url, "Overriding service URL from environment");
            self.base_url = url;
        }

        if let Ok(timeout) = std::env::var("DRS_API_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric DRS_API_TIMEOUT_SECS"),
            }
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> GatewayResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(GatewayError::InvalidConfig(
                "service base URL must not be empty".into(),
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(GatewayError::InvalidConfig(format!(
                "service base URL must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(GatewayError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    // =========================================================================
    // Endpoint Helpers
    // =========================================================================

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// URL of the email parsing endpoint.
    pub fn parse_url(&self) -> String {
        self.endpoint("/api/parse")
    }

    /// URL of the receipt download endpoint.
    pub fn download_url(&self) -> String {
        self.endpoint("/api/download-receipt")
    }

    /// URL of the receipt preview endpoint.
    pub fn preview_url(&self) -> String {
        self.endpoint("/api/preview-receipt")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_endpoint_urls() {
        let config = ServiceConfig::default();
        assert_eq!(config.parse_url(), "http://localhost:8000/api/parse");
        assert_eq!(
            config.download_url(),
            "http://localhost:8000/api/download-receipt"
        );
        assert_eq!(
            config.preview_url(),
            "http://localhost:8000/api/preview-receipt"
        );
    }

    #[test]
    fn test_trailing_slash_is_normalized() {
        let config = ServiceConfig::new("https://receipts.example.org/");
        assert_eq!(
            config.parse_url(),
            "https://receipts.example.org/api/parse"
        );
    }

    #[test]
    fn test_config_validation() {
        assert!(ServiceConfig::new("").validate().is_err());
        assert!(ServiceConfig::new("ftp://example.org").validate().is_err());
        assert!(ServiceConfig::new("https://example.org").validate().is_ok());

        let mut config = ServiceConfig::default();
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}

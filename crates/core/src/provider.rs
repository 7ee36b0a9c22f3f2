//! Ad platform provider seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::dashboard::DashboardQuery;

/// The ad platforms the dashboard aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Google Ads.
    GoogleAds,
    /// Facebook Ads (Meta Marketing API).
    FacebookAds,
}

impl ProviderKind {
    /// Returns the key used for this provider in dashboard results.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GoogleAds => "google_ads",
            Self::FacebookAds => "facebook_ads",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by a provider fetch.
///
/// `Display` yields the raw provider message, which is what callers see.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The request never produced a response (connect, timeout, TLS).
    #[error("{0}")]
    Request(String),

    /// The platform answered with an error status.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Platform error message.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("{0}")]
    Decode(String),

    /// Required credentials are absent.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

/// Fetches campaign metrics from one ad platform.
///
/// Payloads are opaque to the dashboard and passed through unchanged.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdsProvider: Send + Sync {
    /// Which platform this provider talks to.
    fn kind(&self) -> ProviderKind;

    /// Fetches metrics matching `query`.
    async fn fetch(&self, query: &DashboardQuery) -> Result<Value, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display_is_raw_message() {
        let err = ProviderError::Api {
            status: 429,
            message: "quota exceeded".to_string(),
        };
        assert_eq!(err.to_string(), "quota exceeded");
        assert_eq!(
            ProviderError::Request("connection refused".into()).to_string(),
            "connection refused"
        );
        assert_eq!(
            ProviderError::NotConfigured("Google Ads developer token").to_string(),
            "Google Ads developer token is not configured"
        );
    }

    #[test]
    fn test_provider_keys() {
        assert_eq!(ProviderKind::GoogleAds.as_str(), "google_ads");
        assert_eq!(ProviderKind::FacebookAds.to_string(), "facebook_ads");
    }
}

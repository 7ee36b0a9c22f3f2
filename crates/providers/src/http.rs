//! Shared HTTP plumbing for provider clients.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde_json::Value;

use infotrack_core::ProviderError;

/// Upper bound on followed result pages per fetch.
pub const MAX_PAGES: usize = 50;

/// Builds a client with the provider's request timeout.
pub(crate) fn build_client(timeout_secs: u64) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(timeout_secs.min(5)))
        .build()
        .map_err(|e| ProviderError::Request(e.to_string()))
}

/// Converts a transport failure into a provider error.
///
/// The request URL is dropped from the message: it can carry credentials
/// in its query string.
pub(crate) fn transport_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Request("request timed out".to_string())
    } else {
        ProviderError::Request(err.without_url().to_string())
    }
}

/// Reads a JSON body, mapping error statuses to `ProviderError::Api`.
pub(crate) async fn read_json(response: Response) -> Result<Value, ProviderError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Api {
            status: status.as_u16(),
            message: error_message(status, &body),
        });
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| ProviderError::Decode(format!("invalid response body: {e}")))
}

/// Picks the platform's own message out of an error body.
///
/// Both platforms answer with `{"error": {"message": ...}}`.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

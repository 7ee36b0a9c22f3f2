//! Dashboard data types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::sanitize::sanitize_text_field;

/// Raw refresh fields as received from the caller.
///
/// Missing fields are treated as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshInput {
    /// Range start.
    pub start_date: Option<String>,
    /// Range end.
    pub end_date: Option<String>,
    /// Campaign identifier or name.
    pub campaign: Option<String>,
}

/// Reporting date range. Not validated beyond sanitization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Range start.
    pub start_date: String,
    /// Range end.
    pub end_date: String,
}

impl DateRange {
    /// Returns true when both bounds are present.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        !self.start_date.is_empty() && !self.end_date.is_empty()
    }
}

/// Campaign filter. Empty means all campaigns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignFilter(String);

impl CampaignFilter {
    /// Creates a filter from an already sanitized value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns true if no specific campaign was requested.
    #[must_use]
    pub fn is_all(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the filter value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The query handed to every provider.
///
/// Serializes flat as `{start_date, end_date, campaign}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardQuery {
    /// Date range.
    #[serde(flatten)]
    pub date_range: DateRange,
    /// Campaign filter.
    pub campaign: CampaignFilter,
}

impl DashboardQuery {
    /// Builds a query from raw input, sanitizing every field.
    #[must_use]
    pub fn from_input(input: &RefreshInput) -> Self {
        let clean = |field: &Option<String>| sanitize_text_field(field.as_deref().unwrap_or(""));

        Self {
            date_range: DateRange {
                start_date: clean(&input.start_date),
                end_date: clean(&input.end_date),
            },
            campaign: CampaignFilter::new(clean(&input.campaign)),
        }
    }
}

/// Combined provider payloads, keyed by provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResult {
    /// Google Ads payload.
    pub google_ads: Value,
    /// Facebook Ads payload.
    pub facebook_ads: Value,
}

//! Google Ads API client.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, warn};

use infotrack_core::{AdsProvider, DashboardQuery, ProviderError, ProviderKind};
use infotrack_shared::config::GoogleAdsConfig;

use crate::http::{MAX_PAGES, build_client, read_json, transport_error};

const SELECT_FIELDS: &str = "campaign.id, campaign.name, campaign.status, \
metrics.impressions, metrics.clicks, metrics.cost_micros, \
metrics.conversions, metrics.conversions_value";

/// Builds the GAQL statement for a dashboard query.
///
/// Without both dates the last 30 days are reported. A numeric campaign
/// filter matches the campaign ID, anything else matches the name.
#[must_use]
pub fn build_gaql(query: &DashboardQuery) -> String {
    let range = &query.date_range;
    let date_clause = if range.is_bounded() {
        format!(
            "segments.date BETWEEN '{}' AND '{}'",
            escape_literal(&range.start_date),
            escape_literal(&range.end_date)
        )
    } else {
        "segments.date DURING LAST_30_DAYS".to_string()
    };

    let campaign = query.campaign.as_str();
    let campaign_clause = if query.campaign.is_all() {
        String::new()
    } else if campaign.chars().all(|c| c.is_ascii_digit()) {
        format!(" AND campaign.id = {campaign}")
    } else {
        format!(" AND campaign.name = '{}'", escape_literal(campaign))
    };

    format!(
        "SELECT {SELECT_FIELDS} FROM campaign WHERE {date_clause}{campaign_clause} \
         ORDER BY metrics.cost_micros DESC"
    )
}

fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Fetches campaign metrics through `googleAds:search`.
#[derive(Debug, Clone)]
pub struct GoogleAdsClient {
    client: Client,
    config: GoogleAdsConfig,
}

impl GoogleAdsClient {
    /// Creates a client from configuration.
    pub fn from_config(config: GoogleAdsConfig) -> Result<Self, ProviderError> {
        let client = build_client(config.timeout_secs)?;
        Ok(Self { client, config })
    }

    fn customer_id(&self) -> String {
        self.config.customer_id.replace('-', "")
    }

    fn ensure_configured(&self) -> Result<(), ProviderError> {
        if self.customer_id().is_empty() {
            return Err(ProviderError::NotConfigured("Google Ads customer ID"));
        }
        if self.config.developer_token.is_empty() {
            return Err(ProviderError::NotConfigured("Google Ads developer token"));
        }
        if self.config.access_token.is_empty() {
            return Err(ProviderError::NotConfigured("Google Ads access token"));
        }
        Ok(())
    }

    fn search_url(&self) -> String {
        format!(
            "{}/{}/customers/{}/googleAds:search",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_version,
            self.customer_id()
        )
    }

    async fn search_page(
        &self,
        gaql: &str,
        page_token: Option<&str>,
    ) -> Result<Value, ProviderError> {
        let mut body = json!({ "query": gaql });
        if let Some(token) = page_token {
            body["pageToken"] = Value::String(token.to_string());
        }

        let mut request = self
            .client
            .post(self.search_url())
            .bearer_auth(&self.config.access_token)
            .header("developer-token", &self.config.developer_token)
            .json(&body);
        if let Some(login) = &self.config.login_customer_id {
            request = request.header("login-customer-id", login.replace('-', ""));
        }

        let response = request.send().await.map_err(transport_error)?;
        read_json(response).await
    }
}

#[async_trait]
impl AdsProvider for GoogleAdsClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::GoogleAds
    }

    async fn fetch(&self, query: &DashboardQuery) -> Result<Value, ProviderError> {
        self.ensure_configured()?;

        let gaql = build_gaql(query);
        debug!(query = %gaql, "Querying Google Ads");

        let mut results = Vec::new();
        let mut field_mask = Value::Null;
        let mut page_token: Option<String> = None;

        for _ in 0..MAX_PAGES {
            let mut page = self.search_page(&gaql, page_token.as_deref()).await?;

            if let Some(rows) = page.get_mut("results").and_then(Value::as_array_mut) {
                results.append(rows);
            }
            if field_mask.is_null() {
                if let Some(mask) = page.get_mut("fieldMask") {
                    field_mask = mask.take();
                }
            }

            page_token = page["nextPageToken"]
                .as_str()
                .filter(|t| !t.is_empty())
                .map(str::to_string);
            if page_token.is_none() {
                break;
            }
        }

        if page_token.is_some() {
            warn!(
                pages = MAX_PAGES,
                rows = results.len(),
                "Google Ads results truncated at page limit"
            );
        }

        Ok(json!({ "results": results, "fieldMask": field_mask }))
    }
}

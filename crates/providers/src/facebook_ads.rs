//! Meta Marketing API (Facebook Ads) client.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, warn};

use infotrack_core::{AdsProvider, DashboardQuery, ProviderError, ProviderKind};
use infotrack_shared::config::FacebookAdsConfig;

use crate::http::{MAX_PAGES, build_client, read_json, transport_error};

const INSIGHT_FIELDS: &str =
    "campaign_id,campaign_name,impressions,clicks,spend,cpc,ctr,actions,action_values";

const PAGE_LIMIT: &str = "500";

/// Builds the insights query parameters for a dashboard query.
///
/// The access token is not included.
#[must_use]
pub fn insights_params(query: &DashboardQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("level", "campaign".to_string()),
        ("fields", INSIGHT_FIELDS.to_string()),
        ("limit", PAGE_LIMIT.to_string()),
    ];

    let range = &query.date_range;
    if range.is_bounded() {
        params.push((
            "time_range",
            json!({ "since": range.start_date, "until": range.end_date }).to_string(),
        ));
    } else {
        params.push(("date_preset", "last_30d".to_string()));
    }

    if !query.campaign.is_all() {
        let campaign = query.campaign.as_str();
        let filter = if campaign.chars().all(|c| c.is_ascii_digit()) {
            json!([{ "field": "campaign.id", "operator": "EQUAL", "value": campaign }])
        } else {
            json!([{ "field": "campaign.name", "operator": "CONTAIN", "value": campaign }])
        };
        params.push(("filtering", filter.to_string()));
    }

    params
}

/// Fetches campaign insights for one ad account.
#[derive(Debug, Clone)]
pub struct FacebookAdsClient {
    client: Client,
    config: FacebookAdsConfig,
}

impl FacebookAdsClient {
    /// Creates a client from configuration.
    pub fn from_config(config: FacebookAdsConfig) -> Result<Self, ProviderError> {
        let client = build_client(config.timeout_secs)?;
        Ok(Self { client, config })
    }

    fn ensure_configured(&self) -> Result<(), ProviderError> {
        if self.config.ad_account_id.is_empty() {
            return Err(ProviderError::NotConfigured("Facebook Ads ad account ID"));
        }
        if self.config.access_token.is_empty() {
            return Err(ProviderError::NotConfigured("Facebook Ads access token"));
        }
        Ok(())
    }

    fn insights_url(&self) -> String {
        let account = self.config.ad_account_id.trim_start_matches("act_");
        format!(
            "{}/{}/act_{account}/insights",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_version
        )
    }

    async fn insights_page(
        &self,
        params: &[(&'static str, String)],
        after: Option<&str>,
    ) -> Result<Value, ProviderError> {
        let mut request = self
            .client
            .get(self.insights_url())
            .query(params)
            .query(&[("access_token", self.config.access_token.as_str())]);
        if let Some(cursor) = after {
            request = request.query(&[("after", cursor)]);
        }

        let response = request.send().await.map_err(transport_error)?;
        read_json(response).await
    }
}

#[async_trait]
impl AdsProvider for FacebookAdsClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::FacebookAds
    }

    async fn fetch(&self, query: &DashboardQuery) -> Result<Value, ProviderError> {
        self.ensure_configured()?;

        let params = insights_params(query);
        debug!(account = %self.config.ad_account_id, "Querying Facebook Ads insights");

        let mut data = Vec::new();
        let mut after: Option<String> = None;

        for _ in 0..MAX_PAGES {
            let mut page = self.insights_page(&params, after.as_deref()).await?;

            if let Some(rows) = page.get_mut("data").and_then(Value::as_array_mut) {
                data.append(rows);
            }

            let paging = &page["paging"];
            after = paging["next"]
                .as_str()
                .and(paging["cursors"]["after"].as_str())
                .map(str::to_string);
            if after.is_none() {
                break;
            }
        }

        if after.is_some() {
            warn!(
                pages = MAX_PAGES,
                rows = data.len(),
                "Facebook Ads insights truncated at page limit"
            );
        }

        Ok(json!({ "data": data }))
    }
}

//! Dashboard refresh service.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::error::DashboardError;
use super::types::{DashboardQuery, DashboardResult, RefreshInput};
use crate::auth::{Actor, Authorizer, Capability};
use crate::logging::ErrorLog;
use crate::provider::{AdsProvider, ProviderError};

/// Serves dashboard refreshes.
///
/// Built once at startup and shared across requests. Holds no mutable
/// state of its own.
#[derive(Clone)]
pub struct DashboardService {
    google_ads: Arc<dyn AdsProvider>,
    facebook_ads: Arc<dyn AdsProvider>,
    authorizer: Arc<dyn Authorizer>,
    error_log: Arc<dyn ErrorLog>,
}

impl std::fmt::Debug for DashboardService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardService")
            .field("google_ads", &self.google_ads.kind())
            .field("facebook_ads", &self.facebook_ads.kind())
            .finish_non_exhaustive()
    }
}

impl DashboardService {
    /// Creates the service from its collaborators.
    #[must_use]
    pub fn new(
        google_ads: Arc<dyn AdsProvider>,
        facebook_ads: Arc<dyn AdsProvider>,
        authorizer: Arc<dyn Authorizer>,
        error_log: Arc<dyn ErrorLog>,
    ) -> Self {
        Self {
            google_ads,
            facebook_ads,
            authorizer,
            error_log,
        }
    }

    /// Checks that `actor` may use the dashboard.
    pub fn authorize(&self, actor: &Actor) -> Result<(), DashboardError> {
        if self.authorizer.can(actor, Capability::ManageDashboard) {
            Ok(())
        } else {
            warn!(user_id = %actor.id, role = %actor.role, "Dashboard access denied");
            Err(DashboardError::PermissionDenied)
        }
    }

    /// Refreshes dashboard figures for `actor`.
    ///
    /// Both providers are always queried with the same sanitized query.
    /// Every provider failure is written to the error log; the first one
    /// (Google Ads before Facebook Ads) is returned.
    pub async fn refresh(
        &self,
        actor: &Actor,
        input: &RefreshInput,
    ) -> Result<DashboardResult, DashboardError> {
        self.authorize(actor)?;

        let query = DashboardQuery::from_input(input);
        debug!(
            start_date = %query.date_range.start_date,
            end_date = %query.date_range.end_date,
            campaign = %query.campaign.as_str(),
            "Refreshing dashboard"
        );

        let (google_ads, facebook_ads) = tokio::join!(
            self.google_ads.fetch(&query),
            self.facebook_ads.fetch(&query)
        );

        let google_ads = self.check(self.google_ads.as_ref(), google_ads);
        let facebook_ads = self.check(self.facebook_ads.as_ref(), facebook_ads);

        Ok(DashboardResult {
            google_ads: google_ads?,
            facebook_ads: facebook_ads?,
        })
    }

    fn check(
        &self,
        provider: &dyn AdsProvider,
        result: Result<Value, ProviderError>,
    ) -> Result<Value, DashboardError> {
        result.map_err(|source| {
            self.error_log.log_error(&source.to_string());
            DashboardError::Provider {
                provider: provider.kind(),
                source,
            }
        })
    }
}

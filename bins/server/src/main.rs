//! InfoTrack API Server
//!
//! Main entry point for the paid-traffic dashboard service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use infotrack_api::{AppState, create_router};
use infotrack_core::{Capability, DashboardService, RoleAuthorizer, TracingErrorLog, UserRole};
use infotrack_providers::{FacebookAdsClient, GoogleAdsClient};
use infotrack_shared::{AppConfig, JwtService, NonceService, config::AccessConfig};

/// Builds the authorizer: administrator grant plus configured extras.
fn build_authorizer(access: &AccessConfig) -> RoleAuthorizer {
    let authorizer = RoleAuthorizer::activated();

    for (role, capabilities) in &access.grants {
        let Ok(role) = role.parse::<UserRole>() else {
            warn!(role = %role, "Ignoring grant for unknown role");
            continue;
        };
        for capability in capabilities {
            match capability.parse::<Capability>() {
                Ok(capability) => authorizer.grant(role, capability),
                Err(e) => warn!(role = %role, error = %e, "Ignoring unknown capability"),
            }
        }
    }

    authorizer
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "infotrack=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;

    // Token services
    let jwt_service = JwtService::new(config.jwt_service_config());
    let nonce_service = NonceService::new(&config.nonce_service_config());

    // Ad platform providers
    let google_ads = GoogleAdsClient::from_config(config.google_ads.clone())
        .context("failed to build Google Ads client")?;
    let facebook_ads = FacebookAdsClient::from_config(config.facebook_ads.clone())
        .context("failed to build Facebook Ads client")?;
    info!(
        google_customer = %config.google_ads.customer_id,
        facebook_account = %config.facebook_ads.ad_account_id,
        "Ad providers configured"
    );

    let dashboard = DashboardService::new(
        Arc::new(google_ads),
        Arc::new(facebook_ads),
        Arc::new(build_authorizer(&config.access)),
        Arc::new(TracingErrorLog),
    );

    // Create application state
    let state = AppState {
        dashboard: Arc::new(dashboard),
        jwt_service: Arc::new(jwt_service),
        nonce_service: Arc::new(nonce_service),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use infotrack_core::{Actor, Authorizer};
    use uuid::Uuid;

    use super::*;

    fn actor(role: UserRole) -> Actor {
        Actor {
            id: Uuid::new_v4(),
            role,
        }
    }

    #[test]
    fn test_configured_grants_extend_administrator_default() {
        let access = AccessConfig {
            grants: HashMap::from([
                ("editor".to_string(), vec!["manage_infotrack".to_string()]),
                ("author".to_string(), vec!["edit_everything".to_string()]),
                ("owner".to_string(), vec!["manage_infotrack".to_string()]),
            ]),
        };

        let authorizer = build_authorizer(&access);

        assert!(authorizer.can(&actor(UserRole::Administrator), Capability::ManageDashboard));
        assert!(authorizer.can(&actor(UserRole::Editor), Capability::ManageDashboard));
        assert!(!authorizer.can(&actor(UserRole::Author), Capability::ManageDashboard));
        assert!(!authorizer.can(&actor(UserRole::Subscriber), Capability::ManageDashboard));
    }
}

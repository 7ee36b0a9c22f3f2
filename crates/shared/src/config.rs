//! Application configuration management.

use std::collections::HashMap;

use serde::Deserialize;

use crate::{JwtConfig as JwtServiceConfig, NonceConfig as NonceServiceConfig};

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// JWT configuration.
    pub jwt: JwtConfig,
    /// Nonce configuration.
    #[serde(default)]
    pub nonce: NonceConfig,
    /// Extra capability grants.
    #[serde(default)]
    pub access: AccessConfig,
    /// Google Ads provider configuration.
    #[serde(default)]
    pub google_ads: GoogleAdsConfig,
    /// Facebook Ads provider configuration.
    #[serde(default)]
    pub facebook_ads: FacebookAdsConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    3600 // 1 hour
}

/// Nonce configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NonceConfig {
    /// Signing secret. Falls back to a value derived from the JWT secret.
    pub secret: Option<String>,
    /// Nonce lifetime in seconds.
    #[serde(default = "default_nonce_lifetime")]
    pub lifetime_secs: u64,
}

fn default_nonce_lifetime() -> u64 {
    86_400 // 1 day
}

/// Capability grants beyond the administrator default.
///
/// Keys are role names, values are capability names, e.g.
/// `editor = ["manage_infotrack"]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessConfig {
    /// Role name to capability names.
    #[serde(default)]
    pub grants: HashMap<String, Vec<String>>,
}

/// Google Ads API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleAdsConfig {
    /// API base URL.
    #[serde(default = "default_google_base_url")]
    pub base_url: String,
    /// API version path segment.
    #[serde(default = "default_google_api_version")]
    pub api_version: String,
    /// Customer account ID, digits only.
    #[serde(default)]
    pub customer_id: String,
    /// Manager account ID sent as `login-customer-id`.
    pub login_customer_id: Option<String>,
    /// Developer token.
    #[serde(default)]
    pub developer_token: String,
    /// OAuth access token.
    #[serde(default)]
    pub access_token: String,
    /// Request timeout in seconds.
    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: u64,
}

impl Default for GoogleAdsConfig {
    fn default() -> Self {
        Self {
            base_url: default_google_base_url(),
            api_version: default_google_api_version(),
            customer_id: String::new(),
            login_customer_id: None,
            developer_token: String::new(),
            access_token: String::new(),
            timeout_secs: default_provider_timeout(),
        }
    }
}

fn default_google_base_url() -> String {
    "https://googleads.googleapis.com".to_string()
}

fn default_google_api_version() -> String {
    "v17".to_string()
}

/// Facebook Marketing API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FacebookAdsConfig {
    /// Graph API base URL.
    #[serde(default = "default_facebook_base_url")]
    pub base_url: String,
    /// Graph API version path segment.
    #[serde(default = "default_facebook_api_version")]
    pub api_version: String,
    /// Ad account ID without the `act_` prefix.
    #[serde(default)]
    pub ad_account_id: String,
    /// Access token.
    #[serde(default)]
    pub access_token: String,
    /// Request timeout in seconds.
    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: u64,
}

impl Default for FacebookAdsConfig {
    fn default() -> Self {
        Self {
            base_url: default_facebook_base_url(),
            api_version: default_facebook_api_version(),
            ad_account_id: String::new(),
            access_token: String::new(),
            timeout_secs: default_provider_timeout(),
        }
    }
}

fn default_facebook_base_url() -> String {
    "https://graph.facebook.com".to_string()
}

fn default_facebook_api_version() -> String {
    "v20.0".to_string()
}

fn default_provider_timeout() -> u64 {
    15
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("INFOTRACK").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Settings for the bearer token service.
    #[must_use]
    pub fn jwt_service_config(&self) -> JwtServiceConfig {
        JwtServiceConfig {
            secret: self.jwt.secret.clone(),
            #[allow(clippy::cast_possible_wrap)]
            access_token_expires_minutes: (self.jwt.access_token_expiry_secs / 60) as i64,
        }
    }

    /// Settings for the nonce service.
    #[must_use]
    pub fn nonce_service_config(&self) -> NonceServiceConfig {
        NonceServiceConfig {
            secret: self
                .nonce
                .secret
                .clone()
                .unwrap_or_else(|| format!("{}:nonce", self.jwt.secret)),
            lifetime_secs: i64::try_from(self.nonce.lifetime_secs).unwrap_or(i64::MAX),
        }
    }
}

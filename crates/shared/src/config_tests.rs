//! Configuration loading tests.

use crate::AppConfig;

#[test]
fn test_load_from_environment() {
    temp_env::with_vars(
        [
            ("INFOTRACK__JWT__SECRET", Some("env-secret")),
            ("INFOTRACK__SERVER__PORT", Some("9090")),
            ("INFOTRACK__GOOGLE_ADS__CUSTOMER_ID", Some("1234567890")),
            ("RUN_MODE", Some("test-nonexistent")),
        ],
        || {
            let config = AppConfig::load().unwrap();

            assert_eq!(config.jwt.secret, "env-secret");
            assert_eq!(config.server.port, 9090);
            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.google_ads.customer_id, "1234567890");
            assert_eq!(config.google_ads.base_url, "https://googleads.googleapis.com");
            assert_eq!(config.facebook_ads.timeout_secs, 15);
            assert_eq!(config.nonce.lifetime_secs, 86_400);
        },
    );
}

#[test]
fn test_missing_jwt_secret_fails() {
    temp_env::with_vars(
        [
            ("INFOTRACK__JWT__SECRET", None::<&str>),
            ("RUN_MODE", Some("test-nonexistent")),
        ],
        || {
            assert!(AppConfig::load().is_err());
        },
    );
}

#[test]
fn test_nonce_secret_falls_back_to_jwt_secret() {
    temp_env::with_vars(
        [
            ("INFOTRACK__JWT__SECRET", Some("base")),
            ("INFOTRACK__JWT__ACCESS_TOKEN_EXPIRY_SECS", Some("1800")),
            ("RUN_MODE", Some("test-nonexistent")),
        ],
        || {
            let config = AppConfig::load().unwrap();

            assert_eq!(config.nonce_service_config().secret, "base:nonce");
            assert_eq!(config.nonce_service_config().lifetime_secs, 86_400);
            assert_eq!(config.jwt_service_config().access_token_expires_minutes, 30);
        },
    );
}

#[test]
fn test_oversized_nonce_lifetime_saturates() {
    temp_env::with_vars(
        [
            ("INFOTRACK__JWT__SECRET", Some("base")),
            ("RUN_MODE", Some("test-nonexistent")),
        ],
        || {
            let mut config = AppConfig::load().unwrap();
            config.nonce.lifetime_secs = u64::MAX;

            assert_eq!(config.nonce_service_config().lifetime_secs, i64::MAX);
        },
    );
}

//! Anti-forgery nonces.
//!
//! A nonce is a short-lived signed token bound to one action name and one
//! authenticated session. It is handed to the dashboard page and sent back
//! with every state-changing request. A nonce remains valid for its whole
//! lifetime window, so it is replayable inside that window, exactly like the
//! per-page tokens admin panels traditionally use.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Nonce configuration.
#[derive(Debug, Clone)]
pub struct NonceConfig {
    /// Secret key for signing nonces.
    pub secret: String,
    /// How long an issued nonce stays valid, in seconds.
    pub lifetime_secs: i64,
}

impl Default for NonceConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production-nonce".to_string(),
            lifetime_secs: 86_400,
        }
    }
}

/// Errors that can occur while issuing or checking a nonce.
#[derive(Debug, Error)]
pub enum NonceError {
    /// No nonce was supplied.
    #[error("nonce is missing")]
    Missing,

    /// Nonce lifetime has elapsed.
    #[error("nonce has expired")]
    Expired,

    /// Nonce was issued for another action or session.
    #[error("nonce does not match action or session")]
    Mismatch,

    /// Nonce could not be decoded.
    #[error("invalid nonce: {0}")]
    Invalid(String),

    /// Nonce could not be signed.
    #[error("failed to issue nonce: {0}")]
    Encoding(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct NonceClaims {
    sub: Uuid,
    sid: Uuid,
    act: String,
    iat: i64,
    exp: i64,
}

/// Issues and verifies nonces.
#[derive(Clone)]
pub struct NonceService {
    lifetime: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for NonceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NonceService")
            .field("lifetime", &self.lifetime)
            .field("keys", &"[hidden]")
            .finish()
    }
}

impl NonceService {
    /// Creates a new nonce service.
    #[must_use]
    pub fn new(config: &NonceConfig) -> Self {
        Self {
            lifetime: Duration::try_seconds(config.lifetime_secs.max(0)).unwrap_or(Duration::MAX),
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
        }
    }

    /// Lifetime of issued nonces in seconds.
    #[must_use]
    pub fn lifetime_secs(&self) -> i64 {
        self.lifetime.num_seconds()
    }

    /// Issues a nonce for `action` bound to the given user session.
    pub fn create(
        &self,
        action: &str,
        user_id: Uuid,
        session_id: Uuid,
    ) -> Result<String, NonceError> {
        self.create_at(action, user_id, session_id, Utc::now())
    }

    pub(crate) fn create_at(
        &self,
        action: &str,
        user_id: Uuid,
        session_id: Uuid,
        issued_at: DateTime<Utc>,
    ) -> Result<String, NonceError> {
        let claims = NonceClaims {
            sub: user_id,
            sid: session_id,
            act: action.to_string(),
            iat: issued_at.timestamp(),
            exp: issued_at
                .checked_add_signed(self.lifetime)
                .map_or(i64::MAX, |expires_at| expires_at.timestamp()),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| NonceError::Encoding(e.to_string()))
    }

    /// Verifies that `token` was issued for `action` and this user session
    /// and is still inside its lifetime window.
    pub fn verify(
        &self,
        token: &str,
        action: &str,
        user_id: Uuid,
        session_id: Uuid,
    ) -> Result<(), NonceError> {
        if token.trim().is_empty() {
            return Err(NonceError::Missing);
        }

        let mut validation = Validation::default();
        validation.leeway = 0;

        let claims = decode::<NonceClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => NonceError::Expired,
                _ => NonceError::Invalid(e.to_string()),
            })?;

        if claims.act != action || claims.sub != user_id || claims.sid != session_id {
            return Err(NonceError::Mismatch);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTION: &str = "infotrack_nonce";

    fn service() -> NonceService {
        NonceService::new(&NonceConfig {
            secret: "nonce-test-secret".to_string(),
            lifetime_secs: 3600,
        })
    }

    #[test]
    fn test_nonce_round_trip_for_same_session() {
        let svc = service();
        let (user, session) = (Uuid::new_v4(), Uuid::new_v4());

        let nonce = svc.create(ACTION, user, session).unwrap();

        assert!(svc.verify(&nonce, ACTION, user, session).is_ok());
    }

    #[test]
    fn test_nonce_rejects_other_action() {
        let svc = service();
        let (user, session) = (Uuid::new_v4(), Uuid::new_v4());
        let nonce = svc.create(ACTION, user, session).unwrap();

        assert!(matches!(
            svc.verify(&nonce, "other_action", user, session),
            Err(NonceError::Mismatch)
        ));
    }

    #[test]
    fn test_nonce_rejects_other_user_or_session() {
        let svc = service();
        let (user, session) = (Uuid::new_v4(), Uuid::new_v4());
        let nonce = svc.create(ACTION, user, session).unwrap();

        assert!(matches!(
            svc.verify(&nonce, ACTION, Uuid::new_v4(), session),
            Err(NonceError::Mismatch)
        ));
        assert!(matches!(
            svc.verify(&nonce, ACTION, user, Uuid::new_v4()),
            Err(NonceError::Mismatch)
        ));
    }

    #[test]
    fn test_stale_nonce_is_expired() {
        let svc = service();
        let (user, session) = (Uuid::new_v4(), Uuid::new_v4());
        let nonce = svc
            .create_at(ACTION, user, session, Utc::now() - Duration::hours(2))
            .unwrap();

        assert!(matches!(
            svc.verify(&nonce, ACTION, user, session),
            Err(NonceError::Expired)
        ));
    }

    #[test]
    fn test_missing_and_garbage_nonce() {
        let svc = service();
        let (user, session) = (Uuid::new_v4(), Uuid::new_v4());

        assert!(matches!(
            svc.verify("", ACTION, user, session),
            Err(NonceError::Missing)
        ));
        assert!(matches!(
            svc.verify("abc.def.ghi", ACTION, user, session),
            Err(NonceError::Invalid(_))
        ));
    }

    #[test]
    fn test_unbounded_lifetime_still_issues_valid_nonces() {
        let svc = NonceService::new(&NonceConfig {
            secret: "nonce-test-secret".to_string(),
            lifetime_secs: i64::MAX,
        });
        let (user, session) = (Uuid::new_v4(), Uuid::new_v4());

        let nonce = svc.create(ACTION, user, session).unwrap();

        assert!(svc.lifetime_secs() > 0);
        assert!(svc.verify(&nonce, ACTION, user, session).is_ok());
    }

    #[test]
    fn test_nonce_signed_with_other_secret_is_invalid() {
        let other = NonceService::new(&NonceConfig {
            secret: "someone-else".to_string(),
            lifetime_secs: 3600,
        });
        let (user, session) = (Uuid::new_v4(), Uuid::new_v4());
        let nonce = other.create(ACTION, user, session).unwrap();

        assert!(matches!(
            service().verify(&nonce, ACTION, user, session),
            Err(NonceError::Invalid(_))
        ));
    }
}

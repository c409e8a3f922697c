use chrono::{Duration, Utc};
use jsonwebtoken::{errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl_minutes: DEFAULT_TOKEN_TTL_MINUTES,
        }
    }

    pub fn with_ttl_minutes(mut self, minutes: i64) -> Self {
        self.token_ttl_minutes = minutes;
        self
    }

    fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.jwt_secret.as_bytes())
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.jwt_secret.as_bytes())
    }
}

/// Bearer token claims: subject email, role tag, expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum TokenError {
    #[error("invalid token")]
    Invalid,
    #[error("token expired")]
    Expired,
    #[error("failed to sign token")]
    Signing,
}

/// Issue a signed token for `email` with the given role tag, expiring
/// `config.token_ttl_minutes` from now.
pub fn issue_token(email: &str, role: &str, config: &AuthConfig) -> Result<String, TokenError> {
    let now = Utc::now();
    let exp = now
        .checked_add_signed(Duration::minutes(config.token_ttl_minutes))
        .unwrap_or(now)
        .timestamp() as usize;
    let claims = Claims {
        sub: email.to_string(),
        role: role.to_string(),
        exp,
        iat: now.timestamp() as usize,
    };
    jsonwebtoken::encode(&Header::default(), &claims, &config.encoding_key())
        .map_err(|_| TokenError::Signing)
}

/// Verify signature and expiry, returning the decoded claims. A token whose
/// subject claim is absent fails deserialization and is reported as invalid.
pub fn verify_token(token: &str, config: &AuthConfig) -> Result<Claims, TokenError> {
    let mut validation = Validation::default();
    validation.leeway = 0;
    jsonwebtoken::decode::<Claims>(token, &config.decoding_key(), &validation)
        .map(|data| data.claims)
        .map_err(|err| match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthConfig {
        AuthConfig::new("test-secret")
    }

    #[test]
    fn issue_and_verify_roundtrip() {
        let token = issue_token("ana@example.com", "employee", &config()).unwrap();
        let claims = verify_token(&token, &config()).unwrap();
        assert_eq!(claims.sub, "ana@example.com");
        assert_eq!(claims.role, "employee");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn default_lifetime_is_thirty_minutes() {
        let token = issue_token("ana@example.com", "hr", &config()).unwrap();
        let claims = verify_token(&token, &config()).unwrap();
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn ttl_override_is_respected() {
        let cfg = config().with_ttl_minutes(5);
        let token = issue_token("ana@example.com", "hr", &cfg).unwrap();
        let claims = verify_token(&token, &cfg).unwrap();
        assert_eq!(claims.exp - claims.iat, 5 * 60);
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let cfg = config().with_ttl_minutes(-2);
        let token = issue_token("ana@example.com", "external", &cfg).unwrap();
        assert_eq!(verify_token(&token, &cfg), Err(TokenError::Expired));
    }

    #[test]
    fn wrong_secret_is_rejected_as_invalid() {
        let token = issue_token("ana@example.com", "external", &config()).unwrap();
        let other = AuthConfig::new("different-secret");
        assert_eq!(verify_token(&token, &other), Err(TokenError::Invalid));
    }

    #[test]
    fn garbage_is_rejected_as_invalid() {
        assert_eq!(
            verify_token("not.a.token", &config()),
            Err(TokenError::Invalid)
        );
    }
}

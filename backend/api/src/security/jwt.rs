//! Stateless bearer tokens: HS256-signed JWTs with a 24-hour expiry.
//!
//! The signing keys are constructed from configuration at startup and
//! injected through application state; there is no process-wide key cell.

use crate::error::{AppError, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims: subject (user ID), identity fields, issue/expiry timestamps.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| AppError::InvalidToken)
    }
}

/// Token signing and verification keys plus the configured expiry.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_hours: i64,
}

impl JwtKeys {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_hours,
        }
    }

    /// Issue a signed token for the given identity.
    pub fn issue(&self, user_id: Uuid, email: &str, role: &str) -> Result<String> {
        let now = Utc::now();
        let expiry = now + Duration::hours(self.ttl_hours);

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Validate signature and expiry, returning the embedded claims. Any
    /// failure collapses into the invalid-or-expired outcome.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|_| AppError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_keys() -> JwtKeys {
        JwtKeys::new("test-secret", 24)
    }

    #[test]
    fn test_issue_and_verify() {
        let keys = test_keys();
        let user_id = Uuid::new_v4();

        let token = keys
            .issue(user_id, "alice@x.com", "creator")
            .expect("should issue token");
        // JWT tokens have 3 parts separated by dots
        assert_eq!(token.matches('.').count(), 2);

        let claims = keys.verify(&token).expect("should verify token");
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "alice@x.com");
        assert_eq!(claims.role, "creator");
        assert_eq!(claims.user_id().expect("valid uuid"), user_id);
    }

    #[test]
    fn test_verify_garbage_token() {
        let keys = test_keys();
        assert!(keys.verify("not.a.token").is_err());
    }

    #[test]
    fn test_verify_tampered_token() {
        let keys = test_keys();
        let token = keys
            .issue(Uuid::new_v4(), "alice@x.com", "creator")
            .expect("should issue token");
        let tampered = token.replace('a', "b");
        assert!(keys.verify(&tampered).is_err());
    }

    #[test]
    fn test_verify_wrong_secret() {
        let token = test_keys()
            .issue(Uuid::new_v4(), "alice@x.com", "creator")
            .expect("should issue token");
        let other = JwtKeys::new("other-secret", 24);
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_expiry_is_24_hours() {
        let keys = test_keys();
        let token = keys
            .issue(Uuid::new_v4(), "alice@x.com", "consumer")
            .expect("should issue token");
        let claims = keys.verify(&token).expect("should verify token");

        let expected = claims.iat + 24 * 3600;
        assert_eq!(claims.exp, expected);
    }

    #[test]
    fn test_expired_token_rejected() {
        // A negative TTL produces a token expired beyond validation leeway.
        let keys = JwtKeys::new("test-secret", -1);
        let token = keys
            .issue(Uuid::new_v4(), "alice@x.com", "consumer")
            .expect("should issue token");
        assert!(keys.verify(&token).is_err());
    }
}

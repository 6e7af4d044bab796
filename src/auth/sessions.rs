/**
 * Session Tokens
 *
 * This module signs and verifies the compact session tokens handed out at
 * login. Tokens are HMAC-signed JWTs binding the subject's id and username
 * to an issue time and expiry; verification needs no server-side lookup.
 *
 * The signing secret is process-wide configuration. `TokenCodec` derives its
 * keys once at startup and is shared across all requests; configuration
 * loading refuses to start the process without a secret.
 */

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;
use uuid::Uuid;

/// Claims carried by a session token
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject user ID
    pub sub: String,
    /// Subject username
    pub username: String,
    /// Expiration time (Unix timestamp, seconds)
    pub exp: u64,
    /// Issued at time (Unix timestamp, seconds)
    pub iat: u64,
}

impl Claims {
    /// Expiry as a UTC timestamp, if the claim value is representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(i64::try_from(self.exp).ok()?, 0)
    }
}

/// Why a token failed verification
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The token could not be parsed at all
    #[error("token is malformed")]
    Malformed,

    /// The signature does not match the configured secret
    #[error("token signature is invalid")]
    BadSignature,

    /// The token parsed and verified but its expiry has passed
    #[error("token has expired")]
    Expired,
}

/// A freshly issued token together with its expiry
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies session tokens for one signing secret
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Configured token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign a token for the given subject
    ///
    /// Issue time is now (UTC); expiry is now plus the configured TTL.
    pub fn issue(
        &self,
        user_id: Uuid,
        username: &str,
    ) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_secs();
        let exp = now + self.ttl.as_secs();

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            exp,
            iat: now,
        };

        let token = encode(&Header::default(), &claims, &self.encoding)?;
        let expires_at =
            DateTime::<Utc>::from_timestamp(exp as i64, 0).unwrap_or_else(Utc::now);

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify a token and return its claims
    ///
    /// Fails with [`TokenError::Malformed`] when the string is not a valid
    /// token, [`TokenError::BadSignature`] when the signature does not match
    /// this codec's secret, and [`TokenError::Expired`] once the expiry has
    /// passed. Expiry is checked with zero leeway.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Malformed,
            }
        })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new("test-signing-secret", Duration::from_secs(3600))
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let codec = codec();
        let user_id = Uuid::new_v4();

        let issued = codec.issue(user_id, "alice").unwrap();
        assert!(!issued.token.is_empty());

        let claims = codec.verify(&issued.token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.username, "alice");
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.expires_at(), Some(issued.expires_at));
    }

    #[test]
    fn test_verify_rejects_garbage_as_malformed() {
        let codec = codec();
        assert_eq!(codec.verify("not.a.token"), Err(TokenError::Malformed));
        assert_eq!(codec.verify(""), Err(TokenError::Malformed));
    }

    #[test]
    fn test_verify_rejects_foreign_signature() {
        let ours = codec();
        let theirs = TokenCodec::new("some-other-secret", Duration::from_secs(3600));

        let issued = theirs.issue(Uuid::new_v4(), "mallory").unwrap();
        assert_eq!(ours.verify(&issued.token), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let codec = codec();
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();

        // Hand-build claims that expired an hour ago, signed with our key.
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            username: "alice".to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode(&Header::default(), &claims, &codec.encoding).unwrap();

        assert_eq!(codec.verify(&token), Err(TokenError::Expired));
    }
}

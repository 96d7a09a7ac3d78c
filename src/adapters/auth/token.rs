//! JWT session token service.
//!
//! Issues HS256-signed, expiring tokens carrying the user id in the
//! subject claim. Validation failures of any kind collapse to `None` so
//! the identity resolver can downgrade to anonymous without branching on
//! the failure mode.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::TokenService;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id.
    sub: String,
    /// Expiry, seconds since epoch.
    exp: i64,
    /// Issued-at, seconds since epoch.
    iat: i64,
}

/// HS256 implementation of the token service port.
pub struct HmacTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_seconds: i64,
}

impl HmacTokenService {
    /// Create a token service from a shared secret and token lifetime.
    pub fn new(secret: &str, ttl_seconds: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        }
    }
}

impl TokenService for HmacTokenService {
    fn issue(&self, user_id: UserId) -> Result<String, DomainError> {
        let now = Timestamp::now().as_datetime().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: now + self.ttl_seconds,
            iat: now,
        };
        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("Failed to sign token: {}", e))
        })
    }

    fn validate(&self, token: &str) -> Option<UserId> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default()).ok()?;
        data.claims.sub.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_validate_to_the_same_user() {
        let service = HmacTokenService::new("secret", 3600);
        let user_id = UserId::new();
        let token = service.issue(user_id).unwrap();
        assert_eq!(service.validate(&token), Some(user_id));
    }

    #[test]
    fn garbage_tokens_yield_none() {
        let service = HmacTokenService::new("secret", 3600);
        assert_eq!(service.validate(""), None);
        assert_eq!(service.validate("not.a.jwt"), None);
    }

    #[test]
    fn tokens_signed_with_another_secret_yield_none() {
        let a = HmacTokenService::new("secret-a", 3600);
        let b = HmacTokenService::new("secret-b", 3600);
        let token = a.issue(UserId::new()).unwrap();
        assert_eq!(b.validate(&token), None);
    }

    #[test]
    fn expired_tokens_yield_none() {
        // Negative TTL puts the expiry in the past.
        let service = HmacTokenService::new("secret", -3600);
        let token = service.issue(UserId::new()).unwrap();
        assert_eq!(service.validate(&token), None);
    }
}

//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Authentication configuration (session token signing)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for HS256 token signing
    pub token_secret: String,

    /// Session token lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: i64,
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.token_secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__TOKEN_SECRET"));
        }
        if self.token_secret.len() < 32 {
            return Err(ValidationError::TokenSecretTooShort);
        }
        if self.token_ttl_secs <= 0 {
            return Err(ValidationError::InvalidTokenTtl);
        }
        Ok(())
    }
}

fn default_token_ttl() -> i64 {
    // Seven days; clients reconnect with a fresh token after expiry.
    7 * 24 * 3600
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> AuthConfig {
        AuthConfig {
            token_secret: "0123456789abcdef0123456789abcdef".to_string(),
            token_ttl_secs: default_token_ttl(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_short_secret_is_rejected() {
        let config = AuthConfig {
            token_secret: "short".to_string(),
            ..valid()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nonpositive_ttl_is_rejected() {
        let config = AuthConfig {
            token_ttl_secs: 0,
            ..valid()
        };
        assert!(config.validate().is_err());
    }
}

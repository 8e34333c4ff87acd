//! Token authority configuration.
//!
//! This module provides the configuration type consumed by
//! [`TokenAuthority::new`](crate::token::TokenAuthority::new). The
//! configuration is supplied by the embedding application (typically bound
//! from a TOML file or environment layer) and is validated once, at
//! construction time.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Minimum secret length in bytes.
///
/// HMAC-SHA256 requires a key of at least 256 bits to be cryptographically
/// sound. Secrets shorter than this are rejected at construction.
pub const MIN_SECRET_BYTES: usize = 32;

/// Configuration for a [`TokenAuthority`](crate::token::TokenAuthority).
///
/// All fields are required; there are no assumed defaults. The signing
/// secret is shared with every service that verifies tokens issued here.
///
/// # Example (TOML)
///
/// ```toml
/// [token]
/// secret = "an-at-least-32-byte-signing-secret!!"
/// token_lifetime = "1h"
/// issuer = "tessera"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    /// Raw HMAC-SHA256 key material. Must be at least
    /// [`MIN_SECRET_BYTES`] bytes.
    pub secret: String,

    /// Lifetime of standard identity tokens.
    /// Verification tokens use a fixed 28-day lifetime instead.
    #[serde(with = "humantime_serde")]
    pub token_lifetime: Duration,

    /// Issuer embedded in every token as the `iss` claim and required of
    /// every token presented for validation.
    pub issuer: String,
}

impl TokenConfig {
    /// Creates a new configuration.
    #[must_use]
    pub fn new(
        secret: impl Into<String>,
        token_lifetime: Duration,
        issuer: impl Into<String>,
    ) -> Self {
        Self {
            secret: secret.into(),
            token_lifetime,
            issuer: issuer.into(),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the secret is empty, and
    /// `ConfigError::InvalidValue` if:
    /// - The secret is shorter than [`MIN_SECRET_BYTES`] bytes
    /// - The issuer is empty
    /// - The token lifetime is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::Missing("secret".to_string()));
        }

        if self.secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::InvalidValue(format!(
                "secret must be at least {} bytes for HMAC-SHA256, got {}",
                MIN_SECRET_BYTES,
                self.secret.len()
            )));
        }

        if self.issuer.is_empty() {
            return Err(ConfigError::InvalidValue(
                "issuer cannot be empty".to_string(),
            ));
        }

        if self.token_lifetime.is_zero() {
            return Err(ConfigError::InvalidValue(
                "token_lifetime must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// An invalid configuration value was provided.
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    /// A required configuration value is missing.
    #[error("Missing required configuration: {0}")]
    Missing(String),
}

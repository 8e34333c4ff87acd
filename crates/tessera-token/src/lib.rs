//! # tessera-token
//!
//! Signed identity token issuance and verification for Tessera services.
//!
//! This crate provides:
//! - HMAC-SHA256 signed, time-bounded identity tokens in the standard
//!   compact JWT representation
//! - Cryptographic validation with issuer and expiration enforcement
//! - Typed extraction of individual claims from validated tokens
//! - Fail-fast configuration validation (weak secrets are a construction
//!   error, never a request error)
//!
//! ## Overview
//!
//! A [`TokenAuthority`] is constructed once from a [`TokenConfig`] and
//! shared across the application. Tokens are bearer credentials: services
//! holding the shared secret can verify a subject's claims without a
//! session store, and the authority keeps no record of what it issued.
//!
//! ## Modules
//!
//! - [`config`] - Configuration binding and validation
//! - [`error`] - Token lifecycle error types
//! - [`token`] - Token issuance, validation, and claim extraction

pub mod config;
pub mod error;
pub mod token;

pub use config::{ConfigError, MIN_SECRET_BYTES, TokenConfig};
pub use error::{TokenError, ValidationCause};
pub use token::{
    ClaimValue, RESERVED_CLAIMS, TokenAuthority, TokenClaims, TokenRequest,
    VERIFICATION_TOKEN_LIFETIME,
};

/// Type alias for token operation results.
pub type TokenResult<T> = Result<T, TokenError>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use tessera_token::prelude::*;
/// ```
pub mod prelude {
    pub use crate::TokenResult;
    pub use crate::config::{ConfigError, MIN_SECRET_BYTES, TokenConfig};
    pub use crate::error::{TokenError, ValidationCause};
    pub use crate::token::{
        ClaimValue, RESERVED_CLAIMS, TokenAuthority, TokenClaims, TokenRequest,
        VERIFICATION_TOKEN_LIFETIME,
    };
}

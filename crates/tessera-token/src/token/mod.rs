//! Token issuance, validation, and claim extraction.
//!
//! This module provides:
//!
//! - HS256 token issuance with a configurable standard lifetime
//! - Long-lived verification token issuance (fixed 28-day lifetime)
//! - Signature, issuer, structure, and expiration validation
//! - Typed extraction of individual claims

pub mod authority;
pub mod claims;

pub use authority::{TokenAuthority, VERIFICATION_TOKEN_LIFETIME};
pub use claims::{ClaimValue, RESERVED_CLAIMS, TokenClaims, TokenRequest};

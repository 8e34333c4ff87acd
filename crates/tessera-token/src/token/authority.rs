//! The token authority: issuance, validation, and claim extraction.
//!
//! [`TokenAuthority`] owns the HMAC-SHA256 key derived from the configured
//! secret and exposes the full token lifecycle. It is immutable after
//! construction and safe to share across threads without locking; every
//! operation is synchronous, CPU-bound work over its inputs and the key.
//!
//! # Example
//!
//! ```ignore
//! use tessera_token::{TokenAuthority, TokenConfig, TokenRequest};
//!
//! let authority = TokenAuthority::new(config)?;
//!
//! let token = authority.issue_token(
//!     &TokenRequest::new("user@example.com").with_claim("role", "admin"),
//! )?;
//!
//! let claims = authority.validate_token(&token)?;
//! assert_eq!(claims.sub, "user@example.com");
//! ```

use std::fmt;
use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use time::OffsetDateTime;

use crate::config::{ConfigError, TokenConfig};
use crate::error::{TokenError, ValidationCause};
use crate::token::claims::{ClaimValue, RESERVED_CLAIMS, TokenClaims, TokenRequest};

/// Fixed lifetime of verification tokens: 28 days.
///
/// Verification tokens are longer-lived, single-purpose credentials (for
/// example email verification links) and deliberately ignore the configured
/// standard token lifetime.
pub const VERIFICATION_TOKEN_LIFETIME: Duration = Duration::from_secs(28 * 24 * 60 * 60);

/// Issues and verifies signed, time-bounded identity tokens.
///
/// The authority is stateless server-side: issued tokens are bearer
/// credentials and no record of them is kept. Verification recomputes the
/// HMAC-SHA256 signature with the shared key, checks the issuer, and
/// enforces expiration.
pub struct TokenAuthority {
    /// Signing key derived from the configured secret.
    encoding_key: EncodingKey,

    /// Verification key derived from the same secret.
    decoding_key: DecodingKey,

    /// Issuer embedded in and required of every token.
    issuer: String,

    /// Lifetime of standard tokens.
    token_lifetime: Duration,
}

impl fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("issuer", &self.issuer)
            .field("token_lifetime", &self.token_lifetime)
            .field("encoding_key", &"<EncodingKey>")
            .field("decoding_key", &"<DecodingKey>")
            .finish()
    }
}

impl TokenAuthority {
    /// Creates a new token authority from validated configuration.
    ///
    /// The HMAC keys are derived here, once; construction is the only
    /// fallible phase of the component's lifecycle.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the secret is missing or shorter than
    /// [`MIN_SECRET_BYTES`](crate::config::MIN_SECRET_BYTES) bytes, if the
    /// issuer is empty, or if the lifetime is zero.
    pub fn new(config: TokenConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let secret = config.secret.as_bytes();
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer: config.issuer,
            token_lifetime: config.token_lifetime,
        })
    }

    /// Issues a standard identity token for the request.
    ///
    /// The payload carries `sub`, `iss`, `iat`, `exp`, and the request
    /// claims at the top level; expiration is the configured lifetime from
    /// now. The authority keeps no record of the issued token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::EmptySubject`] for a blank subject,
    /// [`TokenError::ReservedClaim`] if a request claim uses a registered
    /// name, and [`TokenError::Encoding`] if the payload cannot be
    /// serialized and signed.
    pub fn issue_token(&self, request: &TokenRequest) -> Result<String, TokenError> {
        let token = self.issue_with_lifetime(request, self.token_lifetime)?;
        tracing::info!(subject = %request.subject(), "Issued identity token");
        Ok(token)
    }

    /// Issues a verification token for the request.
    ///
    /// Identical to [`Self::issue_token`] except the expiration is fixed at
    /// [`VERIFICATION_TOKEN_LIFETIME`] from issuance; the configured
    /// standard lifetime is never read.
    ///
    /// # Errors
    ///
    /// Same as [`Self::issue_token`].
    pub fn issue_verification_token(&self, request: &TokenRequest) -> Result<String, TokenError> {
        let token = self.issue_with_lifetime(request, VERIFICATION_TOKEN_LIFETIME)?;
        tracing::info!(subject = %request.subject(), "Issued verification token");
        Ok(token)
    }

    fn issue_with_lifetime(
        &self,
        request: &TokenRequest,
        lifetime: Duration,
    ) -> Result<String, TokenError> {
        if request.subject().trim().is_empty() {
            return Err(TokenError::EmptySubject);
        }

        if let Some(reserved) = request
            .claims()
            .keys()
            .find(|key| RESERVED_CLAIMS.contains(&key.as_str()))
        {
            return Err(TokenError::reserved_claim(reserved.as_str()));
        }

        let iat = OffsetDateTime::now_utc().unix_timestamp();
        // `exp` has whole-second granularity on the wire; sub-second
        // lifetimes truncate toward zero and yield tokens that are already
        // expired on arrival.
        let exp = iat + lifetime.as_secs() as i64;

        let claims = TokenClaims {
            sub: request.subject().to_owned(),
            iss: self.issuer.clone(),
            iat,
            exp,
            custom: request.claims().clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::encoding_error(e.to_string()))
    }

    /// Validates a token from an untrusted source and returns its claims.
    ///
    /// Rejects tokens with a bad signature, a foreign issuer, structural
    /// corruption (truncated segments, malformed base64 or JSON, an
    /// unsupported header algorithm, missing registered claims), or an
    /// expiration at or before the current time. This is the authoritative
    /// expiration gate: a token that decodes here is not expired.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Validation`] for every rejection; the cause
    /// describes the failure for diagnostics but callers need not
    /// distinguish them. No partial claim set is ever returned.
    pub fn validate_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        // Expiration is enforced below with at-or-after semantics; the
        // library check is leeway-based and strictly-before.
        validation.validate_exp = false;
        validation.validate_aud = false; // No audience in this token format

        let data = decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            let err = TokenError::from(e);
            tracing::warn!(error = %err, "Token validation failed");
            err
        })?;

        let claims = data.claims;
        if claims.is_expired() {
            tracing::warn!(subject = %claims.sub, "Token validation failed: token expired");
            return Err(TokenError::validation(ValidationCause::Expired));
        }

        tracing::debug!(subject = %claims.sub, "Token validated");
        Ok(claims)
    }

    /// Reports whether a token is expired, treating every unusable token as
    /// expired.
    ///
    /// This is an adapter over [`Self::validate_token`] that discards error
    /// detail by design: callers of this operation only learn a boolean, so
    /// a forged, corrupt, or foreign token is reported identically to a
    /// genuinely expired one. On a validated token the result is a
    /// defensive re-check of `exp`; validation itself already rejects
    /// expired tokens, so it returns `false` in practice.
    #[must_use]
    pub fn is_token_expired(&self, token: &str) -> bool {
        match self.validate_token(token) {
            Ok(claims) => claims.is_expired(),
            Err(err) => {
                tracing::debug!(error = %err, "Treating unusable token as expired");
                true
            }
        }
    }

    /// Validates a token and extracts a single claim as the requested kind.
    ///
    /// The lookup covers registered fields (`sub`, `iss`, `iat`, `exp`) as
    /// well as caller-supplied claims.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Validation`] if the token is invalid or
    /// expired, [`TokenError::MissingClaim`] if the claim is absent, and
    /// [`TokenError::ClaimType`] if it cannot be read as `T`.
    pub fn extract_claim<T: ClaimValue>(&self, token: &str, claim: &str) -> Result<T, TokenError> {
        let claims = self.validate_token(token)?;
        let value = claims
            .get(claim)
            .ok_or_else(|| TokenError::missing_claim(claim))?;

        T::from_claim(&value).ok_or_else(|| TokenError::claim_type(claim, T::KIND))
    }

    /// Validates a token and returns its subject.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Validation`] if the token is invalid or
    /// expired.
    pub fn extract_subject(&self, token: &str) -> Result<String, TokenError> {
        let claims = self.validate_token(token)?;
        Ok(claims.sub)
    }

    /// Returns the configured issuer.
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Returns the configured standard token lifetime.
    #[must_use]
    pub fn token_lifetime(&self) -> Duration {
        self.token_lifetime
    }
}

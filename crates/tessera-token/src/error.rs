//! Token lifecycle error types.
//!
//! All verification-dependent operations fail with the single
//! [`TokenError::Validation`] kind whenever a presented token is malformed,
//! mis-signed, issued by someone else, or expired. The underlying
//! [`ValidationCause`] is preserved for diagnostics, but callers are not
//! expected to branch on it. Claim coercion failures and issuance failures
//! are distinct variants.

use std::fmt;

/// Errors that can occur while issuing or consuming tokens.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The token failed signature, structural, issuer, or expiration checks.
    #[error("Invalid token: {cause}")]
    Validation {
        /// The underlying reason the token was rejected.
        cause: ValidationCause,
    },

    /// The token payload could not be serialized during issuance.
    #[error("Failed to encode token: {message}")]
    Encoding {
        /// Description of the encoding error.
        message: String,
    },

    /// The token request carried an empty or blank subject.
    #[error("Token subject must not be empty")]
    EmptySubject,

    /// A caller-supplied claim uses a registered claim name.
    #[error("Claim '{claim}' collides with a registered claim")]
    ReservedClaim {
        /// The offending claim key.
        claim: String,
    },

    /// The requested claim is not present in the token.
    #[error("Missing claim: {claim}")]
    MissingClaim {
        /// Name of the missing claim.
        claim: String,
    },

    /// The requested claim exists but cannot be read as the expected kind.
    #[error("Claim '{claim}' is not a {expected}")]
    ClaimType {
        /// Name of the claim.
        claim: String,
        /// The kind the caller asked for.
        expected: &'static str,
    },
}

impl TokenError {
    /// Creates a new `Validation` error.
    #[must_use]
    pub fn validation(cause: ValidationCause) -> Self {
        Self::Validation { cause }
    }

    /// Creates a new `Encoding` error.
    #[must_use]
    pub fn encoding_error(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    /// Creates a new `ReservedClaim` error.
    #[must_use]
    pub fn reserved_claim(claim: impl Into<String>) -> Self {
        Self::ReservedClaim {
            claim: claim.into(),
        }
    }

    /// Creates a new `MissingClaim` error.
    #[must_use]
    pub fn missing_claim(claim: impl Into<String>) -> Self {
        Self::MissingClaim {
            claim: claim.into(),
        }
    }

    /// Creates a new `ClaimType` error.
    #[must_use]
    pub fn claim_type(claim: impl Into<String>, expected: &'static str) -> Self {
        Self::ClaimType {
            claim: claim.into(),
            expected,
        }
    }

    /// Returns `true` if the token itself was rejected (bad signature,
    /// structural corruption, wrong issuer, or expiry).
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns `true` if a validated token lacked the requested claim or
    /// carried it with an incompatible type.
    #[must_use]
    pub fn is_coercion_error(&self) -> bool {
        matches!(self, Self::MissingClaim { .. } | Self::ClaimType { .. })
    }
}

/// The underlying reason a token failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationCause {
    /// The token's expiration is at or before the current time.
    Expired,

    /// The signature does not match the payload under the shared key.
    InvalidSignature,

    /// The token was issued by a different issuer.
    IssuerMismatch,

    /// The token is structurally unusable: truncated segments, malformed
    /// base64 or JSON, an unsupported header algorithm, or missing
    /// registered claims.
    Malformed(String),
}

impl fmt::Display for ValidationCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expired => write!(f, "token expired"),
            Self::InvalidSignature => write!(f, "invalid signature"),
            Self::IssuerMismatch => write!(f, "issuer mismatch"),
            Self::Malformed(message) => write!(f, "malformed token: {message}"),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => Self::validation(ValidationCause::Expired),
            ErrorKind::InvalidSignature => Self::validation(ValidationCause::InvalidSignature),
            ErrorKind::InvalidIssuer => Self::validation(ValidationCause::IssuerMismatch),
            _ => Self::validation(ValidationCause::Malformed(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_predicates() {
        assert!(TokenError::validation(ValidationCause::Expired).is_validation_error());
        assert!(TokenError::validation(ValidationCause::InvalidSignature).is_validation_error());
        assert!(!TokenError::missing_claim("role").is_validation_error());

        assert!(TokenError::missing_claim("role").is_coercion_error());
        assert!(TokenError::claim_type("role", "string").is_coercion_error());
        assert!(!TokenError::validation(ValidationCause::Expired).is_coercion_error());
        assert!(!TokenError::EmptySubject.is_coercion_error());
    }

    #[test]
    fn test_validation_error_display_preserves_cause() {
        let err = TokenError::validation(ValidationCause::Expired);
        assert_eq!(err.to_string(), "Invalid token: token expired");

        let err = TokenError::validation(ValidationCause::Malformed("bad base64".to_string()));
        assert_eq!(err.to_string(), "Invalid token: malformed token: bad base64");
    }

    #[test]
    fn test_coercion_error_display() {
        let err = TokenError::missing_claim("username");
        assert_eq!(err.to_string(), "Missing claim: username");

        let err = TokenError::claim_type("username", "integer");
        assert_eq!(err.to_string(), "Claim 'username' is not a integer");
    }

    #[test]
    fn test_validation_cause_display() {
        assert_eq!(ValidationCause::Expired.to_string(), "token expired");
        assert_eq!(
            ValidationCause::InvalidSignature.to_string(),
            "invalid signature"
        );
        assert_eq!(ValidationCause::IssuerMismatch.to_string(), "issuer mismatch");
    }
}

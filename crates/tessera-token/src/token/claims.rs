//! Claim payload types for issued tokens.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;

/// Registered claim names managed by the authority.
///
/// Caller-supplied claims must not use these keys; issuance rejects the
/// request rather than silently overwriting a registered field.
pub const RESERVED_CLAIMS: [&str; 4] = ["sub", "iss", "iat", "exp"];

/// An ephemeral request to issue a token for a subject.
///
/// Pairs a subject identifier with an arbitrary claim mapping. The request
/// exists only for the duration of one issuance call and is never stored.
///
/// # Example
///
/// ```ignore
/// let request = TokenRequest::new("user@example.com")
///     .with_claim("role", "admin")
///     .with_claim("user_id", 123);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRequest {
    subject: String,
    claims: Map<String, Value>,
}

impl TokenRequest {
    /// Creates a new request for the given subject with no claims.
    #[must_use]
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            claims: Map::new(),
        }
    }

    /// Adds a single claim.
    #[must_use]
    pub fn with_claim(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.claims.insert(key.into(), value.into());
        self
    }

    /// Replaces the claim mapping wholesale.
    #[must_use]
    pub fn with_claims(mut self, claims: Map<String, Value>) -> Self {
        self.claims = claims;
        self
    }

    /// Returns the subject identifier.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the claim mapping.
    #[must_use]
    pub fn claims(&self) -> &Map<String, Value> {
        &self.claims
    }
}

/// The decoded, signature-checked payload of a validated token.
///
/// Registered claims are typed fields; caller-supplied claims sit at the
/// same structural level on the wire and are collected into [`Self::custom`]
/// on decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims {
    /// Subject identifier.
    pub sub: String,

    /// Issuer.
    pub iss: String,

    /// Issued-at (Unix timestamp, seconds).
    pub iat: i64,

    /// Expiration (Unix timestamp, seconds).
    pub exp: i64,

    /// Caller-supplied claims, flattened to the payload top level.
    #[serde(flatten)]
    pub custom: Map<String, Value>,
}

impl TokenClaims {
    /// Looks up a claim by name, covering both registered fields and
    /// caller-supplied claims.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        match name {
            "sub" => Some(Value::String(self.sub.clone())),
            "iss" => Some(Value::String(self.iss.clone())),
            "iat" => Some(Value::from(self.iat)),
            "exp" => Some(Value::from(self.exp)),
            other => self.custom.get(other).cloned(),
        }
    }

    /// Returns `true` if the expiration is at or before the current time.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        OffsetDateTime::now_utc().unix_timestamp() >= self.exp
    }
}

/// A scalar kind a claim value can be extracted as.
///
/// Implemented for the fixed set of supported kinds: `String`, `i64`,
/// `bool`, and `f64`. Extraction failure is reported as
/// [`TokenError::ClaimType`](crate::error::TokenError::ClaimType) naming
/// [`Self::KIND`].
pub trait ClaimValue: Sized {
    /// Kind name used in coercion error messages.
    const KIND: &'static str;

    /// Attempts to read `value` as this kind.
    fn from_claim(value: &Value) -> Option<Self>;
}

impl ClaimValue for String {
    const KIND: &'static str = "string";

    fn from_claim(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl ClaimValue for i64 {
    const KIND: &'static str = "integer";

    fn from_claim(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl ClaimValue for bool {
    const KIND: &'static str = "boolean";

    fn from_claim(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl ClaimValue for f64 {
    const KIND: &'static str = "float";

    fn from_claim(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_claims() -> TokenClaims {
        let mut custom = Map::new();
        custom.insert("role".to_string(), json!("admin"));
        custom.insert("user_id".to_string(), json!(123));

        TokenClaims {
            sub: "user@example.com".to_string(),
            iss: "tessera".to_string(),
            iat: 1_700_000_000,
            exp: 1_700_003_600,
            custom,
        }
    }

    #[test]
    fn test_request_builder() {
        let request = TokenRequest::new("user@example.com")
            .with_claim("role", "admin")
            .with_claim("user_id", 123);

        assert_eq!(request.subject(), "user@example.com");
        assert_eq!(request.claims().len(), 2);
        assert_eq!(request.claims()["role"], json!("admin"));
        assert_eq!(request.claims()["user_id"], json!(123));
    }

    #[test]
    fn test_custom_claims_flatten_to_top_level() {
        let claims = sample_claims();
        let json = serde_json::to_string(&claims).unwrap();

        assert!(json.contains("\"sub\":\"user@example.com\""));
        assert!(json.contains("\"role\":\"admin\""));
        assert!(json.contains("\"user_id\":123"));
        assert!(!json.contains("custom"));
    }

    #[test]
    fn test_flattened_payload_round_trips() {
        let claims = sample_claims();
        let json = serde_json::to_string(&claims).unwrap();
        let decoded: TokenClaims = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, claims);
        assert_eq!(decoded.custom["role"], json!("admin"));
    }

    #[test]
    fn test_get_covers_registered_and_custom_claims() {
        let claims = sample_claims();

        assert_eq!(claims.get("sub"), Some(json!("user@example.com")));
        assert_eq!(claims.get("iss"), Some(json!("tessera")));
        assert_eq!(claims.get("iat"), Some(json!(1_700_000_000)));
        assert_eq!(claims.get("role"), Some(json!("admin")));
        assert_eq!(claims.get("absent"), None);
    }

    #[test]
    fn test_claim_value_conversions() {
        assert_eq!(String::from_claim(&json!("john_doe")), Some("john_doe".to_string()));
        assert_eq!(i64::from_claim(&json!(123)), Some(123));
        assert_eq!(bool::from_claim(&json!(true)), Some(true));
        assert_eq!(f64::from_claim(&json!(1.5)), Some(1.5));

        assert_eq!(i64::from_claim(&json!("123")), None);
        assert_eq!(String::from_claim(&json!(123)), None);
        assert_eq!(bool::from_claim(&json!("true")), None);
    }

    #[test]
    fn test_integer_claims_read_as_float() {
        // JSON does not distinguish 123 from 123.0; integral values are
        // readable through the float kind.
        assert_eq!(f64::from_claim(&json!(123)), Some(123.0));
    }
}

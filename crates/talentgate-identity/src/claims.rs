//! The decodable claims segment of a bearer token.
//!
//! A token is a compact signed string with three dot-separated segments:
//! `header.claims.signature`. The browser never verifies the signature —
//! that is the backend's job on every request — but it does read the
//! middle segment (base64url-encoded JSON) to check expiry and to
//! cross-check the stored user record against what was actually issued.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use crate::{TokenError, UserId};

/// The claims this layer consumes from the token payload.
///
/// The payload is untyped JSON from a third party, decoded into a
/// strict schema: `#[serde(deny_unknown_fields)]` plus three required
/// fields means a missing, extra, or mismatched field is a decode
/// failure — never a silent pass-through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    /// Expiration, in epoch seconds. A token is unusable at or past
    /// this instant.
    pub exp: u64,

    /// The id this token was issued to. Must match the stored record.
    #[serde(rename = "userId")]
    pub user_id: UserId,

    /// The role this token was issued for. Must match the stored record.
    pub role: String,
}

impl Claims {
    /// Decodes the claims segment of a compact token.
    ///
    /// # Errors
    /// - [`TokenError::SegmentCount`] — not exactly three segments
    /// - [`TokenError::Base64`] — claims segment is not base64url
    /// - [`TokenError::Schema`] — decoded bytes don't match the schema
    pub fn decode(token: &str) -> Result<Claims, TokenError> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 {
            return Err(TokenError::SegmentCount {
                found: segments.len(),
            });
        }

        let bytes = URL_SAFE_NO_PAD.decode(segments[1])?;
        let claims = serde_json::from_slice(&bytes)?;
        Ok(claims)
    }

    /// Returns `true` if this token is expired at `now` (epoch seconds).
    ///
    /// Expiry is inclusive: a token whose `exp` equals the current
    /// second is already unusable.
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.exp <= now
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a three-segment token with the given JSON claims payload.
    /// Header and signature are structurally present but never read.
    fn token_with_claims(claims_json: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let claims = URL_SAFE_NO_PAD.encode(claims_json.as_bytes());
        format!("{header}.{claims}.sig")
    }

    #[test]
    fn test_decode_valid_token_returns_claims() {
        let token = token_with_claims(
            r#"{"exp":1900000000,"userId":42,"role":"employee"}"#,
        );
        let claims = Claims::decode(&token).unwrap();
        assert_eq!(claims.exp, 1_900_000_000);
        assert_eq!(claims.user_id, UserId::Number(42));
        assert_eq!(claims.role, "employee");
    }

    #[test]
    fn test_decode_string_user_id() {
        let token = token_with_claims(
            r#"{"exp":1900000000,"userId":"usr_9f3","role":"admin"}"#,
        );
        let claims = Claims::decode(&token).unwrap();
        assert_eq!(claims.user_id, UserId::Text("usr_9f3".into()));
    }

    #[test]
    fn test_decode_two_segments_fails() {
        let result = Claims::decode("header.claims");
        assert!(matches!(
            result,
            Err(TokenError::SegmentCount { found: 2 })
        ));
    }

    #[test]
    fn test_decode_four_segments_fails() {
        let result = Claims::decode("a.b.c.d");
        assert!(matches!(
            result,
            Err(TokenError::SegmentCount { found: 4 })
        ));
    }

    #[test]
    fn test_decode_empty_string_fails() {
        // "".split('.') yields one empty segment, not zero.
        let result = Claims::decode("");
        assert!(matches!(
            result,
            Err(TokenError::SegmentCount { found: 1 })
        ));
    }

    #[test]
    fn test_decode_claims_segment_not_base64_fails() {
        let result = Claims::decode("header.!!not-base64!!.sig");
        assert!(matches!(result, Err(TokenError::Base64(_))));
    }

    #[test]
    fn test_decode_claims_segment_not_json_fails() {
        let claims = URL_SAFE_NO_PAD.encode(b"just some text");
        let token = format!("h.{claims}.s");
        assert!(matches!(
            Claims::decode(&token),
            Err(TokenError::Schema(_))
        ));
    }

    #[test]
    fn test_decode_missing_exp_fails() {
        let token =
            token_with_claims(r#"{"userId":42,"role":"employee"}"#);
        assert!(matches!(
            Claims::decode(&token),
            Err(TokenError::Schema(_))
        ));
    }

    #[test]
    fn test_decode_missing_role_fails() {
        let token = token_with_claims(r#"{"exp":1900000000,"userId":42}"#);
        assert!(matches!(
            Claims::decode(&token),
            Err(TokenError::Schema(_))
        ));
    }

    #[test]
    fn test_decode_unknown_extra_field_fails() {
        // Strict schema: an extra claim is a decode failure too.
        let token = token_with_claims(
            r#"{"exp":1900000000,"userId":42,"role":"employee","iat":1}"#,
        );
        assert!(matches!(
            Claims::decode(&token),
            Err(TokenError::Schema(_))
        ));
    }

    #[test]
    fn test_decode_non_numeric_exp_fails() {
        let token = token_with_claims(
            r#"{"exp":"tomorrow","userId":42,"role":"employee"}"#,
        );
        assert!(matches!(
            Claims::decode(&token),
            Err(TokenError::Schema(_))
        ));
    }

    #[test]
    fn test_is_expired_at_boundary_is_inclusive() {
        let claims = Claims {
            exp: 1000,
            user_id: UserId::Number(1),
            role: "employee".into(),
        };
        assert!(!claims.is_expired_at(999));
        assert!(claims.is_expired_at(1000), "exp == now is expired");
        assert!(claims.is_expired_at(1001));
    }
}

//! Test-token fixtures (feature `fixture`).
//!
//! Validator and guard tests need realistic three-segment tokens, but a
//! signing dependency would be pure ballast — nothing in this layer ever
//! verifies a signature. The builder here assembles an *unsigned* token:
//! a real header, real base64url claims, and a random signature segment
//! that is structurally present and semantically meaningless.
//!
//! Not for production use. Feature-gated so it stays out of normal builds.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;

use crate::UserId;

/// Builds an unsigned bearer token with chosen claims.
///
/// Defaults: user id `1`, role `employee`, expiry one hour from now.
///
/// # Example
///
/// ```rust
/// use talentgate_identity::{Claims, fixture::TokenBuilder};
///
/// let token = TokenBuilder::new()
///     .user_id(42u64)
///     .role("company")
///     .expires_in(600)
///     .build();
///
/// let claims = Claims::decode(&token).unwrap();
/// assert_eq!(claims.role, "company");
/// ```
#[derive(Debug, Clone)]
pub struct TokenBuilder {
    user_id: UserId,
    role: String,
    exp: u64,
}

impl TokenBuilder {
    /// A builder with default claims: user `1`, role `employee`,
    /// expiring one hour from now.
    pub fn new() -> Self {
        Self {
            user_id: UserId::Number(1),
            role: "employee".to_string(),
            exp: now_secs() + 3600,
        }
    }

    /// Sets the `userId` claim.
    pub fn user_id(mut self, user_id: impl Into<UserId>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Sets the `role` claim. Takes a raw string so tests can mint
    /// tokens for roles the platform doesn't know.
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Sets `exp` relative to now. Negative values produce an
    /// already-expired token.
    pub fn expires_in(mut self, secs: i64) -> Self {
        self.exp = now_secs().saturating_add_signed(secs);
        self
    }

    /// Sets `exp` to an absolute epoch-seconds value.
    pub fn expires_at(mut self, exp: u64) -> Self {
        self.exp = exp;
        self
    }

    /// Assembles the compact token string.
    pub fn build(self) -> String {
        let header =
            URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);

        let claims = serde_json::json!({
            "exp": self.exp,
            "userId": self.user_id,
            "role": self.role,
        });
        let claims = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());

        // 32 random bytes where a real signature would sit. Nothing in
        // this layer reads it, but the segment must be present for the
        // token to have the compact three-part shape.
        let sig_bytes: [u8; 32] = rand::rng().random();
        let signature = URL_SAFE_NO_PAD.encode(sig_bytes);

        format!("{header}.{claims}.{signature}")
    }
}

impl Default for TokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

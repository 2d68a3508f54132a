//! Error types for the session layer.

use talentgate_identity::TokenError;
use talentgate_store::StoreError;

/// Errors that can occur while establishing a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The credential exchange (login or OTP verification) was rejected
    /// by the backend or failed in transit.
    #[error("credential exchange failed: {0}")]
    ExchangeFailed(String),

    /// The store refused a write — in practice, an empty token in the
    /// login payload.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Why a stored session failed validation.
///
/// Callers of [`Session::is_authenticated`](crate::Session::is_authenticated)
/// only see `false` — every one of these resolves to "unauthenticated,
/// store cleared". The variants exist so logs say which check tripped.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// No token is stored (or it aged past the freshness ceiling).
    #[error("no usable token is stored")]
    MissingToken,

    /// No user record is stored (or it was malformed and removed).
    #[error("no user record is stored")]
    MissingUser,

    /// The explicit logged-in flag is not set.
    #[error("logged-in flag is not set")]
    NotLoggedIn,

    /// The token itself could not be decoded.
    #[error("token is not decodable: {0}")]
    Token(#[from] TokenError),

    /// The token's `exp` claim is at or before the current time.
    #[error("token expired at {exp} (now {now})")]
    Expired {
        /// The claim's expiry, epoch seconds.
        exp: u64,
        /// The wall clock at check time, epoch seconds.
        now: u64,
    },

    /// The stored user's id differs from the token's `userId` claim.
    #[error("token and user record disagree on identity")]
    IdentityMismatch,

    /// The stored user's role differs from the token's `role` claim.
    #[error("token and user record disagree on role")]
    RoleMismatch,
}

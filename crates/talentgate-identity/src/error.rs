//! Error types for the identity layer.
//!
//! Each crate in Talentgate defines its own error enum. A `TokenError`
//! always means "the credential itself could not be read" — not that it
//! was expired or inconsistent with the stored user (those are session
//! concerns, reported by the validator).

/// Errors that can occur while decoding a bearer token.
///
/// `#[derive(thiserror::Error)]` auto-generates the `std::error::Error`
/// implementation; the `#[error("...")]` attributes are the messages that
/// show up in logs when a decode fails.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The token does not have the compact three-segment shape
    /// (`header.claims.signature`). Anything else is not a credential
    /// we can read.
    #[error("token must have three dot-separated segments, found {found}")]
    SegmentCount {
        /// How many segments the malformed token actually had.
        found: usize,
    },

    /// The claims segment is not valid base64url.
    #[error("claims segment is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The claims segment decoded to bytes, but those bytes are not the
    /// strict claims schema: not JSON, a missing required field, a type
    /// mismatch, or an unknown extra field. All of these are decode
    /// failures, never a silent pass-through.
    #[error("claims do not match the expected schema: {0}")]
    Schema(#[from] serde_json::Error),
}

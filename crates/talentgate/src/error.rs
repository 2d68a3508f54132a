//! Unified error type for the Talentgate facade.

use talentgate_identity::TokenError;
use talentgate_session::SessionError;
use talentgate_store::StoreError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `talentgate` meta-crate, you deal with this single
/// error type instead of importing errors from each sub-crate. The
/// `#[from]` attribute on each variant auto-generates `From` impls, so
/// the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum TalentgateError {
    /// A storage-level error (rejected write).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A token-level error (segment shape, base64, claims schema).
    #[error(transparent)]
    Token(#[from] TokenError),

    /// A session-level error (exchange failure, establishment).
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_store_error() {
        let err = StoreError::EmptyToken;
        let top: TalentgateError = err.into();
        assert!(matches!(top, TalentgateError::Store(_)));
        assert!(top.to_string().contains("empty token"));
    }

    #[test]
    fn test_from_token_error() {
        let err = TokenError::SegmentCount { found: 2 };
        let top: TalentgateError = err.into();
        assert!(matches!(top, TalentgateError::Token(_)));
    }

    #[test]
    fn test_from_session_error() {
        let err = SessionError::ExchangeFailed("nope".into());
        let top: TalentgateError = err.into();
        assert!(matches!(top, TalentgateError::Session(_)));
        assert!(top.to_string().contains("nope"));
    }
}

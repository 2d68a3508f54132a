//! Error types for the storage layer.
//!
//! Reads never fail (absence and corruption both degrade to `None`,
//! with cleanup), so only a write can be rejected.

/// Errors that can occur while writing session state.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Refused to store an empty token. An empty credential can never
    /// authenticate, and persisting one would leave the store in the
    /// half-populated state the session invariant forbids.
    #[error("refusing to store an empty token")]
    EmptyToken,
}

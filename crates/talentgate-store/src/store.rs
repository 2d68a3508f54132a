//! The session store: typed persistence for the browser session.
//!
//! This is the only component that touches the key-value backend. It
//! keeps four things: the bearer token, the instant the token was
//! stored, the user record, and the logged-in flag. The session
//! invariant is that all four are present and mutually consistent, or
//! none are — every failure path here and in the validator above ends
//! in [`SessionStore::clear`].

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use talentgate_identity::UserRecord;

use crate::{StorageBackend, StoreError};

/// Storage keys, matching the browser application's `localStorage`
/// schema so a session written by one implementation is readable by the
/// other.
mod keys {
    pub const TOKEN: &str = "token";
    pub const TOKEN_SET_AT: &str = "tokenSetAt";
    pub const USER: &str = "user";
    pub const USER_ROLE: &str = "userRole";
    pub const LOGGED_IN: &str = "isLoggedIn";
    pub const RETURN_PATH: &str = "lastVisitedPage";
}

// ---------------------------------------------------------------------------
// StoreConfig
// ---------------------------------------------------------------------------

/// Configuration for session persistence.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Proactive freshness ceiling: how long a stored token is served
    /// before the store clears it on read, regardless of the token's
    /// own `exp` claim.
    ///
    /// The backend issues 24-hour tokens; the default ceiling of 23
    /// hours retires them an hour early so the user re-authenticates
    /// before the backend starts rejecting requests mid-session. This
    /// is a policy constant, not derived from the token.
    pub token_max_age: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            token_max_age: Duration::from_secs(23 * 60 * 60),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionStore
// ---------------------------------------------------------------------------

/// Typed session persistence over a [`StorageBackend`].
///
/// All mutations are synchronous and immediately durable. Reads never
/// panic and never propagate parse errors: a malformed stored value is
/// deleted as a side effect and reported as absent.
pub struct SessionStore<B: StorageBackend> {
    backend: B,
    config: StoreConfig,
}

impl<B: StorageBackend> SessionStore<B> {
    /// Creates a store with the default 23-hour freshness ceiling.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, StoreConfig::default())
    }

    /// Creates a store with an explicit config.
    pub fn with_config(backend: B, config: StoreConfig) -> Self {
        Self { backend, config }
    }

    // -- Token ------------------------------------------------------------

    /// Stores a token and records the current wall-clock time as its
    /// issue time.
    ///
    /// # Errors
    /// Returns [`StoreError::EmptyToken`] for an empty token; nothing
    /// is written in that case.
    pub fn set_token(&mut self, token: &str) -> Result<(), StoreError> {
        if token.is_empty() {
            return Err(StoreError::EmptyToken);
        }
        self.backend.set(keys::TOKEN, token);
        self.backend
            .set(keys::TOKEN_SET_AT, &now_millis().to_string());
        tracing::debug!("token stored");
        Ok(())
    }

    /// Returns the stored token, enforcing the freshness ceiling.
    ///
    /// Absent when no token or no issue-time record is stored. When the
    /// elapsed time since issue exceeds the ceiling — or the issue-time
    /// record is unreadable — the store self-clears and reports absent,
    /// so the caller re-authenticates instead of presenting a credential
    /// that is about to die.
    pub fn token(&mut self) -> Option<String> {
        let token = self.backend.get(keys::TOKEN)?;

        let set_at = self.backend.get(keys::TOKEN_SET_AT)?;
        let Ok(set_at) = set_at.parse::<u128>() else {
            tracing::warn!("unreadable token timestamp, clearing token");
            self.remove_token();
            return None;
        };

        let age = now_millis().saturating_sub(set_at);
        if age > self.config.token_max_age.as_millis() {
            tracing::info!(
                age_secs = (age / 1000) as u64,
                "stored token past freshness ceiling, clearing"
            );
            self.remove_token();
            return None;
        }

        Some(token)
    }

    /// Removes the token, its issue time, and everything that only
    /// makes sense while a token exists. Idempotent.
    pub fn remove_token(&mut self) {
        self.backend.remove(keys::TOKEN);
        self.backend.remove(keys::TOKEN_SET_AT);
        self.backend.remove(keys::USER_ROLE);
        self.backend.remove(keys::LOGGED_IN);
    }

    // -- User record ------------------------------------------------------

    /// Stores the user record, plus the role string under its own key
    /// so [`SessionStore::cached_role`] works even while the full
    /// record is unreadable.
    pub fn set_user(&mut self, user: &UserRecord) {
        match serde_json::to_string(user) {
            Ok(json) => {
                self.backend.set(keys::USER, &json);
                self.backend.set(keys::USER_ROLE, &user.role);
                tracing::debug!(role = %user.role, "user record stored");
            }
            Err(error) => {
                // A record that can't be serialized can't satisfy the
                // all-or-nothing invariant; leave the store untouched.
                tracing::warn!(%error, "user record not serializable, skipped");
            }
        }
    }

    /// Returns the stored user record.
    ///
    /// A malformed record (unparsable, or missing a required field) is
    /// deleted as a side effect, not merely ignored — the next read
    /// starts from a clean slate.
    pub fn user(&mut self) -> Option<UserRecord> {
        let raw = self.backend.get(keys::USER)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(error) => {
                tracing::warn!(%error, "malformed user record, clearing");
                self.remove_user();
                None
            }
        }
    }

    /// Removes the user record and the flags tied to it. Idempotent.
    pub fn remove_user(&mut self) {
        self.backend.remove(keys::USER);
        self.backend.remove(keys::USER_ROLE);
        self.backend.remove(keys::LOGGED_IN);
    }

    /// The separately cached role string, used as a fallback when the
    /// full record is gone.
    pub fn cached_role(&self) -> Option<String> {
        self.backend.get(keys::USER_ROLE)
    }

    // -- Logged-in flag ---------------------------------------------------

    /// Sets the explicit logged-in flag.
    pub fn mark_logged_in(&mut self) {
        self.backend.set(keys::LOGGED_IN, "true");
    }

    /// Whether the logged-in flag is set.
    pub fn is_marked_logged_in(&self) -> bool {
        self.backend.get(keys::LOGGED_IN).is_some()
    }

    // -- Whole-session lifecycle ------------------------------------------

    /// Deletes every session key. Idempotent, safe when nothing is
    /// stored. This is the single exit point for every failure path.
    pub fn clear(&mut self) {
        self.remove_token();
        self.remove_user();
        tracing::debug!("session storage cleared");
    }

    // -- Return path ------------------------------------------------------

    /// Remembers the path a redirected-to-login user was trying to
    /// reach, for post-login return.
    pub fn set_return_path(&mut self, path: &str) {
        self.backend.set(keys::RETURN_PATH, path);
    }

    /// The remembered return path, if any.
    pub fn return_path(&self) -> Option<String> {
        self.backend.get(keys::RETURN_PATH)
    }

    /// Takes the remembered return path, clearing it.
    pub fn take_return_path(&mut self) -> Option<String> {
        let path = self.backend.get(keys::RETURN_PATH);
        self.backend.remove(keys::RETURN_PATH);
        path
    }

    /// Forgets the remembered return path.
    pub fn clear_return_path(&mut self) {
        self.backend.remove(keys::RETURN_PATH);
    }
}

/// Current wall clock as epoch milliseconds. A clock before the epoch
/// reads as 0, which makes every stored token look stale — fail closed.
fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Unit tests for `SessionStore`.
    //!
    //! Freshness-ceiling tests don't sleep and don't mock the clock:
    //! they either use a ceiling of hours (never trips during a test)
    //! or backdate the stored issue time directly through the backend.

    use super::*;
    use crate::MemoryStorage;

    fn store() -> SessionStore<MemoryStorage> {
        SessionStore::new(MemoryStorage::new())
    }

    fn employee() -> UserRecord {
        UserRecord::new("employee", "ada@example.test", 42u64)
    }

    /// Rewrites the issue-time record as if the token had been stored
    /// `age` ago.
    fn backdate_token(store: &mut SessionStore<MemoryStorage>, age: Duration) {
        let past = now_millis().saturating_sub(age.as_millis());
        store
            .backend
            .set(keys::TOKEN_SET_AT, &past.to_string());
    }

    // =====================================================================
    // set_token() / token()
    // =====================================================================

    #[test]
    fn test_set_token_then_token_round_trips() {
        let mut store = store();
        store.set_token("h.c.s").unwrap();
        assert_eq!(store.token(), Some("h.c.s".to_string()));
    }

    #[test]
    fn test_set_token_empty_is_rejected_and_writes_nothing() {
        let mut store = store();
        let result = store.set_token("");
        assert!(matches!(result, Err(StoreError::EmptyToken)));
        assert_eq!(store.token(), None);
        assert!(store.backend.is_empty(), "nothing may be written");
    }

    #[test]
    fn test_token_absent_when_never_stored() {
        assert_eq!(store().token(), None);
    }

    #[test]
    fn test_token_absent_when_issue_time_missing() {
        // A token without an issue-time record is unusable: the ceiling
        // can't be enforced, so the token is not served.
        let mut store = store();
        store.set_token("h.c.s").unwrap();
        store.backend.remove(keys::TOKEN_SET_AT);
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_token_within_ceiling_is_served() {
        let mut store = store();
        store.set_token("h.c.s").unwrap();
        backdate_token(&mut store, Duration::from_secs(22 * 60 * 60));
        assert_eq!(store.token(), Some("h.c.s".to_string()));
    }

    #[test]
    fn test_token_past_ceiling_clears_and_returns_absent() {
        let mut store = store();
        store.set_token("h.c.s").unwrap();
        backdate_token(&mut store, Duration::from_secs(24 * 60 * 60));

        assert_eq!(store.token(), None);
        // The clear is durable, not just a filtered read.
        assert_eq!(store.backend.get(keys::TOKEN), None);
        assert_eq!(store.backend.get(keys::TOKEN_SET_AT), None);
    }

    #[test]
    fn test_token_custom_ceiling_is_respected() {
        let mut store = SessionStore::with_config(
            MemoryStorage::new(),
            StoreConfig {
                token_max_age: Duration::from_secs(60),
            },
        );
        store.set_token("h.c.s").unwrap();
        backdate_token(&mut store, Duration::from_secs(120));
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_token_unreadable_issue_time_clears_token() {
        let mut store = store();
        store.set_token("h.c.s").unwrap();
        store.backend.set(keys::TOKEN_SET_AT, "yesterday");
        assert_eq!(store.token(), None);
        assert_eq!(store.backend.get(keys::TOKEN), None);
    }

    // =====================================================================
    // set_user() / user()
    // =====================================================================

    #[test]
    fn test_set_user_then_user_round_trips() {
        let mut store = store();
        let mut user = employee();
        user.full_name = "Ada Lovelace".into();
        user.extra
            .insert("phone".into(), serde_json::json!("555-0147"));

        store.set_user(&user);
        assert_eq!(store.user(), Some(user));
    }

    #[test]
    fn test_set_user_caches_role_separately() {
        let mut store = store();
        store.set_user(&employee());
        assert_eq!(store.cached_role(), Some("employee".to_string()));
    }

    #[test]
    fn test_user_absent_when_never_stored() {
        assert_eq!(store().user(), None);
    }

    #[test]
    fn test_user_malformed_json_is_deleted_not_ignored() {
        let mut store = store();
        store.backend.set(keys::USER, "{not json");
        assert_eq!(store.user(), None);
        assert_eq!(
            store.backend.get(keys::USER),
            None,
            "malformed record must be deleted as a side effect"
        );
    }

    #[test]
    fn test_user_missing_required_field_is_deleted() {
        let mut store = store();
        // Valid JSON, but no userId — fails the schema, so it goes.
        store
            .backend
            .set(keys::USER, r#"{"role":"employee","email":"a@b.c"}"#);
        assert_eq!(store.user(), None);
        assert_eq!(store.backend.get(keys::USER), None);
    }

    // =====================================================================
    // Flags and clears
    // =====================================================================

    #[test]
    fn test_logged_in_flag_round_trip() {
        let mut store = store();
        assert!(!store.is_marked_logged_in());
        store.mark_logged_in();
        assert!(store.is_marked_logged_in());
    }

    #[test]
    fn test_remove_token_drops_flag_and_cached_role() {
        let mut store = store();
        store.set_token("h.c.s").unwrap();
        store.set_user(&employee());
        store.mark_logged_in();

        store.remove_token();

        assert_eq!(store.token(), None);
        assert_eq!(store.cached_role(), None);
        assert!(!store.is_marked_logged_in());
        // The user record itself survives remove_token.
        assert!(store.user().is_some());
    }

    #[test]
    fn test_clear_removes_everything_and_is_idempotent() {
        let mut store = store();
        store.set_token("h.c.s").unwrap();
        store.set_user(&employee());
        store.mark_logged_in();

        store.clear();
        store.clear(); // safe when nothing is stored

        assert_eq!(store.token(), None);
        assert_eq!(store.user(), None);
        assert_eq!(store.cached_role(), None);
        assert!(!store.is_marked_logged_in());
    }

    // =====================================================================
    // Return path
    // =====================================================================

    #[test]
    fn test_return_path_round_trip() {
        let mut store = store();
        store.set_return_path("/admin-dashboard/users");
        assert_eq!(
            store.return_path(),
            Some("/admin-dashboard/users".to_string())
        );
    }

    #[test]
    fn test_take_return_path_clears_it() {
        let mut store = store();
        store.set_return_path("/jobs/17");
        assert_eq!(store.take_return_path(), Some("/jobs/17".to_string()));
        assert_eq!(store.return_path(), None);
        assert_eq!(store.take_return_path(), None);
    }

    #[test]
    fn test_return_path_survives_clear() {
        // Clearing a dead session must not forget where the user was
        // headed — that's what post-login return is for.
        let mut store = store();
        store.set_token("h.c.s").unwrap();
        store.set_return_path("/jobs/17");
        store.clear();
        assert_eq!(store.return_path(), Some("/jobs/17".to_string()));
    }
}

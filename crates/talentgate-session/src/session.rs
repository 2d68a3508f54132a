//! The session: establishment, validation, and teardown.
//!
//! One `Session` wraps one [`SessionStore`] and is the only component
//! that interprets what the store holds. Its central operation is
//! [`Session::validate`], a pure read of the stored state that either
//! proves the browser is authenticated or says exactly why it isn't.
//! [`Session::is_authenticated`] is the fail-closed wrapper the rest of
//! the application uses: any failure clears the store and reads as
//! `false`, never as an exception.

use std::time::{SystemTime, UNIX_EPOCH};

use talentgate_identity::{AuthPayload, Claims, Role, UserRecord, routes};
use talentgate_store::{SessionStore, StorageBackend};

use crate::{CredentialExchange, Credentials, SessionError, ValidationError};

// ---------------------------------------------------------------------------
// SessionPolicy
// ---------------------------------------------------------------------------

/// How strictly a stored session is validated.
///
/// The platform shipped two generations of its login flow. Both
/// coexist here as named configurations of the same validator instead
/// of duplicated logic:
///
/// - **Hardened** (default, and what the rest of the documentation
///   describes): presence checks, claim decoding, expiry, and
///   token/user cross-checks.
/// - **Legacy**: the earlier flow's presence checks only — token, user
///   record, and logged-in flag exist. No claim decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPolicy {
    /// Full validation with claim decoding and cross-checks.
    #[default]
    Hardened,
    /// Presence checks only, as the superseded flow did.
    Legacy,
}

// ---------------------------------------------------------------------------
// ValidSession
// ---------------------------------------------------------------------------

/// Proof of a successful validation: the user record, and under the
/// hardened policy the decoded claims it was checked against.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSession {
    /// The stored user record.
    pub user: UserRecord,
    /// Decoded claims. `None` under [`SessionPolicy::Legacy`], which
    /// never decodes the token.
    pub claims: Option<Claims>,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The browser's authentication state, as far as this tab knows.
///
/// ## Lifecycle
///
/// ```text
/// login()/establish() ──→ is_authenticated() ──→ logout()
///                              │       ▲
///                  (any check fails)   │ re-login
///                              ▼       │
///                         [store cleared]
/// ```
pub struct Session<B: StorageBackend> {
    store: SessionStore<B>,
    policy: SessionPolicy,
}

impl<B: StorageBackend> Session<B> {
    /// Wraps a store with the default hardened policy.
    pub fn new(store: SessionStore<B>) -> Self {
        Self::with_policy(store, SessionPolicy::default())
    }

    /// Wraps a store with an explicit policy.
    pub fn with_policy(store: SessionStore<B>, policy: SessionPolicy) -> Self {
        Self { store, policy }
    }

    /// The underlying store.
    pub fn store(&self) -> &SessionStore<B> {
        &self.store
    }

    /// Mutable access to the underlying store (the guard uses this to
    /// remember the attempted path).
    pub fn store_mut(&mut self) -> &mut SessionStore<B> {
        &mut self.store
    }

    // -- Establishment ----------------------------------------------------

    /// Persists a successful login/OTP response: token, normalized user
    /// record, and the logged-in flag. The only way a session comes
    /// into being.
    ///
    /// # Errors
    /// Returns [`SessionError::Store`] for an empty token; nothing is
    /// persisted in that case.
    pub fn establish(&mut self, payload: &AuthPayload) -> Result<(), SessionError> {
        self.store.set_token(&payload.token)?;
        self.store.set_user(&payload.user_record());
        self.store.mark_logged_in();
        tracing::info!(role = %payload.role, user_id = %payload.user_id, "session established");
        Ok(())
    }

    /// Runs the full login flow: exchanges credentials via `exchange`,
    /// then establishes the session from the payload.
    ///
    /// Returns the normalized user record on success.
    pub async fn login<E: CredentialExchange>(
        &mut self,
        exchange: &E,
        credentials: &Credentials,
    ) -> Result<UserRecord, SessionError> {
        let payload = exchange.exchange(credentials).await?;
        self.establish(&payload)?;
        Ok(payload.user_record())
    }

    // -- Validation -------------------------------------------------------

    /// Checks the stored session against the configured policy.
    ///
    /// Side-effect-free: failing a check reports *why* but clears
    /// nothing. [`Session::is_authenticated`] layers the fail-closed
    /// clearing on top.
    ///
    /// # Errors
    /// One [`ValidationError`] variant per check, in the order the
    /// checks run: presence, decodability, expiry, consistency.
    pub fn validate(&mut self) -> Result<ValidSession, ValidationError> {
        let token = self.store.token().ok_or(ValidationError::MissingToken)?;
        let user = self.store.user().ok_or(ValidationError::MissingUser)?;
        if !self.store.is_marked_logged_in() {
            return Err(ValidationError::NotLoggedIn);
        }

        if self.policy == SessionPolicy::Legacy {
            return Ok(ValidSession { user, claims: None });
        }

        let claims = Claims::decode(&token)?;

        let now = now_secs();
        if claims.is_expired_at(now) {
            return Err(ValidationError::Expired {
                exp: claims.exp,
                now,
            });
        }

        // The record is only trustworthy if it matches what the backend
        // actually issued. A divergence means the store was tampered
        // with or got out of sync — either way the pair is worthless.
        if claims.user_id != user.user_id {
            return Err(ValidationError::IdentityMismatch);
        }
        if claims.role != user.role {
            return Err(ValidationError::RoleMismatch);
        }

        Ok(ValidSession {
            user,
            claims: Some(claims),
        })
    }

    /// Whether the browser currently holds a usable session.
    ///
    /// Fail closed: on any validation failure the entire store is
    /// cleared before returning `false`, so the next check starts from
    /// a clean slate instead of re-tripping over half a session. On
    /// success this is side-effect-free.
    pub fn is_authenticated(&mut self) -> bool {
        match self.validate() {
            Ok(_) => true,
            Err(reason) => {
                tracing::info!(%reason, "session validation failed, clearing");
                self.store.clear();
                false
            }
        }
    }

    /// Restores a session at page load: validates what's stored and
    /// hands back the user record, clearing on any failure.
    pub fn restore(&mut self) -> Option<UserRecord> {
        match self.validate() {
            Ok(valid) => {
                tracing::info!(
                    email = %valid.user.email,
                    role = %valid.user.role,
                    "session restored"
                );
                Some(valid.user)
            }
            Err(reason) => {
                tracing::info!(%reason, "no restorable session");
                self.store.clear();
                None
            }
        }
    }

    // -- Role queries -----------------------------------------------------

    /// The current role string: from the stored user record, falling
    /// back to the separately cached role.
    pub fn user_role(&mut self) -> Option<String> {
        self.store
            .user()
            .map(|user| user.role)
            .or_else(|| self.store.cached_role())
    }

    /// Whether the current role is exactly `role`.
    pub fn has_role(&mut self, role: Role) -> bool {
        self.user_role().as_deref() == Some(role.as_str())
    }

    /// Whether the current role is any of `roles`.
    pub fn has_any_role(&mut self, roles: &[Role]) -> bool {
        match self.user_role() {
            Some(current) => {
                roles.iter().any(|role| role.as_str() == current)
            }
            None => false,
        }
    }

    /// Admin or super admin.
    pub fn is_admin(&mut self) -> bool {
        self.has_any_role(&[Role::Admin, Role::SuperAdmin])
    }

    /// Super admin only.
    pub fn is_super_admin(&mut self) -> bool {
        self.has_role(Role::SuperAdmin)
    }

    /// Employee (job seeker).
    pub fn is_employee(&mut self) -> bool {
        self.has_role(Role::Employee)
    }

    /// Company (employer).
    pub fn is_company(&mut self) -> bool {
        self.has_role(Role::Company)
    }

    // -- Permission checks ------------------------------------------------
    // The admin console's capability matrix: both administrative roles
    // can read and create; destructive operations and user management
    // need a super admin.

    /// View administrative data.
    pub fn can_view(&mut self) -> bool {
        self.is_admin()
    }

    /// Create administrative records.
    pub fn can_create(&mut self) -> bool {
        self.is_admin()
    }

    /// Edit existing records.
    pub fn can_edit(&mut self) -> bool {
        self.is_super_admin()
    }

    /// Delete records.
    pub fn can_delete(&mut self) -> bool {
        self.is_super_admin()
    }

    /// Manage other user accounts.
    pub fn can_manage_users(&mut self) -> bool {
        self.is_super_admin()
    }

    // -- Backend integration ----------------------------------------------

    /// Headers for an authenticated request: bearer authorization (empty
    /// when no usable token is stored) plus the JSON content headers.
    pub fn auth_headers(&mut self) -> [(&'static str, String); 3] {
        let authorization = match self.store.token() {
            Some(token) => format!("Bearer {token}"),
            None => String::new(),
        };
        [
            ("Authorization", authorization),
            ("Content-Type", "application/json".to_string()),
            ("Accept", "application/json".to_string()),
        ]
    }

    /// Feeds back the status of an authenticated call. A `401` or `403`
    /// means the backend no longer honors the credential: the session is
    /// torn down and the login route returned so the caller can
    /// navigate there. Any other status is ignored.
    pub fn handle_response_status(&mut self, status: u16) -> Option<&'static str> {
        if status == 401 || status == 403 {
            tracing::warn!(status, "backend rejected credential, logging out");
            self.store.clear();
            self.store.clear_return_path();
            Some(routes::LOGIN)
        } else {
            None
        }
    }

    /// Logs out: clears all session state (including the remembered
    /// return path) and returns where to navigate — `redirect_to` if
    /// given, the login view otherwise. The caller performs the actual
    /// navigation.
    pub fn logout(&mut self, redirect_to: Option<&str>) -> String {
        tracing::info!("logging out");
        self.store.clear();
        self.store.clear_return_path();
        redirect_to.unwrap_or(routes::LOGIN).to_string()
    }
}

/// Current wall clock as epoch seconds; 0 for a pre-epoch clock, which
/// makes every token read as expired — fail closed.
fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

// =========================================================================
// Tests
// =========================================================================

//! The route guard: who may enter a protected view.
//!
//! Per navigation attempt the guard runs one check:
//!
//! ```text
//! Checking ──(not authenticated)──→ RedirectLogin (remembers the path)
//!     │
//!     ├──(no role required)────────→ Allow
//!     ├──(role matches)────────────→ Allow
//!     ├──(admin required,
//!     │    user is super_admin)────→ Allow
//!     ├──(known role, wrong one)───→ RedirectRole (their own dashboard)
//!     └──(unknown role)────────────→ RedirectUnauthorized
//! ```

use talentgate_identity::{Role, routes};
use talentgate_session::Session;
use talentgate_store::StorageBackend;

// ---------------------------------------------------------------------------
// GuardOutcome
// ---------------------------------------------------------------------------

/// The terminal state of one navigation check.
///
/// This is an intent, not an action: the caller renders on [`Allow`]
/// and navigates on the redirect variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Render the protected view.
    Allow,

    /// Send the user to the login view. `from` is the path they were
    /// trying to reach; it is also remembered in the store for
    /// post-login return.
    RedirectLogin {
        /// The attempted path.
        from: String,
    },

    /// Authenticated, wrong role, but the role is a known one: send
    /// them to their own landing page.
    RedirectRole {
        /// The user's own dashboard.
        to: &'static str,
    },

    /// Authenticated with a role this platform doesn't recognize.
    RedirectUnauthorized,
}

impl GuardOutcome {
    /// Whether this outcome renders the protected view.
    pub fn is_allow(&self) -> bool {
        matches!(self, GuardOutcome::Allow)
    }

    /// The navigation target for redirect outcomes, `None` for
    /// [`GuardOutcome::Allow`].
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            GuardOutcome::Allow => None,
            GuardOutcome::RedirectLogin { .. } => Some(routes::LOGIN),
            GuardOutcome::RedirectRole { to } => Some(to),
            GuardOutcome::RedirectUnauthorized => {
                Some(routes::UNAUTHORIZED)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// decide
// ---------------------------------------------------------------------------

/// Runs one navigation check.
///
/// `path` is the attempted route, `required` the role the view
/// declares (or `None` for any-authenticated-user views).
///
/// Fail closed: validation failures inside `is_authenticated` have
/// already cleared the session by the time this returns
/// [`GuardOutcome::RedirectLogin`].
pub fn decide<B: StorageBackend>(
    session: &mut Session<B>,
    path: &str,
    required: Option<Role>,
) -> GuardOutcome {
    if !session.is_authenticated() {
        session.store_mut().set_return_path(path);
        tracing::info!(path, "unauthenticated navigation, redirecting to login");
        return GuardOutcome::RedirectLogin {
            from: path.to_string(),
        };
    }

    let Some(required) = required else {
        return GuardOutcome::Allow;
    };

    // `user_role` can only be absent if the store mutated between the
    // two reads; treat that like any other unknown role.
    let role = session.user_role().unwrap_or_default();
    match Role::parse(&role) {
        Some(actual) if actual == required => GuardOutcome::Allow,
        // Super admin clears every admin gate.
        Some(Role::SuperAdmin) if required == Role::Admin => {
            GuardOutcome::Allow
        }
        Some(actual) => {
            tracing::info!(
                path,
                %required,
                %actual,
                "role requirement not met, redirecting to own dashboard"
            );
            GuardOutcome::RedirectRole {
                to: actual.dashboard(),
            }
        }
        None => {
            tracing::warn!(path, role, "unrecognized role at guarded route");
            GuardOutcome::RedirectUnauthorized
        }
    }
}

// ---------------------------------------------------------------------------
// RouteGuard
// ---------------------------------------------------------------------------

/// A guard that re-runs its check only when the navigation actually
/// changes.
///
/// Views re-render far more often than they navigate. The guard caches
/// the outcome per `(path, required)` key and replays it until either
/// changes; [`RouteGuard::invalidate`] forces a re-check after login
/// or logout mutates the session underneath.
#[derive(Debug, Default)]
pub struct RouteGuard {
    last: Option<(String, Option<Role>, GuardOutcome)>,
}

impl RouteGuard {
    /// A guard with no cached decision.
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks a navigation, reusing the cached outcome when neither
    /// the path nor the requirement changed.
    pub fn check<B: StorageBackend>(
        &mut self,
        session: &mut Session<B>,
        path: &str,
        required: Option<Role>,
    ) -> GuardOutcome {
        if let Some((cached_path, cached_required, outcome)) = &self.last {
            if cached_path == path && *cached_required == required {
                return outcome.clone();
            }
        }

        let outcome = decide(session, path, required);
        self.last = Some((path.to_string(), required, outcome.clone()));
        outcome
    }

    /// Drops the cached decision, forcing the next check to re-run.
    pub fn invalidate(&mut self) {
        self.last = None;
    }
}

// =========================================================================
// Tests
// =========================================================================

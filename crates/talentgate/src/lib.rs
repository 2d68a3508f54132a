//! # Talentgate
//!
//! Session and route-authorization toolkit for staffing-platform
//! front-ends.
//!
//! Talentgate models the client side of bearer-token authentication:
//! persisting the credential a backend issues at login, deciding whether
//! the browser is still authenticated (and as whom), and gating
//! navigation into role-protected views. It performs no I/O of its own —
//! storage sits behind a trait, the login round-trip behind another, and
//! every authorization decision is a pure value the host application
//! acts on.
//!
//! ## Quick Start
//!
//! ```rust
//! use talentgate::prelude::*;
//!
//! // One store per browser tab; MemoryStorage stands in for
//! // localStorage outside a browser.
//! let mut session = Session::new(SessionStore::new(MemoryStorage::new()));
//! let mut guard = RouteGuard::new();
//!
//! // Before login, every protected navigation bounces.
//! let outcome = guard.check(&mut session, "/jobs", Some(Role::Employee));
//! assert_eq!(outcome.redirect_target(), Some("/login"));
//! ```

mod error;

pub use error::TalentgateError;

pub use talentgate_guard::{GuardOutcome, RouteGuard, decide};
pub use talentgate_identity::{
    AuthPayload, Claims, Role, TokenError, UserId, UserRecord, routes,
};
pub use talentgate_session::{
    CredentialExchange, Credentials, Session, SessionError, SessionPolicy,
    ValidSession, ValidationError,
};
pub use talentgate_store::{
    MemoryStorage, SessionStore, StorageBackend, StoreConfig, StoreError,
};

/// Everything a host application typically imports.
pub mod prelude {
    pub use crate::{
        AuthPayload, CredentialExchange, Credentials, GuardOutcome,
        MemoryStorage, Role, RouteGuard, Session, SessionPolicy,
        SessionStore, StorageBackend, StoreConfig, TalentgateError,
        UserId, UserRecord, routes,
    };
}

//! Route authorization for Talentgate.
//!
//! The guard gates navigation into protected views. It never performs
//! navigation itself — "decide" and "act" are separate layers. The
//! decision is a pure [`GuardOutcome`] computed from already-stored
//! session state; the UI layer turns that intent into an actual
//! redirect. That split is what makes the decision logic testable
//! without any rendering environment.
//!
//! No error type lives here: the guard has no failure mode. Anything
//! that goes wrong while validating resolves to a redirect outcome
//! (fail closed), never to an `Err` and never to `Allow`.

mod guard;

pub use guard::{GuardOutcome, RouteGuard, decide};

// Re-exported so guard consumers get the route table without importing
// the identity crate themselves.
pub use talentgate_identity::routes;

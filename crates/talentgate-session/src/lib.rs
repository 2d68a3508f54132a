//! Session validation and lifecycle for Talentgate.
//!
//! This crate is the single source of truth for "is this browser
//! currently authenticated, and as whom":
//!
//! 1. **Establishment** — persisting a login/OTP response atomically
//!    ([`Session::establish`])
//! 2. **Validation** — token present, unexpired, consistent with the
//!    stored user ([`Session::is_authenticated`])
//! 3. **Teardown** — logout, and the 401/403 feedback path from the
//!    backend ([`Session::logout`], [`Session::handle_response_status`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Guard Layer (above)  ← asks "authenticated? which role?" per navigation
//!     ↕
//! Session Layer (this crate)  ← validates the stored credential
//!     ↕
//! Store Layer (below)  ← persists token, user record, flags
//! ```
//!
//! Every validation failure ends in a full store clear, so a later check
//! starts from a clean slate instead of flapping half-authenticated.

#![allow(async_fn_in_trait)]

mod error;
mod exchange;
mod session;

pub use error::{SessionError, ValidationError};
pub use exchange::{CredentialExchange, Credentials};
pub use session::{Session, SessionPolicy, ValidSession};

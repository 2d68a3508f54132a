//! Identity vocabulary for Talentgate.
//!
//! This crate defines the "language" that every other layer speaks:
//!
//! - **Types** ([`Role`], [`UserId`], [`UserRecord`], [`AuthPayload`]) —
//!   who a user is, as the backend reports it and the browser stores it.
//! - **Claims** ([`Claims`]) — the decodable JSON segment inside the
//!   bearer token, and the strict decoder for it.
//! - **Routes** ([`routes`]) — the canonical landing page for each role.
//! - **Errors** ([`TokenError`]) — what can go wrong while decoding.
//!
//! # Architecture
//!
//! The identity layer sits below everything else. It knows nothing about
//! storage or navigation — it only knows how to name users and how to
//! read the credential the backend issued for them.
//!
//! ```text
//! Guard (decisions) → Session (validation) → Store (persistence)
//!                 ↘        ↓        ↙
//!               Identity (this crate)
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod claims;
mod error;
pub mod routes;
mod types;

#[cfg(feature = "fixture")]
pub mod fixture;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

// `pub use` flattens the public API to the crate root, so consumers write
// `use talentgate_identity::Role` rather than digging through submodules.

pub use claims::Claims;
pub use error::TokenError;
pub use types::{AuthPayload, Role, UserId, UserRecord};

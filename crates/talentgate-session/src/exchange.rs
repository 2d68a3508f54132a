//! Credential-exchange hook: the login round-trip itself.
//!
//! Talentgate doesn't perform HTTP — the surrounding application owns
//! its fetch layer. Instead this crate defines the [`CredentialExchange`]
//! trait: one async method that takes the user's credentials and returns
//! the backend's [`AuthPayload`] or an error. The application implements
//! it against its own HTTP client; [`Session::login`](crate::Session::login)
//! calls it and persists the result.
//!
//! # Why a trait?
//!
//! The same seam serves three implementations without touching session
//! code: the real backend call in production, a canned directory in the
//! demo, and a failing stub in tests.

use talentgate_identity::AuthPayload;

use crate::SessionError;

/// What the user typed at the login screen.
///
/// The hardened flow verifies a one-time code e-mailed after the
/// password step; both shapes end in the same [`AuthPayload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// First factor: account email and password.
    Password {
        /// Account email.
        email: String,
        /// Account password, passed through verbatim.
        password: String,
    },

    /// Second factor: the one-time code from the verification email.
    Otp {
        /// Account email the code was sent to.
        email: String,
        /// The one-time code.
        code: String,
    },
}

/// Performs the login/OTP round-trip against the backend.
///
/// # Trait bounds
///
/// - `Send + Sync` → the exchange can be shared with whatever task is
///   driving the login form.
/// - `'static` → it doesn't borrow temporary data; it lives as long as
///   the application.
pub trait CredentialExchange: Send + Sync + 'static {
    /// Exchanges credentials for a signed session payload.
    ///
    /// # Returns
    /// - `Ok(AuthPayload)` — the backend accepted the credentials
    /// - `Err(SessionError::ExchangeFailed)` — rejected, or unreachable
    fn exchange(
        &self,
        credentials: &Credentials,
    ) -> impl std::future::Future<Output = Result<AuthPayload, SessionError>> + Send;
}

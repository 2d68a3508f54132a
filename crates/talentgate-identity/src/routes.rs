//! Canonical routes and the role → landing-page mapping.
//!
//! The mapping is a total function: every input produces a defined
//! output, including role strings the platform has never heard of.
//! No I/O, no failure mode.

use crate::Role;

/// Generic fallback for anything without a better destination.
pub const ROOT: &str = "/";

/// The login view. Unauthenticated navigation lands here.
pub const LOGIN: &str = "/login";

/// Shown when an authenticated user's role is unrecognized.
pub const UNAUTHORIZED: &str = "/unauthorized";

/// Landing page for job seekers.
pub const EMPLOYEE_DASHBOARD: &str = "/employee-dashboard";

/// Landing page for employers.
pub const COMPANY_DASHBOARD: &str = "/company-dashboard";

/// Landing page shared by both administrative roles.
pub const ADMIN_DASHBOARD: &str = "/admin-dashboard";

impl Role {
    /// The canonical landing page for this role.
    pub fn dashboard(self) -> &'static str {
        match self {
            Role::Employee => EMPLOYEE_DASHBOARD,
            Role::Company => COMPANY_DASHBOARD,
            Role::Admin | Role::SuperAdmin => ADMIN_DASHBOARD,
        }
    }
}

/// Maps a raw role string to its landing page, defaulting to [`ROOT`]
/// for anything unrecognized.
pub fn dashboard_route(role: &str) -> &'static str {
    match Role::parse(role) {
        Some(role) => role.dashboard(),
        None => ROOT,
    }
}

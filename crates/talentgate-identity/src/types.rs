//! Core identity types: who a user is, as the backend reports it.
//!
//! These structures mirror the JSON the staffing backend produces at
//! login/registration/OTP-verification and the shape the browser keeps
//! in its persistent store. Serde attributes pin the exact wire shapes,
//! and the tests below verify them — a mismatch means a stored session
//! from the real application would stop parsing.

use serde::{Deserialize, Serialize};

use std::fmt;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// The four account roles the platform knows about.
///
/// `#[serde(rename_all = "snake_case")]` makes the JSON representation
/// match the backend's strings: `"employee"`, `"company"`, `"admin"`,
/// `"super_admin"`.
///
/// Note that a *stored* role is a plain string ([`UserRecord::role`]),
/// not this enum. The backend can and does hand out role strings this
/// enum has never heard of, and those must survive storage so the guard
/// can reject them explicitly. `Role` is for the places that only make
/// sense for known roles: route requirements and dashboard mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A job seeker.
    Employee,
    /// An employer posting job requests.
    Company,
    /// A platform administrator.
    Admin,
    /// An administrator with user-management and deletion powers.
    /// Everywhere plain `admin` access is required, `super_admin`
    /// qualifies too.
    SuperAdmin,
}

impl Role {
    /// All known roles, in a fixed order. Handy for totality tests.
    pub const ALL: [Role; 4] =
        [Role::Employee, Role::Company, Role::Admin, Role::SuperAdmin];

    /// Parses a backend role string into a known role.
    ///
    /// Returns `None` for anything unrecognized — an unknown role is a
    /// routing decision (fall back to the root path, or refuse at the
    /// guard), never an error.
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "employee" => Some(Role::Employee),
            "company" => Some(Role::Company),
            "admin" => Some(Role::Admin),
            "super_admin" => Some(Role::SuperAdmin),
            _ => None,
        }
    }

    /// The backend's string for this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Company => "company",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }

    /// Returns `true` for the two administrative roles.
    pub fn is_administrative(self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }
}

/// Display prints the backend string, so `tracing` fields read the same
/// as the stored value: `role = employee`.
impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// UserId
// ---------------------------------------------------------------------------

/// A user identifier, exactly as the backend sent it.
///
/// The backend is inconsistent here: some endpoints issue numeric ids,
/// others strings. `#[serde(untagged)]` accepts either JSON shape and
/// remembers which one it was — and that distinction is load-bearing.
/// The session validator compares the stored id against the token claim
/// with strict equality, so `42` and `"42"` are different identities,
/// the same way the original strict comparison treated them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    /// A numeric id (`42` on the wire).
    Number(u64),
    /// A string id (`"42"` or `"usr_9f3"` on the wire).
    Text(String),
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        UserId::Number(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        UserId::Text(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        UserId::Text(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{n}"),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

// ---------------------------------------------------------------------------
// UserRecord
// ---------------------------------------------------------------------------

/// The user record the browser persists alongside the token.
///
/// Created at login/registration completion, overwritten on profile
/// update, destroyed on logout or when found inconsistent with the
/// token's claims.
///
/// The required fields are `role`, `email`, and `userId` — a stored
/// record missing any of them fails deserialization, which the store
/// treats as "malformed, delete it". `full_name` is normalized to the
/// empty string when absent. Everything else the backend included
/// (phone, CV link, company id, ...) rides along in `extra` via
/// `#[serde(flatten)]` and survives a round-trip untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// The role string as issued. May be a role [`Role`] has never
    /// heard of; see [`UserRecord::known_role`].
    pub role: String,

    /// The account email.
    pub email: String,

    /// The user id, matching the `userId` claim in the current token.
    #[serde(rename = "userId")]
    pub user_id: UserId,

    /// Display name. Defaults to `""` when the backend omits it.
    #[serde(default)]
    pub full_name: String,

    /// Any additional fields the backend sent. Preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserRecord {
    /// Creates a minimal record with an empty display name and no
    /// extra fields.
    pub fn new(
        role: impl Into<String>,
        email: impl Into<String>,
        user_id: impl Into<UserId>,
    ) -> Self {
        Self {
            role: role.into(),
            email: email.into(),
            user_id: user_id.into(),
            full_name: String::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// The stored role, if it is one of the four known roles.
    pub fn known_role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }
}

// ---------------------------------------------------------------------------
// AuthPayload
// ---------------------------------------------------------------------------

/// The body of a successful login/registration/OTP-verification response.
///
/// This is the one place the backend hands the browser a credential.
/// The session layer persists it verbatim: the token goes to the store,
/// the rest becomes the normalized [`UserRecord`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPayload {
    /// The signed bearer credential.
    pub token: String,

    /// The role issued for this account.
    pub role: String,

    /// The user id, echoed inside the token's claims.
    #[serde(rename = "userId")]
    pub user_id: UserId,

    /// Account email. Some endpoints omit it; normalized to `""`.
    #[serde(default)]
    pub email: String,

    /// Display name. Some endpoints omit it; normalized to `""`.
    #[serde(default)]
    pub full_name: String,
}

impl AuthPayload {
    /// The normalized user record to persist for this login.
    pub fn user_record(&self) -> UserRecord {
        UserRecord {
            role: self.role.clone(),
            email: self.email.clone(),
            user_id: self.user_id.clone(),
            full_name: self.full_name.clone(),
            extra: serde_json::Map::new(),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

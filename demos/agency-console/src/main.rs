//! A terminal walkthrough of the Talentgate session lifecycle.
//!
//! Plays the part of the browser application: a canned backend issues
//! tokens, a session persists them, and the route guard decides every
//! navigation. Run with `RUST_LOG=info` to watch the session layer's
//! own logging alongside the walkthrough output.

use talentgate::prelude::*;
use talentgate_identity::fixture::TokenBuilder;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// A canned backend
// ---------------------------------------------------------------------------

/// Stands in for the staffing platform's API. Three accounts, each
/// finishing login on the OTP step, exactly like the hardened flow.
struct AgencyBackend;

impl AgencyBackend {
    fn directory(email: &str) -> Option<(&'static str, &'static str, u64)> {
        match email {
            "ada@example.test" => Some(("employee", "271828", 42)),
            "hr@acme.test" => Some(("company", "314159", 7)),
            "root@example.test" => Some(("super_admin", "161803", 1)),
            _ => None,
        }
    }
}

impl CredentialExchange for AgencyBackend {
    async fn exchange(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthPayload, talentgate::SessionError> {
        match credentials {
            Credentials::Password { email, .. } => {
                // The password step only triggers the verification
                // email; no token yet.
                tracing::info!(%email, "password accepted, OTP mailed");
                Err(talentgate::SessionError::ExchangeFailed(
                    "verification code required".into(),
                ))
            }
            Credentials::Otp { email, code } => match Self::directory(email) {
                Some((role, otp, user_id)) if code == otp => Ok(AuthPayload {
                    token: TokenBuilder::new()
                        .role(role)
                        .user_id(user_id)
                        .expires_in(3600)
                        .build(),
                    role: role.to_string(),
                    user_id: UserId::Number(user_id),
                    email: email.clone(),
                    full_name: String::new(),
                }),
                _ => Err(talentgate::SessionError::ExchangeFailed(
                    "invalid verification code".into(),
                )),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// The walkthrough
// ---------------------------------------------------------------------------

/// The protected views of the admin console, with their requirements.
const ROUTE_TABLE: &[(&str, Option<Role>)] = &[
    ("/profile", None),
    ("/employee-dashboard", Some(Role::Employee)),
    ("/company-dashboard", Some(Role::Company)),
    ("/admin-dashboard", Some(Role::Admin)),
    ("/admin/users", Some(Role::SuperAdmin)),
];

fn walk_routes(session: &mut Session<MemoryStorage>) {
    let mut guard = RouteGuard::new();
    for (path, required) in ROUTE_TABLE {
        let outcome = guard.check(session, path, *required);
        match &outcome {
            GuardOutcome::Allow => println!("  {path}  →  render"),
            GuardOutcome::RedirectLogin { .. } => {
                println!("  {path}  →  redirect {}", routes::LOGIN)
            }
            GuardOutcome::RedirectRole { to } => {
                println!("  {path}  →  redirect {to}")
            }
            GuardOutcome::RedirectUnauthorized => {
                println!("  {path}  →  redirect {}", routes::UNAUTHORIZED)
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), talentgate::TalentgateError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut session = Session::new(SessionStore::new(MemoryStorage::new()));

    println!("== anonymous ==");
    walk_routes(&mut session);

    println!("\n== password step ==");
    if let Err(reason) = session
        .login(
            &AgencyBackend,
            &Credentials::Password {
                email: "ada@example.test".into(),
                password: "hunter2".into(),
            },
        )
        .await
    {
        println!("  login without OTP: {reason}");
    }

    println!("\n== OTP step ==");
    let user = session
        .login(
            &AgencyBackend,
            &Credentials::Otp {
                email: "ada@example.test".into(),
                code: "271828".into(),
            },
        )
        .await?;
    println!("  logged in as {} ({})", user.email, user.role);
    if let Some(resume) = session.store_mut().take_return_path() {
        println!("  resuming at {resume}");
    }
    walk_routes(&mut session);

    println!("\n== super admin ==");
    let mut root = Session::new(SessionStore::new(MemoryStorage::new()));
    root.login(
        &AgencyBackend,
        &Credentials::Otp {
            email: "root@example.test".into(),
            code: "161803".into(),
        },
    )
    .await?;
    walk_routes(&mut root);

    println!("\n== backend revokes the credential ==");
    if let Some(target) = session.handle_response_status(401) {
        println!("  401 received → navigate {target}");
    }
    walk_routes(&mut session);

    println!("\n== logout ==");
    let target = root.logout(None);
    println!("  navigate {target}");

    Ok(())
}

//! Command implementations, one module per role surface.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod store;

use feira_livre_api::{ApiClient, ApiConfig, Session, SessionStore};
use feira_livre_core::UserRole;

/// Boxed error type shared by all command handlers.
pub type CommandError = Box<dyn std::error::Error>;

/// Shared command context: configured client plus the restored session.
pub struct Ctx {
    pub client: ApiClient,
    pub sessions: SessionStore,
    pub session: Option<Session>,
}

impl Ctx {
    /// Load configuration, build the client, and restore a persisted
    /// session (re-attaching its bearer token) if one exists.
    pub fn init() -> Result<Self, CommandError> {
        let config = ApiConfig::from_env()?;
        let client = ApiClient::new(&config)?;
        let sessions = SessionStore::new(config.session_path.clone());

        let session = sessions.load()?;
        if let Some(session) = &session {
            client.set_token(&session.token);
        }

        Ok(Self {
            client,
            sessions,
            session,
        })
    }

    /// The signed-in session, or an instruction to sign in.
    pub fn require_session(&self) -> Result<&Session, CommandError> {
        self.session
            .as_ref()
            .ok_or_else(|| "not signed in; run `fl-cli auth login` first".into())
    }

    /// A signed-in session with the given role.
    pub fn require_role(&self, role: UserRole) -> Result<&Session, CommandError> {
        let session = self.require_session()?;
        if session.user.role == role {
            Ok(session)
        } else {
            Err(format!(
                "this command needs a {role} account; signed in as {}",
                session.user.role
            )
            .into())
        }
    }
}

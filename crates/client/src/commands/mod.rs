//! Subcommand implementations. Each prints its result to stdout.

pub mod account;
pub mod products;
pub mod users;

use babylist_client::config::ClientConfig;
use babylist_client::{ClientError, RegistryClient, Session, SessionStore};

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Not logged in. Run `babylist login` first.")]
    NotLoggedIn,
}

/// Everything a command needs: the API client and the loaded session.
pub struct Context {
    pub client: RegistryClient,
    pub store: SessionStore,
    pub session: Session,
}

impl Context {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let store = SessionStore::new(&config.state_dir);
        let session = store.load()?;
        Ok(Self {
            client: RegistryClient::new(config.api_url),
            store,
            session,
        })
    }
}

/// Turn an authenticated call's "no session" answer into an error.
fn require_session<T>(value: Option<T>) -> Result<T, CommandError> {
    value.ok_or(CommandError::NotLoggedIn)
}

//! Client session state machine

use std::sync::atomic::{AtomicBool, Ordering};

use keygate_shared::{LoginRequest, PublicUser, RegisterRequest};
use tokio::sync::watch;

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::storage::TokenStore;

/// Observable session state. `Initializing` holds only during the one-time
/// startup check; afterwards the machine moves between `Anonymous` and
/// `Authenticated`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Initializing,
    Anonymous,
    Authenticated(PublicUser),
}

impl SessionState {
    /// Derived from the variant; there is no separately stored flag.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn is_initializing(&self) -> bool {
        matches!(self, SessionState::Initializing)
    }

    pub fn current_user(&self) -> Option<&PublicUser> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Owns the session for one client lifetime: the persisted token, the
/// current state, and the login/register/logout operations. UI layers
/// observe it through [`Session::subscribe`].
pub struct Session<S> {
    api: ApiClient,
    store: S,
    state: watch::Sender<SessionState>,
    initialized: AtomicBool,
}

impl<S: TokenStore> Session<S> {
    pub fn new(api: ApiClient, store: S) -> Self {
        let (state, _) = watch::channel(SessionState::Initializing);
        Self {
            api,
            store,
            state,
            initialized: AtomicBool::new(false),
        }
    }

    /// Watch for state transitions. The receiver immediately sees the
    /// current state.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// One-time startup check: resolve a persisted token to a user, or end
    /// up anonymous. Any failure along the way (unreadable store, network,
    /// rejected token) discards the stale token; the machine never stays in
    /// `Initializing` once this returns. Subsequent calls are no-ops.
    pub async fn initialize(&self) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return;
        }

        let token = match self.store.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "could not read persisted token");
                None
            }
        };

        let next = match token {
            // No persisted token: anonymous, and no network call is made
            None => SessionState::Anonymous,
            Some(token) => match self.api.current_user(&token).await {
                Ok(user) => SessionState::Authenticated(user),
                Err(e) => {
                    tracing::debug!(error = %e, "persisted token rejected, discarding");
                    self.clear_store();
                    SessionState::Anonymous
                }
            },
        };
        self.state.send_replace(next);
    }

    /// Log in. On success the token is persisted and the state becomes
    /// `Authenticated`; on any failure the state is left untouched and the
    /// error (display-ready) is returned to the caller. Never retries.
    pub async fn login(&self, credentials: LoginRequest) -> Result<PublicUser, ClientError> {
        let response = self.api.login(&credentials).await?;
        self.store.save(&response.token)?;
        self.state
            .send_replace(SessionState::Authenticated(response.user.clone()));
        Ok(response.user)
    }

    /// Register a new account. Same contract as [`Session::login`]:
    /// success implies immediate authentication, failure changes nothing.
    pub async fn register(&self, credentials: RegisterRequest) -> Result<PublicUser, ClientError> {
        let response = self.api.register(&credentials).await?;
        self.store.save(&response.token)?;
        self.state
            .send_replace(SessionState::Authenticated(response.user.clone()));
        Ok(response.user)
    }

    /// Log out: drop the persisted token and become anonymous. Purely
    /// client-side (the server keeps no record of issued tokens) and always
    /// succeeds.
    pub fn logout(&self) {
        self.clear_store();
        self.state.send_replace(SessionState::Anonymous);
    }

    fn clear_store(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "could not clear persisted token");
        }
    }
}

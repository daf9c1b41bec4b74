use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::errors::{AuthError, LoginStep};
use super::state_types::{AuthState, AuthStateStore};
use crate::api::MovieApi;
use crate::session::{SESSION_ID_KEY, SessionStore};

/// Drives the token → validate → session handshake and owns the resulting
/// [`AuthState`]. The session id is persisted under [`SESSION_ID_KEY`].
#[derive(Clone)]
pub struct AuthSessionManager {
    api: Arc<dyn MovieApi>,
    store: Arc<dyn SessionStore>,
    state: AuthStateStore,
}

impl std::fmt::Debug for AuthSessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSessionManager")
            .field("state", &self.state.current())
            .finish_non_exhaustive()
    }
}

impl AuthSessionManager {
    pub fn new(api: Arc<dyn MovieApi>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            api,
            store,
            state: AuthStateStore::new(),
        }
    }

    /// Log in with username and password and return the new session id.
    ///
    /// `is_loading()` is true for the whole handshake. A failure persists
    /// nothing and leaves the settled state as it is, including a session
    /// adopted by an overlapping login.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<String, AuthError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let attempt = self.state.begin_login();
        debug!("login started");

        match self.handshake(username.trim(), password).await {
            Ok(session_id) => {
                attempt.succeed(session_id.clone());
                info!("logged in");
                Ok(session_id)
            }
            Err(err) => {
                attempt.fail();
                warn!(step = ?err.step(), error = %err, "login failed");
                Err(err)
            }
        }
    }

    async fn handshake(
        &self,
        username: &str,
        password: &str,
    ) -> Result<String, AuthError> {
        let token = self
            .api
            .create_request_token()
            .await
            .map_err(AuthError::upstream(LoginStep::RequestToken))?;

        let validated = self
            .api
            .validate_with_login(username, password, &token.request_token)
            .await
            .map_err(AuthError::upstream(LoginStep::ValidateCredentials))?;
        if !validated.success {
            return Err(AuthError::Rejected {
                step: LoginStep::ValidateCredentials,
            });
        }

        let session = self
            .api
            .create_session(&validated.request_token)
            .await
            .map_err(AuthError::upstream(LoginStep::CreateSession))?;
        if !session.success || session.session_id.is_empty() {
            return Err(AuthError::Rejected {
                step: LoginStep::CreateSession,
            });
        }

        self.store.set(SESSION_ID_KEY, &session.session_id).await?;
        Ok(session.session_id)
    }

    /// Forget the persisted session, then drop to `LoggedOut`.
    ///
    /// A storage failure leaves the current state untouched.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.store.remove(SESSION_ID_KEY).await?;
        self.state.logged_out();
        info!("logged out");
        Ok(())
    }

    /// Adopt a previously persisted session id, if there is one.
    ///
    /// Returns whether a session was restored. The id is not checked
    /// against the API.
    pub async fn restore(&self) -> Result<bool, AuthError> {
        let stored = self
            .store
            .get(SESSION_ID_KEY)
            .await?
            .filter(|id| !id.is_empty());
        match stored {
            Some(session_id) => {
                self.state.logged_in(session_id);
                debug!("restored persisted session");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn state(&self) -> AuthState {
        self.state.current()
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.with_state(AuthState::is_logged_in)
    }

    pub fn is_loading(&self) -> bool {
        self.state.with_state(AuthState::is_loading)
    }

    pub fn session_id(&self) -> Option<String> {
        self.state
            .with_state(|state| state.session_id().map(str::to_string))
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }
}

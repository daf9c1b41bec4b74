//! Authentication state machine and its watch-channel store.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::watch;

#[derive(Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    LoggedOut,

    /// Handshake in flight.
    LoggingIn {
        /// State to restore if the handshake fails.
        previous: Box<AuthState>,
    },

    LoggedIn { session_id: String },
}

impl AuthState {
    /// `true` when a session exists, including while a new login is in
    /// flight on top of an existing one.
    pub fn is_logged_in(&self) -> bool {
        match self {
            AuthState::LoggedIn { .. } => true,
            AuthState::LoggingIn { previous } => previous.is_logged_in(),
            AuthState::LoggedOut => false,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, AuthState::LoggingIn { .. })
    }

    pub fn session_id(&self) -> Option<&str> {
        match self {
            AuthState::LoggedIn { session_id } => Some(session_id),
            AuthState::LoggingIn { previous } => previous.session_id(),
            AuthState::LoggedOut => None,
        }
    }

    /// The state this one falls back to; strips any in-flight login.
    pub fn settled(&self) -> AuthState {
        match self {
            AuthState::LoggingIn { previous } => previous.settled(),
            other => other.clone(),
        }
    }
}

impl fmt::Debug for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthState::LoggedOut => f.write_str("LoggedOut"),
            AuthState::LoggingIn { previous } => f
                .debug_struct("LoggingIn")
                .field("previous", previous)
                .finish(),
            AuthState::LoggedIn { .. } => f
                .debug_struct("LoggedIn")
                .field("session_id", &"<redacted>")
                .finish(),
        }
    }
}

/// Shared auth state backed by a `watch` channel, so readers never block
/// writers and subscribers see every committed transition.
#[derive(Clone, Debug)]
pub struct AuthStateStore {
    sender: Arc<watch::Sender<AuthState>>,
    // Only touched inside `send_modify`, which serializes writers.
    pending: Arc<AtomicUsize>,
}

impl AuthStateStore {
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(AuthState::LoggedOut);
        Self {
            sender: Arc::new(sender),
            pending: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn current(&self) -> AuthState {
        self.sender.borrow().clone()
    }

    /// Access state without cloning
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AuthState) -> R,
    {
        f(&self.sender.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.sender.subscribe()
    }

    pub fn set(&self, state: AuthState) {
        self.sender.send_replace(state);
    }

    /// Enter `LoggingIn` for one handshake attempt.
    ///
    /// The returned [`LoginAttempt`] must be settled with
    /// [`LoginAttempt::succeed`] or [`LoginAttempt::fail`]; dropping it
    /// unsettled counts as a failure.
    pub fn begin_login(&self) -> LoginAttempt {
        let mut previous = AuthState::LoggedOut;
        self.sender.send_modify(|state| {
            self.pending.fetch_add(1, Ordering::SeqCst);
            previous = state.settled();
            *state = AuthState::LoggingIn {
                previous: Box::new(previous.clone()),
            };
        });
        LoginAttempt {
            store: self.clone(),
            previous,
            settled: false,
        }
    }

    /// `Some` adopts the new session. `None` keeps whatever settled state
    /// is in effect now, so a failed attempt never undoes a later success.
    /// Stays `LoggingIn` while other attempts are pending.
    fn finish_login(&self, session_id: Option<String>) {
        self.sender.send_modify(|state| {
            let remaining = self
                .pending
                .fetch_sub(1, Ordering::SeqCst)
                .saturating_sub(1);
            let settled = match session_id {
                Some(session_id) => AuthState::LoggedIn { session_id },
                None => state.settled(),
            };
            *state = if remaining > 0 {
                AuthState::LoggingIn {
                    previous: Box::new(settled),
                }
            } else {
                settled
            };
        });
    }

    pub fn logged_in(&self, session_id: String) {
        self.set(AuthState::LoggedIn { session_id });
    }

    pub fn logged_out(&self) {
        self.set(AuthState::LoggedOut);
    }
}

/// One in-flight login started by [`AuthStateStore::begin_login`].
#[derive(Debug)]
#[must_use = "an unsettled attempt is failed when dropped"]
pub struct LoginAttempt {
    store: AuthStateStore,
    previous: AuthState,
    settled: bool,
}

impl LoginAttempt {
    /// Settled state in effect when the attempt began.
    pub fn previous(&self) -> &AuthState {
        &self.previous
    }

    pub fn succeed(mut self, session_id: String) {
        self.settled = true;
        self.store.finish_login(Some(session_id));
    }

    pub fn fail(mut self) {
        self.settled = true;
        self.store.finish_login(None);
    }
}

impl Drop for LoginAttempt {
    fn drop(&mut self) {
        if !self.settled {
            self.store.finish_login(None);
        }
    }
}

impl Default for AuthStateStore {
    fn default() -> Self {
        Self::new()
    }
}

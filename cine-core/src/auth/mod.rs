//! Session-based login against the movie database API.

pub mod errors;
pub mod manager;
pub mod state_types;

pub use errors::{AuthError, LoginStep};
pub use manager::AuthSessionManager;
pub use state_types::{AuthState, AuthStateStore, LoginAttempt};

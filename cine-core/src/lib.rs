//! Client core for CineConnect.
//!
//! The crate is organised around three pieces:
//!
//! - [`api`]: the single HTTP call primitive ([`api::ApiClient::call`]) and
//!   the typed [`api::MovieApi`] surface built on top of it.
//! - [`catalog`]: the movie catalog store (trending list, search filter,
//!   watchlist, selection) with explicit change subscriptions.
//! - [`auth`]: the token → validate → session login handshake and the
//!   session state machine, persisting through a [`session::SessionStore`].
//!
//! [`details`] and [`profile`] are thin services over the same API for the
//! movie details and account screens.
#![allow(missing_docs)]

pub mod api;
pub mod auth;
pub mod catalog;
pub mod details;
pub mod error;
pub mod profile;
pub mod session;

pub use api::{ApiClient, ApiError, HttpMethod, MovieApi};
pub use auth::{AuthError, AuthSessionManager, AuthState, LoginStep};
pub use catalog::{
    CatalogChange, CatalogState, FetchRequest, FetchStatus, MovieCatalogStore,
    Subscription,
};
pub use details::{MovieDetailsService, MovieDetailsView};
pub use error::{CoreError, ValidationError};
pub use profile::ProfileService;
pub use session::{
    FileSessionStore, MemorySessionStore, SESSION_ID_KEY, SessionStore,
    StorageError,
};

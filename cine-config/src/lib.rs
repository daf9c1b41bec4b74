//! Configuration loading for CineConnect.
//!
//! Values are layered from built-in defaults, an optional TOML file, an
//! optional `.env` file and finally the process environment. The resolved
//! [`Config`] is what `cine-core` and `cinectl` consume.
#![allow(missing_docs)]

pub mod constants;
pub mod loader;
pub mod models;
pub mod secret;
pub mod util;

pub use loader::{ConfigLoader, error::ConfigLoadError};
pub use models::{
    ApiConfig, CatalogConfig, Config, ConfigMetadata, SessionConfig,
};
pub use secret::BearerToken;

pub mod sources;

use std::path::{Path, PathBuf};
use std::time::Duration;

use cine_model::TimeWindow;

use crate::secret::BearerToken;

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub catalog: CatalogConfig,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Root of the REST API, without a trailing slash.
    pub base_url: String,
    /// Root of the image CDN, without a trailing slash.
    pub image_base_url: String,
    pub bearer_token: BearerToken,
    /// Per-request timeout; `None` leaves the transport default.
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Location of the session file. `None` when no explicit path was given
    /// and the platform exposes no data directory.
    pub store_path: Option<PathBuf>,
}

impl SessionConfig {
    pub fn store_path(&self) -> Option<&Path> {
        self.store_path.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub time_window: TimeWindow,
    pub language: String,
}

/// Where the resolved values came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_path: Option<PathBuf>,
}

impl ConfigMetadata {
    pub fn env_file_loaded(&self) -> bool {
        self.env_file_path.is_some()
    }
}

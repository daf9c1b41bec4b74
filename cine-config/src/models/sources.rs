use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::env;
use crate::util::non_blank;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub api: FileApiConfig,
    #[serde(default)]
    pub session: FileSessionConfig,
    #[serde(default)]
    pub catalog: FileCatalogConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileApiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileSessionConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileCatalogConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_window: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Environment-derived configuration values.
///
/// Blank variables are treated as unset.
#[derive(Default, Clone)]
pub struct EnvConfig {
    pub api_base_url: Option<String>,
    pub image_base_url: Option<String>,
    pub api_token: Option<String>,
    pub api_timeout: Option<String>,
    pub session_file: Option<PathBuf>,
    pub time_window: Option<String>,
    pub language: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| non_blank(lookup(name));
        Self {
            api_base_url: var(env::API_BASE_URL),
            image_base_url: var(env::IMAGE_BASE_URL),
            api_token: var(env::API_TOKEN)
                .or_else(|| var(env::API_TOKEN_ALIAS)),
            api_timeout: var(env::API_TIMEOUT_SECS),
            session_file: var(env::SESSION_FILE).map(PathBuf::from),
            time_window: var(env::TIME_WINDOW),
            language: var(env::LANGUAGE),
        }
    }
}

impl std::fmt::Debug for EnvConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvConfig")
            .field("api_base_url", &self.api_base_url)
            .field("image_base_url", &self.image_base_url)
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "<redacted>"),
            )
            .field("api_timeout", &self.api_timeout)
            .field("session_file", &self.session_file)
            .field("time_window", &self.time_window)
            .field("language", &self.language)
            .finish()
    }
}

pub mod error;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use cine_model::TimeWindow;
use directories::ProjectDirs;
use tracing::{debug, info};

use crate::constants::{
    APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, CONFIG_FILE_NAME,
    DEFAULT_API_BASE_URL, DEFAULT_IMAGE_BASE_URL, DEFAULT_LANGUAGE,
    SESSION_FILE_NAME, env,
};
use crate::models::sources::{EnvConfig, FileConfig};
use crate::models::{
    ApiConfig, CatalogConfig, Config, ConfigMetadata, SessionConfig,
};
use crate::secret::BearerToken;
use crate::util::{non_blank, parse_timeout};

use error::ConfigLoadError;

/// Builds a [`Config`] from defaults, a TOML file, a `.env` file and the
/// environment, in increasing order of precedence.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_file_path: Option<PathBuf>,
    skip_env_file: bool,
    skip_platform_config: bool,
    env: Option<HashMap<String, String>>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit config file. Unlike the discovered locations it must exist.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Explicit `.env` file. Unlike `./.env` it must exist.
    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file_path = Some(path.into());
        self
    }

    pub fn without_env_file(mut self) -> Self {
        self.skip_env_file = true;
        self
    }

    /// Do not look for `config.toml` in the platform config directory.
    pub fn without_platform_config(mut self) -> Self {
        self.skip_platform_config = true;
        self
    }

    /// Resolve against the given variables instead of the process
    /// environment.
    pub fn with_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = Some(
            vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        );
        self
    }

    pub fn load(&self) -> Result<Config, ConfigLoadError> {
        let (dotenv, env_file_path) = self.read_env_file()?;
        let lookup = |name: &str| -> Option<String> {
            let primary = match &self.env {
                Some(vars) => vars.get(name).cloned(),
                None => std::env::var(name).ok(),
            };
            primary.or_else(|| dotenv.get(name).cloned())
        };

        let config_path = self.resolve_config_path(&lookup)?;
        let file = match &config_path {
            Some(path) => read_file_config(path)?,
            None => FileConfig::default(),
        };
        let env_config = EnvConfig::from_lookup(lookup);
        debug!(?config_path, ?env_file_path, "resolving configuration");

        let config = resolve(
            file,
            env_config,
            ConfigMetadata {
                config_path,
                env_file_path,
            },
        )?;
        info!(
            base_url = %config.api.base_url,
            time_window = %config.catalog.time_window,
            "configuration loaded"
        );
        Ok(config)
    }

    fn read_env_file(
        &self,
    ) -> Result<(HashMap<String, String>, Option<PathBuf>), ConfigLoadError>
    {
        if self.skip_env_file {
            return Ok((HashMap::new(), None));
        }
        let path = match &self.env_file_path {
            Some(path) => path.clone(),
            None => {
                let default = PathBuf::from(".env");
                if !default.is_file() {
                    return Ok((HashMap::new(), None));
                }
                default
            }
        };

        let mut vars = HashMap::new();
        for item in dotenvy::from_path_iter(&path)? {
            let (key, value) = item?;
            vars.insert(key, value);
        }
        debug!(path = %path.display(), count = vars.len(), "read env file");
        Ok((vars, Some(path)))
    }

    fn resolve_config_path(
        &self,
        lookup: &impl Fn(&str) -> Option<String>,
    ) -> Result<Option<PathBuf>, ConfigLoadError> {
        let explicit = self.config_path.clone().or_else(|| {
            non_blank(lookup(env::CONFIG_PATH)).map(PathBuf::from)
        });
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigLoadError::Read {
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "config file not found",
                    ),
                    path,
                });
            }
            return Ok(Some(path));
        }
        if self.skip_platform_config {
            return Ok(None);
        }
        Ok(project_dirs()
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
            .filter(|path| path.is_file()))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
}

/// Default session file under the platform data directory.
pub fn default_session_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join(SESSION_FILE_NAME))
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| {
        ConfigLoadError::Read {
            path: path.to_path_buf(),
            source,
        }
    })?;
    toml::from_str(&raw).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn resolve(
    file: FileConfig,
    env: EnvConfig,
    metadata: ConfigMetadata,
) -> Result<Config, ConfigLoadError> {
    let bearer_token = env
        .api_token
        .or_else(|| non_blank(file.api.bearer_token))
        .map(BearerToken::new)
        .ok_or(ConfigLoadError::MissingToken)?;

    let base_url = base_url_value(
        "api.base_url",
        env.api_base_url.or(file.api.base_url),
        DEFAULT_API_BASE_URL,
    )?;
    let image_base_url = base_url_value(
        "api.image_base_url",
        env.image_base_url.or(file.api.image_base_url),
        DEFAULT_IMAGE_BASE_URL,
    )?;

    let timeout = match (env.api_timeout, file.api.timeout_secs) {
        (Some(raw), _) => {
            Some(parse_timeout(&raw).ok_or(ConfigLoadError::InvalidValue {
                key: "api.timeout_secs",
                value: raw,
            })?)
        }
        (None, Some(0)) => {
            return Err(ConfigLoadError::InvalidValue {
                key: "api.timeout_secs",
                value: "0".to_string(),
            });
        }
        (None, Some(secs)) => Some(std::time::Duration::from_secs(secs)),
        (None, None) => None,
    };

    let time_window = match env
        .time_window
        .or_else(|| non_blank(file.catalog.time_window))
    {
        Some(raw) => raw.parse::<TimeWindow>().map_err(|_| {
            ConfigLoadError::InvalidValue {
                key: "catalog.time_window",
                value: raw,
            }
        })?,
        None => TimeWindow::default(),
    };
    let language = env
        .language
        .or_else(|| non_blank(file.catalog.language))
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    let store_path = env
        .session_file
        .or(file.session.store_path)
        .or_else(default_session_path);

    Ok(Config {
        api: ApiConfig {
            base_url,
            image_base_url,
            bearer_token,
            timeout,
        },
        session: SessionConfig { store_path },
        catalog: CatalogConfig {
            time_window,
            language,
        },
        metadata,
    })
}

fn base_url_value(
    key: &'static str,
    raw: Option<String>,
    default: &str,
) -> Result<String, ConfigLoadError> {
    let Some(raw) = non_blank(raw) else {
        return Ok(default.to_string());
    };
    let trimmed = raw.trim_end_matches('/');
    if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return Err(ConfigLoadError::InvalidValue { key, value: raw });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with_token() -> EnvConfig {
        EnvConfig {
            api_token: Some("token".into()),
            ..EnvConfig::default()
        }
    }

    #[test]
    fn defaults_apply_when_only_token_is_set() {
        let config =
            resolve(FileConfig::default(), env_with_token(), Default::default())
                .unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.api.image_base_url, DEFAULT_IMAGE_BASE_URL);
        assert_eq!(config.api.timeout, None);
        assert_eq!(config.catalog.time_window, TimeWindow::Day);
        assert_eq!(config.catalog.language, "en-US");
    }

    #[test]
    fn missing_token_is_an_error() {
        let err = resolve(
            FileConfig::default(),
            EnvConfig::default(),
            Default::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigLoadError::MissingToken));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut file = FileConfig::default();
        file.api.base_url = Some("http://file.example/3".into());
        file.catalog.language = Some("de-DE".into());
        let env = EnvConfig {
            api_base_url: Some("http://env.example/3/".into()),
            ..env_with_token()
        };

        let config = resolve(file, env, Default::default()).unwrap();
        assert_eq!(config.api.base_url, "http://env.example/3");
        assert_eq!(config.catalog.language, "de-DE");
    }

    #[test]
    fn invalid_time_window_names_the_key() {
        let env = EnvConfig {
            time_window: Some("fortnight".into()),
            ..env_with_token()
        };
        match resolve(FileConfig::default(), env, Default::default()) {
            Err(ConfigLoadError::InvalidValue { key, value }) => {
                assert_eq!(key, "catalog.time_window");
                assert_eq!(value, "fortnight");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn zero_timeout_in_file_is_rejected() {
        let mut file = FileConfig::default();
        file.api.timeout_secs = Some(0);
        assert!(matches!(
            resolve(file, env_with_token(), Default::default()),
            Err(ConfigLoadError::InvalidValue { key: "api.timeout_secs", .. })
        ));
    }
}

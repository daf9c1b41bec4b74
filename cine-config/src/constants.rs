
pub const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const DEFAULT_LANGUAGE: &str = "en-US";

pub const APP_QUALIFIER: &str = "";
pub const APP_ORGANIZATION: &str = "cineconnect";
pub const APP_NAME: &str = "cineconnect";

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const SESSION_FILE_NAME: &str = "session.json";

pub mod env {
    pub const CONFIG_PATH: &str = "CINE_CONFIG";
    pub const API_BASE_URL: &str = "CINE_API_BASE_URL";
    pub const IMAGE_BASE_URL: &str = "CINE_IMAGE_BASE_URL";
    pub const API_TOKEN: &str = "CINE_API_TOKEN";
    pub const API_TOKEN_ALIAS: &str = "TMDB_BEARER_TOKEN";
    pub const API_TIMEOUT_SECS: &str = "CINE_API_TIMEOUT_SECS";
    pub const SESSION_FILE: &str = "CINE_SESSION_FILE";
    pub const TIME_WINDOW: &str = "CINE_TIME_WINDOW";
    pub const LANGUAGE: &str = "CINE_LANGUAGE";
}

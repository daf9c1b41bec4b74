//! Wire shapes of the authentication and write endpoints.
//!
//! Read endpoints decode straight into `cine_model` types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Response of `token/new` and `token/validate_with_login`.
#[derive(Clone, Deserialize, Serialize)]
pub struct RequestToken {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub expires_at: Option<String>,
    pub request_token: String,
}

impl fmt::Debug for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestToken")
            .field("success", &self.success)
            .field("expires_at", &self.expires_at)
            .field("request_token", &"<redacted>")
            .finish()
    }
}

/// Response of `authentication/session/new`.
#[derive(Clone, Deserialize, Serialize)]
pub struct NewSession {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub session_id: String,
}

impl fmt::Debug for NewSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewSession")
            .field("success", &self.success)
            .field("session_id", &"<redacted>")
            .finish()
    }
}

/// Generic acknowledgement returned by rating writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub status_code: Option<i32>,
    #[serde(default)]
    pub status_message: Option<String>,
}

/// Body of a non-2xx response. Only the message is used.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub status_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResultsEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

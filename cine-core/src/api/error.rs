use thiserror::Error;

/// Message used when a failed response carries no `status_message`.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure: DNS, connect, TLS, timeout.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response. `message` is the server's `status_message` or
    /// [`FALLBACK_ERROR_MESSAGE`].
    #[error("{message}")]
    Status { status: u16, message: String },

    /// 2xx response whose body does not match the expected shape.
    #[error("unexpected response body from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid request url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl ApiError {
    /// Text suitable for showing to a user.
    pub fn message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Network(_) | ApiError::Decode { .. } => {
                FALLBACK_ERROR_MESSAGE.to_string()
            }
            ApiError::InvalidUrl { .. } => self.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_display_the_server_message() {
        let err = ApiError::Status {
            status: 401,
            message: "Invalid API key: You must be granted a valid key."
                .into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid API key: You must be granted a valid key."
        );
        assert_eq!(err.message(), err.to_string());
        assert!(err.is_unauthorized());
    }

    #[test]
    fn decode_errors_fall_back_to_generic_message() {
        let source = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let err = ApiError::Decode {
            endpoint: "/movie/1".into(),
            source,
        };
        assert_eq!(err.message(), FALLBACK_ERROR_MESSAGE);
        assert_eq!(err.status(), None);
    }
}

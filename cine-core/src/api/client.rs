use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use cine_config::{ApiConfig, BearerToken};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::error::{ApiError, FALLBACK_ERROR_MESSAGE};
use super::types::ErrorBody;

const USER_AGENT: &str =
    concat!("cineconnect/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        })
    }
}

/// Bearer-authenticated JSON client for the movie database API.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Arc<BearerToken>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("has_token", &!self.token.is_empty())
            .finish()
    }
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        token: BearerToken,
    ) -> Result<Self, ApiError> {
        Self::build(base_url.into(), token, None)
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::build(
            config.base_url.clone(),
            config.bearer_token.clone(),
            config.timeout,
        )
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        token: BearerToken,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        Self::build(base_url.into(), token, Some(timeout))
    }

    fn build(
        base_url: String,
        token: BearerToken,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let base_url = normalize(base_url);
        Url::parse(&base_url).map_err(|source| ApiError::InvalidUrl {
            url: base_url.clone(),
            source,
        })?;

        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        debug!(%base_url, ?timeout, "created API client");
        Ok(Self {
            http,
            base_url,
            token: Arc::new(token),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path (which may carry a query string).
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, ApiError> {
        let raw = format!(
            "{}/{}",
            self.base_url,
            endpoint.trim_start_matches('/')
        );
        Url::parse(&raw)
            .map_err(|source| ApiError::InvalidUrl { url: raw, source })
    }

    /// Perform one request and decode the 2xx body into `T`.
    ///
    /// Every request carries the bearer token and JSON content headers.
    /// Non-2xx responses become [`ApiError::Status`] with the body's
    /// `status_message`, or the generic fallback. Nothing is retried.
    pub async fn call<T>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(endpoint)?;
        // Query strings may carry the session id; only the path is logged.
        let path = url.path().to_string();
        debug!(%method, %path, "api request");

        let mut request = self
            .http
            .request(method.into(), url)
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.token.expose_secret()),
            )
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            // An unreadable error body still reports the status.
            let message = response
                .bytes()
                .await
                .ok()
                .and_then(|bytes| serde_json::from_slice::<ErrorBody>(&bytes).ok())
                .and_then(|body| body.status_message)
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
            warn!(%method, %path, status = status.as_u16(), %message, "api request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;

        serde_json::from_slice(&bytes).map_err(|source| {
            warn!(%method, %path, error = %source, "undecodable api response");
            ApiError::Decode {
                endpoint: path,
                source,
            }
        })
    }
}

/// Trim whitespace and trailing slashes; assume https when no scheme is
/// given.
fn normalize(raw: String) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    let with_scheme = if trimmed.starts_with("http://")
        || trimmed.starts_with("https://")
    {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    if with_scheme != raw {
        debug!(from = %raw, to = %with_scheme, "normalized API base URL");
    }
    with_scheme
}

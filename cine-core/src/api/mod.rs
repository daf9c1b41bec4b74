pub mod client;
pub mod error;
pub mod routes;
pub mod service;
pub mod types;

pub use client::{ApiClient, HttpMethod};
pub use error::{ApiError, FALLBACK_ERROR_MESSAGE};
pub use service::MovieApi;
#[cfg(test)]
pub use service::MockMovieApi;
pub use types::{NewSession, RequestToken, StatusResponse};

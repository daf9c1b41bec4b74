use async_trait::async_trait;
use cine_model::{
    Account, DiscoverQuery, Movie, MovieDetails, MovieId, Page,
    PersonChange, Rating, Review, TimeWindow,
};
use serde_json::json;

use super::client::{ApiClient, HttpMethod};
use super::error::ApiError;
use super::routes;
use super::types::{NewSession, RequestToken, ResultsEnvelope, StatusResponse};

/// Typed surface of the movie database API used by the stores and services.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieApi: Send + Sync {
    async fn create_request_token(&self) -> Result<RequestToken, ApiError>;

    async fn validate_with_login(
        &self,
        username: &str,
        password: &str,
        request_token: &str,
    ) -> Result<RequestToken, ApiError>;

    async fn create_session(
        &self,
        request_token: &str,
    ) -> Result<NewSession, ApiError>;

    async fn fetch_account(&self, session_id: &str)
    -> Result<Account, ApiError>;

    /// One page of trending movies, in API order.
    async fn fetch_trending(
        &self,
        window: TimeWindow,
        language: &str,
    ) -> Result<Vec<Movie>, ApiError>;

    async fn fetch_movie_details(
        &self,
        id: MovieId,
    ) -> Result<MovieDetails, ApiError>;

    async fn fetch_movie_reviews(
        &self,
        id: MovieId,
    ) -> Result<Vec<Review>, ApiError>;

    async fn rate_movie(
        &self,
        id: MovieId,
        rating: Rating,
    ) -> Result<StatusResponse, ApiError>;

    async fn delete_rating(
        &self,
        id: MovieId,
    ) -> Result<StatusResponse, ApiError>;

    async fn discover_movies(
        &self,
        query: &DiscoverQuery,
    ) -> Result<Page<Movie>, ApiError>;

    async fn fetch_person_changes(
        &self,
        page: u32,
    ) -> Result<Page<PersonChange>, ApiError>;
}

#[async_trait]
impl MovieApi for ApiClient {
    async fn create_request_token(&self) -> Result<RequestToken, ApiError> {
        self.call(HttpMethod::Get, routes::REQUEST_TOKEN, None).await
    }

    async fn validate_with_login(
        &self,
        username: &str,
        password: &str,
        request_token: &str,
    ) -> Result<RequestToken, ApiError> {
        let body = json!({
            "username": username,
            "password": password,
            "request_token": request_token,
        });
        self.call(HttpMethod::Post, routes::VALIDATE_WITH_LOGIN, Some(body))
            .await
    }

    async fn create_session(
        &self,
        request_token: &str,
    ) -> Result<NewSession, ApiError> {
        let body = json!({ "request_token": request_token });
        self.call(HttpMethod::Post, routes::NEW_SESSION, Some(body))
            .await
    }

    async fn fetch_account(
        &self,
        session_id: &str,
    ) -> Result<Account, ApiError> {
        self.call(HttpMethod::Get, &routes::account(session_id), None)
            .await
    }

    async fn fetch_trending(
        &self,
        window: TimeWindow,
        language: &str,
    ) -> Result<Vec<Movie>, ApiError> {
        let envelope: ResultsEnvelope<Movie> = self
            .call(HttpMethod::Get, &routes::trending(window, language), None)
            .await?;
        Ok(envelope.results)
    }

    async fn fetch_movie_details(
        &self,
        id: MovieId,
    ) -> Result<MovieDetails, ApiError> {
        self.call(HttpMethod::Get, &routes::movie(id), None).await
    }

    async fn fetch_movie_reviews(
        &self,
        id: MovieId,
    ) -> Result<Vec<Review>, ApiError> {
        let envelope: ResultsEnvelope<Review> = self
            .call(HttpMethod::Get, &routes::movie_reviews(id), None)
            .await?;
        Ok(envelope.results)
    }

    async fn rate_movie(
        &self,
        id: MovieId,
        rating: Rating,
    ) -> Result<StatusResponse, ApiError> {
        let body = json!({ "value": rating.value() });
        self.call(HttpMethod::Post, &routes::movie_rating(id), Some(body))
            .await
    }

    async fn delete_rating(
        &self,
        id: MovieId,
    ) -> Result<StatusResponse, ApiError> {
        self.call(HttpMethod::Delete, &routes::movie_rating(id), None)
            .await
    }

    async fn discover_movies(
        &self,
        query: &DiscoverQuery,
    ) -> Result<Page<Movie>, ApiError> {
        self.call(HttpMethod::Get, &routes::discover(query), None)
            .await
    }

    async fn fetch_person_changes(
        &self,
        page: u32,
    ) -> Result<Page<PersonChange>, ApiError> {
        self.call(HttpMethod::Get, &routes::person_changes(page), None)
            .await
    }
}

//! Hand-written `MovieApi` double for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cine_core::api::{NewSession, RequestToken, StatusResponse};
use cine_core::{ApiError, MovieApi};
use cine_model::{
    Account, DiscoverQuery, Movie, MovieDetails, MovieId, Page,
    PersonChange, Rating, Review, TimeWindow,
};
use tokio::sync::oneshot;

pub type TrendingResult = Result<Vec<Movie>, ApiError>;
/// Validated request token, or the error the validate step reports.
pub type LoginResult = Result<String, ApiError>;

enum TrendingReply {
    Ready(TrendingResult),
    Gated(oneshot::Receiver<TrendingResult>),
}

#[derive(Default)]
struct Inner {
    // Keyed by request language so concurrent callers are distinguishable.
    trending: HashMap<String, TrendingReply>,
    accounts: HashMap<String, Account>,
    // Keyed by username.
    logins: HashMap<String, oneshot::Receiver<LoginResult>>,
    calls: Vec<String>,
}

#[derive(Clone, Default)]
pub struct StubMovieApi {
    inner: Arc<Mutex<Inner>>,
}

pub fn status_error(status: u16, message: &str) -> ApiError {
    ApiError::Status {
        status,
        message: message.to_string(),
    }
}

impl StubMovieApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trending(&self, language: &str, result: TrendingResult) {
        self.inner
            .lock()
            .unwrap()
            .trending
            .insert(language.to_string(), TrendingReply::Ready(result));
    }

    /// The fetch for `language` stays pending until the sender fires.
    pub fn gate_trending(&self, language: &str) -> oneshot::Sender<TrendingResult> {
        let (tx, rx) = oneshot::channel();
        self.inner
            .lock()
            .unwrap()
            .trending
            .insert(language.to_string(), TrendingReply::Gated(rx));
        tx
    }

    /// Credential validation for `username` stays pending until the
    /// sender fires. A validated token `t` yields session id `sess-t`.
    pub fn gate_login(&self, username: &str) -> oneshot::Sender<LoginResult> {
        let (tx, rx) = oneshot::channel();
        self.inner
            .lock()
            .unwrap()
            .logins
            .insert(username.to_string(), rx);
        tx
    }

    pub fn account(&self, session_id: &str, account: Account) {
        self.inner
            .lock()
            .unwrap()
            .accounts
            .insert(session_id.to_string(), account);
    }

    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().calls.clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.inner.lock().unwrap().calls.push(call.into());
    }
}

#[async_trait]
impl MovieApi for StubMovieApi {
    async fn create_request_token(&self) -> Result<RequestToken, ApiError> {
        self.record("create_request_token");
        Ok(RequestToken {
            success: true,
            expires_at: None,
            request_token: "req-new".to_string(),
        })
    }

    async fn validate_with_login(
        &self,
        username: &str,
        _password: &str,
        _request_token: &str,
    ) -> Result<RequestToken, ApiError> {
        self.record(format!("validate_with_login:{username}"));
        let gate = self.inner.lock().unwrap().logins.remove(username);
        let Some(rx) = gate else {
            return Err(status_error(501, "not stubbed"));
        };
        let request_token = rx
            .await
            .unwrap_or_else(|_| Err(status_error(499, "gate dropped")))?;
        Ok(RequestToken {
            success: true,
            expires_at: None,
            request_token,
        })
    }

    async fn create_session(
        &self,
        request_token: &str,
    ) -> Result<NewSession, ApiError> {
        self.record(format!("create_session:{request_token}"));
        Ok(NewSession {
            success: true,
            session_id: format!("sess-{request_token}"),
        })
    }

    async fn fetch_account(&self, session_id: &str) -> Result<Account, ApiError> {
        self.record(format!("fetch_account:{session_id}"));
        self.inner
            .lock()
            .unwrap()
            .accounts
            .get(session_id)
            .cloned()
            .ok_or_else(|| {
                status_error(401, "Authentication failed: You do not have permissions to access the service.")
            })
    }

    async fn fetch_trending(
        &self,
        window: TimeWindow,
        language: &str,
    ) -> Result<Vec<Movie>, ApiError> {
        self.record(format!("fetch_trending:{window}:{language}"));
        let reply = self.inner.lock().unwrap().trending.remove(language);
        match reply {
            Some(TrendingReply::Ready(result)) => result,
            Some(TrendingReply::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(status_error(499, "gate dropped"))),
            None => Err(status_error(404, "no trending reply stubbed")),
        }
    }

    async fn fetch_movie_details(
        &self,
        id: MovieId,
    ) -> Result<MovieDetails, ApiError> {
        self.record(format!("fetch_movie_details:{id}"));
        Err(status_error(404, "not stubbed"))
    }

    async fn fetch_movie_reviews(
        &self,
        id: MovieId,
    ) -> Result<Vec<Review>, ApiError> {
        self.record(format!("fetch_movie_reviews:{id}"));
        Ok(Vec::new())
    }

    async fn rate_movie(
        &self,
        id: MovieId,
        rating: Rating,
    ) -> Result<StatusResponse, ApiError> {
        self.record(format!("rate_movie:{id}:{}", rating.value()));
        Ok(StatusResponse::default())
    }

    async fn delete_rating(
        &self,
        id: MovieId,
    ) -> Result<StatusResponse, ApiError> {
        self.record(format!("delete_rating:{id}"));
        Ok(StatusResponse::default())
    }

    async fn discover_movies(
        &self,
        query: &DiscoverQuery,
    ) -> Result<Page<Movie>, ApiError> {
        self.record(format!("discover_movies:{}", query.page));
        Ok(Page::default())
    }

    async fn fetch_person_changes(
        &self,
        page: u32,
    ) -> Result<Page<PersonChange>, ApiError> {
        self.record(format!("fetch_person_changes:{page}"));
        Ok(Page::default())
    }
}

//! Endpoint paths, relative to the configured API base URL.

use cine_model::{DiscoverQuery, MovieId, TimeWindow};
use url::form_urlencoded;

pub const REQUEST_TOKEN: &str = "/authentication/token/new";
pub const VALIDATE_WITH_LOGIN: &str =
    "/authentication/token/validate_with_login";
pub const NEW_SESSION: &str = "/authentication/session/new";

fn with_query<'a>(
    path: &str,
    pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

pub fn account(session_id: &str) -> String {
    with_query("/account", [("session_id", session_id)])
}

pub fn trending(window: TimeWindow, language: &str) -> String {
    with_query(
        &format!("/trending/movie/{}", window.as_str()),
        [("language", language)],
    )
}

pub fn movie(id: MovieId) -> String {
    format!("/movie/{id}")
}

pub fn movie_reviews(id: MovieId) -> String {
    format!("/movie/{id}/reviews")
}

pub fn movie_rating(id: MovieId) -> String {
    format!("/movie/{id}/rating")
}

pub fn discover(query: &DiscoverQuery) -> String {
    let pairs = query.to_query_pairs();
    with_query(
        "/discover/movie",
        pairs.iter().map(|(k, v)| (*k, v.as_str())),
    )
}

pub fn person_changes(page: u32) -> String {
    let page = page.to_string();
    with_query("/person/changes", [("page", page.as_str())])
}

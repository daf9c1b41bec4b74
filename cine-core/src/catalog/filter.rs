use cine_model::Movie;

/// Movies whose title contains `query`, ignoring case, in input order.
/// An empty query keeps everything.
pub fn filter_movies(movies: &[Movie], query: &str) -> Vec<Movie> {
    let needle = query.to_lowercase();
    movies
        .iter()
        .filter(|movie| movie.title_contains_lowercase(&needle))
        .cloned()
        .collect()
}

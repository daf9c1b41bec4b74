use cine_model::{Movie, MovieId};

/// Lifecycle of the most recent catalog fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Snapshot of everything the catalog store owns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogState {
    /// Last successful trending fetch, in API order.
    pub movies: Vec<Movie>,
    pub search_query: String,
    /// `movies` filtered by `search_query`. A fetch resets it to the full
    /// response without re-applying the query.
    pub filtered_movies: Vec<Movie>,
    /// Insertion-ordered; ids are unique.
    pub watchlist: Vec<Movie>,
    pub selected_movie_id: Option<MovieId>,
    pub status: FetchStatus,
    pub last_error: Option<String>,
}

impl CatalogState {
    pub fn is_in_watchlist(&self, id: MovieId) -> bool {
        self.watchlist.iter().any(|movie| movie.id == id)
    }

    /// Selected id with `-1` standing in for "none".
    pub fn selected_movie_id_or_sentinel(&self) -> i64 {
        self.selected_movie_id
            .map_or(MovieId::SENTINEL, MovieId::get)
    }

    /// The selected movie, looked up in the catalog first and the
    /// watchlist second.
    pub fn selected_movie(&self) -> Option<&Movie> {
        let id = self.selected_movie_id?;
        self.movies
            .iter()
            .chain(self.watchlist.iter())
            .find(|movie| movie.id == id)
    }
}

/// What a committed mutation changed. Delivered to subscribers together
/// with the new state.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogChange {
    FetchStarted,
    FetchSucceeded { count: usize },
    FetchFailed { message: String },
    SearchQueryChanged,
    WatchlistAdded(MovieId),
    WatchlistRemoved(MovieId),
    SelectionChanged(Option<MovieId>),
}

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use cine_model::{Movie, MovieId, TimeWindow};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use super::filter::filter_movies;
use super::state::{CatalogChange, CatalogState, FetchStatus};
use crate::api::MovieApi;

type Listener = Arc<dyn Fn(&CatalogState, &CatalogChange) + Send + Sync>;

/// Parameters of a trending fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub time_window: TimeWindow,
    pub language: String,
}

impl Default for FetchRequest {
    fn default() -> Self {
        Self {
            time_window: TimeWindow::Day,
            language: "en-US".to_string(),
        }
    }
}

impl FetchRequest {
    pub fn new(time_window: TimeWindow, language: impl Into<String>) -> Self {
        Self {
            time_window,
            language: language.into(),
        }
    }
}

/// Single source of truth for the trending catalog, the search filter, the
/// watchlist and the current selection.
///
/// Cloning yields another handle to the same store.
#[derive(Clone)]
pub struct MovieCatalogStore {
    inner: Arc<Inner>,
}

struct Inner {
    api: Arc<dyn MovieApi>,
    state: RwLock<CatalogState>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener_id: AtomicU64,
}

impl std::fmt::Debug for MovieCatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("MovieCatalogStore")
            .field("movies", &state.movies.len())
            .field("watchlist", &state.watchlist.len())
            .field("status", &state.status)
            .finish_non_exhaustive()
    }
}

impl MovieCatalogStore {
    pub fn new(api: Arc<dyn MovieApi>) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                state: RwLock::new(CatalogState::default()),
                listeners: Mutex::new(Vec::new()),
                next_listener_id: AtomicU64::new(0),
            }),
        }
    }

    /// Fetch one page of trending movies.
    ///
    /// `status` becomes `Loading` (and subscribers are told) when this is
    /// called, before the returned future is first polled. Success replaces
    /// `movies` and `filtered_movies` with the response; failure keeps them
    /// and records the message in `last_error`. Overlapping fetches are not
    /// coordinated: whichever completes last wins. The committed status is
    /// returned; errors are never propagated.
    pub fn fetch_catalog(
        &self,
        request: FetchRequest,
    ) -> impl Future<Output = FetchStatus> + Send + use<> {
        self.commit(|state| {
            state.status = FetchStatus::Loading;
            state.last_error = None;
            Some(CatalogChange::FetchStarted)
        });

        let store = self.clone();
        async move {
            let result = store
                .inner
                .api
                .fetch_trending(request.time_window, &request.language)
                .await;

            match result {
                Ok(movies) => {
                    let count = movies.len();
                    debug!(
                        count,
                        window = %request.time_window,
                        "catalog fetched"
                    );
                    store.commit(move |state| {
                        state.filtered_movies = movies.clone();
                        state.movies = movies;
                        state.status = FetchStatus::Succeeded;
                        Some(CatalogChange::FetchSucceeded { count })
                    });
                    FetchStatus::Succeeded
                }
                Err(err) => {
                    let message = err.message();
                    warn!(error = %err, "catalog fetch failed");
                    store.commit(move |state| {
                        state.status = FetchStatus::Failed;
                        state.last_error = Some(message.clone());
                        Some(CatalogChange::FetchFailed { message })
                    });
                    FetchStatus::Failed
                }
            }
        }
    }

    /// Store `query` and recompute `filtered_movies` from the full catalog.
    pub fn set_search_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.commit(move |state| {
            let filtered = filter_movies(&state.movies, &query);
            let unchanged = query == state.search_query
                && same_ids(&filtered, &state.filtered_movies);
            state.filtered_movies = filtered;
            state.search_query = query;
            (!unchanged).then_some(CatalogChange::SearchQueryChanged)
        });
    }

    /// Append `movie` unless an entry with the same id exists.
    pub fn add_to_watchlist(&self, movie: Movie) {
        self.commit(move |state| {
            if state.is_in_watchlist(movie.id) {
                return None;
            }
            let id = movie.id;
            state.watchlist.push(movie);
            Some(CatalogChange::WatchlistAdded(id))
        });
    }

    pub fn remove_from_watchlist(&self, id: MovieId) {
        self.commit(move |state| {
            let before = state.watchlist.len();
            state.watchlist.retain(|movie| movie.id != id);
            (state.watchlist.len() != before)
                .then_some(CatalogChange::WatchlistRemoved(id))
        });
    }

    /// `None` clears the selection.
    pub fn set_selected_movie_id(&self, id: Option<MovieId>) {
        self.commit(move |state| {
            if state.selected_movie_id == id {
                return None;
            }
            state.selected_movie_id = id;
            Some(CatalogChange::SelectionChanged(id))
        });
    }

    pub fn snapshot(&self) -> CatalogState {
        self.inner.state.read().clone()
    }

    pub fn status(&self) -> FetchStatus {
        self.inner.state.read().status
    }

    pub fn last_error(&self) -> Option<String> {
        self.inner.state.read().last_error.clone()
    }

    pub fn movies(&self) -> Vec<Movie> {
        self.inner.state.read().movies.clone()
    }

    pub fn filtered_movies(&self) -> Vec<Movie> {
        self.inner.state.read().filtered_movies.clone()
    }

    pub fn watchlist(&self) -> Vec<Movie> {
        self.inner.state.read().watchlist.clone()
    }

    pub fn search_query(&self) -> String {
        self.inner.state.read().search_query.clone()
    }

    pub fn selected_movie_id(&self) -> Option<MovieId> {
        self.inner.state.read().selected_movie_id
    }

    pub fn selected_movie(&self) -> Option<Movie> {
        self.inner.state.read().selected_movie().cloned()
    }

    pub fn is_in_watchlist(&self, id: MovieId) -> bool {
        self.inner.state.read().is_in_watchlist(id)
    }

    /// Register `listener` for every committed change until the returned
    /// [`Subscription`] is dropped.
    ///
    /// Listeners run on the mutating thread with no store lock held, so
    /// they may read from or write to the store.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&CatalogState, &CatalogChange) + Send + Sync + 'static,
    {
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.lock().push((id, Arc::new(listener)));
        Subscription {
            store: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Apply `mutate` under the write lock; notify listeners afterwards if
    /// it reported a change.
    fn commit<F>(&self, mutate: F)
    where
        F: FnOnce(&mut CatalogState) -> Option<CatalogChange>,
    {
        let (snapshot, change) = {
            let mut state = self.inner.state.write();
            match mutate(&mut state) {
                Some(change) => (state.clone(), change),
                None => return,
            }
        };

        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&snapshot, &change);
        }
    }
}

fn same_ids(a: &[Movie], b: &[Movie]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.id == y.id)
}

/// Handle returned by [`MovieCatalogStore::subscribe`]; delivery stops when
/// it is dropped.
#[derive(Debug)]
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    store: Weak<Inner>,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner.listeners.lock().retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MockMovieApi};
    use std::sync::Mutex as StdMutex;

    fn dune() -> Movie {
        Movie::new(1, "Dune")
    }

    fn moana() -> Movie {
        Movie::new(2, "Moana")
    }

    fn store_with(api: MockMovieApi) -> MovieCatalogStore {
        MovieCatalogStore::new(Arc::new(api))
    }

    #[tokio::test]
    async fn fetch_success_replaces_catalog() {
        let mut api = MockMovieApi::new();
        api.expect_fetch_trending()
            .withf(|window, lang| *window == TimeWindow::Day && lang == "en-US")
            .times(1)
            .returning(|_, _| Ok(vec![dune(), moana()]));
        let store = store_with(api);

        let status = store.fetch_catalog(FetchRequest::default()).await;

        assert_eq!(status, FetchStatus::Succeeded);
        assert_eq!(store.movies(), vec![dune(), moana()]);
        assert_eq!(store.filtered_movies(), store.movies());
    }

    #[tokio::test]
    async fn fetch_failure_keeps_previous_catalog() {
        let mut api = MockMovieApi::new();
        let mut calls = 0;
        api.expect_fetch_trending().times(2).returning(move |_, _| {
            calls += 1;
            if calls == 1 {
                Ok(vec![dune()])
            } else {
                Err(ApiError::Status {
                    status: 500,
                    message: "Internal error".into(),
                })
            }
        });
        let store = store_with(api);

        store.fetch_catalog(FetchRequest::default()).await;
        let status = store.fetch_catalog(FetchRequest::default()).await;

        assert_eq!(status, FetchStatus::Failed);
        assert_eq!(store.movies(), vec![dune()]);
        assert_eq!(store.last_error().as_deref(), Some("Internal error"));
    }

    #[test]
    fn loading_is_set_before_first_poll() {
        let store = store_with(MockMovieApi::new());
        let fut = store.fetch_catalog(FetchRequest::default());
        assert_eq!(store.status(), FetchStatus::Loading);
        drop(fut);
    }

    #[tokio::test]
    async fn fetch_does_not_reapply_search() {
        let mut api = MockMovieApi::new();
        api.expect_fetch_trending()
            .returning(|_, _| Ok(vec![dune(), moana()]));
        let store = store_with(api);
        store.set_search_query("du");

        store.fetch_catalog(FetchRequest::default()).await;

        assert_eq!(store.search_query(), "du");
        assert_eq!(store.filtered_movies(), vec![dune(), moana()]);

        store.set_search_query("du");
        assert_eq!(store.filtered_movies(), vec![dune()]);
    }

    #[test]
    fn watchlist_is_deduplicated_by_id() {
        let store = store_with(MockMovieApi::new());
        store.add_to_watchlist(Movie::new(1, "A"));
        store.add_to_watchlist(Movie::new(1, "A"));
        store.add_to_watchlist(Movie::new(1, "A (re-release)"));
        assert_eq!(store.watchlist().len(), 1);
        assert_eq!(store.watchlist()[0].title, "A");

        store.remove_from_watchlist(MovieId(1));
        store.remove_from_watchlist(MovieId(1));
        assert!(store.watchlist().is_empty());
    }

    #[test]
    fn no_op_mutations_do_not_notify() {
        let store = store_with(MockMovieApi::new());
        let seen = Arc::new(StdMutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = store.subscribe(move |_, change| {
            sink.lock().unwrap().push(change.clone());
        });

        store.add_to_watchlist(dune());
        store.add_to_watchlist(dune());
        store.remove_from_watchlist(MovieId(99));
        store.remove_from_watchlist(MovieId(1));
        store.set_selected_movie_id(None);
        store.set_search_query("");

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                CatalogChange::WatchlistAdded(MovieId(1)),
                CatalogChange::WatchlistRemoved(MovieId(1)),
            ]
        );
    }

    #[test]
    fn dropping_subscription_stops_delivery() {
        let store = store_with(MockMovieApi::new());
        let count = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&count);
        let sub = store.subscribe(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.set_selected_movie_id(Some(MovieId(3)));
        sub.unsubscribe();
        store.set_selected_movie_id(None);

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(store.selected_movie_id(), None);
    }

    #[test]
    fn listeners_may_reenter_the_store() {
        let store = store_with(MockMovieApi::new());
        let handle = store.clone();
        let _sub = store.subscribe(move |state, change| {
            if let CatalogChange::WatchlistAdded(id) = change {
                assert!(state.is_in_watchlist(*id));
                handle.set_selected_movie_id(Some(*id));
            }
        });

        store.add_to_watchlist(moana());
        assert_eq!(store.selected_movie_id(), Some(MovieId(2)));
        assert_eq!(store.selected_movie(), Some(moana()));
    }
}

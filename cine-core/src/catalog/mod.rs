//! Trending catalog, search filter, watchlist and selection.

mod filter;
mod state;
mod store;

pub use filter::filter_movies;
pub use state::{CatalogChange, CatalogState, FetchStatus};
pub use store::{FetchRequest, MovieCatalogStore, Subscription};

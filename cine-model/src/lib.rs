//! Core data model definitions shared across CineConnect crates.
//!
//! Everything here is plain data: identifiers, the movie records returned by
//! the movie database API, and the small validated values (ratings, time
//! windows, discover queries) that the client sends back. Wire decoding is
//! behind the `serde` feature; date helpers are behind `chrono`.
#![allow(missing_docs)]

pub mod account;
pub mod details;
pub mod discover;
pub mod error;
pub mod ids;
pub mod movie;
pub mod page;
pub mod person;
pub mod prelude;
pub mod rating;
pub mod review;
#[cfg(feature = "serde")]
mod serde_helpers;
pub mod time_window;

// Intentionally curated re-exports for downstream consumers.
pub use account::{Account, Avatar, GravatarAvatar, TmdbAvatar};
pub use details::{Genre, MovieDetails};
pub use discover::DiscoverQuery;
pub use error::{ModelError, Result as ModelResult};
pub use ids::MovieId;
pub use movie::Movie;
pub use page::Page;
pub use person::PersonChange;
pub use rating::Rating;
pub use review::Review;
pub use time_window::TimeWindow;

//! Flat snapshot of the model surface.
//! Prefer importing from this module in front-ends instead of individual
//! tree nodes.

pub use super::account::{Account, Avatar, GravatarAvatar, TmdbAvatar};
pub use super::details::{Genre, MovieDetails};
pub use super::discover::DiscoverQuery;
pub use super::error::ModelError;
pub use super::ids::MovieId;
pub use super::movie::Movie;
pub use super::page::Page;
pub use super::person::PersonChange;
pub use super::rating::Rating;
pub use super::review::Review;
pub use super::time_window::TimeWindow;

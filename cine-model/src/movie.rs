use crate::ids::MovieId;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A catalog entry as listed by the trending and discover endpoints.
///
/// Equality and hashing only look at [`Movie::id`]: two records with the same
/// id describe the same title even if one of them was fetched later with a
/// different poster.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Movie {
    pub id: MovieId,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::serde_helpers::null_as_default")
    )]
    pub title: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::serde_helpers::null_as_default")
    )]
    pub poster_path: String,
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            deserialize_with = "crate::serde_helpers::blank_as_none",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub release_date: Option<String>,
}

impl Movie {
    pub fn new(id: impl Into<MovieId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            poster_path: String::new(),
            release_date: None,
        }
    }

    pub fn with_poster_path(mut self, poster_path: impl Into<String>) -> Self {
        self.poster_path = poster_path.into();
        self
    }

    pub fn with_release_date(mut self, release_date: impl Into<String>) -> Self {
        let date = release_date.into();
        self.release_date = (!date.trim().is_empty()).then_some(date);
        self
    }

    /// Case-insensitive substring match against the title.
    ///
    /// `needle` must already be lowercased; callers filtering a whole list
    /// lowercase the query once.
    pub fn title_contains_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
    }

    /// Full poster URL for the given image base (e.g.
    /// `https://image.tmdb.org/t/p`) and size segment (e.g. `w500`).
    pub fn poster_url(&self, image_base_url: &str, size: &str) -> Option<String> {
        if self.poster_path.is_empty() {
            return None;
        }
        let path = if self.poster_path.starts_with('/') {
            self.poster_path.clone()
        } else {
            format!("/{}", self.poster_path)
        };
        Some(format!(
            "{}/{}{}",
            image_base_url.trim_end_matches('/'),
            size.trim_matches('/'),
            path
        ))
    }

    /// Year component of `release_date`, when it parses as `YYYY-MM-DD`.
    #[cfg(feature = "chrono")]
    pub fn release_year(&self) -> Option<i32> {
        use chrono::Datelike;

        self.release_date
            .as_deref()
            .and_then(|d| chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .map(|date| date.year())
    }
}

impl PartialEq for Movie {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Movie {}

impl Hash for Movie {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

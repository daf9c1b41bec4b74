use crate::ids::MovieId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Full record returned by `GET /movie/{id}`.
///
/// Only the identifier is guaranteed; the rest is decoded leniently because
/// unreleased titles routinely come back with nulls.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MovieDetails {
    pub id: MovieId,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::serde_helpers::null_as_default")
    )]
    pub title: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::serde_helpers::blank_as_none")
    )]
    pub tagline: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::serde_helpers::null_as_default")
    )]
    pub overview: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::serde_helpers::blank_as_none")
    )]
    pub poster_path: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::serde_helpers::blank_as_none")
    )]
    pub backdrop_path: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::serde_helpers::blank_as_none")
    )]
    pub release_date: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub runtime: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub vote_average: Option<f32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub vote_count: Option<u32>,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::serde_helpers::null_as_default")
    )]
    pub genres: Vec<Genre>,
}

impl MovieDetails {
    pub fn genre_names(&self) -> Vec<&str> {
        self.genres.iter().map(|g| g.name.as_str()).collect()
    }

    /// Runtime formatted as `2h 46m`; `None` when unknown or zero.
    pub fn runtime_label(&self) -> Option<String> {
        let minutes = self.runtime.filter(|m| *m > 0)?;
        let (hours, rest) = (minutes / 60, minutes % 60);
        Some(match (hours, rest) {
            (0, m) => format!("{m}m"),
            (h, 0) => format!("{h}h"),
            (h, m) => format!("{h}h {m}m"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(runtime: Option<u32>) -> MovieDetails {
        MovieDetails {
            id: MovieId(438631),
            title: "Dune".into(),
            tagline: None,
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            release_date: None,
            runtime,
            vote_average: None,
            vote_count: None,
            genres: vec![
                Genre { id: 878, name: "Science Fiction".into() },
                Genre { id: 12, name: "Adventure".into() },
            ],
        }
    }

    #[test]
    fn runtime_label_formats_hours_and_minutes() {
        assert_eq!(details(Some(155)).runtime_label().as_deref(), Some("2h 35m"));
        assert_eq!(details(Some(120)).runtime_label().as_deref(), Some("2h"));
        assert_eq!(details(Some(42)).runtime_label().as_deref(), Some("42m"));
        assert_eq!(details(Some(0)).runtime_label(), None);
        assert_eq!(details(None).runtime_label(), None);
    }

    #[test]
    fn genre_names_keep_api_order() {
        assert_eq!(details(None).genre_names(), vec!["Science Fiction", "Adventure"]);
    }
}

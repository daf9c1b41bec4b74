use crate::error::ModelError;
use std::str::FromStr;

/// Strongly typed movie identifier as issued by the movie database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MovieId(pub i64);

impl MovieId {
    /// Wire encoding of "no movie" used by callers that cannot carry an
    /// `Option`.
    pub const SENTINEL: i64 = -1;

    pub fn new(raw: i64) -> Self {
        MovieId(raw)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for MovieId {
    fn from(raw: i64) -> Self {
        MovieId(raw)
    }
}

impl std::fmt::Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for MovieId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(MovieId)
            .map_err(|_| ModelError::InvalidMovieId(s.to_string()))
    }
}

use std::fmt::{self, Display};

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    InvalidRating(f32),
    InvalidMovieId(String),
    InvalidTimeWindow(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidRating(value) => write!(
                f,
                "invalid rating {value}: expected a value between {} and {}",
                crate::rating::Rating::MIN,
                crate::rating::Rating::MAX
            ),
            ModelError::InvalidMovieId(raw) => {
                write!(f, "invalid movie id: {raw}")
            }
            ModelError::InvalidTimeWindow(raw) => {
                write!(f, "invalid time window '{raw}': expected day or week")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;

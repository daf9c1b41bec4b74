#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A user review from `GET /movie/{id}/reviews`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Review {
    pub id: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::serde_helpers::null_as_default")
    )]
    pub author: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::serde_helpers::null_as_default")
    )]
    pub content: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub url: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub created_at: Option<String>,
}

impl Review {
    /// First `max_chars` characters of the review body, with an ellipsis when
    /// truncated.
    pub fn excerpt(&self, max_chars: usize) -> String {
        let trimmed = self.content.trim();
        if trimmed.chars().count() <= max_chars {
            return trimmed.to_string();
        }
        let mut out: String = trimmed.chars().take(max_chars).collect();
        out.push('…');
        out
    }
}

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Entry of the `/person/changes` feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PersonChange {
    pub id: i64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub adult: Option<bool>,
}

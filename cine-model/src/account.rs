#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GravatarAvatar {
    #[cfg_attr(feature = "serde", serde(default))]
    pub hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TmdbAvatar {
    #[cfg_attr(feature = "serde", serde(default))]
    pub avatar_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Avatar {
    #[cfg_attr(feature = "serde", serde(default))]
    pub gravatar: Option<GravatarAvatar>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tmdb: Option<TmdbAvatar>,
}

/// Account details from `GET /account?session_id=...`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Account {
    pub id: i64,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::serde_helpers::null_as_default")
    )]
    pub name: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::serde_helpers::null_as_default")
    )]
    pub username: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub avatar: Option<Avatar>,
}

impl Account {
    /// Account id with the middle digits hidden: ids of up to four digits are
    /// shown as-is, longer ones keep two leading and two trailing digits.
    pub fn masked_id(&self) -> String {
        let digits = self.id.to_string();
        let chars: Vec<char> = digits.chars().collect();
        if chars.len() <= 4 {
            return digits;
        }
        let head: String = chars[..2].iter().collect();
        let tail: String = chars[chars.len() - 2..].iter().collect();
        format!("{head}***{tail}")
    }

    /// `name` when set, otherwise the login name.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.username
        } else {
            &self.name
        }
    }

    /// Relative path of the uploaded avatar, if the user set one.
    pub fn avatar_path(&self) -> Option<&str> {
        self.avatar
            .as_ref()
            .and_then(|a| a.tmdb.as_ref())
            .and_then(|t| t.avatar_path.as_deref())
            .filter(|p| !p.is_empty())
    }
}

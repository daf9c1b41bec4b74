//! Lenient field decoders for the movie database's JSON.
//!
//! The API is inconsistent about missing values: the same field may be
//! absent, `null`, or an empty string depending on the endpoint.

use serde::{Deserialize, Deserializer};

/// `null` decodes to `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `null`, `""` and whitespace-only strings decode to `None`.
pub(crate) fn blank_as_none<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|value| !value.trim().is_empty()))
}

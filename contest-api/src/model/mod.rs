//! Resource kinds of the CCS API and the capability contract they share.

use std::fmt;

use serde::de::DeserializeOwned;

use crate::error::ApiError;

mod clarification;
mod contest;
mod judgement;
mod language;
mod problem;
mod scoreboard;
mod submission;
mod team;

pub use clarification::*;
pub use contest::*;
pub use judgement::*;
pub use language::*;
pub use problem::*;
pub use scoreboard::*;
pub use submission::*;
pub use team::*;

/// A kind of resource that can be fetched through [`crate::fetch`].
///
/// `Default` provides the zero-valued instance every field falls back to
/// when it is absent from (or `null` in) the JSON object.
pub trait Resource: DeserializeOwned + Default + fmt::Display {
    /// Path segment of the collection, also used in error messages.
    const KIND: &'static str;

    fn collection_path(contest_id: &str) -> String {
        format!("contests/{}/{}", contest_id, Self::KIND)
    }

    /// Returns the collection path, or the single-resource path when `id` is
    /// not empty.
    fn path(contest_id: &str, id: Option<&str>) -> String {
        let collection = Self::collection_path(contest_id);
        match id {
            Some(id) if !id.is_empty() => format!("{}/{}", collection, id),
            _ => collection,
        }
    }

    /// Decodes exactly one JSON object.
    fn decode(bytes: &[u8]) -> Result<Self, ApiError> {
        serde_json::from_slice(bytes).map_err(ApiError::Decode)
    }

    /// Multi-line representation for terminal output.
    fn render(&self) -> String {
        self.to_string()
    }
}

/// Deserializes JSON `null` as the zero value of `T`.
pub(crate) mod nullable {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: Default + Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}

/// Case-insensitive string comparison.
pub fn eq_fold(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Writes `key: value` lines with keys aligned to the right.
pub(crate) fn write_fields(
    f: &mut fmt::Formatter,
    fields: &[(&str, &dyn fmt::Display)],
) -> fmt::Result {
    let width = fields.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    fields.iter().enumerate().try_for_each(|(i, (key, value))| {
        write!(
            f,
            "{}{:>width$}: {}",
            if i == 0 { "" } else { "\n" },
            key,
            value,
            width = width
        )
    })
}

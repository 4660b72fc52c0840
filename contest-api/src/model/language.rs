use std::fmt;

use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};

use crate::model::{nullable, write_fields, Resource};

#[derive(
    Serialize, Deserialize, Getters, CopyGetters, Default, Debug, Clone, PartialEq, Eq, Hash,
)]
#[serde(default)]
pub struct Language {
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    id: String,
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    name: String,
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    extensions: Vec<String>,
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get_copy = "pub"]
    entry_point_required: bool,
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    entry_point_name: String,
}

impl Language {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        extensions: &[&str],
        entry_point_required: bool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extensions: extensions.iter().map(|ext| ext.to_string()).collect(),
            entry_point_required,
            entry_point_name: String::new(),
        }
    }

    pub fn find<'a>(languages: &'a [Language], id: &str) -> Option<&'a Language> {
        languages.iter().find(|language| language.id == id)
    }

    /// First language declaring `extension`, compared case-insensitively.
    pub fn find_by_extension<'a>(
        languages: &'a [Language],
        extension: &str,
    ) -> Option<&'a Language> {
        let extension = extension.to_lowercase();
        languages.iter().find(|language| {
            language
                .extensions
                .iter()
                .any(|ext| ext.to_lowercase() == extension)
        })
    }
}

impl Resource for Language {
    const KIND: &'static str = "languages";
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let extensions = self.extensions.join(", ");
        write_fields(
            f,
            &[
                ("id", &self.id),
                ("name", &self.name),
                ("extensions", &extensions),
                ("entry point required", &self.entry_point_required),
            ],
        )
    }
}

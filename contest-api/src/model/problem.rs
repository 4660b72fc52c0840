use std::fmt;

use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};

use crate::model::{eq_fold, nullable, write_fields, Resource};

#[derive(
    Serialize, Deserialize, Getters, CopyGetters, Default, Debug, Clone, PartialEq, Eq, Hash,
)]
#[serde(default)]
pub struct Problem {
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    id: String,
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    label: String,
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    name: String,
    #[get_copy = "pub"]
    ordinal: i64,
}

impl Problem {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        name: impl Into<String>,
        ordinal: i64,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            name: name.into(),
            ordinal,
        }
    }

    /// Case-insensitive match on id, label or name.
    pub fn matches(&self, key: &str) -> bool {
        eq_fold(&self.id, key) || eq_fold(&self.label, key) || eq_fold(&self.name, key)
    }

    pub fn find<'a>(problems: &'a [Problem], key: &str) -> Option<&'a Problem> {
        problems.iter().find(|problem| problem.matches(key))
    }

    /// Exact match on id, as referenced by other resources.
    pub fn find_by_id<'a>(problems: &'a [Problem], id: &str) -> Option<&'a Problem> {
        problems.iter().find(|problem| problem.id == id)
    }
}

impl Resource for Problem {
    const KIND: &'static str = "problems";
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_fields(
            f,
            &[
                ("id", &self.id),
                ("label", &self.label),
                ("name", &self.name),
                ("ordinal", &self.ordinal),
            ],
        )
    }
}

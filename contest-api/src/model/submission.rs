use std::fmt;

use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};

use crate::model::{nullable, write_fields, Resource};
use crate::time::{ApiRelTime, ApiTime};

#[derive(
    Serialize, Deserialize, Getters, CopyGetters, Default, Debug, Clone, PartialEq, Eq, Hash,
)]
#[serde(default)]
pub struct Submission {
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    id: String,
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    language_id: String,
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    problem_id: String,
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    team_id: String,
    #[get_copy = "pub"]
    time: ApiTime,
    #[get_copy = "pub"]
    contest_time: ApiRelTime,
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    entry_point: String,
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    external_id: String,
}

impl Submission {
    pub fn new(
        id: impl Into<String>,
        team_id: impl Into<String>,
        problem_id: impl Into<String>,
        language_id: impl Into<String>,
        contest_time: ApiRelTime,
    ) -> Self {
        Self {
            id: id.into(),
            team_id: team_id.into(),
            problem_id: problem_id.into(),
            language_id: language_id.into(),
            contest_time,
            ..Self::default()
        }
    }
}

impl Resource for Submission {
    const KIND: &'static str = "submissions";
}

impl fmt::Display for Submission {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_fields(
            f,
            &[
                ("id", &self.id),
                ("language id", &self.language_id),
                ("contest time", &self.contest_time),
                ("team id", &self.team_id),
                ("problem id", &self.problem_id),
                ("external id", &self.external_id),
                ("entry point", &self.entry_point),
            ],
        )
    }
}

use std::fmt;

use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};

use crate::model::nullable;
use crate::time::{ApiRelTime, ApiTime};

/// Scoreboard of a contest, fetched as a single object.
#[derive(Serialize, Deserialize, Getters, CopyGetters, Default, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Scoreboard {
    #[get_copy = "pub"]
    time: ApiTime,
    #[get_copy = "pub"]
    contest_time: ApiRelTime,
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    rows: Vec<ScoreboardRow>,
}

impl Scoreboard {
    pub fn path(contest_id: &str) -> String {
        format!("contests/{}/scoreboard", contest_id)
    }
}

#[derive(Serialize, Deserialize, Getters, CopyGetters, Default, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ScoreboardRow {
    #[get_copy = "pub"]
    rank: i64,
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    team_id: String,
    #[get = "pub"]
    score: Score,
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    problems: Vec<ProblemScore>,
}

impl ScoreboardRow {
    pub fn has_solved(&self, problem_id: &str) -> bool {
        self.problems
            .iter()
            .any(|problem| problem.solved && problem.problem_id == problem_id)
    }
}

#[derive(Serialize, Deserialize, CopyGetters, Default, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
#[get_copy = "pub"]
pub struct Score {
    num_solved: i64,
    total_time: TotalTime,
}

/// Penalty time, sent either as whole minutes or as a relative time.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum TotalTime {
    Minutes(i64),
    Relative(ApiRelTime),
}

impl TotalTime {
    pub fn minutes(self) -> i64 {
        match self {
            Self::Minutes(minutes) => minutes,
            Self::Relative(rel_time) => rel_time.num_minutes(),
        }
    }
}

impl Default for TotalTime {
    fn default() -> Self {
        Self::Minutes(0)
    }
}

impl fmt::Display for TotalTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.minutes())
    }
}

#[derive(Serialize, Deserialize, Getters, CopyGetters, Default, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ProblemScore {
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    problem_id: String,
    #[get_copy = "pub"]
    num_judged: i64,
    #[get_copy = "pub"]
    num_pending: i64,
    #[get_copy = "pub"]
    solved: bool,
}

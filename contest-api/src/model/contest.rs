use std::fmt;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};

use crate::model::{nullable, write_fields, Resource};
use crate::time::{ApiRelTime, ApiTime};

#[derive(
    Serialize, Deserialize, Getters, CopyGetters, Default, Debug, Clone, PartialEq, Eq, Hash,
)]
#[serde(default)]
pub struct Contest {
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    id: String,
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    name: String,
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    formal_name: String,
    #[get_copy = "pub"]
    start_time: ApiTime,
    #[get_copy = "pub"]
    duration: ApiRelTime,
    #[get_copy = "pub"]
    scoreboard_freeze_duration: ApiRelTime,
    #[get_copy = "pub"]
    countdown_pause_time: ApiRelTime,
}

impl Contest {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start_time: ApiTime,
        duration: ApiRelTime,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start_time,
            duration,
            ..Self::default()
        }
    }

    pub fn with_countdown_pause_time(mut self, countdown_pause_time: ApiRelTime) -> Self {
        self.countdown_pause_time = countdown_pause_time;
        self
    }

    /// Name to show to users, falling back to the id.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    pub fn is_unscheduled(&self) -> bool {
        self.start_time.is_zero()
    }

    /// The start countdown was paused by the organizers.
    pub fn is_paused(&self) -> bool {
        self.is_unscheduled() && !self.countdown_pause_time.is_zero()
    }

    pub fn end_time(&self) -> Option<DateTime<FixedOffset>> {
        self.start_time
            .time()
            .map(|start| start + self.duration.duration())
    }

    /// Whether `now` lies in `[start_time, start_time + duration)`.
    pub fn is_running_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        let now = now.with_timezone(&Utc);
        match (self.start_time.time(), self.end_time()) {
            (Some(start), Some(end)) => {
                start.with_timezone(&Utc) <= now && now < end.with_timezone(&Utc)
            }
            _ => false,
        }
    }
}

impl Resource for Contest {
    const KIND: &'static str = "contests";

    fn collection_path(_contest_id: &str) -> String {
        String::from(Self::KIND)
    }

    // a single contest is fetched through `ContestsApi::contest`
    fn path(contest_id: &str, _id: Option<&str>) -> String {
        Self::collection_path(contest_id)
    }
}

impl fmt::Display for Contest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_fields(
            f,
            &[
                ("id", &self.id),
                ("name", &self.name),
                ("formal name", &self.formal_name),
                ("start time", &self.start_time),
                ("duration", &self.duration),
            ],
        )
    }
}

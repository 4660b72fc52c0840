//! Codec for the two time representations used by the CCS API.
//!
//! - [`ApiTime`] : absolute wall-clock timestamps (RFC 3339, or RFC 3339
//!   without the minutes of the timezone offset)
//! - [`ApiRelTime`] : contest-relative durations (`[-]H:MM:SS[.mmm]`)
//!
//! Both decode JSON `null` to their zero value.

use std::fmt;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ApiError;

static NULL_LITERAL: &str = "null";

// RFC 3339 without the minutes of the timezone, e.g. `2020-03-01T10:00:00+01`
static TIME_FORMAT_SHORT_OFFSET: &str = "%Y-%m-%dT%H:%M:%S%.f%#z";

static REL_TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-?[0-9]{1,2}):([0-9]{2}):([0-9]{2})(?:\.([0-9]{1,3}))?$").unwrap()
});

/// Absolute point in time. The zero value means "not set".
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiTime(Option<DateTime<FixedOffset>>);

impl ApiTime {
    pub fn new(time: DateTime<FixedOffset>) -> Self {
        Self(Some(time))
    }

    /// Decodes an (already unquoted) JSON string value or the literal `null`.
    pub fn parse(text: &str) -> Result<Self, ApiError> {
        if text == NULL_LITERAL {
            return Ok(Self::default());
        }
        DateTime::parse_from_rfc3339(text)
            .or_else(|_| DateTime::parse_from_str(text, TIME_FORMAT_SHORT_OFFSET))
            .map(Self::new)
            .map_err(|_| ApiError::time_format(text))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_none()
    }

    pub fn time(&self) -> Option<DateTime<FixedOffset>> {
        self.0
    }

    /// Calendar date of this time in the local timezone.
    pub fn local_date(&self) -> Option<NaiveDate> {
        self.0.map(|t| t.with_timezone(&Local).date_naive())
    }
}

impl From<DateTime<FixedOffset>> for ApiTime {
    fn from(time: DateTime<FixedOffset>) -> Self {
        Self::new(time)
    }
}

impl fmt::Display for ApiTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Some(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S%.f %:z")),
            None => f.write_str("-"),
        }
    }
}

impl<'de> Deserialize<'de> for ApiTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => Self::parse(&text).map_err(de::Error::custom),
            None => Ok(Self::default()),
        }
    }
}

impl Serialize for ApiTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Some(t) => serializer.serialize_str(&t.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }
}

/// Signed duration relative to the start of a contest.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiRelTime(Duration);

impl ApiRelTime {
    pub fn from_millis(millis: i64) -> Self {
        Self(Duration::milliseconds(millis))
    }

    /// Decodes an (already unquoted) JSON string value or the literal `null`.
    ///
    /// Only the hour field carries the sign: minutes, seconds and
    /// milliseconds are always added, so `-1:30:00` is minus thirty minutes.
    pub fn parse(text: &str) -> Result<Self, ApiError> {
        if text == NULL_LITERAL {
            return Ok(Self::default());
        }
        let caps = REL_TIME_REGEX
            .captures(text)
            .ok_or_else(|| ApiError::time_format(text))?;
        let field = |value: &str| -> Result<i64, ApiError> {
            value.parse().map_err(|_| ApiError::time_format(text))
        };
        let hours = field(&caps[1])?;
        let minutes = field(&caps[2])?;
        let seconds = field(&caps[3])?;
        // `.7` is seven tenths of a second, not seven milliseconds
        let millis = match caps.get(4) {
            Some(frac) => field(&format!("{:0<3}", frac.as_str()))?,
            None => 0,
        };
        Ok(Self::from_millis(
            hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis,
        ))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == Duration::zero()
    }

    pub fn duration(&self) -> Duration {
        self.0
    }

    pub fn num_millis(&self) -> i64 {
        self.0.num_milliseconds()
    }

    pub fn num_minutes(&self) -> i64 {
        self.0.num_minutes()
    }

    fn to_wire_string(self) -> String {
        let millis = self.num_millis();
        let abs = millis.unsigned_abs();
        format!(
            "{}{}:{:02}:{:02}.{:03}",
            if millis < 0 { "-" } else { "" },
            abs / 3_600_000,
            abs / 60_000 % 60,
            abs / 1_000 % 60,
            abs % 1_000
        )
    }
}

impl Default for ApiRelTime {
    fn default() -> Self {
        Self(Duration::zero())
    }
}

impl From<Duration> for ApiRelTime {
    fn from(duration: Duration) -> Self {
        Self(duration)
    }
}

impl fmt::Display for ApiRelTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let millis = self.num_millis();
        if millis < 0 {
            f.write_str("-")?;
        }
        let magnitude = StdDuration::from_millis(millis.unsigned_abs());
        write!(f, "{}", humantime::format_duration(magnitude))
    }
}

impl<'de> Deserialize<'de> for ApiRelTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => Self::parse(&text).map_err(de::Error::custom),
            None => Ok(Self::default()),
        }
    }
}

impl Serialize for ApiRelTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_wire_string())
    }
}

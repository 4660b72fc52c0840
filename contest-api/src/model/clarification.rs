use std::fmt;

use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};

use crate::model::{nullable, write_fields, Resource};
use crate::time::{ApiRelTime, ApiTime};

#[derive(
    Serialize, Deserialize, Getters, CopyGetters, Default, Debug, Clone, PartialEq, Eq, Hash,
)]
#[serde(default)]
pub struct Clarification {
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    id: String,
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    from_team_id: String,
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    to_team_id: String,
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    reply_to_id: String,
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    problem_id: String,
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    text: String,
    #[get_copy = "pub"]
    time: ApiTime,
    #[get_copy = "pub"]
    contest_time: ApiRelTime,
}

impl Clarification {
    pub fn new(
        id: impl Into<String>,
        from_team_id: impl Into<String>,
        to_team_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            from_team_id: from_team_id.into(),
            to_team_id: to_team_id.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn kind(&self) -> ClarificationKind {
        if !self.from_team_id.is_empty() {
            ClarificationKind::Request
        } else if !self.to_team_id.is_empty() {
            ClarificationKind::Response
        } else {
            ClarificationKind::Broadcast
        }
    }
}

#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ClarificationKind {
    Broadcast,
    Request,
    Response,
}

impl fmt::Display for ClarificationKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Broadcast => "Broadcast message from jury",
            Self::Request => "Clarification sent to jury",
            Self::Response => "Response from jury",
        })
    }
}

impl Resource for Clarification {
    const KIND: &'static str = "clarifications";
}

impl fmt::Display for Clarification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = self.kind();
        write_fields(
            f,
            &[
                ("id", &self.id),
                ("kind", &kind),
                ("problem id", &self.problem_id),
                ("contest time", &self.contest_time),
                ("text", &self.text),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clarification_kind() -> anyhow::Result<()> {
        let json = r#"{"id": "1", "from_team_id": null, "to_team_id": null,
            "problem_id": null, "text": "Contest extended", "contest_time": "1:00:00"}"#;
        let clar = Clarification::decode(json.as_bytes())?;
        assert_eq!(clar.kind(), ClarificationKind::Broadcast);
        assert_eq!(
            Clarification::new("2", "11", "", "?").kind(),
            ClarificationKind::Request
        );
        assert_eq!(
            Clarification::new("3", "", "11", "!").kind(),
            ClarificationKind::Response
        );
        Ok(())
    }
}

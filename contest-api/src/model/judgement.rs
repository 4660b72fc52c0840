use std::fmt;

use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};

use crate::model::{nullable, write_fields, Resource};
use crate::time::{ApiRelTime, ApiTime};

#[derive(
    Serialize, Deserialize, Getters, CopyGetters, Default, Debug, Clone, PartialEq, Eq, Hash,
)]
#[serde(default)]
pub struct Judgement {
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    id: String,
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    submission_id: String,
    #[serde(deserialize_with = "nullable::deserialize")]
    judgement_type_id: String,
    #[get_copy = "pub"]
    start_time: ApiTime,
    #[get_copy = "pub"]
    start_contest_time: ApiRelTime,
    #[get_copy = "pub"]
    end_time: ApiTime,
    #[get_copy = "pub"]
    end_contest_time: ApiRelTime,
}

impl Judgement {
    pub fn new(
        id: impl Into<String>,
        submission_id: impl Into<String>,
        judgement_type_id: Option<&str>,
        end_contest_time: ApiRelTime,
    ) -> Self {
        Self {
            id: id.into(),
            submission_id: submission_id.into(),
            judgement_type_id: judgement_type_id.unwrap_or_default().to_string(),
            end_contest_time,
            ..Self::default()
        }
    }

    /// `None` while judging is still in progress.
    pub fn judgement_type_id(&self) -> Option<&str> {
        Some(self.judgement_type_id.as_str()).filter(|id| !id.is_empty())
    }

    /// All judgements of a submission, in their original order.
    pub fn for_submission<'a>(
        judgements: &'a [Judgement],
        submission_id: &str,
    ) -> Vec<&'a Judgement> {
        judgements
            .iter()
            .filter(|judgement| judgement.submission_id == submission_id)
            .collect()
    }
}

impl Resource for Judgement {
    const KIND: &'static str = "judgements";
}

impl fmt::Display for Judgement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_fields(
            f,
            &[
                ("id", &self.id),
                ("submission id", &self.submission_id),
                ("start contest time", &self.start_contest_time),
                ("end contest time", &self.end_contest_time),
                ("judgement type id", &self.judgement_type_id),
            ],
        )
    }
}

#[derive(
    Serialize, Deserialize, Getters, CopyGetters, Default, Debug, Clone, PartialEq, Eq, Hash,
)]
#[serde(default)]
pub struct JudgementType {
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    id: String,
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get = "pub"]
    name: String,
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get_copy = "pub"]
    penalty: bool,
    #[serde(deserialize_with = "nullable::deserialize")]
    #[get_copy = "pub"]
    solved: bool,
}

impl JudgementType {
    pub fn new(id: impl Into<String>, name: impl Into<String>, penalty: bool, solved: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            penalty,
            solved,
        }
    }

    pub fn find<'a>(judgement_types: &'a [JudgementType], id: &str) -> Option<&'a JudgementType> {
        judgement_types.iter().find(|jt| jt.id == id)
    }
}

impl Resource for JudgementType {
    const KIND: &'static str = "judgement-types";
}

impl fmt::Display for JudgementType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_fields(
            f,
            &[
                ("id", &self.id),
                ("name", &self.name),
                ("penalty", &self.penalty),
                ("solved", &self.solved),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn judgement_in_progress() -> anyhow::Result<()> {
        let json = r#"{"id": "1", "submission_id": "5", "judgement_type_id": null,
            "start_contest_time": "1:00:00", "end_contest_time": null}"#;
        let judgement = Judgement::decode(json.as_bytes())?;
        assert_eq!(judgement.judgement_type_id(), None);
        assert!(judgement.end_contest_time().is_zero());

        let judgement = Judgement::decode(br#"{"id": "2", "judgement_type_id": "AC"}"#)?;
        assert_eq!(judgement.judgement_type_id(), Some("AC"));

        let judgement = Judgement::decode(br#"{"id": null, "submission_id": null}"#)?;
        assert_eq!(judgement.id(), "");
        assert_eq!(judgement.submission_id(), "");
        Ok(())
    }

    #[test]
    fn judgements_for_submission_keeps_all() {
        let judgements = vec![
            Judgement::new("1", "5", Some("WA"), ApiRelTime::from_millis(1)),
            Judgement::new("2", "6", Some("AC"), ApiRelTime::from_millis(2)),
            Judgement::new("3", "5", None, ApiRelTime::default()),
        ];
        let ids = Judgement::for_submission(&judgements, "5")
            .into_iter()
            .map(|j| j.id().as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["1", "3"]);
        assert!(Judgement::for_submission(&judgements, "7").is_empty());
    }

    #[test]
    fn decode_judgement_type() -> anyhow::Result<()> {
        let json = r#"{"id": "WA", "name": "Wrong Answer", "penalty": true, "solved": false}"#;
        let judgement_type = JudgementType::decode(json.as_bytes())?;
        assert_eq!(
            judgement_type,
            JudgementType::new("WA", "Wrong Answer", true, false)
        );
        let types = vec![judgement_type];
        assert!(JudgementType::find(&types, "WA").is_some());
        assert!(JudgementType::find(&types, "AC").is_none());
        Ok(())
    }
}

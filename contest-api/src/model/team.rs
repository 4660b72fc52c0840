use std::fmt;

use getset::Getters;
use serde::{Deserialize, Serialize};

use crate::model::{nullable, write_fields, Resource};

#[derive(Serialize, Deserialize, Getters, Default, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(default)]
#[get = "pub"]
pub struct Team {
    #[serde(deserialize_with = "nullable::deserialize")]
    id: String,
    #[serde(deserialize_with = "nullable::deserialize")]
    name: String,
    #[serde(deserialize_with = "nullable::deserialize")]
    display_name: String,
    #[serde(deserialize_with = "nullable::deserialize")]
    organization_id: String,
}

impl Team {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Display name when present, otherwise name.
    pub fn preferred_name(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }

    pub fn find<'a>(teams: &'a [Team], id: &str) -> Option<&'a Team> {
        teams.iter().find(|team| team.id == id)
    }
}

impl Resource for Team {
    const KIND: &'static str = "teams";
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_fields(
            f,
            &[
                ("id", &self.id),
                ("name", &self.preferred_name()),
                ("organization id", &self.organization_id),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferred_name() -> anyhow::Result<()> {
        assert_eq!(Team::new("1", "team").preferred_name(), "team");
        let team = Team::new("1", "team").with_display_name("The Team");
        assert_eq!(team.preferred_name(), "The Team");

        let team = Team::decode(br#"{"id": "2", "name": "t2", "display_name": null}"#)?;
        assert_eq!(team.preferred_name(), "t2");
        Ok(())
    }
}

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use structopt::StructOpt;

use crate::cmd::{ConfigWrittenOutcome, Outcome, Run};
use crate::{Config, ConfigKey, Console, Result};

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
#[structopt(rename_all = "kebab")]
pub enum ConfigOpt {
    /// Lists the values of the config file
    List,
    /// Sets baseurl, contest, insecure or timeout
    Set { key: String, value: String },
    /// Resets a key to its default value
    Delete { key: String },
}

impl Run for ConfigOpt {
    fn run(&self, conf: &Config, _cnsl: &mut Console) -> Result<Box<dyn Outcome>> {
        let mut stored = conf.stored().clone();
        match self {
            Self::List => {
                return Ok(Box::new(ConfigListOutcome {
                    path: conf.path().clone(),
                    entries: stored
                        .entries()
                        .into_iter()
                        .map(|(key, value)| (key.to_string(), value))
                        .collect(),
                }))
            }
            Self::Set { key, value } => stored.set(ConfigKey::parse_editable(key)?, value)?,
            Self::Delete { key } => stored.delete(ConfigKey::parse_editable(key)?),
        }
        Ok(Box::new(ConfigWrittenOutcome::save(conf, &stored)?))
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigListOutcome {
    path: PathBuf,
    entries: Vec<(String, String)>,
}

impl fmt::Display for ConfigListOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "The current config is:")?;
        let width = self.entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
        for (key, value) in &self.entries {
            write!(f, "\n  {:width$} : {}", key, value, width = width)?;
        }
        Ok(())
    }
}

impl Outcome for ConfigListOutcome {}

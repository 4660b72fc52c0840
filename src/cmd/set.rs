use structopt::StructOpt;

use crate::cmd::{ConfigWrittenOutcome, Outcome, Run};
use crate::{Config, ConfigKey, Console, Result};

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
#[structopt(rename_all = "kebab")]
pub enum SetOpt {
    /// Stores the base URL of the contest API
    Url { url: String },
    /// Stores the contest id
    Id { id: String },
}

impl Run for SetOpt {
    fn run(&self, conf: &Config, _cnsl: &mut Console) -> Result<Box<dyn Outcome>> {
        let mut stored = conf.stored().clone();
        match self {
            Self::Url { url } => stored.set(ConfigKey::Baseurl, url)?,
            Self::Id { id } => stored.set(ConfigKey::Contest, id)?,
        }
        Ok(Box::new(ConfigWrittenOutcome::save(conf, &stored)?))
    }
}

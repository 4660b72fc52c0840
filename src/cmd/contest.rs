use std::fmt;

use contest_api::model::Contest;
use contest_api::{ContestsApi, Transport};
use serde::Serialize;
use structopt::StructOpt;

use crate::cmd::{write_resources, Outcome, Run};
use crate::{Config, Console, Result};

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
#[structopt(rename_all = "kebab")]
pub struct ContestOpt {
    /// Lists all contests even if a contest id is set
    #[structopt(long, short = "a")]
    all: bool,
}

impl ContestOpt {
    fn fetch<T: Transport + ?Sized>(
        &self,
        conf: &Config,
        transport: &T,
        cnsl: &mut Console,
    ) -> Result<ContestOutcome> {
        let api = ContestsApi::new(transport);
        let contests = match conf.contest_id() {
            Some(contest_id) if !self.all => vec![api.contest(contest_id, cnsl)?],
            _ => api.contests(cnsl)?,
        };
        Ok(ContestOutcome { contests })
    }
}

impl Run for ContestOpt {
    fn run(&self, conf: &Config, cnsl: &mut Console) -> Result<Box<dyn Outcome>> {
        let session = conf.open_session()?;
        Ok(Box::new(self.fetch(conf, &session, cnsl)?))
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContestOutcome {
    contests: Vec<Contest>,
}

impl fmt::Display for ContestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_resources(f, &self.contests)
    }
}

impl Outcome for ContestOutcome {}

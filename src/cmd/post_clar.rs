use std::fmt;

use contest_api::Transport;
use serde::Serialize;
use structopt::StructOpt;

use crate::cmd::{Outcome, Run};
use crate::{Config, Console, Result};

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
#[structopt(rename_all = "kebab")]
pub struct PostClarOpt {
    /// Text of the clarification
    text: String,
    /// Problem to ask about. Leave empty for a general clarification
    #[structopt(name = "problem", long)]
    problem_id: Option<String>,
}

impl PostClarOpt {
    fn post<T: Transport + ?Sized>(
        &self,
        conf: &Config,
        transport: &T,
        cnsl: &mut Console,
    ) -> Result<PostClarOutcome> {
        let api = conf.contest_api(transport, cnsl)?;
        let id = api.post_clarification(self.problem_id.as_deref(), &self.text, cnsl)?;
        Ok(PostClarOutcome { id })
    }
}

impl Run for PostClarOpt {
    fn run(&self, conf: &Config, cnsl: &mut Console) -> Result<Box<dyn Outcome>> {
        let session = conf.open_session()?;
        Ok(Box::new(self.post(conf, &session, cnsl)?))
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostClarOutcome {
    id: String,
}

impl fmt::Display for PostClarOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Clarification posted. ID: {}", self.id)
    }
}

impl Outcome for PostClarOutcome {}

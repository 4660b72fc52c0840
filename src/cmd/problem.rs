use std::fmt;

use contest_api::model::Problem;
use contest_api::Transport;
use serde::Serialize;
use structopt::StructOpt;

use crate::cmd::{write_resources, Outcome, Run};
use crate::{Config, Console, Result};

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
#[structopt(rename_all = "kebab")]
pub struct ProblemOpt {}

impl ProblemOpt {
    fn fetch<T: Transport + ?Sized>(
        &self,
        conf: &Config,
        transport: &T,
        cnsl: &mut Console,
    ) -> Result<ProblemOutcome> {
        let api = conf.contest_api(transport, cnsl)?;
        let problems = api.problems(cnsl)?;
        Ok(ProblemOutcome { problems })
    }
}

impl Run for ProblemOpt {
    fn run(&self, conf: &Config, cnsl: &mut Console) -> Result<Box<dyn Outcome>> {
        let session = conf.open_session()?;
        Ok(Box::new(self.fetch(conf, &session, cnsl)?))
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProblemOutcome {
    problems: Vec<Problem>,
}

impl fmt::Display for ProblemOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_resources(f, &self.problems)
    }
}

impl Outcome for ProblemOutcome {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::tests::{cnsl, contest_responses, wf_config, FixedTransport};

    #[test]
    fn test_fetch() -> anyhow::Result<()> {
        let transport = FixedTransport::new(contest_responses());
        let outcome = ProblemOpt {}.fetch(&wf_config(), &transport, &mut cnsl())?;
        let labels: Vec<_> = outcome.problems.iter().map(|p| p.label().as_str()).collect();
        assert_eq!(labels, ["A", "B"]);
        Ok(())
    }

    #[test]
    fn no_problems() -> anyhow::Result<()> {
        let mut responses = contest_responses();
        responses.insert("contests/wf/problems", "[]");
        let transport = FixedTransport::new(responses);
        let outcome = ProblemOpt {}.fetch(&wf_config(), &transport, &mut cnsl())?;
        assert_eq!(outcome.to_string(), "No problems found");
        Ok(())
    }
}

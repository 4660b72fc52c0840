use structopt::StructOpt;

use crate::cmd::{ConfigWrittenOutcome, Outcome, Run};
use crate::{Config, Console, Result};

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
#[structopt(rename_all = "kebab")]
pub struct LogoutOpt {}

impl Run for LogoutOpt {
    fn run(&self, conf: &Config, _cnsl: &mut Console) -> Result<Box<dyn Outcome>> {
        let mut stored = conf.stored().clone();
        stored.clear_credentials();
        Ok(Box::new(ConfigWrittenOutcome::save(conf, &stored)?))
    }
}

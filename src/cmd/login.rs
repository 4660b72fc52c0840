use structopt::StructOpt;

use crate::cmd::{ConfigWrittenOutcome, Outcome, Run};
use crate::{Config, Console, Result};

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
#[structopt(rename_all = "kebab")]
pub struct LoginOpt {
    /// Team account name
    username: String,
    /// Prompted for (or read from env CONTEST_PASSWORD) when omitted
    password: Option<String>,
}

impl LoginOpt {
    fn login(&self, conf: &Config, cnsl: &mut Console) -> Result<ConfigWrittenOutcome> {
        let password = match &self.password {
            Some(password) => password.clone(),
            None => cnsl.get_env_or_prompt_and_read("CONTEST_PASSWORD", "password: ", true)?,
        };
        let mut stored = conf.stored().clone();
        stored.set_credentials(self.username.as_str(), password);
        ConfigWrittenOutcome::save(conf, &stored)
    }
}

impl Run for LoginOpt {
    fn run(&self, conf: &Config, cnsl: &mut Console) -> Result<Box<dyn Outcome>> {
        Ok(Box::new(self.login(conf, cnsl)?))
    }
}

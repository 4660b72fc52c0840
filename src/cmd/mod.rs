use std::path::PathBuf;
use std::{fmt, io};

use anyhow::Context as _;
use contest_api::model::Resource;
use itertools::Itertools as _;
use serde::Serialize;
use structopt::StructOpt;

use crate::{Config, Console, OutputFormat, Result};

mod clar;
mod config;
mod contest;
mod login;
mod logout;
mod post_clar;
mod problem;
mod scoreboard;
mod set;
mod submissions;
mod submit;

pub use clar::{ClarOpt, ClarOutcome};
pub use config::{ConfigListOutcome, ConfigOpt};
pub use contest::{ContestOpt, ContestOutcome};
pub use login::LoginOpt;
pub use logout::LogoutOpt;
pub use post_clar::{PostClarOpt, PostClarOutcome};
pub use problem::{ProblemOpt, ProblemOutcome};
pub use scoreboard::{ScoreboardOpt, ScoreboardOutcome};
pub use set::SetOpt;
pub use submissions::{SubmissionsOpt, SubmissionsOutcome};
pub use submit::{SubmitOpt, SubmitOutcome};

pub trait Outcome: OutcomeSerialize {}

pub trait OutcomeSerialize: fmt::Display + fmt::Debug {
    fn write_json(&self, writer: &mut dyn io::Write) -> Result<()>;

    fn write_yaml(&self, writer: &mut dyn io::Write) -> Result<()>;

    fn print(&self, stdout: &mut dyn io::Write, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Default => writeln!(stdout, "{}", self)?,
            OutputFormat::Debug => writeln!(stdout, "{:#?}", self)?,
            OutputFormat::Json => {
                self.write_json(stdout)?;
                writeln!(stdout)?;
            }
            OutputFormat::Yaml => self.write_yaml(stdout)?,
        }
        Ok(())
    }
}

impl<T: Serialize + fmt::Display + fmt::Debug> OutcomeSerialize for T {
    fn write_json(&self, writer: &mut dyn io::Write) -> Result<()> {
        serde_json::to_writer_pretty(writer, self).context("Could not print outcome as json")
    }

    fn write_yaml(&self, writer: &mut dyn io::Write) -> Result<()> {
        serde_yaml::to_writer(writer, self).context("Could not print outcome as yaml")
    }
}

pub trait Run {
    fn run(&self, conf: &Config, cnsl: &mut Console) -> Result<Box<dyn Outcome>>;
}

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
#[structopt(rename_all = "kebab")]
pub enum Cmd {
    /// Gets contests
    Contest(ContestOpt),
    /// Gets problems
    Problem(ProblemOpt),
    /// Gets clarifications
    Clar(ClarOpt),
    /// Posts a clarification
    PostClar(PostClarOpt),
    /// Submits source files
    Submit(SubmitOpt),
    /// Shows past submissions and their judgements
    Submissions(SubmissionsOpt),
    /// Shows the contest scoreboard
    Scoreboard(ScoreboardOpt),
    /// Stores login credentials
    Login(LoginOpt),
    /// Removes login credentials
    Logout(LogoutOpt),
    /// Stores base URL or contest id
    Set(SetOpt),
    /// Shows or edits the config file
    Config(ConfigOpt),
}

impl Run for Cmd {
    fn run(&self, conf: &Config, cnsl: &mut Console) -> Result<Box<dyn Outcome>> {
        match self {
            Self::Contest(opt) => opt.run(conf, cnsl),
            Self::Problem(opt) => opt.run(conf, cnsl),
            Self::Clar(opt) => opt.run(conf, cnsl),
            Self::PostClar(opt) => opt.run(conf, cnsl),
            Self::Submit(opt) => opt.run(conf, cnsl),
            Self::Submissions(opt) => opt.run(conf, cnsl),
            Self::Scoreboard(opt) => opt.run(conf, cnsl),
            Self::Login(opt) => opt.run(conf, cnsl),
            Self::Logout(opt) => opt.run(conf, cnsl),
            Self::Set(opt) => opt.run(conf, cnsl),
            Self::Config(opt) => opt.run(conf, cnsl),
        }
    }
}

/// Outcome of the commands that only change the config file.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigWrittenOutcome {
    path: PathBuf,
}

impl ConfigWrittenOutcome {
    fn save(conf: &Config, stored: &crate::StoredConfig) -> Result<Self> {
        conf.save(stored)?;
        Ok(Self {
            path: conf.path().clone(),
        })
    }
}

impl fmt::Display for ConfigWrittenOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Successfully written config to {}", self.path.display())
    }
}

impl Outcome for ConfigWrittenOutcome {}

fn write_resources<R: Resource>(f: &mut fmt::Formatter, resources: &[R]) -> fmt::Result {
    if resources.is_empty() {
        return write!(f, "No {} found", R::KIND);
    }
    write!(f, "{}", resources.iter().map(Resource::render).join("\n\n"))
}

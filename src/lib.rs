#![warn(clippy::all)]

//! Command line client for the REST API of a contest control system (CCS).

#[macro_use]
extern crate strum;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context as _;
use serde::Serialize;
use structopt::StructOpt;
use strum::VariantNames as _;

mod cmd;
mod config;
mod table;

use cmd::{Cmd, OutcomeSerialize as _, Run as _};
pub use config::{Config, ConfigKey, StoredConfig};
pub use contest_api::{Console, ConsoleConfig};

pub type Error = anyhow::Error;
pub type Result<T> = anyhow::Result<T>;

#[derive(
    Serialize,
    EnumString,
    EnumVariantNames,
    IntoStaticStr,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum OutputFormat {
    Default,
    Debug,
    Json,
    Yaml,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Default
    }
}

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
#[structopt(
    about = "A CLI tool for CCS API access",
    after_help = "Options -b, -c, -i, -p and -u fall back to their env var, then to the config file."
)]
pub struct Opt {
    #[structopt(flatten)]
    global_opt: GlobalOpt,
    #[structopt(subcommand)]
    cmd: Cmd,
}

impl Opt {
    pub fn console_config(&self) -> ConsoleConfig {
        ConsoleConfig {
            assume_yes: self.global_opt.assume_yes,
        }
    }

    pub fn run(&self, stdout: &mut dyn Write, cnsl: &mut Console) -> Result<()> {
        let conf = Config::load(&self.global_opt).context("Could not load config")?;
        let outcome = self.cmd.run(&conf, cnsl)?;
        outcome.print(stdout, self.global_opt.output)?;
        Ok(())
    }
}

#[derive(StructOpt, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlobalOpt {
    /// Base URL of the API (e.g. https://example.com/api)
    #[structopt(long = "baseurl", short = "b", global = true, env = "CONTEST_BASEURL")]
    base_url: Option<String>,
    /// Username to communicate with the API
    #[structopt(long, short = "u", global = true, env = "CONTEST_USERNAME")]
    username: Option<String>,
    /// Password to communicate with the API
    #[structopt(
        long,
        short = "p",
        global = true,
        env = "CONTEST_PASSWORD",
        hide_env_values = true
    )]
    password: Option<String>,
    /// Contest id to use. Picked automatically when not set anywhere
    #[structopt(name = "contest", long, short = "c", global = true, env = "CONTEST_ID")]
    contest_id: Option<String>,
    /// Allows insecure HTTPS connections
    #[structopt(long, short = "i", global = true)]
    insecure: bool,
    /// Format of the output
    #[structopt(
        name = "format",
        long,
        global = true,
        default_value = OutputFormat::Default.into(),
        possible_values = &OutputFormat::VARIANTS,
    )]
    output: OutputFormat,
    /// Path to the config file
    #[structopt(long, global = true, env = "CONTEST_CONFIG")]
    config: Option<PathBuf>,
    /// Answers yes to every confirmation
    #[structopt(long = "yes", short = "y", global = true)]
    assume_yes: bool,
}

use std::fmt;
use std::io::Write as _;
use std::path::PathBuf;

use anyhow::anyhow;
use contest_api::{resolve_submission, SourceFile, Transport};
use serde::Serialize;
use structopt::StructOpt;

use crate::cmd::{Outcome, Run};
use crate::{Config, Console, Result};

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
#[structopt(rename_all = "kebab")]
pub struct SubmitOpt {
    /// Source files. The first one is used to detect problem and language
    #[structopt(required = true, min_values = 1)]
    files: Vec<PathBuf>,
    /// Problem to submit for. Detected from the first file when not set
    #[structopt(name = "problem", long)]
    problem_id: Option<String>,
    /// Language to submit in. Detected from the first file when not set
    #[structopt(name = "language", long, short = "l")]
    language_id: Option<String>,
    /// Entry point. Leave empty if not needed or to detect it
    #[structopt(long, short = "e")]
    entry_point: Option<String>,
    /// Submits without asking for confirmation
    #[structopt(long, short = "f")]
    force: bool,
}

impl SubmitOpt {
    fn submit<T: Transport + ?Sized>(
        &self,
        conf: &Config,
        transport: &T,
        cnsl: &mut Console,
    ) -> Result<SubmitOutcome> {
        let files = self
            .files
            .iter()
            .map(SourceFile::read)
            .collect::<Result<Vec<_>>>()?;

        let api = conf.contest_api(transport, cnsl)?;
        let problems = api.problems(cnsl)?;
        let languages = api.languages(cnsl)?;
        let resolved = resolve_submission(
            self.problem_id.as_deref(),
            self.language_id.as_deref(),
            self.entry_point.as_deref(),
            &self.files,
            &problems,
            &languages,
        )?;
        let entry_point = resolved.entry_point().as_deref();

        if !self.force {
            let contest = api.contest(cnsl)?;
            writeln!(cnsl, "About to submit:")?;
            let file_names: Vec<_> = files.iter().map(|file| file.name().as_str()).collect();
            if file_names.len() == 1 {
                writeln!(cnsl, "  filename:    {}", file_names[0])?;
            } else {
                writeln!(cnsl, "  filenames:   {}", file_names.join(" "))?;
            }
            writeln!(cnsl, "  contest:     {}", contest.display_name())?;
            writeln!(cnsl, "  problem:     {}", resolved.problem().label())?;
            writeln!(cnsl, "  language:    {}", resolved.language().name())?;
            if let Some(entry_point) = entry_point {
                writeln!(cnsl, "  entry point: {}", entry_point)?;
            }
            if !cnsl.confirm("Do you want to submit?", true)? {
                return Err(anyhow!("Submission aborted by user"));
            }
        }

        let id = api.post_submission(
            resolved.problem().id(),
            resolved.language().id(),
            entry_point,
            &files,
            cnsl,
        )?;
        Ok(SubmitOutcome {
            id,
            problem_id: resolved.problem().id().clone(),
            language_id: resolved.language().id().clone(),
            entry_point: entry_point.map(String::from),
        })
    }
}

impl Run for SubmitOpt {
    fn run(&self, conf: &Config, cnsl: &mut Console) -> Result<Box<dyn Outcome>> {
        let session = conf.open_session()?;
        Ok(Box::new(self.submit(conf, &session, cnsl)?))
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubmitOutcome {
    id: String,
    problem_id: String,
    language_id: String,
    entry_point: Option<String>,
}

impl fmt::Display for SubmitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Submitted. ID: {}", self.id)
    }
}

impl Outcome for SubmitOutcome {}

use std::fmt;

use anyhow::anyhow;
use contest_api::console::{sty_dim, sty_g, sty_r};
use contest_api::model::{eq_fold, Judgement, JudgementType, Language, Problem, Submission};
use contest_api::{ApiRelTime, Transport};
use serde::Serialize;
use structopt::StructOpt;

use crate::cmd::{Outcome, Run};
use crate::{Config, Console, Result};

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
#[structopt(rename_all = "kebab")]
pub struct SubmissionsOpt {
    /// Team whose submissions are shown. Defaults to the username
    #[structopt(name = "team", long)]
    team_id: Option<String>,
}

impl SubmissionsOpt {
    fn team_id<'a>(&'a self, conf: &'a Config) -> Result<&'a str> {
        self.team_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or_else(|| Some(conf.session().username().as_str()).filter(|id| !id.is_empty()))
            .ok_or_else(|| anyhow!("No team id given. Use --team or log in first"))
    }

    fn fetch<T: Transport + ?Sized>(
        &self,
        conf: &Config,
        transport: &T,
        cnsl: &mut Console,
    ) -> Result<SubmissionsOutcome> {
        let team_id = self.team_id(conf)?;
        let api = conf.contest_api(transport, cnsl)?;
        let problems = api.problems(cnsl)?;
        let languages = api.languages(cnsl)?;
        let judgement_types = api.judgement_types(cnsl)?;
        let mut submissions = api.submissions(cnsl)?;
        let judgements = api.judgements(cnsl)?;

        submissions.retain(|s| eq_fold(s.team_id(), team_id));
        submissions.sort_by_key(Submission::contest_time);
        let submissions = submissions
            .iter()
            .map(|s| SubmissionReport::new(s, &problems, &languages, &judgements, &judgement_types))
            .collect();
        Ok(SubmissionsOutcome {
            team_id: team_id.to_string(),
            submissions,
        })
    }
}

impl Run for SubmissionsOpt {
    fn run(&self, conf: &Config, cnsl: &mut Console) -> Result<Box<dyn Outcome>> {
        let session = conf.open_session()?;
        Ok(Box::new(self.fetch(conf, &session, cnsl)?))
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubmissionReport {
    id: String,
    contest_time: ApiRelTime,
    problem: Option<String>,
    language: Option<String>,
    judgements: Vec<JudgementReport>,
}

impl SubmissionReport {
    fn new(
        submission: &Submission,
        problems: &[Problem],
        languages: &[Language],
        judgements: &[Judgement],
        judgement_types: &[JudgementType],
    ) -> Self {
        let judgements = Judgement::for_submission(judgements, submission.id())
            .into_iter()
            .map(|judgement| JudgementReport::new(judgement, judgement_types))
            .collect();
        Self {
            id: submission.id().clone(),
            contest_time: submission.contest_time(),
            problem: Problem::find_by_id(problems, submission.problem_id())
                .map(|p| format!("{}: {}", p.label(), p.name())),
            language: Language::find(languages, submission.language_id())
                .map(|l| l.name().clone()),
            judgements,
        }
    }
}

impl fmt::Display for SubmissionReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.problem {
            Some(problem) => write!(f, "  Submission to problem {}", problem)?,
            None => write!(f, "  Submission to unknown problem")?,
        }
        match &self.language {
            Some(language) => write!(f, " in {}", language)?,
            None => write!(f, " in unknown language")?,
        }
        write!(f, " at {}", self.contest_time)?;
        if self.judgements.is_empty() {
            write!(f, "\n     {}", sty_dim("Not judged"))?;
        }
        for judgement in &self.judgements {
            write!(f, "\n     {}", judgement)?;
        }
        Ok(())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum JudgementReport {
    InProgress,
    Unknown {
        end_contest_time: ApiRelTime,
    },
    Judged {
        end_contest_time: ApiRelTime,
        judgement_type_id: String,
        name: String,
        solved: bool,
    },
}

impl JudgementReport {
    fn new(judgement: &Judgement, judgement_types: &[JudgementType]) -> Self {
        let end_contest_time = judgement.end_contest_time();
        match judgement.judgement_type_id() {
            None => Self::InProgress,
            Some(id) => match JudgementType::find(judgement_types, id) {
                Some(judgement_type) => Self::Judged {
                    end_contest_time,
                    judgement_type_id: judgement_type.id().clone(),
                    name: judgement_type.name().clone(),
                    solved: judgement_type.solved(),
                },
                None => Self::Unknown { end_contest_time },
            },
        }
    }
}

impl fmt::Display for JudgementReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InProgress => write!(f, "{}", sty_dim("Judgement in progress")),
            Self::Unknown { end_contest_time } => {
                write!(f, "Unknown judgement at {}", end_contest_time)
            }
            Self::Judged {
                end_contest_time,
                judgement_type_id,
                name,
                solved,
            } => {
                let verdict = format!("{} ({})", judgement_type_id, name);
                if *solved {
                    write!(f, "Judged at {}: {}", end_contest_time, sty_g(verdict))
                } else {
                    write!(f, "Judged at {}: {}", end_contest_time, sty_r(verdict))
                }
            }
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubmissionsOutcome {
    team_id: String,
    submissions: Vec<SubmissionReport>,
}

impl fmt::Display for SubmissionsOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Submissions ({}):", self.submissions.len())?;
        for submission in &self.submissions {
            write!(f, "\n{}", submission)?;
        }
        Ok(())
    }
}

impl Outcome for SubmissionsOutcome {}

use std::fmt;

use contest_api::model::{Problem, Scoreboard, Team};
use contest_api::Transport;
use serde::Serialize;
use structopt::StructOpt;

use crate::cmd::{Outcome, Run};
use crate::table::{Align, Table};
use crate::{Config, Console, Result};

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
#[structopt(rename_all = "kebab")]
pub struct ScoreboardOpt {}

impl ScoreboardOpt {
    fn fetch<T: Transport + ?Sized>(
        &self,
        conf: &Config,
        transport: &T,
        cnsl: &mut Console,
    ) -> Result<ScoreboardOutcome> {
        let api = conf.contest_api(transport, cnsl)?;
        let problems = api.problems(cnsl)?;
        let teams = api.teams(cnsl)?;
        let scoreboard = api.scoreboard(cnsl)?;
        Ok(ScoreboardOutcome::new(&scoreboard, &problems, &teams))
    }
}

impl Run for ScoreboardOpt {
    fn run(&self, conf: &Config, cnsl: &mut Console) -> Result<Box<dyn Outcome>> {
        let session = conf.open_session()?;
        Ok(Box::new(self.fetch(conf, &session, cnsl)?))
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScoreboardLine {
    rank: i64,
    team: String,
    /// Labels of solved problems, blank for the others.
    solved_labels: Vec<String>,
    num_solved: i64,
    total_time: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScoreboardOutcome {
    labels: Vec<String>,
    lines: Vec<ScoreboardLine>,
}

impl ScoreboardOutcome {
    fn new(scoreboard: &Scoreboard, problems: &[Problem], teams: &[Team]) -> Self {
        let mut problems: Vec<&Problem> = problems.iter().collect();
        problems.sort_by_key(|p| p.ordinal());
        let lines = scoreboard
            .rows()
            .iter()
            .map(|row| {
                let team = match Team::find(teams, row.team_id()) {
                    Some(team) => format!("{}: {}", team.id(), team.preferred_name()),
                    None => row.team_id().clone(),
                };
                let solved_labels = problems
                    .iter()
                    .map(|p| {
                        if row.has_solved(p.id()) {
                            p.label().clone()
                        } else {
                            String::new()
                        }
                    })
                    .collect();
                ScoreboardLine {
                    rank: row.rank(),
                    team,
                    solved_labels,
                    num_solved: row.score().num_solved(),
                    total_time: row.score().total_time().minutes(),
                }
            })
            .collect();
        Self {
            labels: problems.iter().map(|p| p.label().clone()).collect(),
            lines,
        }
    }
}

impl fmt::Display for ScoreboardOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Contest Scoreboard")?;
        let mut table = Table::new()
            .column("Rank", Align::Right)
            .column("Team", Align::Left);
        for label in &self.labels {
            table = table.column(label.as_str(), Align::Right);
        }
        table = table
            .column("Solved", Align::Right)
            .column("Time", Align::Right);
        for line in &self.lines {
            let mut row = vec![line.rank.to_string(), line.team.clone()];
            row.extend(line.solved_labels.iter().cloned());
            row.push(line.num_solved.to_string());
            row.push(line.total_time.to_string());
            table.push_row(row);
        }
        write!(f, "{}", table)
    }
}

impl Outcome for ScoreboardOutcome {}

use std::fmt;

use contest_api::model::{Clarification, Problem};
use contest_api::{ApiRelTime, Transport};
use serde::Serialize;
use structopt::StructOpt;

use crate::cmd::{Outcome, Run};
use crate::table::{Align, Table};
use crate::{Config, Console, Result};

#[derive(StructOpt, Debug, Clone, PartialEq, Eq, Hash)]
#[structopt(rename_all = "kebab")]
pub struct ClarOpt {}

impl ClarOpt {
    fn fetch<T: Transport + ?Sized>(
        &self,
        conf: &Config,
        transport: &T,
        cnsl: &mut Console,
    ) -> Result<ClarOutcome> {
        let api = conf.contest_api(transport, cnsl)?;
        let clarifications = api.clarifications(cnsl)?;
        let problems = if clarifications.iter().any(|c| !c.problem_id().is_empty()) {
            api.problems(cnsl)?
        } else {
            Vec::new()
        };
        let clarifications = clarifications
            .iter()
            .map(|clar| ClarRow::new(clar, &problems))
            .collect();
        Ok(ClarOutcome { clarifications })
    }
}

impl Run for ClarOpt {
    fn run(&self, conf: &Config, cnsl: &mut Console) -> Result<Box<dyn Outcome>> {
        let session = conf.open_session()?;
        Ok(Box::new(self.fetch(conf, &session, cnsl)?))
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClarRow {
    id: String,
    contest_time: ApiRelTime,
    kind: String,
    problem: String,
    text: String,
}

impl ClarRow {
    fn new(clar: &Clarification, problems: &[Problem]) -> Self {
        let problem = if clar.problem_id().is_empty() {
            String::new()
        } else {
            Problem::find_by_id(problems, clar.problem_id())
                .map(|p| format!("{}: {}", p.label(), p.name()))
                .unwrap_or_else(|| String::from("unknown problem"))
        };
        Self {
            id: clar.id().clone(),
            contest_time: clar.contest_time(),
            kind: clar.kind().to_string(),
            problem,
            text: clar.text().clone(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClarOutcome {
    clarifications: Vec<ClarRow>,
}

impl fmt::Display for ClarOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Clarifications ({}):", self.clarifications.len())?;
        let mut table = Table::new()
            .column("Time", Align::Right)
            .column("Type", Align::Left)
            .column("Problem", Align::Left)
            .column("Text", Align::Left);
        for clar in &self.clarifications {
            // one table row per line of text
            let lines = clar
                .text
                .split('\n')
                .map(|line| line.trim_matches(|c: char| c.is_control() || c.is_whitespace()));
            for (i, line) in lines.enumerate() {
                if i == 0 {
                    table.push_row(vec![
                        clar.contest_time.to_string(),
                        clar.kind.clone(),
                        clar.problem.clone(),
                        line.to_string(),
                    ]);
                } else {
                    table.push_row(vec![String::new(), String::new(), String::new(), line.to_string()]);
                }
            }
        }
        write!(f, "{}", table)
    }
}

impl Outcome for ClarOutcome {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::tests::{cnsl, contest_responses, wf_config, FixedTransport};

    #[test]
    fn test_fetch() -> anyhow::Result<()> {
        console::set_colors_enabled(false);
        let mut responses = contest_responses();
        responses.insert(
            "contests/wf/clarifications",
            r#"[
                {"id": "1", "from_team_id": null, "to_team_id": null, "text": "Welcome!", "contest_time": "0:00:00"},
                {"id": "2", "from_team_id": "7", "problem_id": "bye", "text": "Is n > 0?\r\nThanks", "contest_time": "0:10:00"},
                {"id": "3", "to_team_id": "7", "reply_to_id": "2", "problem_id": "gone", "text": "Yes", "contest_time": "0:12:00"}
            ]"#,
        );
        let transport = FixedTransport::new(responses);
        let outcome = ClarOpt {}.fetch(&wf_config(), &transport, &mut cnsl())?;

        let rows = &outcome.clarifications;
        assert_eq!(rows[0].kind, "Broadcast message from jury");
        assert_eq!(rows[0].problem, "");
        assert_eq!(rows[1].kind, "Clarification sent to jury");
        assert_eq!(rows[1].problem, "B: Goodbye");
        assert_eq!(rows[2].kind, "Response from jury");
        assert_eq!(rows[2].problem, "unknown problem");

        let output = outcome.to_string();
        assert!(output.starts_with("Clarifications (3):\n"));
        assert_eq!(output.lines().count(), 1 + 1 + 4);
        assert!(output.contains(" Is n > 0? \n"));
        assert!(output.contains(" Thanks "));
        Ok(())
    }

    #[test]
    fn problem_is_looked_up_by_id() -> anyhow::Result<()> {
        let problems = vec![Problem::new("b", "A", "Bee", 0), Problem::new("a", "B", "Ay", 1)];
        let clar: Clarification =
            serde_json::from_str(r#"{"id": "1", "from_team_id": "7", "problem_id": "a", "text": "?"}"#)?;
        assert_eq!(ClarRow::new(&clar, &problems).problem, "B: Ay");
        Ok(())
    }
}

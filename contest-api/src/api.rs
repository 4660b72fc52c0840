//! Typed accessors over the generic fetch protocol.

use anyhow::{anyhow, Context as _};
use serde_json::{json, Map, Value};

use crate::fetch::{fetch_all, get_object};
use crate::model::{
    Clarification, Contest, Judgement, JudgementType, Language, Problem, Resource, Scoreboard,
    Submission, Team,
};
use crate::select::best_contest;
use crate::submit::SourceFile;
use crate::transport::Transport;
use crate::{Console, Result};

/// Resources that do not belong to a single contest.
#[derive(Debug)]
pub struct ContestsApi<'a, T: ?Sized> {
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> ContestsApi<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    pub fn contests(&self, cnsl: &mut Console) -> Result<Vec<Contest>> {
        fetch_all(self.transport, "", cnsl).context("Could not retrieve contests")
    }

    pub fn contest(&self, contest_id: &str, cnsl: &mut Console) -> Result<Contest> {
        get_object(self.transport, &format!("contests/{}", contest_id), cnsl)
            .with_context(|| format!("Could not retrieve contest : {}", contest_id))
    }

    pub fn best_contest(&self, cnsl: &mut Console) -> Result<Contest> {
        let contests = self.contests(cnsl)?;
        best_contest(contests).context("Could not pick the best contest")
    }

    /// Accessor for the resources of contest `contest_id`.
    pub fn contest_api(&self, contest_id: impl Into<String>) -> ContestApi<'a, T> {
        ContestApi::new(self.transport, contest_id)
    }
}

/// Resources of one contest.
#[derive(Debug)]
pub struct ContestApi<'a, T: ?Sized> {
    transport: &'a T,
    contest_id: String,
}

impl<'a, T: Transport + ?Sized> ContestApi<'a, T> {
    pub fn new(transport: &'a T, contest_id: impl Into<String>) -> Self {
        Self {
            transport,
            contest_id: contest_id.into(),
        }
    }

    pub fn contest_id(&self) -> &str {
        &self.contest_id
    }

    pub fn contest(&self, cnsl: &mut Console) -> Result<Contest> {
        ContestsApi::new(self.transport).contest(&self.contest_id, cnsl)
    }

    /// Fetches every resource of kind `R`.
    pub fn list<R: Resource>(&self, cnsl: &mut Console) -> Result<Vec<R>> {
        fetch_all(self.transport, &self.contest_id, cnsl)
            .with_context(|| format!("Could not retrieve {}", R::KIND))
    }

    pub fn problems(&self, cnsl: &mut Console) -> Result<Vec<Problem>> {
        self.list(cnsl)
    }

    pub fn languages(&self, cnsl: &mut Console) -> Result<Vec<Language>> {
        self.list(cnsl)
    }

    pub fn teams(&self, cnsl: &mut Console) -> Result<Vec<Team>> {
        self.list(cnsl)
    }

    pub fn submissions(&self, cnsl: &mut Console) -> Result<Vec<Submission>> {
        self.list(cnsl)
    }

    pub fn judgements(&self, cnsl: &mut Console) -> Result<Vec<Judgement>> {
        self.list(cnsl)
    }

    pub fn judgement_types(&self, cnsl: &mut Console) -> Result<Vec<JudgementType>> {
        self.list(cnsl)
    }

    pub fn clarifications(&self, cnsl: &mut Console) -> Result<Vec<Clarification>> {
        self.list(cnsl)
    }

    pub fn scoreboard(&self, cnsl: &mut Console) -> Result<Scoreboard> {
        get_object(self.transport, &Scoreboard::path(&self.contest_id), cnsl)
            .context("Could not retrieve scoreboard")
    }

    /// Posts a clarification request and returns its id.
    pub fn post_clarification(
        &self,
        problem_id: Option<&str>,
        text: &str,
        cnsl: &mut Console,
    ) -> Result<String> {
        let mut body = Map::new();
        if let Some(problem_id) = problem_id.filter(|id| !id.is_empty()) {
            body.insert("problem_id".into(), json!(problem_id));
        }
        body.insert("text".into(), json!(text));
        self.post_for_id(&Clarification::collection_path(&self.contest_id), &Value::Object(body), cnsl)
            .context("Could not post clarification")
    }

    /// Posts `files` as one zipped submission and returns its id.
    pub fn post_submission(
        &self,
        problem_id: &str,
        language_id: &str,
        entry_point: Option<&str>,
        files: &[SourceFile],
        cnsl: &mut Console,
    ) -> Result<String> {
        use base64::Engine as _;

        let archive = SourceFile::zip_all(files)?;
        let mut body = Map::new();
        body.insert("problem_id".into(), json!(problem_id));
        body.insert("language_id".into(), json!(language_id));
        if let Some(entry_point) = entry_point.filter(|e| !e.is_empty()) {
            body.insert("entry_point".into(), json!(entry_point));
        }
        body.insert(
            "files".into(),
            json!([{
                "data": base64::engine::general_purpose::STANDARD.encode(&archive),
                "mime": "application/zip",
            }]),
        );
        self.post_for_id(&Submission::collection_path(&self.contest_id), &Value::Object(body), cnsl)
            .context("Could not submit")
    }

    /// The CCS answers a POST either with the new id as a JSON string or
    /// with the created object.
    fn post_for_id(&self, path: &str, body: &Value, cnsl: &mut Console) -> Result<String> {
        let bytes = self.transport.post(path, body, cnsl)?.success_body()?;
        let value: Value = serde_json::from_slice(&bytes).map_err(crate::ApiError::Decode)?;
        match value {
            Value::String(id) => Ok(id),
            Value::Object(mut object) => match object.remove("id") {
                Some(Value::String(id)) => Ok(id),
                Some(Value::Number(id)) => Ok(id.to_string()),
                _ => Err(anyhow!("Response has no id")),
            },
            _ => Err(anyhow!("Unexpected response : {}", value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use maplit::hashmap;

    use super::*;
    use crate::error::ApiError;
    use crate::transport::mock::MockTransport;
    use crate::ConsoleConfig;

    fn cnsl() -> Console {
        Console::sink(ConsoleConfig::default())
    }

    #[test]
    fn list_adds_context() {
        let transport = MockTransport::new(hashmap! {
            "contests/wf/languages" => (500, ""),
        });
        let api = ContestApi::new(&transport, "wf");
        let err = api.languages(&mut cnsl()).unwrap_err();
        assert_eq!(err.to_string(), "Could not retrieve languages");
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::UnexpectedStatus { code: 500 })
        ));
    }

    #[test]
    fn contests_and_best_contest() -> anyhow::Result<()> {
        let transport = MockTransport::new(hashmap! {
            "contests" => (200, r#"[{"id": "wf", "name": "World Finals", "start_time": null}]"#),
            "contests/wf" => (200, r#"{"id": "wf", "name": "World Finals"}"#),
        });
        let api = ContestsApi::new(&transport);
        assert_eq!(api.contests(&mut cnsl())?.len(), 1);
        assert_eq!(api.best_contest(&mut cnsl())?.id(), "wf");
        assert_eq!(api.contest_api("wf").contest(&mut cnsl())?.name(), "World Finals");
        Ok(())
    }

    #[test]
    fn best_contest_without_contests() {
        let transport = MockTransport::new(hashmap! {
            "contests" => (200, "[]"),
        });
        let err = ContestsApi::new(&transport).best_contest(&mut cnsl()).unwrap_err();
        assert_eq!(err.to_string(), "Could not pick the best contest");
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::NoContests)
        ));
    }

    #[test]
    fn scoreboard() -> anyhow::Result<()> {
        let transport = MockTransport::new(hashmap! {
            "contests/wf/scoreboard" => (200, r#"{
                "contest_time": "1:00:00.000",
                "rows": [{"rank": 1, "team_id": "7", "score": {"num_solved": 1, "total_time": 20},
                          "problems": [{"problem_id": "a", "num_judged": 1, "solved": true}]}]
            }"#),
        });
        let scoreboard = ContestApi::new(&transport, "wf").scoreboard(&mut cnsl())?;
        assert_eq!(scoreboard.rows().len(), 1);
        assert!(scoreboard.rows()[0].has_solved("a"));
        Ok(())
    }

    #[test]
    fn post_clarification_body() -> anyhow::Result<()> {
        let transport = MockTransport::new(hashmap! {
            "contests/wf/clarifications" => (200, r#""c12""#),
        });
        let api = ContestApi::new(&transport, "wf");
        assert_eq!(api.post_clarification(None, "Is n > 0?", &mut cnsl())?, "c12");
        assert_eq!(api.post_clarification(Some("a"), "Why?", &mut cnsl())?, "c12");

        let posted = transport.posted.borrow();
        assert_eq!(posted[0].0, "contests/wf/clarifications");
        assert_eq!(posted[0].1, json!({"text": "Is n > 0?"}));
        assert_eq!(posted[1].1, json!({"problem_id": "a", "text": "Why?"}));
        Ok(())
    }

    #[test]
    fn post_submission_body() -> anyhow::Result<()> {
        use base64::Engine as _;

        let transport = MockTransport::new(hashmap! {
            "contests/wf/submissions" => (201, r#"{"id": "s42", "problem_id": "a"}"#),
        });
        let api = ContestApi::new(&transport, "wf");
        let files = vec![SourceFile::new("Main.java", "class Main {}")];
        let id = api.post_submission("a", "java", Some("Main"), &files, &mut cnsl())?;
        assert_eq!(id, "s42");

        let posted = transport.posted.borrow();
        let body = &posted[0].1;
        assert_eq!(body["problem_id"], "a");
        assert_eq!(body["language_id"], "java");
        assert_eq!(body["entry_point"], "Main");
        assert_eq!(body["files"][0]["mime"], "application/zip");

        let data = body["files"][0]["data"].as_str().unwrap();
        let archive = base64::engine::general_purpose::STANDARD.decode(data)?;
        let zip = zip::ZipArchive::new(Cursor::new(archive))?;
        assert_eq!(zip.file_names().collect::<Vec<_>>(), ["Main.java"]);
        Ok(())
    }

    #[test]
    fn post_without_entry_point() -> anyhow::Result<()> {
        let transport = MockTransport::new(hashmap! {
            "contests/wf/submissions" => (200, r#""s1""#),
        });
        let api = ContestApi::new(&transport, "wf");
        let files = vec![SourceFile::new("a.py", "print(1)")];
        api.post_submission("a", "python3", None, &files, &mut cnsl())?;
        assert!(transport.posted.borrow()[0].1.get("entry_point").is_none());
        Ok(())
    }

    #[test]
    fn post_rejected() {
        let transport = MockTransport::new(hashmap! {
            "contests/wf/submissions" => (401, ""),
        });
        let api = ContestApi::new(&transport, "wf");
        let files = vec![SourceFile::new("a.py", "print(1)")];
        let err = api
            .post_submission("a", "python3", None, &files, &mut cnsl())
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::Unauthorized)
        ));
    }
}

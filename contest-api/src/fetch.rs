//! One code path for fetching every resource kind.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::value::RawValue;

use crate::error::ApiError;
use crate::model::Resource;
use crate::transport::Transport;
use crate::{Console, Result};

/// Result of a [`fetch`]: one object when an id was given, otherwise the
/// whole collection in server order.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<R> {
    One(R),
    Many(Vec<R>),
}

impl<R> Fetched<R> {
    pub fn into_vec(self) -> Vec<R> {
        match self {
            Self::One(resource) => vec![resource],
            Self::Many(resources) => resources,
        }
    }
}

impl<R: Resource> fmt::Display for Fetched<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::One(resource) => writeln!(f, "{}", resource.render()),
            Self::Many(resources) => resources
                .iter()
                .try_for_each(|resource| writeln!(f, "{}\n", resource.render())),
        }
    }
}

/// Fetches the resource `id` of kind `R`, or all of them when `id` is blank.
pub fn fetch<R, T>(
    transport: &T,
    contest_id: &str,
    id: Option<&str>,
    cnsl: &mut Console,
) -> Result<Fetched<R>>
where
    R: Resource,
    T: Transport + ?Sized,
{
    match id {
        Some(id) if !id.is_empty() => fetch_one(transport, contest_id, id, cnsl).map(Fetched::One),
        _ => fetch_all(transport, contest_id, cnsl).map(Fetched::Many),
    }
}

pub fn fetch_one<R, T>(transport: &T, contest_id: &str, id: &str, cnsl: &mut Console) -> Result<R>
where
    R: Resource,
    T: Transport + ?Sized,
{
    let body = get_body(transport, &R::path(contest_id, Some(id)), cnsl)?;
    Ok(R::decode(&body)?)
}

/// Decodes the collection element by element; the first failure aborts.
pub fn fetch_all<R, T>(transport: &T, contest_id: &str, cnsl: &mut Console) -> Result<Vec<R>>
where
    R: Resource,
    T: Transport + ?Sized,
{
    let body = get_body(transport, &R::path(contest_id, None), cnsl)?;
    let elements: Vec<&RawValue> = serde_json::from_slice(&body).map_err(ApiError::Decode)?;
    let resources = elements
        .into_iter()
        .map(|element| R::decode(element.get().as_bytes()))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(resources)
}

/// Fetches a single JSON object at an arbitrary path.
pub fn get_object<R, T>(transport: &T, path: &str, cnsl: &mut Console) -> Result<R>
where
    R: DeserializeOwned,
    T: Transport + ?Sized,
{
    let body = get_body(transport, path, cnsl)?;
    Ok(serde_json::from_slice(&body).map_err(ApiError::Decode)?)
}

fn get_body<T: Transport + ?Sized>(transport: &T, path: &str, cnsl: &mut Console) -> Result<Vec<u8>> {
    Ok(transport.get(path, cnsl)?.success_body()?)
}

#[cfg(test)]
mod tests {
    use maplit::hashmap;

    use super::*;
    use crate::model::{Contest, Problem, Submission};
    use crate::transport::mock::MockTransport;
    use crate::ConsoleConfig;

    static PROBLEMS: &str = r#"[
        {"id": "hello", "label": "A", "name": "Hello World", "ordinal": 0},
        {"id": "bye", "label": "B", "name": "Goodbye", "ordinal": 1},
        {"id": "mid", "label": "C", "name": null, "ordinal": 2}
    ]"#;

    fn cnsl() -> Console {
        Console::sink(ConsoleConfig::default())
    }

    fn api_error(err: &anyhow::Error) -> &ApiError {
        err.downcast_ref::<ApiError>().unwrap()
    }

    #[test]
    fn fetch_all_preserves_order() -> anyhow::Result<()> {
        let transport = MockTransport::new(hashmap! {
            "contests/wf/problems" => (200, PROBLEMS),
        });
        let problems: Vec<Problem> = fetch_all(&transport, "wf", &mut cnsl())?;
        let ids: Vec<_> = problems.iter().map(|p| p.id().as_str()).collect();
        assert_eq!(ids, ["hello", "bye", "mid"]);
        assert_eq!(problems[2].name(), "");
        Ok(())
    }

    #[test]
    fn null_ids_do_not_abort_collection() -> anyhow::Result<()> {
        let transport = MockTransport::new(hashmap! {
            "contests/wf/submissions" => (200, r#"[
                {"id": "1", "team_id": "7", "problem_id": "hello", "language_id": "java"},
                {"id": null, "team_id": "7", "problem_id": null, "language_id": null}
            ]"#),
        });
        let submissions: Vec<Submission> = fetch_all(&transport, "wf", &mut cnsl())?;
        assert_eq!(submissions.len(), 2);
        assert_eq!(submissions[1].id(), "");
        assert_eq!(submissions[1].problem_id(), "");
        assert_eq!(submissions[1].language_id(), "");
        Ok(())
    }

    #[test]
    fn fetch_one_decodes_object() -> anyhow::Result<()> {
        let transport = MockTransport::new(hashmap! {
            "contests/wf/problems/bye" => (200, r#"{"id": "bye", "label": "B", "name": "Goodbye", "ordinal": 1}"#),
        });
        let problem: Problem = fetch_one(&transport, "wf", "bye", &mut cnsl())?;
        assert_eq!(problem.label(), "B");
        Ok(())
    }

    #[test]
    fn fetch_dispatches_on_id() -> anyhow::Result<()> {
        let transport = MockTransport::new(hashmap! {
            "contests/wf/problems" => (200, PROBLEMS),
            "contests/wf/problems/hello" => (200, r#"{"id": "hello", "label": "A"}"#),
        });
        let many = fetch::<Problem, _>(&transport, "wf", None, &mut cnsl())?;
        assert_eq!(many.into_vec().len(), 3);
        let blank = fetch::<Problem, _>(&transport, "wf", Some(""), &mut cnsl())?;
        assert!(matches!(blank, Fetched::Many(_)));
        let one = fetch::<Problem, _>(&transport, "wf", Some("hello"), &mut cnsl())?;
        match one {
            Fetched::One(problem) => assert_eq!(problem.id(), "hello"),
            Fetched::Many(_) => panic!("expected a single problem"),
        }
        Ok(())
    }

    #[test]
    fn not_found_is_not_decoded() {
        let transport = MockTransport::new(hashmap! {});
        let err = fetch::<Problem, _>(&transport, "wf", Some("nope"), &mut cnsl()).unwrap_err();
        assert!(matches!(api_error(&err), ApiError::NotFound));
        let err = fetch_all::<Problem, _>(&transport, "wf", &mut cnsl()).unwrap_err();
        assert!(matches!(api_error(&err), ApiError::NotFound));
    }

    #[test]
    fn status_errors() {
        let transport = MockTransport::new(hashmap! {
            "contests/wf/teams" => (401, "{}"),
            "contests/wf/problems" => (500, PROBLEMS),
        });
        let err = fetch_all::<crate::model::Team, _>(&transport, "wf", &mut cnsl()).unwrap_err();
        assert!(matches!(api_error(&err), ApiError::Unauthorized));
        let err = fetch_all::<Problem, _>(&transport, "wf", &mut cnsl()).unwrap_err();
        assert!(matches!(
            api_error(&err),
            ApiError::UnexpectedStatus { code: 500 }
        ));
    }

    #[test]
    fn array_body_for_single_fetch_is_decode_error() {
        let transport = MockTransport::new(hashmap! {
            "contests/wf/problems/hello" => (200, PROBLEMS),
        });
        let err = fetch_one::<Problem, _>(&transport, "wf", "hello", &mut cnsl()).unwrap_err();
        assert!(matches!(api_error(&err), ApiError::Decode(_)));
    }

    #[test]
    fn bad_element_aborts() {
        let transport = MockTransport::new(hashmap! {
            "contests/wf/problems" => (200, r#"[{"id": "a"}, {"id": 1}, {"id": "c"}]"#),
        });
        let err = fetch_all::<Problem, _>(&transport, "wf", &mut cnsl()).unwrap_err();
        assert!(matches!(api_error(&err), ApiError::Decode(_)));
    }

    #[test]
    fn object_body_for_collection_is_decode_error() {
        let transport = MockTransport::new(hashmap! {
            "contests/wf/problems" => (200, r#"{"id": "a"}"#),
        });
        let err = fetch_all::<Problem, _>(&transport, "wf", &mut cnsl()).unwrap_err();
        assert!(matches!(api_error(&err), ApiError::Decode(_)));
    }

    #[test]
    fn contests_live_at_root() -> anyhow::Result<()> {
        let transport = MockTransport::new(hashmap! {
            "contests" => (200, r#"[{"id": "wf", "name": "World Finals"}]"#),
            "contests/wf" => (200, r#"{"id": "wf", "name": "World Finals"}"#),
        });
        let contests: Vec<Contest> = fetch_all(&transport, "ignored", &mut cnsl())?;
        assert_eq!(contests.len(), 1);
        let contest: Contest = get_object(&transport, "contests/wf", &mut cnsl())?;
        assert_eq!(contest.name(), "World Finals");
        Ok(())
    }
}

#![warn(clippy::all)]

//! Data-access core of the `contest` command line client.
//!
//! Fetches resources from a CCS (Contest Control System) REST API through a
//! single generic code path, decodes the API's time formats and implements
//! the heuristics used to pick a contest and to resolve a submission from
//! local file names.

pub mod api;
pub mod console;
pub mod error;
pub mod fetch;
pub mod model;
pub mod select;
pub mod session;
pub mod submit;
pub mod time;
pub mod transport;

pub use api::{ContestApi, ContestsApi};
pub use console::{Console, ConsoleConfig};
pub use error::ApiError;
pub use fetch::{fetch, fetch_all, fetch_one, get_object, Fetched};
pub use select::{best_contest, best_contest_at};
pub use session::{HttpSession, SessionConfig};
pub use submit::{kotlin_entry_point, resolve_submission, ResolvedSubmission, SourceFile};
pub use time::{ApiRelTime, ApiTime};
pub use transport::{RawResponse, StatusCode, Transport};

pub type Error = anyhow::Error;
pub type Result<T> = anyhow::Result<T>;

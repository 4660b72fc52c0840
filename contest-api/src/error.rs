use thiserror::Error;

/// Errors raised by the data-access core.
///
/// Every variant is terminal for the operation that raised it. Callers
/// usually receive these wrapped in an [`anyhow::Error`] with added context;
/// use `downcast_ref::<ApiError>()` to inspect the kind.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Could not parse time : {text}")]
    TimeFormat { text: String },
    #[error("Request not authorized")]
    Unauthorized,
    #[error("Object not found")]
    NotFound,
    #[error("Received unexpected status code : {code}")]
    UnexpectedStatus { code: u16 },
    #[error("Could not decode response body")]
    Decode(#[source] serde_json::Error),
    #[error("more than one contest is currently running")]
    AmbiguousContest,
    #[error("there are no scheduled contests")]
    NoScheduledContest,
    #[error("no contests found")]
    NoContests,
    #[error("no known problem specified or detected")]
    UnknownProblem,
    #[error("no known language specified or detected")]
    UnknownLanguage,
    #[error("entry point required but not specified nor detected")]
    MissingEntryPoint,
}

impl ApiError {
    pub fn time_format(text: impl Into<String>) -> Self {
        Self::TimeFormat { text: text.into() }
    }
}

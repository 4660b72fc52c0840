use getset::{CopyGetters, Getters};
pub use reqwest::StatusCode;

use crate::error::ApiError;
use crate::{Console, Result};

/// Status and body of a response, as handed back by a [`Transport`].
#[derive(Getters, CopyGetters, Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    #[get_copy = "pub"]
    status: StatusCode,
    #[get = "pub"]
    body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns the body of a successful response without looking at it.
    pub fn success_body(self) -> std::result::Result<Vec<u8>, ApiError> {
        match self.status {
            status if status.is_success() => Ok(self.body),
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            status => Err(ApiError::UnexpectedStatus {
                code: status.as_u16(),
            }),
        }
    }
}

/// Sends requests to the CCS API. Paths are relative to the API base URL.
///
/// Authentication and TLS settings are the business of the implementation.
pub trait Transport {
    fn get(&self, path: &str, cnsl: &mut Console) -> Result<RawResponse>;

    fn post(&self, path: &str, body: &serde_json::Value, cnsl: &mut Console)
        -> Result<RawResponse>;
}

#[cfg(test)]
pub(crate) mod mock {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    /// In-memory transport answering from a fixed table; unknown paths get 404.
    #[derive(Debug, Default)]
    pub struct MockTransport {
        responses: HashMap<String, (u16, String)>,
        pub posted: RefCell<Vec<(String, serde_json::Value)>>,
    }

    impl MockTransport {
        pub fn new(responses: HashMap<&str, (u16, &str)>) -> Self {
            Self {
                responses: responses
                    .into_iter()
                    .map(|(path, (status, body))| (path.to_string(), (status, body.to_string())))
                    .collect(),
                posted: RefCell::new(Vec::new()),
            }
        }

        fn respond(&self, path: &str) -> RawResponse {
            match self.responses.get(path) {
                Some((status, body)) => {
                    RawResponse::new(StatusCode::from_u16(*status).unwrap(), body.as_bytes())
                }
                None => RawResponse::new(StatusCode::NOT_FOUND, "not json"),
            }
        }
    }

    impl Transport for MockTransport {
        fn get(&self, path: &str, _cnsl: &mut Console) -> Result<RawResponse> {
            Ok(self.respond(path))
        }

        fn post(
            &self,
            path: &str,
            body: &serde_json::Value,
            _cnsl: &mut Console,
        ) -> Result<RawResponse> {
            self.posted
                .borrow_mut()
                .push((path.to_string(), body.clone()));
            Ok(self.respond(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(code: u16) -> std::result::Result<Vec<u8>, ApiError> {
        RawResponse::new(StatusCode::from_u16(code).unwrap(), "body").success_body()
    }

    #[test]
    fn success_body() {
        assert_eq!(status_of(200).unwrap(), b"body".to_vec());
        assert_eq!(status_of(201).unwrap(), b"body".to_vec());
        assert!(matches!(status_of(401), Err(ApiError::Unauthorized)));
        assert!(matches!(status_of(404), Err(ApiError::NotFound)));
        assert!(matches!(
            status_of(500),
            Err(ApiError::UnexpectedStatus { code: 500 })
        ));
        assert!(matches!(
            status_of(302),
            Err(ApiError::UnexpectedStatus { code: 302 })
        ));
    }
}

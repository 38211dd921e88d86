use std::time::Duration;

use thiserror::Error;

/// Why a backend call produced no text.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("no API key configured, set the {0} environment variable")]
    MissingCredential(String),
    #[error("backend did not answer within {0:?}")]
    Timeout(Duration),
    #[error("request to backend failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("backend returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error("response has no {0}")]
    MissingField(&'static str),
}

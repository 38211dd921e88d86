use serde::{Deserialize, Serialize};

use crate::llm_handlers::error::BackendError;

/// Literal reply when the backend answered but carried no text.
pub const NO_EXPLANATION: &str = "No explanation generated.";

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct FloodQuery {
    /// Terrain elevation in meters.
    pub elevation: f64,
    /// Rainfall in millimeters.
    pub rainfall: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExplanationResult {
    pub explanation: String,
}

impl ExplanationResult {
    /// Folds a backend outcome into the single response field. Failures
    /// become readable text; the caller never sees a distinct error shape.
    pub fn from_outcome(outcome: Result<String, BackendError>) -> Self {
        let explanation = match outcome {
            Ok(text) => text,
            Err(BackendError::MissingField(_)) => NO_EXPLANATION.to_string(),
            Err(e) => format!("Error: {e}"),
        };
        Self { explanation }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatusResult {
    pub status: String,
}

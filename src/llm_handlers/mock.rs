use super::error::BackendError;
use super::traits::LlmHandler;

/// Offline backend. Replies with a fixed answer, or echoes the prompt when
/// none is set.
#[derive(Debug)]
pub struct MockLLM {
    pub answer: Option<String>,
}

impl MockLLM {
    pub fn new(answer: Option<String>) -> Self {
        MockLLM { answer }
    }

    pub fn echo() -> Self {
        MockLLM { answer: None }
    }
}

impl LlmHandler for MockLLM {
    async fn answer(&self, prompt: &str) -> Result<String, BackendError> {
        Ok(self.answer.clone().unwrap_or_else(|| prompt.to_owned()))
    }
}

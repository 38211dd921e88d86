use crate::prompt::SYSTEM_PROMPT;

use super::chat::{self, ChatRequest, ChatResponse};
use super::error::BackendError;
use super::http::{ApiKey, HttpClient};
use super::traits::LlmHandler;

/// Hosted chat completions on Together AI.
#[derive(Debug)]
pub struct TogetherChat {
    http: HttpClient,
    url: String,
    model: String,
    api_key: ApiKey,
}

impl TogetherChat {
    pub fn new(http: HttpClient, base_url: &str, model: &str, api_key: ApiKey) -> Self {
        TogetherChat {
            http,
            url: chat::completions_url(base_url),
            model: model.to_owned(),
            api_key,
        }
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }
}

impl LlmHandler for TogetherChat {
    async fn answer(&self, prompt: &str) -> Result<String, BackendError> {
        let token = self.api_key.require()?;
        let request = ChatRequest::new(&self.model, SYSTEM_PROMPT, prompt);
        let response: ChatResponse = self.http.post_json(&self.url, Some(token), &request).await?;
        response
            .into_first_text()
            .ok_or(BackendError::MissingField("choices[0].message.content"))
    }
}

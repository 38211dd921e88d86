use crate::configuration::{BackendConfig, BackendKind};

use super::error::BackendError;
use super::http::{ApiKey, HttpClient};
use super::mock::MockLLM;
use super::ollama::OllamaGenerate;
use super::openai::OpenAiChat;
use super::together::TogetherChat;

pub trait LlmHandler {
    fn answer(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, BackendError>> + Send;
}

/// The backend a deployment is wired to, fixed at startup.
#[derive(Debug)]
pub enum Llm {
    Together(TogetherChat),
    OpenAi(OpenAiChat),
    Ollama(OllamaGenerate),
    Mock(MockLLM),
}

impl Llm {
    pub fn from_config(config: &BackendConfig) -> anyhow::Result<Self> {
        let http = HttpClient::new(config.timeout())?;
        let api_key = || ApiKey::from_env(config.api_key_env().unwrap_or_default());

        Ok(match config.kind {
            BackendKind::Together => Llm::Together(TogetherChat::new(
                http,
                config.base_url(),
                config.model(),
                api_key(),
            )),
            BackendKind::OpenAi => Llm::OpenAi(OpenAiChat::new(
                http,
                config.base_url(),
                config.model(),
                api_key(),
            )),
            BackendKind::Ollama => {
                Llm::Ollama(OllamaGenerate::new(http, config.base_url(), config.model()))
            }
            BackendKind::Mock => Llm::Mock(MockLLM::new(config.mock_answer.clone())),
        })
    }

    pub async fn answer<'a>(&'a self, prompt: &'a str) -> Result<String, BackendError> {
        match self {
            Llm::Together(b) => b.answer(prompt).await,
            Llm::OpenAi(b) => b.answer(prompt).await,
            Llm::Ollama(b) => b.answer(prompt).await,
            Llm::Mock(b) => b.answer(prompt).await,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Llm::Together(_) => "together",
            Llm::OpenAi(_) => "openai",
            Llm::Ollama(_) => "ollama",
            Llm::Mock(_) => "mock",
        }
    }

    /// Fixed text reported by the status endpoint.
    pub fn status(&self) -> &'static str {
        match self {
            Llm::Together(_) => "FloodLens AI using Together API",
            Llm::OpenAi(_) => "FloodLens AI using OpenAI API",
            Llm::Ollama(_) => "FloodLens AI using local Ollama model",
            Llm::Mock(_) => "FloodLens AI using mock backend",
        }
    }

    /// Only a locally hosted model has a cold start worth priming.
    pub fn benefits_from_warmup(&self) -> bool {
        matches!(self, Llm::Ollama(_))
    }

    /// Environment variable of a hosted provider whose key is not set.
    pub fn missing_credential(&self) -> Option<&str> {
        let key = match self {
            Llm::Together(b) => b.api_key(),
            Llm::OpenAi(b) => b.api_key(),
            Llm::Ollama(_) | Llm::Mock(_) => return None,
        };
        (!key.is_set()).then(|| key.env_var())
    }
}

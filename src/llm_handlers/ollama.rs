use serde::{Deserialize, Serialize};

use super::error::BackendError;
use super::http::HttpClient;
use super::traits::LlmHandler;

/// Single-shot, non-streaming generation on a local Ollama server.
#[derive(Debug)]
pub struct OllamaGenerate {
    http: HttpClient,
    url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

impl OllamaGenerate {
    pub fn new(http: HttpClient, base_url: &str, model: &str) -> Self {
        OllamaGenerate {
            http,
            url: format!("{}/api/generate", base_url.trim_end_matches('/')),
            model: model.to_owned(),
        }
    }
}

impl LlmHandler for OllamaGenerate {
    async fn answer(&self, prompt: &str) -> Result<String, BackendError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };
        let response: GenerateResponse = self.http.post_json(&self.url, None, &request).await?;
        response
            .response
            .filter(|text| !text.is_empty())
            .ok_or(BackendError::MissingField("response"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_handlers::test_upstream;
    use axum::{http::HeaderMap, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::time::Duration;

    #[tokio::test]
    async fn returns_response_field_verbatim() {
        let app = Router::new().route(
            "/api/generate",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let text = format!(
                    " {} {} stream={} auth={} ",
                    body["model"].as_str().unwrap(),
                    body["prompt"].as_str().unwrap(),
                    body["stream"],
                    headers.contains_key("authorization"),
                );
                Json(json!({"model": "tinyllama", "response": text, "done": true}))
            }),
        );
        let base = test_upstream::spawn(app).await;

        let backend = OllamaGenerate::new(test_upstream::client(), &base, "tinyllama");
        let answer = backend.answer("hi").await.unwrap();
        assert_eq!(answer, " tinyllama hi stream=false auth=false ");
    }

    #[tokio::test]
    async fn missing_response_is_missing_field() {
        let app = Router::new().route(
            "/api/generate",
            post(|| async { Json(json!({"error": "model not found"})) }),
        );
        let base = test_upstream::spawn(app).await;

        let backend = OllamaGenerate::new(test_upstream::client(), &base, "tinyllama");
        let err = backend.answer("hi").await.unwrap_err();
        assert!(matches!(err, BackendError::MissingField("response")), "{err:?}");
    }

    #[tokio::test]
    async fn slow_backend_times_out() {
        let app = Router::new().route(
            "/api/generate",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!({"response": "too late"}))
            }),
        );
        let base = test_upstream::spawn(app).await;

        let http = HttpClient::new(Duration::from_millis(200)).unwrap();
        let backend = OllamaGenerate::new(http, &base, "tinyllama");
        let err = backend.answer("hi").await.unwrap_err();
        match err {
            BackendError::Timeout(limit) => assert_eq!(limit, Duration::from_millis(200)),
            other => panic!("unexpected {other:?}"),
        }
    }
}

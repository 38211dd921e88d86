use std::{sync::Arc, time::Instant};

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;

use crate::llm_handlers::traits::Llm;
use crate::models::{ExplanationResult, FloodQuery, StatusResult};
use crate::prompt::build_prompt;

/// Read-only state shared by all requests.
#[derive(Debug)]
pub struct AppState {
    pub llm: Arc<Llm>,
}

impl AppState {
    pub fn new(llm: Arc<Llm>) -> Self {
        Self { llm }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/explain-flood-risk", post(explain_flood_risk))
        .route("/status", get(status))
        .with_state(state)
}

/// Serves until the listener fails.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> anyhow::Result<()> {
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Every well-formed query gets a 200; backend failures travel as text in
/// the `explanation` field.
async fn explain_flood_risk(
    State(state): State<Arc<AppState>>,
    Json(query): Json<FloodQuery>,
) -> Json<ExplanationResult> {
    log::info!(
        "explain-flood-risk elevation={} rainfall={}",
        query.elevation,
        query.rainfall
    );
    let started = Instant::now();
    let prompt = build_prompt(&query);
    let outcome = state.llm.answer(&prompt).await;
    match &outcome {
        Ok(text) => log::info!(
            "{} answered {} bytes in {:?}",
            state.llm.name(),
            text.len(),
            started.elapsed()
        ),
        Err(e) => log::warn!(
            "{} failed after {:?}: {e}",
            state.llm.name(),
            started.elapsed()
        ),
    }
    Json(ExplanationResult::from_outcome(outcome))
}

async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResult> {
    Json(StatusResult {
        status: state.llm.status().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_handlers::{
        http::{ApiKey, HttpClient},
        mock::MockLLM,
        ollama::OllamaGenerate,
        test_upstream,
        together::TogetherChat,
    };
    use crate::models::NO_EXPLANATION;
    use serde_json::{json, Value};
    use std::time::Duration;

    async fn spawn_app(llm: Llm) -> String {
        let state = Arc::new(AppState::new(Arc::new(llm)));
        test_upstream::spawn(router(state)).await
    }

    async fn explain(base: &str, body: Value) -> (u16, Value) {
        let response = reqwest::Client::new()
            .post(format!("{base}/explain-flood-risk"))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap())
    }

    #[tokio::test]
    async fn explanation_is_backend_text() {
        let base = spawn_app(Llm::Mock(MockLLM::new(Some("Low risk.".into())))).await;
        let (status, body) = explain(&base, json!({"elevation": 120.0, "rainfall": 15.0})).await;
        assert_eq!(status, 200);
        assert_eq!(body, json!({"explanation": "Low risk."}));
    }

    #[tokio::test]
    async fn prompt_reaches_backend() {
        let base = spawn_app(Llm::Mock(MockLLM::echo())).await;
        let (_, body) = explain(&base, json!({"elevation": 4.5, "rainfall": 320})).await;
        let explanation = body["explanation"].as_str().unwrap();
        assert!(explanation.contains("Elevation: 4.5 meters"));
        assert!(explanation.contains("Rainfall: 320 mm"));
    }

    #[tokio::test]
    async fn unreachable_backend_still_returns_200() {
        let dead = test_upstream::dead_end().await;
        let backend = TogetherChat::new(
            HttpClient::new(Duration::from_secs(2)).unwrap(),
            &dead,
            "m",
            ApiKey::new("TOGETHER_API_KEY", "t"),
        );
        let base = spawn_app(Llm::Together(backend)).await;

        let (status, body) = explain(&base, json!({"elevation": 1, "rainfall": 2})).await;
        assert_eq!(status, 200);
        let explanation = body["explanation"].as_str().unwrap();
        assert!(explanation.starts_with("Error: "), "{explanation}");
    }

    #[tokio::test]
    async fn missing_credential_still_returns_200() {
        let backend = TogetherChat::new(
            test_upstream::client(),
            &test_upstream::dead_end().await,
            "m",
            ApiKey::from_env("FLOODLENS_TEST_UNSET_KEY_5e61"),
        );
        let base = spawn_app(Llm::Together(backend)).await;

        let (status, body) = explain(&base, json!({"elevation": 1, "rainfall": 2})).await;
        assert_eq!(status, 200);
        assert!(body["explanation"]
            .as_str()
            .unwrap()
            .contains("FLOODLENS_TEST_UNSET_KEY_5e61"));
    }

    #[tokio::test]
    async fn missing_field_uses_fallback() {
        let upstream = test_upstream::spawn(Router::new().route(
            "/api/generate",
            post(|| async { Json(json!({"done": true})) }),
        ))
        .await;
        let backend = OllamaGenerate::new(test_upstream::client(), &upstream, "tinyllama");
        let base = spawn_app(Llm::Ollama(backend)).await;

        let (status, body) = explain(&base, json!({"elevation": 1, "rainfall": 2})).await;
        assert_eq!(status, 200);
        assert_eq!(body["explanation"], NO_EXPLANATION);
    }

    #[tokio::test]
    async fn status_is_fixed() {
        let base = spawn_app(Llm::Mock(MockLLM::echo())).await;
        let client = reqwest::Client::new();

        let first: Value = client
            .get(format!("{base}/status"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        explain(&base, json!({"elevation": 1, "rainfall": 2})).await;
        let second: Value = client
            .get(format!("{base}/status"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(first, json!({"status": "FloodLens AI using mock backend"}));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn concurrent_requests_stay_separate() {
        let base = spawn_app(Llm::Mock(MockLLM::echo())).await;

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let base = base.clone();
                tokio::spawn(async move {
                    let (status, body) =
                        explain(&base, json!({"elevation": i, "rainfall": 1000 + i})).await;
                    (i, status, body)
                })
            })
            .collect();

        for task in tasks {
            let (i, status, body) = task.await.unwrap();
            assert_eq!(status, 200);
            let explanation = body["explanation"].as_str().unwrap();
            assert!(explanation.contains(&format!("Elevation: {i} meters")));
            assert!(explanation.contains(&format!("Rainfall: {} mm", 1000 + i)));
        }
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let base = spawn_app(Llm::Mock(MockLLM::echo())).await;
        let (status, _) = explain_raw(&base, json!({"elevation": "high"})).await;
        assert!((400..500).contains(&status));
    }

    async fn explain_raw(base: &str, body: Value) -> (u16, String) {
        let response = reqwest::Client::new()
            .post(format!("{base}/explain-flood-risk"))
            .json(&body)
            .send()
            .await
            .unwrap();
        (response.status().as_u16(), response.text().await.unwrap())
    }
}

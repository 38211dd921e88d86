use std::{fmt, time::Duration};

use anyhow::Context;
use serde::{de::DeserializeOwned, Serialize};

use super::error::BackendError;

/// Longest upstream error body kept in a `Status` error.
const MAX_ERROR_BODY: usize = 512;

/// JSON-over-HTTP client shared by all remote backends. Every call is bounded
/// by the timeout given at construction.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { inner, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn post_json<B, R>(
        &self,
        url: &str,
        bearer: Option<&str>,
        body: &B,
    ) -> Result<R, BackendError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let mut request = self.inner.post(url).json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            let mut body = text.trim().to_string();
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(BackendError::Status { status, body });
        }

        Ok(serde_json::from_str(&text)?)
    }

    fn classify(&self, err: reqwest::Error) -> BackendError {
        if err.is_timeout() {
            BackendError::Timeout(self.timeout)
        } else {
            BackendError::Transport(err)
        }
    }
}

/// Bearer token of a hosted provider, resolved from the environment once at
/// startup. A missing key is reported per call rather than at startup.
#[derive(Clone)]
pub struct ApiKey {
    env_var: String,
    value: Option<String>,
}

impl ApiKey {
    pub fn from_env(env_var: &str) -> Self {
        let value = std::env::var(env_var).ok().filter(|v| !v.trim().is_empty());
        Self {
            env_var: env_var.to_owned(),
            value,
        }
    }

    pub fn new(env_var: &str, value: impl Into<String>) -> Self {
        Self {
            env_var: env_var.to_owned(),
            value: Some(value.into()),
        }
    }

    pub fn env_var(&self) -> &str {
        &self.env_var
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    pub fn require(&self) -> Result<&str, BackendError> {
        self.value
            .as_deref()
            .ok_or_else(|| BackendError::MissingCredential(self.env_var.clone()))
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("env_var", &self.env_var)
            .field("value", &self.value.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

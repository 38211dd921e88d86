use anyhow::Context;
use serde::{Deserialize, Serialize};

use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

/// Upper bound on a single outbound backend call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FloodLensConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to.
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:8000".to_string(),
        }
    }
}

/// The text-generation provider a deployment talks to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Together,
    #[serde(rename = "openai")]
    #[value(name = "openai")]
    OpenAi,
    Ollama,
    Mock,
}

impl BackendKind {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            BackendKind::Together => "https://api.together.xyz",
            BackendKind::OpenAi => "https://api.openai.com",
            BackendKind::Ollama => "http://localhost:11434",
            BackendKind::Mock => "",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            BackendKind::Together => "mistralai/Mistral-7B-Instruct-v0.2",
            BackendKind::OpenAi => "gpt-3.5-turbo",
            BackendKind::Ollama => "tinyllama",
            BackendKind::Mock => "mock",
        }
    }

    /// Environment variable holding the bearer token, for hosted providers.
    pub fn default_api_key_env(&self) -> Option<&'static str> {
        match self {
            BackendKind::Together => Some("TOGETHER_API_KEY"),
            BackendKind::OpenAi => Some("OPENAI_API_KEY"),
            BackendKind::Ollama | BackendKind::Mock => None,
        }
    }
}

/// Backend selection. Unset fields fall back to the defaults of `kind`, so
/// switching `kind` alone yields a working configuration.
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    pub kind: BackendKind,
    pub base_url: Option<String>,
    pub model: Option<String>,
    /// Name of the environment variable the credential is read from. The
    /// credential itself never appears in configuration files.
    pub api_key_env: Option<String>,
    pub timeout_secs: u64,
    /// Prime the local backend at startup. Ignored by hosted providers.
    pub warmup: bool,
    /// Fixed reply of the mock backend; the prompt is echoed when unset.
    pub mock_answer: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            base_url: None,
            model: None,
            api_key_env: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            warmup: true,
            mock_answer: None,
        }
    }
}

impl BackendConfig {
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.kind.default_base_url())
    }

    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.kind.default_model())
    }

    pub fn api_key_env(&self) -> Option<&str> {
        self.api_key_env
            .as_deref()
            .or_else(|| self.kind.default_api_key_env())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Switches provider, dropping overrides that belonged to the previous one.
    pub fn switch_to(&mut self, kind: BackendKind) {
        if self.kind != kind {
            self.kind = kind;
            self.base_url = None;
            self.model = None;
            self.api_key_env = None;
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl From<LogLevel> for tracing_subscriber::filter::LevelFilter {
    fn from(level: LogLevel) -> Self {
        use tracing_subscriber::filter::LevelFilter;
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Write logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl FloodLensConfig {
    pub fn default_file_path() -> PathBuf {
        let home_dir = env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home_dir).join(".config").join("floodlens.yaml")
    }

    pub fn try_read_from_file<P: AsRef<Path>>(config_path: P) -> anyhow::Result<Self> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            anyhow::bail!("path does not exist: {}", config_path.display());
        }
        let config_data = fs::read_to_string(config_path)
            .with_context(|| format!("cannot read {}", config_path.display()))?;
        Self::from_yaml(&config_data)
            .with_context(|| format!("invalid configuration in {}", config_path.display()))
    }

    pub fn from_yaml(config_data: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(config_data)?)
    }

    /// Reads `explicit` when given. Otherwise reads the default file if it
    /// exists and falls back to built-in defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::try_read_from_file(path),
            None => {
                let path = Self::default_file_path();
                if path.exists() {
                    Self::try_read_from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

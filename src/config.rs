use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "DocFinder";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default bind address for the local JSON API.
pub const DEFAULT_BIND: &str = "127.0.0.1:8787";
/// Default Ollama-compatible generation service.
pub const DEFAULT_LLM_URL: &str = "http://localhost:11434";
pub const DEFAULT_LLM_MODEL: &str = "medgemma:4b";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

const ENV_BIND: &str = "DOCFINDER_BIND";
const ENV_LLM_URL: &str = "DOCFINDER_LLM_URL";
const ENV_LLM_MODEL: &str = "DOCFINDER_LLM_MODEL";
const ENV_LLM_TIMEOUT: &str = "DOCFINDER_LLM_TIMEOUT_SECS";
const ENV_LLM_API_KEY: &str = "DOCFINDER_LLM_API_KEY";
const ENV_DIRECTORY: &str = "DOCFINDER_DIRECTORY";

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> String {
    "docfinder_lib=info,docfinder=info,warn".to_string()
}

/// Get the application data directory
/// ~/DocFinder/ on all platforms. Falls back to the working directory
/// when no home directory can be resolved.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Optional user-provided practitioner list that replaces the bundled one.
pub fn directory_override_path() -> PathBuf {
    app_data_dir().join("practitioners.json")
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid bind address {value:?}: {reason}")]
    InvalidBind { value: String, reason: String },

    #[error("Invalid language model timeout {0:?} (expected whole seconds > 0)")]
    InvalidTimeout(String),

    #[error("Language model URL must not be empty")]
    EmptyLlmUrl,
}

/// Connection settings for the classification service.
#[derive(Clone)]
pub struct LlmSettings {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    /// Opaque credential. Sent as a bearer token, never logged.
    pub api_key: Option<String>,
}

impl std::fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSettings")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LLM_URL.to_string(),
            model: DEFAULT_LLM_MODEL.to_string(),
            timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
            api_key: None,
        }
    }
}

/// Process configuration resolved at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: SocketAddr,
    pub llm: LlmSettings,
    /// Explicit practitioner file. `None` = override file or bundled data.
    pub directory_path: Option<PathBuf>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup (environment, tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind_raw = read(ENV_BIND).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidBind {
                value: bind_raw.clone(),
                reason: e.to_string(),
            })?;

        let timeout_secs = match read(ENV_LLM_TIMEOUT) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => DEFAULT_LLM_TIMEOUT_SECS,
        };

        let base_url = read(ENV_LLM_URL).unwrap_or_else(|| DEFAULT_LLM_URL.to_string());
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ConfigError::EmptyLlmUrl);
        }

        Ok(Self {
            bind,
            llm: LlmSettings {
                base_url,
                model: read(ENV_LLM_MODEL).unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
                timeout_secs,
                api_key: read(ENV_LLM_API_KEY),
            },
            directory_path: read(ENV_DIRECTORY).map(PathBuf::from),
        })
    }
}

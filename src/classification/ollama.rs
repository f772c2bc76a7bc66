use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::types::LlmClient;
use super::ClassificationError;
use crate::config::LlmSettings;

/// Probe timeout for `/api/tags`; independent of the generation timeout.
const HEALTH_TIMEOUT_SECS: u64 = 5;

/// HTTP client for an Ollama-compatible generation service.
///
/// The underlying `reqwest::blocking::Client` is built per call: callers run
/// on `spawn_blocking` threads and the blocking client must not be created
/// or dropped on an async worker.
pub struct OllamaClient {
    base_url: String,
    timeout_secs: u64,
    api_key: Option<String>,
}

impl OllamaClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
            api_key: None,
        }
    }

    pub fn from_settings(settings: &LlmSettings) -> Self {
        Self {
            api_key: settings.api_key.clone(),
            ..Self::new(&settings.base_url, settings.timeout_secs)
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn http(&self, timeout_secs: u64) -> Result<reqwest::blocking::Client, ClassificationError> {
        reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ClassificationError::HttpClient(e.to_string()))
    }

    fn authorize(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    fn map_send_error(&self, e: reqwest::Error, timeout_secs: u64) -> ClassificationError {
        if e.is_connect() {
            ClassificationError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            ClassificationError::HttpClient(format!("Request timed out after {timeout_secs}s"))
        } else {
            ClassificationError::HttpClient(e.to_string())
        }
    }
}

/// Request body for `/api/generate`
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
}

/// Response body from `/api/generate`
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl LlmClient for OllamaClient {
    fn generate(
        &self,
        model: &str,
        prompt: &str,
        system: &str,
    ) -> Result<String, ClassificationError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model,
            prompt,
            system,
            stream: false,
        };

        let response = self
            .authorize(self.http(self.timeout_secs)?.post(&url))
            .json(&body)
            .send()
            .map_err(|e| self.map_send_error(e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClassificationError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| ClassificationError::ResponseParsing(e.to_string()))?;

        Ok(parsed.response)
    }

    fn is_reachable(&self) -> Result<bool, ClassificationError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .authorize(self.http(HEALTH_TIMEOUT_SECS)?.get(&url))
            .send()
            .map_err(|e| self.map_send_error(e, HEALTH_TIMEOUT_SECS))?;
        Ok(response.status().is_success())
    }
}

/// Mock LLM client for testing: returns a configurable response and
/// records every prompt it receives.
pub struct MockLlmClient {
    response: Result<String, String>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl MockLlmClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: Ok(response.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// A client whose every call fails at the transport level.
    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            ..Self::new("")
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok()?.clone()
    }
}

impl LlmClient for MockLlmClient {
    fn generate(
        &self,
        _model: &str,
        prompt: &str,
        _system: &str,
    ) -> Result<String, ClassificationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }
        self.response
            .clone()
            .map_err(ClassificationError::HttpClient)
    }

    fn is_reachable(&self) -> Result<bool, ClassificationError> {
        Ok(self.response.is_ok())
    }
}

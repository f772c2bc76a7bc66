use std::sync::Arc;

use super::prompt::{build_symptom_prompt, CLASSIFICATION_SYSTEM_PROMPT};
use super::types::LlmClient;
use super::ClassificationError;
use crate::config::LlmSettings;

use super::ollama::OllamaClient;

/// Label returned whenever the service cannot produce one.
pub const FALLBACK_LABEL: &str = "Physician";

/// Stateless wrapper around one outbound classification call.
///
/// Cloning shares the client. No retries, no caching; the transport
/// owns the timeout.
#[derive(Clone)]
pub struct ClassificationGateway {
    client: Arc<dyn LlmClient>,
    model: String,
}

impl ClassificationGateway {
    pub fn new(client: Arc<dyn LlmClient>, model: &str) -> Self {
        Self {
            client,
            model: model.to_string(),
        }
    }

    /// Gateway talking to the configured Ollama-compatible service.
    pub fn from_settings(settings: &LlmSettings) -> Self {
        Self::new(
            Arc::new(OllamaClient::from_settings(settings)),
            &settings.model,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One request, trimmed response. Errors stay inside.
    fn try_classify(&self, symptoms: &str) -> Result<String, ClassificationError> {
        let prompt = build_symptom_prompt(symptoms);
        let raw = self
            .client
            .generate(&self.model, &prompt, CLASSIFICATION_SYSTEM_PROMPT)?;
        let label = raw.trim();
        if label.is_empty() {
            return Err(ClassificationError::EmptyResponse);
        }
        Ok(label.to_string())
    }

    /// Map a symptom description to a raw, untrusted label.
    ///
    /// Callers must not pass blank text. Never fails: any error is logged
    /// and replaced by [`FALLBACK_LABEL`].
    pub fn classify(&self, symptoms: &str) -> String {
        match self.try_classify(symptoms) {
            Ok(label) => {
                tracing::debug!(model = %self.model, label = %label, "Classification returned");
                label
            }
            Err(e) => {
                tracing::warn!(
                    model = %self.model,
                    symptom_chars = symptoms.chars().count(),
                    error = %e,
                    "Classification failed, using fallback label"
                );
                FALLBACK_LABEL.to_string()
            }
        }
    }

    /// [`classify`](Self::classify) on a blocking thread.
    pub async fn classify_async(&self, symptoms: String) -> String {
        let gateway = self.clone();
        match tokio::task::spawn_blocking(move || gateway.classify(&symptoms)).await {
            Ok(label) => label,
            Err(e) => {
                let err = ClassificationError::Task(e.to_string());
                tracing::warn!(error = %err, "Classification failed, using fallback label");
                FALLBACK_LABEL.to_string()
            }
        }
    }

    /// Whether the service answers at all. Errors read as unreachable.
    pub async fn is_reachable(&self) -> bool {
        let client = Arc::clone(&self.client);
        tokio::task::spawn_blocking(move || client.is_reachable())
            .await
            .ok()
            .and_then(Result::ok)
            .unwrap_or(false)
    }
}

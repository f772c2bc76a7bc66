use super::ClassificationError;

/// Text-generation client abstraction (allows mocking).
pub trait LlmClient: Send + Sync {
    fn generate(
        &self,
        model: &str,
        prompt: &str,
        system: &str,
    ) -> Result<String, ClassificationError>;

    /// Lightweight reachability probe.
    fn is_reachable(&self) -> Result<bool, ClassificationError>;
}

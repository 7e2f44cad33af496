//! TogetherApiAgent - second-tier provider backed by the Together chat-completions API.
//!
//! Credential priority: ~/.config/tutoria/secret.json > environment variables
//! (TOGETHER_API_KEY, TOGETHER_MODEL_NAME).

use async_trait::async_trait;
use tutoria_core::config::ProviderSecret;
use tutoria_core::generation::{ExerciseSlot, GeneratedExercise, GenerationParameters};
use tutoria_core::provider::{ProviderAdapter, ProviderError};

use crate::chat_completion::{ChatCompletionClient, SamplingOptions, resolve_credentials};

pub const TOGETHER_PROVIDER_ID: &str = "together";
const DEFAULT_TOGETHER_MODEL: &str = "meta-llama/Llama-3.3-70B-Instruct-Turbo";
const BASE_URL: &str = "https://api.together.xyz/v1/chat/completions";

const EXPLANATION_SAMPLING: SamplingOptions = SamplingOptions {
    temperature: 0.7,
    max_tokens: 800,
    top_p: Some(0.9),
};

const EXERCISE_SAMPLING: SamplingOptions = SamplingOptions {
    temperature: 0.8,
    max_tokens: 500,
    top_p: None,
};

/// Provider adapter that talks to the Together HTTP API.
#[derive(Clone)]
pub struct TogetherApiAgent {
    client: ChatCompletionClient,
}

impl TogetherApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: ChatCompletionClient::new(TOGETHER_PROVIDER_ID, BASE_URL, api_key, model),
        }
    }

    /// Builds the agent from injected secrets, falling back to the environment.
    ///
    /// Model name defaults to `meta-llama/Llama-3.3-70B-Instruct-Turbo` if not specified.
    pub fn from_config(secret: Option<&ProviderSecret>, model_override: Option<&str>) -> Self {
        let (api_key, model) = resolve_credentials(
            secret,
            model_override,
            "TOGETHER_API_KEY",
            "TOGETHER_MODEL_NAME",
            DEFAULT_TOGETHER_MODEL,
        );
        Self::new(api_key, model)
    }
}

#[async_trait]
impl ProviderAdapter for TogetherApiAgent {
    fn id(&self) -> &str {
        TOGETHER_PROVIDER_ID
    }

    fn model(&self) -> &str {
        self.client.model()
    }

    fn is_available(&self) -> bool {
        self.client.has_api_key()
    }

    async fn generate_explanation(
        &self,
        params: &GenerationParameters,
    ) -> Result<String, ProviderError> {
        self.client.explain(params, EXPLANATION_SAMPLING).await
    }

    async fn generate_exercise(
        &self,
        params: &GenerationParameters,
        slot: ExerciseSlot,
    ) -> Result<GeneratedExercise, ProviderError> {
        self.client.exercise(params, slot, EXERCISE_SAMPLING).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_and_availability() {
        let agent = TogetherApiAgent::new("tg-123", DEFAULT_TOGETHER_MODEL);
        assert_eq!(agent.id(), "together");
        assert_eq!(agent.model(), "meta-llama/Llama-3.3-70B-Instruct-Turbo");
        assert!(agent.is_available());

        assert!(!TogetherApiAgent::new("", DEFAULT_TOGETHER_MODEL).is_available());
    }

    #[test]
    fn test_from_config_uses_secret_entry() {
        let secret = ProviderSecret {
            api_key: "tg-file".to_string(),
            model_name: None,
        };
        let agent = TogetherApiAgent::from_config(Some(&secret), None);
        assert!(agent.is_available());
        assert_eq!(agent.model(), DEFAULT_TOGETHER_MODEL);
    }

    #[tokio::test]
    async fn test_unconfigured_agent_fails_without_network() {
        let agent = TogetherApiAgent::new(" ", DEFAULT_TOGETHER_MODEL);
        let params = GenerationParameters::new("limits", "math", "university");
        assert_eq!(
            agent.generate_explanation(&params).await.unwrap_err(),
            ProviderError::NotConfigured("together".to_string())
        );
    }
}

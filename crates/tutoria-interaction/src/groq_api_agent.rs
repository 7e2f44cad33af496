//! GroqApiAgent - first-tier provider backed by the Groq chat-completions API.
//!
//! Credential priority: ~/.config/tutoria/secret.json > environment variables
//! (GROQ_API_KEY, GROQ_MODEL_NAME).

use async_trait::async_trait;
use tutoria_core::config::ProviderSecret;
use tutoria_core::generation::{ExerciseSlot, GeneratedExercise, GenerationParameters};
use tutoria_core::provider::{ProviderAdapter, ProviderError};

use crate::chat_completion::{ChatCompletionClient, SamplingOptions, resolve_credentials};

pub const GROQ_PROVIDER_ID: &str = "groq";
const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";
const BASE_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

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

/// Provider adapter that talks to the Groq HTTP API.
#[derive(Clone)]
pub struct GroqApiAgent {
    client: ChatCompletionClient,
}

impl GroqApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: ChatCompletionClient::new(GROQ_PROVIDER_ID, BASE_URL, api_key, model),
        }
    }

    /// Builds the agent from injected secrets, falling back to the environment.
    ///
    /// Model name defaults to `llama-3.3-70b-versatile` if not specified.
    pub fn from_config(secret: Option<&ProviderSecret>, model_override: Option<&str>) -> Self {
        let (api_key, model) = resolve_credentials(
            secret,
            model_override,
            "GROQ_API_KEY",
            "GROQ_MODEL_NAME",
            DEFAULT_GROQ_MODEL,
        );
        Self::new(api_key, model)
    }
}

#[async_trait]
impl ProviderAdapter for GroqApiAgent {
    fn id(&self) -> &str {
        GROQ_PROVIDER_ID
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

//! Shared client for OpenAI-compatible chat-completions endpoints.
//!
//! Groq and Together both speak this protocol; the adapters only differ in
//! endpoint, default model and sampling options.

use reqwest::{Client, StatusCode, header::HeaderValue};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tutoria_core::config::ProviderSecret;
use tutoria_core::generation::{
    ExerciseSlot, GeneratedExercise, GenerationParameters, parse_exercise_response,
};
use tutoria_core::provider::ProviderError;

use crate::prompts::{
    EXERCISE_SYSTEM_PROMPT, EXPLANATION_SYSTEM_PROMPT, exercise_prompt, explanation_prompt,
};

/// Sampling parameters for one completion call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: Option<f32>,
}

/// HTTP client bound to one provider endpoint, key and model.
#[derive(Clone)]
pub struct ChatCompletionClient {
    client: Client,
    provider: &'static str,
    endpoint: String,
    api_key: String,
    model: String,
}

impl ChatCompletionClient {
    /// Creates a client. `provider` is only used in error messages.
    pub fn new(
        provider: &'static str,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            provider,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Sends a system + user message pair and returns the first choice's text.
    pub async fn complete(
        &self,
        system: &str,
        user: &str,
        options: SamplingOptions,
    ) -> Result<String, ProviderError> {
        if !self.has_api_key() {
            return Err(ProviderError::NotConfigured(self.provider.to_string()));
        }

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            top_p: options.top_p,
        };

        self.send_request(&body).await
    }

    async fn send_request(&self, body: &ChatCompletionRequest<'_>) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| ProviderError::Request {
                status_code: None,
                message: format!("{} API request failed: {err}", self.provider),
                is_retryable: err.is_connect() || err.is_timeout(),
                retry_after: None,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| format!("Failed to read {} error body", self.provider));
            return Err(map_http_error(status, body_text, retry_after));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|err| {
            ProviderError::malformed(format!("Failed to parse {} response: {err}", self.provider))
        })?;

        extract_text_response(parsed)
    }
}

/// Resolves `(api_key, model)` for an adapter.
///
/// Priority:
/// 1. secret.json entry with a non-empty key
/// 2. Environment variables (`key_var`, `model_var`)
///
/// A model configured in config.toml overrides both; the adapter default is
/// used last. The key may come back empty, which makes the adapter unavailable.
pub(crate) fn resolve_credentials(
    secret: Option<&ProviderSecret>,
    model_override: Option<&str>,
    key_var: &str,
    model_var: &str,
    default_model: &str,
) -> (String, String) {
    let (api_key, secret_model) = match secret.filter(|s| !s.api_key.trim().is_empty()) {
        Some(secret) => (secret.api_key.clone(), secret.model_name.clone()),
        None => (
            env::var(key_var).unwrap_or_default(),
            env::var(model_var).ok().filter(|m| !m.trim().is_empty()),
        ),
    };

    let model = model_override
        .map(str::to_string)
        .or(secret_model)
        .unwrap_or_else(|| default_model.to_string());
    (api_key, model)
}

impl ChatCompletionClient {
    /// Free-text explanation; blank answers count as a failure.
    pub async fn explain(
        &self,
        params: &GenerationParameters,
        options: SamplingOptions,
    ) -> Result<String, ProviderError> {
        let prompt = explanation_prompt(params)?;
        let text = self
            .complete(EXPLANATION_SYSTEM_PROMPT, &prompt, options)
            .await?;
        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(text)
    }

    /// One structurally validated exercise.
    pub async fn exercise(
        &self,
        params: &GenerationParameters,
        slot: ExerciseSlot,
        options: SamplingOptions,
    ) -> Result<GeneratedExercise, ProviderError> {
        let prompt = exercise_prompt(params, slot)?;
        let text = self.complete(EXERCISE_SYSTEM_PROMPT, &prompt, options).await?;
        parse_exercise_response(&text)
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String, ProviderError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(ProviderError::EmptyResponse)
}

fn map_http_error(status: StatusCode, body: String, retry_after: Option<Duration>) -> ProviderError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    ProviderError::Request {
        status_code: Some(status.as_u16()),
        message,
        is_retryable,
        retry_after,
    }
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    // HTTP-date values are ignored
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

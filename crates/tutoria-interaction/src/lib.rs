//! Concrete provider adapters and the prompts they send.

pub mod chat_completion;
pub mod groq_api_agent;
pub mod prompts;
pub mod together_api_agent;

use std::sync::Arc;
use tutoria_core::config::{ProviderKind, SecretConfig, TutorConfig};
use tutoria_core::provider::ProviderAdapter;

pub use groq_api_agent::GroqApiAgent;
pub use together_api_agent::TogetherApiAgent;

/// Builds the provider chain in configured priority order.
///
/// Disabled providers are skipped. Providers without credentials are still
/// included; they report themselves unavailable and the orchestrator skips
/// them at call time.
pub fn build_provider_chain(
    config: &TutorConfig,
    secrets: &SecretConfig,
) -> Vec<Arc<dyn ProviderAdapter>> {
    config
        .enabled_providers()
        .map(|settings| {
            let secret = secrets.for_provider(settings.kind);
            let model = settings.model_name.as_deref();
            let adapter: Arc<dyn ProviderAdapter> = match settings.kind {
                ProviderKind::Groq => Arc::new(GroqApiAgent::from_config(secret, model)),
                ProviderKind::Together => Arc::new(TogetherApiAgent::from_config(secret, model)),
            };
            tracing::debug!(
                provider = adapter.id(),
                model = adapter.model(),
                available = adapter.is_available(),
                "Registered provider"
            );
            adapter
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutoria_core::config::{ProviderSecret, ProviderSettings};

    fn secrets() -> SecretConfig {
        SecretConfig {
            groq: Some(ProviderSecret {
                api_key: "gsk-1".to_string(),
                model_name: None,
            }),
            together: Some(ProviderSecret {
                api_key: "tg-1".to_string(),
                model_name: Some("mistralai/Mixtral-8x7B-Instruct-v0.1".to_string()),
            }),
        }
    }

    #[test]
    fn test_chain_follows_configured_priority() {
        let chain = build_provider_chain(&TutorConfig::default(), &secrets());
        let ids: Vec<_> = chain.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["groq", "together"]);
        assert_eq!(chain[1].model(), "mistralai/Mixtral-8x7B-Instruct-v0.1");
        assert!(chain.iter().all(|p| p.is_available()));
    }

    #[test]
    fn test_disabled_providers_are_skipped_and_order_can_change() {
        let config = TutorConfig {
            providers: vec![
                ProviderSettings {
                    kind: ProviderKind::Together,
                    model_name: Some("custom".to_string()),
                    enabled: true,
                },
                ProviderSettings {
                    kind: ProviderKind::Groq,
                    model_name: None,
                    enabled: false,
                },
            ],
            ..TutorConfig::default()
        };

        let chain = build_provider_chain(&config, &secrets());
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].id(), "together");
        assert_eq!(chain[0].model(), "custom");
    }
}

//! Configuration models.
//!
//! `TutorConfig` mirrors `config.toml`; `SecretConfig` mirrors `secret.json`.
//! Both are read once at startup and then passed around read-only.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A subject students can ask about.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SubjectConfig {
    pub id: String,
    pub display_name: String,
}

/// An academic level and the difficulty an exercise batch starts from.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LevelConfig {
    pub id: String,
    /// Difficulty (1-10) of the first exercise in a batch at this level
    pub base_difficulty: u8,
}

/// Known provider backends.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Groq,
    Together,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "groq",
            ProviderKind::Together => "together",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the provider priority list.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    /// Overrides the model from secret.json / environment / adapter default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

/// Request-size and input-range limits enforced at the validation boundary.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LimitsConfig {
    pub min_topic_chars: usize,
    pub default_exercise_count: usize,
    pub max_exercise_count: usize,
    pub min_age: u8,
    pub max_age: u8,
    /// How many of the most recent history sessions feed the session context
    pub recent_sessions: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            min_topic_chars: 3,
            default_exercise_count: 3,
            max_exercise_count: 10,
            min_age: 5,
            max_age: 100,
            recent_sessions: 5,
        }
    }
}

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TutorConfig {
    #[serde(rename = "subject")]
    pub subjects: Vec<SubjectConfig>,
    #[serde(rename = "level")]
    pub levels: Vec<LevelConfig>,
    pub limits: LimitsConfig,
    /// Tier priority, first entry is tried first
    #[serde(rename = "provider")]
    pub providers: Vec<ProviderSettings>,
    pub provider_timeout_secs: u64,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            subjects: vec![
                SubjectConfig {
                    id: "math".to_string(),
                    display_name: "Mathematics".to_string(),
                },
                SubjectConfig {
                    id: "physics".to_string(),
                    display_name: "Physics".to_string(),
                },
            ],
            levels: vec![
                LevelConfig {
                    id: "primary".to_string(),
                    base_difficulty: 2,
                },
                LevelConfig {
                    id: "secondary".to_string(),
                    base_difficulty: 5,
                },
                LevelConfig {
                    id: "university".to_string(),
                    base_difficulty: 7,
                },
            ],
            limits: LimitsConfig::default(),
            providers: vec![
                ProviderSettings {
                    kind: ProviderKind::Groq,
                    model_name: None,
                    enabled: true,
                },
                ProviderSettings {
                    kind: ProviderKind::Together,
                    model_name: None,
                    enabled: true,
                },
            ],
            provider_timeout_secs: 30,
        }
    }
}

/// Base difficulty used when a level is not configured.
pub const DEFAULT_BASE_DIFFICULTY: u8 = 5;

impl TutorConfig {
    pub fn subject(&self, id: &str) -> Option<&SubjectConfig> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn level(&self, id: &str) -> Option<&LevelConfig> {
        self.levels.iter().find(|l| l.id == id)
    }

    /// Human readable subject name, falling back to the raw identifier.
    pub fn subject_display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.subject(id).map_or(id, |s| s.display_name.as_str())
    }

    pub fn base_difficulty(&self, level: &str) -> u8 {
        self.level(level)
            .map_or(DEFAULT_BASE_DIFFICULTY, |l| l.base_difficulty)
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    /// Enabled providers in priority order.
    pub fn enabled_providers(&self) -> impl Iterator<Item = &ProviderSettings> {
        self.providers.iter().filter(|p| p.enabled)
    }
}

/// Credentials for one provider.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderSecret {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

/// Root of `secret.json`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretConfig {
    #[serde(default)]
    pub groq: Option<ProviderSecret>,
    #[serde(default)]
    pub together: Option<ProviderSecret>,
}

impl SecretConfig {
    pub fn for_provider(&self, kind: ProviderKind) -> Option<&ProviderSecret> {
        match kind {
            ProviderKind::Groq => self.groq.as_ref(),
            ProviderKind::Together => self.together.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_two_tiers_in_order() {
        let config = TutorConfig::default();
        let kinds: Vec<_> = config.enabled_providers().map(|p| p.kind).collect();
        assert_eq!(kinds, vec![ProviderKind::Groq, ProviderKind::Together]);
    }

    #[test]
    fn test_partial_toml_merges_over_defaults() {
        let toml_str = r#"
            provider_timeout_secs = 10

            [limits]
            max_exercise_count = 5

            [[provider]]
            kind = "together"
        "#;

        let config: TutorConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.provider_timeout(), Duration::from_secs(10));
        assert_eq!(config.limits.max_exercise_count, 5);
        assert_eq!(config.limits.min_topic_chars, 3);
        assert_eq!(config.providers.len(), 1);
        assert!(config.providers[0].enabled);
        assert_eq!(config.subjects.len(), 2);
    }

    #[test]
    fn test_base_difficulty_lookup() {
        let config = TutorConfig::default();
        assert_eq!(config.base_difficulty("primary"), 2);
        assert_eq!(config.base_difficulty("university"), 7);
        assert_eq!(config.base_difficulty("unknown"), DEFAULT_BASE_DIFFICULTY);
    }

    #[test]
    fn test_subject_display_name_falls_back_to_id() {
        let config = TutorConfig::default();
        assert_eq!(config.subject_display_name("physics"), "Physics");
        assert_eq!(config.subject_display_name("chemistry"), "chemistry");
    }

    #[test]
    fn test_secret_config_lookup() {
        let json = r#"{ "groq": { "api_key": "gsk-test" } }"#;
        let secrets: SecretConfig = serde_json::from_str(json).unwrap();

        assert_eq!(
            secrets.for_provider(ProviderKind::Groq).map(|s| s.api_key.as_str()),
            Some("gsk-test")
        );
        assert!(secrets.for_provider(ProviderKind::Together).is_none());
    }
}

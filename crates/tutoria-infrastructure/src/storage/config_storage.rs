//! Application config file storage.
//!
//! Loads `config.toml` into [`TutorConfig`]. Every section is optional; a
//! missing or empty file yields the built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};
use tutoria_core::config::TutorConfig;

use crate::paths::TutorPaths;

/// Errors that can occur during config storage operations.
#[derive(Debug)]
pub enum ConfigStorageError {
    /// File I/O error.
    IoError(std::io::Error),
    /// TOML parsing error.
    TomlParseError(toml::de::Error),
    /// The file parsed, but its content is inconsistent.
    Invalid(String),
    /// Config directory not found.
    ConfigDirNotFound,
}

impl std::fmt::Display for ConfigStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            ConfigStorageError::TomlParseError(e) => write!(f, "TOML parse error: {}", e),
            ConfigStorageError::Invalid(e) => write!(f, "Invalid configuration: {}", e),
            ConfigStorageError::ConfigDirNotFound => {
                write!(f, "Could not determine configuration directory")
            }
        }
    }
}

impl std::error::Error for ConfigStorageError {}

impl From<std::io::Error> for ConfigStorageError {
    fn from(e: std::io::Error) -> Self {
        ConfigStorageError::IoError(e)
    }
}

impl From<toml::de::Error> for ConfigStorageError {
    fn from(e: toml::de::Error) -> Self {
        ConfigStorageError::TomlParseError(e)
    }
}

/// Storage for the application configuration file (config.toml).
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Creates a config storage with the default path (~/.config/tutoria/config.toml).
    pub fn new() -> Result<Self, ConfigStorageError> {
        let path = TutorPaths::config_file().map_err(|_| ConfigStorageError::ConfigDirNotFound)?;
        Ok(Self { path })
    }

    /// Creates a config storage handle for a custom path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and checks the configuration.
    ///
    /// # Returns
    ///
    /// - `Ok(TutorConfig)`: Parsed config, or defaults if the file is missing or empty
    /// - `Err`: Failed to read, parse or check the file
    pub fn load(&self) -> Result<TutorConfig, ConfigStorageError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No config file, using defaults");
            return Ok(TutorConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(TutorConfig::default());
        }

        let config: TutorConfig = toml::from_str(&content)?;
        check(&config)?;

        tracing::debug!(
            path = %self.path.display(),
            subjects = config.subjects.len(),
            levels = config.levels.len(),
            providers = config.providers.len(),
            "Loaded config"
        );
        Ok(config)
    }
}

fn check(config: &TutorConfig) -> Result<(), ConfigStorageError> {
    if config.subjects.is_empty() {
        return Err(ConfigStorageError::Invalid(
            "at least one [[subject]] is required".to_string(),
        ));
    }
    if config.levels.is_empty() {
        return Err(ConfigStorageError::Invalid(
            "at least one [[level]] is required".to_string(),
        ));
    }
    if let Some(level) = config
        .levels
        .iter()
        .find(|l| !(1..=10).contains(&l.base_difficulty))
    {
        return Err(ConfigStorageError::Invalid(format!(
            "level '{}' has base_difficulty {} (expected 1-10)",
            level.id, level.base_difficulty
        )));
    }

    let limits = &config.limits;
    if limits.max_exercise_count == 0 {
        return Err(ConfigStorageError::Invalid(
            "limits.max_exercise_count must be at least 1".to_string(),
        ));
    }
    if !(1..=limits.max_exercise_count).contains(&limits.default_exercise_count) {
        return Err(ConfigStorageError::Invalid(format!(
            "limits.default_exercise_count must be between 1 and {}",
            limits.max_exercise_count
        )));
    }
    if limits.min_age > limits.max_age {
        return Err(ConfigStorageError::Invalid(
            "limits.min_age cannot exceed limits.max_age".to_string(),
        ));
    }
    if config.provider_timeout_secs == 0 {
        return Err(ConfigStorageError::Invalid(
            "provider_timeout_secs must be at least 1".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tutoria_core::config::ProviderKind;

    fn storage_with(content: Option<&str>) -> (TempDir, ConfigStorage) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        if let Some(content) = content {
            fs::write(&path, content).unwrap();
        }
        (temp_dir, ConfigStorage::with_path(path))
    }

    #[test]
    fn test_missing_or_empty_file_yields_defaults() {
        let (_dir, storage) = storage_with(None);
        assert_eq!(storage.load().unwrap(), TutorConfig::default());

        let (_dir, storage) = storage_with(Some("  \n"));
        assert_eq!(storage.load().unwrap(), TutorConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let (_dir, storage) = storage_with(Some(
            r#"
provider_timeout_secs = 10

[[provider]]
kind = "together"
model_name = "mistralai/Mixtral-8x7B-Instruct-v0.1"

[limits]
max_exercise_count = 5
"#,
        ));

        let config = storage.load().unwrap();
        assert_eq!(config.provider_timeout_secs, 10);
        assert_eq!(config.providers.len(), 1);
        assert_eq!(config.providers[0].kind, ProviderKind::Together);
        assert!(config.providers[0].enabled);
        assert_eq!(config.limits.max_exercise_count, 5);
        assert_eq!(config.limits.min_topic_chars, 3);
        assert_eq!(config.subjects, TutorConfig::default().subjects);
    }

    #[test]
    fn test_out_of_range_base_difficulty_is_rejected() {
        let (_dir, storage) = storage_with(Some(
            r#"
[[level]]
id = "olympiad"
base_difficulty = 12
"#,
        ));

        assert!(matches!(storage.load(), Err(ConfigStorageError::Invalid(_))));
    }

    #[test]
    fn test_invalid_toml() {
        let (_dir, storage) = storage_with(Some("provider_timeout_secs = "));
        assert!(matches!(
            storage.load(),
            Err(ConfigStorageError::TomlParseError(_))
        ));
    }
}

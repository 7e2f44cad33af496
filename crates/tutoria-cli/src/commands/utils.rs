use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tutoria_application::TutorUseCase;
use tutoria_core::config::{SecretConfig, TutorConfig};
use tutoria_core::history::SessionRecord;
use tutoria_core::profile::ProfileInput;
use tutoria_core::provider::ProviderAdapter;
use tutoria_infrastructure::{ConfigStorage, SecretStorage};
use tutoria_interaction::build_provider_chain;

/// Overrides for the config and secret file locations.
pub struct ConfigPaths {
    pub config: Option<PathBuf>,
    pub secrets: Option<PathBuf>,
}

impl ConfigPaths {
    pub fn load_config(&self) -> Result<TutorConfig> {
        let storage = match &self.config {
            Some(path) => ConfigStorage::with_path(path.clone()),
            None => ConfigStorage::new()?,
        };
        storage
            .load()
            .with_context(|| format!("Failed to load config from {}", storage.path().display()))
    }

    pub fn load_secrets(&self) -> Result<SecretConfig> {
        let storage = match &self.secrets {
            Some(path) => SecretStorage::with_path(path.clone()),
            None => SecretStorage::new()?,
        };
        storage
            .load_or_default()
            .with_context(|| format!("Failed to load secrets from {}", storage.path().display()))
    }
}

/// Builds the use case with the configured provider chain.
pub fn build_usecase(paths: &ConfigPaths) -> Result<TutorUseCase> {
    let config = paths.load_config()?;
    let secrets = paths.load_secrets()?;
    let providers = build_provider_chain(&config, &secrets);
    tracing::info!(
        providers = providers.len(),
        available = providers.iter().filter(|p| p.is_available()).count(),
        subjects = config.subjects.len(),
        "Tutor configured"
    );
    Ok(TutorUseCase::new(config, providers))
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

pub fn read_profile(path: Option<&Path>) -> Result<Option<ProfileInput>> {
    path.map(read_json::<ProfileInput>).transpose()
}

pub fn read_history(path: Option<&Path>) -> Result<Option<Vec<SessionRecord>>> {
    path.map(read_json::<Vec<SessionRecord>>).transpose()
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

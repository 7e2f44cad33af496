//! Which tier produced a piece of content.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Provenance tag. Serialized as `provider-tier-N` or `local-fallback`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Source {
    /// A provider adapter; tiers are numbered from 1 in priority order
    ProviderTier(u8),
    LocalFallback,
}

impl Source {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Source::LocalFallback)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::ProviderTier(tier) => write!(f, "provider-tier-{tier}"),
            Source::LocalFallback => f.write_str("local-fallback"),
        }
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "local-fallback" {
            return Ok(Source::LocalFallback);
        }
        s.strip_prefix("provider-tier-")
            .and_then(|tier| tier.parse::<u8>().ok())
            .filter(|tier| *tier > 0)
            .map(Source::ProviderTier)
            .ok_or_else(|| format!("Unknown content source: {s}"))
    }
}

impl From<Source> for String {
    fn from(source: Source) -> Self {
        source.to_string()
    }
}

impl TryFrom<String> for Source {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Provider identity of the local fallback generator.
pub const FALLBACK_PROVIDER_ID: &str = "local";
/// Model name reported for fallback content.
pub const FALLBACK_MODEL: &str = "fallback";

/// Full provenance: tier plus the adapter identity and model behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub source: Source,
    pub provider: String,
    pub model: String,
}

impl Provenance {
    pub fn provider(tier: u8, provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            source: Source::ProviderTier(tier),
            provider: provider.into(),
            model: model.into(),
        }
    }

    pub fn fallback() -> Self {
        Self {
            source: Source::LocalFallback,
            provider: FALLBACK_PROVIDER_ID.to_string(),
            model: FALLBACK_MODEL.to_string(),
        }
    }

    pub fn is_ai_generated(&self) -> bool {
        !self.source.is_fallback()
    }
}

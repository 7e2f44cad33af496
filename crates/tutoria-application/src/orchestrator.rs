//! Generation orchestrator.
//!
//! Tries the configured provider adapters strictly in priority order, one
//! attempt per tier, and falls back to [`FallbackGenerator`] when every tier
//! is unavailable or failed. Nothing in here returns an error: the worst case
//! is local-fallback content.
//!
//! The per-kind work lives behind [`TierTask`] so explanations and exercise
//! batches share the same try/fallback loop.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tutoria_core::fallback::FallbackGenerator;
use tutoria_core::generation::{
    DifficultyLabel, ExerciseSlot, GeneratedExercise, GenerationParameters, Provenance,
};
use tutoria_core::provider::{ProviderAdapter, ProviderError};

/// Kind of content requested from the tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Explanation,
    Exercises,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Explanation => "explanation",
            ContentKind::Exercises => "exercises",
        }
    }
}

/// A tier that was attempted and failed.
#[derive(Debug, Clone, PartialEq)]
pub struct TierFailure {
    pub tier: u8,
    pub provider: String,
    pub reason: ProviderError,
}

/// Content plus where it came from.
#[derive(Debug, Clone)]
pub struct GenerationOutcome<T> {
    pub content: T,
    pub provenance: Provenance,
    /// Failed tiers in the order they were tried (unavailable tiers are not failures)
    pub failures: Vec<TierFailure>,
}

/// Work the orchestrator runs against one tier at a time.
#[async_trait]
pub trait TierTask: Send + Sync {
    type Output: Send;

    fn kind(&self) -> ContentKind;

    /// Produces the full output from one provider, or fails the tier.
    ///
    /// `call_timeout` bounds each individual provider call.
    async fn run(
        &self,
        provider: &dyn ProviderAdapter,
        call_timeout: Duration,
    ) -> Result<Self::Output, ProviderError>;

    /// Produces the output without any provider. Never fails.
    fn fallback(&self, generator: &FallbackGenerator) -> Self::Output;
}

/// Bounds a provider call; running out of time is a tier failure.
pub async fn bounded<T, F>(call_timeout: Duration, call: F) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    tokio::time::timeout(call_timeout, call)
        .await
        .map_err(|_| ProviderError::Timeout(call_timeout))?
}

/// One free-text explanation.
pub struct ExplanationTask<'a> {
    pub params: &'a GenerationParameters,
    /// Human readable subject, used by the fallback text
    pub subject_name: &'a str,
}

#[async_trait]
impl<'a> TierTask for ExplanationTask<'a> {
    type Output = String;

    fn kind(&self) -> ContentKind {
        ContentKind::Explanation
    }

    async fn run(
        &self,
        provider: &dyn ProviderAdapter,
        call_timeout: Duration,
    ) -> Result<String, ProviderError> {
        let text = bounded(call_timeout, provider.generate_explanation(self.params)).await?;
        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(text)
    }

    fn fallback(&self, generator: &FallbackGenerator) -> String {
        generator.explanation(self.params, self.subject_name)
    }
}

/// A batch of exercises, all-or-nothing per tier.
pub struct ExercisesTask<'a> {
    pub params: &'a GenerationParameters,
    pub slots: &'a [ExerciseSlot],
    /// Grades the fallback hints
    pub label: DifficultyLabel,
}

#[async_trait]
impl<'a> TierTask for ExercisesTask<'a> {
    type Output = Vec<GeneratedExercise>;

    fn kind(&self) -> ContentKind {
        ContentKind::Exercises
    }

    async fn run(
        &self,
        provider: &dyn ProviderAdapter,
        call_timeout: Duration,
    ) -> Result<Vec<GeneratedExercise>, ProviderError> {
        // Sequential keeps the batch in slot order; the first failure drops
        // everything generated so far for this tier.
        let mut exercises = Vec::with_capacity(self.slots.len());
        for slot in self.slots {
            let exercise =
                bounded(call_timeout, provider.generate_exercise(self.params, *slot)).await?;
            exercises.push(exercise);
        }
        Ok(exercises)
    }

    fn fallback(&self, generator: &FallbackGenerator) -> Vec<GeneratedExercise> {
        self.slots
            .iter()
            .map(|slot| generator.exercise(self.params, *slot, self.label))
            .collect()
    }
}

/// Tiered provider orchestrator.
///
/// Provider order and the call timeout are fixed at construction; the
/// orchestrator holds no mutable state and can be shared across requests.
pub struct GenerationOrchestrator {
    providers: Vec<Arc<dyn ProviderAdapter>>,
    fallback: FallbackGenerator,
    call_timeout: Duration,
}

impl GenerationOrchestrator {
    /// Creates an orchestrator over `providers`, highest priority first.
    pub fn new(providers: Vec<Arc<dyn ProviderAdapter>>, call_timeout: Duration) -> Self {
        Self {
            providers,
            fallback: FallbackGenerator::new(),
            call_timeout,
        }
    }

    pub fn providers(&self) -> &[Arc<dyn ProviderAdapter>] {
        &self.providers
    }

    pub fn call_timeout(&self) -> Duration {
        self.call_timeout
    }

    /// Runs `task` against each available tier until one succeeds.
    pub async fn generate<T: TierTask>(&self, task: &T) -> GenerationOutcome<T::Output> {
        let kind = task.kind().as_str();
        let mut failures = Vec::new();

        for (index, provider) in self.providers.iter().enumerate() {
            let tier = u8::try_from(index + 1).unwrap_or(u8::MAX);

            if !provider.is_available() {
                tracing::debug!(provider = provider.id(), tier, kind, "Provider unavailable, skipping");
                continue;
            }

            match task.run(provider.as_ref(), self.call_timeout).await {
                Ok(content) => {
                    tracing::info!(
                        provider = provider.id(),
                        model = provider.model(),
                        tier,
                        kind,
                        "Content generated"
                    );
                    return GenerationOutcome {
                        content,
                        provenance: Provenance::provider(tier, provider.id(), provider.model()),
                        failures,
                    };
                }
                Err(reason) => {
                    tracing::warn!(
                        provider = provider.id(),
                        tier,
                        kind,
                        error = %reason,
                        "Provider tier failed"
                    );
                    failures.push(TierFailure {
                        tier,
                        provider: provider.id().to_string(),
                        reason,
                    });
                }
            }
        }

        tracing::info!(
            kind,
            failed_tiers = failures.len(),
            "No provider succeeded, using local fallback"
        );
        GenerationOutcome {
            content: task.fallback(&self.fallback),
            provenance: Provenance::fallback(),
            failures,
        }
    }

    pub async fn generate_explanation(
        &self,
        params: &GenerationParameters,
        subject_name: &str,
    ) -> GenerationOutcome<String> {
        self.generate(&ExplanationTask {
            params,
            subject_name,
        })
        .await
    }

    pub async fn generate_exercises(
        &self,
        params: &GenerationParameters,
        slots: &[ExerciseSlot],
        label: DifficultyLabel,
    ) -> GenerationOutcome<Vec<GeneratedExercise>> {
        self.generate(&ExercisesTask {
            params,
            slots,
            label,
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutoria_core::generation::Source;

    #[tokio::test]
    async fn test_bounded_maps_elapsed_to_timeout() {
        let limit = Duration::from_millis(5);
        let result: Result<(), ProviderError> = bounded(limit, async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(())
        })
        .await;
        assert_eq!(result.unwrap_err(), ProviderError::Timeout(limit));
    }

    #[tokio::test]
    async fn test_no_providers_falls_back() {
        let orchestrator = GenerationOrchestrator::new(Vec::new(), Duration::from_secs(1));
        let params = GenerationParameters::new("fractions", "math", "primary");

        let outcome = orchestrator.generate_explanation(&params, "Mathematics").await;
        assert_eq!(outcome.provenance.source, Source::LocalFallback);
        assert!(outcome.failures.is_empty());
        assert!(outcome.content.contains("fractions"));
    }

    #[tokio::test]
    async fn test_fallback_batch_matches_slots() {
        let orchestrator = GenerationOrchestrator::new(Vec::new(), Duration::from_secs(1));
        let params = GenerationParameters::new("fractions", "math", "primary");
        let slots: Vec<_> = (0..4)
            .map(|index| ExerciseSlot {
                index,
                difficulty: 2,
            })
            .collect();

        let outcome = orchestrator
            .generate_exercises(&params, &slots, DifficultyLabel::Medium)
            .await;
        assert_eq!(outcome.content.len(), 4);
        assert!(outcome.content[3].question.starts_with("Exercise 4"));
    }
}

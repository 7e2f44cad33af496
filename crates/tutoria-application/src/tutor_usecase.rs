//! Tutor use case implementation.
//!
//! `TutorUseCase` is the single entry point used by outer surfaces. It
//! validates requests, builds the per-request profile and session context,
//! runs the engines and wraps the results with a personalization summary.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tutoria_core::answer::{AnswerCheck, check_answer};
use tutoria_core::config::TutorConfig;
use tutoria_core::error::Result;
use tutoria_core::generation::{Exercise, Explanation};
use tutoria_core::history::{SessionContext, SessionRecord};
use tutoria_core::profile::{ProfileInput, StudentProfile};
use tutoria_core::provider::ProviderAdapter;
use tutoria_core::request::{CheckAnswerRequest, ExercisesRequest, ExplainRequest};

use crate::exercise_generator::AdaptiveExerciseGenerator;
use crate::explanation_engine::AdaptiveExplanationEngine;
use crate::orchestrator::GenerationOrchestrator;

/// How much of the request was used to personalize the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Personalization {
    /// Profile data was supplied
    pub applied: bool,
    /// Number of history sessions supplied
    pub context_used: usize,
    /// Difficulty of the first exercise, for quick display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainResponse {
    pub explanation: Explanation,
    pub personalization: Personalization,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExercisesResponse {
    pub exercises: Vec<Exercise>,
    pub personalization: Personalization,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAnswerResponse {
    pub exercise_id: u32,
    #[serde(flatten)]
    pub check: AnswerCheck,
}

/// One configured provider tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderStatus {
    pub tier: u8,
    pub provider: String,
    pub model: String,
    pub available: bool,
}

/// Use case for generating personalized tutoring content.
///
/// Configuration and the provider chain are fixed at construction; a single
/// instance serves any number of concurrent requests.
pub struct TutorUseCase {
    config: Arc<TutorConfig>,
    orchestrator: Arc<GenerationOrchestrator>,
    explanation_engine: AdaptiveExplanationEngine,
    exercise_generator: AdaptiveExerciseGenerator,
}

impl TutorUseCase {
    /// Creates a new `TutorUseCase`.
    ///
    /// # Arguments
    ///
    /// * `config` - Subjects, levels, limits and the provider call timeout
    /// * `providers` - Provider adapters, highest priority first
    pub fn new(config: TutorConfig, providers: Vec<Arc<dyn ProviderAdapter>>) -> Self {
        let config = Arc::new(config);
        let orchestrator = Arc::new(GenerationOrchestrator::new(
            providers,
            config.provider_timeout(),
        ));

        Self {
            explanation_engine: AdaptiveExplanationEngine::new(
                orchestrator.clone(),
                config.clone(),
            ),
            exercise_generator: AdaptiveExerciseGenerator::new(
                orchestrator.clone(),
                config.clone(),
            ),
            orchestrator,
            config,
        }
    }

    pub fn config(&self) -> &TutorConfig {
        &self.config
    }

    /// Validates the request and builds a personalized explanation.
    pub async fn explain(&self, request: ExplainRequest) -> Result<ExplainResponse> {
        request.validate(&self.config)?;

        let personalization = personalization(&request.profile_data, &request.recent_sessions);
        let profile = build_profile(request.profile_data);
        let context = self.build_context(request.recent_sessions);

        tracing::info!(
            subject = %request.subject,
            level = %request.level,
            topic = %request.topic,
            "Generating explanation"
        );

        let explanation = self
            .explanation_engine
            .explain(
                &request.subject,
                &request.level,
                request.topic.trim(),
                &profile,
                &context,
            )
            .await;

        Ok(ExplainResponse {
            explanation,
            personalization,
        })
    }

    /// Validates the request and builds an exercise batch.
    pub async fn exercises(&self, request: ExercisesRequest) -> Result<ExercisesResponse> {
        request.validate(&self.config)?;

        let count = request.effective_count(&self.config);
        let mut personalization =
            personalization(&request.profile_data, &request.recent_sessions);
        let profile = build_profile(request.profile_data);
        let context = self.build_context(request.recent_sessions);

        tracing::info!(
            subject = %request.subject,
            level = %request.level,
            topic = %request.topic,
            count,
            "Generating exercises"
        );

        let exercises = self
            .exercise_generator
            .generate(
                &request.subject,
                &request.level,
                request.topic.trim(),
                count,
                &profile,
                &context,
            )
            .await?;

        personalization.difficulty = exercises.first().map(|e| e.difficulty);
        Ok(ExercisesResponse {
            exercises,
            personalization,
        })
    }

    pub fn check_answer(&self, request: CheckAnswerRequest) -> Result<CheckAnswerResponse> {
        request.validate()?;
        Ok(CheckAnswerResponse {
            exercise_id: request.exercise_id,
            check: check_answer(&request.user_answer, &request.correct_answer),
        })
    }

    /// Identity, model and availability of every configured tier.
    pub fn provider_status(&self) -> Vec<ProviderStatus> {
        self.orchestrator
            .providers()
            .iter()
            .enumerate()
            .map(|(index, provider)| ProviderStatus {
                tier: u8::try_from(index + 1).unwrap_or(u8::MAX),
                provider: provider.id().to_string(),
                model: provider.model().to_string(),
                available: provider.is_available(),
            })
            .collect()
    }

    /// Session context over the `limits.recent_sessions` most recent records.
    fn build_context(&self, sessions: Option<Vec<SessionRecord>>) -> SessionContext {
        let all = SessionContext::new(sessions.unwrap_or_default());
        let recent = all
            .recent(self.config.limits.recent_sessions)
            .into_iter()
            .cloned()
            .collect();
        SessionContext::new(recent)
    }
}

fn build_profile(input: Option<ProfileInput>) -> StudentProfile {
    input.map(StudentProfile::from_input).unwrap_or_default()
}

fn personalization(
    profile: &Option<ProfileInput>,
    sessions: &Option<Vec<SessionRecord>>,
) -> Personalization {
    Personalization {
        applied: profile.is_some(),
        context_used: sessions.as_ref().map_or(0, Vec::len),
        difficulty: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutoria_core::TutorError;

    fn usecase() -> TutorUseCase {
        TutorUseCase::new(TutorConfig::default(), Vec::new())
    }

    #[test]
    fn test_check_answer() {
        let response = usecase()
            .check_answer(CheckAnswerRequest {
                exercise_id: 3,
                user_answer: "d".to_string(),
                correct_answer: "D".to_string(),
            })
            .unwrap();
        assert_eq!(response.exercise_id, 3);
        assert!(response.check.is_correct);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["exerciseId"], 3);
        assert_eq!(json["isCorrect"], true);
    }

    #[tokio::test]
    async fn test_invalid_request_is_rejected_before_generation() {
        let request: ExplainRequest = serde_json::from_value(serde_json::json!({
            "subject": "history",
            "level": "secondary",
            "topic": "rome"
        }))
        .unwrap();

        let err = usecase().explain(request).await.unwrap_err();
        assert!(matches!(err, TutorError::Validation { .. }));
    }

    #[test]
    fn test_provider_status_is_empty_without_providers() {
        assert!(usecase().provider_status().is_empty());
    }
}

//! Adaptive exercise generator.

use std::sync::Arc;
use tutoria_core::config::TutorConfig;
use tutoria_core::error::{Result, TutorError};
use tutoria_core::generation::{
    Exercise, ExerciseFocus, ExerciseMetadata, GenerationParameters,
};
use tutoria_core::history::SessionContext;
use tutoria_core::profile::StudentProfile;

use crate::difficulty::{difficulty_label, exercise_slots};
use crate::orchestrator::GenerationOrchestrator;

/// Produces exercise batches following the difficulty curve.
pub struct AdaptiveExerciseGenerator {
    orchestrator: Arc<GenerationOrchestrator>,
    config: Arc<TutorConfig>,
}

impl AdaptiveExerciseGenerator {
    pub fn new(orchestrator: Arc<GenerationOrchestrator>, config: Arc<TutorConfig>) -> Self {
        Self {
            orchestrator,
            config,
        }
    }

    /// Generates exactly `count` exercises.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Exercise>)`: `count` items, difficulty non-decreasing by id
    /// - `Err(TutorError::Contract)`: `count` is zero or above the configured maximum
    pub async fn generate(
        &self,
        subject: &str,
        level: &str,
        topic: &str,
        count: usize,
        profile: &StudentProfile,
        context: &SessionContext,
    ) -> Result<Vec<Exercise>> {
        let max = self.config.limits.max_exercise_count;
        if count == 0 || count > max {
            return Err(TutorError::contract(format!(
                "exercise count must be between 1 and {max}, got {count}"
            )));
        }

        let label = difficulty_label(profile, context, topic);
        let focus = if profile.has_difficulty(topic) {
            ExerciseFocus::Reinforcement
        } else {
            ExerciseFocus::Practice
        };
        let adapted_for = profile
            .age
            .map_or_else(|| level.to_string(), |age| format!("{age} years"));

        let params = GenerationParameters {
            depth: profile.depth(),
            language: profile.language_style(context.has_weaknesses()),
            age: profile.age,
            interests: profile.interests.clone(),
            preferences: profile.preferences,
            ..GenerationParameters::new(topic, subject, level)
        };
        let slots = exercise_slots(self.config.base_difficulty(level), count);

        let outcome = self
            .orchestrator
            .generate_exercises(&params, &slots, label)
            .await;
        if outcome.content.len() != slots.len() {
            return Err(TutorError::internal(format!(
                "expected {} exercises, got {}",
                slots.len(),
                outcome.content.len()
            )));
        }

        let source = outcome.provenance.source;
        tracing::debug!(
            topic,
            count,
            label = label.as_str(),
            source = %source,
            "Exercise batch built"
        );

        Ok(outcome
            .content
            .into_iter()
            .zip(slots)
            .map(|(generated, slot)| Exercise {
                id: u32::try_from(slot.index + 1).unwrap_or(u32::MAX),
                question: generated.question,
                correct_answer: generated.correct.as_str().to_string(),
                options: Some(generated.options.into()),
                explanation: generated.explanation,
                difficulty: slot.difficulty,
                metadata: ExerciseMetadata {
                    adapted_for: adapted_for.clone(),
                    focus,
                    difficulty_label: label,
                    source,
                },
            })
            .collect())
    }
}

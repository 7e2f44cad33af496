//! Adaptive explanation engine.

use chrono::Utc;
use std::sync::Arc;
use tutoria_core::config::TutorConfig;
use tutoria_core::generation::{
    AdaptedFor, Explanation, ExplanationContext, ExplanationMetadata, GenerationParameters,
};
use tutoria_core::history::SessionContext;
use tutoria_core::profile::StudentProfile;

use crate::explanation_parser::parse_explanation;
use crate::orchestrator::GenerationOrchestrator;

/// Builds personalized, step-structured explanations.
///
/// Never fails for validated input: provider failures are absorbed by the
/// orchestrator and show up only in `metadata.source`.
pub struct AdaptiveExplanationEngine {
    orchestrator: Arc<GenerationOrchestrator>,
    config: Arc<TutorConfig>,
}

impl AdaptiveExplanationEngine {
    pub fn new(orchestrator: Arc<GenerationOrchestrator>, config: Arc<TutorConfig>) -> Self {
        Self {
            orchestrator,
            config,
        }
    }

    pub async fn explain(
        &self,
        subject: &str,
        level: &str,
        topic: &str,
        profile: &StudentProfile,
        context: &SessionContext,
    ) -> Explanation {
        let is_review = profile.has_knowledge(topic);
        let is_difficult = profile.has_difficulty(topic);
        let related_topics = context.find_related_topics(topic);
        let depth = profile.depth();

        let params = GenerationParameters {
            depth,
            language: profile.language_style(context.has_weaknesses()),
            age: profile.age,
            interests: profile.interests.clone(),
            preferences: profile.preferences,
            ..GenerationParameters::new(topic, subject, level)
        };

        let subject_name = self.config.subject_display_name(subject);
        let outcome = self
            .orchestrator
            .generate_explanation(&params, subject_name)
            .await;
        let parsed = parse_explanation(&outcome.content, topic);

        let summary = if outcome.provenance.source.is_fallback() {
            let lead_in = lead_in(
                topic,
                subject_name,
                is_review,
                is_difficult,
                related_topics.first().map(String::as_str),
                profile.preferences.real_world_context,
            );
            format!("{lead_in} {}", parsed.summary)
        } else {
            parsed.summary
        };

        tracing::debug!(
            topic,
            depth = depth.as_str(),
            is_review,
            is_difficult,
            steps = parsed.steps.len(),
            source = %outcome.provenance.source,
            "Explanation built"
        );

        Explanation {
            subject: subject.to_string(),
            level: level.to_string(),
            topic: topic.to_string(),
            summary,
            steps: parsed.steps,
            metadata: ExplanationMetadata {
                source: outcome.provenance.source,
                ai_generated: outcome.provenance.is_ai_generated(),
                provider: outcome.provenance.provider,
                model: outcome.provenance.model,
                depth,
                adapted_for: AdaptedFor {
                    age: profile.age,
                    is_young_student: profile.is_young_student(),
                    preferences: profile.preferences,
                },
                context: ExplanationContext {
                    is_review,
                    is_difficult,
                    related_topics,
                    weaknesses: context.weaknesses().to_vec(),
                },
            },
            timestamp: Utc::now(),
        }
    }
}

/// Personalized opening for locally generated summaries.
fn lead_in(
    topic: &str,
    subject_name: &str,
    is_review: bool,
    is_difficult: bool,
    related: Option<&str>,
    real_world: bool,
) -> String {
    let mut text = if is_review {
        format!("You have worked with {topic} before. Let's go deeper and reinforce these concepts.")
    } else if is_difficult {
        format!(
            "I know {topic} can feel tricky at first, but we will break it down step by step."
        )
    } else {
        format!("Today we are going to learn about {topic} in {subject_name}.")
    };

    if let Some(related) = related.filter(|_| !is_review) {
        text.push_str(&format!(
            " This connects with what you already know about {related}."
        ));
    }
    if real_world {
        text.push_str(" You will see how it applies in real situations.");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_in_variants() {
        let review = lead_in("limits", "Mathematics", true, true, Some("limits at infinity"), false);
        assert!(review.starts_with("You have worked with limits before."));
        assert!(!review.contains("connects"));

        let difficult = lead_in("limits", "Mathematics", false, true, None, false);
        assert!(difficult.starts_with("I know limits can feel tricky"));

        let first_time = lead_in("limits", "Mathematics", false, false, Some("sequences"), true);
        assert_eq!(
            first_time,
            "Today we are going to learn about limits in Mathematics. \
             This connects with what you already know about sequences. \
             You will see how it applies in real situations."
        );
    }
}

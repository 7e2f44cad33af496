//! Deterministic, provider-free content.
//!
//! Used when no provider tier is available or every tier failed. The
//! explanation follows a fixed curriculum (introduction, key concepts,
//! examples, analogy, applications, practice) with each section headed by a
//! line ending in `:` so the explanation parser recovers one step per
//! section. All text states that it was produced without a language model.

use crate::generation::{
    AnswerOption, Depth, DifficultyLabel, ExerciseSlot, GeneratedExercise, GenerationParameters,
};

/// Sentence that marks fallback content as not model-generated.
pub const OFFLINE_NOTICE: &str = "This content was generated offline without a language model. \
Configure a provider API key for AI-generated explanations.";

/// Provider-free generator. Every operation is infallible.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackGenerator;

impl FallbackGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Explanation text as a blank-line separated paragraph document.
    pub fn explanation(&self, params: &GenerationParameters, subject_name: &str) -> String {
        let topic = params.topic.as_str();
        let young = params.is_young_student();
        let prefs = &params.preferences;
        let mut sections: Vec<String> = Vec::new();

        sections.push(if young {
            format!("Hi! Today we are going to learn about {topic}.")
        } else {
            format!(
                "An overview of {topic} in {subject_name} at {} level.",
                params.level
            )
        });

        let mut intro = format!(
            "Introduction:\n{topic} is a fundamental concept in {subject_name}. "
        );
        intro.push_str(if young {
            "We will learn it in an easy and fun way."
        } else {
            "We will start from the fundamentals and build up gradually."
        });
        if let Some(interest) = params.interests.first() {
            intro.push_str(&format!(
                " Along the way, think about where it shows up in {interest}."
            ));
        }
        sections.push(intro);

        let concepts: &[&str] = match params.depth {
            Depth::Simple => &["A simple, clear definition", "The main ideas", "How it works"],
            Depth::Standard => &[
                "Definition",
                "Main properties",
                "Relationships with other concepts",
            ],
            Depth::Detailed => &[
                "Formal, precise definition",
                "Fundamental properties",
                "Theorems and proofs",
                "Conditions and restrictions",
            ],
        };
        sections.push(format!(
            "Key concepts:\nThe key concepts of {topic} include:\n{}",
            bullet_list(concepts)
        ));

        if prefs.examples {
            let kind = if young { "simple" } else { "practical" };
            sections.push(format!(
                "Examples:\nHere are some {kind} ways to apply {topic}:\n{}",
                bullet_list(&[
                    "An everyday situation where it appears",
                    "A problem solved step by step",
                    "A real application case",
                ])
            ));
        }

        if prefs.analogies {
            sections.push(format!(
                "Analogy:\nTo understand {topic} more intuitively, compare it with something familiar \
                 from daily life and notice which parts behave the same way."
            ));
        }

        if prefs.real_world_context {
            sections.push(format!(
                "Applications:\n{topic} has practical applications in:\n{}",
                bullet_list(&[
                    "Engineering and technology",
                    "Natural sciences",
                    "Everyday life",
                    "Industry and economics",
                ])
            ));
        }

        let encouragement = if params.language.encouraging {
            "Don't worry if it feels hard at first! Practice is the key to improving."
        } else {
            "Great! Now it is time to put what you learned into practice."
        };
        sections.push(format!(
            "Practice:\n{encouragement} Solve a few exercises about {topic} to consolidate \
             your understanding and gain confidence."
        ));

        sections.push(format!("About this content:\n{OFFLINE_NOTICE}"));

        sections.join("\n\n")
    }

    /// Template multiple-choice exercise for one batch slot.
    pub fn exercise(
        &self,
        params: &GenerationParameters,
        slot: ExerciseSlot,
        label: DifficultyLabel,
    ) -> GeneratedExercise {
        let topic = params.topic.as_str();
        let number = slot.index + 1;
        let level_name = match label {
            DifficultyLabel::Easy => "basic",
            DifficultyLabel::Medium => "standard",
            DifficultyLabel::Hard => "advanced",
        };

        let mut question = format!("Exercise {number} ({level_name} level): ");
        if params.preferences.real_world_context {
            question.push_str("In a real situation, ");
        }
        question.push_str(&format!(
            "which of these is part of understanding {topic}?"
        ));
        if params.is_young_student() {
            question.push_str(" Take your time and think step by step.");
        }

        let mut hint = match label {
            DifficultyLabel::Easy => format!("Recall the basic concepts of {topic}."),
            DifficultyLabel::Medium => format!("Apply the main rule of {topic}."),
            DifficultyLabel::Hard => "Combine the advanced concepts you learned.".to_string(),
        };
        if params.preferences.step_by_step {
            hint.push_str(" Work step by step and check each calculation.");
        }

        GeneratedExercise {
            question,
            options: [
                "Its definition".to_string(),
                "Its main properties".to_string(),
                "Its practical applications".to_string(),
                "All of the above".to_string(),
            ],
            correct: AnswerOption::D,
            explanation: format!(
                "All of the above are part of {topic}. Hint: {hint} ({OFFLINE_NOTICE})"
            ),
        }
    }
}

fn bullet_list(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::LearningPreferences;

    fn params(age: Option<u8>) -> GenerationParameters {
        let mut params = GenerationParameters::new("fractions", "math", "primary");
        params.age = age;
        params
    }

    #[test]
    fn test_explanation_is_deterministic() {
        let generator = FallbackGenerator::new();
        let p = params(Some(12));
        assert_eq!(
            generator.explanation(&p, "Mathematics"),
            generator.explanation(&p, "Mathematics")
        );
    }

    #[test]
    fn test_explanation_signals_offline_origin() {
        let text = FallbackGenerator::new().explanation(&params(None), "Mathematics");
        assert!(text.contains(OFFLINE_NOTICE));
        assert!(text.contains("fractions"));
    }

    #[test]
    fn test_explanation_sections_follow_preferences() {
        let mut p = params(Some(30));
        p.preferences = LearningPreferences {
            examples: false,
            analogies: false,
            real_world_context: false,
            ..Default::default()
        };

        let text = FallbackGenerator::new().explanation(&p, "Mathematics");
        // summary, introduction, key concepts, practice, notice
        assert_eq!(text.split("\n\n").count(), 5);
        assert!(!text.contains("Analogy:"));

        p.preferences = LearningPreferences::default();
        let text = FallbackGenerator::new().explanation(&p, "Mathematics");
        assert_eq!(text.split("\n\n").count(), 8);
    }

    #[test]
    fn test_explanation_greets_young_students() {
        let text = FallbackGenerator::new().explanation(&params(Some(9)), "Mathematics");
        assert!(text.starts_with("Hi! Today we are going to learn about fractions."));
    }

    #[test]
    fn test_exercise_shape() {
        let slot = ExerciseSlot {
            index: 1,
            difficulty: 4,
        };
        let exercise =
            FallbackGenerator::new().exercise(&params(None), slot, DifficultyLabel::Easy);

        assert!(exercise.question.starts_with("Exercise 2 (basic level)"));
        assert_eq!(exercise.correct, AnswerOption::D);
        assert_eq!(exercise.options.len(), 4);
        assert!(exercise.explanation.contains("Recall the basic concepts"));
        assert!(exercise.explanation.contains("step by step"));
    }
}

//! Parameters derived from a profile and history for one generation call.

use serde::{Deserialize, Serialize};

use crate::profile::{LearningPreferences, YOUNG_STUDENT_AGE};

/// Age assumed in prompts when the student did not give one.
pub const DEFAULT_PROMPT_AGE: u8 = 16;
/// Upper bound of the numeric exercise difficulty scale.
pub const MAX_DIFFICULTY: u8 = 10;

/// Qualitative explanation detail level.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Depth {
    Simple,
    Standard,
    Detailed,
}

impl Depth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Depth::Simple => "simple",
            Depth::Standard => "standard",
            Depth::Detailed => "detailed",
        }
    }
}

/// Register of the generated text.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LanguageStyle {
    pub simplified: bool,
    pub formal: bool,
    pub encouraging: bool,
}

/// Overall difficulty of an exercise batch.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLabel {
    Easy,
    Medium,
    Hard,
}

impl DifficultyLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLabel::Easy => "easy",
            DifficultyLabel::Medium => "medium",
            DifficultyLabel::Hard => "hard",
        }
    }
}

/// Why an exercise batch was generated.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseFocus {
    /// The topic is a known difficulty
    Reinforcement,
    Practice,
}

/// Textual band of a 1-10 difficulty, used in prompts.
pub fn difficulty_band(difficulty: u8) -> &'static str {
    match difficulty {
        0..=3 => "basic, conceptual",
        4..=6 => "intermediate, applied",
        _ => "advanced, analytical",
    }
}

/// Everything a provider needs to produce content for one request.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct GenerationParameters {
    pub topic: String,
    pub subject: String,
    pub level: String,
    pub depth: Depth,
    pub language: LanguageStyle,
    pub age: Option<u8>,
    pub interests: Vec<String>,
    pub preferences: LearningPreferences,
}

impl GenerationParameters {
    pub fn new(
        topic: impl Into<String>,
        subject: impl Into<String>,
        level: impl Into<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            subject: subject.into(),
            level: level.into(),
            depth: Depth::Standard,
            language: LanguageStyle::default(),
            age: None,
            interests: Vec::new(),
            preferences: LearningPreferences::default(),
        }
    }

    pub fn prompt_age(&self) -> u8 {
        self.age.unwrap_or(DEFAULT_PROMPT_AGE)
    }

    pub fn is_young_student(&self) -> bool {
        self.age.is_some_and(|age| age < YOUNG_STUDENT_AGE)
    }
}

/// A single item of an exercise batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseSlot {
    /// Zero-based position in the batch
    pub index: usize,
    /// 1-10
    pub difficulty: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_band_boundaries() {
        assert_eq!(difficulty_band(1), "basic, conceptual");
        assert_eq!(difficulty_band(3), "basic, conceptual");
        assert_eq!(difficulty_band(4), "intermediate, applied");
        assert_eq!(difficulty_band(6), "intermediate, applied");
        assert_eq!(difficulty_band(7), "advanced, analytical");
        assert_eq!(difficulty_band(MAX_DIFFICULTY), "advanced, analytical");
    }

    #[test]
    fn test_prompt_age_defaults() {
        let mut params = GenerationParameters::new("fractions", "math", "primary");
        assert_eq!(params.prompt_age(), DEFAULT_PROMPT_AGE);
        params.age = Some(9);
        assert_eq!(params.prompt_age(), 9);
    }

    #[test]
    fn test_enums_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Depth::Detailed).unwrap(), "\"detailed\"");
        assert_eq!(
            serde_json::to_string(&DifficultyLabel::Easy).unwrap(),
            "\"easy\""
        );
        assert_eq!(
            serde_json::to_string(&ExerciseFocus::Reinforcement).unwrap(),
            "\"reinforcement\""
        );
    }
}

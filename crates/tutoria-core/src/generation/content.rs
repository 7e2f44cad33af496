//! Structured content returned to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::params::{Depth, DifficultyLabel, ExerciseFocus};
use super::provenance::Source;
use crate::profile::LearningPreferences;

/// One step of an explanation.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ExplanationStep {
    /// 1-based position
    pub id: u32,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

/// Who the explanation was adapted for.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdaptedFor {
    pub age: Option<u8>,
    pub is_young_student: bool,
    pub preferences: LearningPreferences,
}

/// Context signals that shaped the explanation.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationContext {
    pub is_review: bool,
    pub is_difficult: bool,
    pub related_topics: Vec<String>,
    pub weaknesses: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationMetadata {
    pub source: Source,
    pub provider: String,
    pub model: String,
    /// False when the content came from the local fallback generator
    pub ai_generated: bool,
    pub depth: Depth,
    pub adapted_for: AdaptedFor,
    pub context: ExplanationContext,
}

/// A personalized explanation. `steps` is never empty.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Explanation {
    pub subject: String,
    pub level: String,
    pub topic: String,
    pub summary: String,
    pub steps: Vec<ExplanationStep>,
    pub metadata: ExplanationMetadata,
    pub timestamp: DateTime<Utc>,
}

/// Answer slot of a four-option multiple choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerOption {
    A,
    B,
    C,
    D,
}

impl AnswerOption {
    pub const ALL: [AnswerOption; 4] = [AnswerOption::A, AnswerOption::B, AnswerOption::C, AnswerOption::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerOption::A => "A",
            AnswerOption::B => "B",
            AnswerOption::C => "C",
            AnswerOption::D => "D",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            AnswerOption::A => 0,
            AnswerOption::B => 1,
            AnswerOption::C => 2,
            AnswerOption::D => 3,
        }
    }
}

impl fmt::Display for AnswerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnswerOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        AnswerOption::ALL
            .into_iter()
            .find(|option| option.as_str() == normalized)
            .ok_or_else(|| format!("answer must be one of A, B, C or D (got {s:?})"))
    }
}

/// A structurally valid exercise as produced by one tier.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GeneratedExercise {
    pub question: String,
    pub options: [String; 4],
    pub correct: AnswerOption,
    /// Rationale for providers, hint for the fallback templates
    pub explanation: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseMetadata {
    /// Student age ("14 years") when known, otherwise the level
    pub adapted_for: String,
    pub focus: ExerciseFocus,
    pub difficulty_label: DifficultyLabel,
    pub source: Source,
}

/// One exercise of a batch.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// 1-based position in the batch
    pub id: u32,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
    pub explanation: String,
    /// 1-10, non-decreasing across a batch
    pub difficulty: u8,
    pub metadata: ExerciseMetadata,
}

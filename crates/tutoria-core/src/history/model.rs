//! Historical session records as supplied by the history collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TutorError;

/// Score of a finished session.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct SessionScore {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
    /// 0-100
    pub percentage: f64,
}

impl SessionScore {
    pub fn from_percentage(percentage: f64) -> Self {
        Self {
            correct: None,
            total: None,
            percentage,
        }
    }
}

/// One past session: what was studied, how it went, and when.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub topic: String,
    /// Sessions saved without finishing the exercises have no score
    #[serde(default)]
    pub score: Option<SessionScore>,
    pub timestamp: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(topic: impl Into<String>, percentage: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            topic: topic.into(),
            score: Some(SessionScore::from_percentage(percentage)),
            timestamp,
        }
    }

    pub fn percentage(&self) -> Option<f64> {
        self.score.map(|s| s.percentage)
    }

    /// Boundary check for one record; `index` locates it in the request.
    pub fn validate(&self, index: usize) -> Vec<TutorError> {
        let mut errors = Vec::new();

        if self.topic.trim().is_empty() {
            errors.push(TutorError::validation(
                format!("recentSessions[{index}].topic"),
                "cannot be empty",
            ));
        }

        if let Some(score) = &self.score {
            if !(0.0..=100.0).contains(&score.percentage) {
                errors.push(TutorError::validation(
                    format!("recentSessions[{index}].score.percentage"),
                    "must be between 0 and 100",
                ));
            }
            if let (Some(correct), Some(total)) = (score.correct, score.total) {
                if correct > total {
                    errors.push(TutorError::validation(
                        format!("recentSessions[{index}].score.correct"),
                        "cannot exceed score.total",
                    ));
                }
            }
        }

        errors
    }
}

//! Request models accepted at the boundary.
//!
//! Each request validates itself against the active [`TutorConfig`] and
//! reports every problem at once through [`TutorError::from_many`].

use serde::{Deserialize, Serialize};

use crate::config::TutorConfig;
use crate::error::{Result, TutorError};
use crate::history::SessionRecord;
use crate::profile::{ProfileInput, validate_profile_input};

/// Request for a personalized explanation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExplainRequest {
    pub subject: String,
    pub level: String,
    pub topic: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_data: Option<ProfileInput>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_sessions: Option<Vec<SessionRecord>>,
}

impl ExplainRequest {
    pub fn validate(&self, config: &TutorConfig) -> Result<()> {
        let mut errors = validate_target(config, &self.subject, &self.level, &self.topic);
        errors.extend(validate_context(
            config,
            self.profile_data.as_ref(),
            self.recent_sessions.as_deref(),
        ));
        TutorError::from_many(errors)
    }
}

/// Request for an exercise batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExercisesRequest {
    pub subject: String,
    pub level: String,
    pub topic: String,

    /// Defaults to `limits.default_exercise_count`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_data: Option<ProfileInput>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_sessions: Option<Vec<SessionRecord>>,
}

impl ExercisesRequest {
    pub fn validate(&self, config: &TutorConfig) -> Result<()> {
        let mut errors = validate_target(config, &self.subject, &self.level, &self.topic);

        if let Some(count) = self.count {
            let max = config.limits.max_exercise_count;
            if !(1..=max).contains(&count) {
                errors.push(TutorError::validation(
                    "count",
                    format!("must be between 1 and {max}"),
                ));
            }
        }

        errors.extend(validate_context(
            config,
            self.profile_data.as_ref(),
            self.recent_sessions.as_deref(),
        ));
        TutorError::from_many(errors)
    }

    /// Requested batch size, or the configured default.
    pub fn effective_count(&self, config: &TutorConfig) -> usize {
        self.count.unwrap_or(config.limits.default_exercise_count)
    }
}

/// Request to check a submitted answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CheckAnswerRequest {
    pub exercise_id: u32,
    pub user_answer: String,
    pub correct_answer: String,
}

impl CheckAnswerRequest {
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        if self.user_answer.trim().is_empty() {
            errors.push(TutorError::validation("userAnswer", "cannot be empty"));
        }
        if self.correct_answer.trim().is_empty() {
            errors.push(TutorError::validation("correctAnswer", "cannot be empty"));
        }
        TutorError::from_many(errors)
    }
}

fn validate_target(
    config: &TutorConfig,
    subject: &str,
    level: &str,
    topic: &str,
) -> Vec<TutorError> {
    let mut errors = Vec::new();

    if config.subject(subject).is_none() {
        let known: Vec<&str> = config.subjects.iter().map(|s| s.id.as_str()).collect();
        errors.push(TutorError::validation(
            "subject",
            format!("must be one of: {}", known.join(", ")),
        ));
    }

    if config.level(level).is_none() {
        let known: Vec<&str> = config.levels.iter().map(|l| l.id.as_str()).collect();
        errors.push(TutorError::validation(
            "level",
            format!("must be one of: {}", known.join(", ")),
        ));
    }

    let min = config.limits.min_topic_chars;
    if topic.trim().chars().count() < min {
        errors.push(TutorError::validation(
            "topic",
            format!("must be at least {min} characters"),
        ));
    }

    errors
}

fn validate_context(
    config: &TutorConfig,
    profile: Option<&ProfileInput>,
    sessions: Option<&[SessionRecord]>,
) -> Vec<TutorError> {
    let mut errors = Vec::new();
    if let Some(profile) = profile {
        errors.extend(validate_profile_input(profile, &config.limits));
    }
    for (index, session) in sessions.unwrap_or_default().iter().enumerate() {
        errors.extend(session.validate(index));
    }
    errors
}

//! Boundary validation for profile input.

use serde_json::Value;
use std::collections::BTreeMap;

use super::model::{PreferenceKey, ProfileInput};
use crate::config::LimitsConfig;
use crate::error::TutorError;

/// Checks that every preference key is recognized and every value is boolean.
pub fn validate_preferences(preferences: &BTreeMap<String, Value>) -> Vec<TutorError> {
    let mut errors = Vec::new();
    for (name, value) in preferences {
        if name.parse::<PreferenceKey>().is_err() {
            errors.push(TutorError::validation(
                format!("preferences.{name}"),
                "unknown preference key",
            ));
        } else if !value.is_boolean() {
            errors.push(TutorError::validation(
                format!("preferences.{name}"),
                "value must be a boolean",
            ));
        }
    }
    errors
}

/// Validates a partial profile, collecting every problem found.
pub fn validate_profile_input(input: &ProfileInput, limits: &LimitsConfig) -> Vec<TutorError> {
    let mut errors = Vec::new();

    if let Some(age) = input.age {
        let in_range = age >= f64::from(limits.min_age) && age <= f64::from(limits.max_age);
        if !age.is_finite() || age.fract() != 0.0 || !in_range {
            errors.push(TutorError::validation(
                "age",
                format!(
                    "must be a whole number between {} and {}",
                    limits.min_age, limits.max_age
                ),
            ));
        }
    }

    let blank_entry = |entries: &[String]| entries.iter().any(|e| e.trim().is_empty());
    if blank_entry(&input.prior_knowledge) {
        errors.push(TutorError::validation(
            "priorKnowledge",
            "entries cannot be empty",
        ));
    }
    if blank_entry(&input.difficulties) {
        errors.push(TutorError::validation("difficulties", "entries cannot be empty"));
    }

    if let Some(preferences) = &input.preferences {
        errors.extend(validate_preferences(preferences));
    }

    errors
}

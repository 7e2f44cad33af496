//! Student profile domain module.
//!
//! # Module Structure
//!
//! - `model`: `StudentProfile`, `LearningPreferences`, the partial `ProfileInput`
//! - `validation`: boundary checks for profile input

mod model;
mod validation;

pub use model::{
    LearningPreferences, PreferenceKey, ProfileInput, StudentProfile, YOUNG_STUDENT_AGE,
};
pub use validation::{validate_preferences, validate_profile_input};

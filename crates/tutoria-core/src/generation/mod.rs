//! Generation domain module.
//!
//! # Module Structure
//!
//! - `params`: `GenerationParameters` and the qualitative scales (depth, difficulty label, focus)
//! - `content`: structured explanation/exercise records handed back to callers
//! - `provenance`: `Source` tags and `Provenance`
//! - `raw`: structural validator for model-produced exercises

mod content;
mod params;
mod provenance;
mod raw;

pub use content::{
    AdaptedFor, AnswerOption, Exercise, ExerciseMetadata, Explanation, ExplanationContext,
    ExplanationMetadata, ExplanationStep, GeneratedExercise,
};
pub use params::{
    DEFAULT_PROMPT_AGE, Depth, DifficultyLabel, ExerciseFocus, ExerciseSlot,
    GenerationParameters, LanguageStyle, MAX_DIFFICULTY, difficulty_band,
};
pub use provenance::{FALLBACK_MODEL, FALLBACK_PROVIDER_ID, Provenance, Source};
pub use raw::{RawExercise, parse_exercise_response};

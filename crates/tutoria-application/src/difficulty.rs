//! Exercise difficulty model.

use tutoria_core::generation::{DifficultyLabel, ExerciseSlot, MAX_DIFFICULTY};
use tutoria_core::history::SessionContext;
use tutoria_core::profile::StudentProfile;

/// How many points the curve climbs from the first to the last item.
const CURVE_SPAN: usize = 3;

/// Overall label of a batch on `topic`.
///
/// Known difficulties win over prior knowledge, which wins over history
/// strengths; anything else is `medium`.
pub fn difficulty_label(
    profile: &StudentProfile,
    context: &SessionContext,
    topic: &str,
) -> DifficultyLabel {
    if profile.has_difficulty(topic) {
        DifficultyLabel::Easy
    } else if profile.has_knowledge(topic) {
        DifficultyLabel::Medium
    } else if context.is_strength(topic) {
        DifficultyLabel::Hard
    } else {
        DifficultyLabel::Medium
    }
}

/// Per-item difficulty: `min(10, base + floor(index * 3 / count))`.
///
/// Non-decreasing across the batch. `base` is clamped into 1-10.
pub fn difficulty_curve(base: u8, count: usize) -> Vec<u8> {
    let base = base.clamp(1, MAX_DIFFICULTY);
    (0..count)
        .map(|index| {
            let step = u8::try_from(index * CURVE_SPAN / count).unwrap_or(MAX_DIFFICULTY);
            base.saturating_add(step).min(MAX_DIFFICULTY)
        })
        .collect()
}

/// Batch slots carrying the curve.
pub fn exercise_slots(base: u8, count: usize) -> Vec<ExerciseSlot> {
    difficulty_curve(base, count)
        .into_iter()
        .enumerate()
        .map(|(index, difficulty)| ExerciseSlot { index, difficulty })
        .collect()
}

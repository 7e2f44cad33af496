//! Student profile domain model.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::generation::{Depth, LanguageStyle};

/// Age below which a student gets simplified, playful explanations.
pub const YOUNG_STUDENT_AGE: u8 = 16;

/// The six recognized learning-preference toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PreferenceKey {
    EasyReading,
    Examples,
    Analogies,
    StepByStep,
    VisualAids,
    RealWorldContext,
}

impl PreferenceKey {
    pub const ALL: [PreferenceKey; 6] = [
        PreferenceKey::EasyReading,
        PreferenceKey::Examples,
        PreferenceKey::Analogies,
        PreferenceKey::StepByStep,
        PreferenceKey::VisualAids,
        PreferenceKey::RealWorldContext,
    ];

    /// Wire name of the key (camelCase, as sent by clients).
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceKey::EasyReading => "easyReading",
            PreferenceKey::Examples => "examples",
            PreferenceKey::Analogies => "analogies",
            PreferenceKey::StepByStep => "stepByStep",
            PreferenceKey::VisualAids => "visualAids",
            PreferenceKey::RealWorldContext => "realWorldContext",
        }
    }
}

impl FromStr for PreferenceKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PreferenceKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("Unknown preference key: {s}"))
    }
}

/// Learning preferences. Every toggle is always present.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LearningPreferences {
    pub easy_reading: bool,
    pub examples: bool,
    pub analogies: bool,
    pub step_by_step: bool,
    pub visual_aids: bool,
    pub real_world_context: bool,
}

impl Default for LearningPreferences {
    fn default() -> Self {
        Self {
            easy_reading: false,
            examples: true,
            analogies: true,
            step_by_step: true,
            visual_aids: false,
            real_world_context: true,
        }
    }
}

impl LearningPreferences {
    pub fn get(&self, key: PreferenceKey) -> bool {
        match key {
            PreferenceKey::EasyReading => self.easy_reading,
            PreferenceKey::Examples => self.examples,
            PreferenceKey::Analogies => self.analogies,
            PreferenceKey::StepByStep => self.step_by_step,
            PreferenceKey::VisualAids => self.visual_aids,
            PreferenceKey::RealWorldContext => self.real_world_context,
        }
    }

    pub fn set(&mut self, key: PreferenceKey, value: bool) {
        let slot = match key {
            PreferenceKey::EasyReading => &mut self.easy_reading,
            PreferenceKey::Examples => &mut self.examples,
            PreferenceKey::Analogies => &mut self.analogies,
            PreferenceKey::StepByStep => &mut self.step_by_step,
            PreferenceKey::VisualAids => &mut self.visual_aids,
            PreferenceKey::RealWorldContext => &mut self.real_world_context,
        };
        *slot = value;
    }

    /// Defaults overlaid with a caller-supplied partial map.
    ///
    /// Unknown keys and non-boolean values are skipped; rejecting them is
    /// the validation boundary's job.
    pub fn merged(partial: &BTreeMap<String, Value>) -> Self {
        let mut preferences = Self::default();
        for (name, value) in partial {
            if let (Ok(key), Some(flag)) = (name.parse::<PreferenceKey>(), value.as_bool()) {
                preferences.set(key, flag);
            }
        }
        preferences
    }

    /// Snapshot as a name -> flag map with exactly the six recognized keys.
    pub fn to_map(&self) -> BTreeMap<&'static str, bool> {
        PreferenceKey::ALL
            .into_iter()
            .map(|key| (key.as_str(), self.get(key)))
            .collect()
    }

    /// Keys currently switched on, in declaration order.
    pub fn enabled(&self) -> Vec<PreferenceKey> {
        PreferenceKey::ALL
            .into_iter()
            .filter(|key| self.get(*key))
            .collect()
    }
}

/// Partial profile as supplied by a client.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileInput {
    pub age: Option<f64>,
    pub level_detail: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub prior_knowledge: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub difficulties: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub interests: Vec<String>,
    pub preferences: Option<BTreeMap<String, Value>>,
}

/// Clients send `null` for lists they never filled in.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Normalized representation of a learner, immutable for one generation call.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub age: Option<u8>,
    /// Free-text academic sub-level ("first year", "calculus I"), descriptive only
    pub level_detail: String,
    pub prior_knowledge: Vec<String>,
    pub difficulties: Vec<String>,
    pub interests: Vec<String>,
    pub preferences: LearningPreferences,
}

impl StudentProfile {
    /// Builds a profile by merging the partial input over the defaults.
    ///
    /// The input is assumed validated. An age that is not a positive whole
    /// number representable as `u8` is dropped rather than trusted.
    pub fn from_input(input: ProfileInput) -> Self {
        let age = input
            .age
            .filter(|age| age.is_finite() && age.fract() == 0.0 && *age >= 1.0 && *age <= 255.0)
            .map(|age| age as u8);

        let preferences = input
            .preferences
            .as_ref()
            .map(LearningPreferences::merged)
            .unwrap_or_default();

        Self {
            age,
            level_detail: input.level_detail.unwrap_or_default(),
            prior_knowledge: input.prior_knowledge,
            difficulties: input.difficulties,
            interests: input.interests,
            preferences,
        }
    }

    pub fn with_age(mut self, age: u8) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_preferences(mut self, preferences: LearningPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn is_young_student(&self) -> bool {
        self.age.is_some_and(|age| age < YOUNG_STUDENT_AGE)
    }

    pub fn needs_detailed_explanations(&self) -> bool {
        self.preferences.step_by_step || self.preferences.examples
    }

    /// Whether any prior-knowledge entry contains `topic` (case-insensitive).
    pub fn has_knowledge(&self, topic: &str) -> bool {
        contains_topic(&self.prior_knowledge, topic)
    }

    /// Whether any difficulty entry contains `topic` (case-insensitive).
    pub fn has_difficulty(&self, topic: &str) -> bool {
        contains_topic(&self.difficulties, topic)
    }

    /// Young students always get `simple`, regardless of `stepByStep`.
    pub fn depth(&self) -> Depth {
        if self.is_young_student() {
            Depth::Simple
        } else if self.preferences.step_by_step {
            Depth::Detailed
        } else {
            Depth::Standard
        }
    }

    /// Register of the generated language; `encouraging` depends on history.
    pub fn language_style(&self, has_weaknesses: bool) -> LanguageStyle {
        let simplified = self.is_young_student() || self.preferences.easy_reading;
        LanguageStyle {
            simplified,
            formal: !simplified,
            encouraging: has_weaknesses,
        }
    }
}

fn contains_topic(entries: &[String], topic: &str) -> bool {
    let needle = topic.trim().to_lowercase();
    if needle.is_empty() {
        return false;
    }
    entries
        .iter()
        .any(|entry| entry.to_lowercase().contains(&needle))
}

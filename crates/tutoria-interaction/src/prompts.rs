//! Prompt templates shared by every chat-completion adapter.

use minijinja::Environment;
use once_cell::sync::Lazy;
use serde::Serialize;
use tutoria_core::generation::{ExerciseSlot, GenerationParameters, difficulty_band};
use tutoria_core::profile::PreferenceKey;
use tutoria_core::provider::ProviderError;

pub const EXPLANATION_SYSTEM_PROMPT: &str = "You are an expert, passionate tutor. \
Explain concepts clearly, adapted to each student, and spark genuine interest in learning. \
Use language appropriate to the student's age, adapt examples to their interests, \
structure explanations logically and progressively, and stay positive and motivating.";

pub const EXERCISE_SYSTEM_PROMPT: &str =
    "You generate educational exercises. You answer ONLY with valid JSON and no extra text.";

const EXPLANATION_TEMPLATE: &str = r#"Explain "{{ topic }}" in {{ subject }} to a {{ age }}-year-old student at {{ level }} level.

KEY REQUIREMENTS:
- Depth: {{ depth }}
{% if simplified %}
- Use short sentences and everyday words; avoid jargon
{% elif formal %}
- Use precise, formal terminology
{% endif %}
{% if encouraging %}
- The student has struggled recently: be especially encouraging and patient
{% endif %}
{% for hint in preference_hints %}
- {{ hint }}
{% endfor %}
{% if interests %}

IMPORTANT - STUDENT INTERESTS:
This student loves: {{ interests | join(", ") }}
You MUST build examples and analogies around these interests. They are not optional.
{% endif %}

STRUCTURE:
Start with a one or two sentence hook as its own paragraph. Then write one short paragraph per step,
each beginning with a title line that ends in a colon (for example "Main concept:").
{% if step_by_step %}
Number the steps ("1.", "2.", ...).
{% endif %}
If a step needs a formula, put it on its own line starting with "Formula:".

FORMAT:
- At most 6 short paragraphs separated by blank lines
- Language appropriate for {{ age }} years
- No meta-comments such as "sure, happy to help"; go straight to the content
"#;

const EXERCISE_TEMPLATE: &str = r#"Generate ONE practice exercise about "{{ topic }}" in {{ subject }} for a {{ age }}-year-old student at {{ level }} level, difficulty {{ difficulty }}/10.
{% if interests %}

CONTEXT: this student is passionate about {{ interests | join(", ") }}.
If possible, frame the exercise around these interests to make it motivating.
{% endif %}
{% if real_world %}
Set the question in a realistic situation.
{% endif %}

Answer ONLY with a valid JSON object, with no text before or after it, using exactly this shape:
{
  "question": "Text of the question",
  "options": ["Option A", "Option B", "Option C", "Option D"],
  "correctAnswer": "B",
  "explanation": "Clear explanation of why that answer is correct"
}

REQUIREMENTS:
- The question must be clear and appropriate for the age
- All 4 options must be plausible but only one correct
- correctAnswer must be "A", "B", "C" or "D"
- The explanation must help understand the concept, not just state that the answer is correct
- Difficulty {{ difficulty }}/10: {{ band }}

Answer ONLY with the JSON, without ```json fences or extra text."#;

static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env
});

#[derive(Serialize)]
struct PromptContext<'a> {
    topic: &'a str,
    subject: &'a str,
    level: &'a str,
    age: u8,
    depth: &'static str,
    simplified: bool,
    formal: bool,
    encouraging: bool,
    step_by_step: bool,
    real_world: bool,
    interests: &'a [String],
    preference_hints: Vec<&'static str>,
    difficulty: Option<u8>,
    band: Option<&'static str>,
}

impl<'a> PromptContext<'a> {
    fn new(params: &'a GenerationParameters) -> Self {
        Self {
            topic: &params.topic,
            subject: &params.subject,
            level: &params.level,
            age: params.prompt_age(),
            depth: params.depth.as_str(),
            simplified: params.language.simplified,
            formal: params.language.formal,
            encouraging: params.language.encouraging,
            step_by_step: params.preferences.step_by_step,
            real_world: params.preferences.real_world_context,
            interests: &params.interests,
            preference_hints: params
                .preferences
                .enabled()
                .into_iter()
                .map(preference_hint)
                .collect(),
            difficulty: None,
            band: None,
        }
    }
}

fn preference_hint(key: PreferenceKey) -> &'static str {
    match key {
        PreferenceKey::EasyReading => "Keep the reading level easy",
        PreferenceKey::Examples => "Include worked examples",
        PreferenceKey::Analogies => "Use analogies with familiar things",
        PreferenceKey::StepByStep => "Break the reasoning into clear steps",
        PreferenceKey::VisualAids => {
            "Describe diagrams or mental images that help the student see the idea"
        }
        PreferenceKey::RealWorldContext => "Connect the concept to real-world situations",
    }
}

fn render(template: &str, context: &PromptContext<'_>) -> Result<String, ProviderError> {
    TEMPLATES
        .render_str(template, context)
        .map_err(|err| ProviderError::request(format!("failed to render prompt: {err}")))
}

/// User message asking for a personalized explanation.
pub fn explanation_prompt(params: &GenerationParameters) -> Result<String, ProviderError> {
    render(EXPLANATION_TEMPLATE, &PromptContext::new(params))
}

/// User message asking for a single JSON exercise at the slot's difficulty.
pub fn exercise_prompt(
    params: &GenerationParameters,
    slot: ExerciseSlot,
) -> Result<String, ProviderError> {
    let mut context = PromptContext::new(params);
    context.difficulty = Some(slot.difficulty);
    context.band = Some(difficulty_band(slot.difficulty));
    render(EXERCISE_TEMPLATE, &context)
}

//! Structural validation of model-produced exercises.
//!
//! Models answer with loosely shaped JSON. Nothing is trusted until
//! [`RawExercise::validate`] has turned it into a [`GeneratedExercise`].

use serde::Deserialize;

use super::content::{AnswerOption, GeneratedExercise};
use crate::provider::ProviderError;

/// Exercise JSON exactly as a model returned it.
///
/// Both the English keys and the legacy Spanish keys are accepted.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RawExercise {
    #[serde(default, alias = "pregunta")]
    pub question: Option<String>,
    #[serde(default, alias = "opciones")]
    pub options: Option<Vec<String>>,
    #[serde(
        default,
        rename = "correctAnswer",
        alias = "respuestaCorrecta",
        alias = "correct_answer"
    )]
    pub correct_answer: Option<String>,
    #[serde(default, alias = "explicacion")]
    pub explanation: Option<String>,
}

impl RawExercise {
    pub fn validate(self) -> Result<GeneratedExercise, ProviderError> {
        let question = required(self.question, "question")?;
        let explanation = required(self.explanation, "explanation")?;
        let answer = required(self.correct_answer, "correctAnswer")?;

        let options = self
            .options
            .ok_or_else(|| ProviderError::malformed("missing field `options`"))?;
        let count = options.len();
        let options: [String; 4] = options
            .try_into()
            .map_err(|_| ProviderError::malformed(format!("expected 4 options, got {count}")))?;
        if options.iter().any(|o| o.trim().is_empty()) {
            return Err(ProviderError::malformed("options cannot be blank"));
        }

        let correct = answer.parse::<AnswerOption>().map_err(ProviderError::MalformedOutput)?;

        Ok(GeneratedExercise {
            question,
            options,
            correct,
            explanation,
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, ProviderError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ProviderError::malformed(format!("missing field `{field}`"))),
    }
}

/// Decodes and validates an exercise from a model's text answer.
///
/// Markdown code fences and chatter around the JSON object are tolerated.
pub fn parse_exercise_response(text: &str) -> Result<GeneratedExercise, ProviderError> {
    let cleaned = text.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }

    let json = match (cleaned.find('{'), cleaned.rfind('}')) {
        (Some(start), Some(end)) if start < end => &cleaned[start..=end],
        _ => return Err(ProviderError::malformed("no JSON object in response")),
    };

    let raw: RawExercise = serde_json::from_str(json)
        .map_err(|e| ProviderError::malformed(format!("invalid exercise JSON: {e}")))?;
    raw.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "question": "What is 1/2 + 1/4?",
        "options": ["1/6", "3/4", "2/6", "1/8"],
        "correctAnswer": "B",
        "explanation": "Rewrite 1/2 as 2/4 and add."
    }"#;

    #[test]
    fn test_parse_valid_exercise() {
        let exercise = parse_exercise_response(VALID).unwrap();
        assert_eq!(exercise.correct, AnswerOption::B);
        assert_eq!(exercise.options[1], "3/4");
    }

    #[test]
    fn test_parse_strips_code_fences_and_chatter() {
        let text = format!("Sure! Here it is:\n```json\n{VALID}\n```\nGood luck.");
        assert!(parse_exercise_response(&text).is_ok());
    }

    #[test]
    fn test_parse_accepts_spanish_keys() {
        let text = r#"{
            "pregunta": "¿Cuánto es 2 + 2?",
            "opciones": ["3", "4", "5", "6"],
            "respuestaCorrecta": "b",
            "explicacion": "Dos más dos son cuatro."
        }"#;

        let exercise = parse_exercise_response(text).unwrap();
        assert_eq!(exercise.correct, AnswerOption::B);
    }

    #[test]
    fn test_wrong_option_count_is_malformed() {
        let text = r#"{"question":"q","options":["a","b","c"],"correctAnswer":"A","explanation":"e"}"#;
        let err = parse_exercise_response(text).unwrap_err();
        assert_eq!(err, ProviderError::malformed("expected 4 options, got 3"));
    }

    #[test]
    fn test_answer_outside_alphabet_is_malformed() {
        let text = r#"{"question":"q","options":["a","b","c","d"],"correctAnswer":"E","explanation":"e"}"#;
        assert!(matches!(
            parse_exercise_response(text),
            Err(ProviderError::MalformedOutput(_))
        ));
    }

    #[test]
    fn test_missing_rationale_is_malformed() {
        let text = r#"{"question":"q","options":["a","b","c","d"],"correctAnswer":"A"}"#;
        assert_eq!(
            parse_exercise_response(text).unwrap_err(),
            ProviderError::malformed("missing field `explanation`")
        );
    }

    #[test]
    fn test_empty_and_non_json_responses() {
        assert_eq!(
            parse_exercise_response("```json\n```").unwrap_err(),
            ProviderError::EmptyResponse
        );
        assert!(matches!(
            parse_exercise_response("I cannot help with that."),
            Err(ProviderError::MalformedOutput(_))
        ));
    }
}

//! Turns raw explanation text into a summary plus ordered steps.
//!
//! The parser only looks at the text, so provider output and fallback
//! output go through exactly the same path.

use once_cell::sync::Lazy;
use regex::Regex;
use tutoria_core::generation::ExplanationStep;

static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t]*\n").unwrap());
static ORDINAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[.)]\s*").unwrap());

/// Title marker vocabulary, checked in order against the lowercase title.
const MARKERS: &[(&str, &[&str])] = &[
    ("📚", &["introduction", "overview", "what is", "introducción"]),
    ("🔑", &["concept", "definition", "key", "fundamental", "principle", "concepto"]),
    ("💡", &["example", "ejemplo"]),
    ("🎯", &["analogy", "imagine", "analogía"]),
    ("🌍", &["application", "real world", "real-world", "everyday", "aplicación"]),
    ("✍️", &["practice", "exercise", "try it", "práctica"]),
];

/// Markers for titles outside the vocabulary, picked by paragraph position.
const CYCLING_MARKERS: [&str; 3] = ["📖", "🧠", "✨"];

/// Result of parsing one explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedExplanation {
    pub summary: String,
    /// Never empty
    pub steps: Vec<ExplanationStep>,
}

/// Parses `text` into a summary and at least one step.
pub fn parse_explanation(text: &str, topic: &str) -> ParsedExplanation {
    let normalized = text.replace("\r\n", "\n");
    let paragraphs: Vec<&str> = PARAGRAPH_BREAK
        .split(&normalized)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let Some((first, rest)) = paragraphs.split_first() else {
        let summary = default_summary(topic);
        return ParsedExplanation {
            steps: vec![whole_text_step(text, &summary, topic)],
            summary,
        };
    };

    let mut steps: Vec<ExplanationStep> = rest
        .iter()
        .enumerate()
        .map(|(index, paragraph)| parse_step(index, paragraph))
        .collect();

    if steps.is_empty() {
        steps.push(whole_text_step(text, first, topic));
    }

    ParsedExplanation {
        summary: strip_decoration(first).to_string(),
        steps,
    }
}

fn default_summary(topic: &str) -> String {
    format!("An explanation of {topic}.")
}

fn whole_text_step(text: &str, summary: &str, topic: &str) -> ExplanationStep {
    let content = match text.trim() {
        "" => summary.to_string(),
        trimmed => trimmed.to_string(),
    };
    ExplanationStep {
        id: 1,
        title: format!("{} {topic}", CYCLING_MARKERS[0]),
        content,
        formula: None,
    }
}

/// `index` is the zero-based position among step paragraphs.
fn parse_step(index: usize, paragraph: &str) -> ExplanationStep {
    let id = u32::try_from(index + 1).unwrap_or(u32::MAX);
    let default_title = format!("Step {id}");

    let (first_line, remainder) = paragraph
        .split_once('\n')
        .map_or((paragraph, ""), |(line, rest)| (line, rest.trim()));

    let (title, body) = match heading(first_line) {
        Some(title) if !title.is_empty() && !remainder.is_empty() => (title, remainder),
        _ => (default_title, paragraph),
    };

    let (content, formula) = extract_formula(body);
    ExplanationStep {
        id,
        title: decorate(&title, index),
        content,
        formula,
    }
}

/// Title text when `line` looks like a heading.
fn heading(line: &str) -> Option<String> {
    let cleaned = strip_decoration(line);
    let ordinal = ORDINAL.find(cleaned);
    if ordinal.is_none() && !cleaned.ends_with(':') {
        return None;
    }

    let title = ordinal.map_or(cleaned, |m| &cleaned[m.end()..]);
    let title = title.trim_end_matches(':');
    Some(strip_decoration(title).to_string())
}

/// Removes Markdown heading and emphasis decoration.
fn strip_decoration(text: &str) -> &str {
    text.trim()
        .trim_start_matches('#')
        .trim()
        .trim_matches(|c| c == '*' || c == '_')
        .trim()
}

/// Pulls the first `Formula:` line out of the step content.
fn extract_formula(body: &str) -> (String, Option<String>) {
    let mut formula = None;
    let mut lines = Vec::new();

    for line in body.lines() {
        let trimmed = line.trim();
        let is_formula = trimmed
            .get(..8)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("formula:"));
        if formula.is_none() && is_formula {
            let value = trimmed[8..].trim();
            if !value.is_empty() {
                formula = Some(value.to_string());
                continue;
            }
        }
        lines.push(line);
    }

    let content = lines.join("\n").trim().to_string();
    if formula.is_some() && content.is_empty() {
        // Nothing else in the step; keep the line as content.
        return (body.trim().to_string(), None);
    }
    (content, formula)
}

/// Whether `title` already opens with an emoji or pictographic symbol.
///
/// Inverted Spanish punctuation (`¿`, `¡`) sits below U+2000 and does not count.
fn has_leading_symbol(title: &str) -> bool {
    title
        .chars()
        .next()
        .is_some_and(|c| u32::from(c) >= 0x2000 && !c.is_alphanumeric())
}

fn decorate(title: &str, index: usize) -> String {
    if has_leading_symbol(title) {
        return title.to_string();
    }

    let lower = title.to_lowercase();
    let marker = MARKERS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map_or(CYCLING_MARKERS[index % CYCLING_MARKERS.len()], |(marker, _)| *marker);
    format!("{marker} {title}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_with_colon_and_ordinal() {
        let text = "Fractions describe parts of a whole.\n\n\
                    Key concepts:\nA fraction has a numerator and a denominator.\n\n\
                    2) Worked example\nHalf of a pizza is 1/2.";

        let parsed = parse_explanation(text, "fractions");
        assert_eq!(parsed.summary, "Fractions describe parts of a whole.");
        assert_eq!(parsed.steps.len(), 2);
        assert_eq!(parsed.steps[0].id, 1);
        assert_eq!(parsed.steps[0].title, "🔑 Key concepts");
        assert_eq!(parsed.steps[0].content, "A fraction has a numerator and a denominator.");
        assert_eq!(parsed.steps[1].title, "💡 Worked example");
    }

    #[test]
    fn test_plain_paragraphs_get_default_titles_and_cycling_markers() {
        let text = "Summary here.\n\nFirst plain paragraph.\n\nSecond plain paragraph.";
        let parsed = parse_explanation(text, "fractions");

        assert_eq!(parsed.steps[0].title, "📖 Step 1");
        assert_eq!(parsed.steps[0].content, "First plain paragraph.");
        assert_eq!(parsed.steps[1].title, "🧠 Step 2");
    }

    #[test]
    fn test_markdown_decoration_is_stripped() {
        let text = "## Momentum\n\n**Real-world applications:**\nCars, rockets and billiards.";
        let parsed = parse_explanation(text, "momentum");
        assert_eq!(parsed.summary, "Momentum");
        assert_eq!(parsed.steps[0].title, "🌍 Real-world applications");
    }

    #[test]
    fn test_heading_without_body_uses_default_title() {
        let text = "Summary.\n\n1. Add the numerators.";
        let parsed = parse_explanation(text, "fractions");
        assert_eq!(parsed.steps[0].title, "📖 Step 1");
        assert_eq!(parsed.steps[0].content, "1. Add the numerators.");
    }

    #[test]
    fn test_single_paragraph_becomes_single_step() {
        let parsed = parse_explanation("Just one paragraph about vectors.", "vectors");
        assert_eq!(parsed.summary, "Just one paragraph about vectors.");
        assert_eq!(parsed.steps.len(), 1);
        assert_eq!(parsed.steps[0].content, "Just one paragraph about vectors.");
    }

    #[test]
    fn test_empty_text_uses_default_summary() {
        let parsed = parse_explanation("  \n\n ", "vectors");
        assert_eq!(parsed.summary, "An explanation of vectors.");
        assert_eq!(parsed.steps.len(), 1);
        assert!(!parsed.steps[0].content.is_empty());
    }

    #[test]
    fn test_formula_line_is_extracted() {
        let text = "Summary.\n\nNewton's second law:\nForce equals mass times acceleration.\nFormula: F = m * a";
        let parsed = parse_explanation(text, "forces");
        assert_eq!(parsed.steps[0].formula.as_deref(), Some("F = m * a"));
        assert_eq!(parsed.steps[0].content, "Force equals mass times acceleration.");
    }

    #[test]
    fn test_existing_emoji_title_is_not_decorated_twice() {
        let text = "Summary.\n\n🚀 Launch speed:\nRockets need escape velocity.";
        let parsed = parse_explanation(text, "speed");
        assert_eq!(parsed.steps[0].title, "🚀 Launch speed");
    }

    #[test]
    fn test_inverted_punctuation_still_gets_a_marker() {
        let text = "Resumen.\n\n¡Ejemplo práctico:\nMedia pizza es 1/2.\n\n¿Por qué importa?:\nAparece en recetas.";
        let parsed = parse_explanation(text, "fracciones");
        assert_eq!(parsed.steps[0].title, "💡 ¡Ejemplo práctico");
        assert_eq!(parsed.steps[1].title, "🧠 ¿Por qué importa?");
        assert!(has_leading_symbol("✍️ Practice"));
        assert!(!has_leading_symbol("¿Qué es?"));
    }

    #[test]
    fn test_windows_line_endings() {
        let text = "Summary.\r\n\r\nIntroduction:\r\nHello.";
        let parsed = parse_explanation(text, "x");
        assert_eq!(parsed.steps[0].title, "📚 Introduction");
        assert_eq!(parsed.steps[0].content, "Hello.");
    }

    #[test]
    fn test_fallback_text_always_parses_into_steps() {
        use tutoria_core::fallback::FallbackGenerator;
        use tutoria_core::generation::{Depth, GenerationParameters, LanguageStyle};
        use tutoria_core::profile::{LearningPreferences, PreferenceKey};

        let generator = FallbackGenerator::new();
        for depth in [Depth::Simple, Depth::Standard, Depth::Detailed] {
            for age in [None, Some(9), Some(30)] {
                for mask in 0u8..64 {
                    let mut preferences = LearningPreferences::default();
                    for (bit, key) in PreferenceKey::ALL.into_iter().enumerate() {
                        preferences.set(key, mask & (1 << bit) != 0);
                    }
                    let params = GenerationParameters {
                        depth,
                        age,
                        preferences,
                        language: LanguageStyle {
                            encouraging: mask % 2 == 0,
                            ..LanguageStyle::default()
                        },
                        ..GenerationParameters::new("ratios", "math", "secondary")
                    };

                    let text = generator.explanation(&params, "Mathematics");
                    let parsed = parse_explanation(&text, "ratios");
                    assert!(!parsed.summary.trim().is_empty(), "{depth:?} {age:?} {mask}");
                    assert!(parsed.steps.len() >= 3, "{depth:?} {age:?} {mask}");
                    assert_eq!(parsed.steps[0].title, "📚 Introduction");
                    assert!(parsed.steps.iter().all(|s| !s.content.trim().is_empty()));
                }
            }
        }
    }
}

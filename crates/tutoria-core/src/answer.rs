//! Answer checking.

use serde::{Deserialize, Serialize};

/// Outcome of comparing a submitted answer with the expected one.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnswerCheck {
    pub is_correct: bool,
    pub feedback: String,
    /// Only revealed when the submitted answer is wrong
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
}

/// Compares answers after trimming and case folding.
pub fn check_answer(user_answer: &str, correct_answer: &str) -> AnswerCheck {
    let is_correct = normalize(user_answer) == normalize(correct_answer);

    if is_correct {
        AnswerCheck {
            is_correct,
            feedback: "Correct! Excellent work.".to_string(),
            correct_answer: None,
        }
    } else {
        AnswerCheck {
            is_correct,
            feedback: format!("Incorrect. The correct answer is: {correct_answer}"),
            correct_answer: Some(correct_answer.to_string()),
        }
    }
}

fn normalize(answer: &str) -> String {
    answer.trim().to_lowercase()
}

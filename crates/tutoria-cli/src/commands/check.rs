use anyhow::Result;
use tutoria_core::request::CheckAnswerRequest;

use super::utils::{ConfigPaths, build_usecase, print_json};

pub fn run(paths: &ConfigPaths, exercise_id: u32, answer: String, expected: String) -> Result<()> {
    let usecase = build_usecase(paths)?;
    let response = usecase.check_answer(CheckAnswerRequest {
        exercise_id,
        user_answer: answer,
        correct_answer: expected,
    })?;
    print_json(&response)
}

use anyhow::Result;
use tutoria_core::request::ExercisesRequest;

use super::utils::{ConfigPaths, build_usecase, print_json, read_history, read_profile};
use crate::TargetArgs;

pub async fn run(paths: &ConfigPaths, target: TargetArgs, count: Option<usize>) -> Result<()> {
    let usecase = build_usecase(paths)?;
    let request = ExercisesRequest {
        profile_data: read_profile(target.profile.as_deref())?,
        recent_sessions: read_history(target.history.as_deref())?,
        subject: target.subject,
        level: target.level,
        topic: target.topic,
        count,
    };

    let response = usecase.exercises(request).await?;
    print_json(&response)
}

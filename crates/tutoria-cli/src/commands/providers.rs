use anyhow::Result;

use super::utils::{ConfigPaths, build_usecase};

pub fn run(paths: &ConfigPaths) -> Result<()> {
    let usecase = build_usecase(paths)?;
    let statuses = usecase.provider_status();

    if statuses.is_empty() {
        println!("No providers enabled; all content uses the local fallback.");
        return Ok(());
    }

    for status in statuses {
        let state = if status.available {
            "ready"
        } else {
            "no API key"
        };
        println!(
            "tier {}: {} ({}) - {}",
            status.tier, status.provider, status.model, state
        );
    }
    Ok(())
}

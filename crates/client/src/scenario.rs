use std::path::Path;

use anyhow::{Context, Result};

use game_core::Scenario;

/// Reads a RON scenario, or returns the built-in skirmish when no path is
/// given.
pub fn load(path: Option<&Path>) -> Result<Scenario> {
    let Some(path) = path else {
        return Ok(Scenario::skirmish());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario {}", path.display()))?;
    let scenario = parse(&text).with_context(|| format!("invalid scenario {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        factions = scenario.factions.len(),
        "scenario loaded"
    );
    Ok(scenario)
}

fn parse(text: &str) -> Result<Scenario> {
    Ok(ron::from_str(text)?)
}

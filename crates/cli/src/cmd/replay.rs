//! Replay a trigger script

use crate::util;
use anyhow::Result;
use cli_lib::replay::ReplayScript;
use owo_colors::OwoColorize;
use std::path::Path;

pub async fn run(script_path: &Path, delay_ms: Option<u64>, json: bool) -> Result<()> {
    let config = util::load_config()?;
    let script = ReplayScript::load(script_path)?;

    let report = script.run(delay_ms, config.replay_dispatcher().delay_ms())?;
    tracing::info!(
        "Replayed {} events with a {}ms window",
        script.events.len(),
        report.delay_ms
    );

    if json {
        return util::print_json_line(&report);
    }

    println!("{} {}ms", "Debounce window:".bold(), report.delay_ms);
    if report.fired.is_empty() {
        println!("  {}", "action never ran".dimmed());
    }
    for fired in &report.fired {
        println!("  {:>7}  {}", format!("{}ms", fired.at_ms).cyan(), fired.value);
    }
    println!(
        "{}",
        format!(
            "{} triggered, {} superseded, {} cancelled, {} fired",
            report.triggered,
            report.superseded,
            report.cancelled,
            report.fired.len()
        )
        .dimmed()
    );

    Ok(())
}

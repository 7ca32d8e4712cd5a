//! `quell filter` end to end

use crate::common::TestDir;
use anyhow::Result;
use std::time::Duration;

fn titles(outcome: &serde_json::Value) -> Vec<String> {
    outcome["matched"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["title"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn test_typing_burst_settles_once() -> Result<()> {
    let dir = TestDir::new()?;
    dir.items()?;

    // Long window: only end of input can settle it, so exactly one outcome.
    let result = crate::quell!(dir.path(), "filter", "items.json", "--delay-ms", "5000", "--json")
        .stdin("r\nru\nrus\nrust\n")
        .assert_success()?;

    let outcomes = result.json_lines()?;
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0]["criteria"]["term"], "rust");
    assert_eq!(titles(&outcomes[0]), vec!["Backend Intern", "Rust Engineer"]);
    assert_eq!(outcomes[0]["total"], 3);

    // Flushed at end of input rather than waiting out the window.
    assert!(result.duration < Duration::from_secs(5));
    Ok(())
}

#[test]
fn test_initial_kind_flag() -> Result<()> {
    let dir = TestDir::new()?;
    dir.items()?;

    let result = crate::quell!(
        dir.path(),
        "filter",
        "items.json",
        "--delay-ms",
        "5000",
        "--kind",
        "full-time",
        "--json"
    )
    .stdin("rust\n")
    .assert_success()?;

    let outcomes = result.json_lines()?;
    assert_eq!(titles(&outcomes[0]), vec!["Rust Engineer"]);
    Ok(())
}

#[test]
fn test_status_directive() -> Result<()> {
    let dir = TestDir::new()?;
    dir.items()?;

    let result = crate::quell!(dir.path(), "filter", "items.json", "--delay-ms", "5000", "--json")
        .stdin(":status open\n")
        .assert_success()?;

    let outcomes = result.json_lines()?;
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0]["criteria"]["status"], "open");
    assert_eq!(titles(&outcomes[0]), vec!["Backend Intern", "Data Analyst"]);
    Ok(())
}

#[test]
fn test_text_output_lists_items() -> Result<()> {
    let dir = TestDir::new()?;
    dir.items()?;

    let result = crate::quell!(dir.path(), "filter", "items.json", "--delay-ms", "5000")
        .stdin("analyst\n")
        .assert_success()?;

    assert!(result.contains_stdout("Data Analyst"));
    assert!(!result.contains_stdout("Backend Intern"));
    Ok(())
}

#[test]
fn test_bad_items_file_fails() -> Result<()> {
    let dir = TestDir::new()?;
    dir.write("items.json", "{broken")?;

    let result = crate::quell!(dir.path(), "filter", "items.json").assert_failure()?;
    assert!(result.stderr.contains("items.json"));
    Ok(())
}

#[test]
fn test_delay_flag_out_of_range() -> Result<()> {
    let dir = TestDir::new()?;
    dir.items()?;

    crate::quell!(dir.path(), "filter", "items.json", "--delay-ms", "60001").assert_failure()?;
    Ok(())
}

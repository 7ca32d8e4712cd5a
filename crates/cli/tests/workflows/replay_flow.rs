//! `quell replay` end to end

use crate::common::TestDir;
use anyhow::Result;

const BURST: &str = r#"
delay_ms = 300

[[event]]
at_ms = 0
kind = "trigger"
value = "a"

[[event]]
at_ms = 100
kind = "trigger"
value = "b"

[[event]]
at_ms = 250
kind = "trigger"
value = "c"
"#;

#[test]
fn test_replay_burst_json() -> Result<()> {
    let dir = TestDir::new()?;
    dir.write("burst.toml", BURST)?;

    let result = crate::quell!(dir.path(), "replay", "burst.toml", "--json").assert_success()?;
    let lines = result.json_lines()?;

    assert_eq!(lines.len(), 1);
    let report = &lines[0];
    assert_eq!(report["delay_ms"], 300);
    assert_eq!(report["fired"].as_array().map(|f| f.len()), Some(1));
    assert_eq!(report["fired"][0]["at_ms"], 550);
    assert_eq!(report["fired"][0]["value"], "c");
    assert_eq!(report["superseded"], 2);
    Ok(())
}

#[test]
fn test_replay_text_output() -> Result<()> {
    let dir = TestDir::new()?;
    dir.write("burst.toml", BURST)?;

    let result = crate::quell!(dir.path(), "replay", "burst.toml").assert_success()?;
    assert!(result.contains_stdout("550ms"));
    assert!(result.contains_stdout("3 triggered, 2 superseded, 0 cancelled, 1 fired"));
    Ok(())
}

#[test]
fn test_replay_cancel_never_fires() -> Result<()> {
    let dir = TestDir::new()?;
    dir.write(
        "cancel.toml",
        "[[event]]\nat_ms = 0\nkind = \"trigger\"\nvalue = \"x\"\n\n\
         [[event]]\nat_ms = 150\nkind = \"cancel\"\n",
    )?;

    let result = crate::quell!(dir.path(), "replay", "cancel.toml", "--delay-ms", "300", "--json")
        .assert_success()?;
    let report = &result.json_lines()?[0];

    assert_eq!(report["fired"].as_array().map(|f| f.len()), Some(0));
    assert_eq!(report["cancelled"], 1);
    Ok(())
}

#[test]
fn test_replay_uses_configured_default() -> Result<()> {
    let dir = TestDir::new()?;
    dir.write("config.toml", "[dispatch]\ndefault_delay_ms = 40\n")?;
    dir.write("one.toml", "[[event]]\nat_ms = 10\nkind = \"trigger\"\nvalue = \"v\"\n")?;

    let result = crate::quell!(dir.path(), "replay", "one.toml", "--json").assert_success()?;
    let report = &result.json_lines()?[0];

    assert_eq!(report["delay_ms"], 40);
    assert_eq!(report["fired"][0]["at_ms"], 50);
    Ok(())
}

#[test]
fn test_replay_missing_script_fails() -> Result<()> {
    let dir = TestDir::new()?;
    crate::quell!(dir.path(), "replay", "nope.toml").assert_failure()?;
    Ok(())
}

//! `quell search` end to end

use crate::common::TestDir;
use anyhow::Result;

#[test]
fn test_search_sends_settled_query() -> Result<()> {
    let dir = TestDir::new()?;
    dir.items()?;

    let result = crate::quell!(dir.path(), "search", "items.json", "--delay-ms", "5000", "--json")
        .stdin("r\nru\nrust\n")
        .assert_success()?;

    let results = result.json_lines()?;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["query"], "rust");
    assert_eq!(results[0]["items"].as_array().map(|items| items.len()), Some(2));
    Ok(())
}

#[test]
fn test_short_query_not_sent() -> Result<()> {
    let dir = TestDir::new()?;
    dir.items()?;

    let result = crate::quell!(dir.path(), "search", "items.json", "--delay-ms", "5000", "--json")
        .stdin("r\n")
        .assert_success()?;

    assert!(result.json_lines()?.is_empty());
    Ok(())
}

#[test]
fn test_min_len_flag() -> Result<()> {
    let dir = TestDir::new()?;
    dir.items()?;

    let result = crate::quell!(
        dir.path(),
        "search",
        "items.json",
        "--delay-ms",
        "5000",
        "--min-len",
        "1",
        "--json"
    )
    .stdin("r\n")
    .assert_success()?;

    assert_eq!(result.json_lines()?.len(), 1);
    Ok(())
}

#[test]
fn test_no_results_message() -> Result<()> {
    let dir = TestDir::new()?;
    dir.items()?;

    let result = crate::quell!(dir.path(), "search", "items.json", "--delay-ms", "5000")
        .stdin("cobol\n")
        .assert_success()?;

    assert!(result.contains_stdout("No results found"));
    Ok(())
}

#[test]
fn test_text_output_shows_url() -> Result<()> {
    let dir = TestDir::new()?;
    dir.items()?;

    let result = crate::quell!(dir.path(), "search", "items.json", "--delay-ms", "5000")
        .stdin("analyst\n")
        .assert_success()?;

    assert!(result.contains_stdout("Data Analyst"));
    assert!(result.contains_stdout("/jobs/analyst"));
    Ok(())
}

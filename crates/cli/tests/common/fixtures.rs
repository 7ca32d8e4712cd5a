//! Test fixtures: a scratch directory with item lists and scripts

use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Items shaped like the job listings the live filter runs over
pub const ITEMS_JSON: &str = r#"[
  {"title": "Backend Intern", "description": "Rust and Postgres", "type": "internship", "status": "open"},
  {"title": "Data Analyst", "description": "SQL dashboards", "url": "/jobs/analyst",
   "type": "full-time", "status": "open"},
  {"title": "Rust Engineer", "description": "Async services", "type": "full-time", "status": "closed"}
]"#;

/// Scratch directory for one test
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> Result<Self> {
        Ok(Self { dir: TempDir::new()? })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the directory, returning its path
    pub fn write(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    /// Write the standard item list as items.json
    pub fn items(&self) -> Result<PathBuf> {
        self.write("items.json", ITEMS_JSON)
    }
}

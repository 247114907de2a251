//! TestWorld pattern for declarative CLI integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating an isolated data directory per test
//! - Placing an article file and a config file
//! - Executing CLI commands with proper context

use anyhow::Result;
use assert_cmd::Command;
use serde_json::Value;
use shelfmark_runtime::EngineConfig;
use shelfmark_types::Article;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::write_articles;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use shelfmark_testing::{TestWorld, sample_articles};
///
/// let world = TestWorld::new().with_articles(&sample_articles(10));
/// let result = world.run(&["list", "--data", world.articles_arg()]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    data_dir: PathBuf,
    articles_path: PathBuf,
    articles_arg: String,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".shelfmark");
        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");

        let articles_path = temp_dir.path().join("articles.json");
        let articles_arg = articles_path.to_string_lossy().to_string();

        Self {
            temp_dir,
            data_dir,
            articles_path,
            articles_arg,
            env_vars: HashMap::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn articles_path(&self) -> &Path {
        &self.articles_path
    }

    /// The article file path as a CLI argument
    pub fn articles_arg(&self) -> &str {
        &self.articles_arg
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join("config.toml")
    }

    /// Write the article file read by `list --data`.
    pub fn with_articles(self, articles: &[Article]) -> Self {
        write_articles(&self.articles_path, articles).expect("Failed to write articles");
        self
    }

    /// Write `config.toml` into the data directory.
    pub fn with_config(self, config: &EngineConfig) -> Self {
        config
            .save_to(&self.config_path())
            .expect("Failed to write config");
        self
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Configure a CLI command with this test environment's settings.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--data-dir").arg(self.data_dir());
        cmd.current_dir(self.temp_dir.path());
        cmd.env_remove("SHELFMARK_PATH");
        cmd.env_remove("RUST_LOG");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute a command using the project's binary and return the result.
    ///
    /// Requires `CARGO_BIN_EXE_shelfmark`, which cargo sets for the CLI
    /// crate's integration tests.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("shelfmark")
            .map_err(|e| anyhow::anyhow!("Failed to find shelfmark binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }
}

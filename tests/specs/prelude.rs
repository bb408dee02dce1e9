// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fluent helpers for running `ck` in a scratch project.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::{Duration, Instant};

use tempfile::TempDir;

/// Config that needs no external services
pub const MEMORY_CONFIG: &str = "[queue]\nbroker = \"memory\"\n";

fn ck_binary() -> PathBuf {
    let path = assert_cmd::cargo::cargo_bin("ck");
    assert!(path.exists(), "ck binary not built at {}; run `cargo build -p ck`", path.display());
    path
}

/// `ck` in an empty scratch directory
pub fn cli() -> CliBuilder {
    let project = Project::empty();
    let mut builder = project.ck();
    builder._project = Some(project);
    builder
}

pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self { dir: tempfile::tempdir().unwrap() }
    }

    /// Project with `ck.toml` holding `config`
    pub fn with_config(config: &str) -> Self {
        let project = Self::empty();
        project.file("ck.toml", config);
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn state_dir(&self) -> PathBuf {
        self.path().join("state")
    }

    pub fn file(&self, rel: &str, content: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn ck(&self) -> CliBuilder {
        let mut cmd = assert_cmd::Command::new(ck_binary());
        cmd.current_dir(self.path())
            .env("CK_STATE_DIR", self.state_dir())
            .env("RUST_LOG", "warn")
            .env_remove("CK_CONFIG")
            .env_remove("CK_BROKER_URL")
            .env_remove("CK_JOB_LOG")
            .timeout(Duration::from_secs(30));
        CliBuilder { cmd, _project: None }
    }

    /// Wait up to `timeout` for the file at `path` to contain `needle`,
    /// returning its final content
    pub fn wait_for_content(&self, path: &Path, needle: &str, timeout: Duration) -> String {
        let start = Instant::now();
        loop {
            let content = std::fs::read_to_string(path).unwrap_or_default();
            if content.contains(needle) || start.elapsed() >= timeout {
                return content;
            }
            std::thread::sleep(Duration::from_millis(50));
        }
    }

    /// Wait up to `timeout` for `rel` to exist
    pub fn wait_for_file(&self, rel: &str, timeout: Duration) -> bool {
        let path = self.path().join(rel);
        let start = Instant::now();
        while start.elapsed() < timeout {
            if path.exists() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(50));
        }
        path.exists()
    }
}

pub struct CliBuilder {
    cmd: assert_cmd::Command,
    /// Keeps the scratch directory alive for `cli()`
    _project: Option<Project>,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    fn output(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        RunAssert { output }
    }

    pub fn passes(self) -> RunAssert {
        self.exits(0)
    }

    pub fn exits(self, code: i32) -> RunAssert {
        let run = self.output();
        assert_eq!(
            run.output.status.code(),
            Some(code),
            "unexpected exit status\nstdout:\n{}\nstderr:\n{}",
            run.stdout(),
            run.stderr()
        );
        run
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(needle), "stdout missing {:?}:\n{}", needle, stdout);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(needle), "stderr missing {:?}:\n{}", needle, stderr);
        self
    }

    pub fn stdout_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout()).unwrap()
    }
}

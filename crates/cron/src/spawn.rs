// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Detached dispatch of cron jobs into their own processes.

use std::ffi::OsString;
use std::io;
use std::os::unix::process::CommandExt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Starts a cron job without waiting for it
pub trait Spawner: Send + Sync {
    /// Launch the job named `identifier`, returning the child PID
    fn spawn(&self, identifier: &str) -> io::Result<u32>;
}

/// Re-invokes the current binary as `<exe> [args..] cron run <identifier>`
#[derive(Debug, Clone)]
pub struct ProcessSpawner {
    exe: PathBuf,
    leading_args: Vec<OsString>,
    envs: Vec<(OsString, OsString)>,
}

impl ProcessSpawner {
    pub fn new(exe: impl Into<PathBuf>) -> Self {
        Self { exe: exe.into(), leading_args: Vec::new(), envs: Vec::new() }
    }

    /// Use the running executable
    pub fn current() -> io::Result<Self> {
        Ok(Self::new(std::env::current_exe()?))
    }

    /// Arguments placed before `cron run`, e.g. `--config <path>`
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Environment variable set on every job process
    pub fn with_env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    fn command(&self, identifier: &str) -> Command {
        let mut cmd = Command::new(&self.exe);
        cmd.args(&self.leading_args).args(["cron", "run", identifier]);
        cmd.envs(self.envs.iter().map(|(k, v)| (k, v)));
        cmd
    }
}

impl Spawner for ProcessSpawner {
    fn spawn(&self, identifier: &str) -> io::Result<u32> {
        let mut child = self
            .command(identifier)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .process_group(0)
            .spawn()?;
        let pid = child.id();

        // Reap in the background so long-lived daemons don't collect zombies
        std::thread::spawn(move || {
            if let Err(e) = child.wait() {
                tracing::warn!(pid, error = %e, "failed to reap cron job");
            }
        });
        Ok(pid)
    }
}

#[cfg(test)]
#[path = "spawn_tests.rs"]
mod tests;

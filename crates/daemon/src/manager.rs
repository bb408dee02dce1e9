// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle: start, stop, status, foreground ownership.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{DaemonError, Lane, PidFile, ProcessControl};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "result")]
pub enum StartOutcome {
    Started { pid: u32 },
    AlreadyRunning { pid: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "result")]
pub enum StopOutcome {
    Stopped { pid: u32 },
    NotRunning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum DaemonStatus {
    Stopped,
    Running { pid: u32 },
    /// Lock file names a process that no longer exists
    Stale { pid: u32 },
}

pub struct DaemonManager<P: ProcessControl> {
    lane: Lane,
    pid_file: PidFile,
    process: P,
}

impl<P: ProcessControl> DaemonManager<P> {
    pub fn new(lane: Lane, state_dir: &Path, process: P) -> Self {
        let pid_file = PidFile::new(state_dir.join(lane.lock_file_name()));
        Self { lane, pid_file, process }
    }

    pub fn lock_path(&self) -> &Path {
        self.pid_file.path()
    }

    pub fn log_path(&self) -> PathBuf {
        self.pid_file.path().with_file_name(self.lane.log_file_name())
    }

    /// Launch the detached daemon unless one is already running.
    ///
    /// The PID file lock is held from the liveness check until the child's
    /// PID is written, so concurrent starts cannot both spawn.
    pub fn start(&self) -> Result<StartOutcome, DaemonError> {
        let mut locked = self.pid_file.lock()?;

        if let Some(pid) = locked.pid()? {
            if self.process.is_alive(pid) {
                tracing::info!(lane = %self.lane, pid, "daemon already running");
                return Ok(StartOutcome::AlreadyRunning { pid });
            }
            tracing::warn!(lane = %self.lane, pid, "reclaiming stale lock file");
        }

        if let Err(e) = self.process.check_capability() {
            locked.remove()?;
            return Err(e);
        }

        let pid = match self.process.spawn_daemon(self.lane) {
            Ok(pid) => pid,
            Err(source) => {
                locked.remove()?;
                return Err(DaemonError::Spawn { lane: self.lane, source });
            }
        };
        locked.write_pid(pid)?;
        tracing::info!(lane = %self.lane, pid, "daemon started");
        Ok(StartOutcome::Started { pid })
    }

    /// Signal the recorded daemon and drop the lock file. Does not wait for
    /// the process to exit.
    pub fn stop(&self) -> Result<StopOutcome, DaemonError> {
        let Some(pid) = self.pid_file.read()? else {
            return Ok(StopOutcome::NotRunning);
        };

        if self.process.terminate(pid)? {
            tracing::info!(lane = %self.lane, pid, "sent SIGTERM");
        } else {
            tracing::warn!(lane = %self.lane, pid, "daemon process was already gone");
        }
        self.pid_file.remove()?;
        Ok(StopOutcome::Stopped { pid })
    }

    pub fn status(&self) -> Result<DaemonStatus, DaemonError> {
        Ok(match self.pid_file.read()? {
            None => DaemonStatus::Stopped,
            Some(pid) if self.process.is_alive(pid) => DaemonStatus::Running { pid },
            Some(pid) => DaemonStatus::Stale { pid },
        })
    }

    /// Record `pid` as the lane owner for a foreground run.
    ///
    /// A file already naming `pid` (written by `start`) is accepted; a file
    /// naming another live process is an error.
    pub fn claim(&self, pid: u32) -> Result<(), DaemonError> {
        let mut locked = self.pid_file.lock()?;
        match locked.pid()? {
            Some(existing) if existing == pid => Ok(()),
            Some(existing) if self.process.is_alive(existing) => {
                Err(DaemonError::AlreadyRunning { lane: self.lane, pid: existing })
            }
            _ => locked.write_pid(pid),
        }
    }

    /// Drop the lock file if it still names `pid`
    pub fn release(&self, pid: u32) -> Result<(), DaemonError> {
        if !self.pid_file.remove_if_owned(pid)? {
            tracing::debug!(lane = %self.lane, pid, "lock file no longer ours, leaving it");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! OS process operations behind the daemon manager.

use std::ffi::OsString;
use std::io;
use std::os::unix::process::CommandExt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;

use crate::{DaemonError, Lane};

pub trait ProcessControl: Send + Sync {
    /// Fail if this host cannot run detached daemons
    fn check_capability(&self) -> Result<(), DaemonError>;

    /// Launch `<lane> daemon run` detached from the caller; returns its PID
    fn spawn_daemon(&self, lane: Lane) -> io::Result<u32>;

    /// Signal-0 liveness check
    fn is_alive(&self, pid: u32) -> bool;

    /// Send SIGTERM. `Ok(false)` if the process no longer exists.
    fn terminate(&self, pid: u32) -> Result<bool, DaemonError>;
}

/// Real processes: re-invokes `exe` for the daemon child
#[derive(Debug, Clone)]
pub struct SystemProcess {
    exe: PathBuf,
    leading_args: Vec<OsString>,
}

impl SystemProcess {
    pub fn new(exe: impl Into<PathBuf>) -> Self {
        Self { exe: exe.into(), leading_args: Vec::new() }
    }

    pub fn current() -> io::Result<Self> {
        Ok(Self::new(std::env::current_exe()?))
    }

    /// Arguments placed before the lane subcommand, e.g. `--config <path>`
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args.extend(args.into_iter().map(Into::into));
        self
    }

    fn command(&self, lane: Lane) -> Command {
        let mut cmd = Command::new(&self.exe);
        cmd.args(&self.leading_args).arg(lane.to_string()).args(["daemon", "run"]);
        cmd
    }
}

impl ProcessControl for SystemProcess {
    fn check_capability(&self) -> Result<(), DaemonError> {
        if !self.exe.is_file() {
            return Err(DaemonError::Unsupported(format!(
                "cannot re-execute {}",
                self.exe.display()
            )));
        }
        Ok(())
    }

    fn spawn_daemon(&self, lane: Lane) -> io::Result<u32> {
        // New process group so the child outlives the caller's terminal
        let child = self
            .command(lane)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .process_group(0)
            .spawn()?;
        Ok(child.id())
    }

    fn is_alive(&self, pid: u32) -> bool {
        let Some(pid) = to_pid(pid) else {
            return false;
        };
        matches!(kill(pid, None), Ok(()) | Err(Errno::EPERM))
    }

    fn terminate(&self, pid: u32) -> Result<bool, DaemonError> {
        let Some(target) = to_pid(pid) else {
            return Ok(false);
        };
        match kill(target, Signal::SIGTERM) {
            Ok(()) => Ok(true),
            Err(Errno::ESRCH) => Ok(false),
            Err(source) => Err(DaemonError::Signal { pid, source }),
        }
    }
}

fn to_pid(pid: u32) -> Option<Pid> {
    i32::try_from(pid).ok().filter(|p| *p > 0).map(Pid::from_raw)
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;

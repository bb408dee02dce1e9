// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ck <lane> daemon` - background lane management

use anyhow::Result;
use ck_core::SystemClock;
use ck_daemon::{
    cancel_on_signals, DaemonError, DaemonStatus, Lane, PollLoop, StartOutcome, StopOutcome,
};
use clap::{Args, Subcommand};
use tokio_util::sync::CancellationToken;

use crate::app::App;
use crate::exit_error::ExitError;
use crate::output::format_or_json;

#[derive(Args)]
pub struct DaemonArgs {
    #[command(subcommand)]
    pub command: DaemonCommand,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonCommand {
    /// Start the daemon in the background
    Start,
    /// Stop the daemon (SIGTERM)
    Stop,
    /// Check daemon status
    #[command(alias = "info")]
    Status,
    /// Run the poll loop in the foreground (used by `start` and systemd)
    Run,
}

/// Handle start/stop/status. `run` needs a lane-specific tick and goes
/// through [`run_foreground`].
pub fn manage(app: &App, lane: Lane, command: DaemonCommand) -> Result<()> {
    let manager = app.manager(lane)?;
    match command {
        DaemonCommand::Start => {
            let outcome = manager.start().map_err(daemon_error)?;
            format_or_json(app.format, &outcome, || match outcome {
                StartOutcome::Started { pid } => println!(
                    "{} daemon started (pid {}), logging to {}",
                    lane,
                    pid,
                    manager.log_path().display()
                ),
                StartOutcome::AlreadyRunning { pid } => {
                    println!("{} daemon already running (pid {})", lane, pid)
                }
            })
        }
        DaemonCommand::Stop => {
            let outcome = manager.stop().map_err(daemon_error)?;
            format_or_json(app.format, &outcome, || match outcome {
                StopOutcome::Stopped { pid } => println!("{} daemon stopped (pid {})", lane, pid),
                StopOutcome::NotRunning => println!("{} daemon not running", lane),
            })
        }
        DaemonCommand::Status => {
            let status = manager.status().map_err(daemon_error)?;
            format_or_json(app.format, &status, || match status {
                DaemonStatus::Running { pid } => println!("{} daemon running (pid {})", lane, pid),
                DaemonStatus::Stopped => println!("{} daemon not running", lane),
                DaemonStatus::Stale { pid } => {
                    println!("{} daemon not running (stale lock for pid {})", lane, pid)
                }
            })
        }
        DaemonCommand::Run => Err(ExitError::failure("daemon run needs a lane tick").into()),
    }
}

/// Claim the lane, poll until SIGTERM/SIGINT, release the lane
pub fn run_foreground(app: &App, lane: Lane, tick: impl FnMut()) -> Result<()> {
    let manager = app.manager(lane)?;
    let pid = std::process::id();
    manager.claim(pid).map_err(daemon_error)?;
    tracing::info!(%lane, pid, lock = %manager.lock_path().display(), "daemon running");

    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let result = runtime.block_on(async {
        let cancel = CancellationToken::new();
        cancel_on_signals(cancel.clone())?;
        PollLoop::new(lane, SystemClock).run(cancel, tick).await;
        Ok::<_, anyhow::Error>(())
    });

    manager.release(pid).map_err(daemon_error)?;
    result
}

fn daemon_error(err: DaemonError) -> anyhow::Error {
    ExitError::failure(err.to_string()).into()
}

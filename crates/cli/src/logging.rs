// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! tracing subscriber setup.
//!
//! Interactive commands log to stderr. Foreground daemons log to
//! `{state_dir}/{lane}_daemon.log`, and cron jobs spawned by a scheduler
//! pass append to `{state_dir}/cron_jobs.log`. File sinks go through a
//! non-blocking writer.

use std::io;
use std::path::Path;

use ck_daemon::Lane;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "warn,ck=info,ck_core=info,ck_queue=info,ck_cron=info,ck_daemon=info";

/// Shared by every job process a scheduler pass spawns
pub const JOB_LOG_FILE: &str = "cron_jobs.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Log to the lane's file. Keep the guard alive until exit so buffered
/// lines are flushed.
pub fn init_daemon_file(state_dir: &Path, lane: Lane) -> io::Result<WorkerGuard> {
    init_file(&state_dir.join(lane.log_file_name()))
}

/// Append to `path`, creating it and its directory if needed
pub fn init_file(path: &Path) -> io::Result<WorkerGuard> {
    let (Some(dir), Some(name)) = (path.parent(), path.file_name()) else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("log path {} has no file name", path.display()),
        ));
    };
    std::fs::create_dir_all(dir)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name.to_string_lossy())
        .build(dir)
        .map_err(io::Error::other)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
    Ok(guard)
}

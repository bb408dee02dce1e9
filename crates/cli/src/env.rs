// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::path::PathBuf;

/// Config file path (read by clap on `--config`)
pub const CONFIG_VAR: &str = "CK_CONFIG";

/// Override `[daemon] state_dir`
pub fn state_dir_override() -> Option<PathBuf> {
    non_empty("CK_STATE_DIR").map(PathBuf::from)
}

/// Override `[queue] broker`
pub fn broker_url_override() -> Option<String> {
    non_empty("CK_BROKER_URL")
}

/// Log file for a cron job process; set by the scheduler on the jobs it spawns
pub const JOB_LOG_VAR: &str = "CK_JOB_LOG";

pub fn job_log_override() -> Option<PathBuf> {
    non_empty(JOB_LOG_VAR).map(PathBuf::from)
}

/// Fallback state directory: XDG_STATE_HOME/ck > ~/.local/state/ck
pub fn default_state_dir() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".local/state")))
        .map(|dir| dir.join("ck"))
}

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;

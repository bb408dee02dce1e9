// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! systemd user units for running the lane daemons under the init system.

use std::path::{Path, PathBuf};

use crate::{DaemonError, Lane};

/// `$XDG_CONFIG_HOME/systemd/user`
pub fn default_unit_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("systemd").join("user"))
}

/// Render a `Type=simple` unit that runs `<lane> daemon run` in the foreground
pub fn render_unit(lane: Lane, exe: &Path, config: Option<&Path>) -> String {
    let mut command = quote(&exe.display().to_string());
    if let Some(config) = config {
        command.push_str(" --config ");
        command.push_str(&quote(&config.display().to_string()));
    }

    format!(
        "[Unit]\n\
         Description=chorekeeper {lane} daemon\n\
         After=network.target\n\
         \n\
         [Service]\n\
         Type=simple\n\
         ExecStart={command} {lane} daemon run\n\
         Restart=on-failure\n\
         RestartSec=5\n\
         KillSignal=SIGTERM\n\
         \n\
         [Install]\n\
         WantedBy=default.target\n"
    )
}

/// Write one unit per lane into `dir`, returning the written paths
pub fn write_units(dir: &Path, exe: &Path, config: Option<&Path>) -> Result<Vec<PathBuf>, DaemonError> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();
    for lane in Lane::ALL {
        let path = dir.join(lane.unit_name());
        std::fs::write(&path, render_unit(lane, exe, config))?;
        tracing::info!(path = %path.display(), "wrote systemd unit");
        written.push(path);
    }
    Ok(written)
}

fn quote(arg: &str) -> String {
    if arg.contains(|c: char| c.is_whitespace() || c == '"' || c == '\\') {
        format!("\"{}\"", arg.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        arg.to_string()
    }
}

#[cfg(test)]
#[path = "systemd_tests.rs"]
mod tests;

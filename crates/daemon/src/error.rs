// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use thiserror::Error;

use crate::Lane;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("background daemons are not supported here: {0}")]
    Unsupported(String),

    #[error("lock file {} does not contain a PID: {content:?}", path.display())]
    CorruptLock { path: PathBuf, content: String },

    #[error("{lane} daemon already running (pid {pid})")]
    AlreadyRunning { lane: Lane, pid: u32 },

    #[error("failed to spawn {lane} daemon: {source}")]
    Spawn {
        lane: Lane,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to signal pid {pid}: {source}")]
    Signal {
        pid: u32,
        #[source]
        source: nix::errno::Errno,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

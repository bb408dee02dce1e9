// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ck-daemon: background lane lifecycle
//!
//! Each [`Lane`] (cron or queue) runs as one detached process per host,
//! tracked by a PID lock file in the state directory. [`DaemonManager`]
//! starts, stops and reports on that process; [`PollLoop`] is what the
//! process runs in the foreground.

mod error;
mod lane;
mod lock;
mod manager;
mod poll;
mod process;
pub mod systemd;

pub use error::DaemonError;
pub use lane::Lane;
pub use lock::PidFile;
pub use manager::{DaemonManager, DaemonStatus, StartOutcome, StopOutcome};
pub use poll::{cancel_on_signals, PollLoop};
pub use process::{ProcessControl, SystemProcess};

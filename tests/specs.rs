// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for the `ck` binary.
//!
//! Each spec runs the real binary inside a temporary project directory with
//! its own state directory and config file.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/cli.rs"]
mod cli;
#[path = "specs/cron.rs"]
mod cron;
#[path = "specs/daemon.rs"]
mod daemon;
#[path = "specs/queue.rs"]
mod queue;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ck-cron: cron job discovery and dispatch
//!
//! Modules contribute [`CronJob`] definitions to a [`CronRegistry`]. Each
//! scheduler pass re-enumerates the registry, checks which jobs are due at
//! the current minute, and hands them to a [`Spawner`] so that every job runs
//! in its own detached process.

mod error;
mod job;
mod registry;
mod scheduler;
mod spawn;

pub use error::{CronError, CronJobError, DiscoveryError};
pub use job::{CronJob, CronModule, FnCronJob, RegisteredCronJob};
pub use registry::CronRegistry;
pub use scheduler::{CronJobInfo, CronRun, JobRunOutcome, PassReport, Scheduler};
pub use spawn::{ProcessSpawner, Spawner};

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ck-core: shared types for the chorekeeper queue and cron lanes

pub mod macros;

pub mod clock;
pub mod cron_expr;
pub mod job;
pub mod panic;
pub mod queue_key;

pub use clock::{Clock, FakeClock, SystemClock};
pub use cron_expr::{CronExpr, CronParseError};
pub use job::{JobRecord, JobRecordError};
pub use panic::panic_message;
pub use queue_key::{normalize_queue_name, InvalidPriority, Priority, QueueKey, DEFAULT_QUEUE};

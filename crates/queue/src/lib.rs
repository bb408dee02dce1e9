// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ck-queue: priority job queue over a list broker
//!
//! Producers [`QueueEngine::push`] job records onto one of five priority
//! sub-queues; workers call [`QueueEngine::run`] to drain them in strict
//! priority order, executing each record through the [`HandlerRegistry`].

mod broker;
mod engine;
mod error;
mod handlers;
mod redis_broker;
mod store;

pub use broker::{Broker, MemoryBroker};
#[cfg(any(test, feature = "test-support"))]
pub use broker::FailingBroker;
pub use engine::{DrainReport, QueueEngine, QueueEvent};
pub use error::{BrokerError, QueueError};
pub use handlers::{Handler, HandlerRegistry, JobError, JobOutcome};
pub use redis_broker::RedisBroker;
pub use store::QueueStore;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queue engine: push records, drain them in priority order.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use ck_core::{normalize_queue_name, panic_message, JobRecord, Priority, QueueKey};
use serde::Serialize;

use crate::{HandlerRegistry, JobOutcome, QueueError, QueueStore};

/// Counts from one `run` pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DrainReport {
    pub executed: usize,
    pub failed: usize,
}

/// Notifications for engine observers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueEvent {
    Pushed { queue: String, priority: Priority, target: String },
    Drained { queue: String, worker: u32, report: DrainReport },
}

type Observer = Box<dyn Fn(&QueueEvent) + Send + Sync>;

pub struct QueueEngine {
    store: QueueStore,
    handlers: Arc<HandlerRegistry>,
    observers: Vec<Observer>,
}

impl QueueEngine {
    pub fn new(store: QueueStore, handlers: Arc<HandlerRegistry>) -> Self {
        Self { store, handlers, observers: Vec::new() }
    }

    /// Register an observer called synchronously for every [`QueueEvent`]
    pub fn on_event(mut self, observer: impl Fn(&QueueEvent) + Send + Sync + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Append `record` to the tail of `queue` at `priority`.
    pub fn push(
        &self,
        record: &JobRecord,
        queue: &str,
        priority: Priority,
    ) -> Result<(), QueueError> {
        let key = self.store.key(normalize_queue_name(queue), priority);
        self.store.push(&key, record.to_wire()?)?;
        tracing::debug!(%key, job = %record.target, "pushed job");
        self.emit(QueueEvent::Pushed {
            queue: key.queue().to_string(),
            priority,
            target: record.target.clone(),
        });
        Ok(())
    }

    /// Drain every priority of `queue`, highest first.
    ///
    /// Priority N is empty (as seen by this worker) before N+1 is touched.
    /// Job failures are logged and dropped; only broker failures abort.
    pub fn run(&self, queue: &str, worker: u32) -> Result<DrainReport, QueueError> {
        let queue = normalize_queue_name(queue);
        let mut report = DrainReport::default();

        for priority in Priority::ALL {
            let key = self.store.key(queue, priority);
            let pending = self.store.len(&key)?;
            tracing::debug!(%key, pending, worker, "draining");

            while let Some(raw) = self.store.pop(&key)? {
                match self.execute(&raw) {
                    Ok(()) => report.executed += 1,
                    Err(_) => report.failed += 1,
                }
            }
        }

        tracing::debug!(queue, worker, executed = report.executed, failed = report.failed, "worker done");
        self.emit(QueueEvent::Drained { queue: queue.to_string(), worker, report });
        Ok(report)
    }

    /// Delete all five priority lists of `queue`
    pub fn clear(&self, queue: &str) -> Result<(), QueueError> {
        let queue = normalize_queue_name(queue);
        for key in QueueKey::all(self.store.prefix(), queue) {
            self.store.delete(&key)?;
        }
        tracing::info!(queue, "cleared queue");
        Ok(())
    }

    /// Pending element count per priority, index 0 = priority 1
    pub fn lengths(&self, queue: &str) -> Result<[usize; 5], QueueError> {
        let queue = normalize_queue_name(queue);
        let mut lengths = [0; 5];
        for (slot, priority) in lengths.iter_mut().zip(Priority::ALL) {
            *slot = self.store.len(&self.store.key(queue, priority))?;
        }
        Ok(lengths)
    }

    /// Run one popped record. Every failure is logged here, once.
    fn execute(&self, raw: &str) -> Result<(), QueueError> {
        let record = JobRecord::from_wire(raw).inspect_err(|e| {
            tracing::error!(raw, error = %e, "dropping malformed job record");
        })?;
        let args = serde_json::Value::Array(record.arguments.clone());
        let Some(handler) = self.handlers.get(&record.target) else {
            tracing::error!(job = %record.target, %args, "no handler registered for job");
            return Err(QueueError::UnknownJobTarget(record.target));
        };

        match panic::catch_unwind(AssertUnwindSafe(|| handler(&record.arguments))) {
            Ok(Ok(JobOutcome::Completed)) => Ok(()),
            Ok(Ok(JobOutcome::Rejected)) => {
                tracing::error!(job = %record.target, %args, "job returned false");
                Err(QueueError::Rejected(record.target))
            }
            Ok(Err(e)) => {
                tracing::error!(job = %record.target, %args, error = %e, "job raised an error");
                Err(QueueError::Handler { target: record.target, message: e.to_string() })
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::error!(job = %record.target, %args, %message, "job panicked");
                Err(QueueError::Panicked { target: record.target, message })
            }
        }
    }

    fn emit(&self, event: QueueEvent) {
        for observer in &self.observers {
            observer(&event);
        }
    }
}

impl std::fmt::Debug for QueueEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueueEngine")
            .field("store", &self.store)
            .field("handlers", &self.handlers)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;

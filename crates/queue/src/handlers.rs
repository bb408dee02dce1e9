// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job target registry.
//!
//! Each job record names a target string; workers resolve it here to a
//! typed handler taking the record's positional arguments.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

/// Result of a handler that ran to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    Completed,
    /// The handler reported failure without raising an error
    Rejected,
}

impl From<bool> for JobOutcome {
    fn from(ok: bool) -> Self {
        if ok {
            JobOutcome::Completed
        } else {
            JobOutcome::Rejected
        }
    }
}

impl From<()> for JobOutcome {
    fn from(_: ()) -> Self {
        JobOutcome::Completed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct JobError(pub String);

impl JobError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<std::io::Error> for JobError {
    fn from(e: std::io::Error) -> Self {
        Self(e.to_string())
    }
}

impl From<serde_json::Error> for JobError {
    fn from(e: serde_json::Error) -> Self {
        Self(e.to_string())
    }
}

pub type Handler = Arc<dyn Fn(&[Value]) -> Result<JobOutcome, JobError> + Send + Sync>;

#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: BTreeMap<String, Handler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `target`, replacing any earlier registration.
    ///
    /// Handlers may return anything convertible to [`JobOutcome`], so
    /// `Ok(())` and `Ok(bool)` bodies both work.
    pub fn register<F, O>(&mut self, target: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&[Value]) -> Result<O, JobError> + Send + Sync + 'static,
        O: Into<JobOutcome>,
    {
        let handler: Handler =
            Arc::new(move |args: &[Value]| handler(args).map(Into::<JobOutcome>::into));
        self.handlers.insert(target.into(), handler);
        self
    }

    pub fn get(&self, target: &str) -> Option<&Handler> {
        self.handlers.get(target)
    }

    pub fn contains(&self, target: &str) -> bool {
        self.handlers.contains_key(target)
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;

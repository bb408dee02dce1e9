// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CronError {
    #[error("unknown cron job '{0}'")]
    UnknownJob(String),
}

/// Error raised by a cron job body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct CronJobError(pub String);

impl CronJobError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<std::io::Error> for CronJobError {
    fn from(e: std::io::Error) -> Self {
        Self(e.to_string())
    }
}

/// A module could not enumerate its jobs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("module '{module}' failed to list cron jobs: {message}")]
pub struct DiscoveryError {
    pub module: String,
    pub message: String,
}

impl DiscoveryError {
    pub fn new(module: impl Into<String>, message: impl Into<String>) -> Self {
        Self { module: module.into(), message: message.into() }
    }
}

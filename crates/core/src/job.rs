// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queued unit of work and its broker wire format.
//!
//! A record names a registered handler (`target`) and the ordered arguments
//! to call it with. On the broker it is stored as a JSON object:
//! `{"method": "<target>", "args": [...]}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobRecordError {
    #[error("job target must not be empty")]
    EmptyTarget,

    #[error("malformed job record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A serializable job: handler name plus positional arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(rename = "method")]
    pub target: String,
    #[serde(rename = "args", default)]
    pub arguments: Vec<Value>,
}

impl JobRecord {
    pub fn new(target: impl Into<String>, arguments: Vec<Value>) -> Result<Self, JobRecordError> {
        let target = target.into();
        if target.trim().is_empty() {
            return Err(JobRecordError::EmptyTarget);
        }
        Ok(Self { target, arguments })
    }

    /// Serialize to the broker wire format
    pub fn to_wire(&self) -> Result<String, JobRecordError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a broker element, enforcing the non-empty target invariant
    pub fn from_wire(raw: &str) -> Result<Self, JobRecordError> {
        let record: JobRecord = serde_json::from_str(raw)?;
        if record.target.trim().is_empty() {
            return Err(JobRecordError::EmptyTarget);
        }
        Ok(record)
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;

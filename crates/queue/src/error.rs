// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queue and broker error types.

use ck_core::JobRecordError;
use thiserror::Error;

/// Failures talking to the broker
#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("broker connection failed: {0}")]
    Connection(String),

    #[error("broker {op} failed on '{key}': {message}")]
    Command { op: &'static str, key: String, message: String },
}

#[derive(Debug, Error)]
pub enum QueueError {
    #[error(transparent)]
    Broker(#[from] BrokerError),

    #[error(transparent)]
    Record(#[from] JobRecordError),

    #[error("no handler registered for job target '{0}'")]
    UnknownJobTarget(String),

    #[error("job '{target}' failed: {message}")]
    Handler { target: String, message: String },

    #[error("job '{0}' returned false")]
    Rejected(String),

    #[error("job '{target}' panicked: {message}")]
    Panicked { target: String, message: String },
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors that carry a process exit status.
//!
//! Commands return `ExitError` through `anyhow` and `main()` turns it into
//! the exit code: 2 for precondition failures, 1 for everything else.

use std::fmt;

/// Bad input or unmet precondition (unknown job id, malformed argument)
pub const PRECONDITION: i32 = 2;

/// Capability or runtime failure
pub const FAILURE: i32 = 1;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Self::new(PRECONDITION, message)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(FAILURE, message)
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

/// Exit code for an error returned from a command
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<ExitError>().map_or(FAILURE, |e| e.code)
}

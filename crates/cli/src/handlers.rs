// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job targets shipped with the `ck` binary.

use std::process::{Command, Stdio};

use ck_queue::{HandlerRegistry, JobError};
use serde_json::Value;

pub fn builtin() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry.register("noop", |_| Ok(())).register("log", log).register("shell", shell);
    registry
}

fn log(args: &[Value]) -> Result<(), JobError> {
    let args = Value::Array(args.to_vec());
    tracing::info!(args = %args, "log job");
    Ok(())
}

/// `args[0]` through `sh -c`; a non-zero exit reports failure
fn shell(args: &[Value]) -> Result<bool, JobError> {
    let Some(command) = args.first().and_then(Value::as_str) else {
        return Err(JobError::new("shell job expects a command string as its first argument"));
    };
    let status = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .status()?;
    if !status.success() {
        tracing::warn!(command, %status, "shell job exited non-zero");
    }
    Ok(status.success())
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;

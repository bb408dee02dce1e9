// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Priority levels and broker keys for named queues.
//!
//! Every named queue is split into five FIFO sub-queues, one per priority.
//! The broker key for a sub-queue is `{prefix}-{queue}-p{priority}`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Queue name used when the caller does not give one
pub const DEFAULT_QUEUE: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid priority {0}: expected 1 (highest) through 5 (lowest)")]
pub struct InvalidPriority(pub String);

/// Sub-queue priority, 1 (highest) through 5 (lowest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    pub const HIGHEST: Priority = Priority(1);
    pub const LOWEST: Priority = Priority(5);

    /// All priorities in drain order
    pub const ALL: [Priority; 5] = [Priority(1), Priority(2), Priority(3), Priority(4), Priority(5)];

    pub fn new(level: u8) -> Result<Self, InvalidPriority> {
        if (Self::HIGHEST.0..=Self::LOWEST.0).contains(&level) {
            Ok(Self(level))
        } else {
            Err(InvalidPriority(level.to_string()))
        }
    }

    pub fn level(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority(3)
    }
}

impl TryFrom<u8> for Priority {
    type Error = InvalidPriority;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> u8 {
        p.0
    }
}

impl FromStr for Priority {
    type Err = InvalidPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().strip_prefix('p').unwrap_or(s.trim());
        digits
            .parse::<u8>()
            .ok()
            .and_then(|n| Self::new(n).ok())
            .ok_or_else(|| InvalidPriority(s.to_string()))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Map an empty queue name to [`DEFAULT_QUEUE`]
pub fn normalize_queue_name(name: &str) -> &str {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        DEFAULT_QUEUE
    } else {
        trimmed
    }
}

/// Broker key of one priority sub-queue
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueueKey {
    prefix: String,
    queue: String,
    priority: Priority,
}

impl QueueKey {
    pub fn new(prefix: &str, queue: &str, priority: Priority) -> Self {
        Self {
            prefix: prefix.to_string(),
            queue: normalize_queue_name(queue).to_string(),
            priority,
        }
    }

    pub fn queue(&self) -> &str {
        &self.queue
    }

    /// Keys for every priority of a queue, in drain order
    pub fn all<'a>(prefix: &'a str, queue: &'a str) -> impl Iterator<Item = QueueKey> + 'a {
        Priority::ALL.into_iter().map(move |p| QueueKey::new(prefix, queue, p))
    }
}

impl fmt::Display for QueueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prefix.is_empty() {
            write!(f, "{}-p{}", self.queue, self.priority)
        } else {
            write!(f, "{}-{}-p{}", self.prefix, self.queue, self.priority)
        }
    }
}

#[cfg(test)]
#[path = "queue_key_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Broker contract: named FIFO lists with atomic head pop.

use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;

use crate::BrokerError;

/// List operations the queue needs from a key/value broker.
///
/// `pop` must be atomic: when several workers pop the same key concurrently,
/// each element is handed to exactly one of them.
pub trait Broker: Send + Sync {
    /// Append to the tail of the list at `key`
    fn push(&self, key: &str, value: String) -> Result<(), BrokerError>;

    /// Remove and return the head of the list at `key`
    fn pop(&self, key: &str) -> Result<Option<String>, BrokerError>;

    fn len(&self, key: &str) -> Result<usize, BrokerError>;

    /// Drop the whole list at `key`
    fn delete(&self, key: &str) -> Result<(), BrokerError>;
}

/// In-process broker, shared between threads
#[derive(Debug, Default)]
pub struct MemoryBroker {
    lists: Mutex<HashMap<String, VecDeque<String>>>,
}

impl MemoryBroker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Broker for MemoryBroker {
    fn push(&self, key: &str, value: String) -> Result<(), BrokerError> {
        self.lists.lock().entry(key.to_string()).or_default().push_back(value);
        Ok(())
    }

    fn pop(&self, key: &str) -> Result<Option<String>, BrokerError> {
        let mut lists = self.lists.lock();
        let Some(list) = lists.get_mut(key) else {
            return Ok(None);
        };
        let head = list.pop_front();
        if list.is_empty() {
            lists.remove(key);
        }
        Ok(head)
    }

    fn len(&self, key: &str) -> Result<usize, BrokerError> {
        Ok(self.lists.lock().get(key).map_or(0, VecDeque::len))
    }

    fn delete(&self, key: &str) -> Result<(), BrokerError> {
        self.lists.lock().remove(key);
        Ok(())
    }
}

/// Broker whose every call fails, for exercising error paths
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct FailingBroker;

#[cfg(any(test, feature = "test-support"))]
impl Broker for FailingBroker {
    fn push(&self, _key: &str, _value: String) -> Result<(), BrokerError> {
        Err(BrokerError::Connection("connection refused".to_string()))
    }

    fn pop(&self, _key: &str) -> Result<Option<String>, BrokerError> {
        Err(BrokerError::Connection("connection refused".to_string()))
    }

    fn len(&self, _key: &str) -> Result<usize, BrokerError> {
        Err(BrokerError::Connection("connection refused".to_string()))
    }

    fn delete(&self, _key: &str) -> Result<(), BrokerError> {
        Err(BrokerError::Connection("connection refused".to_string()))
    }
}

#[cfg(test)]
#[path = "broker_tests.rs"]
mod tests;

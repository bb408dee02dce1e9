// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Priority-keyed view over a [`Broker`].

use std::sync::Arc;

use ck_core::{Priority, QueueKey};

use crate::{Broker, BrokerError};

/// Maps `(queue, priority)` pairs onto broker list keys under a fixed prefix
#[derive(Clone)]
pub struct QueueStore {
    broker: Arc<dyn Broker>,
    prefix: String,
}

impl QueueStore {
    pub fn new(broker: Arc<dyn Broker>, prefix: impl Into<String>) -> Self {
        Self { broker, prefix: prefix.into() }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn key(&self, queue: &str, priority: Priority) -> QueueKey {
        QueueKey::new(&self.prefix, queue, priority)
    }

    pub fn push(&self, key: &QueueKey, value: String) -> Result<(), BrokerError> {
        self.broker.push(&key.to_string(), value)
    }

    pub fn pop(&self, key: &QueueKey) -> Result<Option<String>, BrokerError> {
        self.broker.pop(&key.to_string())
    }

    pub fn len(&self, key: &QueueKey) -> Result<usize, BrokerError> {
        self.broker.len(&key.to_string())
    }

    pub fn delete(&self, key: &QueueKey) -> Result<(), BrokerError> {
        self.broker.delete(&key.to_string())
    }
}

impl std::fmt::Debug for QueueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueueStore").field("prefix", &self.prefix).finish_non_exhaustive()
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builds queue engines from `[queue]` settings.

use std::sync::Arc;

use ck_queue::{Broker, HandlerRegistry, MemoryBroker, QueueEngine, QueueError, QueueStore, RedisBroker};

use crate::config::{QueueSettings, MEMORY_BROKER};

#[derive(Clone)]
enum BrokerSource {
    /// One broker shared by every engine this connector builds
    Shared(Arc<dyn Broker>),
    /// Connect on demand
    Redis(String),
}

#[derive(Clone)]
pub struct QueueConnector {
    source: BrokerSource,
    prefix: String,
    handlers: Arc<HandlerRegistry>,
}

impl QueueConnector {
    pub fn from_settings(settings: &QueueSettings, handlers: Arc<HandlerRegistry>) -> Self {
        let source = if settings.broker == MEMORY_BROKER {
            BrokerSource::Shared(Arc::new(MemoryBroker::new()))
        } else {
            BrokerSource::Redis(settings.broker.clone())
        };
        Self { source, prefix: settings.prefix.clone(), handlers }
    }

    pub fn with_broker(
        broker: Arc<dyn Broker>,
        prefix: impl Into<String>,
        handlers: Arc<HandlerRegistry>,
    ) -> Self {
        Self { source: BrokerSource::Shared(broker), prefix: prefix.into(), handlers }
    }

    pub fn connect(&self) -> Result<QueueEngine, QueueError> {
        let broker: Arc<dyn Broker> = match &self.source {
            BrokerSource::Shared(broker) => Arc::clone(broker),
            BrokerSource::Redis(url) => Arc::new(RedisBroker::connect(url)?),
        };
        Ok(QueueEngine::new(QueueStore::new(broker, &self.prefix), Arc::clone(&self.handlers)))
    }
}

impl std::fmt::Debug for QueueConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source = match &self.source {
            BrokerSource::Shared(_) => "shared",
            BrokerSource::Redis(url) => url.as_str(),
        };
        f.debug_struct("QueueConnector").field("source", &source).field("prefix", &self.prefix).finish()
    }
}

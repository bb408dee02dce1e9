// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Redis-backed broker (RPUSH / LPOP / LLEN / DEL).

use parking_lot::Mutex;
use redis::{Commands, RedisError};

use crate::{Broker, BrokerError};

pub struct RedisBroker {
    conn: Mutex<redis::Connection>,
}

impl RedisBroker {
    /// Open a connection to `url` (e.g. `redis://127.0.0.1/`)
    pub fn connect(url: &str) -> Result<Self, BrokerError> {
        let client =
            redis::Client::open(url).map_err(|e| BrokerError::Connection(e.to_string()))?;
        let conn = client.get_connection().map_err(|e| BrokerError::Connection(e.to_string()))?;
        tracing::debug!(url, "connected to redis broker");
        Ok(Self { conn: Mutex::new(conn) })
    }
}

fn command_error<'a>(
    op: &'static str,
    key: &'a str,
) -> impl FnOnce(RedisError) -> BrokerError + 'a {
    move |e| {
        if e.is_connection_refusal() || e.is_connection_dropped() || e.is_io_error() {
            BrokerError::Connection(e.to_string())
        } else {
            BrokerError::Command { op, key: key.to_string(), message: e.to_string() }
        }
    }
}

impl Broker for RedisBroker {
    fn push(&self, key: &str, value: String) -> Result<(), BrokerError> {
        let _: i64 = self.conn.lock().rpush(key, value).map_err(command_error("RPUSH", key))?;
        Ok(())
    }

    fn pop(&self, key: &str) -> Result<Option<String>, BrokerError> {
        self.conn.lock().lpop(key, None).map_err(command_error("LPOP", key))
    }

    fn len(&self, key: &str) -> Result<usize, BrokerError> {
        self.conn.lock().llen(key).map_err(command_error("LLEN", key))
    }

    fn delete(&self, key: &str) -> Result<(), BrokerError> {
        let _: i64 = self.conn.lock().del(key).map_err(command_error("DEL", key))?;
        Ok(())
    }
}

impl std::fmt::Debug for RedisBroker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBroker").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "redis_broker_tests.rs"]
mod tests;

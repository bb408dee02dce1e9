// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ck_queue::{Broker, FailingBroker, HandlerRegistry, MemoryBroker, QueueStore};
use serde_json::json;
use std::cell::Cell;
use std::sync::Arc;

#[test]
fn arguments_parse_as_json_values() {
    let raw = vec!["1".to_string(), "\"x\"".to_string(), "true".to_string(), "{\"a\": [1]}".to_string()];
    assert_eq!(
        parse_arguments(&raw).unwrap(),
        vec![json!(1), json!("x"), json!(true), json!({"a": [1]})]
    );
}

#[test]
fn bare_words_are_a_precondition_failure() {
    let err = parse_arguments(&["hello".to_string()]).unwrap_err();
    assert_eq!(err.code, crate::exit_error::PRECONDITION);
    assert!(err.message.contains("hello"));
}

#[test]
fn no_arguments_is_fine() {
    assert!(parse_arguments(&[]).unwrap().is_empty());
}

fn engine_over(broker: Arc<dyn Broker>) -> QueueEngine {
    let mut handlers = HandlerRegistry::new();
    handlers.register("noop", |_| Ok(()));
    QueueEngine::new(QueueStore::new(broker, "ck"), Arc::new(handlers))
}

fn push_noop(broker: &Arc<MemoryBroker>) {
    let record = JobRecord::new("noop", vec![]).unwrap();
    engine_over(Arc::clone(broker) as Arc<dyn Broker>)
        .push(&record, "default", Priority::default())
        .unwrap();
}

#[test]
fn drainer_reconnects_after_a_lost_connection() {
    let memory = Arc::new(MemoryBroker::new());
    let connects = Cell::new(0);
    let mut drainer = Drainer::new("default".to_string(), || {
        connects.set(connects.get() + 1);
        if connects.get() == 1 {
            Ok(engine_over(Arc::new(FailingBroker) as Arc<dyn Broker>))
        } else {
            Ok(engine_over(Arc::clone(&memory) as Arc<dyn Broker>))
        }
    });

    assert!(matches!(drainer.tick(), Err(QueueError::Broker(BrokerError::Connection(_)))));
    assert_eq!(connects.get(), 1);

    push_noop(&memory);
    assert_eq!(drainer.tick().unwrap(), DrainReport { executed: 1, failed: 0 });
    assert_eq!(connects.get(), 2);

    push_noop(&memory);
    assert_eq!(drainer.tick().unwrap(), DrainReport { executed: 1, failed: 0 });
    assert_eq!(connects.get(), 2, "healthy engine is reused");
}

#[test]
fn drainer_retries_a_refused_connect() {
    let memory = Arc::new(MemoryBroker::new());
    let connects = Cell::new(0);
    let mut drainer = Drainer::new("default".to_string(), || {
        connects.set(connects.get() + 1);
        if connects.get() == 1 {
            return Err(QueueError::Broker(BrokerError::Connection("refused".to_string())));
        }
        Ok(engine_over(Arc::clone(&memory) as Arc<dyn Broker>))
    });

    assert!(drainer.tick().is_err());
    push_noop(&memory);
    assert_eq!(drainer.tick().unwrap().executed, 1);
    assert_eq!(connects.get(), 2);
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ck queue` against the in-process broker and an unreachable redis.

use similar_asserts::assert_eq;

use crate::prelude::*;

#[test]
fn status_of_an_empty_queue_lists_every_priority() {
    let project = Project::with_config(MEMORY_CONFIG);
    project
        .ck()
        .args(&["queue", "status"])
        .passes()
        .stdout_has("default")
        .stdout_has("p1  0")
        .stdout_has("p5  0");
}

#[test]
fn status_json_reports_lengths() {
    let project = Project::with_config(MEMORY_CONFIG);
    let run = project.ck().args(&["queue", "status", "--name", "mail", "-o", "json"]).passes();
    assert_eq!(
        run.stdout_json(),
        serde_json::json!({ "queue": "mail", "lengths": [0, 0, 0, 0, 0] })
    );
}

#[test]
fn push_reports_queue_and_default_priority() {
    let project = Project::with_config(MEMORY_CONFIG);
    project
        .ck()
        .args(&["queue", "push", "noop", "1", "\"two\""])
        .passes()
        .stdout_has("Pushed 'noop' to default (priority 3)");
}

#[test]
fn push_json_output() {
    let project = Project::with_config(MEMORY_CONFIG);
    let run = project
        .ck()
        .args(&["queue", "push", "log", "--name", "Mail", "-p", "1", "-o", "json"])
        .passes();
    assert_eq!(
        run.stdout_json(),
        serde_json::json!({ "queue": "Mail", "priority": 1, "target": "log" })
    );
}

#[test]
fn priority_out_of_range_is_rejected() {
    let project = Project::with_config(MEMORY_CONFIG);
    project.ck().args(&["queue", "push", "noop", "--priority", "6"]).exits(2);
}

#[test]
fn non_json_argument_is_rejected() {
    let project = Project::with_config(MEMORY_CONFIG);
    project
        .ck()
        .args(&["queue", "push", "noop", "not json"])
        .exits(2)
        .stderr_has("not valid JSON");
}

#[test]
fn run_on_an_empty_queue_drains_nothing() {
    let project = Project::with_config(MEMORY_CONFIG);
    project
        .ck()
        .args(&["queue", "run", "--worker", "3"])
        .passes()
        .stdout_has("Drained default: 0 executed, 0 failed");
}

#[test]
fn clear_passes() {
    let project = Project::with_config(MEMORY_CONFIG);
    project.ck().args(&["queue", "clear", "--name", "mail"]).passes().stdout_has("Cleared mail");
}

#[test]
fn unreachable_broker_is_a_failure() {
    let project = Project::empty();
    project
        .ck()
        .env("CK_BROKER_URL", "redis://127.0.0.1:1/")
        .args(&["queue", "status"])
        .exits(1)
        .stderr_has("Error:");
}

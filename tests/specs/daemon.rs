// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ck <lane> daemon` start/stop/status against real processes.

use std::time::{Duration, Instant};

use serial_test::serial;

use crate::prelude::*;

/// Never a live process: above any Linux pid_max
const DEAD_PID: &str = "2147483646";

#[test]
fn status_when_never_started() {
    let project = Project::with_config(MEMORY_CONFIG);
    project.ck().args(&["cron", "daemon", "status"]).passes().stdout_has("cron daemon not running");
    project.ck().args(&["queue", "daemon", "info"]).passes().stdout_has("queue daemon not running");
}

#[test]
fn stop_when_not_running_is_a_no_op() {
    let project = Project::with_config(MEMORY_CONFIG);
    project.ck().args(&["queue", "daemon", "stop"]).passes().stdout_has("not running");
}

#[test]
fn stale_lock_is_reported() {
    let project = Project::with_config(MEMORY_CONFIG);
    project.file("state/cron_daemon.lock", &format!("{}\n", DEAD_PID));
    project
        .ck()
        .args(&["cron", "daemon", "status"])
        .passes()
        .stdout_has(&format!("stale lock for pid {}", DEAD_PID));
}

#[test]
fn stale_lock_is_cleared_by_stop() {
    let project = Project::with_config(MEMORY_CONFIG);
    project.file("state/queue_daemon.lock", &format!("{}\n", DEAD_PID));
    project
        .ck()
        .args(&["queue", "daemon", "stop"])
        .passes()
        .stdout_has(&format!("queue daemon stopped (pid {})", DEAD_PID));
    assert!(!project.state_dir().join("queue_daemon.lock").exists());
    project.ck().args(&["queue", "daemon", "status"]).passes().stdout_has("not running");
}

#[test]
fn corrupt_lock_is_a_failure() {
    let project = Project::with_config(MEMORY_CONFIG);
    project.file("state/cron_daemon.lock", "not-a-pid\n");
    project.ck().args(&["cron", "daemon", "status"]).exits(1).stderr_has("cron_daemon.lock");
}

fn wait_until_gone(project: &Project, lock: &str) {
    let path = project.state_dir().join(lock);
    let start = Instant::now();
    while path.exists() && start.elapsed() < Duration::from_secs(5) {
        std::thread::sleep(Duration::from_millis(50));
    }
}

#[test]
#[serial]
fn queue_daemon_lifecycle() {
    let project = Project::with_config(MEMORY_CONFIG);

    project.ck().args(&["queue", "daemon", "start"]).passes().stdout_has("queue daemon started");
    project.ck().args(&["queue", "daemon", "status"]).passes().stdout_has("queue daemon running");
    project
        .ck()
        .args(&["queue", "daemon", "start"])
        .passes()
        .stdout_has("queue daemon already running");

    let status = project.ck().args(&["queue", "daemon", "status", "-o", "json"]).passes();
    assert_eq!(status.stdout_json()["state"], "running");

    project.ck().args(&["queue", "daemon", "stop"]).passes().stdout_has("queue daemon stopped");
    wait_until_gone(&project, "queue_daemon.lock");
    project.ck().args(&["queue", "daemon", "status"]).passes().stdout_has("not running");
}

#[test]
#[serial]
fn cron_daemon_writes_its_log_file() {
    let project = Project::with_config(MEMORY_CONFIG);

    project
        .ck()
        .args(&["cron", "daemon", "start"])
        .passes()
        .stdout_has("cron daemon started")
        .stdout_has("cron_daemon.log");
    let log = project.state_dir().join("cron_daemon.log");
    let start = Instant::now();
    while !log.exists() && start.elapsed() < Duration::from_secs(5) {
        std::thread::sleep(Duration::from_millis(50));
    }
    project.ck().args(&["cron", "daemon", "stop"]).passes().stdout_has("cron daemon stopped");
    assert!(log.exists(), "no daemon log at {}", log.display());
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ck cron` run, info and systemd unit generation.

use std::time::Duration;

use crate::prelude::*;

const JOBS: &str = r#"
[queue]
broker = "memory"

[[cron.job]]
name = "Nightly"
schedule = "0 2 * * *"
shell = "true"

[[cron.job]]
id = "touch"
name = "Touch a file"
schedule = "* * * * *"
shell = "touch ran.txt"

[[cron.job]]
module = "reports"
id = "broken"
name = "Always fails"
schedule = "0 0 1 1 *"
shell = "exit 3"
"#;

#[test]
fn info_without_jobs_says_so() {
    let project = Project::with_config(MEMORY_CONFIG);
    project.ck().args(&["cron", "info"]).passes().stdout_has("No cron jobs configured");
}

#[test]
fn info_lists_discovered_jobs() {
    let project = Project::with_config(JOBS);
    project
        .ck()
        .args(&["cron", "info"])
        .passes()
        .stdout_has("JOB")
        .stdout_has("app.nightly")
        .stdout_has("0 2 * * *")
        .stdout_has("app.touch")
        .stdout_has("reports.broken");
}

#[test]
fn info_json_has_previous_and_next() {
    let project = Project::with_config(JOBS);
    let json = project.ck().args(&["cron", "info", "-o", "json"]).passes().stdout_json();
    let jobs = json.as_array().unwrap();
    assert_eq!(jobs.len(), 3);
    let nightly = &jobs[0];
    assert_eq!(nightly["identifier"], "app.nightly");
    assert!(nightly["next"].is_string(), "{}", nightly);
    assert!(nightly["previous"].is_string(), "{}", nightly);
}

#[test]
fn run_single_job_executes_in_process() {
    let project = Project::with_config(JOBS);
    project.ck().args(&["cron", "run", "app.touch"]).passes().stdout_has("Job succeeded");
    assert!(project.path().join("ran.txt").exists());
}

#[test]
fn run_single_unsuccessful_job_still_passes() {
    let project = Project::with_config(JOBS);
    project
        .ck()
        .args(&["cron", "run", "reports.broken"])
        .passes()
        .stdout_has("Job exited unsuccessfully");
}

#[test]
fn run_unknown_job_is_a_precondition_error() {
    let project = Project::with_config(JOBS);
    project.ck().args(&["cron", "run", "app.nope"]).exits(2).stderr_has("app.nope");
}

#[test]
fn run_pass_dispatches_due_jobs_in_subprocesses() {
    let project = Project::with_config(JOBS);
    project.ck().args(&["cron", "run"]).passes().stdout_has("of 3 jobs");
    assert!(
        project.wait_for_file("ran.txt", Duration::from_secs(5)),
        "every-minute job never ran"
    );
}

#[test]
fn systemd_units_are_written_for_both_lanes() {
    let project = Project::with_config(MEMORY_CONFIG);
    let units = project.path().join("units");
    project
        .ck()
        .args(&["cron", "info", "systemd", "--dir"])
        .args(&[units.to_str().unwrap()])
        .passes()
        .stdout_has("ck-cron.service")
        .stdout_has("ck-queue.service");

    let cron_unit = std::fs::read_to_string(units.join("ck-cron.service")).unwrap();
    assert!(cron_unit.contains("cron daemon run"), "{}", cron_unit);
    assert!(cron_unit.contains("ck.toml"), "{}", cron_unit);
    assert!(units.join("ck-queue.service").exists());
}

#[test]
fn spawned_jobs_log_to_the_state_dir() {
    let project = Project::with_config(
        r#"
[queue]
broker = "memory"

[[cron.job]]
id = "flaky"
name = "Flaky"
schedule = "* * * * *"
shell = "touch ran.txt; exit 3"
"#,
    );
    project.ck().args(&["cron", "run"]).passes().stdout_has("Dispatched 1 of 1 jobs");
    assert!(project.wait_for_file("ran.txt", Duration::from_secs(5)), "job never ran");

    let log = project.state_dir().join("cron_jobs.log");
    let content = project.wait_for_content(&log, "exited unsuccessfully", Duration::from_secs(5));
    assert!(content.contains("exited unsuccessfully"), "{}:\n{}", log.display(), content);
    assert!(content.contains("app.flaky"), "{}", content);
}

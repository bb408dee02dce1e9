// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Top-level CLI behavior: help, version, config errors.

use crate::prelude::*;

#[test]
fn help_lists_both_subsystems() {
    cli().args(&["--help"]).passes().stdout_has("queue").stdout_has("cron");
}

#[test]
fn version_prints_the_crate_version() {
    cli().args(&["--version"]).passes().stdout_has(env!("CARGO_PKG_VERSION"));
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    cli().args(&["frobnicate"]).exits(2);
}

#[test]
fn missing_explicit_config_is_a_precondition_error() {
    cli()
        .args(&["--config", "nope.toml", "queue", "status"])
        .exits(2)
        .stderr_has("not found");
}

#[test]
fn invalid_config_is_a_precondition_error() {
    let project = Project::with_config("[queue]\nbrokr = \"memory\"\n");
    project.ck().args(&["queue", "status"]).exits(2).stderr_has("invalid config");
}

#[test]
fn config_env_var_selects_the_file() {
    let project = Project::empty();
    project.file("conf/other.toml", MEMORY_CONFIG);
    project
        .ck()
        .env("CK_CONFIG", project.path().join("conf/other.toml"))
        .args(&["queue", "status"])
        .passes()
        .stdout_has("default");
}

#[test]
fn queue_daemon_help_shows_subcommands() {
    cli()
        .args(&["queue", "daemon", "--help"])
        .passes()
        .stdout_has("start")
        .stdout_has("stop")
        .stdout_has("status")
        .stdout_has("run");
}

#[test]
fn cron_help_shows_subcommands() {
    cli().args(&["cron", "--help"]).passes().stdout_has("run").stdout_has("info");
}

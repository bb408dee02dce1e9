// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ck - priority job queue and cron scheduler

mod app;
mod commands;
mod config;
mod connector;
mod env;
mod exit_error;
mod handlers;
mod logging;
mod manifest;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::App;
use crate::commands::{cron, daemon::DaemonCommand, queue};
use crate::config::Config;
use crate::exit_error::{exit_code, ExitError};
use crate::output::OutputFormat;
use ck_daemon::Lane;

#[derive(Parser)]
#[command(name = "ck", version, about = "Priority job queue and cron scheduler")]
struct Cli {
    /// Config file (default: ./ck.toml if present)
    #[arg(long, global = true, env = env::CONFIG_VAR)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Priority job queue
    Queue(queue::QueueArgs),
    /// Cron scheduler
    Cron(cron::CronArgs),
}

impl Cli {
    /// Lane whose foreground daemon this invocation runs, if any
    fn daemon_lane(&self) -> Option<Lane> {
        let (lane, command) = match &self.command {
            Commands::Queue(queue::QueueArgs { command: queue::QueueCommand::Daemon(args) }) => {
                (Lane::Queue, args.command)
            }
            Commands::Cron(cron::CronArgs { command: cron::CronCommand::Daemon(args) }) => {
                (Lane::Cron, args.command)
            }
            _ => return None,
        };
        (command == DaemonCommand::Run).then_some(lane)
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code(&e));
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())
        .map_err(|e| ExitError::precondition(e.to_string()))?;

    // Held for the life of the process so the file writer flushes
    let _log_guard = match (cli.daemon_lane(), env::job_log_override()) {
        (Some(lane), _) => Some(logging::init_daemon_file(&config.state_dir()?, lane)?),
        (None, Some(path)) => Some(logging::init_file(&path)?),
        (None, None) => {
            logging::init_stderr();
            None
        }
    };

    let app = App::new(config, cli.output);
    match cli.command {
        Commands::Queue(args) => queue::queue(&app, args),
        Commands::Cron(args) => cron::cron(&app, args),
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

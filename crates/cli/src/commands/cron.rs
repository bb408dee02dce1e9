// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ck cron` - scheduler passes, single-job runs, diagnostics

use std::path::PathBuf;

use anyhow::Result;
use ck_cron::{CronError, CronRun, JobRunOutcome};
use ck_daemon::{systemd, Lane};
use clap::{Args, Subcommand};

use super::daemon::{self, DaemonArgs, DaemonCommand};
use crate::app::App;
use crate::exit_error::ExitError;
use crate::output::{format_minute, format_or_json, render_table};

#[derive(Args)]
pub struct CronArgs {
    #[command(subcommand)]
    pub command: CronCommand,
}

#[derive(Subcommand)]
pub enum CronCommand {
    /// Dispatch every job due this minute, or run one job now
    Run {
        /// Job identifier (`module.id`); runs in this process
        identifier: Option<String>,
    },
    /// Manage the cron polling daemon
    Daemon(DaemonArgs),
    /// List discovered jobs with their previous and next fire times
    Info {
        #[command(subcommand)]
        target: Option<InfoTarget>,
    },
}

#[derive(Subcommand)]
pub enum InfoTarget {
    /// Write systemd user units for both daemons
    Systemd {
        /// Directory for the unit files (default: ~/.config/systemd/user)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

pub fn cron(app: &App, args: CronArgs) -> Result<()> {
    match args.command {
        CronCommand::Run { identifier } => run(app, identifier.as_deref()),
        CronCommand::Daemon(DaemonArgs { command: DaemonCommand::Run }) => {
            let scheduler = app.scheduler()?;
            daemon::run_foreground(app, Lane::Cron, || {
                scheduler.run_due();
            })
        }
        CronCommand::Daemon(DaemonArgs { command }) => daemon::manage(app, Lane::Cron, command),
        CronCommand::Info { target: None } => info(app),
        CronCommand::Info { target: Some(InfoTarget::Systemd { dir }) } => write_units(app, dir),
    }
}

fn run(app: &App, identifier: Option<&str>) -> Result<()> {
    let result = app.scheduler()?.run(identifier).map_err(|e| match e {
        CronError::UnknownJob(_) => ExitError::precondition(e.to_string()),
    })?;

    match result {
        CronRun::Pass(report) => format_or_json(app.format, &report, || {
            println!("Dispatched {} of {} jobs", report.dispatched, report.considered);
            if report.spawn_failures > 0 {
                println!("{} jobs failed to start", report.spawn_failures);
            }
        }),
        CronRun::Single(outcome) => format_or_json(app.format, &outcome, || match &outcome {
            JobRunOutcome::Succeeded => println!("Job succeeded"),
            JobRunOutcome::Unsuccessful => println!("Job exited unsuccessfully"),
            JobRunOutcome::Failed { message } => println!("Job failed: {}", message),
        }),
    }
}

fn info(app: &App) -> Result<()> {
    let jobs = app.scheduler()?.info();
    format_or_json(app.format, &jobs, || {
        if jobs.is_empty() {
            println!("No cron jobs configured");
            return;
        }
        let rows: Vec<Vec<String>> = jobs
            .iter()
            .map(|job| {
                vec![
                    job.identifier.clone(),
                    job.expression.clone(),
                    format_minute(job.previous),
                    format_minute(job.next),
                    job.name.clone(),
                ]
            })
            .collect();
        print!("{}", render_table(&["JOB", "SCHEDULE", "LAST", "NEXT", "NAME"], &rows));
    })
}

fn write_units(app: &App, dir: Option<PathBuf>) -> Result<()> {
    let Some(dir) = dir.or_else(systemd::default_unit_dir) else {
        return Err(ExitError::failure("no systemd unit directory; pass --dir").into());
    };
    let exe = std::env::current_exe()?;
    let written = systemd::write_units(&dir, &exe, app.config.source.as_deref())
        .map_err(|e| ExitError::failure(e.to_string()))?;

    format_or_json(app.format, &written, || {
        for path in &written {
            println!("Wrote {}", path.display());
        }
        println!("Enable with: systemctl --user enable --now {} {}", Lane::Cron.unit_name(), Lane::Queue.unit_name());
    })
}

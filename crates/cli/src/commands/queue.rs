// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ck queue` - push, drain and inspect job queues

use anyhow::Result;
use ck_core::{JobRecord, Priority};
use ck_daemon::Lane;
use ck_queue::{BrokerError, DrainReport, QueueEngine, QueueError, QueueEvent};
use clap::{Args, Subcommand};
use serde_json::Value;

use super::daemon::{self, DaemonArgs, DaemonCommand};
use crate::app::App;
use crate::exit_error::ExitError;
use crate::output::format_or_json;

#[derive(Args)]
pub struct QueueArgs {
    #[command(subcommand)]
    pub command: QueueCommand,
}

#[derive(Subcommand)]
pub enum QueueCommand {
    /// Push a job onto a queue
    Push {
        /// Handler name, e.g. `noop` or `shell`
        target: String,
        /// Positional arguments, each a JSON value (`1`, `"x"`, `true`)
        args: Vec<String>,
        /// Queue name
        #[arg(long)]
        name: Option<String>,
        /// Priority 1 (highest) to 5 (lowest)
        #[arg(long, short, default_value_t)]
        priority: Priority,
    },
    /// Drain every priority of a queue, highest first
    Run {
        /// Queue name
        #[arg(long)]
        name: Option<String>,
        /// Worker number shown in logs
        #[arg(long, default_value_t = 1)]
        worker: u32,
    },
    /// Delete every pending job in a queue
    Clear {
        /// Queue name
        #[arg(long)]
        name: Option<String>,
    },
    /// Show pending jobs per priority
    Status {
        /// Queue name
        #[arg(long)]
        name: Option<String>,
    },
    /// Manage the queue-draining daemon
    Daemon(DaemonArgs),
}

pub fn queue(app: &App, args: QueueArgs) -> Result<()> {
    match args.command {
        QueueCommand::Push { target, args, name, priority } => {
            let arguments = parse_arguments(&args)?;
            let record = JobRecord::new(target, arguments)
                .map_err(|e| ExitError::precondition(e.to_string()))?;
            let queue = app.queue_name(name);
            app.queue().connect()?.push(&record, &queue, priority)?;

            let obj = serde_json::json!({
                "queue": queue,
                "priority": priority,
                "target": record.target,
            });
            format_or_json(app.format, &obj, || {
                println!("Pushed '{}' to {} (priority {})", record.target, queue, priority)
            })
        }
        QueueCommand::Run { name, worker } => {
            let queue = app.queue_name(name);
            let report = app.queue().connect()?.run(&queue, worker)?;
            format_or_json(app.format, &report, || {
                println!("Drained {}: {} executed, {} failed", queue, report.executed, report.failed)
            })
        }
        QueueCommand::Clear { name } => {
            let queue = app.queue_name(name);
            app.queue().connect()?.clear(&queue)?;
            let obj = serde_json::json!({ "queue": queue, "cleared": true });
            format_or_json(app.format, &obj, || println!("Cleared {}", queue))
        }
        QueueCommand::Status { name } => {
            let queue = app.queue_name(name);
            let lengths = app.queue().connect()?.lengths(&queue)?;
            let obj = serde_json::json!({ "queue": queue, "lengths": lengths });
            format_or_json(app.format, &obj, || {
                println!("{}", queue);
                for (priority, len) in Priority::ALL.iter().zip(lengths) {
                    println!("  p{}  {}", priority, len);
                }
            })
        }
        QueueCommand::Daemon(DaemonArgs { command: DaemonCommand::Run }) => run_daemon(app),
        QueueCommand::Daemon(DaemonArgs { command }) => daemon::manage(app, Lane::Queue, command),
    }
}

/// Drain the default queue on every trigger. Broker failures are logged and
/// retried on the next trigger.
fn run_daemon(app: &App) -> Result<()> {
    let connector = app.queue();
    let mut drainer =
        Drainer::new(app.queue_name(None), move || Ok(connector.connect()?.on_event(log_drained)));

    daemon::run_foreground(app, Lane::Queue, || {
        if let Err(e) = drainer.tick() {
            tracing::error!(queue = %drainer.queue, error = %e, "queue drain failed");
        }
    })
}

fn log_drained(event: &QueueEvent) {
    if let QueueEvent::Drained { queue, worker, report } = event {
        if report.executed + report.failed > 0 {
            tracing::info!(queue = %queue, worker, executed = report.executed, failed = report.failed, "drained");
        }
    }
}

/// One queue drained per trigger. The engine is built lazily and dropped
/// after a lost broker connection, so the next trigger connects again.
struct Drainer<F> {
    queue: String,
    connect: F,
    engine: Option<QueueEngine>,
}

impl<F> Drainer<F>
where
    F: FnMut() -> Result<QueueEngine, QueueError>,
{
    fn new(queue: String, connect: F) -> Self {
        Self { queue, connect, engine: None }
    }

    fn tick(&mut self) -> Result<DrainReport, QueueError> {
        let engine = match self.engine.take() {
            Some(engine) => engine,
            None => (self.connect)()?,
        };
        let result = engine.run(&self.queue, 1);
        if !matches!(result, Err(QueueError::Broker(BrokerError::Connection(_)))) {
            self.engine = Some(engine);
        }
        result
    }
}

fn parse_arguments(raw: &[String]) -> Result<Vec<Value>, ExitError> {
    raw.iter()
        .map(|arg| {
            serde_json::from_str(arg).map_err(|e| {
                ExitError::precondition(format!("argument {:?} is not valid JSON: {}", arg, e))
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;

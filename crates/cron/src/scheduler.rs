// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduler pass: find due jobs and dispatch them.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use chrono::NaiveDateTime;
use ck_core::{panic_message, Clock};
use serde::Serialize;

use crate::{CronError, CronRegistry, RegisteredCronJob, Spawner};

/// Counts from one scheduler pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassReport {
    pub considered: usize,
    pub dispatched: usize,
    pub spawn_failures: usize,
}

/// How a single in-process job run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum JobRunOutcome {
    Succeeded,
    /// `run()` returned `false`
    Unsuccessful,
    /// `run()` errored or panicked
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CronRun {
    Pass(PassReport),
    Single(JobRunOutcome),
}

/// Schedule summary for `cron info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CronJobInfo {
    pub identifier: String,
    pub name: String,
    pub expression: String,
    pub previous: Option<NaiveDateTime>,
    pub next: Option<NaiveDateTime>,
}

pub struct Scheduler<C: Clock> {
    registry: Arc<CronRegistry>,
    spawner: Arc<dyn Spawner>,
    clock: C,
}

impl<C: Clock> Scheduler<C> {
    pub fn new(registry: Arc<CronRegistry>, spawner: Arc<dyn Spawner>, clock: C) -> Self {
        Self { registry, spawner, clock }
    }

    /// With an identifier, run that job here and now. Without, dispatch
    /// every job due at the current minute.
    pub fn run(&self, job: Option<&str>) -> Result<CronRun, CronError> {
        match job {
            Some(identifier) => self.run_cronjob(identifier).map(CronRun::Single),
            None => Ok(CronRun::Pass(self.run_due())),
        }
    }

    /// One pass over the registry. Children are never awaited.
    pub fn run_due(&self) -> PassReport {
        let now = self.clock.now();
        tracing::info!(at = %now, "cron run");

        let mut report = PassReport::default();
        for job in self.registry.all_cron_jobs() {
            report.considered += 1;
            if !job.schedule.is_due(&now) {
                continue;
            }
            match self.spawner.spawn(&job.identifier) {
                Ok(pid) => {
                    report.dispatched += 1;
                    tracing::debug!(job = %job.identifier, pid, "dispatched cron job");
                }
                Err(e) => {
                    report.spawn_failures += 1;
                    tracing::error!(job = %job.identifier, error = %e, "failed to dispatch cron job");
                }
            }
        }
        report
    }

    /// Run one job in this process.
    ///
    /// Job failures are reported in the outcome, not as errors.
    pub fn run_cronjob(&self, identifier: &str) -> Result<JobRunOutcome, CronError> {
        let job = self
            .registry
            .find(identifier)
            .ok_or_else(|| CronError::UnknownJob(identifier.to_string()))?;
        Ok(execute(&job, self.clock.now()))
    }

    pub fn info(&self) -> Vec<CronJobInfo> {
        let now = self.clock.now();
        self.registry
            .all_cron_jobs()
            .into_iter()
            .map(|job| CronJobInfo {
                previous: job.schedule.prev_at_or_before(now),
                next: job.schedule.next_after(now),
                name: job.name().to_string(),
                expression: job.schedule.as_str().to_string(),
                identifier: job.identifier,
            })
            .collect()
    }
}

fn execute(job: &RegisteredCronJob, started: NaiveDateTime) -> JobRunOutcome {
    tracing::info!(job = %job.identifier, name = job.name(), started = %started, "starting cron job");

    match panic::catch_unwind(AssertUnwindSafe(|| job.job.run())) {
        Ok(Ok(true)) => {
            tracing::info!(job = %job.identifier, "cron job finished");
            JobRunOutcome::Succeeded
        }
        Ok(Ok(false)) => {
            tracing::warn!(job = %job.identifier, "cron job exited unsuccessfully");
            JobRunOutcome::Unsuccessful
        }
        Ok(Err(e)) => {
            tracing::error!(job = %job.identifier, error = %e, "cron job failed");
            JobRunOutcome::Failed { message: e.to_string() }
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(job = %job.identifier, %message, "cron job panicked");
            JobRunOutcome::Failed { message }
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;

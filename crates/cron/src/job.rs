// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cron job and module contracts.

use ck_core::CronExpr;

use crate::{CronJobError, DiscoveryError};

/// A scheduled unit of work.
///
/// Definitions are created fresh for every scheduler pass and hold no state
/// between passes.
pub trait CronJob: Send + Sync {
    /// Stable identifier, unique within the owning module
    fn id(&self) -> &str;

    /// Human-readable name for logs
    fn name(&self) -> &str;

    /// Five-field cron expression (or `@macro`). Empty disables the job.
    fn expression(&self) -> &str;

    /// Run the job. `Ok(false)` means it finished but reported failure.
    fn run(&self) -> Result<bool, CronJobError>;
}

/// A named provider of cron jobs
pub trait CronModule: Send + Sync {
    fn name(&self) -> &str;

    fn cron_jobs(&self) -> Result<Vec<Box<dyn CronJob>>, DiscoveryError>;
}

/// A discovered job with its parsed schedule
pub struct RegisteredCronJob {
    /// `{module}.{id}`
    pub identifier: String,
    pub schedule: CronExpr,
    pub job: Box<dyn CronJob>,
}

impl RegisteredCronJob {
    pub fn name(&self) -> &str {
        self.job.name()
    }
}

impl std::fmt::Debug for RegisteredCronJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredCronJob")
            .field("identifier", &self.identifier)
            .field("schedule", &self.schedule.as_str())
            .finish_non_exhaustive()
    }
}

type JobBody = Box<dyn Fn() -> Result<bool, CronJobError> + Send + Sync>;

/// [`CronJob`] backed by a closure
pub struct FnCronJob {
    id: String,
    name: String,
    expression: String,
    body: JobBody,
}

impl FnCronJob {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        expression: impl Into<String>,
        body: impl Fn() -> Result<bool, CronJobError> + Send + Sync + 'static,
    ) -> Self {
        Self { id: id.into(), name: name.into(), expression: expression.into(), body: Box::new(body) }
    }
}

impl CronJob for FnCronJob {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn expression(&self) -> &str {
        &self.expression
    }

    fn run(&self) -> Result<bool, CronJobError> {
        (self.body)()
    }
}

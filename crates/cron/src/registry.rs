// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cron job discovery across registered modules.

use std::collections::HashSet;

use ck_core::CronExpr;

use crate::{CronModule, RegisteredCronJob};

#[derive(Default)]
pub struct CronRegistry {
    modules: Vec<Box<dyn CronModule>>,
}

impl CronRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a module; discovery walks modules in registration order
    pub fn register(&mut self, module: impl CronModule + 'static) -> &mut Self {
        self.modules.push(Box::new(module));
        self
    }

    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|m| m.name())
    }

    /// Enumerate every valid job, instantiating fresh definitions.
    ///
    /// Never fails: broken modules, unparseable schedules and duplicate
    /// identifiers are logged and skipped.
    pub fn all_cron_jobs(&self) -> Vec<RegisteredCronJob> {
        let mut seen = HashSet::new();
        let mut found = Vec::new();

        for module in &self.modules {
            let jobs = match module.cron_jobs() {
                Ok(jobs) => jobs,
                Err(e) => {
                    tracing::warn!(module = module.name(), error = %e, "skipping cron module");
                    continue;
                }
            };

            for job in jobs {
                let identifier = format!("{}.{}", module.name(), job.id());
                let expression = job.expression().trim();
                if expression.is_empty() {
                    tracing::debug!(job = %identifier, "cron job has no schedule, skipping");
                    continue;
                }
                let schedule = match CronExpr::parse(expression) {
                    Ok(schedule) => schedule,
                    Err(e) => {
                        tracing::warn!(job = %identifier, expression, error = %e, "invalid cron expression, skipping");
                        continue;
                    }
                };
                if !seen.insert(identifier.clone()) {
                    tracing::warn!(job = %identifier, "duplicate cron job identifier, skipping");
                    continue;
                }
                found.push(RegisteredCronJob { identifier, schedule, job });
            }
        }
        found
    }

    pub fn find(&self, identifier: &str) -> Option<RegisteredCronJob> {
        self.all_cron_jobs().into_iter().find(|job| job.identifier == identifier)
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

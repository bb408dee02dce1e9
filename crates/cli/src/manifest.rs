// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cron modules declared by `[[cron.job]]` entries in the config file.

use std::process::{Command, Stdio};

use ck_core::{JobRecord, Priority};
use ck_cron::{CronJob, CronJobError, CronModule, DiscoveryError};

use crate::config::{CronJobEntry, EnqueueAction};
use crate::connector::QueueConnector;

/// Module name for entries that don't set one
pub const DEFAULT_MODULE: &str = "app";

pub struct ManifestModule {
    name: String,
    entries: Vec<CronJobEntry>,
    queue: QueueConnector,
}

impl ManifestModule {
    pub fn new(name: impl Into<String>, entries: Vec<CronJobEntry>, queue: QueueConnector) -> Self {
        Self { name: name.into(), entries, queue }
    }
}

/// Group entries into one module per distinct `module` name, in order of
/// first appearance
pub fn modules(entries: &[CronJobEntry], queue: &QueueConnector) -> Vec<ManifestModule> {
    let mut modules: Vec<ManifestModule> = Vec::new();
    for entry in entries {
        let name = entry.module.as_deref().unwrap_or(DEFAULT_MODULE);
        match modules.iter_mut().find(|m| m.name == name) {
            Some(module) => module.entries.push(entry.clone()),
            None => modules.push(ManifestModule::new(name, vec![entry.clone()], queue.clone())),
        }
    }
    modules
}

impl CronModule for ManifestModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn cron_jobs(&self) -> Result<Vec<Box<dyn CronJob>>, DiscoveryError> {
        let mut jobs: Vec<Box<dyn CronJob>> = Vec::new();
        for entry in &self.entries {
            match ManifestJob::from_entry(entry, &self.queue) {
                Ok(job) => jobs.push(Box::new(job)),
                Err(e) => {
                    tracing::warn!(module = %self.name, job = %entry.name, error = %e, "skipping cron entry");
                }
            }
        }
        Ok(jobs)
    }
}

enum Action {
    Shell(String),
    Enqueue { record: JobRecord, queue: String, priority: Priority },
}

struct ManifestJob {
    id: String,
    name: String,
    schedule: String,
    action: Action,
    queue: QueueConnector,
}

impl ManifestJob {
    fn from_entry(entry: &CronJobEntry, connector: &QueueConnector) -> Result<Self, String> {
        let action = match (&entry.shell, &entry.enqueue) {
            (Some(command), None) => Action::Shell(command.clone()),
            (None, Some(EnqueueAction { target, args, queue, priority })) => Action::Enqueue {
                record: JobRecord::new(target.clone(), args.clone()).map_err(|e| e.to_string())?,
                queue: queue.clone().unwrap_or_default(),
                priority: priority.unwrap_or_default(),
            },
            (None, None) => return Err("entry needs a `shell` or `enqueue` action".to_string()),
            (Some(_), Some(_)) => {
                return Err("entry must have only one of `shell` and `enqueue`".to_string())
            }
        };
        let id = entry.id.clone().unwrap_or_else(|| slug(&entry.name));
        if id.is_empty() {
            return Err("entry has no usable id".to_string());
        }
        Ok(Self {
            id,
            name: entry.name.clone(),
            schedule: entry.schedule.clone(),
            action,
            queue: connector.clone(),
        })
    }
}

impl CronJob for ManifestJob {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn expression(&self) -> &str {
        &self.schedule
    }

    fn run(&self) -> Result<bool, CronJobError> {
        match &self.action {
            Action::Shell(command) => {
                let status = Command::new("sh")
                    .arg("-c")
                    .arg(command)
                    .stdin(Stdio::null())
                    .status()?;
                Ok(status.success())
            }
            Action::Enqueue { record, queue, priority } => {
                let engine = self.queue.connect().map_err(|e| CronJobError::new(e.to_string()))?;
                engine
                    .push(record, queue, *priority)
                    .map_err(|e| CronJobError::new(e.to_string()))?;
                Ok(true)
            }
        }
    }
}

/// `"Nightly report"` → `nightly_report`
fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;

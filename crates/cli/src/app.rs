// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wiring from config to queue, cron and daemon components.

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use ck_core::SystemClock;
use ck_cron::{CronRegistry, ProcessSpawner, Scheduler};
use ck_daemon::{DaemonManager, Lane, SystemProcess};

use crate::config::Config;
use crate::connector::QueueConnector;
use crate::output::OutputFormat;
use crate::{env, handlers, logging, manifest};

pub struct App {
    pub config: Config,
    pub format: OutputFormat,
}

impl App {
    pub fn new(config: Config, format: OutputFormat) -> Self {
        Self { config, format }
    }

    pub fn queue(&self) -> QueueConnector {
        QueueConnector::from_settings(&self.config.queue, Arc::new(handlers::builtin()))
    }

    /// Queue name used when a command doesn't pass `--name`
    pub fn queue_name(&self, name: Option<String>) -> String {
        name.unwrap_or_else(|| self.config.queue.default_name.clone())
    }

    pub fn registry(&self) -> CronRegistry {
        let mut registry = CronRegistry::new();
        for module in manifest::modules(&self.config.cron.jobs, &self.queue()) {
            registry.register(module);
        }
        registry
    }

    /// Scheduler whose spawned jobs log to `{state_dir}/cron_jobs.log`
    pub fn scheduler(&self) -> Result<Scheduler<SystemClock>> {
        let mut spawner = ProcessSpawner::current()?.with_args(self.forwarded_args());
        if let Ok(dir) = self.config.state_dir() {
            spawner = spawner.with_env(env::JOB_LOG_VAR, dir.join(logging::JOB_LOG_FILE));
        }
        Ok(Scheduler::new(Arc::new(self.registry()), Arc::new(spawner), SystemClock))
    }

    pub fn state_dir(&self) -> Result<PathBuf> {
        Ok(self.config.state_dir()?)
    }

    pub fn manager(&self, lane: Lane) -> Result<DaemonManager<SystemProcess>> {
        let process = SystemProcess::current()?.with_args(self.forwarded_args());
        Ok(DaemonManager::new(lane, &self.state_dir()?, process))
    }

    /// Arguments that make a child process see the same config
    pub fn forwarded_args(&self) -> Vec<OsString> {
        match &self.config.source {
            Some(path) => vec!["--config".into(), path.clone().into()],
            None => Vec::new(),
        }
    }
}

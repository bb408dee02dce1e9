// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ck.toml` loading.
//!
//! Resolution: `--config` / `CK_CONFIG`, then `./ck.toml`, then built-in
//! defaults. `CK_STATE_DIR` and `CK_BROKER_URL` override the file.

use std::path::{Path, PathBuf};

use ck_core::Priority;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::env;

pub const DEFAULT_FILE: &str = "ck.toml";

/// Broker setting that selects the in-process broker
pub const MEMORY_BROKER: &str = "memory";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {} not found", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("could not determine a state directory; set CK_STATE_DIR or [daemon] state_dir")]
    NoStateDir,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub queue: QueueSettings,
    pub daemon: DaemonSettings,
    pub cron: CronSettings,
    /// Absolute path of the file this was loaded from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueueSettings {
    /// Key prefix for the priority lists
    pub prefix: String,
    /// `redis://...` URL, or `memory`
    pub broker: String,
    pub default_name: String,
}

impl Default for QueueSettings {
    fn default() -> Self {
        Self {
            prefix: "ck".to_string(),
            broker: "redis://127.0.0.1:6379/".to_string(),
            default_name: ck_core::DEFAULT_QUEUE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DaemonSettings {
    pub state_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CronSettings {
    #[serde(rename = "job")]
    pub jobs: Vec<CronJobEntry>,
}

/// One `[[cron.job]]` table
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CronJobEntry {
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub schedule: String,
    #[serde(default)]
    pub shell: Option<String>,
    #[serde(default)]
    pub enqueue: Option<EnqueueAction>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnqueueAction {
    pub target: String,
    #[serde(default)]
    pub args: Vec<Value>,
    #[serde(default)]
    pub queue: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
}

impl Config {
    /// Resolve and load the active config, applying environment overrides
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) if !path.is_file() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => Some(PathBuf::from(DEFAULT_FILE)).filter(|p| p.is_file()),
        };

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(env::state_dir_override(), env::broker_url_override());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let mut config: Config = toml::from_str(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;

        let source = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        if let (Some(dir), Some(base)) = (config.daemon.state_dir.as_mut(), source.parent()) {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
        config.source = Some(source);
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn apply_overrides(&mut self, state_dir: Option<PathBuf>, broker: Option<String>) {
        if let Some(dir) = state_dir {
            self.daemon.state_dir = Some(dir);
        }
        if let Some(url) = broker {
            self.queue.broker = url;
        }
    }

    /// Where lock and log files live
    pub fn state_dir(&self) -> Result<PathBuf, ConfigError> {
        self.daemon
            .state_dir
            .clone()
            .or_else(env::default_state_dir)
            .ok_or(ConfigError::NoStateDir)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;

/// A background daemon kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lane {
    Cron,
    Queue,
}

ck_core::simple_display! {
    Lane {
        Cron => "cron",
        Queue => "queue",
    }
}

impl Lane {
    pub const ALL: [Lane; 2] = [Lane::Cron, Lane::Queue];

    pub fn lock_file_name(self) -> &'static str {
        match self {
            Lane::Cron => "cron_daemon.lock",
            Lane::Queue => "queue_daemon.lock",
        }
    }

    pub fn log_file_name(self) -> &'static str {
        match self {
            Lane::Cron => "cron_daemon.log",
            Lane::Queue => "queue_daemon.log",
        }
    }

    /// Wall-clock seconds at which the poll loop fires
    pub fn trigger_seconds(self) -> &'static [u32] {
        match self {
            Lane::Cron => &[0],
            Lane::Queue => &[0, 30],
        }
    }

    pub fn unit_name(self) -> &'static str {
        match self {
            Lane::Cron => "ck-cron.service",
            Lane::Queue => "ck-queue.service",
        }
    }
}

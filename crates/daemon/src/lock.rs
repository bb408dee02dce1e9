// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! PID lock file: decimal PID plus newline.
//!
//! The file marks which process owns a lane. Writers take an `fs2`
//! exclusive lock for the duration of a check-then-write so concurrent
//! `start` calls serialize.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::DaemonError;

#[derive(Debug, Clone)]
pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// PID recorded in the file, `None` if the file is missing or empty
    pub fn read(&self) -> Result<Option<u32>, DaemonError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => parse_pid(&self.path, &content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Open (creating if needed) and block until the exclusive lock is held
    pub fn lock(&self) -> Result<LockedPidFile, DaemonError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // Don't truncate before holding the lock; that would wipe a live PID
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;
        file.lock_exclusive()?;
        Ok(LockedPidFile { file, path: self.path.clone() })
    }

    pub fn remove(&self) -> Result<(), DaemonError> {
        remove_if_exists(&self.path)
    }

    /// Remove the file only if it still names `pid`
    pub fn remove_if_owned(&self, pid: u32) -> Result<bool, DaemonError> {
        if self.read()? != Some(pid) {
            return Ok(false);
        }
        let mut locked = self.lock()?;
        if locked.pid()? == Some(pid) {
            locked.remove()?;
            return Ok(true);
        }
        Ok(false)
    }
}

/// A PID file with the exclusive lock held; released on drop
#[derive(Debug)]
pub struct LockedPidFile {
    file: File,
    path: PathBuf,
}

impl LockedPidFile {
    pub fn pid(&mut self) -> Result<Option<u32>, DaemonError> {
        let mut content = String::new();
        self.file.seek(SeekFrom::Start(0))?;
        self.file.read_to_string(&mut content)?;
        parse_pid(&self.path, &content)
    }

    pub fn write_pid(&mut self, pid: u32) -> Result<(), DaemonError> {
        self.file.set_len(0)?;
        self.file.seek(SeekFrom::Start(0))?;
        writeln!(self.file, "{}", pid)?;
        self.file.sync_all()?;
        Ok(())
    }

    /// Delete the file while still holding the lock
    pub fn remove(self) -> Result<(), DaemonError> {
        remove_if_exists(&self.path)
    }
}

fn parse_pid(path: &Path, content: &str) -> Result<Option<u32>, DaemonError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<u32>() {
        Ok(pid) if pid > 0 => Ok(Some(pid)),
        _ => Err(DaemonError::CorruptLock { path: path.to_path_buf(), content: trimmed.to_string() }),
    }
}

fn remove_if_exists(path: &Path) -> Result<(), DaemonError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exclusive lock serializing invocations that talk to the window manager

use crate::store::StateError;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

/// Advisory lock on a file in the state directory. Released on drop.
#[derive(Debug)]
pub struct StateLock {
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    _file: File,
    path: PathBuf,
}

impl StateLock {
    /// Block until the lock is held.
    pub fn acquire(path: impl Into<PathBuf>) -> Result<Self, StateError> {
        let path = path.into();
        let file = open(&path)?;
        if file.try_lock_exclusive().is_err() {
            tracing::info!(path = %path.display(), "waiting for another invocation");
            file.lock_exclusive()?;
        }
        Ok(Self { _file: file, path })
    }

    /// Take the lock only if nobody holds it
    pub fn try_acquire(path: impl Into<PathBuf>) -> Result<Option<Self>, StateError> {
        let path = path.into();
        let file = open(&path)?;
        match file.try_lock_exclusive() {
            Ok(()) => Ok(Some(Self { _file: file, path })),
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// Open without truncating so a holder's file is never disturbed
fn open(path: &Path) -> Result<File, StateError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)?)
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;

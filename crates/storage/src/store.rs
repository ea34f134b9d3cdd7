// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! State persistence.
//!
//! The JSON store writes atomically (tmp file, fsync, rename) so a crash
//! mid-save never leaves a truncated document. A corrupt document is moved
//! aside to a rotated `.bak` and treated as empty state.

use crate::state::{PersistedState, CURRENT_STATE_VERSION};
use chrono::Utc;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Errors that can occur loading or saving state
#[derive(Debug, Error)]
pub enum StateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("state file version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
    #[error("state backend unavailable: {0}")]
    Backend(String),
}

/// Persistence backend for [`PersistedState`]
pub trait StateStore: Send + Sync + 'static {
    fn load(&self) -> Result<PersistedState, StateError>;
    fn save(&self, state: &PersistedState) -> Result<(), StateError>;
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct JsonStateStore {
    path: PathBuf,
}

impl JsonStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonStateStore {
    /// Load state, returning the default when the file does not exist.
    fn load(&self) -> Result<PersistedState, StateError> {
        if !self.path.exists() {
            return Ok(PersistedState::default());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let state: PersistedState = match serde_json::from_reader(reader) {
            Ok(state) => state,
            Err(e) => {
                let bak_path = rotate_bak_path(&self.path);
                warn!(
                    error = %e,
                    path = %self.path.display(),
                    bak = %bak_path.display(),
                    "Corrupt state file, moving to .bak and starting fresh",
                );
                fs::rename(&self.path, &bak_path)?;
                return Ok(PersistedState::default());
            }
        };

        if state.version > CURRENT_STATE_VERSION {
            return Err(StateError::UnsupportedVersion {
                found: state.version,
                supported: CURRENT_STATE_VERSION,
            });
        }
        Ok(state)
    }

    fn save(&self, state: &PersistedState) -> Result<(), StateError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut doc = state.clone();
        doc.version = CURRENT_STATE_VERSION;
        doc.saved_at = Some(Utc::now());

        let tmp_path = self.path.with_extension("tmp");
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &doc)?;
            let file = writer.into_inner().map_err(|e| e.into_error())?;
            file.sync_all()?;
        }

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

const MAX_BAK_FILES: u32 = 3;

/// Pick the next `.bak` / `.bak.N` path, rotating older backups out.
///
/// Keeps up to [`MAX_BAK_FILES`] backups: `.bak`, `.bak.2`, `.bak.3`.
pub(crate) fn rotate_bak_path(path: &Path) -> PathBuf {
    let bak = |n: u32| {
        if n == 1 {
            path.with_extension("bak")
        } else {
            path.with_extension(format!("bak.{n}"))
        }
    };

    let oldest = bak(MAX_BAK_FILES);
    if oldest.exists() {
        let _ = fs::remove_file(&oldest);
    }

    for n in (1..MAX_BAK_FILES).rev() {
        let src = bak(n);
        if src.exists() {
            let _ = fs::rename(&src, bak(n + 1));
        }
    }

    bak(1)
}

#[cfg(any(test, feature = "test-support"))]
mod memory {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct MemoryState {
        state: PersistedState,
        fail_loads: bool,
        fail_saves: bool,
        saves: usize,
    }

    /// In-memory store for tests. Clones share the same document.
    #[derive(Clone, Default)]
    pub struct MemoryStateStore {
        inner: Arc<Mutex<MemoryState>>,
    }

    impl MemoryStateStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_state(state: PersistedState) -> Self {
            let store = Self::default();
            store.inner.lock().state = state;
            store
        }

        /// Current document
        pub fn snapshot(&self) -> PersistedState {
            self.inner.lock().state.clone()
        }

        /// Number of successful saves
        pub fn save_count(&self) -> usize {
            self.inner.lock().saves
        }

        pub fn fail_loads(&self, fail: bool) {
            self.inner.lock().fail_loads = fail;
        }

        pub fn fail_saves(&self, fail: bool) {
            self.inner.lock().fail_saves = fail;
        }
    }

    impl StateStore for MemoryStateStore {
        fn load(&self) -> Result<PersistedState, StateError> {
            let inner = self.inner.lock();
            if inner.fail_loads {
                return Err(StateError::Backend("injected load failure".to_string()));
            }
            Ok(inner.state.clone())
        }

        fn save(&self, state: &PersistedState) -> Result<(), StateError> {
            let mut inner = self.inner.lock();
            if inner.fail_saves {
                return Err(StateError::Backend("injected save failure".to_string()));
            }
            inner.state = state.clone();
            inner.saves += 1;
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use memory::MemoryStateStore;

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

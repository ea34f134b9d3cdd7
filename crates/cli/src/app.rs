// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Production wiring: real processes, the JSON state file and the system clock

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use ap_adapters::{
    AeroSpaceClient, CircuitBreaker, MacScreen, ProcessRunner, SystemLauncher, TracedLauncher,
    TracedWindowManager,
};
use ap_core::{Config, SystemClock, UuidIdGen};
use ap_engine::{FocusStack, LocatorTiming, Orchestrator, OrchestratorDeps, StagedLocator};
use ap_storage::{JsonStateStore, StateLock, StateStore};

pub type Wm = TracedWindowManager<AeroSpaceClient<ProcessRunner, SystemClock>>;
pub type Launcher = TracedLauncher<SystemLauncher<ProcessRunner>>;
pub type App = Orchestrator<
    Wm,
    StagedLocator<Wm, Launcher>,
    Launcher,
    MacScreen<ProcessRunner>,
    JsonStateStore,
    SystemClock,
    UuidIdGen,
>;

pub const STATE_FILE: &str = "state.json";
pub const LOCK_FILE: &str = "ap.lock";

/// Resolved locations for one invocation
pub struct Paths {
    pub config: PathBuf,
    pub state_dir: PathBuf,
}

impl Paths {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            config: crate::env::config_path()?,
            state_dir: crate::env::state_dir()?,
        })
    }

    pub fn state_file(&self) -> PathBuf {
        self.state_dir.join(STATE_FILE)
    }

    pub fn lock_file(&self) -> PathBuf {
        self.state_dir.join(LOCK_FILE)
    }
}

pub fn load_config(path: &Path) -> Result<Arc<Config>> {
    let config = Config::load(path).map_err(ap_engine::ActivationError::from)?;
    tracing::debug!(path = %path.display(), projects = config.projects.len(), "config loaded");
    Ok(Arc::new(config))
}

/// One invocation's hold on the window manager.
///
/// Opening a session takes the state-directory lock, so invocations reach
/// AeroSpace one at a time, and restores the breaker the previous invocation
/// left in the state file. [`Session::save`] writes it back.
pub struct Session {
    _lock: StateLock,
    store: JsonStateStore,
    breaker: Arc<CircuitBreaker<SystemClock>>,
}

impl Session {
    pub async fn open(config: &Config, paths: &Paths) -> Result<Self> {
        std::fs::create_dir_all(&paths.state_dir)
            .with_context(|| format!("failed to create {}", paths.state_dir.display()))?;

        let lock_path = paths.lock_file();
        let lock = tokio::task::spawn_blocking(move || StateLock::acquire(lock_path))
            .await?
            .context("failed to lock state directory")?;

        let store = JsonStateStore::new(paths.state_file());
        let breaker = Arc::new(CircuitBreaker::new(
            "aerospace",
            Duration::from_secs(config.aerospace.cooldown_secs),
            SystemClock,
        ));
        match store.load() {
            Ok(state) => breaker.restore(state.circuit),
            Err(e) => tracing::warn!(error = %e, "breaker state unavailable, starting closed"),
        }

        Ok(Self {
            _lock: lock,
            store,
            breaker,
        })
    }

    pub fn breaker(&self) -> &CircuitBreaker<SystemClock> {
        &self.breaker
    }

    /// AeroSpace client guarded by the session breaker
    pub fn window_manager(&self, config: &Config) -> Wm {
        TracedWindowManager::new(AeroSpaceClient::new(
            config.aerospace.binary.clone(),
            ProcessRunner::new(),
            Arc::clone(&self.breaker),
            Duration::from_millis(config.aerospace.timeout_ms),
        ))
    }

    pub fn build(&self, config: Arc<Config>, paths: &Paths) -> App {
        let wm = self.window_manager(&config);
        let launcher = TracedLauncher::new(SystemLauncher::new(
            ProcessRunner::new(),
            paths.state_dir.clone(),
            config.editor.clone(),
            config.chrome.clone(),
        ));
        let locator = StagedLocator::new(
            wm.clone(),
            launcher.clone(),
            LocatorTiming::from(&config.locator),
        );
        let focus = FocusStack::new(self.store.clone(), SystemClock, &config.focus);

        Orchestrator::new(
            OrchestratorDeps {
                wm,
                locator,
                launcher,
                screen: MacScreen::new(ProcessRunner::new()),
            },
            focus,
            config,
            UuidIdGen,
        )
    }

    /// Persist the breaker next to the focus stack, if it changed
    pub fn save(&self) -> Result<()> {
        let snapshot = self.breaker.snapshot();
        let mut state = self.store.load()?;
        if state.circuit == snapshot {
            return Ok(());
        }
        state.circuit = snapshot;
        self.store.save(&state)?;
        tracing::debug!(open = snapshot.opened_at_ms.is_some(), "breaker state saved");
        Ok(())
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;

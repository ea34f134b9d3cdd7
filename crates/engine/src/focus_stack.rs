// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistent LIFO history of non-project focus.
//!
//! Each operation loads, mutates and saves the persisted document while
//! holding one lock, so concurrent callers never interleave. Entries older
//! than the retention are pruned whenever the stack is touched.

use crate::error::ActivationError;
use ap_core::{Clock, FocusConfig, FocusStackEntry, FocusTarget};
use ap_storage::{PersistedState, StateStore};
use parking_lot::Mutex;
use std::time::Duration;

pub struct FocusStack<S, C> {
    store: S,
    clock: C,
    max_depth: usize,
    max_age: Duration,
    lock: Mutex<()>,
}

impl<S: StateStore, C: Clock> FocusStack<S, C> {
    pub fn new(store: S, clock: C, config: &FocusConfig) -> Self {
        Self {
            store,
            clock,
            max_depth: config.max_depth.max(1),
            max_age: Duration::from_secs(config.max_age_secs),
            lock: Mutex::new(()),
        }
    }

    /// Record `target` as the most recent context.
    ///
    /// Pushing the identity already on top replaces that entry with a fresh
    /// timestamp rather than stacking a duplicate.
    pub fn push(&self, target: FocusTarget) -> Result<(), ActivationError> {
        let _guard = self.lock.lock();
        let mut state = self.load()?;
        let now = self.clock.epoch_ms();
        self.prune_entries(&mut state, now);

        if state
            .focus_stack
            .last()
            .is_some_and(|top| top.same_identity(&target))
        {
            state.focus_stack.pop();
        }
        tracing::debug!(%target, "focus stack push");
        state.focus_stack.push(FocusStackEntry::new(target, now));

        let overflow = state.focus_stack.len().saturating_sub(self.max_depth);
        if overflow > 0 {
            state.focus_stack.drain(..overflow);
        }
        self.save(&state)
    }

    /// Remove and return the most recent unexpired entry
    pub fn peek_and_pop(&self) -> Result<Option<FocusStackEntry>, ActivationError> {
        let _guard = self.lock.lock();
        let mut state = self.load()?;
        let pruned = self.prune_entries(&mut state, self.clock.epoch_ms());
        let entry = state.focus_stack.pop();
        if entry.is_some() || pruned > 0 {
            self.save(&state)?;
        }
        Ok(entry)
    }

    /// Drop entries older than the retention; returns how many were removed
    pub fn prune(&self, now_ms: u64) -> Result<usize, ActivationError> {
        let _guard = self.lock.lock();
        let mut state = self.load()?;
        let pruned = self.prune_entries(&mut state, now_ms);
        if pruned > 0 {
            self.save(&state)?;
        }
        Ok(pruned)
    }

    /// Current entries, oldest first, without modifying the store
    pub fn entries(&self) -> Result<Vec<FocusStackEntry>, ActivationError> {
        let _guard = self.lock.lock();
        let now = self.clock.epoch_ms();
        let max_age_ms = self.max_age.as_millis() as u64;
        Ok(self
            .load()?
            .focus_stack
            .into_iter()
            .filter(|e| e.age_ms(now) <= max_age_ms)
            .collect())
    }

    fn prune_entries(&self, state: &mut PersistedState, now_ms: u64) -> usize {
        let max_age_ms = self.max_age.as_millis() as u64;
        let before = state.focus_stack.len();
        state.focus_stack.retain(|e| e.age_ms(now_ms) <= max_age_ms);
        let pruned = before - state.focus_stack.len();
        if pruned > 0 {
            tracing::debug!(pruned, "expired focus entries");
        }
        pruned
    }

    fn load(&self) -> Result<PersistedState, ActivationError> {
        self.store
            .load()
            .map_err(|e| ActivationError::StateLoadFailed {
                message: e.to_string(),
            })
    }

    fn save(&self, state: &PersistedState) -> Result<(), ActivationError> {
        self.store
            .save(state)
            .map_err(|e| ActivationError::StateSaveFailed {
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "focus_stack_tests.rs"]
mod tests;

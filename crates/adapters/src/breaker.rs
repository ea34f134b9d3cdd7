// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Circuit breaker around the window manager CLI.
//!
//! A single timeout trips the breaker; while open every call fails fast
//! without touching the process. The breaker closes once the cooldown has
//! elapsed, regardless of what happened in between. Calls are serialized so
//! a caller queued behind a timing-out call observes the trip instead of
//! spending its own timeout budget.

use crate::runner::RunError;
use ap_core::{CircuitSnapshot, Clock};
use parking_lot::Mutex;
use serde::Serialize;
use std::future::Future;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors that decide whether they count as a breaker failure
pub trait TripsBreaker {
    fn trips_breaker(&self) -> bool;
}

impl TripsBreaker for RunError {
    fn trips_breaker(&self) -> bool {
        self.is_timeout()
    }
}

/// Result of a guarded call
#[derive(Debug, Error)]
pub enum BreakerError<E> {
    #[error("circuit '{name}' is open; retry in {}ms", remaining.as_millis())]
    Open { name: String, remaining: Duration },
    #[error("{0}")]
    Inner(E),
}

/// Point-in-time view of a breaker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakerStatus {
    pub name: String,
    pub is_open: bool,
    /// Trips since the last successful call
    pub failure_count: u32,
    pub cooldown_remaining_ms: Option<u64>,
}

#[derive(Debug, Default)]
struct BreakerState {
    is_open: bool,
    opened_at: Option<Instant>,
    failure_count: u32,
}

/// Shared breaker; hold it in an `Arc` so all clients of one binary share state.
pub struct CircuitBreaker<C: Clock> {
    name: String,
    cooldown: Duration,
    clock: C,
    state: Mutex<BreakerState>,
    gate: tokio::sync::Mutex<()>,
}

impl<C: Clock> CircuitBreaker<C> {
    pub fn new(name: impl Into<String>, cooldown: Duration, clock: C) -> Self {
        Self {
            name: name.into(),
            cooldown,
            clock,
            state: Mutex::new(BreakerState::default()),
            gate: tokio::sync::Mutex::new(()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run `op` unless the breaker is open.
    pub async fn call<T, E, F, Fut>(&self, op: F) -> Result<T, BreakerError<E>>
    where
        E: TripsBreaker,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.admit()?;
        let _turn = self.gate.lock().await;
        // The call ahead of us may have tripped the breaker
        self.admit()?;

        match op().await {
            Ok(value) => {
                self.state.lock().failure_count = 0;
                Ok(value)
            }
            Err(e) => {
                if e.trips_breaker() {
                    self.trip();
                }
                Err(BreakerError::Inner(e))
            }
        }
    }

    pub fn status(&self) -> BreakerStatus {
        let state = self.state.lock();
        let remaining = if state.is_open {
            self.remaining(&state)
        } else {
            None
        };
        BreakerStatus {
            name: self.name.clone(),
            is_open: remaining.is_some(),
            failure_count: state.failure_count,
            cooldown_remaining_ms: remaining.map(|d| d.as_millis() as u64),
        }
    }

    pub fn is_open(&self) -> bool {
        self.status().is_open
    }

    /// Wall-clock form of the current state, for handing to the next process
    pub fn snapshot(&self) -> CircuitSnapshot {
        let state = self.state.lock();
        let opened_at_ms = match (state.is_open, state.opened_at) {
            (true, Some(opened_at)) => {
                let elapsed = self.clock.now().saturating_duration_since(opened_at);
                Some(
                    self.clock
                        .epoch_ms()
                        .saturating_sub(elapsed.as_millis() as u64),
                )
            }
            _ => None,
        };
        CircuitSnapshot {
            opened_at_ms,
            failure_count: state.failure_count,
        }
    }

    /// Adopt a snapshot taken by an earlier process.
    ///
    /// A trip whose cooldown has already elapsed leaves the breaker closed.
    pub fn restore(&self, snapshot: CircuitSnapshot) {
        let mut state = self.state.lock();
        state.failure_count = snapshot.failure_count;
        state.is_open = false;
        state.opened_at = None;

        let Some(opened_at_ms) = snapshot.opened_at_ms else {
            return;
        };
        let elapsed = Duration::from_millis(self.clock.epoch_ms().saturating_sub(opened_at_ms));
        if elapsed >= self.cooldown {
            return;
        }
        let now = self.clock.now();
        state.is_open = true;
        state.opened_at = Some(now.checked_sub(elapsed).unwrap_or(now));
        tracing::info!(
            breaker = %self.name,
            remaining_ms = (self.cooldown - elapsed).as_millis() as u64,
            "restored open circuit"
        );
    }

    fn admit<E>(&self) -> Result<(), BreakerError<E>> {
        let mut state = self.state.lock();
        if !state.is_open {
            return Ok(());
        }
        match self.remaining(&state) {
            Some(remaining) => Err(BreakerError::Open {
                name: self.name.clone(),
                remaining,
            }),
            None => {
                state.is_open = false;
                state.opened_at = None;
                tracing::info!(breaker = %self.name, "cooldown elapsed, closing");
                Ok(())
            }
        }
    }

    fn trip(&self) {
        let mut state = self.state.lock();
        state.is_open = true;
        state.opened_at = Some(self.clock.now());
        state.failure_count += 1;
        tracing::warn!(
            breaker = %self.name,
            failures = state.failure_count,
            cooldown_ms = self.cooldown.as_millis() as u64,
            "timeout, opening circuit"
        );
    }

    /// Cooldown left, or `None` once it has fully elapsed
    fn remaining(&self, state: &BreakerState) -> Option<Duration> {
        let opened_at = state.opened_at?;
        let elapsed = self.clock.now().saturating_duration_since(opened_at);
        if elapsed < self.cooldown {
            Some(self.cooldown - elapsed)
        } else {
            None
        }
    }
}

#[cfg(test)]
#[path = "breaker_tests.rs"]
mod tests;

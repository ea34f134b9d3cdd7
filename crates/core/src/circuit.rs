// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Breaker state carried between invocations

use serde::{Deserialize, Serialize};

/// Persisted form of a circuit breaker.
///
/// Wall-clock based so a trip recorded by one process is honored by the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitSnapshot {
    /// When the breaker opened, epoch ms; `None` while closed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opened_at_ms: Option<u64>,
    #[serde(default)]
    pub failure_count: u32,
}

impl CircuitSnapshot {
    /// Closed with no recorded trips
    pub fn is_clear(&self) -> bool {
        self.opened_at_ms.is_none() && self.failure_count == 0
    }
}

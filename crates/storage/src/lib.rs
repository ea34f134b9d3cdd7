// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Storage layer for Agent Panel: state that must survive between CLI runs

mod lock;
mod state;
mod store;

pub use lock::StateLock;
pub use state::{PersistedState, CURRENT_STATE_VERSION};
pub use store::{JsonStateStore, StateError, StateStore};

#[cfg(any(test, feature = "test-support"))]
pub use store::MemoryStateStore;

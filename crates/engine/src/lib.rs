// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Agent Panel orchestration engine: window location, layout, focus
//! history, and project activation and close

mod cancel;
mod error;
mod focus_stack;
pub mod layout;
mod locator;
mod orchestrator;

pub use cancel::CancelFlag;
pub use error::{ActivationError, Warning};
pub use focus_stack::FocusStack;
pub use layout::{compute_layout, DisplayMode, LayoutError, NormalizedRect};
pub use locator::{LocateError, Located, LocatorTiming, Stage, StagedLocator, WindowLocator};
pub use orchestrator::{
    ActivationResult, ActivationState, CloseResult, Orchestrator, OrchestratorDeps,
    RestoredFocus, ReturnResult,
};

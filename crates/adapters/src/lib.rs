// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: processes, AeroSpace, app launch and the display

pub mod breaker;
pub mod launch;
pub mod runner;
pub mod screen;
pub mod traced;
pub mod wm;

pub use breaker::{BreakerError, BreakerStatus, CircuitBreaker, TripsBreaker};
pub use launch::{AppLauncher, LaunchError, SystemLauncher};
pub use runner::{CommandOutput, CommandRunner, ProcessRunner, RunError};
pub use screen::{MacScreen, ScreenError, ScreenInfo, ScreenMetrics, WindowPositioner};
pub use traced::{TracedLauncher, TracedWindowManager};
pub use wm::{AeroSpaceClient, WindowManager, WindowQuery, WindowScope, WmError};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use launch::{FakeLauncher, LaunchBehavior, LaunchCall};
#[cfg(any(test, feature = "test-support"))]
pub use runner::{FakeResponse, FakeRunner, RunCall};
#[cfg(any(test, feature = "test-support"))]
pub use screen::{FakeScreen, FrameCall};
#[cfg(any(test, feature = "test-support"))]
pub use wm::{FakeWindowManager, WmCall, WmOp};

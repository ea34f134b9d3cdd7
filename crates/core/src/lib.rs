// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ap-core: Core types for the Agent Panel (ap) workspace orchestrator

pub mod circuit;
pub mod clock;
pub mod config;
pub mod focus;
pub mod geometry;
pub mod id;
pub mod project;
pub mod slug;
pub mod window;

pub use circuit::CircuitSnapshot;
pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;
pub use config::{
    AeroSpaceConfig, ChromeConfig, Config, ConfigError, EditorConfig, FocusConfig, Justify,
    LayoutConfig, LocatorConfig, ProjectConfig,
};
pub use focus::{FocusStackEntry, FocusTarget};
pub use geometry::Rect;
pub use id::{IdGen, SequentialIdGen, UuidIdGen};
pub use project::{Project, ProjectId, Role, WindowTag, WorkspaceName, WORKSPACE_PREFIX};
pub use slug::slugify;
pub use window::WindowRecord;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Layout engine: display mode and per-role target rectangles.
//!
//! Pure functions only. Rects are fractions of the visible frame so one
//! layout definition applies at any resolution.

use ap_core::{Justify, LayoutConfig, Rect, Role};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Every window maximized
    Compact,
    /// Windows side by side
    Wide,
}

impl DisplayMode {
    /// Mode for a main display `pixel_width` pixels wide
    pub fn for_width(pixel_width: u32, threshold_px: u32) -> Self {
        if pixel_width < threshold_px {
            DisplayMode::Compact
        } else {
            DisplayMode::Wide
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Compact => f.write_str("compact"),
            DisplayMode::Wide => f.write_str("wide"),
        }
    }
}

/// Rectangle in fractions of the visible frame, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NormalizedRect {
    pub const FULL: NormalizedRect = NormalizedRect {
        x: 0.0,
        y: 0.0,
        width: 1.0,
        height: 1.0,
    };

    /// Absolute rect inside `frame`
    pub fn to_frame(&self, frame: Rect) -> Rect {
        Rect::new(
            frame.x + self.x * frame.width,
            frame.y + self.y * frame.height,
            self.width * frame.width,
            self.height * frame.height,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("visible frame is empty: {width}x{height}")]
    EmptyFrame { width: f64, height: f64 },
}

/// Compute target rects for `roles` on a display in `mode`.
///
/// Wide mode places roles left to right in [`Role`] order (editor, then
/// browser). If the configured widths plus gaps exceed the frame they are
/// scaled down proportionally.
pub fn compute_layout(
    mode: DisplayMode,
    visible_frame: Rect,
    roles: &[Role],
    config: &LayoutConfig,
) -> Result<BTreeMap<Role, NormalizedRect>, LayoutError> {
    if visible_frame.is_empty() {
        return Err(LayoutError::EmptyFrame {
            width: visible_frame.width,
            height: visible_frame.height,
        });
    }

    let mut ordered: Vec<Role> = roles.to_vec();
    ordered.sort();
    ordered.dedup();

    if mode == DisplayMode::Compact {
        return Ok(ordered
            .into_iter()
            .map(|role| (role, NormalizedRect::FULL))
            .collect());
    }

    let widths: Vec<f64> = ordered.iter().map(|r| role_width(*r, config)).collect();
    let gaps = config.gap * ordered.len().saturating_sub(1) as f64;
    let total = widths.iter().sum::<f64>() + gaps;
    let scale = if total > 1.0 { 1.0 / total } else { 1.0 };
    let used = total * scale;

    let mut x = match config.justify {
        Justify::Left => 0.0,
        Justify::Center => (1.0 - used) / 2.0,
        Justify::Right => 1.0 - used,
    };
    let height = config.height.min(1.0);
    let y = (1.0 - height) / 2.0;

    let mut rects = BTreeMap::new();
    for (role, width) in ordered.into_iter().zip(widths) {
        let width = width * scale;
        rects.insert(
            role,
            NormalizedRect {
                x,
                y,
                width,
                height,
            },
        );
        x += width + config.gap * scale;
    }
    Ok(rects)
}

fn role_width(role: Role, config: &LayoutConfig) -> f64 {
    match role {
        Role::Editor => config.editor_width,
        Role::Browser => config.browser_width,
    }
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;

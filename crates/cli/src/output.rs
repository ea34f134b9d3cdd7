// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rendering command results as text or JSON

use ap_engine::{ActivationResult, CloseResult, RestoredFocus, ReturnResult, Warning};
use clap::ValueEnum;
use serde::Serialize;

use crate::color;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print a serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print warnings to stderr so stdout stays parseable.
pub fn print_warnings(warnings: &[Warning]) {
    for warning in warnings {
        eprintln!("{} {}", color::yellow("warning:"), warning);
    }
}

pub fn describe_restored(restored: &RestoredFocus) -> String {
    match restored {
        RestoredFocus::Window { window_id } => format!("window {}", window_id),
        RestoredFocus::App { bundle_id } => format!("app {}", bundle_id),
        RestoredFocus::Workspace { name } => format!("workspace {} (fallback)", name),
    }
}

pub fn format_activation(result: &ActivationResult) -> String {
    let layout = match result.layout {
        Some(mode) => format!("{} layout", mode),
        None => "layout unchanged".to_string(),
    };
    format!(
        "Activated {} on {}\n  editor   {}\n  browser  {}\n  {}",
        result.project,
        color::header(&result.workspace),
        result.editor_window_id,
        result.browser_window_id,
        color::context(&layout),
    )
}

pub fn format_close(result: &CloseResult) -> String {
    let noun = if result.closed.len() == 1 {
        "window"
    } else {
        "windows"
    };
    format!(
        "Closed {} {} for {}; focus returned to {}",
        result.closed.len(),
        noun,
        result.project,
        describe_restored(&result.restored),
    )
}

pub fn format_return(result: &ReturnResult) -> String {
    format!("Returned to {}", describe_restored(&result.restored))
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parsing of AeroSpace CLI output.
//!
//! Window listings use a fixed `||`-delimited format. The title is the last
//! field so it may itself contain the delimiter; every other field must be
//! present and well formed or the whole listing is rejected.

use super::WmError;
use ap_core::WindowRecord;

/// `--format` argument for window listings
pub const WINDOW_FORMAT: &str =
    "%{window-id}||%{app-bundle-id}||%{workspace}||%{window-title}";

const FIELD_DELIMITER: &str = "||";
const FIELD_COUNT: usize = 4;

/// Parse a window listing; blank lines are ignored.
pub fn parse_windows(command: &str, stdout: &str) -> Result<Vec<WindowRecord>, WmError> {
    stdout
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_window_line(command, idx + 1, line))
        .collect()
}

fn parse_window_line(command: &str, line_no: usize, line: &str) -> Result<WindowRecord, WmError> {
    let error = |reason: String| WmError::Parse {
        command: command.to_string(),
        line: line_no,
        reason,
    };

    let fields: Vec<&str> = line.splitn(FIELD_COUNT, FIELD_DELIMITER).collect();
    if fields.len() != FIELD_COUNT {
        return Err(error(format!(
            "expected {} fields, found {} in {:?}",
            FIELD_COUNT,
            fields.len(),
            line
        )));
    }

    let window_id = fields[0]
        .trim()
        .parse::<u64>()
        .map_err(|_| error(format!("invalid window id {:?}", fields[0])))?;
    let app_bundle_id = fields[1].trim();
    if app_bundle_id.is_empty() {
        return Err(error("empty app bundle id".to_string()));
    }
    let workspace = fields[2].trim();
    if workspace.is_empty() {
        return Err(error("empty workspace".to_string()));
    }

    Ok(WindowRecord {
        window_id,
        app_bundle_id: app_bundle_id.to_string(),
        workspace: workspace.to_string(),
        title: fields[3].to_string(),
    })
}

/// Parse a workspace listing, one name per line.
pub fn parse_workspaces(command: &str, stdout: &str) -> Result<Vec<String>, WmError> {
    let mut names = Vec::new();
    for (idx, line) in stdout.lines().enumerate() {
        let name = line.trim();
        if name.is_empty() {
            continue;
        }
        if name.contains(char::is_whitespace) {
            return Err(WmError::Parse {
                command: command.to_string(),
                line: idx + 1,
                reason: format!("workspace name contains whitespace: {:?}", name),
            });
        }
        names.push(name.to_string());
    }
    Ok(names)
}

/// Exactly one workspace is focused at a time.
pub fn parse_focused_workspace(command: &str, stdout: &str) -> Result<String, WmError> {
    let mut names = parse_workspaces(command, stdout)?;
    match names.len() {
        1 => Ok(names.remove(0)),
        n => Err(WmError::Parse {
            command: command.to_string(),
            line: 1,
            reason: format!("expected one focused workspace, found {}", n),
        }),
    }
}

/// At most one window is focused.
pub fn parse_focused_window(
    command: &str,
    stdout: &str,
) -> Result<Option<WindowRecord>, WmError> {
    let mut windows = parse_windows(command, stdout)?;
    match windows.len() {
        0 => Ok(None),
        1 => Ok(windows.pop()),
        n => Err(WmError::Parse {
            command: command.to_string(),
            line: 1,
            reason: format!("expected at most one focused window, found {}", n),
        }),
    }
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory window manager for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{WindowManager, WindowQuery, WmError};
use ap_core::WindowRecord;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::sync::Arc;

/// Operation kinds, used to inject failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WmOp {
    ListWorkspaces,
    FocusedWorkspace,
    ListWindows,
    FocusedWindow,
    MoveWindow,
    FocusWindow,
    CloseWindow,
    SummonWorkspace,
    FocusWorkspace,
    ReloadConfig,
    CheckCompatibility,
}

/// Recorded window manager call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WmCall {
    ListWorkspaces,
    FocusedWorkspace,
    ListWindows { query: WindowQuery },
    FocusedWindow,
    MoveWindow { window_id: u64, workspace: String },
    FocusWindow { window_id: u64 },
    CloseWindow { window_id: u64 },
    SummonWorkspace { workspace: String },
    FocusWorkspace { workspace: String },
    ReloadConfig,
    CheckCompatibility,
}

impl WmCall {
    pub fn op(&self) -> WmOp {
        match self {
            WmCall::ListWorkspaces => WmOp::ListWorkspaces,
            WmCall::FocusedWorkspace => WmOp::FocusedWorkspace,
            WmCall::ListWindows { .. } => WmOp::ListWindows,
            WmCall::FocusedWindow => WmOp::FocusedWindow,
            WmCall::MoveWindow { .. } => WmOp::MoveWindow,
            WmCall::FocusWindow { .. } => WmOp::FocusWindow,
            WmCall::CloseWindow { .. } => WmOp::CloseWindow,
            WmCall::SummonWorkspace { .. } => WmOp::SummonWorkspace,
            WmCall::FocusWorkspace { .. } => WmOp::FocusWorkspace,
            WmCall::ReloadConfig => WmOp::ReloadConfig,
            WmCall::CheckCompatibility => WmOp::CheckCompatibility,
        }
    }
}

/// A window that materializes after a number of further queries
struct PendingWindow {
    queries_left: u32,
    window: WindowRecord,
    focus: bool,
}

struct FakeWmState {
    windows: BTreeMap<u64, WindowRecord>,
    workspaces: BTreeSet<String>,
    focused_workspace: String,
    focused_window: Option<u64>,
    next_id: u64,
    pending: Vec<PendingWindow>,
    calls: Vec<WmCall>,
    failures: HashMap<WmOp, VecDeque<WmError>>,
    summon_ignored: bool,
    move_steals_focus_to: Option<String>,
    missing_features: Vec<String>,
}

impl FakeWmState {
    /// Materialize pending windows whose countdown has run out
    fn tick(&mut self) {
        let mut ready = Vec::new();
        self.pending.retain_mut(|p| {
            if p.queries_left == 0 {
                ready.push((p.window.clone(), p.focus));
                false
            } else {
                p.queries_left -= 1;
                true
            }
        });
        for (window, focus) in ready {
            if focus {
                self.focused_window = Some(window.window_id);
            }
            self.workspaces.insert(window.workspace.clone());
            self.windows.insert(window.window_id, window);
        }
    }

    fn record(&mut self, call: WmCall) -> Result<(), WmError> {
        let op = call.op();
        self.calls.push(call);
        self.tick();
        match self.failures.get_mut(&op).and_then(VecDeque::pop_front) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn require_window(&self, command: &str, window_id: u64) -> Result<(), WmError> {
        if self.windows.contains_key(&window_id) {
            Ok(())
        } else {
            Err(WmError::CommandFailed {
                command: format!("aerospace {} --window-id {}", command, window_id),
                exit_code: 1,
                stderr: format!("Invalid <window-id> {}", window_id),
            })
        }
    }
}

/// In-memory window manager. Clones share state.
#[derive(Clone)]
pub struct FakeWindowManager {
    inner: Arc<Mutex<FakeWmState>>,
}

impl Default for FakeWindowManager {
    fn default() -> Self {
        let mut workspaces = BTreeSet::new();
        workspaces.insert("1".to_string());
        Self {
            inner: Arc::new(Mutex::new(FakeWmState {
                windows: BTreeMap::new(),
                workspaces,
                focused_workspace: "1".to_string(),
                focused_window: None,
                next_id: 100,
                pending: Vec::new(),
                calls: Vec::new(),
                failures: HashMap::new(),
                summon_ignored: false,
                move_steals_focus_to: None,
                missing_features: Vec::new(),
            })),
        }
    }
}

impl FakeWindowManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a window with the next free id
    pub fn add_window(&self, bundle_id: &str, workspace: &str, title: &str) -> u64 {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.workspaces.insert(workspace.to_string());
        inner.windows.insert(id, window_record(id, bundle_id, workspace, title));
        id
    }

    /// Add a window with a specific id
    pub fn add_window_with_id(&self, id: u64, bundle_id: &str, workspace: &str, title: &str) {
        let mut inner = self.inner.lock();
        inner.next_id = inner.next_id.max(id + 1);
        inner.workspaces.insert(workspace.to_string());
        inner.windows.insert(id, window_record(id, bundle_id, workspace, title));
    }

    /// Add a window that appears after `queries` more calls; returns its id
    pub fn add_window_later(
        &self,
        queries: u32,
        bundle_id: &str,
        workspace: &str,
        title: &str,
        focus: bool,
    ) -> u64 {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.pending.push(PendingWindow {
            queries_left: queries,
            window: window_record(id, bundle_id, workspace, title),
            focus,
        });
        id
    }

    pub fn remove_window(&self, id: u64) {
        let mut inner = self.inner.lock();
        inner.windows.remove(&id);
        if inner.focused_window == Some(id) {
            inner.focused_window = None;
        }
    }

    pub fn set_focused_workspace(&self, workspace: &str) {
        let mut inner = self.inner.lock();
        inner.workspaces.insert(workspace.to_string());
        inner.focused_workspace = workspace.to_string();
    }

    /// Focus a window; its workspace becomes the focused workspace.
    pub fn set_focused_window(&self, id: Option<u64>) {
        let mut inner = self.inner.lock();
        inner.focused_window = id;
        let workspace = id
            .and_then(|id| inner.windows.get(&id))
            .map(|w| w.workspace.clone());
        if let Some(ws) = workspace {
            inner.focused_workspace = ws;
        }
    }

    /// Fail the next call of `op` with `err` (queued)
    pub fn fail_next(&self, op: WmOp, err: WmError) {
        self.inner.lock().failures.entry(op).or_default().push_back(err);
    }

    /// Summon and workspace switches are accepted but change nothing
    pub fn set_summon_ignored(&self, ignored: bool) {
        self.inner.lock().summon_ignored = ignored;
    }

    /// Every move switches the focused workspace to `workspace`
    pub fn set_move_steals_focus_to(&self, workspace: Option<&str>) {
        self.inner.lock().move_steals_focus_to = workspace.map(str::to_string);
    }

    pub fn set_missing_features(&self, missing: Vec<String>) {
        self.inner.lock().missing_features = missing;
    }

    pub fn calls(&self) -> Vec<WmCall> {
        self.inner.lock().calls.clone()
    }

    pub fn call_count(&self, op: WmOp) -> usize {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|c| c.op() == op)
            .count()
    }

    pub fn window(&self, id: u64) -> Option<WindowRecord> {
        self.inner.lock().windows.get(&id).cloned()
    }

    pub fn windows(&self) -> Vec<WindowRecord> {
        self.inner.lock().windows.values().cloned().collect()
    }

    pub fn current_workspace(&self) -> String {
        self.inner.lock().focused_workspace.clone()
    }

    pub fn current_window(&self) -> Option<u64> {
        self.inner.lock().focused_window
    }
}

fn window_record(id: u64, bundle_id: &str, workspace: &str, title: &str) -> WindowRecord {
    WindowRecord {
        window_id: id,
        app_bundle_id: bundle_id.to_string(),
        workspace: workspace.to_string(),
        title: title.to_string(),
    }
}

#[async_trait]
impl WindowManager for FakeWindowManager {
    async fn list_workspaces(&self) -> Result<Vec<String>, WmError> {
        let mut inner = self.inner.lock();
        inner.record(WmCall::ListWorkspaces)?;
        let mut names = inner.workspaces.clone();
        names.extend(inner.windows.values().map(|w| w.workspace.clone()));
        Ok(names.into_iter().collect())
    }

    async fn focused_workspace(&self) -> Result<String, WmError> {
        let mut inner = self.inner.lock();
        inner.record(WmCall::FocusedWorkspace)?;
        Ok(inner.focused_workspace.clone())
    }

    async fn list_windows(&self, query: &WindowQuery) -> Result<Vec<WindowRecord>, WmError> {
        let mut inner = self.inner.lock();
        inner.record(WmCall::ListWindows {
            query: query.clone(),
        })?;
        Ok(inner
            .windows
            .values()
            .filter(|w| query.matches(w))
            .cloned()
            .collect())
    }

    async fn focused_window(&self) -> Result<Option<WindowRecord>, WmError> {
        let mut inner = self.inner.lock();
        inner.record(WmCall::FocusedWindow)?;
        Ok(inner
            .focused_window
            .and_then(|id| inner.windows.get(&id))
            .cloned())
    }

    async fn move_window(&self, window_id: u64, workspace: &str) -> Result<(), WmError> {
        let mut inner = self.inner.lock();
        inner.record(WmCall::MoveWindow {
            window_id,
            workspace: workspace.to_string(),
        })?;
        inner.require_window("move-node-to-workspace", window_id)?;
        inner.workspaces.insert(workspace.to_string());
        if let Some(window) = inner.windows.get_mut(&window_id) {
            window.workspace = workspace.to_string();
        }
        if let Some(ws) = inner.move_steals_focus_to.clone() {
            inner.focused_workspace = ws;
        }
        Ok(())
    }

    async fn focus_window(&self, window_id: u64) -> Result<(), WmError> {
        let mut inner = self.inner.lock();
        inner.record(WmCall::FocusWindow { window_id })?;
        inner.require_window("focus", window_id)?;
        let workspace = inner.windows.get(&window_id).map(|w| w.workspace.clone());
        if let Some(ws) = workspace {
            inner.focused_workspace = ws;
        }
        inner.focused_window = Some(window_id);
        Ok(())
    }

    async fn close_window(&self, window_id: u64) -> Result<(), WmError> {
        let mut inner = self.inner.lock();
        inner.record(WmCall::CloseWindow { window_id })?;
        inner.require_window("close", window_id)?;
        inner.windows.remove(&window_id);
        if inner.focused_window == Some(window_id) {
            inner.focused_window = None;
        }
        Ok(())
    }

    async fn summon_workspace(&self, workspace: &str) -> Result<(), WmError> {
        let mut inner = self.inner.lock();
        inner.record(WmCall::SummonWorkspace {
            workspace: workspace.to_string(),
        })?;
        if !inner.summon_ignored {
            inner.workspaces.insert(workspace.to_string());
            inner.focused_workspace = workspace.to_string();
        }
        Ok(())
    }

    async fn focus_workspace(&self, workspace: &str) -> Result<(), WmError> {
        let mut inner = self.inner.lock();
        inner.record(WmCall::FocusWorkspace {
            workspace: workspace.to_string(),
        })?;
        if !inner.summon_ignored {
            inner.workspaces.insert(workspace.to_string());
            inner.focused_workspace = workspace.to_string();
        }
        Ok(())
    }

    async fn reload_config(&self) -> Result<(), WmError> {
        self.inner.lock().record(WmCall::ReloadConfig)
    }

    async fn check_compatibility(&self) -> Result<(), WmError> {
        let mut inner = self.inner.lock();
        inner.record(WmCall::CheckCompatibility)?;
        if inner.missing_features.is_empty() {
            Ok(())
        } else {
            Err(WmError::Incompatible {
                missing: inner.missing_features.clone(),
            })
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;

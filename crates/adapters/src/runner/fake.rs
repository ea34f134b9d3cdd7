// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted command runner for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{CommandOutput, CommandRunner, RunError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

/// Recorded invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCall {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

/// Scripted outcome for one invocation
#[derive(Debug, Clone)]
pub enum FakeResponse {
    Output(CommandOutput),
    Timeout,
    NotFound,
}

impl FakeResponse {
    pub fn stdout(stdout: impl Into<String>) -> Self {
        FakeResponse::Output(CommandOutput::ok(stdout))
    }

    pub fn exit(code: i32, stderr: impl Into<String>) -> Self {
        FakeResponse::Output(CommandOutput::failed(code, stderr))
    }
}

#[derive(Default)]
struct FakeRunnerState {
    /// Keyed by the full argument list; the last queued response is sticky
    responses: HashMap<Vec<String>, VecDeque<FakeResponse>>,
    fallback: Option<FakeResponse>,
    calls: Vec<RunCall>,
}

/// Command runner answering from a script.
///
/// Unscripted invocations succeed with empty output unless a fallback is set.
#[derive(Clone, Default)]
pub struct FakeRunner {
    inner: Arc<Mutex<FakeRunnerState>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for an exact argument list
    pub fn on(&self, args: &[&str], response: FakeResponse) {
        let key = args.iter().map(|s| s.to_string()).collect();
        self.inner
            .lock()
            .responses
            .entry(key)
            .or_default()
            .push_back(response);
    }

    /// Response for any invocation without a scripted entry
    pub fn set_fallback(&self, response: FakeResponse) {
        self.inner.lock().fallback = Some(response);
    }

    pub fn calls(&self) -> Vec<RunCall> {
        self.inner.lock().calls.clone()
    }

    /// Argument lists of all invocations, in order
    pub fn invocations(&self) -> Vec<Vec<String>> {
        self.inner
            .lock()
            .calls
            .iter()
            .map(|c| c.args.clone())
            .collect()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<CommandOutput, RunError> {
        let response = {
            let mut inner = self.inner.lock();
            inner.calls.push(RunCall {
                program: program.to_string(),
                args: args.to_vec(),
                timeout,
            });
            let scripted = inner.responses.get_mut(args).and_then(|queue| {
                if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                }
            });
            scripted.or_else(|| inner.fallback.clone())
        };

        match response {
            None => Ok(CommandOutput::default()),
            Some(FakeResponse::Output(output)) => Ok(output),
            Some(FakeResponse::Timeout) => Err(RunError::Timeout {
                program: program.to_string(),
                timeout,
            }),
            Some(FakeResponse::NotFound) => Err(RunError::NotFound {
                program: program.to_string(),
            }),
        }
    }
}

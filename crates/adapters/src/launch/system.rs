// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Launches VS Code and Chrome through their command-line entry points.
//!
//! VS Code is opened on a generated `.code-workspace` file whose
//! `window.title` starts with the project tag. Chrome is opened with
//! `--window-name` set to the tag.

use super::{AppLauncher, LaunchError};
use crate::runner::{describe, CommandRunner, RunError, LAUNCH_TIMEOUT, OSASCRIPT_TIMEOUT};
use ap_core::{ChromeConfig, EditorConfig, Project, Role};
use async_trait::async_trait;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Bundle id of the frontmost application process
const FRONTMOST_SCRIPT: &str = "tell application \"System Events\" to get bundle identifier \
of first application process whose frontmost is true";

#[derive(Clone)]
pub struct SystemLauncher<R> {
    runner: R,
    state_dir: PathBuf,
    editor: EditorConfig,
    chrome: ChromeConfig,
}

impl<R: CommandRunner> SystemLauncher<R> {
    pub fn new(runner: R, state_dir: PathBuf, editor: EditorConfig, chrome: ChromeConfig) -> Self {
        Self {
            runner,
            state_dir,
            editor,
            chrome,
        }
    }

    /// Location of a project's generated workspace file
    pub fn workspace_file(&self, project: &Project) -> PathBuf {
        self.state_dir
            .join("vscode")
            .join(format!("{}.code-workspace", project.id))
    }

    async fn run(
        &self,
        program: &str,
        args: Vec<String>,
        timeout: Duration,
    ) -> Result<String, LaunchError> {
        let command = describe(program, &args);
        let output = self
            .runner
            .run(program, &args, timeout)
            .await
            .map_err(|e| LaunchError::Unavailable {
                command: command.clone(),
                message: match e {
                    RunError::NotFound { .. } => format!("{} is not on PATH", program),
                    other => other.to_string(),
                },
            })?;
        if !output.success() {
            return Err(LaunchError::CommandFailed {
                command,
                exit_code: output.exit_code,
                stderr: output.stderr.trim().to_string(),
            });
        }
        Ok(output.stdout)
    }

    async fn launch_editor(&self, project: &Project) -> Result<(), LaunchError> {
        let path = self.workspace_file(project);
        write_workspace_file(&path, project)?;
        let args = vec![
            "--new-window".to_string(),
            path.to_string_lossy().into_owned(),
        ];
        self.run(&self.editor.command, args, LAUNCH_TIMEOUT).await?;
        Ok(())
    }

    async fn launch_browser(&self, project: &Project) -> Result<(), LaunchError> {
        let urls = self.chrome.seed_urls(project);
        let args = browser_args(&self.chrome.app_name, project, &urls);
        self.run("open", args, LAUNCH_TIMEOUT).await?;
        Ok(())
    }
}

fn write_workspace_file(path: &Path, project: &Project) -> Result<(), LaunchError> {
    let error = |e: std::io::Error| LaunchError::WorkspaceFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(error)?;
    }
    let contents = serde_json::to_string_pretty(&workspace_file_contents(project))
        .map_err(|e| LaunchError::WorkspaceFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    std::fs::write(path, contents).map_err(error)
}

/// Contents of the generated VS Code workspace file
pub fn workspace_file_contents(project: &Project) -> serde_json::Value {
    let title = format!(
        "{} - ${{activeEditorShort}}${{separator}}${{rootName}}",
        project.tag()
    );
    match &project.remote {
        Some(authority) => json!({
            "folders": [{
                "uri": format!("vscode-remote://ssh-remote+{}{}", authority, project.path),
            }],
            "remoteAuthority": format!("ssh-remote+{}", authority),
            "settings": { "window.title": title },
        }),
        None => json!({
            "folders": [{ "path": project.path }],
            "settings": { "window.title": title },
        }),
    }
}

/// `open` arguments for a new tagged Chrome window
pub fn browser_args(app_name: &str, project: &Project, urls: &[String]) -> Vec<String> {
    let mut args = vec![
        "-na".to_string(),
        app_name.to_string(),
        "--args".to_string(),
        "--new-window".to_string(),
        format!("--window-name={}", project.tag()),
    ];
    args.extend(urls.iter().cloned());
    args
}

#[async_trait]
impl<R: CommandRunner> AppLauncher for SystemLauncher<R> {
    async fn launch(&self, role: Role, project: &Project) -> Result<(), LaunchError> {
        match role {
            Role::Editor => self.launch_editor(project).await,
            Role::Browser => self.launch_browser(project).await,
        }
    }

    async fn activate_app(&self, bundle_id: &str) -> Result<(), LaunchError> {
        let args = vec!["-b".to_string(), bundle_id.to_string()];
        self.run("open", args, LAUNCH_TIMEOUT).await?;
        Ok(())
    }

    async fn frontmost_app(&self) -> Result<Option<String>, LaunchError> {
        let args = vec!["-e".to_string(), FRONTMOST_SCRIPT.to_string()];
        let stdout = self.run("osascript", args, OSASCRIPT_TIMEOUT).await?;
        let bundle_id = stdout.trim();
        Ok((!bundle_id.is_empty() && bundle_id != "missing value").then(|| bundle_id.to_string()))
    }
}

#[cfg(test)]
#[path = "system_tests.rs"]
mod tests;

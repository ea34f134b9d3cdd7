// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User configuration (TOML).
//!
//! Every section is optional. Projects are validated and resolved when the
//! file is loaded, so the rest of the system only ever sees well-formed
//! [`Project`] values.

use crate::project::{Project, ProjectId, Role};
use crate::slug::{is_slug, slugify, MAX_SLUG_LEN};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    Missing(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid project '{project}': {message}")]
    InvalidProject { project: String, message: String },
    #[error("invalid [{section}] setting: {message}")]
    InvalidSetting {
        section: &'static str,
        message: String,
    },
}

/// AeroSpace CLI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AeroSpaceConfig {
    /// Binary name or path
    pub binary: String,
    /// Per-invocation timeout
    pub timeout_ms: u64,
    /// How long the circuit breaker stays open after a timeout
    pub cooldown_secs: u64,
}

impl Default for AeroSpaceConfig {
    fn default() -> Self {
        Self {
            binary: "aerospace".to_string(),
            timeout_ms: 5_000,
            cooldown_secs: 30,
        }
    }
}

/// Horizontal placement of the window group in wide mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justify {
    #[default]
    Left,
    Center,
    Right,
}

/// Layout settings. Widths, height and gap are fractions of the visible frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Main displays narrower than this many pixels use compact mode
    pub small_screen_threshold_px: u32,
    pub height: f64,
    pub editor_width: f64,
    pub browser_width: f64,
    pub gap: f64,
    pub justify: Justify,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            small_screen_threshold_px: 3840,
            height: 1.0,
            editor_width: 0.55,
            browser_width: 0.44,
            gap: 0.01,
            justify: Justify::Left,
        }
    }
}

/// Focus history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FocusConfig {
    pub max_depth: usize,
    pub max_age_secs: u64,
    /// Workspace focused on close when no prior context can be restored
    pub fallback_workspace: String,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            max_depth: 20,
            max_age_secs: 24 * 60 * 60,
            fallback_workspace: "1".to_string(),
        }
    }
}

/// Editor launch settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// VS Code command-line launcher
    pub command: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            command: "code".to_string(),
        }
    }
}

/// Browser launch and tab seeding settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChromeConfig {
    /// Application name passed to `open -na`
    pub app_name: String,
    /// Opened first in every project window
    pub pinned_tabs: Vec<String>,
    /// Opened after project tabs
    pub default_tabs: Vec<String>,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            app_name: "Google Chrome".to_string(),
            pinned_tabs: Vec::new(),
            default_tabs: Vec::new(),
        }
    }
}

impl ChromeConfig {
    /// Launch URLs for a project: pinned, project, then default tabs,
    /// de-duplicated keeping the first occurrence.
    pub fn seed_urls(&self, project: &Project) -> Vec<String> {
        let mut seen = HashSet::new();
        self.pinned_tabs
            .iter()
            .chain(project.chrome_urls.iter())
            .chain(self.default_tabs.iter())
            .filter(|url| seen.insert(url.as_str()))
            .cloned()
            .collect()
    }
}

/// Window locator timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocatorConfig {
    /// Budget for the post-launch workspace poll
    pub short_poll_ms: u64,
    /// Overall deadline for finding a launched window
    pub deadline_ms: u64,
    /// Roles that may fall back to an all-workspace scan
    pub global_scan_roles: Vec<Role>,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            short_poll_ms: 700,
            deadline_ms: 10_000,
            global_scan_roles: vec![Role::Browser],
        }
    }
}

/// A `[[project]]` table as written by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub remote: Option<String>,
    #[serde(default)]
    pub chrome_urls: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    aerospace: AeroSpaceConfig,
    layout: LayoutConfig,
    focus: FocusConfig,
    editor: EditorConfig,
    chrome: ChromeConfig,
    locator: LocatorConfig,
    #[serde(rename = "project")]
    projects: Vec<ProjectConfig>,
}

/// Validated configuration snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Config {
    pub aerospace: AeroSpaceConfig,
    pub layout: LayoutConfig,
    pub focus: FocusConfig,
    pub editor: EditorConfig,
    pub chrome: ChromeConfig,
    pub locator: LocatorConfig,
    pub projects: Vec<Project>,
}

impl Config {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::Missing(path.to_path_buf()))
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::parse(&content)
    }

    /// Parse and validate config content.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        validate_layout(&file.layout)?;
        if file.focus.max_depth == 0 {
            return Err(ConfigError::InvalidSetting {
                section: "focus",
                message: "max_depth must be at least 1".to_string(),
            });
        }
        if file.aerospace.binary.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                section: "aerospace",
                message: "binary must not be empty".to_string(),
            });
        }
        let projects = resolve_projects(file.projects)?;
        Ok(Self {
            aerospace: file.aerospace,
            layout: file.layout,
            focus: file.focus,
            editor: file.editor,
            chrome: file.chrome,
            locator: file.locator,
            projects,
        })
    }

    /// Look up a project by id
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }
}

fn validate_layout(layout: &LayoutConfig) -> Result<(), ConfigError> {
    let fractions = [
        ("height", layout.height),
        ("editor_width", layout.editor_width),
        ("browser_width", layout.browser_width),
    ];
    for (name, value) in fractions {
        if !(value > 0.0 && value <= 1.0) {
            return Err(ConfigError::InvalidSetting {
                section: "layout",
                message: format!("{} must be in (0, 1], got {}", name, value),
            });
        }
    }
    if !(0.0..0.5).contains(&layout.gap) {
        return Err(ConfigError::InvalidSetting {
            section: "layout",
            message: format!("gap must be in [0, 0.5), got {}", layout.gap),
        });
    }
    if layout.small_screen_threshold_px == 0 {
        return Err(ConfigError::InvalidSetting {
            section: "layout",
            message: "small_screen_threshold_px must be positive".to_string(),
        });
    }
    Ok(())
}

fn resolve_projects(raw: Vec<ProjectConfig>) -> Result<Vec<Project>, ConfigError> {
    let mut seen = HashSet::new();
    let mut projects = Vec::with_capacity(raw.len());

    for entry in raw {
        let invalid = |message: String| ConfigError::InvalidProject {
            project: entry.name.clone(),
            message,
        };

        if entry.name.trim().is_empty() {
            return Err(invalid("name must not be empty".to_string()));
        }

        let id = match &entry.id {
            Some(id) if is_slug(id) => id.clone(),
            Some(id) => {
                return Err(invalid(format!(
                    "id '{}' must contain only lowercase letters, digits and inner hyphens",
                    id
                )))
            }
            None => slugify(&entry.name, MAX_SLUG_LEN),
        };
        if id.is_empty() {
            return Err(invalid("cannot derive an id from the name".to_string()));
        }
        if !seen.insert(id.clone()) {
            return Err(invalid(format!("duplicate project id '{}'", id)));
        }

        if entry.path.trim().is_empty() {
            return Err(invalid("path must not be empty".to_string()));
        }
        let path = match &entry.remote {
            Some(remote) => {
                if remote.trim().is_empty() || remote.chars().any(char::is_whitespace) {
                    return Err(invalid(format!("invalid SSH authority '{}'", remote)));
                }
                if !entry.path.starts_with('/') {
                    return Err(invalid(
                        "remote projects need an absolute path".to_string(),
                    ));
                }
                entry.path.clone()
            }
            None => expand_home(&entry.path),
        };

        projects.push(Project {
            id: ProjectId::new(id),
            name: entry.name.clone(),
            path,
            color: entry.color.clone().unwrap_or_else(|| "blue".to_string()),
            remote: entry.remote.clone(),
            chrome_urls: entry.chrome_urls.clone(),
        });
    }

    Ok(projects)
}

/// Expand a leading `~/` against the home directory
fn expand_home(path: &str) -> String {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest).to_string_lossy().into_owned(),
        _ => path.to_string(),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Projects and the names derived from them.
//!
//! A project id deterministically yields both its AeroSpace workspace name
//! (`ap-<id>`) and the tag embedded in its window titles (`AP:<id>`). The tag
//! is the only way a window is claimed by a project.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix shared by every project workspace
pub const WORKSPACE_PREFIX: &str = "ap-";

/// Prefix of the title tag that claims a window for a project
const TAG_PREFIX: &str = "AP:";

/// Slug identifying a project; primary key for workspace and tag derivation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Wrap an id that is already a valid slug
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for ProjectId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ProjectId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A configured project. Immutable for the duration of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    /// Local path, or the path on the remote host when `remote` is set
    pub path: String,
    pub color: String,
    /// SSH authority (`user@host` or a `~/.ssh/config` alias) for remote projects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    /// URLs seeded into the project's browser window
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chrome_urls: Vec<String>,
}

impl Project {
    pub fn workspace(&self) -> WorkspaceName {
        WorkspaceName::for_project(&self.id)
    }

    pub fn tag(&self) -> WindowTag {
        WindowTag::for_project(&self.id)
    }

    pub fn is_remote(&self) -> bool {
        self.remote.is_some()
    }
}

/// AeroSpace workspace dedicated to one project
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkspaceName(String);

impl WorkspaceName {
    pub fn for_project(id: &ProjectId) -> Self {
        Self(format!("{}{}", WORKSPACE_PREFIX, id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a raw workspace name belongs to some project
    pub fn is_project_workspace(name: &str) -> bool {
        name.len() > WORKSPACE_PREFIX.len() && name.starts_with(WORKSPACE_PREFIX)
    }

    /// Recover the project id from a raw workspace name
    pub fn project_id(name: &str) -> Option<ProjectId> {
        if Self::is_project_workspace(name) {
            Some(ProjectId::new(&name[WORKSPACE_PREFIX.len()..]))
        } else {
            None
        }
    }
}

impl fmt::Display for WorkspaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for WorkspaceName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for WorkspaceName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Title token claiming a window for a project
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowTag(String);

impl WindowTag {
    pub fn for_project(id: &ProjectId) -> Self {
        Self(format!("{}{}", TAG_PREFIX, id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `title` carries this tag as a whole token.
    ///
    /// The character following the tag must not continue a slug, so
    /// `AP:demo` does not claim a window titled `AP:demo-2 - main.rs`.
    pub fn matches(&self, title: &str) -> bool {
        title.match_indices(self.0.as_str()).any(|(idx, _)| {
            let next = title[idx + self.0.len()..].chars().next();
            !matches!(next, Some(c) if is_slug_char(c))
        })
    }
}

fn is_slug_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl fmt::Display for WindowTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two windows every project owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Editor,
    Browser,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Editor, Role::Browser];

    /// macOS bundle id of the application that fills this role
    pub fn bundle_id(self) -> &'static str {
        match self {
            Role::Editor => "com.microsoft.VSCode",
            Role::Browser => "com.google.Chrome",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Editor => "editor",
            Role::Browser => "browser",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;

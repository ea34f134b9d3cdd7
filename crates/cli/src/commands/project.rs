// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ap activate`, `ap close` and `ap list`

use anyhow::Result;
use ap_adapters::WindowManager;
use ap_core::{Config, Project};
use ap_engine::{ActivationError, CancelFlag};
use clap::Args;
use serde::Serialize;

use crate::app::App;
use crate::exit_error::{ExitError, EXIT_INTERRUPTED};
use crate::output::{self, OutputFormat};
use crate::table::{Column, Table};

#[derive(Args, Debug)]
pub struct ProjectArg {
    /// Project id (see `ap list`)
    pub project: String,
}

pub async fn activate(app: &App, args: ProjectArg, format: OutputFormat) -> Result<()> {
    let cancel = CancelFlag::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };
    let outcome = app.activate(&args.project, &cancel).await;
    interrupt.abort();

    let result = match outcome {
        Ok(result) => result,
        Err(ActivationError::Cancelled) => {
            return Err(ExitError::new(EXIT_INTERRUPTED, "activation interrupted").into())
        }
        Err(e) => return Err(e.into()),
    };

    match format {
        OutputFormat::Text => {
            println!("{}", output::format_activation(&result));
            output::print_warnings(&result.warnings);
        }
        OutputFormat::Json => output::print_json(&result)?,
    }
    Ok(())
}

pub async fn close(app: &App, args: ProjectArg, format: OutputFormat) -> Result<()> {
    let result = app.close(&args.project).await?;
    match format {
        OutputFormat::Text => {
            println!("{}", output::format_close(&result));
            output::print_warnings(&result.warnings);
        }
        OutputFormat::Json => output::print_json(&result)?,
    }
    Ok(())
}

/// One configured project as shown by `ap list`
#[derive(Debug, Serialize, PartialEq)]
pub struct ListEntry {
    pub id: String,
    pub name: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    pub workspace: String,
    pub tag: String,
    /// Whether the workspace currently exists; `None` when AeroSpace was unreachable
    pub open: Option<bool>,
}

pub fn entries(projects: &[Project], open_workspaces: Option<&[String]>) -> Vec<ListEntry> {
    projects
        .iter()
        .map(|p| {
            let workspace = p.workspace();
            ListEntry {
                id: p.id.to_string(),
                name: p.name.clone(),
                path: match &p.remote {
                    Some(remote) => format!("{}:{}", remote, p.path),
                    None => p.path.clone(),
                },
                remote: p.remote.clone(),
                open: open_workspaces.map(|open| open.iter().any(|w| workspace == w.as_str())),
                workspace: workspace.to_string(),
                tag: p.tag().to_string(),
            }
        })
        .collect()
}

/// List configured projects.
///
/// The open column is best effort: an unreachable window manager is logged
/// and leaves it unknown rather than failing the listing.
pub async fn list<W: WindowManager>(config: &Config, wm: &W, format: OutputFormat) -> Result<()> {
    let open = match wm.list_workspaces().await {
        Ok(names) => Some(names),
        Err(e) => {
            tracing::warn!(error = %e, "workspace listing unavailable");
            None
        }
    };
    let entries = entries(&config.projects, open.as_deref());

    match format {
        OutputFormat::Json => output::print_json(&entries)?,
        OutputFormat::Text => {
            if entries.is_empty() {
                println!("No projects configured");
                return Ok(());
            }
            let mut table = Table::new(vec![
                Column::left("ID"),
                Column::left("NAME"),
                Column::muted("WORKSPACE"),
                Column::muted("TAG"),
                Column::status("OPEN"),
                Column::left("PATH").with_max(48),
            ]);
            for e in &entries {
                table.row(vec![
                    e.id.clone(),
                    e.name.clone(),
                    e.workspace.clone(),
                    e.tag.clone(),
                    open_cell(e.open).to_string(),
                    e.path.clone(),
                ]);
            }
            table.render(&mut std::io::stdout().lock())?;
        }
    }
    Ok(())
}

fn open_cell(open: Option<bool>) -> &'static str {
    match open {
        Some(true) => "active",
        Some(false) => "-",
        None => "?",
    }
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;

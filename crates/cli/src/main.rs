// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ap - Agent Panel workspace orchestrator

mod app;
mod color;
mod commands;
mod env;
mod exit_error;
mod logging;
mod output;
mod table;

use output::OutputFormat;
use std::sync::Arc;

use anyhow::Result;
use ap_core::Config;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use commands::{aerospace, focus, project};

#[derive(Parser)]
#[command(
    name = "ap",
    version,
    about = "Agent Panel - one AeroSpace workspace per project"
)]
struct Cli {
    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Bring a project's editor and browser into its workspace and focus it
    Activate(project::ProjectArg),
    /// Close a project's workspace windows and return to the previous context
    Close(project::ProjectArg),
    /// Return to the window or app that was focused before the last activation
    Return,
    /// List configured projects
    List,
    /// Verify the AeroSpace CLI supports every flag ap uses
    Check,
    /// Reload the AeroSpace configuration
    Reload,
}

fn cli_command() -> clap::Command {
    Cli::command()
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        let code = e
            .downcast_ref::<exit_error::ExitError>()
            .map_or(1, |c| c.code);
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(code);
    }
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, we skip
/// the "Caused by" chain to avoid noisy duplicate output (common when
/// thiserror variants use `#[error("... {0}")]` with `#[from]`).
/// Otherwise we render the full chain so context isn't lost.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

async fn run() -> Result<()> {
    let matches = cli_command().get_matches();
    let cli = Cli::from_arg_matches(&matches)?;
    let format = cli.output;

    let Some(command) = cli.command else {
        cli_command().print_help()?;
        println!();
        return Ok(());
    };

    let paths = app::Paths::from_env()?;
    let _log_guard = match logging::setup_logging(&paths.state_dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("{} logging disabled: {:#}", color::yellow("warning:"), e);
            None
        }
    };
    let config = app::load_config(&paths.config)?;

    let session = app::Session::open(&config, &paths).await?;
    let outcome = dispatch(command, &session, config, &paths, format).await;
    // A trip must reach the next invocation even when this one failed
    if let Err(e) = session.save() {
        tracing::warn!(error = %format!("{e:#}"), "breaker state not saved");
    }
    outcome
}

async fn dispatch(
    command: Commands,
    session: &app::Session,
    config: Arc<Config>,
    paths: &app::Paths,
    format: OutputFormat,
) -> Result<()> {
    match command {
        // Window manager only
        Commands::List => {
            let wm = session.window_manager(&config);
            project::list(&config, &wm, format).await
        }
        Commands::Check => aerospace::check(&session.window_manager(&config), format).await,
        Commands::Reload => aerospace::reload(&session.window_manager(&config), format).await,

        // Full orchestrator with focus history
        Commands::Activate(args) => {
            let app = session.build(config, paths);
            project::activate(&app, args, format).await
        }
        Commands::Close(args) => {
            let app = session.build(config, paths);
            project::close(&app, args, format).await
        }
        Commands::Return => {
            let app = session.build(config, paths);
            focus::return_to_previous(&app, format).await
        }
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

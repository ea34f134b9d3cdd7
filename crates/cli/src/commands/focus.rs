// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ap return`

use anyhow::Result;

use crate::app::App;
use crate::output::{self, OutputFormat};

/// Pop the focus history and return to the most recent live entry.
pub async fn return_to_previous(app: &App, format: OutputFormat) -> Result<()> {
    let result = app.return_to_previous().await?;
    match format {
        OutputFormat::Text => {
            println!("{}", output::format_return(&result));
            output::print_warnings(&result.warnings);
        }
        OutputFormat::Json => output::print_json(&result)?,
    }
    Ok(())
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ap check` and `ap reload`

use anyhow::Result;
use ap_adapters::WindowManager;
use ap_engine::ActivationError;

use crate::color;
use crate::output::{self, OutputFormat};

/// Verify the installed AeroSpace CLI advertises every flag `ap` relies on.
pub async fn check<W: WindowManager>(wm: &W, format: OutputFormat) -> Result<()> {
    wm.check_compatibility()
        .await
        .map_err(ActivationError::from)?;
    match format {
        OutputFormat::Text => println!("AeroSpace CLI: {}", color::status("ok")),
        OutputFormat::Json => output::print_json(&serde_json::json!({ "compatible": true }))?,
    }
    Ok(())
}

pub async fn reload<W: WindowManager>(wm: &W, format: OutputFormat) -> Result<()> {
    wm.reload_config().await.map_err(ActivationError::from)?;
    match format {
        OutputFormat::Text => println!("AeroSpace config reloaded"),
        OutputFormat::Json => output::print_json(&serde_json::json!({ "reloaded": true }))?,
    }
    Ok(())
}

//! Export command - turn a .trace into parseable files

use anyhow::{anyhow, Context, Result};
use std::path::Path;

use crate::config::ProjectConfig;
use crate::xctrace::{export_trace, ExportFormat, XcTrace};

/// Run the export command
pub fn run(trace: &Path, out: &Path, format: Option<&str>, config: &ProjectConfig) -> Result<()> {
    let format = match format {
        Some(name) => name.parse::<ExportFormat>().map_err(|e| anyhow!(e))?,
        None => config.export.export_format(),
    };
    let xctrace = XcTrace::new().with_export_timeout(config.export.timeout());

    let out_dir = export_trace(&xctrace, trace, out, format).context("export failed")?;
    println!("{}", out_dir.display());
    Ok(())
}

//! Summarize command - Markdown summary and Graphviz output

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::config::ProjectConfig;
use crate::pipeline::Pipeline;
use crate::reporters::{report_with_format, OutputFormat};
use crate::xctrace::{XcTrace, XcodeExporter};

/// Run the summarize command
pub fn run(input: &Path, out: &Path, dot: &Path, config: &ProjectConfig) -> Result<()> {
    let exporter = XcodeExporter::new(
        XcTrace::new().with_export_timeout(config.export.timeout()),
        config.export.export_format(),
    );
    let analysis = Pipeline::new(Box::new(exporter))
        .with_thresholds(config.thresholds)
        .run(input)?;
    info!("Summarized {}", analysis.summary());

    for (format, path) in [(OutputFormat::Markdown, out), (OutputFormat::Dot, dot)] {
        let rendered = report_with_format(&analysis.report, format)?;
        std::fs::write(path, rendered)
            .with_context(|| format!("Failed to write {} output to {}", format, path.display()))?;
    }

    println!("{}\n{}", out.display(), dot.display());
    Ok(())
}

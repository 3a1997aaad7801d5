//! Analyze command - JSON report for AI agents

use anyhow::{Context, Result};
use console::{style, Term};
use std::path::PathBuf;
use tracing::debug;

use crate::config::ProjectConfig;
use crate::pipeline::Pipeline;
use crate::report::Report;
use crate::reporters::{report_with_format, OutputFormat};
use crate::scoring::HealthStatus;
use crate::xctrace::{XcTrace, XcodeExporter};

pub struct AnalyzeArgs {
    pub input: PathBuf,
    pub source: Option<PathBuf>,
    pub out: PathBuf,
    pub compact: bool,
    pub stdout: bool,
    pub config: ProjectConfig,
}

/// Run the analyze command
pub fn run(args: AnalyzeArgs) -> Result<()> {
    let config = &args.config;
    let exporter = XcodeExporter::new(
        XcTrace::new().with_export_timeout(config.export.timeout()),
        config.export.export_format(),
    );

    let mut pipeline = Pipeline::new(Box::new(exporter))
        .with_thresholds(config.thresholds)
        .with_exclude_dirs(config.correlation.exclude_dirs.clone());
    if let Some(source) = &args.source {
        pipeline = pipeline.with_source_root(source);
    }
    let analysis = pipeline.run(&args.input)?;
    let report = &analysis.report;

    let format = OutputFormat::json(args.compact);
    let json = report_with_format(report, format)?;

    if args.stdout {
        println!("{}", json);
        return Ok(());
    }

    std::fs::write(&args.out, json)
        .with_context(|| format!("Failed to write report to {}", args.out.display()))?;
    debug!("Wrote {} report to {}", format, args.out.display());
    println!("{}", args.out.display());
    print_summary(report, args.source.is_some())?;
    Ok(())
}

/// Short human summary on stderr, keeping stdout for the report path
fn print_summary(report: &Report, with_sources: bool) -> Result<()> {
    let term = Term::stderr();
    let s = &report.summary;

    let score = match s.health_status {
        HealthStatus::Good => style(s.performance_score).green(),
        HealthStatus::Warning => style(s.performance_score).yellow(),
        HealthStatus::Critical => style(s.performance_score).red(),
    };

    term.write_line(&format!("\n{}", style("Analysis complete:").bold()))?;
    term.write_line(&format!(
        "  Performance Score: {}/100 ({})",
        score.bold(),
        s.health_status
    ))?;
    term.write_line(&format!(
        "  Issues Found: {} ({} critical, {} high)",
        s.issues_found,
        style(s.critical_issues).red(),
        style(s.high_issues).yellow()
    ))?;
    term.write_line(&format!(
        "  Graph: {} causes → {} states → {} views",
        s.total_causes, s.total_state_changes, s.total_view_updates
    ))?;
    if with_sources {
        term.write_line(&format!(
            "  Source correlations: {} matches",
            report.source_correlations.len()
        ))?;
    }
    Ok(())
}

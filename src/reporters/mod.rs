//! Output reporters for swiftuice analysis results
//!
//! Supports multiple output formats:
//! - `json` - The versioned report consumed by agents, pretty or single-line
//! - `markdown` - Human-readable summary of what could be extracted
//! - `dot` - Graphviz rendering of the cause-effect graph

mod dot;
mod markdown;

use crate::report::Report;
use anyhow::Result;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    /// Single-line JSON for piping
    JsonCompact,
    Markdown,
    Dot,
}

impl OutputFormat {
    /// JSON format for the `--compact` flag
    pub fn json(compact: bool) -> Self {
        if compact {
            OutputFormat::JsonCompact
        } else {
            OutputFormat::Json
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::JsonCompact => write!(f, "compact json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Dot => write!(f, "dot"),
        }
    }
}

/// Render a report using an OutputFormat enum
pub fn report_with_format(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::JsonCompact => Ok(serde_json::to_string(report)?),
        OutputFormat::Markdown => markdown::render(report),
        OutputFormat::Dot => dot::render(report),
    }
}

//! Analysis pipeline
//!
//! Orchestrates a full run:
//! 1. Index Swift sources (if a source root is given)
//! 2. Export the trace if needed, then parse it into a graph
//! 3. Run detectors
//! 4. Correlate graph nodes with source lines
//! 5. Assemble the report

use std::path::{Path, PathBuf};

use tracing::info;

use crate::correlation::Correlator;
use crate::detectors::{DetectorEngine, Thresholds};
use crate::graph::CauseEffectGraph;
use crate::parsers::{ingest, AnalyzeError, ParseStats};
use crate::report::{assemble_report, InputInfo, Report};
use crate::xctrace::{TraceExporter, XcodeExporter};

/// Full analysis pipeline.
pub struct Pipeline {
    exporter: Box<dyn TraceExporter>,
    thresholds: Thresholds,
    /// Swift project to correlate against
    source_root: Option<PathBuf>,
    exclude_dirs: Vec<String>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Box::new(XcodeExporter::default()))
    }
}

impl Pipeline {
    /// Create a pipeline exporting `.trace` inputs through `exporter`.
    pub fn new(exporter: Box<dyn TraceExporter>) -> Self {
        Self {
            exporter,
            thresholds: Thresholds::default(),
            source_root: None,
            exclude_dirs: Vec::new(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Correlate against Swift files under `root`.
    pub fn with_source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.source_root = Some(root.into());
        self
    }

    /// Extra directory names skipped while indexing sources.
    pub fn with_exclude_dirs(mut self, dirs: Vec<String>) -> Self {
        self.exclude_dirs = dirs;
        self
    }

    /// Run every stage on `input` (a `.trace` bundle, a directory or a file).
    pub fn run(&self, input: &Path) -> Result<Analysis, AnalyzeError> {
        // An unreadable source root fails before any parsing starts
        let mut correlator = match &self.source_root {
            Some(root) => Some(
                Correlator::with_excludes(root, &self.exclude_dirs).map_err(|source| {
                    AnalyzeError::Io {
                        path: root.clone(),
                        source,
                    }
                })?,
            ),
            None => None,
        };

        let ingested = ingest(input, self.exporter.as_ref())?;
        let issues = DetectorEngine::new(&self.thresholds).run(&ingested.graph);
        let matches = correlator
            .as_mut()
            .map(|c| c.correlate(&ingested.graph))
            .unwrap_or_default();

        let exported = ingested.input_dir.as_path() != input;
        let meta = InputInfo {
            trace_path: exported.then(|| input.display().to_string()),
            export_dir: Some(ingested.input_dir.display().to_string()),
            source_root: self.source_root.as_ref().map(|p| p.display().to_string()),
            files_parsed: ingested.stats.files_parsed,
            swift_files: correlator.as_ref().map_or(0, |c| c.file_count()),
            parse_hints: ingested.stats.hints.clone(),
        };

        let report = assemble_report(&ingested.graph, issues, matches, meta);
        info!(
            "Analysis complete: {} issues, score {} ({})",
            report.summary.issues_found,
            report.summary.performance_score,
            report.summary.health_status
        );

        Ok(Analysis {
            report,
            graph: ingested.graph,
            input_dir: ingested.input_dir,
            stats: ingested.stats,
        })
    }
}

/// Everything a run produced.
#[derive(Debug)]
pub struct Analysis {
    pub report: Report,
    pub graph: CauseEffectGraph,
    /// Directory (or file) that was actually parsed
    pub input_dir: PathBuf,
    pub stats: ParseStats,
}

impl Analysis {
    /// One-line summary for terminal output.
    pub fn summary(&self) -> String {
        let s = &self.report.summary;
        format!(
            "{} files, {} nodes, {} edges, {} issues ({} critical, {} high), score {}/100",
            self.stats.files_parsed,
            self.graph.node_count(),
            self.graph.edge_count(),
            s.issues_found,
            s.critical_issues,
            s.high_issues,
            s.performance_score
        )
    }
}

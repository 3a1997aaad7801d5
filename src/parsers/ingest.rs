//! Input resolution: a `.trace` bundle is exported first, anything else is
//! parsed in place.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use super::{parse_directory, ParseStats};
use crate::graph::CauseEffectGraph;
use crate::xctrace::{ExportError, TraceExporter};

/// Directory (next to the trace) that receives exported data
pub const EXPORT_DIR_NAME: &str = "exported";

#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("no parseable Cause & Effect data found; see trace/export limitations")]
    NoData,

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// A parsed input ready for detection
#[derive(Debug)]
pub struct Ingested {
    pub graph: CauseEffectGraph,
    /// Directory (or file) that was actually parsed
    pub input_dir: PathBuf,
    pub stats: ParseStats,
}

fn is_trace_bundle(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("trace"))
}

/// Resolve `input` to parseable data and build the graph.
///
/// A file ending in `.trace` is exported into a sibling `exported/`
/// directory first. A graph with no nodes or no edges is [`AnalyzeError::NoData`].
pub fn ingest(input: &Path, exporter: &dyn TraceExporter) -> Result<Ingested, AnalyzeError> {
    let meta = std::fs::metadata(input).map_err(|source| AnalyzeError::Io {
        path: input.to_path_buf(),
        source,
    })?;

    let input_dir = if !meta.is_dir() && is_trace_bundle(input) {
        let parent = input.parent().unwrap_or_else(|| Path::new("."));
        let out_dir = parent.join(EXPORT_DIR_NAME);
        info!("Exporting {} to {}", input.display(), out_dir.display());
        exporter.export(input, &out_dir)?
    } else {
        input.to_path_buf()
    };

    let mut graph = CauseEffectGraph::new();
    let stats = parse_directory(&input_dir, &mut graph);
    if !graph.has_data() {
        return Err(AnalyzeError::NoData);
    }

    info!(
        "Ingested {} files: {} nodes, {} edges",
        stats.files_parsed,
        graph.node_count(),
        graph.edge_count()
    );
    Ok(Ingested {
        graph,
        input_dir,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::tempdir;

    /// Writes a canned text export instead of calling xctrace
    #[derive(Default)]
    struct CannedExporter {
        calls: RefCell<Vec<(PathBuf, PathBuf)>>,
    }

    impl TraceExporter for CannedExporter {
        fn export(&self, trace: &Path, out_dir: &Path) -> Result<PathBuf, ExportError> {
            self.calls
                .borrow_mut()
                .push((trace.to_path_buf(), out_dir.to_path_buf()));
            fs::create_dir_all(out_dir).unwrap();
            fs::write(
                out_dir.join("data.txt"),
                "Button tap\nState change\nView update\n",
            )
            .unwrap();
            Ok(out_dir.to_path_buf())
        }
    }

    struct FailingExporter;

    impl TraceExporter for FailingExporter {
        fn export(&self, _trace: &Path, _out_dir: &Path) -> Result<PathBuf, ExportError> {
            Err(ExportError::UnsupportedPlatform("test"))
        }
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let dir = tempdir().unwrap();
        let err = ingest(&dir.path().join("nope"), &FailingExporter).unwrap_err();
        assert!(matches!(err, AnalyzeError::Io { .. }));
    }

    #[test]
    fn test_directory_input() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("log.txt"), "Timer\nState change\nView update\n").unwrap();
        let ingested = ingest(dir.path(), &FailingExporter).unwrap();
        assert_eq!(ingested.stats.files_parsed, 1);
        assert_eq!(ingested.graph.node_count(), 3);
        assert_eq!(ingested.input_dir, dir.path());
    }

    #[test]
    fn test_trace_file_is_exported_to_sibling_dir() {
        let dir = tempdir().unwrap();
        let trace = dir.path().join("run.trace");
        fs::write(&trace, "").unwrap();

        let exporter = CannedExporter::default();
        let ingested = ingest(&trace, &exporter).unwrap();

        let expected_out = dir.path().join(EXPORT_DIR_NAME);
        assert_eq!(*exporter.calls.borrow(), vec![(trace.clone(), expected_out.clone())]);
        assert_eq!(ingested.input_dir, expected_out);
        assert!(ingested.graph.has_data());
    }

    #[test]
    fn test_export_failure_propagates() {
        let dir = tempdir().unwrap();
        let trace = dir.path().join("run.TRACE");
        fs::write(&trace, "").unwrap();
        let err = ingest(&trace, &FailingExporter).unwrap_err();
        assert!(matches!(err, AnalyzeError::Export(_)));
    }

    #[test]
    fn test_empty_graph_is_no_data() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("log.txt"), "nothing relevant\n").unwrap();
        let err = ingest(dir.path(), &FailingExporter).unwrap_err();
        assert!(matches!(err, AnalyzeError::NoData));
        assert_eq!(
            err.to_string(),
            "no parseable Cause & Effect data found; see trace/export limitations"
        );
    }

    #[test]
    fn test_nodes_without_edges_is_no_data() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("log.txt"), "View update only\n").unwrap();
        assert!(matches!(
            ingest(dir.path(), &FailingExporter),
            Err(AnalyzeError::NoData)
        ));
    }
}

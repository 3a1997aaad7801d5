//! Trace export parsers
//!
//! Exported Instruments data arrives in loosely structured files. JSON
//! graph exports are decoded into typed records; everything else (and any
//! JSON that is not a graph export) is scanned line by line for keywords.
//!
//! Parsing is best effort: a file that fails to parse is recorded as a hint
//! and the walk continues.

pub mod free_text;
pub mod ingest;
pub mod structured;

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use thiserror::Error;
use tracing::{debug, warn};

use crate::graph::CauseEffectGraph;

pub use free_text::parse_free_text;
pub use ingest::{ingest, AnalyzeError, Ingested};
pub use structured::{parse_structured, StructuredOutcome};

/// Longest label kept for nodes discovered in free text
pub const MAX_LABEL_CHARS: usize = 120;

/// Errors raised while parsing a single file
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

/// How a file is handled, by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Text,
}

impl FileFormat {
    pub fn for_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(FileFormat::Json),
            "xml" | "csv" | "txt" => Some(FileFormat::Text),
            _ => None,
        }
    }
}

/// Bookkeeping from a directory parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Files dispatched to a parser, whether or not they parsed cleanly
    pub files_parsed: usize,
    /// Human-readable notes about skipped files and rejected records
    pub hints: Vec<String>,
}

/// Return `id` if non-empty, else a stable id derived from `label`.
///
/// The derived id is `n` followed by a 31-based rolling hash of the label's
/// characters, masked to 31 bits.
pub fn synthesize_id(id: &str, label: &str) -> String {
    if !id.is_empty() {
        return id.to_string();
    }
    let hash = label
        .chars()
        .fold(0u64, |h, c| (h * 31 + c as u64) & 0x7fff_ffff);
    format!("n{hash}")
}

/// Truncate to [`MAX_LABEL_CHARS`] characters, ending in an ellipsis when cut
pub fn truncate_label(text: &str) -> String {
    if text.chars().count() <= MAX_LABEL_CHARS {
        return text.to_string();
    }
    let mut out: String = text.chars().take(MAX_LABEL_CHARS - 1).collect();
    out.push('…');
    out
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse one file into `graph` according to its format
fn parse_file(
    path: &Path,
    format: FileFormat,
    graph: &mut CauseEffectGraph,
    stats: &mut ParseStats,
) -> Result<(), ParseError> {
    match format {
        FileFormat::Json => {
            let bytes = std::fs::read(path)?;
            match parse_structured(&bytes, graph)? {
                StructuredOutcome::Parsed {
                    nodes,
                    edges,
                    rejected_nodes,
                    rejected_edges,
                } => {
                    debug!(
                        "{}: graph export with {} nodes, {} edges",
                        path.display(),
                        nodes,
                        edges
                    );
                    if rejected_nodes + rejected_edges > 0 {
                        stats.hints.push(format!(
                            "JSON records rejected in {}: {} node(s), {} edge(s)",
                            display_name(path),
                            rejected_nodes,
                            rejected_edges
                        ));
                    }
                }
                StructuredOutcome::FallbackRequired => {
                    debug!(
                        "{}: not a graph export, scanning as text",
                        path.display()
                    );
                    parse_free_text(bytes.as_slice(), graph)?;
                }
            }
        }
        FileFormat::Text => {
            let file = std::fs::File::open(path)?;
            parse_free_text(std::io::BufReader::new(file), graph)?;
        }
    }
    Ok(())
}

/// Collect parseable files under `root` in a deterministic order
fn collect_files(root: &Path, stats: &mut ParseStats) -> Vec<(PathBuf, FileFormat)> {
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                stats.hints.push(format!("walk skipped entry: {}", e));
                continue;
            }
        };
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        if let Some(format) = FileFormat::for_path(entry.path()) {
            files.push((entry.into_path(), format));
        }
    }
    files
}

/// Parse every recognized file under `root` into `graph`.
///
/// `.json` files are decoded as structured exports, `.xml`/`.csv`/`.txt`
/// are scanned as text, anything else is ignored. One bad file never stops
/// the walk.
pub fn parse_directory(root: &Path, graph: &mut CauseEffectGraph) -> ParseStats {
    let mut stats = ParseStats::default();

    for (path, format) in collect_files(root, &mut stats) {
        if let Err(e) = parse_file(&path, format, graph, &mut stats) {
            warn!("Failed to parse {}: {}", path.display(), e);
            let kind = match format {
                FileFormat::Json => "JSON",
                FileFormat::Text => "text",
            };
            stats
                .hints
                .push(format!("{} parse skipped {}: {}", kind, display_name(&path), e));
        }
        stats.files_parsed += 1;
    }

    debug!(
        "Parsed {} files under {} ({} nodes, {} edges)",
        stats.files_parsed,
        root.display(),
        graph.node_count(),
        graph.edge_count()
    );
    stats
}

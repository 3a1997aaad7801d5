//! Source correlation
//!
//! Ties trace nodes back to Swift source lines. Symbols are pulled from each
//! node label and every indexed `.swift` file is scanned line by line; each
//! hit is scored by how much the line looks like a declaration of the kind
//! of thing the node represents.

mod patterns;
mod symbols;

pub use patterns::{MatchType, SymbolMatcher, CONTAINMENT_CONFIDENCE};
pub use symbols::{extract_symbols, is_stop_word};

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::graph::{CauseEffectGraph, Node, NodeKind};

/// Directories never searched for sources
pub const DEFAULT_EXCLUDED_DIRS: &[&str] =
    &[".git", "build", "DerivedData", "Pods", ".build", "node_modules"];

const MAX_SNIPPET_CHARS: usize = 120;

/// A source line believed to correspond to a trace node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMatch {
    pub trace_node_id: String,
    pub trace_label: String,
    pub node_type: NodeKind,
    pub file_path: String,
    pub relative_path: String,
    pub line_number: usize,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub code_snippet: String,
    pub match_type: MatchType,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub matched_symbol: String,
}

fn snippet(line: &str) -> String {
    let trimmed = line.trim();
    if trimmed.chars().count() <= MAX_SNIPPET_CHARS {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(MAX_SNIPPET_CHARS - 3).collect();
    out.push_str("...");
    out
}

/// Finds source locations for graph nodes
pub struct Correlator {
    source_root: PathBuf,
    files: Vec<PathBuf>,
    cache: HashMap<String, Vec<SourceMatch>>,
}

impl Correlator {
    /// Index `.swift` files under `source_root`, skipping the default
    /// build and dependency directories
    pub fn new(source_root: impl Into<PathBuf>) -> std::io::Result<Self> {
        Self::with_excludes(source_root, &[])
    }

    /// Like [`Correlator::new`], also skipping directories named in `extra_excludes`
    pub fn with_excludes(
        source_root: impl Into<PathBuf>,
        extra_excludes: &[String],
    ) -> std::io::Result<Self> {
        let source_root = source_root.into();
        // Surface a missing root as an error instead of an empty index
        std::fs::metadata(&source_root)?;

        let files = index_swift_files(&source_root, extra_excludes);
        info!(
            "Indexed {} Swift files under {}",
            files.len(),
            source_root.display()
        );
        Ok(Self {
            source_root,
            files,
            cache: HashMap::new(),
        })
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Matches for every node, in graph order
    pub fn correlate(&mut self, graph: &CauseEffectGraph) -> Vec<SourceMatch> {
        let mut all = Vec::new();
        for node in graph.nodes() {
            all.extend(self.correlate_node(node));
        }
        debug!("Correlated {} nodes, {} matches", graph.node_count(), all.len());
        all
    }

    /// Matches for one node, best first. Cached by node id.
    pub fn correlate_node(&mut self, node: &Node) -> Vec<SourceMatch> {
        if let Some(cached) = self.cache.get(&node.id) {
            return cached.clone();
        }
        let matches = self.scan(node);
        self.cache.insert(node.id.clone(), matches.clone());
        matches
    }

    /// Highest-confidence cached match for a node
    pub fn best_match(&self, node_id: &str) -> Option<&SourceMatch> {
        self.cache.get(node_id).and_then(|m| m.first())
    }

    fn scan(&self, node: &Node) -> Vec<SourceMatch> {
        let matchers: Vec<SymbolMatcher> = extract_symbols(&node.label)
            .iter()
            .map(|s| SymbolMatcher::new(s, node.kind))
            .collect();
        if matchers.is_empty() {
            return Vec::new();
        }

        // Per-file results come back in file order
        let per_file: Vec<Vec<SourceMatch>> = self
            .files
            .par_iter()
            .map(|path| self.scan_file(path, node, &matchers))
            .collect();

        let mut matches: Vec<SourceMatch> = per_file.into_iter().flatten().collect();
        // Stable: ties keep file, line and symbol order
        matches.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        matches
    }

    fn scan_file(&self, path: &Path, node: &Node, matchers: &[SymbolMatcher]) -> Vec<SourceMatch> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("Skipping unreadable {}: {}", path.display(), e);
                return Vec::new();
            }
        };
        let text = String::from_utf8_lossy(&bytes);
        let relative = path
            .strip_prefix(&self.source_root)
            .ok()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(path);

        let mut matches = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            for matcher in matchers {
                if let Some((confidence, match_type)) = matcher.score(line) {
                    matches.push(SourceMatch {
                        trace_node_id: node.id.clone(),
                        trace_label: node.label.clone(),
                        node_type: node.kind,
                        file_path: path.display().to_string(),
                        relative_path: relative.display().to_string(),
                        line_number: idx + 1,
                        code_snippet: snippet(line),
                        match_type,
                        confidence,
                        matched_symbol: matcher.symbol().to_string(),
                    });
                }
            }
        }
        matches
    }
}

fn index_swift_files(root: &Path, extra_excludes: &[String]) -> Vec<PathBuf> {
    let excluded: HashSet<String> = DEFAULT_EXCLUDED_DIRS
        .iter()
        .map(|s| s.to_string())
        .chain(extra_excludes.iter().cloned())
        .collect();

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            // never filter the root itself
            !(is_dir && entry.depth() > 0 && excluded.contains(&*entry.file_name().to_string_lossy()))
        })
        .build();

    walker
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_some_and(|t| t.is_file()))
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("swift"))
        })
        .map(|e| e.into_path())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn project() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("Sources/Views")).unwrap();
        fs::create_dir_all(root.join("Pods/Lib")).unwrap();
        fs::create_dir_all(root.join("Generated")).unwrap();
        fs::write(
            root.join("Sources/Views/ItemRow.swift"),
            "import SwiftUI\n\nstruct ItemRow: View {\n    @State private var isExpanded = false\n    var body: some View { Text(\"row\") }\n}\n",
        )
        .unwrap();
        fs::write(
            root.join("Sources/Views/ListView.swift"),
            "struct ListView: View {\n    var body: some View {\n        ForEach(items) { ItemRow() }\n    }\n}\n",
        )
        .unwrap();
        fs::write(root.join("Pods/Lib/ItemRow.swift"), "struct ItemRow: View {}\n").unwrap();
        fs::write(root.join("Generated/Gen.SWIFT"), "struct ItemRow: View {}\n").unwrap();
        fs::write(root.join("Sources/notes.txt"), "ItemRow").unwrap();
        dir
    }

    #[test]
    fn test_missing_root_is_error() {
        let dir = tempdir().unwrap();
        assert!(Correlator::new(dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_index_skips_excluded_dirs() {
        let dir = project();
        let correlator = Correlator::new(dir.path()).unwrap();
        // Sources/Views x2 plus Generated/Gen.SWIFT (extension is case-insensitive)
        assert_eq!(correlator.file_count(), 3);

        let extra = vec!["Generated".to_string()];
        let correlator = Correlator::with_excludes(dir.path(), &extra).unwrap();
        assert_eq!(correlator.file_count(), 2);
        assert_eq!(correlator.source_root(), dir.path());
    }

    #[test]
    fn test_view_declaration_is_best_match() {
        let dir = project();
        let mut correlator =
            Correlator::with_excludes(dir.path(), &["Generated".to_string()]).unwrap();
        let node = Node::view("v1", "ItemRow");

        let matches = correlator.correlate_node(&node);
        assert!(!matches.is_empty());
        let best = correlator.best_match("v1").unwrap();
        assert_eq!(best.confidence, 0.95);
        assert_eq!(best.match_type, MatchType::Exact);
        assert_eq!(best.line_number, 3);
        assert_eq!(best.matched_symbol, "ItemRow");
        assert!(best.relative_path.ends_with("ItemRow.swift"));
        assert_eq!(best.code_snippet, "struct ItemRow: View {");
    }

    #[test]
    fn test_matches_sorted_descending_and_stable() {
        let dir = project();
        let mut correlator =
            Correlator::with_excludes(dir.path(), &["Generated".to_string()]).unwrap();
        let matches = correlator.correlate_node(&Node::view("v1", "ItemRow"));

        for pair in matches.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
        // the fuzzy hit in ListView.swift comes after the declaration
        let last = matches.last().unwrap();
        assert!(last.file_path.ends_with("ListView.swift"));
        assert_eq!(last.match_type, MatchType::Fuzzy);
    }

    #[test]
    fn test_state_node_correlation() {
        let dir = project();
        let mut correlator = Correlator::new(dir.path()).unwrap();
        let node = Node::state("s1", "@State isExpanded");
        correlator.correlate_node(&node);
        let best = correlator.best_match("s1").unwrap();
        assert_eq!(best.confidence, 0.95);
        assert_eq!(best.line_number, 4);
    }

    #[test]
    fn test_correlate_covers_all_nodes_and_caches() {
        let dir = project();
        let mut correlator = Correlator::new(dir.path()).unwrap();
        let mut graph = CauseEffectGraph::new();
        graph.upsert_node(Node::view("v1", "ItemRow"));
        graph.upsert_node(Node::view("v2", "NoSuchThing"));

        let all = correlator.correlate(&graph);
        assert!(all.iter().all(|m| m.trace_node_id == "v1"));
        assert!(correlator.best_match("v1").is_some());
        assert!(correlator.best_match("v2").is_none());
        assert!(correlator.best_match("never-seen").is_none());

        // cache is keyed by id and not refreshed when the node changes
        let renamed = Node::view("v1", "ListView");
        let again = correlator.correlate_node(&renamed);
        assert!(again.iter().all(|m| m.matched_symbol == "ItemRow"));
    }

    #[test]
    fn test_stop_word_only_label_has_no_matches() {
        let dir = project();
        let mut correlator = Correlator::new(dir.path()).unwrap();
        assert!(correlator
            .correlate_node(&Node::view("v", "view body update"))
            .is_empty());
    }

    #[test]
    fn test_snippet_truncation() {
        let long = format!("   {}   ", "x".repeat(200));
        let s = snippet(&long);
        assert_eq!(s.chars().count(), MAX_SNIPPET_CHARS);
        assert!(s.ends_with("..."));
        assert_eq!(snippet("  short  "), "short");
    }
}

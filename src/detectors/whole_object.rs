//! Whole-object observation detector
//!
//! Heuristic: state with a generic model-like name that feeds several views
//! is probably an observable object passed around whole, so every view
//! re-renders whenever any property changes.

use tracing::debug;

use crate::detectors::base::Detector;
use crate::graph::{is_generic_object_label, CauseEffectGraph, NodeKind};
use crate::models::{Issue, IssueType, Severity};

const MIN_VIEWS: usize = 3;

/// Detects model objects observed wholesale by many views
#[derive(Default)]
pub struct WholeObjectDetector;

impl WholeObjectDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for WholeObjectDetector {
    fn name(&self) -> &'static str {
        "WholeObjectDetector"
    }

    fn description(&self) -> &'static str {
        "Detects model objects that many views observe as a whole"
    }

    fn issue_type(&self) -> IssueType {
        IssueType::WholeObjectPassing
    }

    fn detect(&self, graph: &CauseEffectGraph) -> Vec<Issue> {
        let mut issues = Vec::new();

        for state in graph
            .nodes_of_kind(NodeKind::State)
            .filter(|n| is_generic_object_label(&n.label))
        {
            let affected = graph.view_targets(&state.id).count();
            if affected < MIN_VIEWS {
                continue;
            }
            issues.push(
                Issue::new(
                    IssueType::WholeObjectPassing,
                    Severity::Medium,
                    format!("Possible whole-object observation: {}", state.label),
                    format!(
                        "'{}' appears to be a model/state object affecting {} views. Views may be re-rendering when only part of the object changes.",
                        state.label, affected
                    ),
                    "Unnecessary re-renders when unrelated properties change",
                    0.6,
                )
                .with_affected_nodes(vec![state.id.clone()])
                .with_hint("Use @Observable with fine-grained properties, or pass only required data to child views"),
            );
        }

        debug!("{} found {} issues", self.name(), issues.len());
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};

    fn graph(label: &str, views: usize) -> CauseEffectGraph {
        let mut graph = CauseEffectGraph::new();
        graph.upsert_node(Node::state("s", label));
        for i in 0..views {
            let id = format!("v{i}");
            graph.upsert_node(Node::view(id.clone(), format!("Row{i}")));
            graph.add_edge(Edge::updates("s", id));
        }
        graph
    }

    #[test]
    fn test_generic_name_with_three_views() {
        let issues = WholeObjectDetector::new().detect(&graph("CartViewModel", 3));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Medium);
        assert_eq!(issues[0].confidence, 0.6);
        assert_eq!(issues[0].affected_nodes, vec!["s"]);
        assert_eq!(issues[0].title, "Possible whole-object observation: CartViewModel");
    }

    #[test]
    fn test_specific_name_ignored() {
        assert!(WholeObjectDetector::new().detect(&graph("isLoading", 5)).is_empty());
    }

    #[test]
    fn test_too_few_views() {
        assert!(WholeObjectDetector::new().detect(&graph("DataStore", 2)).is_empty());
    }
}

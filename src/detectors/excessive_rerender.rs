//! Excessive re-render detector
//!
//! Flags views whose body was re-evaluated many times during the trace.
//! Frequent re-renders usually mean a view depends on more state than it
//! actually reads.

use tracing::debug;

use crate::detectors::base::{Detector, Thresholds};
use crate::graph::{CauseEffectGraph, NodeKind};
use crate::models::{Issue, IssueType, Severity};

/// Detects views with high update counts
pub struct ExcessiveRerenderDetector {
    threshold: u64,
}

impl ExcessiveRerenderDetector {
    pub fn new() -> Self {
        Self::with_thresholds(&Thresholds::default())
    }

    pub fn with_thresholds(thresholds: &Thresholds) -> Self {
        Self {
            threshold: thresholds.excessive_rerender_count,
        }
    }

    /// medium below 2x the threshold, high below 3x, critical beyond
    fn severity(&self, count: u64) -> Severity {
        if count < self.threshold.saturating_mul(2) {
            Severity::Medium
        } else if count < self.threshold.saturating_mul(3) {
            Severity::High
        } else {
            Severity::Critical
        }
    }
}

impl Default for ExcessiveRerenderDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ExcessiveRerenderDetector {
    fn name(&self) -> &'static str {
        "ExcessiveRerenderDetector"
    }

    fn description(&self) -> &'static str {
        "Detects views that re-render more often than expected"
    }

    fn issue_type(&self) -> IssueType {
        IssueType::ExcessiveRerender
    }

    fn detect(&self, graph: &CauseEffectGraph) -> Vec<Issue> {
        let issues: Vec<Issue> = graph
            .nodes_of_kind(NodeKind::View)
            .filter(|n| n.update_count >= self.threshold)
            .map(|node| {
                Issue::new(
                    IssueType::ExcessiveRerender,
                    self.severity(node.update_count),
                    format!("Excessive re-renders in {}", node.label),
                    format!(
                        "View '{}' updated {} times during the trace. This suggests the view's dependencies are changing more frequently than necessary.",
                        node.label, node.update_count
                    ),
                    "High CPU usage, potential frame drops, battery drain",
                    0.85,
                )
                .with_affected_nodes(vec![node.id.clone()])
                .with_update_count(node.update_count)
                .with_hint("Consider using EquatableView, extracting subviews, or checking if @ObservedObject can be replaced with more granular @State")
            })
            .collect();

        debug!("{} found {} issues", self.name(), issues.len());
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};

    fn graph_with_view(count: u64) -> CauseEffectGraph {
        let mut graph = CauseEffectGraph::new();
        graph.upsert_node(Node::state("s", "AppState"));
        graph.upsert_node(Node::view("v", "ItemRow").with_count(count));
        graph.add_edge(Edge::updates("s", "v"));
        graph
    }

    #[test]
    fn test_below_threshold_not_flagged() {
        let issues = ExcessiveRerenderDetector::new().detect(&graph_with_view(9));
        assert!(issues.is_empty());
    }

    #[test]
    fn test_severity_bands() {
        let detector = ExcessiveRerenderDetector::new();
        let cases = [
            (10, Severity::Medium),
            (19, Severity::Medium),
            (20, Severity::High),
            (29, Severity::High),
            (30, Severity::Critical),
            (50, Severity::Critical),
        ];
        for (count, expected) in cases {
            let issues = detector.detect(&graph_with_view(count));
            assert_eq!(issues.len(), 1, "count {count}");
            assert_eq!(issues[0].severity, expected, "count {count}");
        }
    }

    #[test]
    fn test_issue_contents() {
        let issues = ExcessiveRerenderDetector::new().detect(&graph_with_view(50));
        let issue = &issues[0];
        assert_eq!(issue.title, "Excessive re-renders in ItemRow");
        assert!(issue.description.contains("updated 50 times"));
        assert_eq!(issue.affected_nodes, vec!["v"]);
        assert_eq!(issue.update_count, Some(50));
        assert_eq!(issue.confidence, 0.85);
        assert!(issue.performance_hint.is_some());
    }

    #[test]
    fn test_custom_threshold() {
        let thresholds = Thresholds {
            excessive_rerender_count: 3,
            ..Default::default()
        };
        let issues = ExcessiveRerenderDetector::with_thresholds(&thresholds).detect(&graph_with_view(5));
        assert_eq!(issues[0].severity, Severity::Medium);
    }

    #[test]
    fn test_only_views_considered() {
        let mut graph = CauseEffectGraph::new();
        graph.upsert_node(Node::state("s", "AppState").with_count(500));
        assert!(ExcessiveRerenderDetector::new().detect(&graph).is_empty());
    }
}

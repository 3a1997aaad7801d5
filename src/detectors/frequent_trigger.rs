//! Frequent trigger detector

use tracing::debug;

use crate::detectors::base::{Detector, Thresholds};
use crate::graph::{CauseEffectGraph, NodeKind};
use crate::models::{Issue, IssueType, Severity};

/// Detects causes that fire many times during a trace
pub struct FrequentTriggerDetector {
    threshold: u64,
}

impl FrequentTriggerDetector {
    pub fn new() -> Self {
        Self::with_thresholds(&Thresholds::default())
    }

    pub fn with_thresholds(thresholds: &Thresholds) -> Self {
        Self {
            threshold: thresholds.frequent_trigger_count,
        }
    }
}

impl Default for FrequentTriggerDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for FrequentTriggerDetector {
    fn name(&self) -> &'static str {
        "FrequentTriggerDetector"
    }

    fn description(&self) -> &'static str {
        "Detects triggers that fire often enough to drive excessive updates"
    }

    fn issue_type(&self) -> IssueType {
        IssueType::FrequentTrigger
    }

    fn detect(&self, graph: &CauseEffectGraph) -> Vec<Issue> {
        let issues: Vec<Issue> = graph
            .nodes_of_kind(NodeKind::Cause)
            .filter(|n| n.update_count >= self.threshold)
            .map(|node| {
                let severity = if node.update_count > self.threshold.saturating_mul(3) {
                    Severity::High
                } else {
                    Severity::Medium
                };
                Issue::new(
                    IssueType::FrequentTrigger,
                    severity,
                    format!("Frequent trigger: {} ({} times)", node.label, node.update_count),
                    format!(
                        "Cause '{}' fired {} times. If this triggers state updates, it may cause excessive view re-renders.",
                        node.label, node.update_count
                    ),
                    "Potential performance bottleneck if each trigger causes view updates",
                    0.7,
                )
                .with_affected_nodes(vec![node.id.clone()])
                .with_update_count(node.update_count)
                .with_hint("Consider debouncing, throttling, or batching updates from this trigger")
            })
            .collect();

        debug!("{} found {} issues", self.name(), issues.len());
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Node;

    fn single_cause(count: u64) -> CauseEffectGraph {
        let mut graph = CauseEffectGraph::new();
        graph.upsert_node(Node::cause("c", "Scroll gesture").with_count(count));
        graph
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let detector = FrequentTriggerDetector::new();
        assert!(detector.detect(&single_cause(14)).is_empty());
        let issues = detector.detect(&single_cause(15));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Medium);
        assert_eq!(issues[0].title, "Frequent trigger: Scroll gesture (15 times)");
    }

    #[test]
    fn test_high_only_above_three_times() {
        let detector = FrequentTriggerDetector::new();
        assert_eq!(detector.detect(&single_cause(45))[0].severity, Severity::Medium);
        assert_eq!(detector.detect(&single_cause(46))[0].severity, Severity::High);
    }

    #[test]
    fn test_confidence() {
        let issues = FrequentTriggerDetector::new().detect(&single_cause(20));
        assert_eq!(issues[0].confidence, 0.7);
        assert_eq!(issues[0].update_count, Some(20));
    }
}

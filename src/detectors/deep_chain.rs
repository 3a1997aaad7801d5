//! Deep dependency chain detector
//!
//! For every cause, finds the longest simple path through the graph. Long
//! chains add latency between a trigger and the frame it produces and make
//! update ordering hard to reason about.
//!
//! The path search is exhaustive (see [`longest_simple_path`]) and can be
//! exponential on densely connected traces.

use tracing::debug;

use crate::detectors::base::{Detector, Thresholds};
use crate::graph::{longest_simple_path, CauseEffectGraph, NodeKind};
use crate::models::{Issue, IssueType, Severity};

/// Detects long trigger-to-view chains
pub struct DeepChainDetector {
    limit: usize,
}

impl DeepChainDetector {
    pub fn new() -> Self {
        Self::with_thresholds(&Thresholds::default())
    }

    pub fn with_thresholds(thresholds: &Thresholds) -> Self {
        Self {
            limit: thresholds.cascade_depth_limit,
        }
    }
}

impl Default for DeepChainDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for DeepChainDetector {
    fn name(&self) -> &'static str {
        "DeepChainDetector"
    }

    fn description(&self) -> &'static str {
        "Detects dependency chains longer than the configured depth"
    }

    fn issue_type(&self) -> IssueType {
        IssueType::DeepDependencyChain
    }

    fn detect(&self, graph: &CauseEffectGraph) -> Vec<Issue> {
        let mut issues = Vec::new();

        for cause in graph.nodes_of_kind(NodeKind::Cause) {
            let chain = longest_simple_path(graph, &cause.id);
            if chain.len() <= self.limit {
                continue;
            }

            let severity = if chain.len() > self.limit.saturating_mul(2) {
                Severity::High
            } else {
                Severity::Medium
            };
            // Dangling ids have no label; show the id instead
            let labels: Vec<String> = chain
                .iter()
                .map(|id| match graph.node(id) {
                    Some(n) if !n.label.is_empty() => n.label.clone(),
                    _ => id.clone(),
                })
                .collect();

            issues.push(
                Issue::new(
                    IssueType::DeepDependencyChain,
                    severity,
                    format!("Deep dependency chain ({} levels)", chain.len()),
                    format!(
                        "Update chain has {} levels: {}. Deep chains increase latency and make debugging harder.",
                        chain.len(),
                        labels.join(" → ")
                    ),
                    "Increased latency, harder to trace bugs, potential for unnecessary updates",
                    0.8,
                )
                .with_cascade_depth(chain.len())
                .with_affected_nodes(chain)
                .with_cause_chain(labels)
                .with_hint("Consider flattening the dependency tree or using derived state to reduce chain depth"),
            );
        }

        debug!("{} found {} issues", self.name(), issues.len());
        issues
    }
}

//! Cascading update detector
//!
//! Flags state that fans out to many views. Edges are counted as recorded,
//! so a view updated twice by the same state counts twice.

use tracing::debug;

use crate::detectors::base::Detector;
use crate::graph::{CauseEffectGraph, NodeKind};
use crate::models::{Issue, IssueType, Severity};

/// Views a state must reach before it is flagged
const MIN_VIEWS: usize = 3;
/// Views at which the cascade becomes high severity
const HIGH_VIEWS: usize = 6;

/// Detects state changes that update many views at once
#[derive(Default)]
pub struct CascadingUpdateDetector;

impl CascadingUpdateDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for CascadingUpdateDetector {
    fn name(&self) -> &'static str {
        "CascadingUpdateDetector"
    }

    fn description(&self) -> &'static str {
        "Detects state whose changes re-render many views"
    }

    fn issue_type(&self) -> IssueType {
        IssueType::CascadingUpdate
    }

    fn detect(&self, graph: &CauseEffectGraph) -> Vec<Issue> {
        let mut issues = Vec::new();

        for state in graph.nodes_of_kind(NodeKind::State) {
            let views: Vec<_> = graph.view_targets(&state.id).collect();
            if views.len() < MIN_VIEWS {
                continue;
            }

            let severity = if views.len() >= HIGH_VIEWS {
                Severity::High
            } else {
                Severity::Medium
            };
            let labels: Vec<&str> = views.iter().map(|v| v.label.as_str()).collect();
            let mut affected = vec![state.id.clone()];
            affected.extend(views.iter().map(|v| v.id.clone()));

            issues.push(
                Issue::new(
                    IssueType::CascadingUpdate,
                    severity,
                    format!("State change cascades to {} views", views.len()),
                    format!(
                        "State '{}' triggers updates in {} different views: {}. Consider whether all views need to observe this entire state.",
                        state.label,
                        views.len(),
                        labels.join(", ")
                    ),
                    "Multiple views re-rendering simultaneously causes frame drops",
                    0.75,
                )
                .with_affected_nodes(affected)
                .with_cascade_depth(views.len())
                .with_hint("Split state into smaller pieces, use derived state, or pass only required properties to child views"),
            );
        }

        debug!("{} found {} issues", self.name(), issues.len());
        issues
    }
}

//! Timer cascade detector
//!
//! A timer that reaches several views re-renders all of them on every tick.

use tracing::debug;

use crate::detectors::base::Detector;
use crate::graph::{is_timer_label, reachable_from, CauseEffectGraph, NodeKind};
use crate::models::{Issue, IssueType, Severity};

/// Views a timer must reach before it is flagged
const MIN_VIEWS: usize = 2;

/// Detects timers whose ticks reach multiple views
#[derive(Default)]
pub struct TimerCascadeDetector;

impl TimerCascadeDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for TimerCascadeDetector {
    fn name(&self) -> &'static str {
        "TimerCascadeDetector"
    }

    fn description(&self) -> &'static str {
        "Detects timers that drive updates across many views"
    }

    fn issue_type(&self) -> IssueType {
        IssueType::TimerCascade
    }

    fn detect(&self, graph: &CauseEffectGraph) -> Vec<Issue> {
        let mut issues = Vec::new();

        for timer in graph
            .nodes_of_kind(NodeKind::Cause)
            .filter(|n| is_timer_label(&n.label))
        {
            let views: Vec<String> = reachable_from(graph, &timer.id)
                .into_iter()
                .filter(|id| graph.node(id).is_some_and(|n| n.kind == NodeKind::View))
                .collect();
            if views.len() < MIN_VIEWS {
                continue;
            }

            let count = views.len();
            let mut affected = vec![timer.id.clone()];
            affected.extend(views);

            issues.push(
                Issue::new(
                    IssueType::TimerCascade,
                    Severity::High,
                    format!("Timer triggers {} view updates", count),
                    format!(
                        "Timer '{}' causes updates to {} views. Timers that trigger broad UI updates can cause consistent frame drops.",
                        timer.label, count
                    ),
                    "Consistent frame drops at timer interval, battery drain",
                    0.9,
                )
                .with_affected_nodes(affected)
                .with_cause_chain(vec![timer.label.clone()])
                .with_hint("Use TimelineView for animations, limit timer scope, or update only changed data"),
            );
        }

        debug!("{} found {} issues", self.name(), issues.len());
        issues
    }
}

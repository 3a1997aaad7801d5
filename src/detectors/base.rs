//! Base detector trait and thresholds
//!
//! Detectors are pure functions of the graph: they never fail and never
//! mutate it. Issue ids are assigned later by the engine.

use serde::{Deserialize, Serialize};

use crate::graph::CauseEffectGraph;
use crate::models::{Issue, IssueType};

/// Detection sensitivity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Views updated at least this many times are flagged
    pub excessive_rerender_count: u64,
    /// Chains longer than this many nodes are flagged
    pub cascade_depth_limit: usize,
    /// Causes firing at least this many times are flagged
    pub frequent_trigger_count: u64,
    /// Confidence at or above this counts as high (reserved)
    pub high_confidence: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            excessive_rerender_count: 10,
            cascade_depth_limit: 4,
            frequent_trigger_count: 15,
            high_confidence: 0.7,
        }
    }
}

/// Trait for all graph detectors
///
/// ```ignore
/// struct MyDetector;
///
/// impl Detector for MyDetector {
///     fn name(&self) -> &'static str { "MyDetector" }
///     fn description(&self) -> &'static str { "Finds something" }
///     fn issue_type(&self) -> IssueType { IssueType::CascadingUpdate }
///     fn detect(&self, graph: &CauseEffectGraph) -> Vec<Issue> { vec![] }
/// }
/// ```
pub trait Detector: Send + Sync {
    /// Unique identifier for this detector
    fn name(&self) -> &'static str;

    /// Human-readable description of what this detector finds
    fn description(&self) -> &'static str;

    /// Type of issue this detector emits
    fn issue_type(&self) -> IssueType;

    /// Run detection over the graph, in graph node order
    fn detect(&self, graph: &CauseEffectGraph) -> Vec<Issue>;
}

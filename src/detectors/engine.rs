//! Detector execution engine
//!
//! Runs the registered detectors in registration order over one graph,
//! numbers the issues in that order and then orders them by severity.

use tracing::{debug, info};

use crate::detectors::base::{Detector, Thresholds};
use crate::detectors::{
    CascadingUpdateDetector, DeepChainDetector, ExcessiveRerenderDetector,
    FrequentTriggerDetector, TimerCascadeDetector, WholeObjectDetector,
};
use crate::graph::CauseEffectGraph;
use crate::models::{Issue, IssuesSummary};

/// Orchestrates issue detection across all registered detectors
pub struct DetectorEngine {
    detectors: Vec<Box<dyn Detector>>,
}

impl DetectorEngine {
    /// Engine with no detectors
    pub fn empty() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    /// Engine with the standard detector battery
    pub fn new(thresholds: &Thresholds) -> Self {
        let mut engine = Self::empty();
        engine.register(Box::new(ExcessiveRerenderDetector::with_thresholds(thresholds)));
        engine.register(Box::new(CascadingUpdateDetector::new()));
        engine.register(Box::new(FrequentTriggerDetector::with_thresholds(thresholds)));
        engine.register(Box::new(DeepChainDetector::with_thresholds(thresholds)));
        engine.register(Box::new(TimerCascadeDetector::new()));
        engine.register(Box::new(WholeObjectDetector::new()));
        engine
    }

    pub fn register(&mut self, detector: Box<dyn Detector>) {
        debug!("Registering detector: {}", detector.name());
        self.detectors.push(detector);
    }

    pub fn detector_names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// All issues, most severe first.
    ///
    /// Ids (`issue-1`, `issue-2`, ...) follow detection order; the severity
    /// sort is stable so equal severities keep that order.
    pub fn run(&self, graph: &CauseEffectGraph) -> Vec<Issue> {
        let mut issues: Vec<Issue> = Vec::new();
        for detector in &self.detectors {
            let found = detector.detect(graph);
            debug!("{}: {} issues", detector.name(), found.len());
            issues.extend(found);
        }

        for (i, issue) in issues.iter_mut().enumerate() {
            issue.id = format!("issue-{}", i + 1);
        }
        issues.sort_by(|a, b| b.severity.rank().cmp(&a.severity.rank()));

        let summary = IssuesSummary::from_issues(&issues);
        info!(
            "Detected {} issues ({} critical, {} high, {} medium)",
            summary.total, summary.critical, summary.high, summary.medium
        );
        issues
    }
}

impl Default for DetectorEngine {
    fn default() -> Self {
        Self::new(&Thresholds::default())
    }
}

/// Run the standard detectors with `thresholds`
pub fn detect(graph: &CauseEffectGraph, thresholds: &Thresholds) -> Vec<Issue> {
    DetectorEngine::new(thresholds).run(graph)
}

//! Core data models for swiftuice
//!
//! These models are shared by the detectors, the report assembler and the
//! reporters for representing detected performance issues.

use serde::{Deserialize, Serialize};

/// Severity levels for issues
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Sort rank used when ordering issues (critical highest)
    pub fn rank(self) -> u8 {
        match self {
            Severity::Critical => 5,
            Severity::High => 4,
            Severity::Medium => 3,
            Severity::Low => 2,
            Severity::Info => 1,
        }
    }

    /// True for the severities that feed the agent priority list
    pub fn is_urgent(self) -> bool {
        matches!(self, Severity::Critical | Severity::High)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Kind of performance problem an issue describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    ExcessiveRerender,
    CascadingUpdate,
    FrequentTrigger,
    DeepDependencyChain,
    WholeObjectPassing,
    TimerCascade,
    /// Reserved: no detector emits this yet
    #[serde(rename = "state_mutation_in_body")]
    StateInBody,
    /// Reserved: no detector emits this yet
    UnnecessaryBinding,
}

impl IssueType {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueType::ExcessiveRerender => "excessive_rerender",
            IssueType::CascadingUpdate => "cascading_update",
            IssueType::FrequentTrigger => "frequent_trigger",
            IssueType::DeepDependencyChain => "deep_dependency_chain",
            IssueType::WholeObjectPassing => "whole_object_passing",
            IssueType::TimerCascade => "timer_cascade",
            IssueType::StateInBody => "state_mutation_in_body",
            IssueType::UnnecessaryBinding => "unnecessary_binding",
        }
    }
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected performance problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Sequential id (`issue-N`) assigned by the detector engine
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub impact: String,

    /// Node ids implicated in the issue
    #[serde(default)]
    pub affected_nodes: Vec<String>,
    /// Labels along the path that produced the finding
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cause_chain: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cascade_depth: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_hint: Option<String>,
    /// Detector certainty from 0.0 to 1.0
    pub confidence: f64,

    /// Best source location of the affected nodes (filled during report assembly)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
}

impl Issue {
    /// Create an issue with the required fields; optional metrics start empty
    pub fn new(
        issue_type: IssueType,
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
        impact: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            id: String::new(),
            issue_type,
            severity,
            title: title.into(),
            description: description.into(),
            impact: impact.into(),
            affected_nodes: Vec::new(),
            cause_chain: Vec::new(),
            update_count: None,
            cascade_depth: None,
            performance_hint: None,
            confidence,
            source_file: None,
            line_number: None,
        }
    }

    pub fn with_affected_nodes(mut self, nodes: Vec<String>) -> Self {
        self.affected_nodes = nodes;
        self
    }

    pub fn with_cause_chain(mut self, chain: Vec<String>) -> Self {
        self.cause_chain = chain;
        self
    }

    pub fn with_update_count(mut self, count: u64) -> Self {
        self.update_count = Some(count);
        self
    }

    pub fn with_cascade_depth(mut self, depth: usize) -> Self {
        self.cascade_depth = Some(depth);
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.performance_hint = Some(hint.into());
        self
    }
}

/// Summary of issues by severity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuesSummary {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub info: usize,
    pub total: usize,
}

impl IssuesSummary {
    pub fn from_issues(issues: &[Issue]) -> Self {
        let mut summary = Self::default();
        for issue in issues {
            match issue.severity {
                Severity::Critical => summary.critical += 1,
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
                Severity::Info => summary.info += 1,
            }
            summary.total += 1;
        }
        summary
    }
}

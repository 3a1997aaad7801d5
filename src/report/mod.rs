//! Report assembly
//!
//! Merges the graph, detected issues, source matches and input metadata
//! into the versioned document handed to agents and humans. Field names
//! here are a public JSON contract; rename nothing without bumping
//! [`REPORT_VERSION`].

mod instructions;

pub use instructions::AgentInstructions;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::correlation::SourceMatch;
use crate::fixes::{fixes_for, recommendations, Fix, Recommendation};
use crate::graph::{CauseEffectGraph, NodeKind};
use crate::models::Issue;
use crate::scoring::{HealthStatus, ScoreBreakdown};

pub const REPORT_VERSION: &str = "1.0";
pub const TOOL_NAME: &str = "swiftuice";

fn is_zero_u64(n: &u64) -> bool {
    *n == 0
}

fn is_zero_usize(n: &usize) -> bool {
    *n == 0
}

/// Where the analyzed data came from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_root: Option<String>,
    pub files_parsed: usize,
    #[serde(default, skip_serializing_if = "is_zero_usize")]
    pub swift_files: usize,
    /// Per-file problems met while parsing
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parse_hints: Vec<String>,
}

/// Headline numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_causes: usize,
    pub total_state_changes: usize,
    pub total_view_updates: usize,
    pub total_edges: usize,
    pub issues_found: usize,
    pub critical_issues: usize,
    pub high_issues: usize,
    /// 0-100, higher is better
    pub performance_score: u32,
    pub health_status: HealthStatus,
}

impl Summary {
    pub fn compute(graph: &CauseEffectGraph, issues: &[Issue]) -> Self {
        let score = ScoreBreakdown::from_issues(issues);
        Self {
            total_causes: graph.count_of_kind(NodeKind::Cause),
            total_state_changes: graph.count_of_kind(NodeKind::State),
            total_view_updates: graph.count_of_kind(NodeKind::View),
            total_edges: graph.edge_count(),
            issues_found: issues.len(),
            critical_issues: score.critical,
            high_issues: score.high,
            performance_score: score.score,
            health_status: score.health,
        }
    }
}

/// An issue together with the catalog fixes for its type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueWithFixes {
    #[serde(flatten)]
    pub issue: Issue,
    #[serde(default)]
    pub suggested_fixes: Vec<Fix>,
}

/// Display form of a node, with its best source location if any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: NodeKind,
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub update_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
    #[serde(
        default,
        rename = "source_confidence",
        skip_serializing_if = "Option::is_none"
    )]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<NodeData>,
    pub edges: Vec<EdgeData>,
}

/// The complete analysis document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub version: String,
    pub generated: DateTime<Utc>,
    pub tool: String,
    pub input: InputInfo,
    pub summary: Summary,
    pub issues: Vec<IssueWithFixes>,
    pub graph: GraphData,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_correlations: Vec<SourceMatch>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    pub agent_instructions: AgentInstructions,
}

/// Highest-confidence match per node id; the earliest wins ties
fn best_matches(matches: &[SourceMatch]) -> HashMap<&str, &SourceMatch> {
    let mut best: HashMap<&str, &SourceMatch> = HashMap::new();
    for m in matches {
        best.entry(m.trace_node_id.as_str())
            .and_modify(|current| {
                if m.confidence > current.confidence {
                    *current = m;
                }
            })
            .or_insert(m);
    }
    best
}

fn graph_data(graph: &CauseEffectGraph, best: &HashMap<&str, &SourceMatch>) -> GraphData {
    let nodes = graph
        .nodes()
        .map(|node| {
            let found = best.get(node.id.as_str());
            NodeData {
                id: node.id.clone(),
                label: node.label.clone(),
                node_type: node.kind,
                update_count: node.update_count,
                source_file: found.map(|m| m.relative_path.clone()),
                line_number: found.map(|m| m.line_number),
                confidence: found.map(|m| m.confidence),
            }
        })
        .collect();

    let edges = graph
        .edges()
        .iter()
        .map(|edge| EdgeData {
            from: edge.from.clone(),
            to: edge.to.clone(),
            label: edge.label.clone(),
        })
        .collect();

    GraphData { nodes, edges }
}

/// Point the issue at the best source match among its affected nodes
fn locate(issue: &mut Issue, best: &HashMap<&str, &SourceMatch>) {
    let mut chosen: Option<&SourceMatch> = None;
    for id in &issue.affected_nodes {
        if let Some(&m) = best.get(id.as_str()) {
            if chosen.map_or(true, |c| m.confidence > c.confidence) {
                chosen = Some(m);
            }
        }
    }
    if let Some(m) = chosen {
        issue.source_file = Some(m.relative_path.clone());
        issue.line_number = Some(m.line_number);
    }
}

/// Assemble a report stamped with the current time
pub fn assemble_report(
    graph: &CauseEffectGraph,
    issues: Vec<Issue>,
    matches: Vec<SourceMatch>,
    input: InputInfo,
) -> Report {
    assemble_report_at(graph, issues, matches, input, Utc::now())
}

/// Assemble a report with an explicit generation time
pub fn assemble_report_at(
    graph: &CauseEffectGraph,
    issues: Vec<Issue>,
    matches: Vec<SourceMatch>,
    input: InputInfo,
    generated: DateTime<Utc>,
) -> Report {
    let summary = Summary::compute(graph, &issues);
    let agent_instructions = AgentInstructions::build(&summary, &issues);
    let recommendations = recommendations(&issues);

    let best = best_matches(&matches);
    let graph_data = graph_data(graph, &best);
    let issues = issues
        .into_iter()
        .map(|mut issue| {
            locate(&mut issue, &best);
            let suggested_fixes = fixes_for(issue.issue_type);
            IssueWithFixes {
                issue,
                suggested_fixes,
            }
        })
        .collect();

    Report {
        version: REPORT_VERSION.to_string(),
        generated,
        tool: TOOL_NAME.to_string(),
        input,
        summary,
        issues,
        graph: graph_data,
        source_correlations: matches,
        recommendations,
        agent_instructions,
    }
}

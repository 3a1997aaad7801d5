//! Markdown summary reporter
//!
//! A best-effort overview of what could be pulled out of an export: node
//! counts, the busiest views, detected issues and any parse hints.

use crate::graph::NodeKind;
use crate::report::{NodeData, Report};
use anyhow::Result;

/// Maximum view nodes listed under the top view-update section
const MAX_TOP_VIEWS: usize = 10;

/// Render report as Markdown
pub fn render(report: &Report) -> Result<String> {
    let mut md = String::new();

    md.push_str(&render_header(report));
    md.push('\n');
    md.push_str(&render_extracted(report));
    md.push('\n');
    md.push_str(&render_top_views(report));
    md.push('\n');
    md.push_str(&render_issues(report));
    md.push('\n');
    md.push_str(&render_notes());
    md.push('\n');
    if !report.input.parse_hints.is_empty() {
        md.push_str(&render_hints(report));
        md.push('\n');
    }
    md.push_str(&render_outputs());

    Ok(md)
}

fn render_header(report: &Report) -> String {
    format!(
        "# SwiftUI Cause & Effect Summary\n\nParsed {} files. Nodes: {}, Edges: {}.\n",
        report.input.files_parsed,
        report.graph.nodes.len(),
        report.graph.edges.len()
    )
}

fn render_extracted(report: &Report) -> String {
    let s = &report.summary;
    format!(
        "## What this tool could extract\n- Causes: {}\n- State changes: {}\n- View updates: {}\n",
        s.total_causes, s.total_state_changes, s.total_view_updates
    )
}

/// Views with a non-zero count, busiest first
fn top_views(report: &Report) -> Vec<&NodeData> {
    let mut views: Vec<&NodeData> = report
        .graph
        .nodes
        .iter()
        .filter(|n| n.node_type == NodeKind::View && n.update_count > 0)
        .collect();
    views.sort_by(|a, b| b.update_count.cmp(&a.update_count));
    views.truncate(MAX_TOP_VIEWS);
    views
}

fn render_top_views(report: &Report) -> String {
    let mut out = String::from("## Top view-update nodes (best effort)\n");
    let views = top_views(report);
    if views.is_empty() {
        out.push_str("No explicit counts found in exported data.\n");
    }
    for view in views {
        out.push_str(&format!("- {} (count={})\n", view.label, view.update_count));
    }
    out
}

fn render_issues(report: &Report) -> String {
    let s = &report.summary;
    let mut out = format!(
        "## Detected issues\nPerformance score: {}/100 ({}).\n\n",
        s.performance_score, s.health_status
    );
    if report.issues.is_empty() {
        out.push_str("No issues detected.\n");
    }
    for entry in &report.issues {
        let issue = &entry.issue;
        out.push_str(&format!(
            "- **[{}]** {} (`{}`)\n",
            issue.severity, issue.title, issue.id
        ));
    }
    out
}

fn render_notes() -> String {
    "## Notes\n\
     - The SwiftUI Cause & Effect Graph is collected by the SwiftUI instrument (Xcode 26) and is primarily designed for interactive use in Instruments.\n\
     - Export schemas can change; this CLI uses heuristic parsing and may miss relationships.\n\
     - If export produced no parseable artifacts, open the .trace in Instruments and use the Cause & Effect Graph UI.\n"
        .to_string()
}

fn render_hints(report: &Report) -> String {
    let mut out = String::from("## Parse hints\n");
    for hint in &report.input.parse_hints {
        out.push_str(&format!("- {}\n", hint));
    }
    out
}

fn render_outputs() -> String {
    "## Outputs\n\
     - Graphviz: see the generated `.dot` file (render with `dot -Tpng graph.dot -o graph.png`).\n"
        .to_string()
}

//! Line-oriented keyword scanner
//!
//! Used for text-like exports and for JSON that is not a graph export.
//! Each non-blank line becomes at most one node; the first keyword family
//! that matches decides its kind (state, then view, then cause).

use std::io::BufRead;

use super::{synthesize_id, truncate_label};
use crate::graph::{classify_label, CauseEffectGraph, Edge, Node, NodeKind};

fn kind_of_line(line: &str) -> Option<NodeKind> {
    match classify_label(line) {
        NodeKind::Other => None,
        kind => Some(kind),
    }
}

/// Scan `reader` line by line, adding nodes and edges to `graph`.
///
/// A cause becomes pending and links to the next state lines; a state
/// becomes pending and links to the next view lines. Invalid UTF-8 is
/// replaced rather than rejected.
pub fn parse_free_text<R: BufRead>(
    mut reader: R,
    graph: &mut CauseEffectGraph,
) -> std::io::Result<()> {
    let mut pending_cause: Option<String> = None;
    let mut pending_state: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let raw = String::from_utf8_lossy(&buf);
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let Some(kind) = kind_of_line(line) else {
            continue;
        };

        let id = synthesize_id("", line);
        graph.upsert_node(Node::new(id.clone(), truncate_label(line), kind));

        match kind {
            NodeKind::State => {
                if let Some(cause) = &pending_cause {
                    graph.add_edge(Edge::causes(cause.clone(), id.clone()));
                }
                pending_state = Some(id);
            }
            NodeKind::View => {
                if let Some(state) = &pending_state {
                    graph.add_edge(Edge::updates(state.clone(), id));
                }
            }
            NodeKind::Cause => pending_cause = Some(id),
            NodeKind::Other => {}
        }
    }

    Ok(())
}

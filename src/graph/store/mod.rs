//! In-memory cause-effect graph
//!
//! Nodes live in an insertion-ordered map keyed by id so that every
//! consumer (detectors, reports, DOT output) sees them in first-sighting
//! order. Edges are an append-only list; duplicates and dangling endpoints
//! are kept as recorded.

use indexmap::IndexMap;

use super::store_models::{Edge, Node, NodeKind};

/// Directed labeled graph of trigger, state and view relationships
#[derive(Debug, Clone, Default)]
pub struct CauseEffectGraph {
    nodes: IndexMap<String, Node>,
    edges: Vec<Edge>,
}

impl CauseEffectGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, or merge it into the existing node with the same id
    pub fn upsert_node(&mut self, node: Node) {
        match self.nodes.get_mut(&node.id) {
            Some(existing) => existing.merge(&node),
            None => {
                self.nodes.insert(node.id.clone(), node);
            }
        }
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Nodes in first-sighting order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges leaving `id`, in insertion order
    pub fn outgoing<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.from == id)
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(move |n| n.kind == kind)
    }

    pub fn count_of_kind(&self, kind: NodeKind) -> usize {
        self.nodes_of_kind(kind).count()
    }

    /// Targets of `id`'s outgoing edges that resolve to View nodes.
    ///
    /// One entry per edge, so duplicate edges repeat the view.
    pub fn view_targets<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.outgoing(id)
            .filter_map(|e| self.nodes.get(&e.to))
            .filter(|n| n.kind == NodeKind::View)
    }

    /// A graph is analyzable once it has at least one node and one edge
    pub fn has_data(&self) -> bool {
        !self.nodes.is_empty() && !self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests;

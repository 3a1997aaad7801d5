//! Path queries over the cause-effect graph
//!
//! Both searches use an explicit stack so that pathological traces cannot
//! exhaust the call stack.

use std::collections::{HashMap, HashSet};

use super::store::CauseEffectGraph;

/// Outgoing adjacency in edge insertion order
fn adjacency(graph: &CauseEffectGraph) -> HashMap<&str, Vec<&str>> {
    let mut adj: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in graph.edges() {
        adj.entry(edge.from.as_str())
            .or_default()
            .push(edge.to.as_str());
    }
    adj
}

struct Frame<'a> {
    node: &'a str,
    next_child: usize,
    longest: Vec<&'a str>,
}

impl<'a> Frame<'a> {
    fn new(node: &'a str) -> Self {
        Self {
            node,
            next_child: 0,
            longest: vec![node],
        }
    }
}

/// Longest simple path starting at `start`, as node ids.
///
/// A node never repeats within one path but may appear again in a sibling
/// branch. Ties keep the first path found in edge order. The search is
/// exhaustive with no memoization, so it is exponential on dense graphs.
pub fn longest_simple_path(graph: &CauseEffectGraph, start: &str) -> Vec<String> {
    let adj = adjacency(graph);
    let mut on_path: HashSet<&str> = HashSet::new();
    let mut stack = vec![Frame::new(start)];
    on_path.insert(start);

    loop {
        let Some(top) = stack.last_mut() else {
            return Vec::new();
        };
        let children = adj.get(top.node).map(Vec::as_slice).unwrap_or_default();

        if let Some(&child) = children.get(top.next_child) {
            top.next_child += 1;
            // A child already on the path contributes nothing
            if on_path.insert(child) {
                stack.push(Frame::new(child));
            }
            continue;
        }

        let Some(done) = stack.pop() else {
            return Vec::new();
        };
        on_path.remove(done.node);
        match stack.last_mut() {
            Some(parent) => {
                if done.longest.len() + 1 > parent.longest.len() {
                    let mut path = Vec::with_capacity(done.longest.len() + 1);
                    path.push(parent.node);
                    path.extend(done.longest);
                    parent.longest = path;
                }
            }
            None => return done.longest.into_iter().map(str::to_string).collect(),
        }
    }
}

/// Every node reachable from `start` (inclusive), in depth-first preorder
pub fn reachable_from(graph: &CauseEffectGraph, start: &str) -> Vec<String> {
    let adj = adjacency(graph);
    let mut visited: HashSet<&str> = HashSet::new();
    let mut order = Vec::new();
    // (node, index of the next child to visit)
    let mut stack: Vec<(&str, usize)> = Vec::new();

    visited.insert(start);
    order.push(start.to_string());
    stack.push((start, 0));

    while let Some((node, cursor)) = stack.last_mut() {
        let children = adj.get(*node).map(Vec::as_slice).unwrap_or_default();
        match children.get(*cursor) {
            Some(&child) => {
                *cursor += 1;
                if visited.insert(child) {
                    order.push(child.to_string());
                    stack.push((child, 0));
                }
            }
            None => {
                stack.pop();
            }
        }
    }

    order
}

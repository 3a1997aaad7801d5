//! Typed decoding of JSON graph exports
//!
//! A graph export is an object with `nodes` and `edges` arrays. Only JSON
//! objects count as records; anything else in those arrays is counted and
//! skipped instead of being coerced. Within a record, a field of the wrong
//! type reads as absent, so its alias or default applies. Any other JSON
//! document is handed back to the caller for free-text scanning.

use serde::de::{Deserializer, IgnoredAny};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::synthesize_id;
use crate::graph::{classify, CauseEffectGraph, Edge, Node};

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_f64(),
        _ => None,
    })
}

/// Node record. Each field has a primary key and an alias; the primary wins.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawNode {
    #[serde(deserialize_with = "lenient_string")]
    id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    uuid: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    label: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    title: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    type_hint: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    kind: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    count: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    updates: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEdge {
    #[serde(deserialize_with = "lenient_string")]
    from: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    source: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    to: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    target: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    label: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    reason: Option<String>,
}

/// An array entry. `Map` only deserializes from a JSON object, so arrays
/// and scalars land in `Rejected` rather than being read positionally.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Record {
    Object(Map<String, Value>),
    Rejected(IgnoredAny),
}

impl Record {
    fn decode<T: for<'de> Deserialize<'de>>(self) -> Option<T> {
        match self {
            Record::Object(map) => serde_json::from_value(Value::Object(map)).ok(),
            Record::Rejected(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GraphExport {
    nodes: Vec<Record>,
    edges: Vec<Record>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Document {
    Object(Map<String, Value>),
    Other(IgnoredAny),
}

/// Result of decoding one JSON document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuredOutcome {
    Parsed {
        nodes: usize,
        edges: usize,
        rejected_nodes: usize,
        rejected_edges: usize,
    },
    /// Valid JSON that is not a graph export; scan the raw text instead
    FallbackRequired,
}

fn to_count(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value as u64
    } else {
        0
    }
}

impl RawNode {
    fn into_node(self) -> Node {
        let label = self.label.or(self.title).unwrap_or_default();
        let id = synthesize_id(&self.id.or(self.uuid).unwrap_or_default(), &label);
        let hint = self.type_hint.or(self.kind).unwrap_or_default();
        let kind = classify(&hint, &label);
        let count = self.count.or(self.updates).map(to_count).unwrap_or(0);
        Node::new(id, label, kind).with_count(count)
    }
}

impl RawEdge {
    /// `None` when either endpoint is missing or empty
    fn into_edge(self) -> Option<Edge> {
        let from = self.from.or(self.source).filter(|s| !s.is_empty())?;
        let to = self.to.or(self.target).filter(|s| !s.is_empty())?;
        let label = self.label.or(self.reason).unwrap_or_default();
        Some(Edge::labeled(from, to, label))
    }
}

/// Decode a JSON document into `graph`.
///
/// Returns an error only for malformed JSON.
pub fn parse_structured(
    bytes: &[u8],
    graph: &mut CauseEffectGraph,
) -> Result<StructuredOutcome, serde_json::Error> {
    // Top-level arrays are never graph exports, even if they line up positionally
    let export = match serde_json::from_slice::<Document>(bytes)? {
        Document::Object(map) => match serde_json::from_value::<GraphExport>(Value::Object(map)) {
            Ok(export) => export,
            Err(_) => return Ok(StructuredOutcome::FallbackRequired),
        },
        Document::Other(_) => return Ok(StructuredOutcome::FallbackRequired),
    };

    let mut nodes = 0;
    let mut rejected_nodes = 0;
    for record in export.nodes {
        match record.decode::<RawNode>() {
            Some(raw) => {
                graph.upsert_node(raw.into_node());
                nodes += 1;
            }
            None => rejected_nodes += 1,
        }
    }

    let mut edges = 0;
    let mut rejected_edges = 0;
    let mut dropped = 0;
    for record in export.edges {
        match record.decode::<RawEdge>() {
            Some(raw) => match raw.into_edge() {
                Some(edge) => {
                    graph.add_edge(edge);
                    edges += 1;
                }
                None => dropped += 1,
            },
            None => rejected_edges += 1,
        }
    }
    if dropped > 0 {
        debug!("Skipped {} edges with a missing endpoint", dropped);
    }

    Ok(StructuredOutcome::Parsed {
        nodes,
        edges,
        rejected_nodes,
        rejected_edges,
    })
}

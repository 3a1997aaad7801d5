use serde::{Deserialize, Serialize};

/// Role of a node in the cause-effect graph
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// External trigger (gesture, timer, notification, ...)
    Cause,
    /// State mutation
    State,
    /// View body re-evaluation
    View,
    #[default]
    Other,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Cause => "cause",
            NodeKind::State => "state",
            NodeKind::View => "view",
            NodeKind::Other => "other",
        }
    }

    /// Anything other than `Other`
    pub fn is_specific(self) -> bool {
        self != NodeKind::Other
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node in the cause-effect graph
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub update_count: u64,
}

impl Node {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            update_count: 0,
        }
    }

    pub fn cause(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, NodeKind::Cause)
    }

    pub fn state(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, NodeKind::State)
    }

    pub fn view(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, NodeKind::View)
    }

    pub fn with_count(mut self, count: u64) -> Self {
        self.update_count = count;
        self
    }

    /// Fold another sighting of the same node into this one.
    ///
    /// Never loses information: a non-empty label is kept, a specific kind
    /// is never downgraded to `Other`, and the larger count wins.
    pub fn merge(&mut self, incoming: &Node) {
        if self.label.is_empty() && !incoming.label.is_empty() {
            self.label = incoming.label.clone();
        }
        if !self.kind.is_specific() && incoming.kind.is_specific() {
            self.kind = incoming.kind;
        }
        self.update_count = self.update_count.max(incoming.update_count);
    }
}

/// Directed relationship between two nodes. Endpoints may dangle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Edge {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: None,
        }
    }

    pub fn labeled(from: impl Into<String>, to: impl Into<String>, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            from: from.into(),
            to: to.into(),
            label: (!label.is_empty()).then_some(label),
        }
    }

    /// Trigger to state mutation
    pub fn causes(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::labeled(from, to, "causes")
    }

    /// State mutation to view update
    pub fn updates(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::labeled(from, to, "updates")
    }
}

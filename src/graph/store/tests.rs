use super::*;

#[test]
fn test_basic_operations() {
    let mut graph = CauseEffectGraph::new();

    graph.upsert_node(Node::cause("tap", "Button tap"));
    graph.upsert_node(Node::state("s", "@State count"));
    graph.upsert_node(Node::view("v", "CounterView").with_count(3));
    graph.add_edge(Edge::causes("tap", "s"));
    graph.add_edge(Edge::updates("s", "v"));

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
    assert!(graph.has_data());
    assert_eq!(graph.node("v").map(|n| n.update_count), Some(3));
    assert_eq!(graph.count_of_kind(NodeKind::View), 1);
}

#[test]
fn test_nodes_keep_first_sighting_order() {
    let mut graph = CauseEffectGraph::new();
    for id in ["c", "a", "b", "a"] {
        graph.upsert_node(Node::new(id, "", NodeKind::Other));
    }
    let ids: Vec<&str> = graph.nodes().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
}

#[test]
fn test_merge_keeps_most_informative_fields() {
    let mut graph = CauseEffectGraph::new();
    graph.upsert_node(Node::new("x", "", NodeKind::Other).with_count(7));
    graph.upsert_node(Node::view("x", "ItemRow").with_count(2));
    graph.upsert_node(Node::new("x", "", NodeKind::Other).with_count(1));

    let node = graph.node("x").unwrap();
    assert_eq!(node.label, "ItemRow");
    assert_eq!(node.kind, NodeKind::View);
    assert_eq!(node.update_count, 7);
}

#[test]
fn test_merge_is_idempotent() {
    let node = Node::state("s", "AppState").with_count(4);
    let mut graph = CauseEffectGraph::new();
    graph.upsert_node(node.clone());
    let once = graph.node("s").cloned();
    graph.upsert_node(node.clone());
    graph.upsert_node(node);
    assert_eq!(graph.node("s").cloned(), once);
}

#[test]
fn test_merge_order_independent_for_non_conflicting_fields() {
    let a = Node::new("n", "", NodeKind::View).with_count(5);
    let b = Node::new("n", "Label", NodeKind::Other).with_count(9);

    let mut forward = CauseEffectGraph::new();
    forward.upsert_node(a.clone());
    forward.upsert_node(b.clone());

    let mut backward = CauseEffectGraph::new();
    backward.upsert_node(b);
    backward.upsert_node(a);

    assert_eq!(forward.node("n"), backward.node("n"));
}

#[test]
fn test_first_specific_kind_wins_on_conflict() {
    let mut graph = CauseEffectGraph::new();
    graph.upsert_node(Node::state("n", "a"));
    graph.upsert_node(Node::view("n", "b"));
    let node = graph.node("n").unwrap();
    assert_eq!(node.kind, NodeKind::State);
    assert_eq!(node.label, "a");
}

#[test]
fn test_duplicate_and_dangling_edges_are_kept() {
    let mut graph = CauseEffectGraph::new();
    graph.upsert_node(Node::state("s", "AppState"));
    graph.upsert_node(Node::view("v", "ListView"));
    graph.add_edge(Edge::new("s", "v"));
    graph.add_edge(Edge::new("s", "v"));
    graph.add_edge(Edge::new("s", "ghost"));

    assert_eq!(graph.outgoing("s").count(), 3);
    assert_eq!(graph.view_targets("s").count(), 2);
}

#[test]
fn test_has_data_requires_nodes_and_edges() {
    let mut graph = CauseEffectGraph::new();
    assert!(!graph.has_data());
    graph.upsert_node(Node::view("v", "V"));
    assert!(!graph.has_data());
    graph.add_edge(Edge::new("v", "v"));
    assert!(graph.has_data());
}

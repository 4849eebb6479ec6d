//! Test suite for graph mutation, composition, and traversal.

use super::{Graph, GraphError};

fn chain(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| (*n).to_string()).collect()
}

#[test]
fn add_node_is_idempotent_and_preserves_edges() {
    let mut graph: Graph<&str> = Graph::new();
    graph.add_edge("a", "b").unwrap();
    graph.add_node("a");
    assert_eq!(graph.successors(&"a"), &["b"]);
    assert_eq!(graph.node_count(), 2);
}

#[test]
fn add_edge_creates_endpoints_and_ignores_duplicates() {
    let mut graph: Graph<&str> = Graph::new();
    graph.add_edge("a", "b").unwrap();
    graph.add_edge("a", "b").unwrap();
    assert_eq!(graph.edge_count(), 1);
    assert!(graph.contains(&"a"));
    assert!(graph.contains(&"b"));
}

#[test]
fn add_edge_rejects_self_loops() {
    let mut graph: Graph<&str> = Graph::new();
    assert!(matches!(
        graph.add_edge("a", "a"),
        Err(GraphError::SelfLoop { .. })
    ));
    assert!(graph.is_empty());
}

#[test]
fn delete_node_scrubs_incoming_references() {
    let mut graph: Graph<&str> = Graph::new();
    graph.add_edge("a", "b").unwrap();
    graph.add_edge("c", "b").unwrap();
    graph.delete_node(&"b").unwrap();
    assert!(!graph.contains(&"b"));
    assert!(graph.successors(&"a").is_empty());
    assert!(graph.successors(&"c").is_empty());
}

#[test]
fn delete_missing_node_or_edge_errors() {
    let mut graph: Graph<&str> = Graph::new();
    graph.add_edge("a", "b").unwrap();
    assert!(matches!(
        graph.delete_node(&"zzz"),
        Err(GraphError::MissingNode { .. })
    ));
    assert!(matches!(
        graph.delete_edge(&"b", &"a"),
        Err(GraphError::MissingEdge { .. })
    ));
}

#[test]
fn roots_and_endpoints_follow_insertion_order() {
    let mut graph: Graph<&str> = Graph::new();
    graph.add_edge("a", "c").unwrap();
    graph.add_edge("b", "c").unwrap();
    graph.add_edge("c", "d").unwrap();
    graph.add_edge("c", "e").unwrap();
    assert_eq!(graph.roots(), vec!["a", "b"]);
    assert_eq!(graph.endpoints(), vec!["d", "e"]);
}

#[test]
fn extend_on_empty_graph_builds_standalone_path() {
    let mut graph: Graph<String> = Graph::new();
    graph.extend(&chain(&["a", "b", "c"]), None).unwrap();
    assert_eq!(graph.roots(), chain(&["a"]));
    assert_eq!(graph.paths(), vec![chain(&["a", "b", "c"])]);
}

#[test]
fn extend_defaults_to_current_endpoints() {
    let mut graph: Graph<String> = Graph::new();
    graph.extend(&chain(&["a", "b"]), None).unwrap();
    graph.extend(&chain(&["c"]), None).unwrap();
    assert_eq!(graph.paths(), vec![chain(&["a", "b", "c"])]);
}

#[test]
fn extend_with_explicit_start_splices_there() {
    let mut graph: Graph<String> = Graph::new();
    graph.extend(&chain(&["a", "b"]), None).unwrap();
    graph
        .extend(&chain(&["side"]), Some(&chain(&["a"])))
        .unwrap();
    assert_eq!(
        graph.paths(),
        vec![chain(&["a", "b"]), chain(&["a", "side"])]
    );
}

#[test]
fn extend_with_empty_start_falls_back_to_endpoints() {
    let mut graph: Graph<String> = Graph::new();
    graph.extend(&chain(&["a", "b"]), None).unwrap();
    graph.extend(&chain(&["c"]), Some(&[])).unwrap();
    assert_eq!(graph.paths(), vec![chain(&["a", "b", "c"])]);
}

#[test]
fn extend_empty_chain_is_a_no_op() {
    let mut graph: Graph<String> = Graph::new();
    graph.extend(&chain(&["a"]), None).unwrap();
    graph.extend(&[], None).unwrap();
    assert_eq!(graph.node_count(), 1);
}

#[test]
fn branchify_grows_paths_as_the_cartesian_product() {
    let mut graph: Graph<String> = Graph::new();
    graph.extend(&chain(&["start"]), None).unwrap();
    graph
        .branchify(
            &[chain(&["a1", "a2"]), chain(&["b1", "b2", "b3"])],
            None,
        )
        .unwrap();
    let paths = graph.paths();
    assert_eq!(paths.len(), 6);
    for path in &paths {
        assert_eq!(path[0], "start");
        assert_eq!(path.len(), 3);
    }
}

#[test]
fn branchify_anchors_every_combination_at_the_same_start() {
    let mut graph: Graph<String> = Graph::new();
    graph.extend(&chain(&["start"]), None).unwrap();
    graph
        .branchify(&[chain(&["x", "y"])], Some(&chain(&["start"])))
        .unwrap();
    assert_eq!(graph.successors(&"start".to_string()), chain(&["x", "y"]));
    assert_eq!(graph.paths().len(), 2);
}

#[test]
fn branchify_with_an_empty_list_is_a_no_op() {
    let mut graph: Graph<String> = Graph::new();
    graph.extend(&chain(&["start"]), None).unwrap();
    graph
        .branchify(&[chain(&["a"]), Vec::new()], None)
        .unwrap();
    assert_eq!(graph.node_count(), 1);
}

#[test]
fn join_onto_empty_graph_adopts_the_other() {
    let mut graph: Graph<String> = Graph::new();
    let mut other: Graph<String> = Graph::new();
    other.extend(&chain(&["x", "y"]), None).unwrap();
    graph.join(&other).unwrap();
    assert_eq!(graph, other);
}

#[test]
fn join_connects_endpoints_to_the_other_roots() {
    let mut graph: Graph<String> = Graph::new();
    graph.extend(&chain(&["a", "b"]), None).unwrap();
    let mut other: Graph<String> = Graph::new();
    other.extend(&chain(&["x", "y"]), None).unwrap();
    graph.join(&other).unwrap();
    assert_eq!(graph.paths(), vec![chain(&["a", "b", "x", "y"])]);
}

#[test]
fn find_paths_with_unknown_start_yields_nothing() {
    let mut graph: Graph<String> = Graph::new();
    graph.extend(&chain(&["a", "b"]), None).unwrap();
    assert!(graph
        .find_paths(&"zzz".to_string(), &"b".to_string())
        .is_empty());
}

#[test]
fn single_node_graph_has_one_trivial_path() {
    let mut graph: Graph<String> = Graph::new();
    graph.add_node("only".to_string());
    assert_eq!(graph.paths(), vec![chain(&["only"])]);
}

#[test]
fn search_orders_depth_first_and_breadth_first() {
    let mut graph: Graph<&str> = Graph::new();
    graph.add_edge("a", "b").unwrap();
    graph.add_edge("a", "c").unwrap();
    graph.add_edge("b", "d").unwrap();
    graph.add_edge("c", "d").unwrap();
    assert_eq!(graph.search(&"a", true), vec!["a", "b", "d", "c"]);
    assert_eq!(graph.search(&"a", false), vec!["a", "b", "c", "d"]);
    assert!(graph.search(&"zzz", true).is_empty());
}

#[test]
fn edge_list_round_trips_through_from_edges() {
    let mut graph: Graph<String> = Graph::new();
    graph.extend(&chain(&["a", "b"]), None).unwrap();
    graph.branchify(&[chain(&["c", "d"])], None).unwrap();
    let rebuilt = Graph::from_edges(graph.edge_list()).unwrap();
    assert_eq!(rebuilt, graph);
}

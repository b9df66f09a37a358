use crate::internal;
use crate::graph::{Edge, Graph, Mapping, Node};

//-----------------------------------------------------------------------------

fn node_ids(graph: &Graph) -> Vec<i64> {
    graph.nodes.iter().map(|node| node.id).collect()
}

fn path_names(graph: &Graph) -> Vec<&str> {
    graph.paths.iter().map(|path| path.name.as_str()).collect()
}

//-----------------------------------------------------------------------------

#[test]
fn mappings_of_node() {
    let index = internal::build(&internal::looping_graph());
    let mappings = index.node_mappings(1).unwrap();
    assert_eq!(mappings.len(), 2, "Wrong number of mappings for node 1");
    assert_eq!(mappings.get("p"), Some(&Mapping::new(1, false)), "Wrong mapping onto path p");
    assert_eq!(mappings.get("q"), Some(&Mapping::new(1, false)), "Wrong mapping onto path q");

    let mappings = index.node_mappings(3).unwrap();
    assert_eq!(mappings.len(), 1, "Wrong number of mappings for node 3");
    assert!(index.node_mappings(42).is_err(), "Found mappings for a nonexistent node");
}

//-----------------------------------------------------------------------------

#[test]
fn neighborhood_of_middle_node() {
    let index = internal::build(&internal::simple_graph());
    let mut graph = Graph::new();
    index.neighborhood(2, 1, &mut graph).unwrap();

    assert_eq!(node_ids(&graph), vec![2, 1, 3], "Wrong nodes in the neighborhood");
    assert_eq!(
        graph.edges,
        vec![Edge::new(1, 2), Edge::new(2, 3)],
        "Wrong edges in the neighborhood"
    );
    assert_eq!(path_names(&graph), vec!["p"], "Wrong paths in the neighborhood");
}

#[test]
fn neighborhood_without_steps() {
    let index = internal::build(&internal::simple_graph());
    let mut graph = Graph::new();
    index.neighborhood(2, 0, &mut graph).unwrap();

    assert_eq!(node_ids(&graph), vec![2], "Wrong nodes without expansion");
    assert!(graph.edges.is_empty(), "Found edges without expansion");
    assert_eq!(path_names(&graph), vec!["p"], "The paths of the seed node should be attached");
}

#[test]
fn neighborhood_of_missing_node() {
    let index = internal::build(&internal::simple_graph());
    let mut graph = Graph::new();
    assert!(index.neighborhood(42, 1, &mut graph).is_err(), "Expanded a nonexistent node");
}

#[test]
fn context_of_seeded_edge() {
    let index = internal::build(&internal::simple_graph());
    let mut graph = Graph::new();
    graph.edges.push(Edge::new(1, 2));
    index.expand_context(&mut graph, 1).unwrap();

    // One hop from nodes 1 and 2 reaches their edges; node 3 is pulled in so that
    // edge (2, 3) is not orphaned.
    assert_eq!(node_ids(&graph), vec![1, 2, 3], "Wrong nodes after expansion");
    assert_eq!(
        graph.edges,
        vec![Edge::new(1, 2), Edge::new(2, 3)],
        "Wrong edges after expansion"
    );
}

//-----------------------------------------------------------------------------

#[test]
fn range_of_ids() {
    let index = internal::build(&internal::simple_graph());
    let mut graph = Graph::new();
    index.id_range(1, 3, &mut graph).unwrap();
    assert_eq!(node_ids(&graph), vec![1, 2, 3], "Wrong nodes in the id range");
    assert!(graph.edges.is_empty(), "Found edges in an id range");
    assert!(graph.paths.is_empty(), "Found paths in an id range");
}

#[test]
fn clamped_id_range() {
    let index = internal::build(&internal::simple_graph());
    let mut graph = Graph::new();
    index.id_range(-10, 100, &mut graph).unwrap();
    assert_eq!(node_ids(&graph), vec![1, 2, 3], "Wrong nodes in a clamped id range");

    let mut graph = Graph::new();
    index.id_range(3, 1, &mut graph).unwrap();
    assert!(graph.is_empty(), "Found records in an inverted id range");
}

#[test]
fn id_range_skips_missing_ids() {
    let mut input = Graph::new();
    input.nodes.push(Node::new(2, b"AC"));
    input.nodes.push(Node::new(5, b"GT"));
    let index = internal::build(&input);

    let mut graph = Graph::new();
    index.id_range(1, 10, &mut graph).unwrap();
    assert_eq!(node_ids(&graph), vec![2, 5], "Wrong nodes in a sparse id range");
}

//-----------------------------------------------------------------------------

#[test]
fn range_of_path() {
    let index = internal::build(&internal::simple_graph());
    let mut graph = Graph::new();
    index.path_range("p", 0, 2, &mut graph).unwrap();

    // Positions 0..=2 lie on node 1; its incident edges come along.
    assert_eq!(node_ids(&graph), vec![1], "Wrong nodes in the path range");
    assert_eq!(graph.edges, vec![Edge::new(1, 2)], "Wrong edges in the path range");
    assert_eq!(path_names(&graph), vec!["p"], "Wrong paths in the path range");
}

#[test]
fn clamped_path_range() {
    let index = internal::build(&internal::simple_graph());
    let mut graph = Graph::new();
    index.path_range("p", 5, 100, &mut graph).unwrap();
    assert_eq!(node_ids(&graph), vec![3], "Wrong nodes in a clamped path range");

    let mut graph = Graph::new();
    index.path_range("p", -5, 0, &mut graph).unwrap();
    assert_eq!(node_ids(&graph), vec![1], "Wrong nodes for a clamped negative start");
}

#[test]
fn path_range_past_the_end() {
    let index = internal::build(&internal::simple_graph());
    let mut graph = Graph::new();
    index.path_range("p", 100, 200, &mut graph).unwrap();
    assert!(graph.is_empty(), "Found records past the end of the path");
}

#[test]
fn path_range_of_missing_path() {
    let index = internal::build(&internal::simple_graph());
    let mut graph = Graph::new();
    assert!(index.path_range("r", 0, 10, &mut graph).is_err(), "Found a nonexistent path");
}

//-----------------------------------------------------------------------------

use crate::{Builder, Edge, Graph, GraphIndex, Node, Path};

//-----------------------------------------------------------------------------

// Shared test fixtures.

// Nodes { 1: ACG, 2: TT, 3: CC }, edges 1 -> 2 and 2 -> 3, path p = 1+ 2+ 3+.
//
// Entity ranks: node 1 = 1, edge (1, 2) = 2, node 2 = 3, edge (2, 3) = 4, node 3 = 5.
pub(crate) fn simple_graph() -> Graph {
    let mut graph = Graph::new();
    graph.nodes.push(Node::new(1, b"ACG"));
    graph.nodes.push(Node::new(2, b"TT"));
    graph.nodes.push(Node::new(3, b"CC"));
    graph.edges.push(Edge::new(1, 2));
    graph.edges.push(Edge::new(2, 3));
    graph.paths.push(Path::with_steps("p", &[(1, false), (2, false), (3, false)]));
    graph
}

// The simple graph with a second, looping path q = 1+ 2+ 1+.
pub(crate) fn looping_graph() -> Graph {
    let mut graph = simple_graph();
    graph.paths.push(Path::with_steps("q", &[(1, false), (2, false), (1, false)]));
    graph
}

pub(crate) fn build(graph: &Graph) -> GraphIndex {
    let index = GraphIndex::from_graph(graph);
    assert!(index.is_ok(), "Failed to build the index: {}", index.unwrap_err());
    index.unwrap()
}

pub(crate) fn build_validated(graph: &Graph) -> GraphIndex {
    let mut builder = Builder::with_validation();
    let result = builder.add_graph(graph);
    assert!(result.is_ok(), "Failed to ingest the graph: {}", result.unwrap_err());
    let index = builder.finish();
    assert!(index.is_ok(), "Failed to build a validated index: {}", index.unwrap_err());
    index.unwrap()
}

//-----------------------------------------------------------------------------

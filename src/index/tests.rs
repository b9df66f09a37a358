use super::*;

use crate::internal;
use crate::GraphIndexError;

use simple_sds::serialize;

//-----------------------------------------------------------------------------

// Node ranks and sequences.

#[test]
fn header_statistics() {
    let index = internal::build(&internal::simple_graph());
    assert_eq!(index.node_count(), 3, "Wrong node count");
    assert_eq!(index.edge_count(), 2, "Wrong edge count");
    assert_eq!(index.path_count(), 1, "Wrong path count");
    assert_eq!(index.entity_count(), 5, "Wrong entity count");
    assert_eq!(index.sequence_length(), 7, "Wrong sequence length");
    assert_eq!(index.min_node_id(), 1, "Wrong minimum id");
    assert_eq!(index.max_node_id(), 3, "Wrong maximum id");
    assert_eq!(index.max_node_rank(), 3, "Wrong maximum node rank");
    assert_eq!(index.max_path_rank(), 1, "Wrong maximum path rank");
}

#[test]
fn rank_mappings() {
    let index = internal::build(&internal::simple_graph());
    for id in 1..=3 {
        assert!(index.has_node(id), "Node {} is missing", id);
        let rank = index.id_to_rank(id).unwrap();
        assert_eq!(index.rank_to_id(rank).unwrap(), id, "Rank of node {} does not round-trip", id);
    }
    for rank in 1..=3 {
        let id = index.rank_to_id(rank).unwrap();
        assert_eq!(index.id_to_rank(id).unwrap(), rank, "Id of rank {} does not round-trip", rank);
    }
    assert!(!index.has_node(0), "Found a node before the id range");
    assert!(!index.has_node(4), "Found a node after the id range");
    assert!(index.id_to_rank(4).is_err(), "Found a rank for a nonexistent node");
    assert!(index.rank_to_id(0).is_err(), "Found an id for rank 0");
    assert!(index.rank_to_id(4).is_err(), "Found an id for a rank past the nodes");
}

#[test]
fn node_sequences() {
    let graph = internal::simple_graph();
    let index = internal::build(&graph);
    for node in graph.nodes.iter() {
        assert_eq!(
            index.node_sequence(node.id).unwrap(), node.sequence,
            "Wrong sequence for node {}", node.id
        );
        assert_eq!(index.node(node.id).unwrap(), *node, "Wrong record for node {}", node.id);
    }
    assert!(index.node_sequence(42).is_err(), "Found a sequence for a nonexistent node");
}

#[test]
fn coerced_sequences() {
    let mut graph = Graph::new();
    graph.nodes.push(Node::new(1, b"AXGN"));
    let index = internal::build(&graph);
    assert_eq!(
        index.node_sequence(1).unwrap(), b"ANGN",
        "Bases outside ATCG should be stored as N"
    );
}

#[test]
fn discontiguous_ids() {
    let mut graph = Graph::new();
    graph.nodes.push(Node::new(-3, b"AC"));
    graph.nodes.push(Node::new(5, b"GT"));
    graph.nodes.push(Node::new(10, b"T"));
    let index = internal::build(&graph);

    assert_eq!(index.min_node_id(), -3, "Wrong minimum id");
    assert_eq!(index.max_node_id(), 10, "Wrong maximum id");
    assert_eq!(index.id_to_rank(-3).unwrap(), 1, "Wrong rank for the smallest id");
    assert_eq!(index.id_to_rank(5).unwrap(), 2, "Wrong rank for the middle id");
    assert_eq!(index.id_to_rank(10).unwrap(), 3, "Wrong rank for the largest id");
    assert!(!index.has_node(0), "Found a node in an id gap");
    assert_eq!(index.node_sequence(5).unwrap(), b"GT", "Wrong sequence for node 5");
}

//-----------------------------------------------------------------------------

// Entities.

#[test]
fn entity_numbering() {
    let index = internal::build(&internal::simple_graph());
    assert_eq!(index.node_entity_rank(1).unwrap(), 1, "Wrong entity rank for node 1");
    assert_eq!(index.edge_entity_rank(1, 2).unwrap(), 2, "Wrong entity rank for edge (1, 2)");
    assert_eq!(index.node_entity_rank(2).unwrap(), 3, "Wrong entity rank for node 2");
    assert_eq!(index.edge_entity_rank(2, 3).unwrap(), 4, "Wrong entity rank for edge (2, 3)");
    assert_eq!(index.node_entity_rank(3).unwrap(), 5, "Wrong entity rank for node 3");

    for (entity, is_node) in [(1, true), (2, false), (3, true), (4, false), (5, true)] {
        assert_eq!(
            index.entity_is_node(entity).unwrap(), is_node,
            "Wrong entity type for entity {}", entity
        );
    }
    assert_eq!(index.entity_as_node_rank(3).unwrap(), Some(2), "Wrong node rank for entity 3");
    assert_eq!(index.entity_as_node_rank(2).unwrap(), None, "Found a node rank for an edge entity");
    assert!(index.entity_is_node(0).is_err(), "Accepted entity 0");
    assert!(index.entity_is_node(6).is_err(), "Accepted an entity past the range");

    let missing = index.edge_entity_rank(1, 3);
    assert!(
        matches!(missing, Err(GraphIndexError::NotFound(_))),
        "Wrong error for a nonexistent edge: {:?}", missing
    );
}

//-----------------------------------------------------------------------------

// Edges.

#[test]
fn edge_queries() {
    let graph = internal::simple_graph();
    let index = internal::build(&graph);

    for edge in graph.edges.iter() {
        assert!(index.has_edge(edge.from, edge.to).unwrap(), "Missing edge from {} to {}", edge.from, edge.to);
        let outgoing = index.edges_from(edge.from).unwrap();
        assert_eq!(
            outgoing.iter().filter(|found| *found == edge).count(), 1,
            "Edge from {} to {} is not listed once in edges_from", edge.from, edge.to
        );
        let incoming = index.edges_to(edge.to).unwrap();
        assert_eq!(
            incoming.iter().filter(|found| *found == edge).count(), 1,
            "Edge from {} to {} is not listed once in edges_to", edge.from, edge.to
        );
    }

    assert!(!index.has_edge(1, 3).unwrap(), "Found a nonexistent edge");
    assert!(!index.has_edge(2, 2).unwrap(), "Found a nonexistent self-loop");
    assert!(index.has_edge(1, 42).is_err(), "Accepted a nonexistent endpoint");

    let edges = index.edges_of(2).unwrap();
    assert_eq!(edges.len(), 2, "Wrong number of edges incident to node 2");
    assert_eq!(edges[0], Edge::new(1, 2), "Wrong first incident edge");
    assert_eq!(edges[1], Edge::new(2, 3), "Wrong second incident edge");
}

#[test]
fn edges_by_side() {
    let index = internal::build(&internal::simple_graph());

    // Edge (1, 2, +, +) leaves the end of node 1 and enters the start of node 2.
    assert_eq!(index.edges_on_start(1).unwrap(), vec![], "Wrong edges on the start of node 1");
    assert_eq!(index.edges_on_end(1).unwrap(), vec![Edge::new(1, 2)], "Wrong edges on the end of node 1");
    assert_eq!(index.edges_on_start(2).unwrap(), vec![Edge::new(1, 2)], "Wrong edges on the start of node 2");
    assert_eq!(index.edges_on_end(2).unwrap(), vec![Edge::new(2, 3)], "Wrong edges on the end of node 2");
}

#[test]
fn oriented_edges() {
    let mut graph = Graph::new();
    graph.nodes.push(Node::new(1, b"A"));
    graph.nodes.push(Node::new(2, b"C"));
    graph.edges.push(Edge::with_orientation(1, true, 2, true));
    let index = internal::build(&graph);

    let edges = index.edges_of(1).unwrap();
    assert_eq!(edges.len(), 1, "Wrong number of edges incident to node 1");
    assert_eq!(edges[0], Edge::with_orientation(1, true, 2, true), "Wrong orientation bits");
    assert_eq!(
        index.edges_on_start(1).unwrap(), edges,
        "An edge with from_start set should touch the start of its source"
    );
    assert_eq!(
        index.edges_on_end(2).unwrap(), edges,
        "An edge with to_end set should touch the end of its destination"
    );
}

//-----------------------------------------------------------------------------

// Paths.

#[test]
fn path_names() {
    let index = internal::build(&internal::looping_graph());
    assert_eq!(index.path_rank("p").unwrap(), 1, "Wrong rank for path p");
    assert_eq!(index.path_rank("q").unwrap(), 2, "Wrong rank for path q");
    assert_eq!(index.path_name(1).unwrap(), "p", "Wrong name for path rank 1");
    assert_eq!(index.path_name(2).unwrap(), "q", "Wrong name for path rank 2");
    assert!(
        matches!(index.path_rank("r"), Err(GraphIndexError::NotFound(_))),
        "Found a nonexistent path"
    );
    assert!(index.path_name(0).is_err(), "Found a name for path rank 0");
    assert!(index.path_name(3).is_err(), "Found a name for a rank past the paths");
}

#[test]
fn path_positions() {
    let index = internal::build(&internal::simple_graph());
    assert_eq!(index.path_length("p").unwrap(), 7, "Wrong length for path p");

    let node_of_position = [1, 1, 1, 2, 2, 3, 3];
    for (position, id) in node_of_position.iter().enumerate() {
        assert_eq!(
            index.node_at_path_position("p", position).unwrap(), *id,
            "Wrong node at position {}", position
        );
    }
    let past_end = index.node_at_path_position("p", 7);
    assert!(
        matches!(past_end, Err(GraphIndexError::OutOfRange(_))),
        "Wrong error for a position past the end: {:?}", past_end
    );

    assert_eq!(index.node_position_in_path(1, "p").unwrap(), 0, "Wrong position for node 1");
    assert_eq!(index.node_position_in_path(2, "p").unwrap(), 3, "Wrong position for node 2");
    assert_eq!(index.node_position_in_path(3, "p").unwrap(), 5, "Wrong position for node 3");
}

#[test]
fn looping_path() {
    let index = internal::build(&internal::looping_graph());
    assert_eq!(index.path_length("q").unwrap(), 8, "Wrong length for path q");
    assert_eq!(index.node_occurrences_in_path(1, "q").unwrap(), 2, "Wrong occurrences for node 1");
    assert_eq!(index.node_occurrences_in_path(2, "q").unwrap(), 1, "Wrong occurrences for node 2");
    assert_eq!(index.node_occurrences_in_path(3, "q").unwrap(), 0, "Wrong occurrences for node 3");
    assert_eq!(index.node_at_path_position("q", 5).unwrap(), 1, "Wrong node at position 5");

    // The position of a repeated node is the position of its first visit.
    assert_eq!(index.node_position_in_path(1, "q").unwrap(), 0, "Wrong position for a repeated node");
    assert!(
        matches!(index.node_position_in_path(3, "q"), Err(GraphIndexError::NotFound(_))),
        "Found a position for a node that is not on the path"
    );
}

#[test]
fn path_membership() {
    let index = internal::build(&internal::looping_graph());
    for id in [1, 2, 3] {
        assert!(index.path_contains_node("p", id).unwrap(), "Path p should visit node {}", id);
    }
    assert!(index.path_contains_edge("p", 1, 2).unwrap(), "Path p should traverse edge (1, 2)");
    assert!(index.path_contains_edge("p", 2, 3).unwrap(), "Path p should traverse edge (2, 3)");
    assert!(index.path_contains_node("q", 2).unwrap(), "Path q should visit node 2");
    assert!(!index.path_contains_node("q", 3).unwrap(), "Path q should not visit node 3");
    assert!(index.path_contains_edge("q", 1, 2).unwrap(), "Path q should traverse edge (1, 2)");
    assert!(!index.path_contains_edge("q", 2, 3).unwrap(), "Path q should not traverse edge (2, 3)");
}

#[test]
fn paths_of_entities() {
    let index = internal::build(&internal::looping_graph());
    assert_eq!(index.paths_of_node(1).unwrap(), vec![1, 2], "Wrong paths for node 1");
    assert_eq!(index.paths_of_node(2).unwrap(), vec![1, 2], "Wrong paths for node 2");
    assert_eq!(index.paths_of_node(3).unwrap(), vec![1], "Wrong paths for node 3");
    assert_eq!(index.paths_of_edge(1, 2).unwrap(), vec![1, 2], "Wrong paths for edge (1, 2)");
    assert_eq!(index.paths_of_edge(2, 3).unwrap(), vec![1], "Wrong paths for edge (2, 3)");
    assert!(index.paths_of_entity(0).is_err(), "Accepted entity 0");
    assert!(index.paths_of_entity(6).is_err(), "Accepted an entity past the range");
}

#[test]
fn node_without_paths() {
    let mut graph = internal::simple_graph();
    graph.nodes.push(Node::new(4, b"GG"));
    let index = internal::build(&graph);
    assert_eq!(
        index.paths_of_node(4).unwrap(), vec![],
        "Found paths for a node that no path visits"
    );
}

//-----------------------------------------------------------------------------

// Serialization.

#[test]
fn save_and_open() {
    let index = internal::build(&internal::looping_graph());
    let filename = serialize::temp_file_name("graph-index");
    index.save(&filename).unwrap();
    let loaded = GraphIndex::open(&filename).unwrap();

    assert_eq!(loaded.node_count(), index.node_count(), "Wrong node count after load");
    assert_eq!(loaded.edge_count(), index.edge_count(), "Wrong edge count after load");
    assert_eq!(loaded.path_count(), index.path_count(), "Wrong path count after load");
    for id in 1..=3 {
        assert_eq!(
            loaded.node_sequence(id).unwrap(),
            index.node_sequence(id).unwrap(),
            "Wrong sequence for node {} after load", id
        );
        assert_eq!(
            loaded.edges_of(id).unwrap(),
            index.edges_of(id).unwrap(),
            "Wrong edges for node {} after load", id
        );
        assert_eq!(
            loaded.paths_of_node(id).unwrap(),
            index.paths_of_node(id).unwrap(),
            "Wrong paths for node {} after load", id
        );
    }
    for name in ["p", "q"] {
        assert_eq!(
            loaded.path_length(name).unwrap(),
            index.path_length(name).unwrap(),
            "Wrong length for path {} after load", name
        );
    }
    assert_eq!(
        loaded.node_at_path_position("q", 5).unwrap(),
        index.node_at_path_position("q", 5).unwrap(),
        "Wrong positional lookup after load"
    );

    std::fs::remove_file(&filename).unwrap();
}

#[test]
fn deterministic_serialization() {
    let first = internal::build(&internal::looping_graph());
    let second = internal::build(&internal::looping_graph());

    let mut first_bytes: Vec<u8> = Vec::new();
    first.serialize(&mut first_bytes).unwrap();
    let mut second_bytes: Vec<u8> = Vec::new();
    second.serialize(&mut second_bytes).unwrap();
    assert_eq!(first_bytes, second_bytes, "Two builds from the same input differ");
}

#[test]
fn serialization_round_trip() {
    let index = internal::build(&internal::looping_graph());

    let mut original: Vec<u8> = Vec::new();
    index.serialize(&mut original).unwrap();
    let mut cursor = std::io::Cursor::new(&original[..]);
    let loaded = GraphIndex::load(&mut cursor).unwrap();
    let mut reserialized: Vec<u8> = Vec::new();
    loaded.serialize(&mut reserialized).unwrap();
    assert_eq!(original, reserialized, "Serialization does not round-trip");
}

#[test]
fn truncated_input() {
    let index = internal::build(&internal::simple_graph());
    let mut bytes: Vec<u8> = Vec::new();
    index.serialize(&mut bytes).unwrap();
    bytes.truncate(bytes.len() / 2);
    let mut cursor = std::io::Cursor::new(&bytes[..]);
    assert!(GraphIndex::load(&mut cursor).is_err(), "Loaded a truncated index");
}

#[test]
fn empty_path_set() {
    let mut graph = Graph::new();
    graph.nodes.push(Node::new(1, b"ACGT"));
    let index = internal::build(&graph);
    assert_eq!(index.path_count(), 0, "Wrong path count");

    let filename = serialize::temp_file_name("graph-index");
    index.save(&filename).unwrap();
    let loaded = GraphIndex::open(&filename).unwrap();
    assert_eq!(loaded.path_count(), 0, "Wrong path count after load");
    assert!(loaded.path_rank("p").is_err(), "Found a path in an index without paths");

    std::fs::remove_file(&filename).unwrap();
}

#[test]
fn validated_build_matches_plain_build() {
    let graph = internal::looping_graph();
    let plain = internal::build(&graph);
    let validated = internal::build_validated(&graph);

    let mut plain_bytes: Vec<u8> = Vec::new();
    plain.serialize(&mut plain_bytes).unwrap();
    let mut validated_bytes: Vec<u8> = Vec::new();
    validated.serialize(&mut validated_bytes).unwrap();
    assert_eq!(plain_bytes, validated_bytes, "Validation changed the built index");
}

//-----------------------------------------------------------------------------

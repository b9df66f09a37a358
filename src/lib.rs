//! # seqgraph: succinct, self-indexed sequence graphs
//!
//! This crate stores a sequence graph together with a set of named paths through it.
//! The graph is directed; its nodes carry DNA strings, and its edges describe how the
//! strings can be walked to spell longer sequences.
//! The entire graph is packed into a collection of bit vectors and packed integer vectors
//! with rank/select support, so that positional and topological queries run in time
//! that depends only on the query, not on the size of the graph.
//! The representation is write-once: a [`Builder`] turns a stream of graph fragments
//! into an immutable [`GraphIndex`], which can then be serialized and loaded without
//! any further construction work.
//!
//! The succinct primitives come from the [`simple_sds`] crate.
//! Node starts in the concatenated sequence, orientation bits, and path memberships
//! are sparse bit vectors; adjacency and path layouts are packed integer vectors with
//! plain bit vectors marking record boundaries.
//! Path names are found with a suffix array over the concatenated names,
//! and the node sequence of each path is indexed with a wavelet matrix so that
//! loops can be counted and located without scanning the path.
//!
//! ### Basic concepts
//!
//! Nodes are identified by caller-chosen signed 64-bit ids and ordered by id.
//! The 1-based position of a node in that order is its *rank*.
//! Nodes and edges share a unified *entity* numbering derived from the forward
//! adjacency layout, which path membership and the entity-to-path map are based on.
//!
//! Queries that extract a region of the graph ([`GraphIndex::neighborhood`],
//! [`GraphIndex::path_range`], [`GraphIndex::id_range`]) populate a [`Graph`] of
//! plain [`Node`], [`Edge`], and [`Path`] records that can be fed back into a builder.
//!
//! # Examples
//!
//! ```
//! use seqgraph::{Graph, GraphIndex, Node, Edge, Path};
//!
//! let mut graph = Graph::new();
//! graph.nodes.push(Node::new(1, b"ACG"));
//! graph.nodes.push(Node::new(2, b"TT"));
//! graph.edges.push(Edge::new(1, 2));
//! graph.paths.push(Path::with_steps("x", &[(1, false), (2, false)]));
//!
//! let index = GraphIndex::from_graph(&graph).unwrap();
//! assert_eq!(index.node_count(), 2);
//! assert_eq!(index.node_sequence(2).unwrap(), b"TT");
//! assert_eq!(index.path_length("x").unwrap(), 5);
//! assert_eq!(index.node_at_path_position("x", 4).unwrap(), 2);
//! ```

pub mod builder;
pub mod extract;
pub mod formats;
pub mod graph;
pub mod index;
pub mod path;
pub mod suffix;
pub mod utils;
pub mod wavelet;

pub(crate) mod edges;

pub use builder::Builder;
pub use graph::{Edge, Graph, Mapping, Node, Path};
pub use index::GraphIndex;
pub use path::IndexedPath;

use thiserror::Error;

#[cfg(test)]
pub(crate) mod internal;


//-----------------------------------------------------------------------------

/// Errors reported by index construction, loading, and queries.
///
/// Errors detected during construction abort the build.
/// Errors during queries are returned to the caller; no query mutates the index.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphIndexError {
    /// A structural invariant was violated while loading a serialized index.
    #[error("corrupt index: {0}")]
    CorruptIndex(String),

    /// An id, name, edge, or entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A path name resolved to more than one location.
    #[error("name is not unique: {0}")]
    NotUnique(String),

    /// The input records cannot be indexed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A path position outside the valid range.
    #[error("out of range: {0}")]
    OutOfRange(String),
}

//! In-memory graph records.
//!
//! These are the records the index is built from and the records graph extraction
//! queries produce: nodes with DNA sequences, edges between oriented node ends,
//! and named paths of node visits.
//! Records are grouped into [`Graph`] batches.
//! A batch does not have to be complete or ordered; the builder accepts nodes,
//! edges, and path fragments in any order across any number of batches.

//-----------------------------------------------------------------------------

/// A node record: an id and a DNA sequence.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Node {
    /// Caller-chosen identifier; node ids do not have to be contiguous.
    pub id: i64,

    /// Sequence over `ATCG`; other bytes are stored as `N`.
    pub sequence: Vec<u8>,
}

impl Node {
    /// Creates a new node record.
    pub fn new(id: i64, sequence: &[u8]) -> Self {
        Node { id, sequence: sequence.to_vec() }
    }
}

//-----------------------------------------------------------------------------

/// An edge record between two oriented node ends.
///
/// `from_start` attaches the edge to the start of the source node instead of its end,
/// and `to_end` attaches it to the end of the destination node instead of its start.
/// Edges are identified by the full 4-tuple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    /// Source node id.
    pub from: i64,

    /// Destination node id.
    pub to: i64,

    /// The edge attaches to the start of the source node.
    pub from_start: bool,

    /// The edge attaches to the end of the destination node.
    pub to_end: bool,
}

impl Edge {
    /// Creates an edge from the end of `from` to the start of `to`.
    pub fn new(from: i64, to: i64) -> Self {
        Edge { from, to, from_start: false, to_end: false }
    }

    /// Creates an edge with explicit orientations.
    pub fn with_orientation(from: i64, from_start: bool, to: i64, to_end: bool) -> Self {
        Edge { from, to, from_start, to_end }
    }
}

//-----------------------------------------------------------------------------

/// A single path step: a visit to a node in the given direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mapping {
    /// The id of the visited node.
    pub node_id: i64,

    /// The node is traversed in reverse.
    pub is_reverse: bool,
}

impl Mapping {
    /// Creates a new mapping.
    pub fn new(node_id: i64, is_reverse: bool) -> Self {
        Mapping { node_id, is_reverse }
    }
}

/// A path record: a name and an ordered walk over nodes.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path {
    /// Path name; must not contain the name delimiters `#` and `$`.
    pub name: String,

    /// The steps of the path in order.
    pub mappings: Vec<Mapping>,
}

impl Path {
    /// Creates an empty path with the given name.
    pub fn new(name: &str) -> Self {
        Path { name: String::from(name), mappings: Vec::new() }
    }

    /// Creates a path visiting the given `(node id, is reverse)` steps.
    pub fn with_steps(name: &str, steps: &[(i64, bool)]) -> Self {
        let mappings = steps.iter().map(|(id, rev)| Mapping::new(*id, *rev)).collect();
        Path { name: String::from(name), mappings }
    }
}

//-----------------------------------------------------------------------------

/// A batch of graph records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    /// Node records.
    pub nodes: Vec<Node>,

    /// Edge records.
    pub edges: Vec<Edge>,

    /// Path records.
    pub paths: Vec<Path>,
}

impl Graph {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Graph::default()
    }

    /// Returns `true` if the batch contains no records.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty() && self.paths.is_empty()
    }

    /// Returns the path with the given name, creating an empty one if necessary.
    pub fn path_mut(&mut self, name: &str) -> &mut Path {
        if let Some(index) = self.paths.iter().position(|path| path.name == name) {
            return &mut self.paths[index];
        }
        self.paths.push(Path::new(name));
        self.paths.last_mut().unwrap()
    }
}

//-----------------------------------------------------------------------------


//-----------------------------------------------------------------------------

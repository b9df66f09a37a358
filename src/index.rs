//! The succinct, self-indexed sequence graph.
//!
//! [`GraphIndex`] stores the nodes, edges, and paths of a sequence graph in a
//! collection of packed integer vectors and rank/select bit vectors.
//! The index is write-once: it is produced by a [`crate::Builder`], optionally
//! serialized, and never mutated afterwards.
//! All queries are read-only, so a loaded index can be shared freely between threads.

use crate::builder::Builder;
use crate::edges::AdjacencyTable;
use crate::graph::{Edge, Graph, Node};
use crate::path::IndexedPath;
use crate::suffix::SuffixArray;
use crate::{utils, GraphIndexError};

use simple_sds::bit_vector::BitVector;
use simple_sds::int_vector::IntVector;
use simple_sds::ops::{Access, BitVec, Rank, Select, Vector};
use simple_sds::serialize::{self, Serialize};
use simple_sds::sparse_vector::SparseVector;

use std::collections::BTreeSet;
use std::io;
use std::ops::Range;
use std::path::Path as FilePath;

#[cfg(test)]
mod tests;

//-----------------------------------------------------------------------------

/// Start marker preceding every path name in the name store.
///
/// This byte must not occur within a path name.
pub const NAME_START_MARKER: u8 = 0x23; // '#'

/// End marker following every path name in the name store.
///
/// This byte must not occur within a path name.
pub const NAME_END_MARKER: u8 = 0x24; // '$'

//-----------------------------------------------------------------------------

/// An immutable succinct index of a sequence graph with named paths.
///
/// Nodes are ordered by ascending id; the 1-based position of a node in that order
/// is its *rank*.
/// Nodes and edges share a unified *entity* numbering derived from the forward
/// adjacency layout: the entity rank of the entry at position `i` of the layout is
/// `i + 1`.
///
/// # Examples
///
/// ```
/// use seqgraph::{Graph, GraphIndex, Node, Edge, Path};
///
/// let mut graph = Graph::new();
/// graph.nodes.push(Node::new(1, b"ACG"));
/// graph.nodes.push(Node::new(2, b"TT"));
/// graph.nodes.push(Node::new(3, b"CC"));
/// graph.edges.push(Edge::new(1, 2));
/// graph.edges.push(Edge::new(2, 3));
/// graph.paths.push(Path::with_steps("p", &[(1, false), (2, false), (3, false)]));
/// let index = GraphIndex::from_graph(&graph).unwrap();
///
/// assert_eq!(index.node_count(), 3);
/// assert_eq!(index.edge_count(), 2);
/// assert!(index.has_edge(2, 3).unwrap());
/// assert_eq!(index.path_rank("p").unwrap(), 1);
/// assert_eq!(index.node_position_in_path(2, "p").unwrap(), 3);
/// ```
#[derive(Debug)]
pub struct GraphIndex {
    pub(crate) sequence_length: usize,
    pub(crate) node_count: usize,
    pub(crate) edge_count: usize,
    pub(crate) path_count: usize,
    pub(crate) min_id: i64,
    pub(crate) max_id: i64,

    // Node rank - 1 to id - min_id.
    pub(crate) node_ids: IntVector,

    // id - min_id to node rank; 0 marks an unused id.
    pub(crate) node_to_rank: IntVector,

    // 3-bit codes of the node sequences concatenated in rank order.
    pub(crate) sequence: IntVector,

    // First base of each node in `sequence`.
    pub(crate) node_starts: SparseVector,

    // Adjacency grouped by source node.
    pub(crate) forward: AdjacencyTable,

    // Adjacency grouped by destination node.
    pub(crate) reverse: AdjacencyTable,

    // Concatenated `#name$` for every path in rank order.
    pub(crate) names: Vec<u8>,

    // Suffix array over `names`.
    pub(crate) name_index: SuffixArray,

    // Marks the start marker of each name; rank/select enabled.
    pub(crate) name_starts: BitVector,

    // Name rank to path rank.
    pub(crate) path_ids: IntVector,

    pub(crate) paths: Vec<IndexedPath>,

    // For each entity in rank order, a zero sentinel followed by the ranks of the
    // paths traversing the entity.
    pub(crate) entity_paths: IntVector,

    // Marks the sentinels; rank/select enabled.
    pub(crate) entity_path_starts: BitVector,
}

//-----------------------------------------------------------------------------

// Construction and serialization.

impl GraphIndex {
    /// Builds an index from a single in-memory batch of records.
    pub fn from_graph(graph: &Graph) -> Result<Self, GraphIndexError> {
        let mut builder = Builder::new();
        builder.add_graph(graph)?;
        builder.finish()
    }

    /// Builds an index by draining a stream of record batches.
    pub fn from_batches<I: IntoIterator<Item = Graph>>(batches: I) -> Result<Self, GraphIndexError> {
        let mut builder = Builder::new();
        builder.extend(batches)?;
        builder.finish()
    }

    /// Serializes the index to the given file.
    pub fn save<P: AsRef<FilePath>>(&self, filename: P) -> io::Result<()> {
        serialize::serialize_to(self, filename)
    }

    /// Loads an index serialized with [`GraphIndex::save`].
    ///
    /// Returns [`GraphIndexError::CorruptIndex`] if the file cannot be read or its
    /// structural invariants do not hold.
    pub fn open<P: AsRef<FilePath>>(filename: P) -> Result<Self, GraphIndexError> {
        serialize::load_from(filename).map_err(|err| GraphIndexError::CorruptIndex(err.to_string()))
    }
}

//-----------------------------------------------------------------------------

// Header statistics.

impl GraphIndex {
    /// Returns the number of nodes in the graph.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns the number of edges in the graph.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns the number of paths in the graph.
    #[inline]
    pub fn path_count(&self) -> usize {
        self.path_count
    }

    /// Returns the number of entities: nodes followed by edges.
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.node_count + self.edge_count
    }

    /// Returns the total length of the node sequences in bases.
    #[inline]
    pub fn sequence_length(&self) -> usize {
        self.sequence_length
    }

    /// Returns the smallest node id.
    #[inline]
    pub fn min_node_id(&self) -> i64 {
        self.min_id
    }

    /// Returns the largest node id.
    #[inline]
    pub fn max_node_id(&self) -> i64 {
        self.max_id
    }

    /// Returns the largest node rank, as determined by the sequence store.
    pub fn max_node_rank(&self) -> usize {
        self.node_starts.rank(self.node_starts.len())
    }

    /// Returns the largest path rank, as determined by the name store.
    pub fn max_path_rank(&self) -> usize {
        self.name_starts.count_ones()
    }
}

//-----------------------------------------------------------------------------

// Nodes and sequences.

impl GraphIndex {
    /// Returns `true` if the graph contains a node with the given id.
    pub fn has_node(&self, id: i64) -> bool {
        id >= self.min_id && id <= self.max_id
            && self.node_to_rank.get((id - self.min_id) as usize) != 0
    }

    /// Returns the rank of the node with the given id.
    pub fn id_to_rank(&self, id: i64) -> Result<usize, GraphIndexError> {
        if !self.has_node(id) {
            return Err(GraphIndexError::NotFound(format!("node {}", id)));
        }
        Ok(self.node_to_rank.get((id - self.min_id) as usize) as usize)
    }

    /// Returns the id of the node with the given rank.
    pub fn rank_to_id(&self, rank: usize) -> Result<i64, GraphIndexError> {
        if rank == 0 || rank > self.node_count {
            return Err(GraphIndexError::NotFound(format!("node rank {}", rank)));
        }
        Ok(self.node_ids.get(rank - 1) as i64 + self.min_id)
    }

    // Range of the node with the given rank in the concatenated sequence.
    fn sequence_range(&self, rank: usize) -> Result<Range<usize>, GraphIndexError> {
        let start = self.node_starts.select(rank - 1).ok_or_else(|| {
            GraphIndexError::CorruptIndex(format!("no sequence start for node rank {}", rank))
        })?;
        let end = if rank == self.node_count {
            self.sequence.len()
        } else {
            self.node_starts.select(rank).ok_or_else(|| {
                GraphIndexError::CorruptIndex(format!("no sequence start for node rank {}", rank + 1))
            })?
        };
        Ok(start..end)
    }

    // Sequence length of the node with the given rank.
    pub(crate) fn node_length(&self, rank: usize) -> Result<usize, GraphIndexError> {
        Ok(self.sequence_range(rank)?.len())
    }

    /// Returns the sequence of the node with the given id.
    pub fn node_sequence(&self, id: i64) -> Result<Vec<u8>, GraphIndexError> {
        let rank = self.id_to_rank(id)?;
        let range = self.sequence_range(rank)?;
        Ok(range.map(|index| utils::decode_base(self.sequence.get(index))).collect())
    }

    /// Returns a node record for the given id.
    pub fn node(&self, id: i64) -> Result<Node, GraphIndexError> {
        Ok(Node { id, sequence: self.node_sequence(id)? })
    }
}

//-----------------------------------------------------------------------------

// Entities.

impl GraphIndex {
    /// Returns the entity rank of the node with the given id.
    pub fn node_entity_rank(&self, id: i64) -> Result<usize, GraphIndexError> {
        let rank = self.id_to_rank(id)?;
        let position = self.forward.header_position(rank).ok_or_else(|| {
            GraphIndexError::CorruptIndex(format!("no adjacency header for node rank {}", rank))
        })?;
        Ok(position + 1)
    }

    /// Returns the entity rank of the edge between the given nodes.
    ///
    /// The edge is identified by its endpoints only; if several edges with different
    /// orientations join the nodes, the first one in the layout is used.
    pub fn edge_entity_rank(&self, from: i64, to: i64) -> Result<usize, GraphIndexError> {
        let from_rank = self.id_to_rank(from)?;
        let to_rank = self.id_to_rank(to)?;
        let range = self.forward.link_range(from_rank).ok_or_else(|| {
            GraphIndexError::CorruptIndex(format!("no adjacency header for node rank {}", from_rank))
        })?;
        for position in range {
            if self.forward.entry(position) == to_rank {
                return Ok(position + 1);
            }
        }
        Err(GraphIndexError::NotFound(format!("edge from {} to {}", from, to)))
    }

    /// Returns `true` if the entity with the given rank is a node.
    pub fn entity_is_node(&self, entity_rank: usize) -> Result<bool, GraphIndexError> {
        if entity_rank == 0 || entity_rank > self.entity_count() {
            return Err(GraphIndexError::NotFound(format!("entity {}", entity_rank)));
        }
        Ok(self.forward.is_header(entity_rank - 1))
    }

    /// Returns the node rank of the entity with the given rank,
    /// or [`None`] if the entity is an edge.
    pub fn entity_as_node_rank(&self, entity_rank: usize) -> Result<Option<usize>, GraphIndexError> {
        if self.entity_is_node(entity_rank)? {
            Ok(Some(self.forward.entry(entity_rank - 1)))
        } else {
            Ok(None)
        }
    }
}

//-----------------------------------------------------------------------------

// Edges.

impl GraphIndex {
    /// Returns `true` if the graph contains an edge between the given nodes,
    /// in any orientation.
    pub fn has_edge(&self, from: i64, to: i64) -> Result<bool, GraphIndexError> {
        match self.edge_entity_rank(from, to) {
            Ok(_) => Ok(true),
            Err(GraphIndexError::NotFound(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Returns the edges leaving the node with the given id, in layout order.
    pub fn edges_from(&self, id: i64) -> Result<Vec<Edge>, GraphIndexError> {
        let rank = self.id_to_rank(id)?;
        let range = self.forward.link_range(rank).ok_or_else(|| {
            GraphIndexError::CorruptIndex(format!("no adjacency header for node rank {}", rank))
        })?;
        let mut result = Vec::with_capacity(range.len());
        for position in range {
            let (to_rank, from_start, to_end) = self.forward.link(position);
            result.push(Edge {
                from: id,
                to: self.rank_to_id(to_rank)?,
                from_start,
                to_end,
            });
        }
        Ok(result)
    }

    /// Returns the edges arriving at the node with the given id, in layout order.
    pub fn edges_to(&self, id: i64) -> Result<Vec<Edge>, GraphIndexError> {
        let rank = self.id_to_rank(id)?;
        let range = self.reverse.link_range(rank).ok_or_else(|| {
            GraphIndexError::CorruptIndex(format!("no adjacency header for node rank {}", rank))
        })?;
        let mut result = Vec::with_capacity(range.len());
        for position in range {
            let (from_rank, to_end, from_start) = self.reverse.link(position);
            result.push(Edge {
                from: self.rank_to_id(from_rank)?,
                to: id,
                from_start,
                to_end,
            });
        }
        Ok(result)
    }

    /// Returns all edges incident to the node with the given id, without duplicates.
    pub fn edges_of(&self, id: i64) -> Result<Vec<Edge>, GraphIndexError> {
        let mut result = self.edges_to(id)?;
        result.extend(self.edges_from(id)?);
        let mut seen: BTreeSet<Edge> = BTreeSet::new();
        result.retain(|edge| seen.insert(*edge));
        Ok(result)
    }

    /// Returns the edges incident to the start of the node with the given id.
    pub fn edges_on_start(&self, id: i64) -> Result<Vec<Edge>, GraphIndexError> {
        let mut result = self.edges_of(id)?;
        result.retain(|edge| {
            (edge.from == id && edge.from_start) || (edge.to == id && !edge.to_end)
        });
        Ok(result)
    }

    /// Returns the edges incident to the end of the node with the given id.
    pub fn edges_on_end(&self, id: i64) -> Result<Vec<Edge>, GraphIndexError> {
        let mut result = self.edges_of(id)?;
        result.retain(|edge| {
            (edge.from == id && !edge.from_start) || (edge.to == id && edge.to_end)
        });
        Ok(result)
    }
}

//-----------------------------------------------------------------------------

// Paths.

impl GraphIndex {
    /// Returns the rank of the path with the given name.
    pub fn path_rank(&self, name: &str) -> Result<usize, GraphIndexError> {
        let mut query: Vec<u8> = Vec::with_capacity(name.len() + 2);
        query.push(NAME_START_MARKER);
        query.extend_from_slice(name.as_bytes());
        query.push(NAME_END_MARKER);
        let hits = self.name_index.locate(&self.names, &query);
        match hits.len() {
            0 => Err(GraphIndexError::NotFound(format!("path {}", name))),
            1 => {
                let name_rank = self.name_starts.rank(hits[0]) + 1;
                Ok(self.path_ids.get(name_rank - 1) as usize)
            }
            _ => Err(GraphIndexError::NotUnique(format!("path {}", name))),
        }
    }

    /// Returns the name of the path with the given rank.
    pub fn path_name(&self, rank: usize) -> Result<String, GraphIndexError> {
        if rank == 0 || rank > self.path_count {
            return Err(GraphIndexError::NotFound(format!("path rank {}", rank)));
        }
        let start = self.name_starts.select(rank - 1).ok_or_else(|| {
            GraphIndexError::CorruptIndex(format!("no name start for path rank {}", rank))
        })? + 1;
        let end = if rank == self.path_count {
            self.names.len()
        } else {
            self.name_starts.select(rank).ok_or_else(|| {
                GraphIndexError::CorruptIndex(format!("no name start for path rank {}", rank + 1))
            })?
        } - 1;
        Ok(String::from_utf8_lossy(&self.names[start..end]).into_owned())
    }

    /// Returns the succinct structures of the path with the given rank.
    pub fn indexed_path(&self, rank: usize) -> Result<&IndexedPath, GraphIndexError> {
        if rank == 0 || rank > self.path_count {
            return Err(GraphIndexError::NotFound(format!("path rank {}", rank)));
        }
        Ok(&self.paths[rank - 1])
    }

    // The path with the given name.
    fn path_by_name(&self, name: &str) -> Result<&IndexedPath, GraphIndexError> {
        let rank = self.path_rank(name)?;
        self.indexed_path(rank)
    }

    /// Returns the sequence length of the named path in bases.
    pub fn path_length(&self, name: &str) -> Result<usize, GraphIndexError> {
        Ok(self.path_by_name(name)?.length())
    }

    /// Returns the id of the node covering the given base position on the named path.
    pub fn node_at_path_position(&self, name: &str, position: usize) -> Result<i64, GraphIndexError> {
        let path = self.path_by_name(name)?;
        let step = path.step_at_position(position)?;
        self.rank_to_id(path.node_rank_at_step(step) as usize)
    }

    /// Returns the base position of the node with the given id on the named path.
    ///
    /// If the path visits the node more than once, a warning is emitted and the
    /// position of the first visit is returned.
    pub fn node_position_in_path(&self, id: i64, name: &str) -> Result<usize, GraphIndexError> {
        let rank = self.id_to_rank(id)? as u64;
        let path = self.path_by_name(name)?;
        let occurrences = path.occurrences(rank);
        if occurrences == 0 {
            return Err(GraphIndexError::NotFound(format!("node {} on path {}", id, name)));
        }
        if occurrences > 1 {
            tracing::warn!("path {} contains a loop through node {}", name, id);
        }
        let step = path.first_occurrence(rank).ok_or_else(|| {
            GraphIndexError::CorruptIndex(format!("node rank {} is counted but cannot be located", rank))
        })?;
        Ok(path.position_of_step(step))
    }

    /// Returns the number of times the named path visits the node with the given id.
    pub fn node_occurrences_in_path(&self, id: i64, name: &str) -> Result<usize, GraphIndexError> {
        let rank = self.id_to_rank(id)? as u64;
        Ok(self.path_by_name(name)?.occurrences(rank))
    }

    /// Returns `true` if the named path traverses the entity with the given rank.
    pub fn path_contains_entity(&self, name: &str, entity_rank: usize) -> Result<bool, GraphIndexError> {
        Ok(self.path_by_name(name)?.contains_entity(entity_rank))
    }

    /// Returns `true` if the named path visits the node with the given id.
    pub fn path_contains_node(&self, name: &str, id: i64) -> Result<bool, GraphIndexError> {
        let entity_rank = self.node_entity_rank(id)?;
        self.path_contains_entity(name, entity_rank)
    }

    /// Returns `true` if the named path traverses the edge between the given nodes.
    pub fn path_contains_edge(&self, name: &str, from: i64, to: i64) -> Result<bool, GraphIndexError> {
        let entity_rank = self.edge_entity_rank(from, to)?;
        self.path_contains_entity(name, entity_rank)
    }

    /// Returns the ranks of the paths traversing the entity with the given rank.
    pub fn paths_of_entity(&self, entity_rank: usize) -> Result<Vec<usize>, GraphIndexError> {
        if entity_rank == 0 || entity_rank > self.entity_count() {
            return Err(GraphIndexError::NotFound(format!("entity {}", entity_rank)));
        }
        let offset = self.entity_path_starts.select(entity_rank - 1).ok_or_else(|| {
            GraphIndexError::CorruptIndex(format!("no path list for entity {}", entity_rank))
        })?;
        let mut result = Vec::new();
        let mut position = offset + 1;
        while position < self.entity_path_starts.len() && !self.entity_path_starts.get(position) {
            result.push(self.entity_paths.get(position) as usize);
            position += 1;
        }
        Ok(result)
    }

    /// Returns the ranks of the paths visiting the node with the given id.
    pub fn paths_of_node(&self, id: i64) -> Result<Vec<usize>, GraphIndexError> {
        let entity_rank = self.node_entity_rank(id)?;
        self.paths_of_entity(entity_rank)
    }

    /// Returns the ranks of the paths traversing the edge between the given nodes.
    pub fn paths_of_edge(&self, from: i64, to: i64) -> Result<Vec<usize>, GraphIndexError> {
        let entity_rank = self.edge_entity_rank(from, to)?;
        self.paths_of_entity(entity_rank)
    }
}

//-----------------------------------------------------------------------------

fn corrupt(message: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        GraphIndexError::CorruptIndex(String::from(message)).to_string(),
    )
}

impl Serialize for GraphIndex {
    fn serialize_header<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        self.sequence_length.serialize(writer)?;
        self.node_count.serialize(writer)?;
        self.edge_count.serialize(writer)?;
        self.path_count.serialize(writer)?;
        (self.min_id as u64 as usize).serialize(writer)?;
        (self.max_id as u64 as usize).serialize(writer)?;
        Ok(())
    }

    fn serialize_body<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        self.node_ids.serialize(writer)?;
        self.node_to_rank.serialize(writer)?;

        self.sequence.serialize(writer)?;
        self.node_starts.serialize(writer)?;

        self.forward.serialize(writer)?;
        self.reverse.serialize(writer)?;

        let name_bytes = utils::packed_vector(u8::MAX as u64, self.names.iter().map(|byte| *byte as u64))
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))?;
        name_bytes.serialize(writer)?;
        self.name_index.serialize(writer)?;
        self.name_starts.serialize(writer)?;
        self.path_ids.serialize(writer)?;

        self.path_count.serialize(writer)?;
        for path in self.paths.iter() {
            path.serialize(writer)?;
        }

        self.entity_paths.serialize(writer)?;
        self.entity_path_starts.serialize(writer)?;
        Ok(())
    }

    fn load<T: io::Read>(reader: &mut T) -> io::Result<Self> {
        let sequence_length = usize::load(reader)?;
        let node_count = usize::load(reader)?;
        let edge_count = usize::load(reader)?;
        let path_count = usize::load(reader)?;
        let min_id = usize::load(reader)? as u64 as i64;
        let max_id = usize::load(reader)? as u64 as i64;
        if node_count == 0 || min_id > max_id {
            return Err(corrupt("empty node set"));
        }
        let entity_count = node_count + edge_count;
        let id_span = max_id
            .checked_sub(min_id)
            .and_then(|span| usize::try_from(span).ok())
            .and_then(|span| span.checked_add(1))
            .ok_or_else(|| corrupt("node id range overflow"))?;

        let node_ids = IntVector::load(reader)?;
        let node_to_rank = IntVector::load(reader)?;
        if node_ids.len() != node_count || node_to_rank.len() != id_span {
            return Err(corrupt("node id mapping size mismatch"));
        }

        let sequence = IntVector::load(reader)?;
        let node_starts = SparseVector::load(reader)?;
        if sequence.len() != sequence_length
            || node_starts.len() != sequence_length
            || node_starts.count_ones() != node_count
        {
            return Err(corrupt("sequence store size mismatch"));
        }

        let forward = AdjacencyTable::load(reader)?;
        let reverse = AdjacencyTable::load(reader)?;
        if forward.len() != entity_count || reverse.len() != entity_count
            || forward.node_count() != node_count || reverse.node_count() != node_count
        {
            return Err(corrupt("adjacency table size mismatch"));
        }

        let name_bytes = IntVector::load(reader)?;
        let names: Vec<u8> = name_bytes.iter().map(|value| value as u8).collect();
        let name_index = SuffixArray::load(reader)?;
        let mut name_starts = BitVector::load(reader)?;
        let path_ids = IntVector::load(reader)?;
        if name_starts.len() != names.len()
            || name_starts.count_ones() != path_count
            || name_index.len() != names.len()
            || path_ids.len() != path_count
        {
            return Err(corrupt("path name store size mismatch"));
        }
        name_starts.enable_rank();
        name_starts.enable_select();

        let stored_path_count = usize::load(reader)?;
        if stored_path_count != path_count {
            return Err(corrupt("inconsistent path counts"));
        }
        let mut paths: Vec<IndexedPath> = Vec::with_capacity(path_count);
        for _ in 0..path_count {
            let path = IndexedPath::load(reader)?;
            if path.member_universe() != entity_count {
                return Err(corrupt("path membership size mismatch"));
            }
            paths.push(path);
        }

        let entity_paths = IntVector::load(reader)?;
        let mut entity_path_starts = BitVector::load(reader)?;
        if entity_path_starts.len() != entity_paths.len()
            || entity_path_starts.count_ones() != entity_count
        {
            return Err(corrupt("entity-to-path map size mismatch"));
        }
        entity_path_starts.enable_rank();
        entity_path_starts.enable_select();

        Ok(GraphIndex {
            sequence_length, node_count, edge_count, path_count, min_id, max_id,
            node_ids, node_to_rank,
            sequence, node_starts,
            forward, reverse,
            names, name_index, name_starts, path_ids,
            paths,
            entity_paths, entity_path_starts,
        })
    }

    fn size_in_elements(&self) -> usize {
        let name_bytes = utils::packed_vector(u8::MAX as u64, self.names.iter().map(|byte| *byte as u64))
            .map(|packed| packed.size_in_elements())
            .unwrap_or(0);
        let mut result = 6;
        result += self.node_ids.size_in_elements() + self.node_to_rank.size_in_elements();
        result += self.sequence.size_in_elements() + self.node_starts.size_in_elements();
        result += self.forward.size_in_elements() + self.reverse.size_in_elements();
        result += name_bytes;
        result += self.name_index.size_in_elements();
        result += self.name_starts.size_in_elements() + self.path_ids.size_in_elements();
        result += 1;
        for path in self.paths.iter() {
            result += path.size_in_elements();
        }
        result += self.entity_paths.size_in_elements() + self.entity_path_starts.size_in_elements();
        result
    }
}

//-----------------------------------------------------------------------------

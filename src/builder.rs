//! Construction of a [`GraphIndex`] from streamed graph records.
//!
//! The builder accumulates node labels, edges between node sides, and path walks
//! in ordered buffers, in any order and across any number of batches.
//! [`Builder::finish`] then materializes the succinct structures in a single
//! deterministic pass: two builds from the same record set produce byte-identical
//! serializations.
//! Each buffer is released as soon as the structures derived from it are in place,
//! so that peak memory stays close to the larger of the buffers and the index.

use crate::edges::{AdjacencyTable, Link};
use crate::graph::{Edge, Graph, Mapping};
use crate::index::{GraphIndex, NAME_END_MARKER, NAME_START_MARKER};
use crate::path::IndexedPath;
use crate::suffix::SuffixArray;
use crate::{utils, GraphIndexError};

use simple_sds::bit_vector::BitVector;
use simple_sds::bits;
use simple_sds::int_vector::IntVector;
use simple_sds::ops::{Access, Rank, Select};
use simple_sds::raw_vector::{AccessRaw, RawVector};

use std::collections::{BTreeMap, BTreeSet};


//-----------------------------------------------------------------------------

// A node side: the node id and a side bit.
// For the source of an edge the bit is `from_start`; for the destination it is `to_end`.
type Side = (i64, bool);

/// Builds an immutable [`GraphIndex`] from graph record batches.
///
/// There are two entry points: [`Builder::add_graph`] consumes a single in-memory
/// batch and [`Builder::extend`] drains a stream of batches.
/// Records may arrive in any order; duplicate nodes and edges are deduplicated, and
/// the walk of a path may be split across batches.
///
/// # Examples
///
/// ```
/// use seqgraph::{Builder, Graph, Node, Edge, Path};
///
/// let mut batch = Graph::new();
/// batch.nodes.push(Node::new(11, b"GATT"));
/// batch.nodes.push(Node::new(12, b"ACA"));
/// batch.edges.push(Edge::new(11, 12));
/// batch.paths.push(Path::with_steps("gorilla", &[(11, false), (12, false)]));
///
/// let mut builder = Builder::with_validation();
/// builder.add_graph(&batch).unwrap();
/// let index = builder.finish().unwrap();
/// assert_eq!(index.path_length("gorilla").unwrap(), 7);
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    // Node labels in ascending id order; the first sequence seen for an id wins.
    node_label: BTreeMap<i64, Vec<u8>>,

    // Edges from a source side to a set of destination sides, and the transpose.
    from_to: BTreeMap<Side, BTreeSet<Side>>,
    to_from: BTreeMap<Side, BTreeSet<Side>>,

    // Path walks by name; fragments of the same path concatenate in arrival order.
    path_nodes: BTreeMap<String, Vec<Mapping>>,

    // Re-check the finished structures against the buffered records.
    validate: bool,
}

impl Builder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Builder::default()
    }

    /// Creates a new builder that re-checks the finished index against the input:
    /// node sequences are decoded and compared, every edge is looked up through both
    /// adjacency tables, and every path is replayed position by position.
    pub fn with_validation() -> Self {
        Builder { validate: true, ..Builder::default() }
    }

    /// Ingests a single batch of records.
    ///
    /// Fails if a node has an empty sequence, if a node id reappears with a
    /// conflicting sequence, or if a path name contains a reserved delimiter byte.
    pub fn add_graph(&mut self, graph: &Graph) -> Result<(), GraphIndexError> {
        for node in graph.nodes.iter() {
            if node.sequence.is_empty() {
                return Err(GraphIndexError::InvalidInput(format!("node {} has an empty sequence", node.id)));
            }
            match self.node_label.get(&node.id) {
                Some(existing) => {
                    if *existing != node.sequence {
                        return Err(GraphIndexError::InvalidInput(format!(
                            "node {} occurs with conflicting sequences", node.id
                        )));
                    }
                }
                None => {
                    if node.sequence.iter().any(|base| !utils::is_canonical_base(*base)) {
                        tracing::warn!("node {} has bases outside ATCG; storing them as N", node.id);
                    }
                    self.node_label.insert(node.id, node.sequence.clone());
                }
            }
        }

        for edge in graph.edges.iter() {
            let from: Side = (edge.from, edge.from_start);
            let to: Side = (edge.to, edge.to_end);
            if self.from_to.entry(from).or_default().insert(to) {
                self.to_from.entry(to).or_default().insert(from);
            }
        }

        for path in graph.paths.iter() {
            if path.name.bytes().any(|byte| byte == NAME_START_MARKER || byte == NAME_END_MARKER) {
                return Err(GraphIndexError::InvalidInput(format!(
                    "path name {:?} contains a reserved delimiter", path.name
                )));
            }
            self.path_nodes
                .entry(path.name.clone())
                .or_default()
                .extend(path.mappings.iter().copied());
        }

        Ok(())
    }

    /// Drains a stream of record batches.
    pub fn extend<I: IntoIterator<Item = Graph>>(&mut self, batches: I) -> Result<(), GraphIndexError> {
        for batch in batches {
            self.add_graph(&batch)?;
        }
        Ok(())
    }

    /// Materializes the index.
    ///
    /// Entity ranks, path ranks, and the serialized form are fully determined by the
    /// set of ingested records.
    pub fn finish(mut self) -> Result<GraphIndex, GraphIndexError> {
        if self.node_label.is_empty() {
            return Err(GraphIndexError::InvalidInput(String::from("cannot build an index with no nodes")));
        }

        let node_count = self.node_label.len();
        let sequence_length: usize = self.node_label.values().map(Vec::len).sum();
        let min_id = *self.node_label.keys().next().unwrap();
        let max_id = *self.node_label.keys().next_back().unwrap();
        let edge_count: usize = self.from_to.values().map(BTreeSet::len).sum();
        let entity_count = node_count + edge_count;
        let id_span = max_id
            .checked_sub(min_id)
            .and_then(|span| usize::try_from(span).ok())
            .and_then(|span| span.checked_add(1))
            .ok_or_else(|| GraphIndexError::InvalidInput(String::from("node id range is too wide")))?;

        // Every edge endpoint must be a stored node.
        for (from, to_set) in self.from_to.iter() {
            if !self.node_label.contains_key(&from.0) {
                return Err(GraphIndexError::NotFound(format!("edge endpoint {}", from.0)));
            }
            for to in to_set.iter() {
                if !self.node_label.contains_key(&to.0) {
                    return Err(GraphIndexError::NotFound(format!("edge endpoint {}", to.0)));
                }
            }
        }

        // Id-rank mappings and the sequence store, in ascending id order.
        let rank_width = bits::bit_len(node_count as u64).max(1);
        let mut node_to_rank = IntVector::with_len(id_span, rank_width, 0)
            .map_err(utils::construction_error)?;
        let mut start_positions: Vec<usize> = Vec::with_capacity(node_count);
        let mut offset = 0;
        for (index, (id, label)) in self.node_label.iter().enumerate() {
            node_to_rank.set((id - min_id) as usize, (index + 1) as u64);
            start_positions.push(offset);
            offset += label.len();
        }
        let node_ids = utils::packed_vector(
            (max_id - min_id) as u64,
            self.node_label.keys().map(|id| (id - min_id) as u64),
        )?;
        let sequence = utils::packed_vector(
            4,
            self.node_label.values().flat_map(|label| label.iter().map(|base| utils::encode_base(*base))),
        )?;
        let node_starts = utils::sparse_vector(sequence_length, &start_positions)?;

        // Adjacency in entity order, grouped by the side bit and then by the
        // ascending (adjacent id, adjacent side) order of the buffers.
        let rank_of = |id: i64| node_to_rank.get((id - min_id) as usize) as usize;
        let mut forward_links: Vec<Vec<Link>> = Vec::with_capacity(node_count);
        let mut reverse_links: Vec<Vec<Link>> = Vec::with_capacity(node_count);
        for id in self.node_label.keys() {
            let mut links: Vec<Link> = Vec::new();
            for side in [false, true] {
                if let Some(to_set) = self.from_to.get(&(*id, side)) {
                    for (to_id, to_side) in to_set.iter() {
                        links.push((rank_of(*to_id), side, *to_side));
                    }
                }
            }
            forward_links.push(links);

            let mut links: Vec<Link> = Vec::new();
            for side in [false, true] {
                if let Some(from_set) = self.to_from.get(&(*id, side)) {
                    for (from_id, from_side) in from_set.iter() {
                        links.push((rank_of(*from_id), side, *from_side));
                    }
                }
            }
            reverse_links.push(links);
        }
        let forward = AdjacencyTable::new(&forward_links)?;
        let reverse = AdjacencyTable::new(&reverse_links)?;
        drop(forward_links);
        drop(reverse_links);

        let empty = || utils::packed_vector(0, std::iter::empty());
        let mut index = GraphIndex {
            sequence_length,
            node_count,
            edge_count,
            path_count: 0,
            min_id,
            max_id,
            node_ids,
            node_to_rank,
            sequence,
            node_starts,
            forward,
            reverse,
            names: Vec::new(),
            name_index: SuffixArray::new(&[])?,
            name_starts: BitVector::from(RawVector::new()),
            path_ids: empty()?,
            paths: Vec::new(),
            entity_paths: empty()?,
            entity_path_starts: BitVector::from(RawVector::new()),
        };

        // The node and edge buffers have served their purpose once the structures
        // derived from them check out.
        if self.validate {
            validate_sequences(&index, &self.node_label)?;
            validate_edges(&index, &self.from_to)?;
        }
        self.node_label = BTreeMap::new();
        self.from_to = BTreeMap::new();
        self.to_from = BTreeMap::new();

        // Paths in ascending name order.
        let walks = std::mem::take(&mut self.path_nodes);
        let mut kept_walks: Vec<(String, Vec<Mapping>)> = Vec::new();
        let mut names: Vec<u8> = Vec::new();
        let mut name_start_positions: Vec<usize> = Vec::new();
        let mut paths: Vec<IndexedPath> = Vec::new();
        for (name, walk) in walks {
            if walk.is_empty() {
                tracing::warn!("path {:?} has no steps and will not be indexed", name);
                continue;
            }
            let path = index_walk(&index, entity_count, &walk)?;
            name_start_positions.push(names.len());
            names.push(NAME_START_MARKER);
            names.extend_from_slice(name.as_bytes());
            names.push(NAME_END_MARKER);
            paths.push(path);
            kept_walks.push((name, walk));
        }
        let path_count = paths.len();

        let mut name_start_bits = RawVector::with_len(names.len(), false);
        for position in name_start_positions.iter() {
            name_start_bits.set_bit(*position, true);
        }
        let mut name_starts = BitVector::from(name_start_bits);
        name_starts.enable_rank();
        name_starts.enable_select();

        index.path_count = path_count;
        index.name_index = SuffixArray::new(&names)?;
        index.names = names;
        index.name_starts = name_starts;
        index.path_ids = utils::packed_vector(path_count as u64, (1..=path_count).map(|rank| rank as u64))?;
        index.paths = paths;

        // The entity-to-path map: one zero sentinel per entity, followed by the
        // ranks of the paths traversing the entity.
        let mut values: Vec<u64> = Vec::with_capacity(entity_count);
        let mut sentinel_positions: Vec<usize> = Vec::with_capacity(entity_count);
        for entity in 1..=entity_count {
            sentinel_positions.push(values.len());
            values.push(0);
            for (path_index, path) in index.paths.iter().enumerate() {
                if path.contains_entity(entity) {
                    values.push((path_index + 1) as u64);
                }
            }
        }
        let mut sentinel_bits = RawVector::with_len(values.len(), false);
        for position in sentinel_positions.iter() {
            sentinel_bits.set_bit(*position, true);
        }
        index.entity_paths = utils::packed_vector(path_count as u64, values)?;
        let mut entity_path_starts = BitVector::from(sentinel_bits);
        entity_path_starts.enable_rank();
        entity_path_starts.enable_select();
        index.entity_path_starts = entity_path_starts;

        if self.validate {
            validate_paths(&index, &kept_walks)?;
        }

        Ok(index)
    }
}

//-----------------------------------------------------------------------------

// Builds the succinct structures for one walk.
fn index_walk(
    index: &GraphIndex,
    entity_count: usize,
    walk: &[Mapping],
) -> Result<IndexedPath, GraphIndexError> {
    let mut members: BTreeSet<usize> = BTreeSet::new();
    let mut node_ranks: Vec<u64> = Vec::with_capacity(walk.len());
    let mut reversed: Vec<usize> = Vec::new();
    let mut step_lengths: Vec<usize> = Vec::with_capacity(walk.len());
    for (step, mapping) in walk.iter().enumerate() {
        let rank = index.id_to_rank(mapping.node_id)?;
        node_ranks.push(rank as u64);
        if mapping.is_reverse {
            reversed.push(step);
        }
        step_lengths.push(index.node_length(rank)?);
        members.insert(index.node_entity_rank(mapping.node_id)? - 1);
        // A pair of consecutive steps traverses an edge if the graph has one.
        if step + 1 < walk.len() {
            let next_id = walk[step + 1].node_id;
            if index.has_edge(mapping.node_id, next_id)? {
                members.insert(index.edge_entity_rank(mapping.node_id, next_id)? - 1);
            }
        }
    }
    let member_positions: Vec<usize> = members.into_iter().collect();
    IndexedPath::new(entity_count, &member_positions, &node_ranks, &reversed, &step_lengths)
}

//-----------------------------------------------------------------------------

// Self-validation: re-check the finished structures against the buffered records.

fn validation_error(message: String) -> GraphIndexError {
    GraphIndexError::CorruptIndex(format!("self-validation: {}", message))
}

fn validate_sequences(
    index: &GraphIndex,
    node_label: &BTreeMap<i64, Vec<u8>>,
) -> Result<(), GraphIndexError> {
    for (id, label) in node_label.iter() {
        let rank = index.id_to_rank(*id)?;
        let start = index.node_starts.select(rank - 1).ok_or_else(|| {
            validation_error(format!("node {} has no sequence start", id))
        })?;
        if index.node_starts.rank(start + 1) != rank {
            return Err(validation_error(format!("inconsistent sequence start for node {}", id)));
        }
        let sequence = index.node_sequence(*id)?;
        if sequence.len() != label.len() {
            return Err(validation_error(format!("wrong sequence length for node {}", id)));
        }
        for (stored, original) in sequence.iter().zip(label.iter()) {
            if *stored != utils::decode_base(utils::encode_base(*original)) {
                return Err(validation_error(format!("wrong sequence for node {}", id)));
            }
        }
    }
    Ok(())
}

fn validate_edges(
    index: &GraphIndex,
    from_to: &BTreeMap<Side, BTreeSet<Side>>,
) -> Result<(), GraphIndexError> {
    for (from, to_set) in from_to.iter() {
        for to in to_set.iter() {
            let edge = Edge::with_orientation(from.0, from.1, to.0, to.1);
            if !index.has_edge(edge.from, edge.to)? {
                return Err(validation_error(format!("missing edge from {} to {}", edge.from, edge.to)));
            }
            let outgoing = index.edges_from(edge.from)?;
            if outgoing.iter().filter(|found| **found == edge).count() != 1 {
                return Err(validation_error(format!(
                    "edge from {} to {} is not listed once in the forward table", edge.from, edge.to
                )));
            }
            let incoming = index.edges_to(edge.to)?;
            if incoming.iter().filter(|found| **found == edge).count() != 1 {
                return Err(validation_error(format!(
                    "edge from {} to {} is not listed once in the reverse table", edge.from, edge.to
                )));
            }
        }
    }
    Ok(())
}

fn validate_paths(
    index: &GraphIndex,
    walks: &[(String, Vec<Mapping>)],
) -> Result<(), GraphIndexError> {
    for (name, walk) in walks.iter() {
        let rank = index.path_rank(name)?;
        if index.path_name(rank)? != *name {
            return Err(validation_error(format!("path name {:?} does not round-trip", name)));
        }
        let path = index.indexed_path(rank)?;
        if path.step_count() != walk.len() {
            return Err(validation_error(format!("wrong step count for path {:?}", name)));
        }
        let mut position = 0;
        for (step, mapping) in walk.iter().enumerate() {
            let node_rank = index.id_to_rank(mapping.node_id)?;
            if path.node_rank_at_step(step) != node_rank as u64 {
                return Err(validation_error(format!("wrong node at step {} of path {:?}", step, name)));
            }
            if path.is_reverse_at_step(step) != mapping.is_reverse {
                return Err(validation_error(format!("wrong direction at step {} of path {:?}", step, name)));
            }
            if path.position_of_step(step) != position {
                return Err(validation_error(format!("wrong position at step {} of path {:?}", step, name)));
            }
            if !path.contains_entity(index.node_entity_rank(mapping.node_id)?) {
                return Err(validation_error(format!("missing membership at step {} of path {:?}", step, name)));
            }
            let length = index.node_length(node_rank)?;
            for base in 0..length {
                if index.node_at_path_position(name, position + base)? != mapping.node_id {
                    return Err(validation_error(format!(
                        "position {} of path {:?} does not map back to node {}",
                        position + base, name, mapping.node_id
                    )));
                }
            }
            position += length;
        }
        if path.length() != position {
            return Err(validation_error(format!("wrong length for path {:?}", name)));
        }
    }
    Ok(())
}

//-----------------------------------------------------------------------------

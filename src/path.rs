//! Succinct representation of a single path.
//!
//! A path is an ordered walk over nodes with a direction bit per step.
//! Each path stores the entities it traverses, the node ranks of its steps indexed
//! for rank/select queries, per-step directions, and the mapping between steps and
//! base positions in the concatenated path sequence.

use crate::wavelet::WaveletMatrix;
use crate::{utils, GraphIndexError};

use simple_sds::bit_vector::BitVector;
use simple_sds::int_vector::IntVector;
use simple_sds::ops::{Access, BitVec, Rank, Select, Vector};
use simple_sds::raw_vector::{AccessRaw, RawVector};
use simple_sds::serialize::Serialize;
use simple_sds::sparse_vector::SparseVector;

use std::io;

//-----------------------------------------------------------------------------

/// The succinct structures of one path.
///
/// Base positions run from 0 to `length() - 1` over the concatenation of the
/// sequences of the visited nodes.
/// `step_at_position` inverts the step-to-position mapping with a single rank query,
/// and the node ranks are indexed by value, so repeated visits to the same node can
/// be counted and located without scanning the path.
#[derive(Debug)]
pub struct IndexedPath {
    // Entities traversed by the path, by entity rank.
    members: SparseVector,

    // Node ranks of the steps, indexed for rank/select by value.
    ids: WaveletMatrix,

    // Direction of each step; set means reverse.
    directions: SparseVector,

    // Cumulative bases before each step.
    positions: IntVector,

    // Marks the first base of each step; rank/select enabled.
    offsets: BitVector,
}

impl IndexedPath {
    /// Builds the structures for one path.
    ///
    /// # Arguments
    ///
    /// * `entity_count`: Total number of entities in the graph.
    /// * `members`: 0-based entity ranks traversed by the path, distinct and ascending.
    /// * `node_ranks`: Node rank of each step.
    /// * `reversed`: Ascending indexes of the steps that traverse their node in reverse.
    /// * `step_lengths`: Sequence length of the node at each step.
    pub(crate) fn new(
        entity_count: usize,
        members: &[usize],
        node_ranks: &[u64],
        reversed: &[usize],
        step_lengths: &[usize],
    ) -> Result<Self, GraphIndexError> {
        let members = utils::sparse_vector(entity_count, members)?;
        let ids = WaveletMatrix::new(node_ranks);
        let directions = utils::sparse_vector(node_ranks.len(), reversed)?;

        let length: usize = step_lengths.iter().sum();
        let mut start_bits = RawVector::with_len(length, false);
        let mut starts: Vec<u64> = Vec::with_capacity(step_lengths.len());
        let mut offset = 0;
        for step_length in step_lengths.iter() {
            start_bits.set_bit(offset, true);
            starts.push(offset as u64);
            offset += step_length;
        }
        let positions = utils::packed_vector(length as u64, starts)?;
        let mut offsets = BitVector::from(start_bits);
        offsets.enable_rank();
        offsets.enable_select();

        Ok(IndexedPath { members, ids, directions, positions, offsets })
    }

    /// Returns the total sequence length of the path in bases.
    #[inline]
    pub fn length(&self) -> usize {
        self.offsets.len()
    }

    /// Returns the number of steps on the path.
    #[inline]
    pub fn step_count(&self) -> usize {
        self.ids.len()
    }

    /// Returns the number of distinct entities the path traverses.
    #[inline]
    pub fn member_count(&self) -> usize {
        self.members.count_ones()
    }

    // Length of the membership vector: the number of entities in the graph.
    #[inline]
    pub(crate) fn member_universe(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the path traverses the entity with the given rank.
    pub fn contains_entity(&self, entity_rank: usize) -> bool {
        entity_rank >= 1 && entity_rank <= self.members.len() && self.members.get(entity_rank - 1)
    }

    /// Returns the step covering the given base position.
    pub fn step_at_position(&self, position: usize) -> Result<usize, GraphIndexError> {
        if position >= self.length() {
            return Err(GraphIndexError::OutOfRange(format!(
                "position {} on a path of length {}", position, self.length()
            )));
        }
        Ok(self.offsets.rank(position + 1) - 1)
    }

    /// Returns the node rank visited by the given step.
    ///
    /// # Panics
    ///
    /// May panic if `step >= step_count()`.
    #[inline]
    pub fn node_rank_at_step(&self, step: usize) -> u64 {
        self.ids.get(step)
    }

    /// Returns `true` if the given step traverses its node in reverse.
    #[inline]
    pub fn is_reverse_at_step(&self, step: usize) -> bool {
        self.directions.get(step)
    }

    /// Returns the number of bases before the given step.
    #[inline]
    pub fn position_of_step(&self, step: usize) -> usize {
        self.positions.get(step) as usize
    }

    /// Returns the number of steps that visit the node with the given rank.
    pub fn occurrences(&self, node_rank: u64) -> usize {
        self.ids.rank(self.ids.len(), node_rank)
    }

    /// Returns the first step that visits the node with the given rank.
    pub fn first_occurrence(&self, node_rank: u64) -> Option<usize> {
        self.ids.select(0, node_rank)
    }
}

//-----------------------------------------------------------------------------

impl Serialize for IndexedPath {
    fn serialize_header<T: io::Write>(&self, _: &mut T) -> io::Result<()> {
        Ok(())
    }

    fn serialize_body<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        self.members.serialize(writer)?;
        self.ids.serialize(writer)?;
        self.directions.serialize(writer)?;
        self.positions.serialize(writer)?;
        self.offsets.serialize(writer)?;
        Ok(())
    }

    fn load<T: io::Read>(reader: &mut T) -> io::Result<Self> {
        let members = SparseVector::load(reader)?;
        let ids = WaveletMatrix::load(reader)?;
        let directions = SparseVector::load(reader)?;
        let positions = IntVector::load(reader)?;
        let mut offsets = BitVector::load(reader)?;
        if directions.len() != ids.len() || positions.len() != ids.len() || offsets.count_ones() != ids.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                GraphIndexError::CorruptIndex(String::from("path structure size mismatch")).to_string(),
            ));
        }
        offsets.enable_rank();
        offsets.enable_select();
        Ok(IndexedPath { members, ids, directions, positions, offsets })
    }

    fn size_in_elements(&self) -> usize {
        self.members.size_in_elements()
            + self.ids.size_in_elements()
            + self.directions.size_in_elements()
            + self.positions.size_in_elements()
            + self.offsets.size_in_elements()
    }
}

//-----------------------------------------------------------------------------


//-----------------------------------------------------------------------------

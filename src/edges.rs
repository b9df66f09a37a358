//! Entity-ordered adjacency tables.
//!
//! The same layout serves both edge directions.
//! For each node in ascending rank order, the table stores one header entry with the
//! rank of the node itself, followed by one link entry per incident edge with the rank
//! of the adjacent node.
//! A plain bit vector marks the headers, so rank/select give constant-time access to
//! the entry range of any node.
//! Orientation bits are stored in two sparse bit vectors over the entry positions:
//! one for the side of this table's own endpoint, one for the side of the opposite
//! endpoint.
//! Headers contribute a zero to both.
//!
//! The unified entity numbering is derived from the forward table: the entity rank of
//! the entry at position `i` is `i + 1`, headers standing for nodes and links for edges.

use crate::{utils, GraphIndexError};

use simple_sds::bit_vector::BitVector;
use simple_sds::int_vector::IntVector;
use simple_sds::ops::{Access, BitVec, Rank, Select, Vector};
use simple_sds::raw_vector::{AccessRaw, RawVector};
use simple_sds::serialize::Serialize;
use simple_sds::sparse_vector::SparseVector;

use std::io;
use std::ops::Range;

//-----------------------------------------------------------------------------

// A link to an adjacent node: (rank of the adjacent node, own side bit, other side bit).
pub(crate) type Link = (usize, bool, bool);

/// One direction of the edge set in entity order.
#[derive(Debug)]
pub(crate) struct AdjacencyTable {
    // Node rank at headers, adjacent node rank at links.
    entries: IntVector,

    // Marks the header entries; rank/select enabled.
    headers: BitVector,

    // Orientation of this table's endpoint at each link.
    own_side: SparseVector,

    // Orientation of the opposite endpoint at each link.
    other_side: SparseVector,
}

impl AdjacencyTable {
    /// Builds a table from per-node link lists.
    ///
    /// `links[r - 1]` holds the links of the node with rank `r`, already in the
    /// deterministic order: links with an unset own side bit first, then links with
    /// it set, each group in ascending (adjacent rank, other side) order.
    pub(crate) fn new(links: &[Vec<Link>]) -> Result<Self, GraphIndexError> {
        let node_count = links.len();
        let entity_count = node_count + links.iter().map(Vec::len).sum::<usize>();

        let mut values: Vec<u64> = Vec::with_capacity(entity_count);
        let mut header_bits = RawVector::with_len(entity_count, false);
        let mut own_positions: Vec<usize> = Vec::new();
        let mut other_positions: Vec<usize> = Vec::new();
        for (index, node_links) in links.iter().enumerate() {
            header_bits.set_bit(values.len(), true);
            values.push((index + 1) as u64);
            for (rank, own, other) in node_links.iter() {
                if *own {
                    own_positions.push(values.len());
                }
                if *other {
                    other_positions.push(values.len());
                }
                values.push(*rank as u64);
            }
        }

        let entries = utils::packed_vector(node_count as u64, values)?;
        let mut headers = BitVector::from(header_bits);
        headers.enable_rank();
        headers.enable_select();
        let own_side = utils::sparse_vector(entity_count, &own_positions)?;
        let other_side = utils::sparse_vector(entity_count, &other_positions)?;

        Ok(AdjacencyTable { entries, headers, own_side, other_side })
    }

    /// Returns the total number of entries.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.headers.len()
    }

    /// Returns the number of nodes in the table.
    #[inline]
    pub(crate) fn node_count(&self) -> usize {
        self.headers.count_ones()
    }

    /// Returns `true` if the entry at the given position is a header.
    #[inline]
    pub(crate) fn is_header(&self, position: usize) -> bool {
        self.headers.get(position)
    }

    /// Returns the stored rank at the given position.
    #[inline]
    pub(crate) fn entry(&self, position: usize) -> usize {
        self.entries.get(position) as usize
    }

    /// Returns the position of the header entry for the node with the given rank.
    pub(crate) fn header_position(&self, rank: usize) -> Option<usize> {
        if rank == 0 || rank > self.node_count() {
            return None;
        }
        self.headers.select(rank - 1)
    }

    /// Returns the range of link entry positions for the node with the given rank.
    pub(crate) fn link_range(&self, rank: usize) -> Option<Range<usize>> {
        let start = self.header_position(rank)? + 1;
        let end = if rank == self.node_count() {
            self.len()
        } else {
            self.headers.select(rank)?
        };
        Some(start..end)
    }

    /// Returns the link stored at the given position.
    #[inline]
    pub(crate) fn link(&self, position: usize) -> Link {
        (self.entry(position), self.own_side.get(position), self.other_side.get(position))
    }
}

//-----------------------------------------------------------------------------

impl Serialize for AdjacencyTable {
    fn serialize_header<T: io::Write>(&self, _: &mut T) -> io::Result<()> {
        Ok(())
    }

    fn serialize_body<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        self.entries.serialize(writer)?;
        self.headers.serialize(writer)?;
        self.own_side.serialize(writer)?;
        self.other_side.serialize(writer)?;
        Ok(())
    }

    fn load<T: io::Read>(reader: &mut T) -> io::Result<Self> {
        let entries = IntVector::load(reader)?;
        let mut headers = BitVector::load(reader)?;
        let own_side = SparseVector::load(reader)?;
        let other_side = SparseVector::load(reader)?;
        if headers.len() != entries.len() || own_side.len() != entries.len() || other_side.len() != entries.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                GraphIndexError::CorruptIndex(String::from("adjacency table size mismatch")).to_string(),
            ));
        }
        headers.enable_rank();
        headers.enable_select();
        Ok(AdjacencyTable { entries, headers, own_side, other_side })
    }

    fn size_in_elements(&self) -> usize {
        self.entries.size_in_elements()
            + self.headers.size_in_elements()
            + self.own_side.size_in_elements()
            + self.other_side.size_in_elements()
    }
}

//-----------------------------------------------------------------------------

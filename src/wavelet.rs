//! An immutable wavelet matrix over unsigned integer sequences.
//!
//! The structure stores a sequence of `len` integers of `width` bits each and answers
//! `get`, `rank`, and `select` queries for any value in O(`width`) rank/select calls
//! on plain bit vectors.
//! It is used for indexing the node ranks visited by a path, where the same rank may
//! occur many times.

use crate::GraphIndexError;

use simple_sds::bit_vector::BitVector;
use simple_sds::bits;
use simple_sds::ops::{BitVec, Rank, Select, SelectZero};
use simple_sds::raw_vector::{AccessRaw, RawVector};
use simple_sds::serialize::Serialize;

use std::io;


//-----------------------------------------------------------------------------

/// An immutable sequence of integers supporting rank/select queries by value.
///
/// Level `i` of the matrix stores bit `width - 1 - i` of each value, with the values
/// reordered by a stable partition on the bits of the previous levels.
/// `zeros[i]` records how many values had a zero bit at level `i`.
///
/// # Examples
///
/// ```
/// use seqgraph::wavelet::WaveletMatrix;
///
/// let matrix = WaveletMatrix::new(&[1, 5, 2, 1, 5]);
/// assert_eq!(matrix.len(), 5);
/// assert_eq!(matrix.get(2), 2);
/// assert_eq!(matrix.rank(5, 5), 2);
/// assert_eq!(matrix.rank(3, 1), 1);
/// assert_eq!(matrix.select(1, 5), Some(4));
/// assert_eq!(matrix.select(2, 5), None);
/// ```
#[derive(Debug, Default)]
pub struct WaveletMatrix {
    len: usize,
    width: usize,
    // Number of zero bits at each level.
    zeros: Vec<usize>,
    levels: Vec<BitVector>,
}

impl WaveletMatrix {
    /// Builds a wavelet matrix over the given values.
    ///
    /// The width is the smallest sufficient for the largest value.
    pub fn new(values: &[u64]) -> Self {
        let max_value = values.iter().copied().max().unwrap_or(0);
        let width = bits::bit_len(max_value).max(1);

        let mut zeros: Vec<usize> = Vec::with_capacity(width);
        let mut levels: Vec<BitVector> = Vec::with_capacity(width);
        let mut current: Vec<u64> = values.to_vec();
        for level in 0..width {
            let shift = width - 1 - level;
            let mut raw = RawVector::with_len(current.len(), false);
            let mut with_zero: Vec<u64> = Vec::new();
            let mut with_one: Vec<u64> = Vec::new();
            for (index, value) in current.iter().enumerate() {
                if (value >> shift) & 1 == 1 {
                    raw.set_bit(index, true);
                    with_one.push(*value);
                } else {
                    with_zero.push(*value);
                }
            }
            let mut level_bits = BitVector::from(raw);
            level_bits.enable_rank();
            level_bits.enable_select();
            level_bits.enable_select_zero();
            zeros.push(with_zero.len());
            levels.push(level_bits);
            current = with_zero;
            current.extend(with_one);
        }

        WaveletMatrix { len: values.len(), width, zeros, levels }
    }

    /// Returns the length of the sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the width of the stored values in bits.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    // Returns `true` if the value does not fit in `width` bits.
    #[inline]
    fn too_wide(&self, value: u64) -> bool {
        self.width < bits::WORD_BITS && (value >> self.width) != 0
    }

    /// Returns the value at the given index.
    ///
    /// # Panics
    ///
    /// May panic if `index` is not a valid index in the sequence.
    pub fn get(&self, index: usize) -> u64 {
        let mut index = index;
        let mut value = 0;
        for level in 0..self.width {
            if self.levels[level].get(index) {
                value |= 1 << (self.width - 1 - level);
                index = self.zeros[level] + self.levels[level].rank(index);
            } else {
                index -= self.levels[level].rank(index);
            }
        }
        value
    }

    /// Returns the number of occurrences of `value` in the prefix `0..index`.
    ///
    /// If `index > len()`, the whole sequence is considered.
    pub fn rank(&self, index: usize, value: u64) -> usize {
        if self.too_wide(value) {
            return 0;
        }
        let mut start = 0;
        let mut end = index.min(self.len);
        for level in 0..self.width {
            let level_bits = &self.levels[level];
            if (value >> (self.width - 1 - level)) & 1 == 1 {
                start = self.zeros[level] + level_bits.rank(start);
                end = self.zeros[level] + level_bits.rank(end);
            } else {
                start -= level_bits.rank(start);
                end -= level_bits.rank(end);
            }
        }
        end - start
    }

    /// Returns the position of the occurrence of `value` with the given 0-based rank,
    /// or [`None`] if there is no such occurrence.
    pub fn select(&self, rank: usize, value: u64) -> Option<usize> {
        if self.too_wide(value) || rank >= self.rank(self.len, value) {
            return None;
        }

        // Map the start of the value's bucket down to the last level.
        let mut start = 0;
        for level in 0..self.width {
            let level_bits = &self.levels[level];
            if (value >> (self.width - 1 - level)) & 1 == 1 {
                start = self.zeros[level] + level_bits.rank(start);
            } else {
                start -= level_bits.rank(start);
            }
        }

        // And walk the chosen occurrence back up.
        let mut position = start + rank;
        for level in (0..self.width).rev() {
            let level_bits = &self.levels[level];
            if (value >> (self.width - 1 - level)) & 1 == 1 {
                position = level_bits.select(position - self.zeros[level])?;
            } else {
                position = level_bits.select_zero(position)?;
            }
        }
        Some(position)
    }
}

//-----------------------------------------------------------------------------

impl Serialize for WaveletMatrix {
    fn serialize_header<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        self.len.serialize(writer)?;
        self.width.serialize(writer)?;
        Ok(())
    }

    fn serialize_body<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        for level in 0..self.width {
            self.zeros[level].serialize(writer)?;
            self.levels[level].serialize(writer)?;
        }
        Ok(())
    }

    fn load<T: io::Read>(reader: &mut T) -> io::Result<Self> {
        let len = usize::load(reader)?;
        let width = usize::load(reader)?;
        if width == 0 || width > bits::WORD_BITS {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                GraphIndexError::CorruptIndex(format!("invalid wavelet matrix width {}", width)).to_string(),
            ));
        }
        let mut zeros: Vec<usize> = Vec::with_capacity(width);
        let mut levels: Vec<BitVector> = Vec::with_capacity(width);
        for level in 0..width {
            let level_zeros = usize::load(reader)?;
            let mut level_bits = BitVector::load(reader)?;
            if level_bits.len() != len || level_zeros > len {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    GraphIndexError::CorruptIndex(format!("invalid wavelet matrix level {}", level)).to_string(),
                ));
            }
            level_bits.enable_rank();
            level_bits.enable_select();
            level_bits.enable_select_zero();
            zeros.push(level_zeros);
            levels.push(level_bits);
        }
        Ok(WaveletMatrix { len, width, zeros, levels })
    }

    fn size_in_elements(&self) -> usize {
        let mut result = self.len.size_in_elements() + self.width.size_in_elements();
        for level in 0..self.width {
            result += self.zeros[level].size_in_elements() + self.levels[level].size_in_elements();
        }
        result
    }
}

//-----------------------------------------------------------------------------

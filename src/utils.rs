//! Utility functions: DNA coding and construction helpers.

use crate::GraphIndexError;

use simple_sds::bits;
use simple_sds::int_vector::IntVector;
use simple_sds::ops::Push;
use simple_sds::sparse_vector::{SparseBuilder, SparseVector};

//-----------------------------------------------------------------------------

// Sequence encoding and decoding.
//
// Bases are stored in three bits each: A = 0, T = 1, C = 2, G = 3.
// Everything else encodes as 4 and decodes as N.

const DECODE: [u8; 5] = [b'A', b'T', b'C', b'G', b'N'];

const fn generate_encoding() -> [u8; 256] {
    let mut result = [4u8; 256];
    result[b'A' as usize] = 0;
    result[b'T' as usize] = 1;
    result[b'C' as usize] = 2;
    result[b'G' as usize] = 3;
    result
}

const ENCODE: [u8; 256] = generate_encoding();

/// Returns the 3-bit code for the given base.
#[inline]
pub fn encode_base(base: u8) -> u64 {
    ENCODE[base as usize] as u64
}

/// Returns the base for the given 3-bit code.
#[inline]
pub fn decode_base(code: u64) -> u8 {
    if code < 4 { DECODE[code as usize] } else { b'N' }
}

/// Returns `true` if the byte is one of `ATCG`.
#[inline]
pub fn is_canonical_base(base: u8) -> bool {
    ENCODE[base as usize] != 4
}

//-----------------------------------------------------------------------------

// Construction helpers for succinct vectors.

pub(crate) fn construction_error<E: std::fmt::Display>(err: E) -> GraphIndexError {
    GraphIndexError::InvalidInput(err.to_string())
}

// Builds an integer vector at the smallest width sufficient for `max_value`.
pub(crate) fn packed_vector<I>(max_value: u64, values: I) -> Result<IntVector, GraphIndexError>
where
    I: IntoIterator<Item = u64>,
{
    let width = bits::bit_len(max_value).max(1);
    let mut result = IntVector::new(width).map_err(construction_error)?;
    for value in values {
        result.push(value);
    }
    Ok(result)
}

// Builds a sparse bit vector of length `universe` with ones at the given
// positions, which must be distinct and in increasing order.
pub(crate) fn sparse_vector(universe: usize, ones: &[usize]) -> Result<SparseVector, GraphIndexError> {
    let mut builder = SparseBuilder::new(universe, ones.len()).map_err(construction_error)?;
    for position in ones {
        builder.set(*position);
    }
    SparseVector::try_from(builder).map_err(construction_error)
}

//-----------------------------------------------------------------------------


//-----------------------------------------------------------------------------

//! A suffix array over a small byte text.
//!
//! The array answers `locate` queries: the starting offsets of a pattern in the text.
//! It is intended for small texts such as concatenated path names, so construction
//! simply sorts the suffixes and queries binary search over them.
//! The text itself is not stored; the owner passes it to [`SuffixArray::locate`].

use crate::{utils, GraphIndexError};

use simple_sds::int_vector::IntVector;
use simple_sds::ops::{Access, Vector};
use simple_sds::serialize::Serialize;

use std::io;

//-----------------------------------------------------------------------------

/// A sorted array of the suffixes of a byte text.
///
/// # Examples
///
/// ```
/// use seqgraph::suffix::SuffixArray;
///
/// let text = b"#x$#yx$";
/// let array = SuffixArray::new(text).unwrap();
/// assert_eq!(array.locate(text, b"#x$"), vec![0]);
/// let mut hits = array.locate(text, b"x");
/// hits.sort_unstable();
/// assert_eq!(hits, vec![1, 5]);
/// assert!(array.locate(text, b"z").is_empty());
/// ```
#[derive(Debug)]
pub struct SuffixArray {
    samples: IntVector,
}

impl SuffixArray {
    /// Builds the suffix array for the given text.
    pub fn new(text: &[u8]) -> Result<Self, GraphIndexError> {
        let mut suffixes: Vec<usize> = (0..text.len()).collect();
        suffixes.sort_unstable_by(|a, b| text[*a..].cmp(&text[*b..]));
        let samples = utils::packed_vector(text.len() as u64, suffixes.iter().map(|x| *x as u64))?;
        Ok(SuffixArray { samples })
    }

    /// Returns the length of the indexed text.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if the indexed text is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the starting offsets of the pattern in the text, in lexicographic
    /// order of the matching suffixes.
    ///
    /// `text` must be the text the array was built for.
    /// An empty pattern matches nothing.
    pub fn locate(&self, text: &[u8], pattern: &[u8]) -> Vec<usize> {
        if pattern.is_empty() || self.len() != text.len() {
            return Vec::new();
        }

        // The suffixes starting with the pattern form a contiguous range; find its start.
        let mut low = 0;
        let mut high = self.len();
        while low < high {
            let mid = low + (high - low) / 2;
            let start = self.samples.get(mid) as usize;
            if text[start..] < *pattern {
                low = mid + 1;
            } else {
                high = mid;
            }
        }

        let mut result = Vec::new();
        let mut index = low;
        while index < self.len() {
            let start = self.samples.get(index) as usize;
            if !text[start..].starts_with(pattern) {
                break;
            }
            result.push(start);
            index += 1;
        }
        result
    }
}

//-----------------------------------------------------------------------------

impl Serialize for SuffixArray {
    fn serialize_header<T: io::Write>(&self, _: &mut T) -> io::Result<()> {
        Ok(())
    }

    fn serialize_body<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        self.samples.serialize(writer)
    }

    fn load<T: io::Read>(reader: &mut T) -> io::Result<Self> {
        let samples = IntVector::load(reader)?;
        Ok(SuffixArray { samples })
    }

    fn size_in_elements(&self) -> usize {
        self.samples.size_in_elements()
    }
}

//-----------------------------------------------------------------------------


//-----------------------------------------------------------------------------

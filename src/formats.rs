//! Support for text formats.
//!
//! ### Graph dumps (writing)
//!
//! [`write_text`] writes a batch of graph records in a line-oriented text format:
//!
//! * `H`: a header line with the format version.
//! * `S\t<id>\t<sequence>`: one line per node.
//! * `L\t<from>\t<+/->\t<to>\t<+/->`: one line per edge; `-` marks an edge attached
//!   to the start of the source or the end of the destination.
//! * `P\t<node_id>\t<path>\t<+/->`: one line per path step.
//!
//! ### Regions (reading)
//!
//! [`parse_region`] parses the region strings used for path queries:
//! `name` for a whole path, `name:pos` for a single position, and
//! `name:start-end` for a closed interval.

use crate::graph::Graph;
use crate::GraphIndexError;

use std::io::{self, Write};


//-----------------------------------------------------------------------------

/// Writes the records of the graph as text.
pub fn write_text<T: Write>(graph: &Graph, output: &mut T) -> io::Result<()> {
    output.write_all(b"H\tHVN:Z:1.0\n")?;

    for node in graph.nodes.iter() {
        let mut buffer: Vec<u8> = Vec::new();
        buffer.extend_from_slice(b"S\t");
        buffer.extend_from_slice(node.id.to_string().as_bytes());
        buffer.push(b'\t');
        buffer.extend_from_slice(&node.sequence);
        buffer.push(b'\n');
        output.write_all(&buffer)?;
    }

    for edge in graph.edges.iter() {
        let mut buffer: Vec<u8> = Vec::new();
        buffer.extend_from_slice(b"L\t");
        buffer.extend_from_slice(edge.from.to_string().as_bytes());
        buffer.extend_from_slice(if edge.from_start { b"\t-\t" } else { b"\t+\t" });
        buffer.extend_from_slice(edge.to.to_string().as_bytes());
        buffer.extend_from_slice(if edge.to_end { b"\t-" } else { b"\t+" });
        buffer.push(b'\n');
        output.write_all(&buffer)?;
    }

    for path in graph.paths.iter() {
        for mapping in path.mappings.iter() {
            let mut buffer: Vec<u8> = Vec::new();
            buffer.extend_from_slice(b"P\t");
            buffer.extend_from_slice(mapping.node_id.to_string().as_bytes());
            buffer.push(b'\t');
            buffer.extend_from_slice(path.name.as_bytes());
            buffer.extend_from_slice(if mapping.is_reverse { b"\t-" } else { b"\t+" });
            buffer.push(b'\n');
            output.write_all(&buffer)?;
        }
    }

    Ok(())
}

//-----------------------------------------------------------------------------

fn parse_bound(field: &str, target: &str) -> Result<i64, GraphIndexError> {
    field.parse().map_err(|_| {
        GraphIndexError::InvalidInput(format!("invalid region {:?}", target))
    })
}

/// Parses a region string.
///
/// Returns the path name and an optional closed position interval:
/// `name` selects the whole path, `name:pos` the single position `pos`, and
/// `name:start-end` the interval from `start` to `end`.
/// Positions are non-negative integers.
///
/// # Examples
///
/// ```
/// use seqgraph::formats::parse_region;
///
/// assert_eq!(parse_region("chr1").unwrap(), (String::from("chr1"), None));
/// assert_eq!(parse_region("chr1:42").unwrap(), (String::from("chr1"), Some((42, 42))));
/// assert_eq!(parse_region("chr1:100-200").unwrap(), (String::from("chr1"), Some((100, 200))));
/// assert!(parse_region("chr1:1-x").is_err());
/// ```
pub fn parse_region(target: &str) -> Result<(String, Option<(i64, i64)>), GraphIndexError> {
    match target.split_once(':') {
        None => Ok((String::from(target), None)),
        Some((name, range)) => {
            let interval = match range.split_once('-') {
                None => {
                    let position = parse_bound(range, target)?;
                    (position, position)
                }
                Some((start, end)) => {
                    (parse_bound(start, target)?, parse_bound(end, target)?)
                }
            };
            Ok((String::from(name), Some(interval)))
        }
    }
}

//-----------------------------------------------------------------------------

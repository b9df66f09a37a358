//! Extraction of graph regions into record batches.
//!
//! These queries populate a caller-supplied [`Graph`] in place: a local neighborhood
//! around a node, the region covered by an interval of a path, or a range of node ids.
//! The records they produce use the same schema the index is built from, so an
//! extracted region can be fed back into a [`crate::Builder`].

use crate::graph::{Edge, Graph, Mapping};
use crate::index::GraphIndex;
use crate::GraphIndexError;

use std::collections::{BTreeMap, BTreeSet};

#[cfg(test)]
mod tests;

//-----------------------------------------------------------------------------

impl GraphIndex {
    /// Returns a mapping of the node onto each path visiting it, keyed by path name.
    ///
    /// Each visiting path contributes a single mapping regardless of how many times
    /// it passes through the node, and the mapping direction is left unset.
    pub fn node_mappings(&self, id: i64) -> Result<BTreeMap<String, Mapping>, GraphIndexError> {
        let mut result: BTreeMap<String, Mapping> = BTreeMap::new();
        for path_rank in self.paths_of_node(id)? {
            let name = self.path_name(path_rank)?;
            result.insert(name, Mapping::new(id, false));
        }
        Ok(result)
    }

    /// Extracts the neighborhood within the given number of hops around a node.
    ///
    /// Seeds the graph with the node and calls [`GraphIndex::expand_context`].
    pub fn neighborhood(&self, id: i64, steps: usize, graph: &mut Graph) -> Result<(), GraphIndexError> {
        graph.nodes.push(self.node(id)?);
        self.expand_context(graph, steps)
    }

    /// Expands the graph by the given number of hops.
    ///
    /// Every node already in the graph, and every endpoint of an edge already in the
    /// graph, is a starting point.
    /// Each hop adds the incident edges of the frontier nodes and queues the nodes at
    /// their other ends.
    /// After the last hop, the endpoints of boundary edges are added so that no edge
    /// is orphaned, along with any edges joining those endpoints, and the mappings of
    /// every node are attached as paths.
    pub fn expand_context(&self, graph: &mut Graph, steps: usize) -> Result<(), GraphIndexError> {
        let mut nodes: BTreeSet<i64> = graph.nodes.iter().map(|node| node.id).collect();
        let mut edges: BTreeSet<Edge> = graph.edges.iter().copied().collect();
        let mut to_visit: BTreeSet<i64> = nodes.clone();
        for edge in graph.edges.iter() {
            to_visit.insert(edge.from);
            to_visit.insert(edge.to);
        }

        for _ in 0..steps {
            let mut next: BTreeSet<i64> = BTreeSet::new();
            for id in to_visit.iter() {
                if nodes.insert(*id) {
                    graph.nodes.push(self.node(*id)?);
                }
                for edge in self.edges_of(*id)? {
                    if edges.insert(edge) {
                        graph.edges.push(edge);
                    }
                    next.insert(if edge.from == *id { edge.to } else { edge.from });
                }
            }
            to_visit = next;
        }

        // Pull in the missing endpoints of boundary edges.
        let mut pulled_in: BTreeSet<i64> = BTreeSet::new();
        for edge in edges.iter() {
            for id in [edge.from, edge.to] {
                if nodes.insert(id) {
                    graph.nodes.push(self.node(id)?);
                    pulled_in.insert(id);
                }
            }
        }

        // And the edges joining the pulled-in nodes; their other edges would be
        // orphaned or are already present.
        let mut connecting: Vec<Edge> = Vec::new();
        for id in pulled_in.iter() {
            for edge in self.edges_of(*id)? {
                if pulled_in.contains(&edge.from) && pulled_in.contains(&edge.to) {
                    connecting.push(edge);
                }
            }
        }
        for edge in connecting {
            if edges.insert(edge) {
                graph.edges.push(edge);
            }
        }

        self.attach_paths(&nodes, graph)
    }

    /// Extracts the region covered by the base interval `start..=stop` of the named path.
    ///
    /// Both bounds are clamped to the path; if the clamped interval is empty, the
    /// graph is left unchanged.
    /// The region contains the distinct nodes of the covered steps, all of their
    /// incident edges, and the mappings of those nodes.
    pub fn path_range(&self, name: &str, start: i64, stop: i64, graph: &mut Graph) -> Result<(), GraphIndexError> {
        let rank = self.path_rank(name)?;
        let path = self.indexed_path(rank)?;
        let length = path.length() as i64;
        let start = start.max(0);
        let stop = stop.min(length - 1);
        if start >= length || stop < start {
            return Ok(());
        }
        let first_step = path.step_at_position(start as usize)?;
        let last_step = path.step_at_position(stop as usize)?;

        let mut nodes: BTreeSet<i64> = BTreeSet::new();
        let mut edges: BTreeSet<Edge> = BTreeSet::new();
        for step in first_step..=last_step {
            let id = self.rank_to_id(path.node_rank_at_step(step) as usize)?;
            if nodes.insert(id) {
                for edge in self.edges_from(id)? {
                    edges.insert(edge);
                }
                for edge in self.edges_to(id)? {
                    edges.insert(edge);
                }
            }
        }

        for id in nodes.iter() {
            graph.nodes.push(self.node(*id)?);
        }
        self.attach_paths(&nodes, graph)?;
        for edge in edges {
            graph.edges.push(edge);
        }
        Ok(())
    }

    /// Extracts the existing nodes with ids in `from..=to`.
    ///
    /// The bounds are clamped to the stored id range; ids without a node are skipped.
    pub fn id_range(&self, from: i64, to: i64, graph: &mut Graph) -> Result<(), GraphIndexError> {
        let mut id = from.max(self.min_node_id());
        let to = to.min(self.max_node_id());
        while id <= to {
            if self.has_node(id) {
                graph.nodes.push(self.node(id)?);
            }
            id += 1;
        }
        Ok(())
    }

    // Attaches the mappings of the given nodes to the graph as paths.
    // Mappings arrive in ascending node id order, not in path order.
    fn attach_paths(&self, nodes: &BTreeSet<i64>, graph: &mut Graph) -> Result<(), GraphIndexError> {
        for id in nodes.iter() {
            for (name, mapping) in self.node_mappings(*id)? {
                graph.path_mut(&name).mappings.push(mapping);
            }
        }
        Ok(())
    }
}

//-----------------------------------------------------------------------------

//! Orientation-aware breadth-first traversal and component discovery.

use crate::graph::{neighbors, GraphError, GraphRead, GraphResult, MemoryGraph};
use crate::types::{EdgeId, GraphMode, NodeId};
use rustc_hash::FxHashSet;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Result of a breadth-first search: the visited nodes (in visit order) and
/// the distinct edge ids recorded while scanning adjacencies (in first-seen
/// order).
///
/// Every edge connecting two visited nodes is recorded, not only the tree
/// edges used to reach new nodes — a component's full edge set is part of
/// the result.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraversalResult {
    pub node_ids: Vec<NodeId>,
    pub edge_ids: Vec<EdgeId>,
}

impl TraversalResult {
    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_ids.len()
    }
}

/// Performs a breadth-first search from `start`, visiting every node
/// connected to it under the given orientation.
///
/// The work queue is ordered by numeric node id, not arrival order. This
/// reproduces the ordering existing consumers rely on; for the documented
/// result guarantees a plain FIFO would be equally correct.
pub fn breadth_first_search<G: GraphRead + ?Sized>(
    graph: &G,
    start: NodeId,
    mode: GraphMode,
) -> TraversalResult {
    let mut visited: FxHashSet<NodeId> = FxHashSet::default();
    let mut visit_order: Vec<NodeId> = Vec::new();
    let mut edge_ids: Vec<EdgeId> = Vec::new();
    let mut edges_seen: FxHashSet<EdgeId> = FxHashSet::default();
    let mut queue: BinaryHeap<Reverse<NodeId>> = BinaryHeap::new();

    visited.insert(start);
    visit_order.push(start);
    queue.push(Reverse(start));

    while let Some(Reverse(current)) = queue.pop() {
        for neighbor in neighbors(graph, current, mode) {
            // A self-loop never contributes a new visited node: the current
            // node is already marked.
            if visited.insert(neighbor) {
                visit_order.push(neighbor);
                queue.push(Reverse(neighbor));
            }

            // Record the connecting edges for every scanned pair, whether or
            // not the neighbor was new: the forward edge, and in undirected
            // mode the reverse edge as well. Dedup keeps each id once, in
            // first-recorded order.
            if let Some(edge) = graph.find_edge(current, neighbor) {
                if edges_seen.insert(edge) {
                    edge_ids.push(edge);
                }
            }
            if mode == GraphMode::Undirected {
                if let Some(edge) = graph.find_edge(neighbor, current) {
                    if edges_seen.insert(edge) {
                        edge_ids.push(edge);
                    }
                }
            }
        }
    }

    TraversalResult {
        node_ids: visit_order,
        edge_ids,
    }
}

/// Extracts all connected components of a graph, treating edges as
/// undirected. Each BFS reveals exactly one component; components are
/// returned in ascending order of their smallest node id.
pub fn find_components_undirected<G: GraphRead + ?Sized>(graph: &G) -> Vec<TraversalResult> {
    let mut ids = graph.node_ids();
    ids.sort_unstable();
    components_from_sorted(graph, ids)
}

/// Like [`find_components_undirected`], but discovery starts only from the
/// provided seed nodes. The returned components partition exactly the set
/// of nodes reachable from the seeds.
pub fn find_components_undirected_from<G: GraphRead + ?Sized>(
    graph: &G,
    seeds: &[NodeId],
) -> Vec<TraversalResult> {
    let mut ids = seeds.to_vec();
    ids.sort_unstable();
    components_from_sorted(graph, ids)
}

fn components_from_sorted<G: GraphRead + ?Sized>(
    graph: &G,
    sorted_ids: Vec<NodeId>,
) -> Vec<TraversalResult> {
    let mut results = Vec::new();
    let mut visited: FxHashSet<NodeId> = FxHashSet::default();
    for id in sorted_ids {
        if visited.contains(&id) {
            continue;
        }
        let component = breadth_first_search(graph, id, GraphMode::Undirected);
        visited.extend(component.node_ids.iter().copied());
        results.push(component);
    }
    results
}

/// Builds the induced subgraph on the open neighborhood of `node`: every
/// direct neighbor under `mode` (excluding `node` itself), plus every edge
/// of the original graph connecting two included neighbors. Node and edge
/// ids in the subgraph match the originating graph.
pub fn open_neighborhood_subgraph<G: GraphRead + ?Sized>(
    graph: &G,
    node: NodeId,
    mode: GraphMode,
) -> GraphResult<MemoryGraph> {
    let mut subgraph = MemoryGraph::new();
    let mut included: Vec<NodeId> = Vec::new();

    let add_neighbor = |subgraph: &mut MemoryGraph,
                            included: &mut Vec<NodeId>,
                            id: NodeId|
     -> GraphResult<()> {
        let label = graph.node_label(id).ok_or(GraphError::NodeNotFound(id))?;
        if !subgraph.has_node(id) {
            included.push(id);
        }
        subgraph.insert_node(id, label);
        Ok(())
    };

    for edge in graph.edges_from(node) {
        if edge.to != node {
            add_neighbor(&mut subgraph, &mut included, edge.to)?;
        }
    }
    if mode == GraphMode::Undirected {
        for edge in graph.edges_to(node) {
            if edge.from != node {
                add_neighbor(&mut subgraph, &mut included, edge.from)?;
            }
        }
    }

    // Induce the edges: for each included pair, carry over any connecting
    // edge in either direction. Re-inserting the same id is a no-op.
    for &a in &included {
        for &b in &included {
            if let Some(edge) = graph.find_edge(a, b) {
                subgraph.insert_edge(edge, a, b)?;
            }
            if let Some(edge) = graph.find_edge(b, a) {
                subgraph.insert_edge(edge, b, a)?;
            }
        }
    }

    Ok(subgraph)
}

/// Finds the largest connected component inside the open neighborhood of
/// `node`. Ties break toward the component discovered first; an empty
/// neighborhood yields `None`.
pub fn maximum_connected_component<G: GraphRead + ?Sized>(
    graph: &G,
    node: NodeId,
    mode: GraphMode,
) -> GraphResult<Option<TraversalResult>> {
    let neighborhood = open_neighborhood_subgraph(graph, node, mode)?;
    let components = find_components_undirected(&neighborhood);

    let mut largest: Option<TraversalResult> = None;
    for component in components {
        let is_larger = largest
            .as_ref()
            .map_or(true, |best| component.node_count() > best.node_count());
        if is_larger {
            largest = Some(component);
        }
    }
    Ok(largest)
}

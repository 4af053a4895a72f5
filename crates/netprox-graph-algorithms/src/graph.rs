//! Read interface to an externally owned property graph, plus the in-memory
//! graph used for ephemeral subgraphs and tests.
//!
//! The engine never owns graph data: every algorithm borrows read access
//! through [`GraphRead`] and owns only its transient working structures.

use crate::types::{EdgeId, EdgeRef, GraphMode, NodeId};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors that can occur when building a graph.
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Invalid edge: source node {0} does not exist")]
    InvalidEdgeSource(NodeId),

    #[error("Invalid edge: target node {0} does not exist")]
    InvalidEdgeTarget(NodeId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Read-only view of a property graph.
///
/// This is the full surface the engine consumes: node/edge enumeration,
/// label-filtered enumeration, adjacency lookup by endpoint, and point
/// lookups. Storage, indexing, and mutation live with the collaborator
/// that implements this trait.
pub trait GraphRead: Send + Sync {
    /// All node ids in the graph, in no particular order.
    fn node_ids(&self) -> Vec<NodeId>;

    /// Node ids carrying the given label.
    fn node_ids_with_label(&self, label: &str) -> Vec<NodeId>;

    fn node_count(&self) -> u64;

    fn node_count_with_label(&self, label: &str) -> u64;

    /// Edges with `node` as their from-endpoint.
    fn edges_from(&self, node: NodeId) -> Vec<EdgeRef>;

    /// Edges with `node` as their to-endpoint.
    fn edges_to(&self, node: NodeId) -> Vec<EdgeRef>;

    /// Some edge from `from` to `to`, if at least one exists.
    fn find_edge(&self, from: NodeId, to: NodeId) -> Option<EdgeId>;

    /// The node's label, or `None` for an unknown id.
    fn node_label(&self, node: NodeId) -> Option<&str>;
}

/// Collects all adjacent neighbors of a node under the given orientation.
///
/// Outgoing edges always contribute their to-endpoint; in `Undirected` mode
/// incoming edges contribute their from-endpoint as well. The list preserves
/// the graph's edge enumeration order and may contain duplicates (parallel
/// edges) or the node itself (self-loops), matching what the traversal and
/// relaxation loops expect.
pub fn neighbors<G: GraphRead + ?Sized>(graph: &G, node: NodeId, mode: GraphMode) -> Vec<NodeId> {
    let mut adjacency: Vec<NodeId> = graph.edges_from(node).iter().map(|e| e.to).collect();
    if mode == GraphMode::Undirected {
        adjacency.extend(graph.edges_to(node).iter().map(|e| e.from));
    }
    adjacency
}

/// A small in-memory labeled graph.
///
/// Serves two roles: the ephemeral graph produced by open-neighborhood
/// extraction, and the graph implementation used by callers that do not
/// bring their own store. Node and edge ids are caller-assigned and stable.
#[derive(Debug, Default, Clone)]
pub struct MemoryGraph {
    labels: FxHashMap<NodeId, String>,
    edges: FxHashMap<EdgeId, (NodeId, NodeId)>,
    outgoing: FxHashMap<NodeId, Vec<EdgeId>>,
    incoming: FxHashMap<NodeId, Vec<EdgeId>>,
    next_node_id: u64,
    next_edge_id: u64,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node with a fresh id.
    pub fn add_node(&mut self, label: impl Into<String>) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        self.insert_node(id, label);
        id
    }

    /// Inserts (or relabels) a node under a caller-chosen id. Used when
    /// copying nodes into an ephemeral subgraph so ids stay aligned with
    /// the originating graph.
    pub fn insert_node(&mut self, id: NodeId, label: impl Into<String>) {
        self.labels.insert(id, label.into());
        self.outgoing.entry(id).or_default();
        self.incoming.entry(id).or_default();
        self.next_node_id = self.next_node_id.max(id.0 + 1);
    }

    /// Adds an edge with a fresh id. Both endpoints must already exist.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> GraphResult<EdgeId> {
        let id = EdgeId(self.next_edge_id);
        self.next_edge_id += 1;
        self.insert_edge(id, from, to)?;
        Ok(id)
    }

    /// Inserts an edge under a caller-chosen id; re-inserting an existing
    /// id is a no-op (upsert), so subgraph construction can discover the
    /// same edge from both endpoints without duplicating it.
    pub fn insert_edge(&mut self, id: EdgeId, from: NodeId, to: NodeId) -> GraphResult<()> {
        if !self.labels.contains_key(&from) {
            return Err(GraphError::InvalidEdgeSource(from));
        }
        if !self.labels.contains_key(&to) {
            return Err(GraphError::InvalidEdgeTarget(to));
        }
        if self.edges.contains_key(&id) {
            return Ok(());
        }
        self.edges.insert(id, (from, to));
        self.outgoing.entry(from).or_default().push(id);
        self.incoming.entry(to).or_default().push(id);
        self.next_edge_id = self.next_edge_id.max(id.0 + 1);
        Ok(())
    }

    pub fn has_node(&self, id: NodeId) -> bool {
        self.labels.contains_key(&id)
    }

    pub fn edge_count(&self) -> u64 {
        self.edges.len() as u64
    }

    fn edge_ref(&self, id: EdgeId) -> EdgeRef {
        let (from, to) = self.edges[&id];
        EdgeRef { id, from, to }
    }
}

impl GraphRead for MemoryGraph {
    fn node_ids(&self) -> Vec<NodeId> {
        self.labels.keys().copied().collect()
    }

    fn node_ids_with_label(&self, label: &str) -> Vec<NodeId> {
        self.labels
            .iter()
            .filter(|(_, l)| l.as_str() == label)
            .map(|(id, _)| *id)
            .collect()
    }

    fn node_count(&self) -> u64 {
        self.labels.len() as u64
    }

    fn node_count_with_label(&self, label: &str) -> u64 {
        self.labels.values().filter(|l| l.as_str() == label).count() as u64
    }

    fn edges_from(&self, node: NodeId) -> Vec<EdgeRef> {
        self.outgoing
            .get(&node)
            .map(|ids| ids.iter().map(|&id| self.edge_ref(id)).collect())
            .unwrap_or_default()
    }

    fn edges_to(&self, node: NodeId) -> Vec<EdgeRef> {
        self.incoming
            .get(&node)
            .map(|ids| ids.iter().map(|&id| self.edge_ref(id)).collect())
            .unwrap_or_default()
    }

    fn find_edge(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        self.outgoing
            .get(&from)?
            .iter()
            .find(|&&id| self.edges[&id].1 == to)
            .copied()
    }

    fn node_label(&self, node: NodeId) -> Option<&str> {
        self.labels.get(&node).map(|l| l.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_nodes_and_edges() {
        let mut graph = MemoryGraph::new();
        let a = graph.add_node("Protein");
        let b = graph.add_node("Protein");
        let e = graph.add_edge(a, b).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.find_edge(a, b), Some(e));
        assert_eq!(graph.find_edge(b, a), None);
        assert_eq!(graph.node_label(a), Some("Protein"));
    }

    #[test]
    fn test_invalid_edge_endpoints() {
        let mut graph = MemoryGraph::new();
        let a = graph.add_node("A");
        let missing = NodeId(99);
        assert_eq!(
            graph.add_edge(a, missing),
            Err(GraphError::InvalidEdgeTarget(missing))
        );
        assert_eq!(
            graph.add_edge(missing, a),
            Err(GraphError::InvalidEdgeSource(missing))
        );
    }

    #[test]
    fn test_insert_edge_is_upsert() {
        let mut graph = MemoryGraph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        graph.insert_edge(EdgeId(7), a, b).unwrap();
        graph.insert_edge(EdgeId(7), a, b).unwrap();
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_neighbors_by_mode() {
        let mut graph = MemoryGraph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        let c = graph.add_node("C");
        graph.add_edge(a, b).unwrap();
        graph.add_edge(c, a).unwrap();

        assert_eq!(neighbors(&graph, a, GraphMode::Directed), vec![b]);
        let undirected = neighbors(&graph, a, GraphMode::Undirected);
        assert_eq!(undirected, vec![b, c]);
    }

    #[test]
    fn test_neighbors_self_loop() {
        let mut graph = MemoryGraph::new();
        let a = graph.add_node("A");
        graph.add_edge(a, a).unwrap();

        // A self-loop shows up from both the outgoing and the incoming side.
        assert_eq!(neighbors(&graph, a, GraphMode::Undirected), vec![a, a]);
        assert_eq!(neighbors(&graph, a, GraphMode::Directed), vec![a]);
    }

    #[test]
    fn test_label_queries() {
        let mut graph = MemoryGraph::new();
        graph.add_node("Drug");
        graph.add_node("Protein");
        graph.add_node("Protein");

        assert_eq!(graph.node_count_with_label("Protein"), 2);
        assert_eq!(graph.node_ids_with_label("Drug").len(), 1);
        assert_eq!(graph.node_count_with_label("Gene"), 0);
    }
}

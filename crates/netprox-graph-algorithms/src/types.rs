//! Core type definitions for the analytics engine

use std::cmp::Ordering;
use std::fmt;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u64);

impl NodeId {
    pub fn new(id: u64) -> Self {
        NodeId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

/// Unique identifier for an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeId(pub u64);

impl EdgeId {
    pub fn new(id: u64) -> Self {
        EdgeId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeId({})", self.0)
    }
}

impl From<u64> for EdgeId {
    fn from(id: u64) -> Self {
        EdgeId(id)
    }
}

/// An edge together with its endpoints, as handed out by the read interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeRef {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
}

/// Orientation of a graph: determines which edges count as adjacency.
///
/// `Directed` considers only outgoing edges; `Undirected` treats a node
/// connected by an edge in either direction as adjacent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GraphMode {
    Directed,
    Undirected,
}

impl std::str::FromStr for GraphMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "directed" => Ok(GraphMode::Directed),
            "undirected" => Ok(GraphMode::Undirected),
            other => Err(format!("unknown graph mode '{other}'")),
        }
    }
}

/// Unit-weight path length. Edges all cost 1.
pub type Distance = u64;

/// Sentinel standing in for "unreachable": the maximum representable
/// distance, not a mathematical infinity. All arithmetic against it must
/// saturate so it can never wrap into a valid distance.
pub const INFINITE_DISTANCE: Distance = u64::MAX;

/// Synthetic predecessor marking the source node in a predecessor multimap.
pub const NO_PREDECESSOR: NodeId = NodeId(u64::MAX);

/// Entry in the Dijkstra priority queue: a node id paired with its running
/// distance from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceEntry {
    pub node: NodeId,
    pub distance: Distance,
}

impl DistanceEntry {
    pub fn new(node: NodeId, distance: Distance) -> Self {
        Self { node, distance }
    }
}

// Rust's BinaryHeap is a max-heap, so Ord is reversed for min-heap behavior.
// Ties on distance fall back to node id to keep ordering total and runs
// deterministic.
impl Ord for DistanceEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for DistanceEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A pair of node ids with symmetric equality and hash: (a, b) == (b, a).
///
/// Used to avoid processing the same node pair twice in betweenness
/// computation.
#[derive(Debug, Clone, Copy)]
pub struct NodePair(pub NodeId, pub NodeId);

impl NodePair {
    pub fn new(first: NodeId, second: NodeId) -> Self {
        Self(first, second)
    }
}

impl PartialEq for NodePair {
    fn eq(&self, other: &Self) -> bool {
        (self.0 == other.0 && self.1 == other.1) || (self.0 == other.1 && self.1 == other.0)
    }
}

impl Eq for NodePair {}

impl std::hash::Hash for NodePair {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // Order-independent: hash the pair in canonical (min, max) order.
        let (lo, hi) = if self.0 <= self.1 {
            (self.0, self.1)
        } else {
            (self.1, self.0)
        };
        lo.hash(state);
        hi.hash(state);
    }
}

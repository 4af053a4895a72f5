//! Unweighted shortest-path search with per-finder result caching.
//!
//! A [`ShortestPathFinder`] is bound to one graph and one orientation and
//! answers three kinds of queries: the shortest path to a single target,
//! the full distance map from a source, and every shortest path from a
//! source. Results are cached inside the finder, so repeated queries over
//! the same graph (the common case for centrality metrics) pay for each
//! Dijkstra run once.

use crate::graph::{neighbors, GraphRead};
use crate::types::{Distance, DistanceEntry, GraphMode, NodeId, INFINITE_DISTANCE, NO_PREDECESSOR};
use rustc_hash::FxHashMap;
use std::collections::BinaryHeap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Outcome of a single-target Dijkstra run: the distance map (holding only
/// the target entry) and the reconstructed path from source to target,
/// endpoints included. An unreachable target yields the degenerate path
/// `[target]` with an infinite distance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DijkstraResult {
    pub distances: FxHashMap<NodeId, Distance>,
    pub path: Vec<NodeId>,
}

impl DijkstraResult {
    pub fn distance_to(&self, node: NodeId) -> Distance {
        self.distances.get(&node).copied().unwrap_or(INFINITE_DISTANCE)
    }
}

/// All shortest paths from a fixed source, stored as a predecessor DAG.
/// Paths are materialized lazily per target via [`AllShortestPaths::paths_to`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllShortestPaths {
    source: NodeId,
    distances: FxHashMap<NodeId, Distance>,
    predecessors: FxHashMap<NodeId, Vec<NodeId>>,
}

impl AllShortestPaths {
    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn distance_to(&self, node: NodeId) -> Distance {
        self.distances.get(&node).copied().unwrap_or(INFINITE_DISTANCE)
    }

    /// Materializes every shortest path ending at `target`. Each path lists
    /// the nodes in order from the source's first hop up to and including
    /// the target; the source itself is not part of the path, so a path's
    /// length equals the distance it realizes. Unreachable targets yield an
    /// empty list.
    pub fn paths_to(&self, target: NodeId) -> Vec<Vec<NodeId>> {
        let mut paths = Vec::new();
        let mut scratch = Vec::new();
        self.collect_paths(target, &mut scratch, &mut paths);
        for path in &mut paths {
            path.reverse();
        }
        paths
    }

    fn collect_paths(&self, node: NodeId, scratch: &mut Vec<NodeId>, paths: &mut Vec<Vec<NodeId>>) {
        let Some(parents) = self.predecessors.get(&node) else {
            return;
        };
        if parents.contains(&NO_PREDECESSOR) {
            paths.push(scratch.clone());
            return;
        }
        for &parent in parents {
            scratch.push(node);
            self.collect_paths(parent, scratch, paths);
            scratch.pop();
        }
    }
}

/// True if `node` lies on `path` anywhere except as its endpoint.
pub fn path_passes_through_node(path: &[NodeId], node: NodeId) -> bool {
    path.contains(&node) && path.last() != Some(&node)
}

/// Counts the paths that have `node` as an intermediate waypoint.
pub fn count_paths_through_node(paths: &[Vec<NodeId>], node: NodeId) -> u64 {
    paths
        .iter()
        .filter(|path| path_passes_through_node(path, node))
        .count() as u64
}

/// Cache key for the full distance-map query. Labels are kept sorted so
/// that equivalent filter sets share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DistanceQuery {
    source: NodeId,
    self_infinity: bool,
    labels: Vec<String>,
}

/// Dijkstra runner bound to one graph and orientation, with interior
/// caches so shared references can serve queries concurrently.
pub struct ShortestPathFinder<G: GraphRead + ?Sized> {
    graph: Arc<G>,
    mode: GraphMode,
    single_cache: Mutex<FxHashMap<(NodeId, NodeId), Arc<DijkstraResult>>>,
    distance_cache: Mutex<FxHashMap<DistanceQuery, Arc<FxHashMap<NodeId, Distance>>>>,
    paths_cache: Mutex<FxHashMap<NodeId, Arc<AllShortestPaths>>>,
}

impl<G: GraphRead + ?Sized> ShortestPathFinder<G> {
    pub fn new(graph: Arc<G>, mode: GraphMode) -> Self {
        Self {
            graph,
            mode,
            single_cache: Mutex::new(FxHashMap::default()),
            distance_cache: Mutex::new(FxHashMap::default()),
            paths_cache: Mutex::new(FxHashMap::default()),
        }
    }

    pub fn mode(&self) -> GraphMode {
        self.mode
    }

    /// Shortest path from `source` to `target`. The search stops as soon
    /// as the target leaves the queue, so only the target's distance is
    /// reported.
    pub fn shortest_path(&self, source: NodeId, target: NodeId) -> Arc<DijkstraResult> {
        let key = (source, target);
        if let Some(cached) = self.single_cache.lock().unwrap().get(&key) {
            return Arc::clone(cached);
        }
        let result = Arc::new(self.run_single_target(source, target));
        self.single_cache
            .lock()
            .unwrap()
            .entry(key)
            .or_insert(result)
            .clone()
    }

    /// Distances from `source` to every node of the graph. With
    /// `self_infinity`, the source's own entry is overwritten with
    /// [`INFINITE_DISTANCE`] after the run. A non-empty `labels` slice
    /// restricts the result to nodes carrying one of those labels.
    pub fn shortest_distances(
        &self,
        source: NodeId,
        self_infinity: bool,
        labels: &[String],
    ) -> Arc<FxHashMap<NodeId, Distance>> {
        let mut sorted_labels = labels.to_vec();
        sorted_labels.sort_unstable();
        let key = DistanceQuery {
            source,
            self_infinity,
            labels: sorted_labels,
        };
        if let Some(cached) = self.distance_cache.lock().unwrap().get(&key) {
            return Arc::clone(cached);
        }
        let result = Arc::new(self.run_all_distances(source, self_infinity, labels));
        self.distance_cache
            .lock()
            .unwrap()
            .entry(key)
            .or_insert(result)
            .clone()
    }

    /// Every shortest path from `source`, as a shared predecessor DAG.
    pub fn all_shortest_paths(&self, source: NodeId) -> Arc<AllShortestPaths> {
        if let Some(cached) = self.paths_cache.lock().unwrap().get(&source) {
            return Arc::clone(cached);
        }
        let result = Arc::new(self.run_all_paths(source));
        self.paths_cache
            .lock()
            .unwrap()
            .entry(source)
            .or_insert(result)
            .clone()
    }

    /// Drops all cached results. Call after the underlying graph changes.
    pub fn clear_cache(&self) {
        self.single_cache.lock().unwrap().clear();
        self.distance_cache.lock().unwrap().clear();
        self.paths_cache.lock().unwrap().clear();
    }

    fn run_single_target(&self, source: NodeId, target: NodeId) -> DijkstraResult {
        debug!(%source, %target, mode = ?self.mode, "running single-target dijkstra");
        let mut distances: FxHashMap<NodeId, Distance> = FxHashMap::default();
        let mut predecessors: FxHashMap<NodeId, NodeId> = FxHashMap::default();
        for id in self.graph.node_ids() {
            distances.insert(id, INFINITE_DISTANCE);
        }
        distances.insert(source, 0);

        let mut queue = BinaryHeap::new();
        queue.push(DistanceEntry::new(source, 0));
        while let Some(entry) = queue.pop() {
            if entry.node == target {
                break;
            }
            for neighbor in neighbors(self.graph.as_ref(), entry.node, self.mode) {
                let candidate = entry.distance.saturating_add(1);
                let known = distances.get(&neighbor).copied().unwrap_or(INFINITE_DISTANCE);
                if known > candidate {
                    distances.insert(neighbor, candidate);
                    predecessors.insert(neighbor, entry.node);
                    queue.push(DistanceEntry::new(neighbor, candidate));
                }
            }
        }

        // Only the target's entry survives in the result map.
        distances.retain(|id, _| *id == target);

        let mut path = vec![target];
        let mut current = target;
        while let Some(&parent) = predecessors.get(&current) {
            path.insert(0, parent);
            current = parent;
        }
        DijkstraResult { distances, path }
    }

    fn run_all_distances(
        &self,
        source: NodeId,
        self_infinity: bool,
        labels: &[String],
    ) -> FxHashMap<NodeId, Distance> {
        debug!(%source, self_infinity, mode = ?self.mode, "running full-map dijkstra");
        let mut distances: FxHashMap<NodeId, Distance> = FxHashMap::default();
        for id in self.graph.node_ids() {
            distances.insert(id, INFINITE_DISTANCE);
        }
        distances.insert(source, 0);

        let mut queue = BinaryHeap::new();
        queue.push(DistanceEntry::new(source, 0));
        while let Some(entry) = queue.pop() {
            for neighbor in neighbors(self.graph.as_ref(), entry.node, self.mode) {
                let candidate = entry.distance.saturating_add(1);
                let known = distances.get(&neighbor).copied().unwrap_or(INFINITE_DISTANCE);
                if known > candidate {
                    distances.insert(neighbor, candidate);
                    queue.push(DistanceEntry::new(neighbor, candidate));
                }
            }
        }

        if self_infinity {
            distances.insert(source, INFINITE_DISTANCE);
        }
        if !labels.is_empty() {
            distances.retain(|id, _| {
                self.graph
                    .node_label(*id)
                    .map_or(false, |label| labels.iter().any(|l| l == &label))
            });
        }
        distances
    }

    fn run_all_paths(&self, source: NodeId) -> AllShortestPaths {
        debug!(%source, mode = ?self.mode, "running all-shortest-paths dijkstra");
        let mut distances: FxHashMap<NodeId, Distance> = FxHashMap::default();
        let mut predecessors: FxHashMap<NodeId, Vec<NodeId>> = FxHashMap::default();
        for id in self.graph.node_ids() {
            distances.insert(id, INFINITE_DISTANCE);
            predecessors.insert(id, Vec::new());
        }
        distances.insert(source, 0);
        predecessors.insert(source, vec![NO_PREDECESSOR]);

        let mut queue = BinaryHeap::new();
        queue.push(DistanceEntry::new(source, 0));
        while let Some(entry) = queue.pop() {
            for neighbor in neighbors(self.graph.as_ref(), entry.node, self.mode) {
                let candidate = entry.distance.saturating_add(1);
                let known = distances.get(&neighbor).copied().unwrap_or(INFINITE_DISTANCE);
                if known > candidate {
                    // Strictly shorter: previous predecessors are obsolete.
                    distances.insert(neighbor, candidate);
                    queue.push(DistanceEntry::new(neighbor, candidate));
                    let parents = predecessors.entry(neighbor).or_default();
                    parents.clear();
                    parents.push(entry.node);
                } else if known == candidate {
                    // Equal cost: another shortest path reaches this node.
                    predecessors.entry(neighbor).or_default().push(entry.node);
                }
            }
        }

        AllShortestPaths {
            source,
            distances,
            predecessors,
        }
    }
}

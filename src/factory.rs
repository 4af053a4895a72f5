//! Shared [`ShortestPathFinder`] instances, one per graph and orientation.
//!
//! Shortest-path results are cached inside each finder, so procedures that
//! fire many queries against the same graph must share a finder instead of
//! building their own. The factory keys finders by graph identity (the
//! `Arc` pointer) and orientation.

use dashmap::DashMap;
use netprox_graph_algorithms::{GraphMode, GraphRead, ShortestPathFinder};
use std::sync::Arc;
use tracing::debug;

pub struct FinderFactory<G: GraphRead> {
    store: DashMap<(usize, GraphMode), Arc<ShortestPathFinder<G>>>,
}

impl<G: GraphRead> FinderFactory<G> {
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Fetches the finder for `graph` under `mode`, creating it on first
    /// use. Two `Arc`s pointing at the same graph share one finder.
    pub fn get(&self, graph: &Arc<G>, mode: GraphMode) -> Arc<ShortestPathFinder<G>> {
        let key = (Arc::as_ptr(graph) as usize, mode);
        self.store
            .entry(key)
            .or_insert_with(|| {
                debug!(?mode, "no finder for this graph yet, creating one");
                Arc::new(ShortestPathFinder::new(Arc::clone(graph), mode))
            })
            .clone()
    }

    /// Drops every stored finder and its cached results.
    pub fn clear(&self) {
        self.store.clear();
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl<G: GraphRead> Default for FinderFactory<G> {
    fn default() -> Self {
        Self::new()
    }
}

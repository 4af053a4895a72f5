//! Maximal clique detection via Bron-Kerbosch.

use crate::graph::{neighbors, GraphRead};
use crate::types::{GraphMode, NodeId};
use rustc_hash::FxHashSet;
use tracing::{debug, info};

/// Finds all maximal cliques of a graph, treating edges as undirected.
/// Detection runs eagerly on construction; the results stay available for
/// repeated per-node lookups.
pub struct CliqueFinder {
    cliques: Vec<Vec<NodeId>>,
}

impl CliqueFinder {
    pub fn new<G: GraphRead + ?Sized>(graph: &G) -> Self {
        let mut finder = Self {
            cliques: Vec::new(),
        };
        finder.run(graph);
        finder
    }

    /// Clears previous results and re-runs detection on a new graph.
    pub fn reset<G: GraphRead + ?Sized>(&mut self, graph: &G) {
        info!("clearing previous clique data");
        self.cliques.clear();
        self.run(graph);
    }

    pub fn cliques(&self) -> &[Vec<NodeId>] {
        &self.cliques
    }

    /// All maximal cliques that contain the given node.
    pub fn cliques_containing(&self, node: NodeId) -> Vec<&[NodeId]> {
        self.cliques
            .iter()
            .filter(|clique| clique.contains(&node))
            .map(|clique| clique.as_slice())
            .collect()
    }

    fn run<G: GraphRead + ?Sized>(&mut self, graph: &G) {
        info!("initializing clique detection");
        let candidates = graph.node_ids();
        let mut current = Vec::new();
        self.bron_kerbosch(graph, &mut current, candidates, Vec::new(), 0);
        info!(count = self.cliques.len(), "clique detection finished");
    }

    /// Classic Bron-Kerbosch without pivoting. `current` is the clique
    /// under construction, `candidates` the nodes that may still extend it,
    /// `excluded` the nodes already expanded at an earlier branch. Each
    /// recursion level works on its own restricted candidate and exclusion
    /// lists.
    fn bron_kerbosch<G: GraphRead + ?Sized>(
        &mut self,
        graph: &G,
        current: &mut Vec<NodeId>,
        mut candidates: Vec<NodeId>,
        mut excluded: Vec<NodeId>,
        depth: usize,
    ) {
        if candidates.is_empty() && excluded.is_empty() {
            debug!(depth, size = current.len(), "maximal clique found");
            self.cliques.push(current.clone());
            return;
        }

        while let Some(node) = candidates.first().copied() {
            let adjacent: FxHashSet<NodeId> = neighbors(graph, node, GraphMode::Undirected)
                .into_iter()
                .collect();
            let next_candidates: Vec<NodeId> = candidates
                .iter()
                .copied()
                .filter(|id| adjacent.contains(id))
                .collect();
            let next_excluded: Vec<NodeId> = excluded
                .iter()
                .copied()
                .filter(|id| adjacent.contains(id))
                .collect();

            current.push(node);
            self.bron_kerbosch(graph, current, next_candidates, next_excluded, depth + 1);
            current.pop();

            candidates.retain(|id| *id != node);
            excluded.push(node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MemoryGraph;
    use rustc_hash::FxHashMap;

    /// Six nodes A-F with edges A-B, A-C, A-E, B-C, B-D, B-F, C-D, C-F,
    /// D-F, D-E. Maximal cliques: {A,B,C}, {A,E}, {B,C,D,F}, {D,E}.
    fn create_test_graph() -> (MemoryGraph, FxHashMap<&'static str, NodeId>) {
        let mut graph = MemoryGraph::new();
        let mut ids = FxHashMap::default();
        for label in ["A", "B", "C", "D", "E", "F"] {
            ids.insert(label, graph.add_node(label));
        }
        for (from, to) in [
            ("A", "B"),
            ("A", "C"),
            ("A", "E"),
            ("B", "C"),
            ("B", "D"),
            ("B", "F"),
            ("C", "D"),
            ("C", "F"),
            ("D", "F"),
            ("D", "E"),
        ] {
            graph.add_edge(ids[from], ids[to]).unwrap();
        }
        (graph, ids)
    }

    fn sorted_cliques(finder: &CliqueFinder) -> Vec<Vec<NodeId>> {
        let mut cliques: Vec<Vec<NodeId>> = finder
            .cliques()
            .iter()
            .map(|clique| {
                let mut c = clique.clone();
                c.sort_unstable();
                c
            })
            .collect();
        cliques.sort();
        cliques
    }

    #[test]
    fn test_finds_all_maximal_cliques() {
        let (graph, ids) = create_test_graph();
        let finder = CliqueFinder::new(&graph);

        let cliques = sorted_cliques(&finder);
        assert_eq!(cliques.len(), 4);

        let expected: Vec<Vec<NodeId>> = {
            let mut e = vec![
                vec![ids["A"], ids["B"], ids["C"]],
                vec![ids["A"], ids["E"]],
                vec![ids["B"], ids["C"], ids["D"], ids["F"]],
                vec![ids["D"], ids["E"]],
            ];
            e.iter_mut().for_each(|c| c.sort_unstable());
            e.sort();
            e
        };
        assert_eq!(cliques, expected);
    }

    #[test]
    fn test_cliques_containing_node() {
        let (graph, ids) = create_test_graph();
        let finder = CliqueFinder::new(&graph);

        let for_a = finder.cliques_containing(ids["A"]);
        assert_eq!(for_a.len(), 2);
        let for_f = finder.cliques_containing(ids["F"]);
        assert_eq!(for_f.len(), 1);
        assert_eq!(for_f[0].len(), 4);
    }

    #[test]
    fn test_isolated_nodes_form_singleton_cliques() {
        let mut graph = MemoryGraph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        let finder = CliqueFinder::new(&graph);

        let cliques = sorted_cliques(&finder);
        assert_eq!(cliques, vec![vec![a], vec![b]]);
    }

    #[test]
    fn test_reset_replaces_results() {
        let (graph, _) = create_test_graph();
        let mut finder = CliqueFinder::new(&graph);
        assert_eq!(finder.cliques().len(), 4);

        let mut triangle = MemoryGraph::new();
        let x = triangle.add_node("X");
        let y = triangle.add_node("Y");
        let z = triangle.add_node("Z");
        triangle.add_edge(x, y).unwrap();
        triangle.add_edge(y, z).unwrap();
        triangle.add_edge(x, z).unwrap();

        finder.reset(&triangle);
        assert_eq!(finder.cliques().len(), 1);
        assert_eq!(finder.cliques()[0].len(), 3);
    }
}

//! Node centrality measures.
//!
//! All measures answer a per-node question: how central is this node in
//! the surrounding network? Degree variants count incident edges directly;
//! the distance-based measures (closeness, eccentricity, betweenness) run
//! through the shared [`FinderFactory`] so repeated calls against the same
//! graph reuse cached shortest-path results.

use crate::error::{ProcedureError, ProcedureResult};
use crate::factory::FinderFactory;
use crate::result::{ResultRow, ResultSet};
use netprox_graph_algorithms::{
    count_paths_through_node, maximum_connected_component, CliqueFinder, GraphMode, GraphRead,
    NodeId, NodePair,
};
use rustc_hash::FxHashSet;
use std::sync::Arc;

fn ensure_node<G: GraphRead>(graph: &G, node: NodeId) -> ProcedureResult<()> {
    if graph.node_label(node).is_none() {
        return Err(ProcedureError::NodeNotFound(node));
    }
    Ok(())
}

/// Degree of a node: the count of all incident edges, incoming and
/// outgoing. A self-loop counts twice.
pub fn degree<G: GraphRead>(graph: &G, node: NodeId) -> ProcedureResult<ResultSet> {
    ensure_node(graph, node)?;
    let degree = (graph.edges_from(node).len() + graph.edges_to(node).len()) as u64;
    let mut result = ResultSet::new(["id", "degree"]);
    result.add_row(ResultRow::new().with("id", node.as_u64()).with("degree", degree));
    Ok(result)
}

/// In-degree: the count of edges pointing at the node.
pub fn degree_in<G: GraphRead>(graph: &G, node: NodeId) -> ProcedureResult<ResultSet> {
    ensure_node(graph, node)?;
    let degree = graph.edges_to(node).len() as u64;
    let mut result = ResultSet::new(["id", "degree"]);
    result.add_row(ResultRow::new().with("id", node.as_u64()).with("degree", degree));
    Ok(result)
}

/// Out-degree: the count of edges leaving the node.
pub fn degree_out<G: GraphRead>(graph: &G, node: NodeId) -> ProcedureResult<ResultSet> {
    ensure_node(graph, node)?;
    let degree = graph.edges_from(node).len() as u64;
    let mut result = ResultSet::new(["id", "degree"]);
    result.add_row(ResultRow::new().with("id", node.as_u64()).with("degree", degree));
    Ok(result)
}

/// Raw closeness score, shared with the proximity centre measure.
///
/// Sums the shortest distances from `node` to every other node (optionally
/// restricted by label) and divides the reachable-node budget `N - 1` by
/// that sum. Unreachable nodes contribute the sentinel distance, which
/// drives the score toward zero on fragmented graphs.
pub(crate) fn closeness_value<G: GraphRead>(
    graph: &Arc<G>,
    factory: &FinderFactory<G>,
    node: NodeId,
    mode: GraphMode,
    labels: &[String],
) -> ProcedureResult<f64> {
    ensure_node(graph.as_ref(), node)?;
    if graph.node_count() < 2 {
        return Err(ProcedureError::EmptyGraph);
    }
    let finder = factory.get(graph, mode);
    let distances = finder.shortest_distances(node, false, labels);
    let sum: f64 = distances
        .iter()
        .filter(|(id, _)| **id != node)
        .map(|(_, distance)| *distance as f64)
        .sum();
    Ok((graph.node_count() - 1) as f64 / sum)
}

/// Closeness centrality of a node.
pub fn closeness<G: GraphRead>(
    graph: &Arc<G>,
    factory: &FinderFactory<G>,
    node: NodeId,
    mode: GraphMode,
    labels: &[String],
) -> ProcedureResult<ResultSet> {
    let value = closeness_value(graph, factory, node, mode, labels)?;
    let mut result = ResultSet::new(["id", "closeness"]);
    result.add_row(ResultRow::new().with("id", node.as_u64()).with("closeness", value));
    Ok(result)
}

/// Eccentricity: the reciprocal of the longest shortest path leaving the
/// node. Any unreachable node pins the maximum at the sentinel distance.
pub fn eccentricity<G: GraphRead>(
    graph: &Arc<G>,
    factory: &FinderFactory<G>,
    node: NodeId,
    mode: GraphMode,
) -> ProcedureResult<ResultSet> {
    ensure_node(graph.as_ref(), node)?;
    if graph.node_count() < 2 {
        return Err(ProcedureError::EmptyGraph);
    }
    let finder = factory.get(graph, mode);
    let distances = finder.shortest_distances(node, false, &[]);
    let max = distances.values().max().copied().unwrap_or(0);
    let eccentricity = 1.0 / (max as f64);
    let mut result = ResultSet::new(["id", "eccentricity"]);
    result.add_row(
        ResultRow::new()
            .with("id", node.as_u64())
            .with("eccentricity", eccentricity),
    );
    Ok(result)
}

/// Betweenness centrality: over every unordered pair of other nodes, the
/// fraction of their shortest paths that cross `node`, summed. With
/// `normalized`, the sum is divided by the pair count `(N-1)(N-2)/2`.
pub fn betweenness<G: GraphRead>(
    graph: &Arc<G>,
    factory: &FinderFactory<G>,
    node: NodeId,
    mode: GraphMode,
    normalized: bool,
) -> ProcedureResult<ResultSet> {
    ensure_node(graph.as_ref(), node)?;
    let finder = factory.get(graph, mode);
    let ids = graph.node_ids();
    let mut processed: FxHashSet<NodePair> = FxHashSet::default();
    let mut betweenness = 0.0;

    for &first in &ids {
        for &second in &ids {
            if !processed.insert(NodePair::new(first, second)) {
                continue;
            }
            if first == second || first == node || second == node {
                continue;
            }
            let all = finder.all_shortest_paths(first);
            let paths = all.paths_to(second);
            if !paths.is_empty() {
                betweenness +=
                    count_paths_through_node(&paths, node) as f64 / paths.len() as f64;
            }
        }
    }

    if normalized {
        let n = graph.node_count() as f64;
        let pairs = (n - 1.0) * (n - 2.0) / 2.0;
        if pairs > 0.0 {
            betweenness /= pairs;
        }
    }

    let mut result = ResultSet::new(["id", "betweenness"]);
    result.add_row(
        ResultRow::new()
            .with("id", node.as_u64())
            .with("betweenness", betweenness),
    );
    Ok(result)
}

/// Maximum neighborhood component: the node count of the largest connected
/// component among the node's direct neighbors. An isolated node scores 0.
pub fn maximum_neighborhood_component<G: GraphRead>(
    graph: &G,
    node: NodeId,
    mode: GraphMode,
) -> ProcedureResult<ResultSet> {
    ensure_node(graph, node)?;
    let component = maximum_connected_component(graph, node, mode)?;
    let size = component.map_or(0, |c| c.node_count()) as u64;
    let mut result = ResultSet::new(["id", "mnc"]);
    result.add_row(ResultRow::new().with("id", node.as_u64()).with("mnc", size));
    Ok(result)
}

/// Density of the maximum neighborhood component: its edge count divided
/// by its node count raised to `epsilon`.
pub fn density_of_maximum_neighborhood_component<G: GraphRead>(
    graph: &G,
    node: NodeId,
    mode: GraphMode,
    epsilon: f64,
) -> ProcedureResult<ResultSet> {
    ensure_node(graph, node)?;
    let component = maximum_connected_component(graph, node, mode)?;
    let density = match component {
        Some(c) => c.edge_count() as f64 / (c.node_count() as f64).powf(epsilon),
        None => 0.0,
    };
    let mut result = ResultSet::new(["id", "dmnc"]);
    result.add_row(ResultRow::new().with("id", node.as_u64()).with("dmnc", density));
    Ok(result)
}

fn factorial(n: usize) -> u64 {
    (1..=n as u64).product()
}

/// Maximal clique centrality: the sum of `(size - 1)!` over all maximal
/// cliques containing the node.
pub fn maximal_clique_centrality<G: GraphRead>(
    graph: &G,
    node: NodeId,
) -> ProcedureResult<ResultSet> {
    ensure_node(graph, node)?;
    let finder = CliqueFinder::new(graph);
    let mcc: u64 = finder
        .cliques_containing(node)
        .iter()
        .map(|clique| factorial(clique.len() - 1))
        .sum();
    let mut result = ResultSet::new(["id", "mcc"]);
    result.add_row(ResultRow::new().with("id", node.as_u64()).with("mcc", mcc));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use netprox_graph_algorithms::MemoryGraph;
    use rustc_hash::FxHashMap;

    /// Connected graph A-G without self-loops: A-C, A-B, A-D, C-F, F-D,
    /// D-E, F-G, B-E, E-G.
    fn connected_graph() -> (Arc<MemoryGraph>, FxHashMap<&'static str, NodeId>) {
        let mut graph = MemoryGraph::new();
        let mut ids = FxHashMap::default();
        for label in ["A", "B", "C", "D", "E", "F", "G"] {
            ids.insert(label, graph.add_node(label));
        }
        for (from, to) in [
            ("A", "C"),
            ("A", "B"),
            ("A", "D"),
            ("C", "F"),
            ("F", "D"),
            ("D", "E"),
            ("F", "G"),
            ("B", "E"),
            ("E", "G"),
        ] {
            graph.add_edge(ids[from], ids[to]).unwrap();
        }
        (Arc::new(graph), ids)
    }

    /// Graph with a self-loop on E and an isolated G: A-B, B-D, C-B, C-E,
    /// D-F, E-D, E-F, E-E.
    fn loop_graph() -> (Arc<MemoryGraph>, FxHashMap<&'static str, NodeId>) {
        let mut graph = MemoryGraph::new();
        let mut ids = FxHashMap::default();
        for label in ["A", "B", "C", "D", "E", "F", "G"] {
            ids.insert(label, graph.add_node(label));
        }
        for (from, to) in [
            ("A", "B"),
            ("B", "D"),
            ("C", "B"),
            ("C", "E"),
            ("D", "F"),
            ("E", "D"),
            ("E", "F"),
            ("E", "E"),
        ] {
            graph.add_edge(ids[from], ids[to]).unwrap();
        }
        (Arc::new(graph), ids)
    }

    #[test]
    fn test_degree_counts_both_directions() {
        let (graph, ids) = loop_graph();
        let degree_of = |label: &str| {
            degree(graph.as_ref(), ids[label])
                .unwrap()
                .row(0)
                .unwrap()
                .as_u64("degree")
                .unwrap()
        };
        // The self-loop on E counts twice.
        assert_eq!(degree_of("E"), 5);
        assert_eq!(degree_of("A"), 1);
        assert_eq!(degree_of("G"), 0);
    }

    #[test]
    fn test_degree_in_and_out() {
        let (graph, ids) = loop_graph();
        let out = degree_out(graph.as_ref(), ids["E"]).unwrap();
        assert_eq!(out.row(0).unwrap().as_u64("degree"), Some(3));
        let inn = degree_in(graph.as_ref(), ids["E"]).unwrap();
        assert_eq!(inn.row(0).unwrap().as_u64("degree"), Some(2));
    }

    #[test]
    fn test_degree_missing_node() {
        let (graph, _) = loop_graph();
        let err = degree(graph.as_ref(), NodeId::new(999)).unwrap_err();
        assert!(matches!(err, ProcedureError::NodeNotFound(_)));
    }

    #[test]
    fn test_eccentricity_reciprocal_of_longest_path() {
        let (graph, ids) = connected_graph();
        let factory = FinderFactory::new();
        let ecc = |label: &str| {
            eccentricity(&graph, &factory, ids[label], GraphMode::Undirected)
                .unwrap()
                .row(0)
                .unwrap()
                .as_f64("eccentricity")
                .unwrap()
        };
        assert!((ecc("A") - 1.0 / 3.0).abs() < 1e-12);
        assert!((ecc("C") - 1.0 / 3.0).abs() < 1e-12);
        assert!((ecc("D") - 1.0 / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_closeness_on_connected_graph() {
        let (graph, ids) = connected_graph();
        let factory = FinderFactory::new();
        let result =
            closeness(&graph, &factory, ids["D"], GraphMode::Undirected, &[]).unwrap();
        // Distances from D: A=1, B=2, C=2, E=1, F=1, G=2 -> sum 9.
        let value = result.row(0).unwrap().as_f64("closeness").unwrap();
        assert!((value - 6.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_closeness_single_node_graph_is_rejected() {
        let mut graph = MemoryGraph::new();
        let only = graph.add_node("A");
        let graph = Arc::new(graph);
        let factory = FinderFactory::new();
        let err =
            closeness(&graph, &factory, only, GraphMode::Undirected, &[]).unwrap_err();
        assert!(matches!(err, ProcedureError::EmptyGraph));
    }

    #[test]
    fn test_betweenness_path_graph() {
        // Path X - Y - Z: every shortest X..Z path crosses Y.
        let mut graph = MemoryGraph::new();
        let x = graph.add_node("X");
        let y = graph.add_node("Y");
        let z = graph.add_node("Z");
        graph.add_edge(x, y).unwrap();
        graph.add_edge(y, z).unwrap();
        let graph = Arc::new(graph);
        let factory = FinderFactory::new();

        let result =
            betweenness(&graph, &factory, y, GraphMode::Undirected, false).unwrap();
        assert_eq!(result.row(0).unwrap().as_f64("betweenness"), Some(1.0));

        let endpoints =
            betweenness(&graph, &factory, x, GraphMode::Undirected, false).unwrap();
        assert_eq!(endpoints.row(0).unwrap().as_f64("betweenness"), Some(0.0));

        let normalized =
            betweenness(&graph, &factory, y, GraphMode::Undirected, true).unwrap();
        assert_eq!(normalized.row(0).unwrap().as_f64("betweenness"), Some(1.0));
    }

    fn mnc_graph() -> (Arc<MemoryGraph>, Vec<NodeId>) {
        // 1-2, 1-5, 2-3, 2-5, 3-4, 4-5, 4-6.
        let mut graph = MemoryGraph::new();
        let nodes: Vec<NodeId> = (1..=6).map(|i| graph.add_node(i.to_string())).collect();
        for (from, to) in [(0, 1), (0, 4), (1, 2), (1, 4), (2, 3), (3, 4), (3, 5)] {
            graph.add_edge(nodes[from], nodes[to]).unwrap();
        }
        (Arc::new(graph), nodes)
    }

    #[test]
    fn test_maximum_neighborhood_component() {
        let (graph, nodes) = mnc_graph();
        let result =
            maximum_neighborhood_component(graph.as_ref(), nodes[4], GraphMode::Undirected)
                .unwrap();
        assert_eq!(result.row(0).unwrap().as_u64("mnc"), Some(2));
    }

    #[test]
    fn test_density_of_maximum_neighborhood_component() {
        let (graph, nodes) = mnc_graph();
        let result = density_of_maximum_neighborhood_component(
            graph.as_ref(),
            nodes[4],
            GraphMode::Undirected,
            1.7,
        )
        .unwrap();
        // 1 edge over 2^1.7 nodes.
        let expected = 1.0 / 2f64.powf(1.7);
        let value = result.row(0).unwrap().as_f64("dmnc").unwrap();
        assert!((value - expected).abs() < 1e-12);
    }

    #[test]
    fn test_maximal_clique_centrality() {
        // A-B, A-C, A-E, B-C, B-D, B-F, C-D, C-F, D-F, D-E. A sits in
        // {A,B,C} and {A,E}: mcc = 2! + 1! = 3.
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

        let result = maximal_clique_centrality(&graph, ids["A"]).unwrap();
        assert_eq!(result.row(0).unwrap().as_u64("mcc"), Some(3));
    }
}

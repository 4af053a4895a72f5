use netprox::{GraphMode, MemoryGraph, NodeId, ProcedureArgs, ProcedureError, Registry};
use std::sync::Arc;

/// Graph with a self-loop on E and an isolated G: A-B, B-D, C-B, C-E,
/// D-F, E-D, E-F, E-E.
fn loop_graph() -> (Arc<MemoryGraph>, Vec<NodeId>) {
    let mut graph = MemoryGraph::new();
    let nodes: Vec<NodeId> = ["A", "B", "C", "D", "E", "F", "G"]
        .iter()
        .map(|label| graph.add_node(*label))
        .collect();
    let (a, b, c, d, e, f) = (nodes[0], nodes[1], nodes[2], nodes[3], nodes[4], nodes[5]);
    for (from, to) in [(a, b), (b, d), (c, b), (c, e), (d, f), (e, d), (e, f), (e, e)] {
        graph.add_edge(from, to).unwrap();
    }
    (Arc::new(graph), nodes)
}

#[test]
fn test_directed_distances_through_registry() {
    let (graph, nodes) = loop_graph();
    let registry = Registry::with_builtins();

    // Directed eccentricity from A: longest finite path is A -> B -> D -> F,
    // but C and G stay unreachable, pinning the maximum at the sentinel.
    let result = registry
        .call(
            "analysis.network.centrality.eccentricity",
            &graph,
            &ProcedureArgs::new()
                .with_node(nodes[0])
                .with_mode(GraphMode::Directed),
        )
        .unwrap();
    let value = result.row(0).unwrap().as_f64("eccentricity").unwrap();
    assert!(value > 0.0 && value < 1e-15);
}

#[test]
fn test_degree_vectors_through_registry() {
    let (graph, nodes) = loop_graph();
    let registry = Registry::with_builtins();

    let degree = |node: NodeId| {
        registry
            .call(
                "analysis.network.centrality.degree",
                &graph,
                &ProcedureArgs::new().with_node(node),
            )
            .unwrap()
            .row(0)
            .unwrap()
            .as_u64("degree")
            .unwrap()
    };
    assert_eq!(degree(nodes[4]), 5);
    assert_eq!(degree(nodes[0]), 1);
    assert_eq!(degree(nodes[6]), 0);
}

#[test]
fn test_components_through_registry() {
    let (graph, _) = loop_graph();
    let registry = Registry::with_builtins();

    let result = registry
        .call(
            "analysis.network.traversal.components",
            &graph,
            &ProcedureArgs::new(),
        )
        .unwrap();
    assert_eq!(result.row_count(), 2);

    // The large component carries all eight edges, self-loop included.
    let first = result.row(0).unwrap();
    assert_eq!(first.value("nodes").unwrap().as_array().unwrap().len(), 6);
    assert_eq!(first.value("edges").unwrap().as_array().unwrap().len(), 8);

    let second = result.row(1).unwrap();
    assert_eq!(second.value("nodes").unwrap().as_array().unwrap().len(), 1);
    assert_eq!(second.value("edges").unwrap().as_array().unwrap().len(), 0);
}

#[test]
fn test_mnc_and_dmnc_through_registry() {
    // 1-2, 1-5, 2-3, 2-5, 3-4, 4-5, 4-6, analyzed at node 5.
    let mut graph = MemoryGraph::new();
    let nodes: Vec<NodeId> = (1..=6).map(|i| graph.add_node(i.to_string())).collect();
    for (from, to) in [(0, 1), (0, 4), (1, 2), (1, 4), (2, 3), (3, 4), (3, 5)] {
        graph.add_edge(nodes[from], nodes[to]).unwrap();
    }
    let graph = Arc::new(graph);
    let registry = Registry::with_builtins();

    let mnc = registry
        .call(
            "analysis.network.centrality.mnc",
            &graph,
            &ProcedureArgs::new()
                .with_node(nodes[4])
                .with_mode(GraphMode::Undirected),
        )
        .unwrap();
    assert_eq!(mnc.row(0).unwrap().as_u64("mnc"), Some(2));

    let dmnc = registry
        .call(
            "analysis.network.centrality.dmnc",
            &graph,
            &ProcedureArgs::new()
                .with_node(nodes[4])
                .with_mode(GraphMode::Undirected)
                .with_float(1.7),
        )
        .unwrap();
    let value = dmnc.row(0).unwrap().as_f64("dmnc").unwrap();
    assert!((value - 1.0 / 2f64.powf(1.7)).abs() < 1e-12);
}

#[test]
fn test_proximity_measures_through_registry() {
    let mut graph = MemoryGraph::new();
    let t1 = graph.add_node("Target");
    let p1 = graph.add_node("Protein");
    let p2 = graph.add_node("Protein");
    let t2 = graph.add_node("Target");
    graph.add_edge(t1, p1).unwrap();
    graph.add_edge(p1, p2).unwrap();
    graph.add_edge(p2, t2).unwrap();
    let graph = Arc::new(graph);
    let registry = Registry::with_builtins();

    let args = ProcedureArgs::new()
        .with_str("Target")
        .with_str("Protein")
        .with_mode(GraphMode::Undirected);

    let closest = registry
        .call("analysis.network.proximity.closest", &graph, &args)
        .unwrap();
    assert_eq!(closest.row(0).unwrap().as_f64("d_c"), Some(1.0));

    let shortest = registry
        .call("analysis.network.proximity.shortest", &graph, &args)
        .unwrap();
    assert_eq!(shortest.row(0).unwrap().as_f64("d_s"), Some(1.5));

    let separation = registry
        .call("analysis.network.proximity.separation", &graph, &args)
        .unwrap();
    assert_eq!(separation.row(0).unwrap().as_f64("d_ss"), Some(-1.0));
}

#[test]
fn test_error_propagation_through_registry() {
    let (graph, _) = loop_graph();
    let registry = Registry::with_builtins();

    let err = registry
        .call(
            "analysis.network.centrality.degree",
            &graph,
            &ProcedureArgs::new().with_node(NodeId::new(999)),
        )
        .unwrap_err();
    assert!(matches!(err, ProcedureError::NodeNotFound(_)));
}

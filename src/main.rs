use netprox::{GraphMode, MemoryGraph, NodeId, ProcedureArgs, Registry, ResultSet};
use std::sync::Arc;

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("Netprox v{}", netprox::version());
    println!("=================================");
    println!();

    let graph = Arc::new(sample_interaction_graph());
    let registry = Registry::with_builtins();

    println!("Registered procedures:");
    for definition in registry.procedures() {
        println!("  {} - {}", definition.name(), definition.description());
    }
    println!();

    let degree = registry
        .call(
            "analysis.network.centrality.degree",
            &graph,
            &ProcedureArgs::new().with_node(NodeId::new(2)),
        )
        .expect("degree");
    print_result("degree of node 2", &degree);

    let closeness = registry
        .call(
            "analysis.network.centrality.closeness",
            &graph,
            &ProcedureArgs::new()
                .with_node(NodeId::new(2))
                .with_mode(GraphMode::Undirected),
        )
        .expect("closeness");
    print_result("closeness of node 2", &closeness);

    let proximity = registry
        .call(
            "analysis.network.proximity.closest",
            &graph,
            &ProcedureArgs::new()
                .with_str("Target")
                .with_str("Protein")
                .with_mode(GraphMode::Undirected),
        )
        .expect("closest");
    print_result("closest measure Target -> Protein", &proximity);

    let components = registry
        .call(
            "analysis.network.traversal.components",
            &graph,
            &ProcedureArgs::new(),
        )
        .expect("components");
    print_result("connected components", &components);
}

/// Small drug-target / disease-protein interaction network.
fn sample_interaction_graph() -> MemoryGraph {
    let mut graph = MemoryGraph::new();
    let t1 = graph.add_node("Target");
    let t2 = graph.add_node("Target");
    let p1 = graph.add_node("Protein");
    let p2 = graph.add_node("Protein");
    let p3 = graph.add_node("Protein");
    // isolated protein, keeps the component listing interesting
    graph.add_node("Protein");

    graph.add_edge(t1, p1).expect("edge");
    graph.add_edge(p1, p2).expect("edge");
    graph.add_edge(p2, p3).expect("edge");
    graph.add_edge(p3, t2).expect("edge");
    graph.add_edge(t2, p1).expect("edge");
    graph
}

fn print_result(title: &str, result: &ResultSet) {
    println!("{title}:");
    println!("  columns: {:?}", result.columns());
    for row in result {
        println!("  {}", serde_json::to_string(row).expect("serialize row"));
    }
    println!();
}

//! Graph traversal procedures.

use crate::error::ProcedureResult;
use crate::result::{ResultRow, ResultSet};
use netprox_graph_algorithms::{find_components_undirected, GraphRead, TraversalResult};
use serde_json::Value;

fn component_row(component: &TraversalResult) -> ResultRow {
    let nodes: Vec<Value> = component
        .node_ids
        .iter()
        .map(|id| Value::from(id.as_u64()))
        .collect();
    let edges: Vec<Value> = component
        .edge_ids
        .iter()
        .map(|id| Value::from(id.as_u64()))
        .collect();
    ResultRow::new().with("nodes", nodes).with("edges", edges)
}

/// Lists every connected component of the graph, one row per component,
/// with the member node ids and the component's edge ids.
pub fn components<G: GraphRead>(graph: &G) -> ProcedureResult<ResultSet> {
    let mut result = ResultSet::new(["nodes", "edges"]);
    for component in find_components_undirected(graph) {
        result.add_row(component_row(&component));
    }
    Ok(result)
}

//! Set-to-set proximity measures.
//!
//! These measures score how close one labeled node set (drug targets) sits
//! to another (disease proteins) inside a merged interaction graph. Each
//! public procedure wraps an internal scalar computation so measures can
//! build on each other, the way separation reuses the modified closest
//! measure.

use crate::error::{ProcedureError, ProcedureResult};
use crate::factory::FinderFactory;
use crate::procedures::centrality;
use crate::result::{ResultRow, ResultSet};
use netprox_graph_algorithms::{GraphMode, GraphRead, NodeId};
use std::sync::Arc;

fn labeled_nodes<G: GraphRead>(graph: &G, label: &str) -> ProcedureResult<Vec<NodeId>> {
    let mut ids = graph.node_ids_with_label(label);
    if ids.is_empty() {
        return Err(ProcedureError::EmptyLabelSet(label.to_string()));
    }
    ids.sort_unstable();
    Ok(ids)
}

/// Average distance from each node in the source set to its closest node
/// in the destination set. With `modified`, a node's distance to itself is
/// treated as infinite, so a node cannot be its own closest match when the
/// two sets overlap.
fn closest_value<G: GraphRead>(
    graph: &Arc<G>,
    factory: &FinderFactory<G>,
    label_sources: &str,
    label_destinations: &str,
    mode: GraphMode,
    modified: bool,
) -> ProcedureResult<f64> {
    let sources = labeled_nodes(graph.as_ref(), label_sources)?;
    if graph.node_count_with_label(label_destinations) == 0 {
        return Err(ProcedureError::EmptyLabelSet(label_destinations.to_string()));
    }
    let finder = factory.get(graph, mode);
    let destination_labels = vec![label_destinations.to_string()];

    let mut sum = 0.0;
    for &source in &sources {
        let distances = finder.shortest_distances(source, modified, &destination_labels);
        let minimum = distances
            .values()
            .min()
            .copied()
            .ok_or_else(|| ProcedureError::EmptyLabelSet(label_destinations.to_string()))?;
        sum += minimum as f64;
    }
    Ok(sum / sources.len() as f64)
}

/// Closest measure between a drug-target label and a disease-protein label.
pub fn closest<G: GraphRead>(
    graph: &Arc<G>,
    factory: &FinderFactory<G>,
    label_targets: &str,
    label_proteins: &str,
    mode: GraphMode,
    modified: bool,
) -> ProcedureResult<ResultSet> {
    let value = closest_value(graph, factory, label_targets, label_proteins, mode, modified)?;
    let mut result = ResultSet::new(["d_c"]);
    result.add_row(ResultRow::new().with("d_c", value));
    Ok(result)
}

/// Shortest measure: the average, over all drug targets, of the mean
/// distance to every disease protein.
pub fn shortest<G: GraphRead>(
    graph: &Arc<G>,
    factory: &FinderFactory<G>,
    label_targets: &str,
    label_proteins: &str,
    mode: GraphMode,
) -> ProcedureResult<ResultSet> {
    let targets = labeled_nodes(graph.as_ref(), label_targets)?;
    let protein_count = graph.node_count_with_label(label_proteins);
    if protein_count == 0 {
        return Err(ProcedureError::EmptyLabelSet(label_proteins.to_string()));
    }
    let finder = factory.get(graph, mode);
    let protein_labels = vec![label_proteins.to_string()];

    let mut sum = 0.0;
    for &target in &targets {
        let distances = finder.shortest_distances(target, false, &protein_labels);
        let path_sum: f64 = distances.values().map(|d| *d as f64).sum();
        sum += path_sum / protein_count as f64;
    }
    let value = sum / targets.len() as f64;

    let mut result = ResultSet::new(["d_s"]);
    result.add_row(ResultRow::new().with("d_s", value));
    Ok(result)
}

/// Kernel measure: like the shortest measure but with an exponential
/// penalty on longer paths, aggregated through a log.
pub fn kernel<G: GraphRead>(
    graph: &Arc<G>,
    factory: &FinderFactory<G>,
    label_targets: &str,
    label_proteins: &str,
    mode: GraphMode,
) -> ProcedureResult<ResultSet> {
    let targets = labeled_nodes(graph.as_ref(), label_targets)?;
    let protein_count = graph.node_count_with_label(label_proteins);
    if protein_count == 0 {
        return Err(ProcedureError::EmptyLabelSet(label_proteins.to_string()));
    }
    let finder = factory.get(graph, mode);
    let protein_labels = vec![label_proteins.to_string()];

    let mut sum = 0.0;
    for &target in &targets {
        let distances = finder.shortest_distances(target, false, &protein_labels);
        let mut kernel_sum = 0.0;
        for distance in distances.values() {
            kernel_sum += (1.0 - *distance as f64).exp() / protein_count as f64;
        }
        sum += kernel_sum.ln();
    }
    let value = -sum / targets.len() as f64;

    let mut result = ResultSet::new(["d_k"]);
    result.add_row(ResultRow::new().with("d_k", value));
    Ok(result)
}

/// Separation measure: the dispersion between the two sets minus the mean
/// of their internal modified-closest distances. Negative scores mean the
/// sets overlap topologically.
pub fn separation<G: GraphRead>(
    graph: &Arc<G>,
    factory: &FinderFactory<G>,
    label_targets: &str,
    label_proteins: &str,
    mode: GraphMode,
) -> ProcedureResult<ResultSet> {
    let modified_targets =
        closest_value(graph, factory, label_targets, label_targets, mode, true)?;
    let modified_proteins =
        closest_value(graph, factory, label_proteins, label_proteins, mode, true)?;
    let internal_average = (modified_targets + modified_proteins) / 2.0;

    let targets_to_proteins =
        closest_value(graph, factory, label_targets, label_proteins, mode, false)?;
    let proteins_to_targets =
        closest_value(graph, factory, label_proteins, label_targets, mode, false)?;
    let target_count = graph.node_count_with_label(label_targets) as f64;
    let protein_count = graph.node_count_with_label(label_proteins) as f64;
    let dispersion = (target_count * proteins_to_targets + protein_count * targets_to_proteins)
        / (target_count + protein_count);

    let mut result = ResultSet::new(["d_ss"]);
    result.add_row(ResultRow::new().with("d_ss", dispersion - internal_average));
    Ok(result)
}

/// Centre measure: the average distance from all drug targets to the
/// topological centre of the disease module, i.e. the disease protein with
/// the highest closeness inside the module. Closeness for centre selection
/// is always computed on the undirected graph; ties fall to the smallest
/// node id.
pub fn centre<G: GraphRead>(
    graph: &Arc<G>,
    factory: &FinderFactory<G>,
    label_targets: &str,
    label_proteins: &str,
    mode: GraphMode,
) -> ProcedureResult<ResultSet> {
    let proteins = labeled_nodes(graph.as_ref(), label_proteins)?;
    let protein_labels = vec![label_proteins.to_string()];

    let mut centre_node = None;
    let mut best_closeness = f64::NEG_INFINITY;
    for &protein in &proteins {
        let value = centrality::closeness_value(
            graph,
            factory,
            protein,
            GraphMode::Undirected,
            &protein_labels,
        )?;
        if value > best_closeness {
            best_closeness = value;
            centre_node = Some(protein);
        }
    }
    let centre_node = centre_node.ok_or_else(|| {
        ProcedureError::EmptyLabelSet(label_proteins.to_string())
    })?;

    let targets = labeled_nodes(graph.as_ref(), label_targets)?;
    let finder = factory.get(graph, mode);
    let mut sum = 0.0;
    for &target in &targets {
        sum += finder.shortest_path(centre_node, target).distance_to(target) as f64;
    }
    let value = sum / targets.len() as f64;

    let mut result = ResultSet::new(["d_cc"]);
    result.add_row(ResultRow::new().with("d_cc", value));
    Ok(result)
}

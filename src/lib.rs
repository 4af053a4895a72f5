//! Netprox
//!
//! Network-topology analysis procedures for biomedical graph data.
//!
//! The workspace splits into two layers:
//! - `netprox-graph-algorithms`: the pure engine (orientation-aware BFS
//!   and components, cached Dijkstra variants, maximal clique search).
//! - this crate: named analysis procedures over those algorithms, exposed
//!   through a [`registry::Registry`] with typed arguments and tabular
//!   [`result::ResultSet`] answers.
//!
//! Procedures cover node centrality (degree, closeness, eccentricity,
//! betweenness, MNC, DMNC, MCC), drug-disease proximity (closest,
//! shortest, kernel, separation, centre) and component discovery.

pub mod error;
pub mod factory;
pub mod procedures;
pub mod registry;
pub mod result;

pub use error::{ProcedureError, ProcedureResult};
pub use factory::FinderFactory;
pub use registry::{ArgValue, ProcedureArgs, ProcedureDefinition, Registry};
pub use result::{ResultRow, ResultSet};

// Re-export the engine so callers need a single dependency.
pub use netprox_graph_algorithms as algorithms;
pub use netprox_graph_algorithms::{GraphMode, GraphRead, MemoryGraph, NodeId};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

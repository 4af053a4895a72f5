//! Named procedure registry.
//!
//! Procedures are registered up front in an explicit table mapping a
//! dotted path like `analysis.network.centrality.degree` to a typed
//! handler closure. Callers pass positional [`ProcedureArgs`]; handlers
//! pull arguments out with the typed getters and fail with a descriptive
//! error when a value is missing or of the wrong kind.

use crate::error::{ProcedureError, ProcedureResult};
use crate::factory::FinderFactory;
use crate::procedures::{centrality, proximity, traversal};
use crate::result::ResultSet;
use netprox_graph_algorithms::{GraphMode, MemoryGraph, NodeId};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// A single positional procedure argument.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Node(NodeId),
    Str(String),
    Mode(GraphMode),
    Bool(bool),
    Float(f64),
    Labels(Vec<String>),
}

impl ArgValue {
    fn kind(&self) -> &'static str {
        match self {
            ArgValue::Node(_) => "node id",
            ArgValue::Str(_) => "string",
            ArgValue::Mode(_) => "graph mode",
            ArgValue::Bool(_) => "boolean",
            ArgValue::Float(_) => "float",
            ArgValue::Labels(_) => "label list",
        }
    }
}

/// Positional argument list with typed accessors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcedureArgs {
    values: Vec<ArgValue>,
}

impl ProcedureArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node(mut self, node: NodeId) -> Self {
        self.values.push(ArgValue::Node(node));
        self
    }

    pub fn with_str(mut self, value: impl Into<String>) -> Self {
        self.values.push(ArgValue::Str(value.into()));
        self
    }

    pub fn with_mode(mut self, mode: GraphMode) -> Self {
        self.values.push(ArgValue::Mode(mode));
        self
    }

    pub fn with_bool(mut self, value: bool) -> Self {
        self.values.push(ArgValue::Bool(value));
        self
    }

    pub fn with_float(mut self, value: f64) -> Self {
        self.values.push(ArgValue::Float(value));
        self
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.values.push(ArgValue::Labels(labels));
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn wrong_kind(name: &'static str, found: &ArgValue, expected: &str) -> ProcedureError {
        ProcedureError::InvalidArgument {
            name,
            message: format!("expected {expected}, got {}", found.kind()),
        }
    }

    pub fn node(&self, index: usize, name: &'static str) -> ProcedureResult<NodeId> {
        match self.values.get(index) {
            Some(ArgValue::Node(id)) => Ok(*id),
            Some(other) => Err(Self::wrong_kind(name, other, "node id")),
            None => Err(ProcedureError::MissingArgument(name)),
        }
    }

    pub fn string(&self, index: usize, name: &'static str) -> ProcedureResult<&str> {
        match self.values.get(index) {
            Some(ArgValue::Str(value)) => Ok(value),
            Some(other) => Err(Self::wrong_kind(name, other, "string")),
            None => Err(ProcedureError::MissingArgument(name)),
        }
    }

    /// Graph mode argument; a string like "directed" is accepted too.
    pub fn mode(&self, index: usize, name: &'static str) -> ProcedureResult<GraphMode> {
        match self.values.get(index) {
            Some(ArgValue::Mode(mode)) => Ok(*mode),
            Some(ArgValue::Str(value)) => {
                value
                    .parse()
                    .map_err(|message| ProcedureError::InvalidArgument { name, message })
            }
            Some(other) => Err(Self::wrong_kind(name, other, "graph mode")),
            None => Err(ProcedureError::MissingArgument(name)),
        }
    }

    pub fn boolean(&self, index: usize, name: &'static str) -> ProcedureResult<bool> {
        match self.values.get(index) {
            Some(ArgValue::Bool(value)) => Ok(*value),
            Some(other) => Err(Self::wrong_kind(name, other, "boolean")),
            None => Err(ProcedureError::MissingArgument(name)),
        }
    }

    pub fn float(&self, index: usize, name: &'static str) -> ProcedureResult<f64> {
        match self.values.get(index) {
            Some(ArgValue::Float(value)) => Ok(*value),
            Some(other) => Err(Self::wrong_kind(name, other, "float")),
            None => Err(ProcedureError::MissingArgument(name)),
        }
    }

    /// Trailing label filter; absent means no filter.
    pub fn labels_or_default(&self, index: usize, name: &'static str) -> ProcedureResult<Vec<String>> {
        match self.values.get(index) {
            Some(ArgValue::Labels(labels)) => Ok(labels.clone()),
            Some(ArgValue::Str(label)) => Ok(vec![label.clone()]),
            Some(other) => Err(Self::wrong_kind(name, other, "label list")),
            None => Ok(Vec::new()),
        }
    }

    /// Trailing boolean flag; absent means `false`.
    pub fn flag_or_default(&self, index: usize, name: &'static str) -> ProcedureResult<bool> {
        match self.values.get(index) {
            Some(ArgValue::Bool(value)) => Ok(*value),
            Some(other) => Err(Self::wrong_kind(name, other, "boolean")),
            None => Ok(false),
        }
    }
}

type Handler = Box<
    dyn Fn(&Arc<MemoryGraph>, &FinderFactory<MemoryGraph>, &ProcedureArgs) -> ProcedureResult<ResultSet>
        + Send
        + Sync,
>;

/// A registered procedure: dotted name, human description, handler.
pub struct ProcedureDefinition {
    name: &'static str,
    description: &'static str,
    handler: Handler,
}

impl ProcedureDefinition {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }
}

/// Lookup table from procedure names to handlers. The registry owns the
/// finder factory, so every procedure invoked through it shares cached
/// shortest-path results per graph.
pub struct Registry {
    procedures: FxHashMap<&'static str, ProcedureDefinition>,
    factory: FinderFactory<MemoryGraph>,
}

impl Registry {
    /// Builds a registry with every built-in procedure registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self {
            procedures: FxHashMap::default(),
            factory: FinderFactory::new(),
        };
        registry.register_builtins();
        info!(procedures = registry.procedures.len(), "registry initialized");
        registry
    }

    fn register(&mut self, name: &'static str, description: &'static str, handler: Handler) {
        if self.procedures.contains_key(name) {
            warn!(name, "procedure already registered, ignoring");
            return;
        }
        self.procedures.insert(
            name,
            ProcedureDefinition {
                name,
                description,
                handler,
            },
        );
    }

    fn register_builtins(&mut self) {
        self.register(
            "analysis.network.centrality.degree",
            "Calculates the degree of a graph node",
            Box::new(|graph, _, args| centrality::degree(graph.as_ref(), args.node(0, "node")?)),
        );
        self.register(
            "analysis.network.centrality.degree.in",
            "Calculates the in degree of a graph node",
            Box::new(|graph, _, args| centrality::degree_in(graph.as_ref(), args.node(0, "node")?)),
        );
        self.register(
            "analysis.network.centrality.degree.out",
            "Calculates the out degree of a graph node",
            Box::new(|graph, _, args| {
                centrality::degree_out(graph.as_ref(), args.node(0, "node")?)
            }),
        );
        self.register(
            "analysis.network.centrality.closeness",
            "Calculates the closeness of a graph node",
            Box::new(|graph, factory, args| {
                centrality::closeness(
                    graph,
                    factory,
                    args.node(0, "node")?,
                    args.mode(1, "mode")?,
                    &args.labels_or_default(2, "labels")?,
                )
            }),
        );
        self.register(
            "analysis.network.centrality.eccentricity",
            "Calculates the eccentricity of a node",
            Box::new(|graph, factory, args| {
                centrality::eccentricity(graph, factory, args.node(0, "node")?, args.mode(1, "mode")?)
            }),
        );
        self.register(
            "analysis.network.centrality.betweenness",
            "Calculates betweenness centrality for a given node",
            Box::new(|graph, factory, args| {
                centrality::betweenness(
                    graph,
                    factory,
                    args.node(0, "node")?,
                    args.mode(1, "mode")?,
                    args.flag_or_default(2, "normalized")?,
                )
            }),
        );
        self.register(
            "analysis.network.centrality.mnc",
            "Calculates the maximum neighborhood component for a node",
            Box::new(|graph, _, args| {
                centrality::maximum_neighborhood_component(
                    graph.as_ref(),
                    args.node(0, "node")?,
                    args.mode(1, "mode")?,
                )
            }),
        );
        self.register(
            "analysis.network.centrality.dmnc",
            "Calculates the density of the maximum neighborhood component for a node",
            Box::new(|graph, _, args| {
                centrality::density_of_maximum_neighborhood_component(
                    graph.as_ref(),
                    args.node(0, "node")?,
                    args.mode(1, "mode")?,
                    args.float(2, "epsilon")?,
                )
            }),
        );
        self.register(
            "analysis.network.centrality.mcc",
            "Calculates the maximal clique centrality of a given node",
            Box::new(|graph, _, args| {
                centrality::maximal_clique_centrality(graph.as_ref(), args.node(0, "node")?)
            }),
        );
        self.register(
            "analysis.network.proximity.closest",
            "Calculates the Closest measure for a drug target set and a disease protein set",
            Box::new(|graph, factory, args| {
                proximity::closest(
                    graph,
                    factory,
                    args.string(0, "label_targets")?,
                    args.string(1, "label_proteins")?,
                    args.mode(2, "mode")?,
                    args.flag_or_default(3, "modified")?,
                )
            }),
        );
        self.register(
            "analysis.network.proximity.shortest",
            "Calculates the Shortest measure for a drug target set and a disease protein set",
            Box::new(|graph, factory, args| {
                proximity::shortest(
                    graph,
                    factory,
                    args.string(0, "label_targets")?,
                    args.string(1, "label_proteins")?,
                    args.mode(2, "mode")?,
                )
            }),
        );
        self.register(
            "analysis.network.proximity.kernel",
            "Calculates the Kernel measure for a drug target set and a disease protein set",
            Box::new(|graph, factory, args| {
                proximity::kernel(
                    graph,
                    factory,
                    args.string(0, "label_targets")?,
                    args.string(1, "label_proteins")?,
                    args.mode(2, "mode")?,
                )
            }),
        );
        self.register(
            "analysis.network.proximity.separation",
            "Calculates the Separation measure for a drug target set and a disease protein set",
            Box::new(|graph, factory, args| {
                proximity::separation(
                    graph,
                    factory,
                    args.string(0, "label_targets")?,
                    args.string(1, "label_proteins")?,
                    args.mode(2, "mode")?,
                )
            }),
        );
        self.register(
            "analysis.network.proximity.centre",
            "Calculates the Centre measure for a drug target set and a disease protein set",
            Box::new(|graph, factory, args| {
                proximity::centre(
                    graph,
                    factory,
                    args.string(0, "label_targets")?,
                    args.string(1, "label_proteins")?,
                    args.mode(2, "mode")?,
                )
            }),
        );
        self.register(
            "analysis.network.traversal.components",
            "Finds all components in a given graph",
            Box::new(|graph, _, _| traversal::components(graph.as_ref())),
        );
    }

    /// Invokes a procedure by name.
    pub fn call(
        &self,
        name: &str,
        graph: &Arc<MemoryGraph>,
        args: &ProcedureArgs,
    ) -> ProcedureResult<ResultSet> {
        let definition = self
            .procedures
            .get(name)
            .ok_or_else(|| ProcedureError::UnknownProcedure(name.to_string()))?;
        (definition.handler)(graph, &self.factory, args)
    }

    pub fn procedure(&self, name: &str) -> Option<&ProcedureDefinition> {
        self.procedures.get(name)
    }

    /// All registered procedures, sorted by name.
    pub fn procedures(&self) -> Vec<&ProcedureDefinition> {
        let mut all: Vec<&ProcedureDefinition> = self.procedures.values().collect();
        all.sort_by_key(|definition| definition.name);
        all
    }
}

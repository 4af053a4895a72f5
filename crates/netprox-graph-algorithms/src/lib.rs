pub mod cliques;
pub mod graph;
pub mod shortest_path;
pub mod traversal;
pub mod types;

pub use cliques::CliqueFinder;
pub use graph::{neighbors, GraphError, GraphRead, GraphResult, MemoryGraph};
pub use shortest_path::{
    count_paths_through_node, path_passes_through_node, AllShortestPaths, DijkstraResult,
    ShortestPathFinder,
};
pub use traversal::{
    breadth_first_search, find_components_undirected, find_components_undirected_from,
    maximum_connected_component, open_neighborhood_subgraph, TraversalResult,
};
pub use types::{
    Distance, DistanceEntry, EdgeId, EdgeRef, GraphMode, NodeId, NodePair, INFINITE_DISTANCE,
    NO_PREDECESSOR,
};

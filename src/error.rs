use thiserror::Error;

/// Errors reported by graph construction and the graph algorithms.
///
/// Disconnection, missing paths and negative cycles are ordinary outcomes of
/// graph analysis; callers are expected to match on them and report each one
/// distinctly.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// A referenced vertex is not part of the graph.
    #[error("unknown vertex: {0}")]
    UnknownVertex(String),

    /// The algorithm needs at least one vertex.
    #[error("graph has no vertices")]
    NoVertices,

    /// A spanning tree was requested on a multi-vertex graph without edges.
    #[error("graph has no edges")]
    NoEdges,

    /// The graph has more than one connected component, so no spanning tree
    /// exists.
    #[error("graph is disconnected: spanning forest has {selected} of {required} edges")]
    Disconnected { selected: usize, required: usize },

    /// No route connects the two vertices.
    #[error("no path from {origin} to {destination}")]
    NoPath { origin: String, destination: String },

    /// A cycle with negative total weight is reachable from the origin.
    #[error("negative cycle detected")]
    NegativeCycle,

    /// A disjoint-set operation referenced an element it was not built with.
    #[error("element {0} is not registered in the disjoint set")]
    InvalidVertexSet(String),

    /// A directed-graph vertex index is outside `0..len`.
    #[error("vertex index {index} out of range for graph of {len} vertices")]
    IndexOutOfRange { index: usize, len: usize },

    /// Edge weights must not be NaN; undirected weights must not be negative.
    #[error("invalid edge weight {0}")]
    InvalidWeight(f64),

    /// A graph description file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GraphError>;

impl From<std::io::Error> for GraphError {
    fn from(err: std::io::Error) -> Self {
        GraphError::Config(err.to_string())
    }
}

impl From<serde_yaml::Error> for GraphError {
    fn from(err: serde_yaml::Error) -> Self {
        GraphError::Config(err.to_string())
    }
}

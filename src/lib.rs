pub mod algorithms;
pub mod config;
pub mod error;
pub mod types;
pub mod util;

pub use algorithms::analysis::{DegreeProfile, GraphStats, MstSavings};
pub use algorithms::bellman_ford::{BellmanFordOutcome, BellmanFordResult};
pub use algorithms::bfs::PathResult;
pub use algorithms::mst::{MstResult, WEIGHT_EPSILON};
pub use algorithms::union_find::DisjointSet;
pub use config::{GraphFile, GraphKind};
pub use error::{GraphError, Result};
pub use types::{DirectedEdge, DirectedWeightedGraph, Graph, VertexLabel, WeightedEdge};

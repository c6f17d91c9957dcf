use crate::algorithms::mst::MstResult;
use crate::types::graph_query::GraphQuery;
use crate::types::{Graph, VertexLabel};

/// Degree figures of any graph model.
#[derive(Debug, Clone, PartialEq)]
pub struct DegreeProfile<T> {
    /// Mean number of neighbors per vertex; 0 for an empty graph.
    pub average_degree: f64,
    /// Vertex with the most neighbors (first in enumeration order wins ties).
    pub busiest_vertex: Option<(T, usize)>,
}

impl<T> DegreeProfile<T> {
    /// Computes the profile from neighbor lists, so both the undirected and
    /// the directed model (where the degree is the out-degree) are supported.
    pub fn of<G>(graph: &G) -> Self
    where
        G: GraphQuery<T>,
    {
        let vertices = graph.vertex_list();
        let mut degree_sum = 0usize;
        let mut busiest: Option<(T, usize)> = None;
        let vertex_count = vertices.len();
        for vertex in vertices {
            let degree = graph.read_neighbor(&vertex).len();
            degree_sum += degree;
            if busiest.as_ref().map_or(true, |(_, best)| degree > *best) {
                busiest = Some((vertex, degree));
            }
        }
        let average_degree = if vertex_count == 0 {
            0.0
        } else {
            degree_sum as f64 / vertex_count as f64
        };
        Self {
            average_degree,
            busiest_vertex: busiest,
        }
    }
}

/// Summary statistics of an undirected graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphStats<V> {
    pub vertex_count: usize,
    /// Undirected edges; arcs are not counted.
    pub edge_count: usize,
    pub total_weight: f64,
    /// Mean number of adjacency entries per vertex.
    pub average_degree: f64,
    /// Vertex with the most adjacency entries (first inserted wins ties).
    pub busiest_vertex: Option<(V, usize)>,
    pub component_count: usize,
    pub has_cycle: bool,
}

impl<V> GraphStats<V>
where
    V: VertexLabel,
{
    /// Collects the statistics of `graph`.
    ///
    /// # Arguments
    ///
    /// * `graph` - The graph to analyse.
    ///
    /// # Returns
    ///
    /// * `GraphStats` - Counts, degree figures, component count and cycle flag.
    pub fn collect(graph: &Graph<V>) -> Self {
        let degrees = DegreeProfile::of(graph);
        Self {
            vertex_count: graph.vertex_count(),
            edge_count: graph.edge_count(),
            total_weight: graph.total_weight(),
            average_degree: degrees.average_degree,
            busiest_vertex: degrees.busiest_vertex,
            component_count: graph.components().len(),
            has_cycle: graph.has_cycle(),
        }
    }
}

/// How much a spanning tree saves compared with keeping every edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MstSavings {
    /// Weight of all undirected edges.
    pub network_weight: f64,
    pub tree_weight: f64,
    pub saved: f64,
    /// `saved` as a percentage of `network_weight`; 0 for a weightless graph.
    pub saved_percent: f64,
}

impl MstSavings {
    pub fn compute<V: VertexLabel>(graph: &Graph<V>, mst: &MstResult<V>) -> Self {
        let network_weight = graph.total_weight();
        let saved = network_weight - mst.total_weight;
        let saved_percent = if network_weight > 0.0 {
            saved / network_weight * 100.0
        } else {
            0.0
        };
        Self {
            network_weight,
            tree_weight: mst.total_weight,
            saved,
            saved_percent,
        }
    }
}

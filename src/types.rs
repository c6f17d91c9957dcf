use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::error::{GraphError, Result};
use crate::types::graph_query::GraphQuery;

pub mod graph_query;

/// Marker trait for anything usable as a vertex label in [`Graph`].
///
/// Strings and integers both qualify.
pub trait VertexLabel: Clone + Eq + Hash + Debug {}

impl<T> VertexLabel for T where T: Clone + Eq + Hash + Debug {}

/// A weighted undirected edge as handed back to callers.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedEdge<V> {
    pub source: V,
    pub target: V,
    pub weight: f64,
}

/// Index-based edge record kept by [`Graph`] in insertion order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EdgeRecord {
    pub(crate) source: usize,
    pub(crate) target: usize,
    pub(crate) weight: f64,
}

/// Weighted undirected graph over labeled vertices.
///
/// Vertices are stored in insertion order and addressed internally by their
/// position; `index` maps each label back to that position. Every undirected
/// edge is kept once in `edges` (the list the spanning tree algorithms work
/// on) and twice in `adjacency`, once per direction. Arcs added with
/// [`Graph::add_arc`] only extend the adjacency of their source.
#[derive(Debug, Clone)]
pub struct Graph<V = String> {
    /// Vertex labels, in insertion order.
    vertices: Vec<V>,

    /// Label -> position in `vertices`.
    index: FxHashMap<V, usize>,

    /// For each vertex, `(neighbor, weight)` pairs in insertion order.
    adjacency: Vec<Vec<(usize, f64)>>,

    /// Undirected edges, in insertion order.
    edges: Vec<EdgeRecord>,

    /// Number of one-directional arcs.
    arc_count: usize,
}

impl<V> Default for Graph<V> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            index: FxHashMap::default(),
            adjacency: Vec::new(),
            edges: Vec::new(),
            arc_count: 0,
        }
    }
}

impl<V> Graph<V>
where
    V: VertexLabel,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex and returns its position. Re-adding a label is a no-op
    /// that returns the existing position.
    pub fn add_vertex(&mut self, label: impl Into<V>) -> usize {
        let label = label.into();
        if let Some(&position) = self.index.get(&label) {
            return position;
        }
        let position = self.vertices.len();
        trace!(vertex = ?label, position, "vertex added");
        self.index.insert(label.clone(), position);
        self.vertices.push(label);
        self.adjacency.push(Vec::new());
        position
    }

    /// Adds an undirected weighted edge, creating missing endpoints.
    ///
    /// Parallel edges are kept. Negative and non-finite weights are rejected.
    pub fn add_edge(&mut self, a: impl Into<V>, b: impl Into<V>, weight: f64) -> Result<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight(weight));
        }
        let source = self.add_vertex(a);
        let target = self.add_vertex(b);
        self.adjacency[source].push((target, weight));
        if source != target {
            self.adjacency[target].push((source, weight));
        }
        self.edges.push(EdgeRecord { source, target, weight });
        Ok(())
    }

    /// Adds a one-directional adjacency `a -> b`, creating missing endpoints.
    ///
    /// Arcs take part in traversals and cycle detection but not in spanning
    /// tree construction.
    pub fn add_arc(&mut self, a: impl Into<V>, b: impl Into<V>, weight: f64) -> Result<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight(weight));
        }
        let source = self.add_vertex(a);
        let target = self.add_vertex(b);
        self.adjacency[source].push((target, weight));
        self.arc_count += 1;
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of undirected edges (arcs excluded).
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arc_count
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex labels in insertion order.
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn contains<Q>(&self, label: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(label)
    }

    /// Undirected edges in insertion order.
    pub fn edges(&self) -> Vec<WeightedEdge<V>> {
        self.edges.iter().map(|edge| self.materialize(edge)).collect()
    }

    /// Sum of all undirected edge weights.
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|edge| edge.weight).sum()
    }

    /// Number of adjacency entries of a vertex.
    pub fn degree<Q>(&self, label: &Q) -> Result<usize>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let position = self.position(label)?;
        Ok(self.adjacency[position].len())
    }

    /// Resolves a label to its position, failing with `UnknownVertex`.
    pub(crate) fn position<Q>(&self, label: &Q) -> Result<usize>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| GraphError::UnknownVertex(format!("{:?}", label)))
    }

    pub(crate) fn label(&self, position: usize) -> &V {
        &self.vertices[position]
    }

    pub(crate) fn labels(&self, positions: &[usize]) -> Vec<V> {
        positions.iter().map(|&p| self.vertices[p].clone()).collect()
    }

    pub(crate) fn neighbors(&self, position: usize) -> &[(usize, f64)] {
        &self.adjacency[position]
    }

    pub(crate) fn edge_records(&self) -> &[EdgeRecord] {
        &self.edges
    }

    pub(crate) fn materialize(&self, edge: &EdgeRecord) -> WeightedEdge<V> {
        WeightedEdge {
            source: self.vertices[edge.source].clone(),
            target: self.vertices[edge.target].clone(),
            weight: edge.weight,
        }
    }
}

impl<V> GraphQuery<V> for Graph<V>
where
    V: VertexLabel,
{
    fn read_neighbor(&self, vertex_id: &V) -> Vec<V> {
        match self.index.get(vertex_id) {
            Some(&position) => self.adjacency[position]
                .iter()
                .map(|&(neighbor, _)| self.vertices[neighbor].clone())
                .collect(),
            None => vec![],
        }
    }

    fn has_vertex(&self, vertex_id: &V) -> bool {
        self.index.contains_key(vertex_id)
    }

    fn has_edge(&self, src_id: &V, dst_id: &V) -> bool {
        match (self.index.get(src_id), self.index.get(dst_id)) {
            (Some(&src), Some(&dst)) => self.adjacency[src].iter().any(|&(n, _)| n == dst),
            _ => false,
        }
    }

    fn vertex_list(&self) -> Vec<V> {
        self.vertices.clone()
    }
}

/// A directed weighted edge `source -> target`. The weight may be negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectedEdge {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

/// Fixed-size directed weighted graph over vertex indices `0..N`.
///
/// The vertex set is declared at construction. Each index can carry an
/// optional display label. `edges` is the relaxation list used by
/// Bellman-Ford; `adjacency` mirrors it per source vertex for neighbor queries.
#[derive(Debug, Clone)]
pub struct DirectedWeightedGraph {
    labels: Vec<Option<String>>,
    edges: Vec<DirectedEdge>,
    adjacency: Vec<Vec<(usize, f64)>>,
}

impl DirectedWeightedGraph {
    /// Creates a graph with `vertex_count` vertices and no edges.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            labels: vec![None; vertex_count],
            edges: Vec::new(),
            adjacency: vec![Vec::new(); vertex_count],
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[DirectedEdge] {
        &self.edges
    }

    /// Attaches a display label to a vertex index.
    pub fn set_label(&mut self, index: usize, label: impl Into<String>) -> Result<()> {
        self.check_index(index)?;
        self.labels[index] = Some(label.into());
        Ok(())
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).and_then(|label| label.as_deref())
    }

    /// The label of a vertex, or `vertex <index>` when it has none.
    pub fn display_name(&self, index: usize) -> String {
        match self.label(index) {
            Some(label) => label.to_string(),
            None => format!("vertex {}", index),
        }
    }

    /// Finds the index carrying `label`.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l.as_deref() == Some(label))
    }

    /// Adds a directed edge. Both indices must be below the declared size and
    /// the weight, which may be negative, must be finite.
    pub fn add_edge(&mut self, source: usize, target: usize, weight: f64) -> Result<()> {
        self.check_index(source)?;
        self.check_index(target)?;
        if !weight.is_finite() {
            return Err(GraphError::InvalidWeight(weight));
        }
        self.edges.push(DirectedEdge { source, target, weight });
        self.adjacency[source].push((target, weight));
        Ok(())
    }

    /// Outgoing `(target, weight)` pairs of a vertex.
    pub fn out_edges(&self, index: usize) -> Result<&[(usize, f64)]> {
        self.check_index(index)?;
        Ok(&self.adjacency[index])
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.labels.len() {
            return Err(GraphError::IndexOutOfRange {
                index,
                len: self.labels.len(),
            });
        }
        Ok(())
    }
}

impl GraphQuery<usize> for DirectedWeightedGraph {
    fn read_neighbor(&self, vertex_id: &usize) -> Vec<usize> {
        match self.adjacency.get(*vertex_id) {
            Some(out) => out.iter().map(|&(target, _)| target).collect(),
            None => vec![],
        }
    }

    fn has_vertex(&self, vertex_id: &usize) -> bool {
        *vertex_id < self.labels.len()
    }

    fn has_edge(&self, src_id: &usize, dst_id: &usize) -> bool {
        self.adjacency
            .get(*src_id)
            .map_or(false, |out| out.iter().any(|&(target, _)| target == *dst_id))
    }

    fn vertex_list(&self) -> Vec<usize> {
        (0..self.labels.len()).collect()
    }
}

#[cfg(test)]
mod test_types {
    use crate::error::GraphError;
    use crate::types::graph_query::GraphQuery;
    use crate::types::{DirectedWeightedGraph, Graph};

    #[test]
    fn test_add_edge_creates_endpoints() {
        let mut graph: Graph = Graph::new();
        graph.add_edge("X", "Y", 3.0).unwrap();

        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.has_edge(&"X".to_string(), &"Y".to_string()));
        assert!(graph.has_edge(&"Y".to_string(), &"X".to_string()));
    }

    #[test]
    fn test_add_vertex_is_idempotent() {
        let mut graph: Graph = Graph::new();
        let first = graph.add_vertex("A");
        let second = graph.add_vertex("A");

        assert_eq!(first, second);
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn test_parallel_edges_are_kept() {
        let mut graph: Graph = Graph::new();
        graph.add_edge("A", "B", 1.0).unwrap();
        graph.add_edge("A", "B", 2.0).unwrap();

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.degree("A").unwrap(), 2);
        assert_eq!(graph.read_neighbor(&"A".to_string()), vec!["B", "B"]);
    }

    #[test]
    fn test_arc_is_one_directional() {
        let mut graph: Graph = Graph::new();
        graph.add_arc("A", "B", 1.0).unwrap();

        assert!(graph.has_edge(&"A".to_string(), &"B".to_string()));
        assert!(!graph.has_edge(&"B".to_string(), &"A".to_string()));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.arc_count(), 1);
    }

    #[test]
    fn test_rejects_bad_weights() {
        let mut graph: Graph = Graph::new();
        assert_eq!(
            graph.add_edge("A", "B", -1.0),
            Err(GraphError::InvalidWeight(-1.0))
        );
        assert!(graph.add_edge("A", "B", f64::NAN).is_err());
        assert_eq!(
            graph.add_edge("A", "B", f64::INFINITY),
            Err(GraphError::InvalidWeight(f64::INFINITY))
        );
        assert!(graph.add_arc("A", "B", f64::INFINITY).is_err());
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.arc_count(), 0);
    }

    #[test]
    fn test_directed_rejects_non_finite_weights() {
        let mut graph = DirectedWeightedGraph::new(3);
        assert_eq!(
            graph.add_edge(0, 1, f64::NEG_INFINITY),
            Err(GraphError::InvalidWeight(f64::NEG_INFINITY))
        );
        assert!(graph.add_edge(1, 2, f64::INFINITY).is_err());
        assert!(graph.add_edge(1, 2, f64::NAN).is_err());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_integer_labels() {
        let mut graph: Graph<u32> = Graph::new();
        graph.add_edge(1u32, 2u32, 0.5).unwrap();
        assert!(graph.contains(&1u32));
        assert_eq!(graph.vertex_list(), vec![1, 2]);
    }

    #[test]
    fn test_directed_index_checks() {
        let mut graph = DirectedWeightedGraph::new(3);
        graph.add_edge(0, 2, -4.0).unwrap();

        assert_eq!(
            graph.add_edge(0, 3, 1.0),
            Err(GraphError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert!(graph.has_edge(&0, &2));
        assert!(!graph.has_edge(&2, &0));
        assert_eq!(graph.out_edges(0).unwrap(), &[(2, -4.0)]);
    }

    #[test]
    fn test_directed_labels() {
        let mut graph = DirectedWeightedGraph::new(2);
        graph.set_label(0, "Recife").unwrap();

        assert_eq!(graph.index_of("Recife"), Some(0));
        assert_eq!(graph.display_name(0), "Recife");
        assert_eq!(graph.display_name(1), "vertex 1");
        assert!(graph.set_label(5, "Natal").is_err());
    }
}

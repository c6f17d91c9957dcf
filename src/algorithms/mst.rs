//! Minimum spanning trees over the undirected [`Graph`]: Kruskal and Prim.

use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

use crate::algorithms::union_find::DisjointSet;
use crate::error::{GraphError, Result};
use crate::types::{Graph, VertexLabel, WeightedEdge};

/// Tolerance used when comparing spanning tree weights.
pub const WEIGHT_EPSILON: f64 = 1e-9;

/// Result of a minimum spanning tree computation.
#[derive(Debug, Clone, PartialEq)]
pub struct MstResult<V> {
    /// Selected edges, in the order the algorithm picked them.
    pub edges: Vec<WeightedEdge<V>>,
    /// Sum of the selected edge weights.
    pub total_weight: f64,
}

impl<V> MstResult<V> {
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether two trees have the same total weight, within [`WEIGHT_EPSILON`].
    /// Identical totals always match, even when they are not finite.
    pub fn same_weight_as(&self, other: &MstResult<V>) -> bool {
        self.total_weight == other.total_weight
            || (self.total_weight - other.total_weight).abs() <= WEIGHT_EPSILON
    }
}

impl<V> Graph<V>
where
    V: VertexLabel,
{
    /// Kruskal's algorithm.
    ///
    /// Edges are stably sorted by weight, so equal weights keep their
    /// insertion order, and accepted greedily unless their endpoints are
    /// already connected. Stops once `V - 1` edges are selected.
    ///
    /// # Errors
    /// * `NoVertices` on an empty graph
    /// * `NoEdges` when there are several vertices but no edges
    /// * `Disconnected` when fewer than `V - 1` edges could be selected
    pub fn kruskal(&self) -> Result<MstResult<V>> {
        let vertex_count = self.vertex_count();
        if vertex_count == 0 {
            return Err(GraphError::NoVertices);
        }
        if self.edge_count() == 0 && vertex_count > 1 {
            return Err(GraphError::NoEdges);
        }

        let mut sorted = self.edge_records().to_vec();
        sorted.sort_by(|a, b| a.weight.total_cmp(&b.weight));

        let mut components = DisjointSet::new(0..vertex_count);
        let mut edges = Vec::with_capacity(vertex_count - 1);
        let mut total_weight = 0.0;
        let mut skipped = 0usize;

        for edge in &sorted {
            if edges.len() == vertex_count - 1 {
                break;
            }
            if components.connected(&edge.source, &edge.target)? {
                skipped += 1;
                continue;
            }
            components.union(&edge.source, &edge.target)?;
            total_weight += edge.weight;
            debug!(
                source = ?self.label(edge.source),
                target = ?self.label(edge.target),
                weight = edge.weight,
                "kruskal selected edge"
            );
            edges.push(self.materialize(edge));
        }

        if edges.len() != vertex_count - 1 {
            return Err(GraphError::Disconnected {
                selected: edges.len(),
                required: vertex_count - 1,
            });
        }

        debug!(
            edges = edges.len(),
            total_weight,
            cycles_avoided = skipped,
            "kruskal finished"
        );
        Ok(MstResult { edges, total_weight })
    }

    /// Prim's algorithm, growing the tree from `start`.
    ///
    /// `None` starts from the first vertex in insertion order. Each round
    /// scans the tree vertices in the order they joined, and their adjacency
    /// lists in insertion order, for the lightest edge leaving the tree; the
    /// first edge found wins ties.
    ///
    /// # Errors
    /// * `NoVertices` on an empty graph
    /// * `UnknownVertex` when `start` is not in the graph
    /// * `Disconnected` when some vertices cannot be reached from `start`
    pub fn prim<Q>(&self, start: Option<&Q>) -> Result<MstResult<V>>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let vertex_count = self.vertex_count();
        if vertex_count == 0 {
            return Err(GraphError::NoVertices);
        }
        let root = match start {
            Some(label) => self.position(label)?,
            None => 0,
        };

        // Undirected adjacency only; arcs never join the tree.
        let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); vertex_count];
        for edge in self.edge_records() {
            adjacency[edge.source].push((edge.target, edge.weight));
            if edge.source != edge.target {
                adjacency[edge.target].push((edge.source, edge.weight));
            }
        }

        let mut in_tree = vec![false; vertex_count];
        in_tree[root] = true;
        let mut frontier = vec![root];
        let mut edges = Vec::with_capacity(vertex_count - 1);
        let mut total_weight = 0.0;

        while frontier.len() < vertex_count {
            let mut best: Option<(usize, usize, f64)> = None;
            for &tree_vertex in &frontier {
                for &(neighbor, weight) in &adjacency[tree_vertex] {
                    if in_tree[neighbor] {
                        continue;
                    }
                    if best.map_or(true, |(_, _, best_weight)| weight < best_weight) {
                        best = Some((tree_vertex, neighbor, weight));
                    }
                }
            }

            let Some((source, target, weight)) = best else {
                return Err(GraphError::Disconnected {
                    selected: edges.len(),
                    required: vertex_count - 1,
                });
            };

            debug!(
                step = frontier.len(),
                source = ?self.label(source),
                target = ?self.label(target),
                weight,
                "prim selected edge"
            );
            in_tree[target] = true;
            frontier.push(target);
            total_weight += weight;
            edges.push(WeightedEdge {
                source: self.label(source).clone(),
                target: self.label(target).clone(),
                weight,
            });
        }

        debug!(edges = edges.len(), total_weight, "prim finished");
        Ok(MstResult { edges, total_weight })
    }
}

#[cfg(test)]
mod test_mst {
    use crate::algorithms::mst::{MstResult, WEIGHT_EPSILON};
    use crate::algorithms::union_find::DisjointSet;
    use crate::error::GraphError;
    use crate::types::Graph;

    fn ring_with_chord() -> Graph {
        let mut graph = Graph::new();
        graph.add_edge("A", "B", 1.0).unwrap();
        graph.add_edge("B", "C", 2.0).unwrap();
        graph.add_edge("C", "D", 3.0).unwrap();
        graph.add_edge("D", "A", 4.0).unwrap();
        graph.add_edge("A", "C", 5.0).unwrap();
        graph
    }

    #[test]
    fn test_kruskal_ring() {
        let graph = ring_with_chord();
        let mst = graph.kruskal().unwrap();

        let weights: Vec<f64> = mst.edges.iter().map(|e| e.weight).collect();
        assert_eq!(weights, vec![1.0, 2.0, 3.0]);
        assert!((mst.total_weight - 6.0).abs() < WEIGHT_EPSILON);
    }

    #[test]
    fn test_prim_ring_from_every_start() {
        let graph = ring_with_chord();
        for start in ["A", "B", "C", "D"] {
            let mst = graph.prim(Some(start)).unwrap();
            assert_eq!(mst.edge_count(), 3);
            assert!((mst.total_weight - 6.0).abs() < WEIGHT_EPSILON, "start {start}");
        }
    }

    #[test]
    fn test_triangle_picks_two_edges() {
        let mut graph: Graph = Graph::new();
        graph.add_edge("A", "B", 1.0).unwrap();
        graph.add_edge("B", "C", 1.0).unwrap();
        graph.add_edge("C", "A", 1.0).unwrap();

        let mst = graph.kruskal().unwrap();
        assert_eq!(mst.edge_count(), 2);
        assert_eq!(mst.total_weight, 2.0);
        // stable sort: the first two inserted edges win
        assert_eq!(mst.edges[0].source, "A");
        assert_eq!(mst.edges[1].source, "B");
    }

    #[test]
    fn test_kruskal_result_is_acyclic() {
        let graph = ring_with_chord();
        let mst = graph.kruskal().unwrap();

        let mut check = DisjointSet::new(graph.vertices().iter().cloned());
        for edge in &mst.edges {
            assert!(check.union(&edge.source, &edge.target).unwrap());
        }
        assert_eq!(check.set_count(), 1);
    }

    #[test]
    fn test_parallel_edges_and_self_loop() {
        let mut graph: Graph = Graph::new();
        graph.add_edge("A", "A", 0.0).unwrap();
        graph.add_edge("A", "B", 7.0).unwrap();
        graph.add_edge("A", "B", 2.0).unwrap();
        graph.add_edge("B", "C", 3.0).unwrap();

        let kruskal = graph.kruskal().unwrap();
        let prim = graph.prim::<str>(None).unwrap();
        assert_eq!(kruskal.total_weight, 5.0);
        assert!(kruskal.same_weight_as(&prim));
        assert!(kruskal.edges.iter().all(|e| e.source != e.target));
    }

    #[test]
    fn test_errors() {
        let empty: Graph = Graph::new();
        assert_eq!(empty.kruskal(), Err(GraphError::NoVertices));
        assert_eq!(empty.prim::<str>(None), Err(GraphError::NoVertices));

        let mut isolated: Graph = Graph::new();
        isolated.add_vertex("A");
        isolated.add_vertex("B");
        assert_eq!(isolated.kruskal(), Err(GraphError::NoEdges));

        let mut split: Graph = Graph::new();
        split.add_edge("A", "B", 1.0).unwrap();
        split.add_edge("C", "D", 1.0).unwrap();
        assert_eq!(
            split.kruskal(),
            Err(GraphError::Disconnected { selected: 2, required: 3 })
        );
        assert_eq!(
            split.prim(Some("A")),
            Err(GraphError::Disconnected { selected: 1, required: 3 })
        );
        assert!(matches!(
            split.prim(Some("Z")),
            Err(GraphError::UnknownVertex(_))
        ));
    }

    #[test]
    fn test_single_vertex() {
        let mut graph: Graph = Graph::new();
        graph.add_vertex("A");
        assert_eq!(graph.kruskal().unwrap().edge_count(), 0);
        assert_eq!(graph.prim(Some("A")).unwrap().total_weight, 0.0);
    }

    #[test]
    fn test_prim_tie_break_order() {
        let mut graph: Graph = Graph::new();
        graph.add_edge("A", "B", 1.0).unwrap();
        graph.add_edge("A", "C", 1.0).unwrap();
        graph.add_edge("B", "D", 1.0).unwrap();
        graph.add_edge("C", "D", 1.0).unwrap();
        graph.add_edge("B", "C", 1.0).unwrap();

        fn pairs(mst: &MstResult<String>) -> Vec<(&str, &str)> {
            mst.edges
                .iter()
                .map(|e| (e.source.as_str(), e.target.as_str()))
                .collect()
        }

        // A's adjacency is scanned in insertion order, then B's once it joins
        let from_a = graph.prim(Some("A")).unwrap();
        assert_eq!(pairs(&from_a), vec![("A", "B"), ("A", "C"), ("B", "D")]);

        // D joined first, so its edge to C beats B's equally light edge to A
        let from_d = graph.prim(Some("D")).unwrap();
        assert_eq!(pairs(&from_d), vec![("D", "B"), ("D", "C"), ("B", "A")]);
    }

    #[test]
    fn test_infinite_weights_rejected_and_totals_compare() {
        let mut graph: Graph = Graph::new();
        graph.add_edge("A", "B", 1.0).unwrap();
        assert_eq!(
            graph.add_edge("B", "C", f64::INFINITY),
            Err(GraphError::InvalidWeight(f64::INFINITY))
        );
        assert_eq!(graph.vertex_count(), 2);

        let unbounded = MstResult::<String> {
            edges: Vec::new(),
            total_weight: f64::INFINITY,
        };
        assert!(unbounded.same_weight_as(&unbounded.clone()));
        let finite = graph.kruskal().unwrap();
        assert!(!finite.same_weight_as(&unbounded));
    }

    #[test]
    fn test_prim_ignores_arcs() {
        let mut graph: Graph = Graph::new();
        graph.add_edge("A", "B", 5.0).unwrap();
        graph.add_arc("A", "B", 1.0).unwrap();

        let mst = graph.prim(Some("A")).unwrap();
        assert_eq!(mst.total_weight, 5.0);
    }
}

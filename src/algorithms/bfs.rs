use std::borrow::Borrow;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::error::{GraphError, Result};
use crate::types::{Graph, VertexLabel};

/// A route between two vertices, counted in edges.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult<V> {
    /// Vertices from origin to destination, both inclusive.
    pub path: Vec<V>,
    /// Number of edges on the path (`path.len() - 1`).
    pub distance: usize,
}

impl<V> PathResult<V> {
    fn new(path: Vec<V>) -> Self {
        let distance = path.len().saturating_sub(1);
        Self { path, distance }
    }
}

impl<V> Graph<V>
where
    V: VertexLabel,
{
    /// Finds the shortest path (fewest edges) between two vertices using
    /// Breadth-First Search (BFS).
    ///
    /// BFS explores the graph layer by layer from `origin`; a vertex's
    /// predecessor is fixed when it is first discovered, which is always from
    /// the closest layer, so the reconstructed path is minimal.
    ///
    /// # Arguments
    /// - `origin`: The label of the source vertex.
    /// - `destination`: The label of the target vertex.
    ///
    /// # Returns
    /// The path and its length in edges. `origin == destination` yields the
    /// one-vertex path with distance 0.
    ///
    /// # Errors
    /// - `UnknownVertex` if either endpoint is missing.
    /// - `NoPath` if `destination` is not reachable from `origin`.
    pub fn shortest_path<Q>(&self, origin: &Q, destination: &Q) -> Result<PathResult<V>>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let src = self.position(origin)?;
        let dst = self.position(destination)?;

        if src == dst {
            return Ok(PathResult::new(vec![self.label(src).clone()]));
        }

        // Queue to hold vertices to explore in BFS order
        let mut queue = VecDeque::new();
        // Visited flags, so no vertex is enqueued twice
        let mut visited = vec![false; self.vertex_count()];
        // Predecessor of each discovered vertex, for path reconstruction
        let mut predecessor = FxHashMap::default();

        queue.push_back(src);
        visited[src] = true;

        while let Some(current) = queue.pop_front() {
            if current == dst {
                let path = self.reconstruct_path(&predecessor, src, dst);
                debug!(
                    origin = ?origin,
                    destination = ?destination,
                    distance = path.len() - 1,
                    "bfs reached destination"
                );
                return Ok(PathResult::new(self.labels(&path)));
            }

            for &(neighbor, _) in self.neighbors(current) {
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    predecessor.insert(neighbor, current);
                    queue.push_back(neighbor);
                    trace!(from = ?self.label(current), to = ?self.label(neighbor), "bfs discovered");
                }
            }
        }

        Err(GraphError::NoPath {
            origin: format!("{:?}", origin),
            destination: format!("{:?}", destination),
        })
    }

    /// Hop count of every vertex reachable from `origin`, in discovery order.
    ///
    /// `origin` itself comes first with distance 0.
    pub fn distances_from<Q>(&self, origin: &Q) -> Result<Vec<(V, usize)>>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let src = self.position(origin)?;
        let mut layer = vec![None; self.vertex_count()];
        let mut queue = VecDeque::new();
        let mut result = Vec::new();

        layer[src] = Some(0usize);
        queue.push_back(src);

        while let Some(current) = queue.pop_front() {
            let depth = layer[current].unwrap_or_default();
            result.push((self.label(current).clone(), depth));

            for &(neighbor, _) in self.neighbors(current) {
                if layer[neighbor].is_none() {
                    layer[neighbor] = Some(depth + 1);
                    queue.push_back(neighbor);
                }
            }
        }
        Ok(result)
    }

    /// Walks the predecessor map back from `dst` to `src` and reverses it.
    fn reconstruct_path(
        &self,
        predecessor: &FxHashMap<usize, usize>,
        src: usize,
        dst: usize,
    ) -> Vec<usize> {
        let mut path = vec![dst];
        let mut current = dst;

        while current != src {
            match predecessor.get(&current) {
                Some(&pred) => {
                    current = pred;
                    path.push(current);
                }
                None => break,
            }
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod test_bfs {
    use crate::error::GraphError;
    use crate::types::Graph;

    /// A-B, A-C, B-D, B-E, C-E, C-F, E-G, F-G
    fn diamond() -> Graph {
        let mut graph = Graph::new();
        for (a, b) in [
            ("A", "B"),
            ("A", "C"),
            ("B", "D"),
            ("B", "E"),
            ("C", "E"),
            ("C", "F"),
            ("E", "G"),
            ("F", "G"),
        ] {
            graph.add_edge(a, b, 1.0).unwrap();
        }
        graph
    }

    #[test]
    fn test_diamond_distance() {
        let graph = diamond();
        let result = graph.shortest_path("A", "G").unwrap();

        assert_eq!(result.distance, 3);
        assert_eq!(result.path.len(), 4);
        assert_eq!(result.path, vec!["A", "B", "E", "G"]);
    }

    #[test]
    fn test_same_vertex() {
        let graph = diamond();
        let result = graph.shortest_path("D", "D").unwrap();
        assert_eq!(result.path, vec!["D"]);
        assert_eq!(result.distance, 0);
    }

    #[test]
    fn test_path_is_symmetric_in_length() {
        let graph = diamond();
        let forward = graph.shortest_path("D", "F").unwrap();
        let backward = graph.shortest_path("F", "D").unwrap();
        assert_eq!(forward.distance, backward.distance);
        assert_eq!(forward.distance, 4);
    }

    #[test]
    fn test_disconnected_pair() {
        let mut graph = diamond();
        graph.add_edge("X", "Y", 1.0).unwrap();

        assert!(matches!(
            graph.shortest_path("A", "Y"),
            Err(GraphError::NoPath { .. })
        ));
    }

    #[test]
    fn test_unknown_vertex() {
        let graph = diamond();
        assert_eq!(
            graph.shortest_path("A", "Atlantis"),
            Err(GraphError::UnknownVertex("\"Atlantis\"".to_string()))
        );
    }

    #[test]
    fn test_distances_from() {
        let graph = diamond();
        let layers = graph.distances_from("A").unwrap();

        assert_eq!(layers.len(), 7);
        assert_eq!(layers[0], ("A".to_string(), 0));
        let g = layers.iter().find(|(v, _)| v == "G").unwrap();
        assert_eq!(g.1, 3);
    }
}

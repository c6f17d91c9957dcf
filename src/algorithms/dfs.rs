//! Depth-first traversal, connected components, DFS path finding and cycle
//! detection over the undirected [`Graph`].
//!
//! Nothing here recurses. The "recursive" visitation order is reproduced with
//! an explicit stack of frames, each frame remembering how far through its
//! vertex's adjacency list the walk has got.

use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::error::{GraphError, Result};
use crate::types::{Graph, VertexLabel};

/// One level of an emulated recursive call.
struct Frame {
    vertex: usize,
    /// Next position in the vertex's adjacency list.
    next: usize,
    /// Vertex this frame was entered from.
    parent: Option<usize>,
}

impl Frame {
    fn new(vertex: usize, parent: Option<usize>) -> Self {
        Self {
            vertex,
            next: 0,
            parent,
        }
    }
}

impl<V> Graph<V>
where
    V: VertexLabel,
{
    /// Pre-order depth-first traversal of the component containing `start`.
    ///
    /// Neighbors are followed in adjacency order, exactly as a recursive DFS
    /// would.
    pub fn depth_first<Q>(&self, start: &Q) -> Result<Vec<V>>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let root = self.position(start)?;
        let mut visited = vec![false; self.vertex_count()];
        let order = self.walk_component(root, &mut visited);
        debug!(start = ?start, visited = order.len(), "dfs traversal finished");
        Ok(self.labels(&order))
    }

    /// Stack-based depth-first traversal of the component containing `start`.
    ///
    /// Unvisited neighbors are pushed in reverse adjacency order, so popping
    /// them yields the same order as [`Graph::depth_first`].
    pub fn depth_first_iterative<Q>(&self, start: &Q) -> Result<Vec<V>>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let root = self.position(start)?;
        let mut visited = vec![false; self.vertex_count()];
        let mut order = Vec::new();
        let mut stack = vec![root];

        while let Some(current) = stack.pop() {
            if visited[current] {
                continue;
            }
            visited[current] = true;
            order.push(current);

            for &(neighbor, _) in self.neighbors(current).iter().rev() {
                if !visited[neighbor] {
                    stack.push(neighbor);
                }
            }
        }
        Ok(self.labels(&order))
    }

    /// Every connected component, as the traversal order of its vertices.
    ///
    /// Vertices are tried in insertion order; each one not yet visited seeds
    /// a new component.
    pub fn components(&self) -> Vec<Vec<V>> {
        let mut visited = vec![false; self.vertex_count()];
        let mut components = Vec::new();

        for vertex in 0..self.vertex_count() {
            if visited[vertex] {
                continue;
            }
            let order = self.walk_component(vertex, &mut visited);
            trace!(seed = ?self.label(vertex), size = order.len(), "component found");
            components.push(self.labels(&order));
        }
        debug!(count = components.len(), "components enumerated");
        components
    }

    /// Finds *a* path between two vertices by depth-first search with
    /// backtracking. Not necessarily the shortest one.
    ///
    /// # Errors
    /// - `UnknownVertex` if either endpoint is missing.
    /// - `NoPath` if no route exists.
    pub fn find_path<Q>(&self, origin: &Q, destination: &Q) -> Result<Vec<V>>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let src = self.position(origin)?;
        let dst = self.position(destination)?;

        let mut visited = vec![false; self.vertex_count()];
        // The frames on the stack are exactly the current working path.
        let mut stack = vec![Frame::new(src, None)];
        visited[src] = true;

        while let Some(frame) = stack.last_mut() {
            if frame.vertex == dst {
                let path: Vec<usize> = stack.iter().map(|f| f.vertex).collect();
                debug!(length = path.len(), "dfs path found");
                return Ok(self.labels(&path));
            }

            let adjacency = self.neighbors(frame.vertex);
            if frame.next < adjacency.len() {
                let (neighbor, _) = adjacency[frame.next];
                frame.next += 1;
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    let parent = frame.vertex;
                    stack.push(Frame::new(neighbor, Some(parent)));
                }
            } else {
                // dead end: backtrack
                stack.pop();
            }
        }

        Err(GraphError::NoPath {
            origin: format!("{:?}", origin),
            destination: format!("{:?}", destination),
        })
    }

    /// Whether the graph contains a cycle.
    ///
    /// A neighbor that is already on the current DFS stack closes a cycle,
    /// unless it is the vertex we just came from: undirected edges are stored
    /// in both directions, so that back-step is the edge itself.
    pub fn has_cycle(&self) -> bool {
        let n = self.vertex_count();
        let mut visited = vec![false; n];
        let mut on_stack = vec![false; n];

        for seed in 0..n {
            if visited[seed] {
                continue;
            }
            visited[seed] = true;
            on_stack[seed] = true;
            let mut stack = vec![Frame::new(seed, None)];

            while let Some(frame) = stack.last_mut() {
                let adjacency = self.neighbors(frame.vertex);
                if frame.next >= adjacency.len() {
                    on_stack[frame.vertex] = false;
                    stack.pop();
                    continue;
                }

                let (neighbor, _) = adjacency[frame.next];
                frame.next += 1;
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    on_stack[neighbor] = true;
                    let parent = frame.vertex;
                    stack.push(Frame::new(neighbor, Some(parent)));
                } else if on_stack[neighbor] && frame.parent != Some(neighbor) {
                    debug!(
                        at = ?self.label(frame.vertex),
                        closes = ?self.label(neighbor),
                        "cycle detected"
                    );
                    return true;
                }
            }
        }
        false
    }

    /// Recursive-order pre-order walk from `root`, marking `visited`.
    fn walk_component(&self, root: usize, visited: &mut [bool]) -> Vec<usize> {
        let mut order = vec![root];
        visited[root] = true;
        let mut stack = vec![Frame::new(root, None)];

        while let Some(frame) = stack.last_mut() {
            let adjacency = self.neighbors(frame.vertex);
            if frame.next >= adjacency.len() {
                stack.pop();
                continue;
            }
            let (neighbor, _) = adjacency[frame.next];
            frame.next += 1;
            if !visited[neighbor] {
                visited[neighbor] = true;
                order.push(neighbor);
                let parent = frame.vertex;
                stack.push(Frame::new(neighbor, Some(parent)));
            }
        }
        order
    }
}

#[cfg(test)]
mod test_dfs {
    use crate::error::GraphError;
    use crate::types::Graph;

    /// A-B, A-C, B-D, C-E, D-F
    fn small_tree() -> Graph {
        let mut graph = Graph::new();
        graph.add_edge("A", "B", 1.0).unwrap();
        graph.add_edge("A", "C", 1.0).unwrap();
        graph.add_edge("B", "D", 1.0).unwrap();
        graph.add_edge("C", "E", 1.0).unwrap();
        graph.add_edge("D", "F", 1.0).unwrap();
        graph
    }

    #[test]
    fn test_traversal_order() {
        let graph = small_tree();
        let order = graph.depth_first("A").unwrap();
        assert_eq!(order, vec!["A", "B", "D", "F", "C", "E"]);
    }

    #[test]
    fn test_iterative_matches_recursive_order() {
        let mut graph = small_tree();
        // extra cross edges make the orders sensitive to push order
        graph.add_edge("F", "C", 1.0).unwrap();
        graph.add_edge("E", "B", 1.0).unwrap();

        for start in ["A", "C", "F"] {
            assert_eq!(
                graph.depth_first(start).unwrap(),
                graph.depth_first_iterative(start).unwrap(),
                "start {start}"
            );
        }
    }

    #[test]
    fn test_traversal_visits_each_vertex_once() {
        let graph = small_tree();
        let mut order = graph.depth_first_iterative("C").unwrap();
        assert_eq!(order.len(), 6);
        order.sort();
        order.dedup();
        assert_eq!(order.len(), 6);
    }

    #[test]
    fn test_components() {
        let mut graph = small_tree();
        graph.add_edge("X", "Y", 1.0).unwrap();
        graph.add_vertex("Z");

        let components = graph.components();
        assert_eq!(components.len(), 3);
        assert_eq!(components[0].len(), 6);
        assert_eq!(components[1], vec!["X", "Y"]);
        assert_eq!(components[2], vec!["Z"]);
    }

    #[test]
    fn test_find_path() {
        let graph = small_tree();
        let path = graph.find_path("A", "F").unwrap();
        assert_eq!(path, vec!["A", "B", "D", "F"]);

        // backtracks out of the B branch before trying C
        let path = graph.find_path("A", "E").unwrap();
        assert_eq!(path, vec!["A", "C", "E"]);

        assert_eq!(graph.find_path("E", "E").unwrap(), vec!["E"]);
    }

    #[test]
    fn test_find_path_missing() {
        let mut graph = small_tree();
        graph.add_arc("X", "Y", 1.0).unwrap();
        graph.add_vertex("Z");

        assert!(matches!(
            graph.find_path("A", "Z"),
            Err(GraphError::NoPath { .. })
        ));
        assert!(graph.find_path("X", "Y").is_ok());
        assert!(graph.find_path("Y", "X").is_err());
        assert!(matches!(
            graph.find_path("A", "Q"),
            Err(GraphError::UnknownVertex(_))
        ));
    }

    #[test]
    fn test_cycle_in_ring() {
        let mut graph: Graph = Graph::new();
        graph.add_edge("A", "B", 1.0).unwrap();
        graph.add_edge("B", "C", 1.0).unwrap();
        graph.add_edge("C", "A", 1.0).unwrap();
        assert!(graph.has_cycle());
    }

    #[test]
    fn test_no_cycle_in_one_directional_tree() {
        let mut graph: Graph = Graph::new();
        graph.add_arc("A", "B", 1.0).unwrap();
        graph.add_arc("A", "C", 1.0).unwrap();
        graph.add_arc("B", "D", 1.0).unwrap();
        assert!(!graph.has_cycle());
    }

    #[test]
    fn test_no_cycle_in_undirected_tree() {
        assert!(!small_tree().has_cycle());
    }

    #[test]
    fn test_cycle_in_second_component() {
        let mut graph = small_tree();
        graph.add_edge("P", "Q", 1.0).unwrap();
        graph.add_edge("Q", "R", 1.0).unwrap();
        graph.add_edge("R", "P", 1.0).unwrap();
        assert!(graph.has_cycle());
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let mut graph: Graph<u32> = Graph::new();
        for i in 0..200_000u32 {
            graph.add_edge(i, i + 1, 1.0).unwrap();
        }
        assert_eq!(graph.depth_first(&0u32).unwrap().len(), 200_001);
        assert_eq!(graph.find_path(&0u32, &200_000u32).unwrap().len(), 200_001);
        assert!(!graph.has_cycle());
    }
}

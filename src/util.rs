use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::types::Graph;

/// Generates a connected undirected graph with random integral weights.
///
/// Vertices are labelled `v0..v{n-1}`. A random spanning tree is laid down
/// first (each vertex `i > 0` joins a random earlier vertex), then
/// `extra_edges` further edges are added between random pairs, which may
/// produce parallel edges and self-loops.
///
/// # Arguments
/// * `vertex_count` - Number of vertices; 0 yields an empty graph.
/// * `extra_edges` - Edges added on top of the spanning tree.
/// * `max_weight` - Weights are drawn from `1..=max_weight`.
/// * `seed` - Seed of the generator, so a graph can be reproduced.
///
/// # Errors
/// Propagates `InvalidWeight` from [`Graph::add_edge`]; drawn weights are
/// always at least 1, so this does not happen in practice.
///
/// # Example
///
/// let graph = random_connected_graph(10, 15, 100, 42)?;
/// assert_eq!(graph.components().len(), 1);
///
pub fn random_connected_graph(
    vertex_count: usize,
    extra_edges: usize,
    max_weight: u32,
    seed: u64,
) -> Result<Graph> {
    let mut rng = StdRng::seed_from_u64(seed);
    let max_weight = max_weight.max(1);
    let mut graph = Graph::new();

    for i in 0..vertex_count {
        graph.add_vertex(format!("v{}", i));
    }
    if vertex_count == 0 {
        return Ok(graph);
    }

    for i in 1..vertex_count {
        let j = rng.gen_range(0..i);
        let weight = rng.gen_range(1..=max_weight) as f64;
        graph.add_edge(format!("v{}", i), format!("v{}", j), weight)?;
    }
    for _ in 0..extra_edges {
        let a = rng.gen_range(0..vertex_count);
        let b = rng.gen_range(0..vertex_count);
        let weight = rng.gen_range(1..=max_weight) as f64;
        graph.add_edge(format!("v{}", a), format!("v{}", b), weight)?;
    }
    Ok(graph)
}

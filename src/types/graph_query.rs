/// A trait that defines read-only query operations shared by the graph models.
///
/// Both the undirected [`Graph`](crate::types::Graph) and the
/// [`DirectedWeightedGraph`](crate::types::DirectedWeightedGraph) implement it,
/// so helpers that only need adjacency information can work over either.
///
/// # Type Parameters
///
/// * `T` - The vertex identifier type: a label for the undirected model, an
///   index for the directed one.
pub trait GraphQuery<T> {
    /// Retrieves the neighbors of a vertex in adjacency (insertion) order.
    ///
    /// Parallel edges yield the neighbor once per edge. An unknown vertex has
    /// no neighbors.
    fn read_neighbor(&self, vertex_id: &T) -> Vec<T>;

    /// Checks if a vertex exists in the graph.
    fn has_vertex(&self, vertex_id: &T) -> bool;

    /// Determines if `src_id` lists `dst_id` as a neighbor.
    fn has_edge(&self, src_id: &T, dst_id: &T) -> bool;

    /// All vertices in enumeration order.
    fn vertex_list(&self) -> Vec<T>;
}

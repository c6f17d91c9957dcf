pub mod analysis;
pub mod bellman_ford;
pub mod bfs;
pub mod dfs;
pub mod mst;
pub mod union_find;

//! Bellman-Ford single-source shortest paths over [`DirectedWeightedGraph`].
//!
//! Handles negative edge weights and detects negative cycles reachable from
//! the origin.
//!
//! Up to `N - 1` passes relax every edge in insertion order; a pass that
//! changes nothing ends the loop early. One more pass then checks whether any
//! edge could still be relaxed, which only happens when a negative cycle is
//! reachable. Complexity O(N * E).

use std::fmt;

use tracing::debug;

use crate::error::{GraphError, Result};
use crate::types::DirectedWeightedGraph;

/// How a Bellman-Ford run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BellmanFordOutcome {
    /// No edge can be relaxed further; distances are final.
    Converged,
    /// A negative cycle is reachable from the origin; distances are not final.
    NegativeCycle,
}

impl fmt::Display for BellmanFordOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BellmanFordOutcome::Converged => write!(f, "shortest paths computed"),
            BellmanFordOutcome::NegativeCycle => write!(f, "negative cycle detected"),
        }
    }
}

/// Distances and predecessors from one Bellman-Ford run.
#[derive(Debug, Clone, PartialEq)]
pub struct BellmanFordResult {
    pub origin: usize,
    pub outcome: BellmanFordOutcome,
    /// Distance from the origin per vertex; `f64::INFINITY` when unreachable.
    pub distances: Vec<f64>,
    /// Previous vertex on the best known path; `None` for the origin and for
    /// unreachable vertices.
    pub predecessors: Vec<Option<usize>>,
    /// Relaxation passes performed before convergence or the pass limit.
    pub passes: usize,
}

impl BellmanFordResult {
    pub fn success(&self) -> bool {
        self.outcome == BellmanFordOutcome::Converged
    }

    /// Human-readable status of the run.
    pub fn message(&self) -> String {
        self.outcome.to_string()
    }

    /// Turns a run that hit a negative cycle into `Err(NegativeCycle)`.
    pub fn into_result(self) -> Result<Self> {
        match self.outcome {
            BellmanFordOutcome::Converged => Ok(self),
            BellmanFordOutcome::NegativeCycle => Err(GraphError::NegativeCycle),
        }
    }

    /// Reconstructs the best path from the origin to `target`.
    ///
    /// # Errors
    /// - `NegativeCycle` if the run did not converge.
    /// - `IndexOutOfRange` if `target` is not a vertex.
    /// - `NoPath` if `target` is unreachable.
    pub fn path_to(&self, target: usize) -> Result<Vec<usize>> {
        if !self.success() {
            return Err(GraphError::NegativeCycle);
        }
        if target >= self.distances.len() {
            return Err(GraphError::IndexOutOfRange {
                index: target,
                len: self.distances.len(),
            });
        }
        if self.distances[target] == f64::INFINITY {
            return Err(GraphError::NoPath {
                origin: self.origin.to_string(),
                destination: target.to_string(),
            });
        }

        let mut path = vec![target];
        let mut current = target;
        // A converged predecessor chain is acyclic; the bound only guards it.
        while current != self.origin && path.len() <= self.distances.len() {
            match self.predecessors[current] {
                Some(pred) => {
                    current = pred;
                    path.push(current);
                }
                None => break,
            }
        }
        if current != self.origin {
            return Err(GraphError::NoPath {
                origin: self.origin.to_string(),
                destination: target.to_string(),
            });
        }
        path.reverse();
        Ok(path)
    }
}

impl DirectedWeightedGraph {
    /// Single-source shortest paths from `origin`.
    ///
    /// A reachable negative cycle is reported through
    /// [`BellmanFordResult::outcome`], not as an error; in that case the
    /// distances are those of the last completed pass.
    ///
    /// # Errors
    /// `IndexOutOfRange` if `origin` is not a vertex.
    pub fn bellman_ford(&self, origin: usize) -> Result<BellmanFordResult> {
        self.check_index(origin)?;
        let n = self.vertex_count();

        let mut distances = vec![f64::INFINITY; n];
        let mut predecessors = vec![None; n];
        distances[origin] = 0.0;

        let mut passes = 0;
        for pass in 1..n {
            passes = pass;
            let mut changed = false;
            for edge in self.edges() {
                if distances[edge.source] == f64::INFINITY {
                    continue;
                }
                let candidate = distances[edge.source] + edge.weight;
                if candidate < distances[edge.target] {
                    distances[edge.target] = candidate;
                    predecessors[edge.target] = Some(edge.source);
                    changed = true;
                }
            }

            if !changed {
                debug!(pass, "bellman-ford converged");
                break;
            }
            debug!(pass, "bellman-ford pass relaxed edges");
        }

        let negative_cycle = self.edges().iter().any(|edge| {
            distances[edge.source] != f64::INFINITY
                && distances[edge.source] + edge.weight < distances[edge.target]
        });

        let outcome = if negative_cycle {
            BellmanFordOutcome::NegativeCycle
        } else {
            BellmanFordOutcome::Converged
        };
        debug!(origin, passes, %outcome, "bellman-ford finished");

        Ok(BellmanFordResult {
            origin,
            outcome,
            distances,
            predecessors,
            passes,
        })
    }
}

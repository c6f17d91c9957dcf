//! YAML graph description files.
//!
//! ```yaml
//! name: brazil-roads
//! kind: undirected
//! vertices: [A, B, C]
//! edges:
//!   - [A, B, 430]
//!   - { from: B, to: C, weight: 2, one_way: true }
//! ```
//!
//! Vertex labels are strings; quote labels that YAML would read as numbers.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{GraphError, Result};
use crate::types::{DirectedWeightedGraph, Graph};

/// Which graph model a file describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    #[default]
    Undirected,
    Directed,
}

/// One edge line. Either a compact `[from, to]` / `[from, to, weight]`
/// sequence or a mapping with named fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EdgeEntry {
    Weighted(String, String, f64),
    Unweighted(String, String),
    Detailed {
        from: String,
        to: String,
        #[serde(default)]
        weight: Option<f64>,
        #[serde(default)]
        one_way: bool,
    },
}

impl EdgeEntry {
    /// `(from, to, weight, one_way)`; a missing weight counts as 1.
    fn parts(&self) -> (&str, &str, f64, bool) {
        match self {
            EdgeEntry::Weighted(from, to, weight) => (from.as_str(), to.as_str(), *weight, false),
            EdgeEntry::Unweighted(from, to) => (from.as_str(), to.as_str(), 1.0, false),
            EdgeEntry::Detailed {
                from,
                to,
                weight,
                one_way,
            } => (from.as_str(), to.as_str(), weight.unwrap_or(1.0), *one_way),
        }
    }
}

/// A graph description as stored on disk.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphFile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: GraphKind,
    #[serde(default)]
    pub vertices: Vec<String>,
    #[serde(default)]
    pub edges: Vec<EdgeEntry>,
}

impl GraphFile {
    /// Reads and parses a graph file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| GraphError::Config(format!("{}: {}", path.display(), e)))?;
        let file = Self::parse(&text)?;
        info!(
            path = %path.display(),
            kind = ?file.kind,
            vertices = file.vertices.len(),
            edges = file.edges.len(),
            "graph file loaded"
        );
        Ok(file)
    }

    /// Parses a graph description from YAML text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Display name: the declared `name`, or `unnamed`.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }

    /// Builds the undirected model. Listed vertices are added first, in
    /// order, so isolated vertices survive; `one_way` edges become arcs.
    pub fn to_graph(&self) -> Result<Graph> {
        if self.kind != GraphKind::Undirected {
            return Err(GraphError::Config(format!(
                "{} describes a directed graph",
                self.display_name()
            )));
        }
        let mut graph = Graph::new();
        for vertex in &self.vertices {
            graph.add_vertex(vertex.as_str());
        }
        for entry in &self.edges {
            let (from, to, weight, one_way) = entry.parts();
            if one_way {
                graph.add_arc(from, to, weight)?;
            } else {
                graph.add_edge(from, to, weight)?;
            }
        }
        debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            arcs = graph.arc_count(),
            "undirected graph built"
        );
        Ok(graph)
    }

    /// Builds the directed model. The vertex list fixes both the size and the
    /// indices; edge endpoints are looked up by label.
    pub fn to_directed(&self) -> Result<DirectedWeightedGraph> {
        if self.kind != GraphKind::Directed {
            return Err(GraphError::Config(format!(
                "{} describes an undirected graph",
                self.display_name()
            )));
        }
        let mut graph = DirectedWeightedGraph::new(self.vertices.len());
        for (index, label) in self.vertices.iter().enumerate() {
            graph.set_label(index, label.as_str())?;
        }
        for entry in &self.edges {
            let (from, to, weight, _) = entry.parts();
            let source = resolve(&graph, from)?;
            let target = resolve(&graph, to)?;
            graph.add_edge(source, target, weight)?;
        }
        debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "directed graph built"
        );
        Ok(graph)
    }
}

fn resolve(graph: &DirectedWeightedGraph, label: &str) -> Result<usize> {
    graph
        .index_of(label)
        .ok_or_else(|| GraphError::UnknownVertex(label.to_string()))
}

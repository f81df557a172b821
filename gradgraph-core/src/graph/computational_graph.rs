//! The extracted graph and its DOT serialization.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use indexmap::IndexSet;
use tracing::debug;

use super::{DotConfig, DotNode, Edge};
use crate::error::Result;
use crate::vertex::Vertex;

/// An immutable set of edges.
///
/// Edges iterate in the order they were discovered, so rendering the same
/// computation twice gives byte-identical output.
#[derive(Debug, Clone, Default)]
pub struct ComputationalGraph {
    edges: IndexSet<Edge>,
}

impl ComputationalGraph {
    /// Build a graph from edges. Duplicates are dropped.
    pub fn new<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = Edge>,
    {
        Self {
            edges: edges.into_iter().collect(),
        }
    }

    pub(super) fn from_edge_set(edges: IndexSet<Edge>) -> Self {
        Self { edges }
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains(&self, edge: &Edge) -> bool {
        self.edges.contains(edge)
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Distinct edge endpoints, in first-seen order.
    pub fn vertices(&self) -> Vec<&Vertex> {
        let vertices: IndexSet<&Vertex> = self
            .edges
            .iter()
            .flat_map(|edge| [edge.head(), edge.tail()])
            .collect();
        vertices.into_iter().collect()
    }

    /// Render with the default configuration.
    pub fn to_dot(&self) -> String {
        self.render(&DotConfig::default())
    }

    pub fn to_dot_with(&self, config: &DotConfig) -> Result<String> {
        config.validate()?;
        Ok(self.render(config))
    }

    /// Write the DOT text to `writer`.
    pub fn dump<W: Write>(&self, mut writer: W, config: &DotConfig) -> Result<()> {
        let dot = self.to_dot_with(config)?;
        writer.write_all(dot.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Write the DOT text to a file at `path`, replacing it if present.
    pub fn save(&self, path: impl AsRef<Path>, config: &DotConfig) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.dump(BufWriter::new(file), config)?;
        debug!(path = %path.display(), edges = self.len(), "saved computational graph");
        Ok(())
    }

    fn render(&self, config: &DotConfig) -> String {
        use std::fmt::Write as _;

        let mut output = String::with_capacity(32 + self.edges.len() * 96);
        let _ = write!(output, "digraph {}{{", config.graph_name);
        if let Some(rankdir) = &config.rankdir {
            let _ = write!(output, "rankdir={rankdir};");
        }

        for edge in &self.edges {
            let (head, tail) = (edge.head(), edge.tail());
            debug_assert_ne!(head.kind(), tail.kind(), "edge endpoints must alternate kinds");

            let head_node = DotNode::new(head);
            let tail_node = DotNode::new(tail);
            head_node.write_declaration(&mut output, config.style_for(head.kind()));
            tail_node.write_declaration(&mut output, config.style_for(tail.kind()));
            let _ = write!(output, "{} -> {};", head_node.id(), tail_node.id());
        }

        output.push('}');
        output
    }
}

impl FromIterator<Edge> for ComputationalGraph {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for ComputationalGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dot())
    }
}

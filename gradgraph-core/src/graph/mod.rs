//! Computational Graph
//!
//! This module extracts the dependency graph behind one or more output
//! variables and renders it as Graphviz DOT text.
//!
//! # Overview
//!
//! The extracted graph is a bipartite DAG where:
//!
//! - Nodes are [`Variable`]s (rendered as ovals) or [`Function`]s (boxes;
//!   splits are hexagons)
//! - Edges run from an input variable to the function that consumed it, and
//!   from a function to each variable it produced
//!
//! Only edges are stored. The node set is whatever the edges touch.
//!
//! # Example
//!
//! ```rust
//! use gradgraph_core::graph::computational_graph;
//! use gradgraph_core::vertex::{Function, Variable};
//!
//! let a = Variable::named("a");
//! let b = Variable::named("b");
//! let c = Function::new("Add", &[a, b]).output();
//!
//! let graph = computational_graph([&c], false);
//! assert_eq!(graph.len(), 3);
//! println!("{}", graph.to_dot());
//! ```
//!
//! [`Variable`]: crate::vertex::Variable
//! [`Function`]: crate::vertex::Function

mod computational_graph;
mod config;
mod dot;
mod edge;
mod extract;

pub use computational_graph::ComputationalGraph;
pub use config::DotConfig;
pub use dot::{escape_label, DotNode, NodeShape};
pub use edge::Edge;
pub use extract::{computational_graph, GraphExtractor};

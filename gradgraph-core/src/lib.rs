//! Gradgraph Core
//!
//! This crate extracts the computational graph behind the outputs of an
//! automatic-differentiation run and renders it as Graphviz DOT text, for
//! debugging or documenting a network's forward pass.
//!
//! # Architecture
//!
//! - `vertex`: recorded variables and functions, the vertices being walked
//! - `graph`: backward extraction, the resulting edge set, DOT rendering
//! - `error`: the crate error type
//!
//! # Example
//!
//! ```rust
//! use gradgraph_core::{computational_graph, Function, Variable};
//!
//! let x = Variable::named("x");
//! let w = Variable::named("W");
//! let h = Function::new("Linear", &[x, w]).output();
//! let y = Function::new("ReLU", &[h]).output();
//!
//! let graph = computational_graph([&y], false);
//! assert_eq!(graph.len(), 5);
//!
//! let dot = graph.to_dot();
//! assert!(dot.starts_with("digraph graphname{"));
//! ```

pub mod error;
pub mod graph;
pub mod vertex;

pub use error::{GraphError, Result};
pub use graph::{computational_graph, ComputationalGraph, DotConfig, Edge, GraphExtractor};
pub use vertex::{Function, FunctionKind, Variable, Vertex, VertexId, VertexKind};

//! Graph Edges
//!
//! An edge is an ordered `(head, tail)` pair whose endpoints always belong to
//! different vertex kinds:
//!
//! - `(Variable, Function)`: the variable was consumed by the function
//! - `(Function, Variable)`: the function produced the variable

use crate::error::{GraphError, Result};
use crate::vertex::{Function, Variable, Vertex};

/// A directed edge between a variable and a function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    head: Vertex,
    tail: Vertex,
}

impl Edge {
    /// Build an edge from two arbitrary vertices.
    ///
    /// Fails with [`GraphError::KindMismatch`] when both endpoints are of the
    /// same kind. This also rules out self-edges.
    pub fn new(head: impl Into<Vertex>, tail: impl Into<Vertex>) -> Result<Self> {
        let head = head.into();
        let tail = tail.into();
        if head.kind() == tail.kind() {
            return Err(GraphError::KindMismatch {
                head: head.id(),
                tail: tail.id(),
            });
        }
        Ok(Self { head, tail })
    }

    /// `input` was consumed by `function`.
    pub fn consumed(input: &Variable, function: &Function) -> Self {
        Self {
            head: Vertex::Variable(input.clone()),
            tail: Vertex::Function(function.clone()),
        }
    }

    /// `function` produced `output`.
    pub fn produced(function: &Function, output: &Variable) -> Self {
        Self {
            head: Vertex::Function(function.clone()),
            tail: Vertex::Variable(output.clone()),
        }
    }

    pub fn head(&self) -> &Vertex {
        &self.head
    }

    pub fn tail(&self) -> &Vertex {
        &self.tail
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vertex::VertexKind;

    #[test]
    fn new_accepts_alternating_kinds() {
        let a = Variable::leaf();
        let f = Function::new("f", &[a.clone()]);

        let edge = Edge::new(a.clone(), f.clone()).unwrap();
        assert_eq!(edge, Edge::consumed(&a, &f));
        assert_eq!(edge.head().kind(), VertexKind::Variable);
        assert_eq!(edge.tail().kind(), VertexKind::Function);
    }

    #[test]
    fn new_rejects_same_kind() {
        let a = Variable::leaf();
        let b = Variable::leaf();

        let err = Edge::new(a.clone(), b.clone()).unwrap_err();
        match err {
            GraphError::KindMismatch { head, tail } => {
                assert_eq!(head, a.id());
                assert_eq!(tail, b.id());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn new_rejects_self_edge() {
        let f = Function::new("f", &[]);
        assert!(Edge::new(f.clone(), f).is_err());
    }

    #[test]
    fn direction_matters() {
        let a = Variable::leaf();
        let f = Function::new("f", &[a.clone()]);
        let b = f.output();

        assert_ne!(Edge::consumed(&a, &f), Edge::produced(&f, &b));
        assert_ne!(Edge::produced(&f, &b), Edge::new(b.clone(), f.clone()).unwrap());
    }
}

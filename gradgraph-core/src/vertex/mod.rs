//! Vertices of a recorded computation
//!
//! A recorded computation is a bipartite DAG of two vertex kinds:
//!
//! - [`Variable`]: a data-bearing value. It has at most one creator.
//! - [`Function`]: a computation step. It consumes an ordered list of
//!   variables and produces new variables through [`Function::output`].
//!
//! Both kinds are cheap-to-clone shared handles. Equality and hashing are by
//! [`VertexId`] only, never by content: two functions with the same name and
//! the same inputs are still distinct vertices.
//!
//! # Ranks
//!
//! Ranks approximate topological depth and are fixed at creation:
//!
//! - a leaf variable has rank 0
//! - a function has the maximum rank of its inputs (0 without inputs)
//! - an output variable has its creator's rank plus one
//!
//! # Teardown
//!
//! Variables own their creator and functions own their inputs, so dropping
//! the last handle of a long chain would recurse once per level. Both inner
//! types instead hand their links to `release`, which unwinds the chain
//! with a worklist and only dismantles vertices nobody else still holds.

mod function;
mod variable;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

pub use function::{Function, FunctionKind};
pub use variable::Variable;

/// Unique identifier for a vertex.
///
/// Both vertex kinds draw from the same counter, so a variable and a function
/// never share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(u64);

impl VertexId {
    /// Generate a new unique vertex ID.
    pub(crate) fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which side of the bipartite graph a vertex lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexKind {
    Variable,
    Function,
}

/// Any vertex of a recorded computation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Vertex {
    Variable(Variable),
    Function(Function),
}

impl Vertex {
    pub fn id(&self) -> VertexId {
        match self {
            Vertex::Variable(variable) => variable.id(),
            Vertex::Function(function) => function.id(),
        }
    }

    pub fn rank(&self) -> u64 {
        match self {
            Vertex::Variable(variable) => variable.rank(),
            Vertex::Function(function) => function.rank(),
        }
    }

    pub fn kind(&self) -> VertexKind {
        match self {
            Vertex::Variable(_) => VertexKind::Variable,
            Vertex::Function(_) => VertexKind::Function,
        }
    }

    /// True for a function of the [`FunctionKind::Split`] kind.
    pub fn is_split(&self) -> bool {
        matches!(self, Vertex::Function(function) if function.is_split())
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Vertex::Variable(variable) => Some(variable),
            Vertex::Function(_) => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Vertex::Function(function) => Some(function),
            Vertex::Variable(_) => None,
        }
    }
}

impl From<Variable> for Vertex {
    fn from(variable: Variable) -> Self {
        Vertex::Variable(variable)
    }
}

impl From<Function> for Vertex {
    fn from(function: Function) -> Self {
        Vertex::Function(function)
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vertex::Variable(variable) => fmt::Display::fmt(variable, f),
            Vertex::Function(function) => fmt::Display::fmt(function, f),
        }
    }
}

/// Drop `pending` and everything it uniquely owns without recursing.
fn release(mut pending: Vec<Vertex>) {
    while let Some(vertex) = pending.pop() {
        match vertex {
            Vertex::Variable(variable) => {
                pending.extend(variable.into_creator().map(Vertex::Function));
            }
            Vertex::Function(function) => {
                pending.extend(function.into_inputs().into_iter().map(Vertex::Variable));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_ids_are_unique() {
        let id1 = VertexId::next();
        let id2 = VertexId::next();
        assert_ne!(id1, id2);
        assert!(id2 > id1);
    }

    #[test]
    fn ids_are_shared_across_kinds() {
        let a = Variable::leaf();
        let f = Function::new("f", &[a.clone()]);
        assert_ne!(a.id(), f.id());
        assert_ne!(Vertex::from(a), Vertex::from(f));
    }

    #[test]
    fn vertex_dispatch() {
        let a = Variable::leaf();
        let s = Function::split(&a);

        let va = Vertex::from(a.clone());
        let vs = Vertex::from(s.clone());

        assert_eq!(va.kind(), VertexKind::Variable);
        assert_eq!(vs.kind(), VertexKind::Function);
        assert!(!va.is_split());
        assert!(vs.is_split());
        assert_eq!(va.as_variable(), Some(&a));
        assert_eq!(vs.as_function(), Some(&s));
        assert!(va.as_function().is_none());
    }

    #[test]
    fn equality_is_by_identity() {
        let a = Variable::named("x");
        let b = Variable::named("x");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    fn chain(depth: usize) -> (Variable, Variable) {
        let root = Variable::named("x");
        let mut x = root.clone();
        for _ in 0..depth {
            x = Function::new("f", &[x]).output();
        }
        (root, x)
    }

    #[test]
    fn deep_chain_drops_without_overflow() {
        let (root, tip) = chain(100_000);
        assert_eq!(tip.rank(), 100_000);
        drop(tip);
        assert!(root.is_leaf());
    }

    #[test]
    fn teardown_keeps_shared_vertices() {
        let (_, tip) = chain(10);
        let mut middle = tip.clone();
        for _ in 0..5 {
            middle = middle.creator().unwrap().inputs()[0].clone();
        }
        drop(tip);

        assert_eq!(middle.rank(), 5);
        let mut depth = 0;
        let mut current = middle;
        while let Some(creator) = current.creator().cloned() {
            current = creator.inputs()[0].clone();
            depth += 1;
        }
        assert_eq!(depth, 5);
        assert_eq!(current.name().as_deref(), Some("x"));
    }

    #[test]
    fn teardown_handles_fan_in() {
        let a = Variable::named("a");
        let mut x = a.clone();
        for _ in 0..50_000 {
            let split = Function::split(&x);
            x = Function::new("add", &[split.output(), split.output()]).output();
        }
        drop(x);
        assert!(a.is_leaf());
    }
}

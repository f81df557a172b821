//! Function vertices.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use smallvec::SmallVec;

use super::{Variable, Vertex, VertexId};

/// The sub-kind of a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    /// Any function that transforms its inputs.
    Regular,

    /// A fan-out that forwards its single input to several consumers
    /// without computation.
    Split,
}

struct FunctionInner {
    id: VertexId,
    name: String,
    kind: FunctionKind,
    rank: u64,
    inputs: SmallVec<[Variable; 2]>,
}

/// A computation-step vertex.
///
/// Cloning a `Function` clones the handle, not the vertex.
#[derive(Clone)]
pub struct Function {
    inner: Arc<FunctionInner>,
}

impl Function {
    /// Record a regular function consuming `inputs` in order.
    pub fn new(name: impl Into<String>, inputs: &[Variable]) -> Self {
        Self::build(name.into(), FunctionKind::Regular, inputs.iter().cloned().collect())
    }

    /// Record a split of `input`.
    ///
    /// This is the only way to build a [`FunctionKind::Split`], which
    /// guarantees a split always has exactly one input.
    pub fn split(input: &Variable) -> Self {
        let mut inputs = SmallVec::new();
        inputs.push(input.clone());
        Self::build("Split".to_string(), FunctionKind::Split, inputs)
    }

    fn build(name: String, kind: FunctionKind, inputs: SmallVec<[Variable; 2]>) -> Self {
        let rank = inputs.iter().map(Variable::rank).max().unwrap_or(0);
        Self {
            inner: Arc::new(FunctionInner {
                id: VertexId::next(),
                name,
                kind,
                rank,
                inputs,
            }),
        }
    }

    /// Create a new output variable produced by this function.
    ///
    /// May be called repeatedly; each call yields a distinct variable.
    pub fn output(&self) -> Variable {
        Variable::with_creator(self.clone())
    }

    /// Take the inputs out of this vertex if this is its last handle.
    pub(super) fn into_inputs(self) -> SmallVec<[Variable; 2]> {
        Arc::into_inner(self.inner)
            .map(|mut inner| std::mem::take(&mut inner.inputs))
            .unwrap_or_default()
    }

    pub fn id(&self) -> VertexId {
        self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn kind(&self) -> FunctionKind {
        self.inner.kind
    }

    pub fn is_split(&self) -> bool {
        self.inner.kind == FunctionKind::Split
    }

    pub fn rank(&self) -> u64 {
        self.inner.rank
    }

    /// Inputs in the order they were consumed.
    pub fn inputs(&self) -> &[Variable] {
        &self.inner.inputs
    }

    /// The forwarded input of a split. `None` for regular functions.
    pub fn sole_input(&self) -> Option<&Variable> {
        match self.inner.kind {
            FunctionKind::Split => self.inner.inputs.first(),
            FunctionKind::Regular => None,
        }
    }
}

impl Drop for FunctionInner {
    fn drop(&mut self) {
        if !self.inputs.is_empty() {
            let inputs = std::mem::take(&mut self.inputs);
            super::release(inputs.into_iter().map(Vertex::Variable).collect());
        }
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Function {}

impl Hash for Function {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inputs: SmallVec<[VertexId; 2]> = self.inner.inputs.iter().map(Variable::id).collect();
        f.debug_struct("Function")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("kind", &self.inner.kind)
            .field("rank", &self.inner.rank)
            .field("inputs", &inputs)
            .finish()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.name)
    }
}

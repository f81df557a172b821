//! Variable vertices.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::RwLock;

use super::{Function, Vertex, VertexId};

struct VariableInner {
    id: VertexId,
    rank: u64,
    /// The function that produced this variable. `None` for leaves.
    creator: Option<Function>,
    name: RwLock<Option<String>>,
}

/// A data-bearing vertex.
///
/// Cloning a `Variable` clones the handle, not the vertex.
#[derive(Clone)]
pub struct Variable {
    inner: Arc<VariableInner>,
}

impl Variable {
    /// Create a leaf variable (no creator, rank 0).
    pub fn leaf() -> Self {
        Self::build(None, 0)
    }

    /// Create a named leaf variable.
    pub fn named(name: impl Into<String>) -> Self {
        let variable = Self::leaf();
        variable.set_name(name);
        variable
    }

    pub(super) fn with_creator(creator: Function) -> Self {
        let rank = creator.rank().saturating_add(1);
        Self::build(Some(creator), rank)
    }

    fn build(creator: Option<Function>, rank: u64) -> Self {
        Self {
            inner: Arc::new(VariableInner {
                id: VertexId::next(),
                rank,
                creator,
                name: RwLock::new(None),
            }),
        }
    }

    pub fn id(&self) -> VertexId {
        self.inner.id
    }

    pub fn rank(&self) -> u64 {
        self.inner.rank
    }

    /// The function that produced this variable, if any.
    pub fn creator(&self) -> Option<&Function> {
        self.inner.creator.as_ref()
    }

    pub fn is_leaf(&self) -> bool {
        self.inner.creator.is_none()
    }

    pub fn name(&self) -> Option<String> {
        self.inner.name.read().clone()
    }

    /// Take the creator out of this vertex if this is its last handle.
    pub(super) fn into_creator(self) -> Option<Function> {
        Arc::into_inner(self.inner).and_then(|mut inner| inner.creator.take())
    }

    /// Set the human-readable name used as this variable's label.
    ///
    /// Visible through every clone of the handle.
    pub fn set_name(&self, name: impl Into<String>) {
        *self.inner.name.write() = Some(name.into());
    }
}

impl Drop for VariableInner {
    fn drop(&mut self) {
        if let Some(creator) = self.creator.take() {
            super::release(vec![Vertex::Function(creator)]);
        }
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("id", &self.inner.id)
            .field("rank", &self.inner.rank)
            .field("name", &*self.inner.name.read())
            .field("creator", &self.inner.creator.as_ref().map(Function::id))
            .finish()
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.inner.name.read() {
            Some(name) => f.write_str(name),
            None => write!(f, "variable_{}", self.inner.id),
        }
    }
}

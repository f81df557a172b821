//! Graph Extraction
//!
//! Walks a recorded computation backward from its outputs and collects every
//! `(head, tail)` edge that contributed to them.
//!
//! # Algorithm
//!
//! Vertices are processed from a max-heap keyed on `(rank, discovery order)`:
//! higher rank first, and among equal ranks the vertex enqueued earliest.
//! The discovery order is a counter assigned at push time, so ties never
//! depend on how two vertices would compare.
//!
//! 1. Seed the heap with the outputs.
//! 2. Pop a vertex:
//!    - A variable records `(creator, variable)` and pushes the creator.
//!    - A function records `(input, function)` for each input and pushes the
//!      input.
//! 3. An edge already recorded is never recorded or pushed again, which
//!    bounds the work by the number of reachable edges.
//!
//! # Split elision
//!
//! With `remove_split` enabled, split functions never become endpoints. A
//! variable produced by a split is replaced by the split's sole input
//! wherever it is consumed, so the consumer connects straight to the
//! forwarded variable. Stacked splits are followed down to the first
//! variable that was not produced by a split.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use indexmap::IndexSet;
use tracing::{debug, debug_span, field, trace};

use super::{ComputationalGraph, Edge};
use crate::vertex::{Function, Variable, Vertex};

/// Extract the graph of everything that produced `outputs`.
///
/// Shorthand for `GraphExtractor::new().remove_split(remove_split).extract(outputs)`.
pub fn computational_graph<I>(outputs: I, remove_split: bool) -> ComputationalGraph
where
    I: IntoIterator,
    I::Item: Borrow<Variable>,
{
    GraphExtractor::new().remove_split(remove_split).extract(outputs)
}

/// Configurable backward traversal.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphExtractor {
    remove_split: bool,
}

impl GraphExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elide split functions from the extracted graph.
    pub fn remove_split(mut self, remove_split: bool) -> Self {
        self.remove_split = remove_split;
        self
    }

    pub fn extract<I>(&self, outputs: I) -> ComputationalGraph
    where
        I: IntoIterator,
        I::Item: Borrow<Variable>,
    {
        let span = debug_span!(
            "computational_graph",
            roots = field::Empty,
            remove_split = self.remove_split
        );
        let _enter = span.enter();

        let mut traversal = Traversal::new(self.remove_split);
        let roots = traversal.seed(outputs);
        span.record("roots", roots);

        while let Some(entry) = traversal.queue.pop() {
            match entry.vertex {
                Vertex::Variable(variable) => traversal.visit_variable(&variable),
                Vertex::Function(function) => traversal.visit_function(&function),
            }
        }

        debug!(
            edges = traversal.seen.len(),
            discovered = traversal.discovered,
            "extracted computational graph"
        );
        ComputationalGraph::from_edge_set(traversal.seen)
    }
}

/// A heap entry. Ordered by rank, then by reverse discovery order; the
/// vertex itself never takes part in the comparison.
struct QueueEntry {
    rank: u64,
    order: u64,
    vertex: Vertex,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| other.order.cmp(&self.order))
    }
}

/// Call-scoped state of one extraction.
struct Traversal {
    remove_split: bool,
    queue: BinaryHeap<QueueEntry>,
    /// Number of pushes so far; the next push gets this as its order.
    discovered: u64,
    seen: IndexSet<Edge>,
}

impl Traversal {
    fn new(remove_split: bool) -> Self {
        Self {
            remove_split,
            queue: BinaryHeap::new(),
            discovered: 0,
            seen: IndexSet::new(),
        }
    }

    fn push(&mut self, vertex: impl Into<Vertex>) {
        let vertex = vertex.into();
        let order = self.discovered;
        self.discovered += 1;
        self.queue.push(QueueEntry {
            rank: vertex.rank(),
            order,
            vertex,
        });
    }

    /// Push every output in the given order. Returns how many were pushed.
    fn seed<I>(&mut self, outputs: I) -> u64
    where
        I: IntoIterator,
        I::Item: Borrow<Variable>,
    {
        let before = self.discovered;
        for output in outputs {
            self.push(output.borrow().clone());
        }
        self.discovered - before
    }

    /// Returns false if the edge was already recorded.
    fn record(&mut self, edge: Edge) -> bool {
        let (head, tail) = (edge.head().id(), edge.tail().id());
        let inserted = self.seen.insert(edge);
        if inserted {
            trace!(%head, %tail, "recorded edge");
        }
        inserted
    }

    /// The variable that stands in for `function` when splits are elided.
    fn bypass<'a>(&self, function: &'a Function) -> Option<&'a Variable> {
        if self.remove_split {
            function.sole_input()
        } else {
            None
        }
    }

    /// `input`, or the variable forwarded into it through any number of
    /// stacked splits.
    fn effective_input<'a>(&self, input: &'a Variable) -> &'a Variable {
        let mut current = input;
        while let Some(forwarded) = current.creator().and_then(|creator| self.bypass(creator)) {
            current = forwarded;
        }
        current
    }

    fn visit_variable(&mut self, variable: &Variable) {
        let Some(creator) = variable.creator() else {
            return;
        };

        if creator.is_split() && self.remove_split {
            if let Some(input) = creator.sole_input() {
                trace!(split = %creator.id(), "eliding split creator");
                self.push(input.clone());
            }
            return;
        }

        if self.record(Edge::produced(creator, variable)) {
            self.push(creator.clone());
        }
    }

    fn visit_function(&mut self, function: &Function) {
        if function.is_split() && self.remove_split {
            if let Some(input) = function.sole_input() {
                trace!(split = %function.id(), "eliding split");
                self.push(input.clone());
            }
            return;
        }

        for input in function.inputs() {
            if input.id() == function.id() {
                continue;
            }
            let input = self.effective_input(input);
            if self.record(Edge::consumed(input, function)) {
                self.push(input.clone());
            }
        }
    }
}

//! Lazily evaluated, dependency-tracked caches.
//!
//! Each strand owns one [`DependencyGraph`]: a registry of node metadata
//! (validity flag, dependents, recompute counter) indexed by [`NodeId`].
//! The cached values themselves live in [`DependencyNode`] cells owned by
//! the strand, so the graph never holds references to values and stays
//! valid when strands are moved or reallocated.
//!
//! ## Invalidation
//!
//! A dirty node always has dirty dependents. Marking a node dirty walks
//! its dependents and stops at any that are already dirty. Reading a dirty
//! node runs its compute closure, which pulls its own dependencies first,
//! then marks it valid.

use std::cell::{Cell, Ref, RefCell};

use tracing::trace;

/// Handle to a node in a [`DependencyGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct NodeEntry {
    name: &'static str,
    valid: Cell<bool>,
    recomputes: Cell<u64>,
    dependents: Vec<NodeId>,
}

/// Per-strand registry of node validity and dependent lists.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    nodes: Vec<NodeEntry>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&mut self, name: &'static str, valid: bool) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeEntry {
            name,
            valid: Cell::new(valid),
            recomputes: Cell::new(0),
            dependents: Vec::new(),
        });
        id
    }

    /// Registers `dependent` for invalidation whenever `node` changes.
    ///
    /// This is an observer relation only; it does not imply ownership.
    pub fn add_dependent(&mut self, node: NodeId, dependent: NodeId) {
        debug_assert_ne!(node, dependent, "a node cannot depend on itself");
        let entry = &mut self.nodes[node.0];
        if !entry.dependents.contains(&dependent) {
            entry.dependents.push(dependent);
        }
        if !self.nodes[node.0].valid.get() {
            self.set_dirty(dependent);
        }
    }

    /// Returns true if the node's cached value matches the current state.
    #[inline]
    pub fn is_valid(&self, id: NodeId) -> bool {
        self.nodes[id.0].valid.get()
    }

    /// Clears the node's validity flag and that of every transitive dependent.
    pub fn set_dirty(&self, id: NodeId) {
        if !self.nodes[id.0].valid.replace(false) {
            return;
        }
        self.set_dependents_dirty(id);
    }

    /// Marks every registered dependent of `id` dirty.
    pub fn set_dependents_dirty(&self, id: NodeId) {
        for &dependent in &self.nodes[id.0].dependents {
            self.set_dirty(dependent);
        }
    }

    fn mark_recomputed(&self, id: NodeId) {
        let entry = &self.nodes[id.0];
        entry.valid.set(true);
        let count = entry.recomputes.get() + 1;
        entry.recomputes.set(count);
        trace!(node = entry.name, count, "recomputed dependency node");
        self.set_dependents_dirty(id);
    }

    fn mark_assigned(&self, id: NodeId) {
        self.nodes[id.0].valid.set(true);
        self.set_dependents_dirty(id);
    }

    /// Number of times the node has been recomputed on a read.
    pub fn recompute_count(&self, id: NodeId) -> u64 {
        self.nodes[id.0].recomputes.get()
    }

    pub fn name(&self, id: NodeId) -> &'static str {
        self.nodes[id.0].name
    }

    /// Looks up a node by its registered name.
    pub fn node_named(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|entry| entry.name == name)
            .map(NodeId)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn dependents(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].dependents
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A cached value of type `T` whose validity is tracked by a
/// [`DependencyGraph`].
///
/// Per-index containers are valid on `[first_valid, size)`; entries below
/// `first_valid` are undefined (e.g. curvature at the strand's root).
#[derive(Debug)]
pub struct DependencyNode<T> {
    id: NodeId,
    first_valid: usize,
    size: usize,
    value: RefCell<T>,
}

impl<T> DependencyNode<T> {
    /// Registers a derived node that starts dirty and is invalidated by
    /// every node in `depends_on`.
    pub fn derived(
        graph: &mut DependencyGraph,
        name: &'static str,
        first_valid: usize,
        size: usize,
        initial: T,
        depends_on: &[NodeId],
    ) -> Self {
        let id = graph.register(name, false);
        for &upstream in depends_on {
            graph.add_dependent(upstream, id);
        }
        Self {
            id,
            first_valid,
            size,
            value: RefCell::new(initial),
        }
    }

    /// Registers a root node holding an externally assigned value.
    pub fn root(
        graph: &mut DependencyGraph,
        name: &'static str,
        first_valid: usize,
        size: usize,
        value: T,
    ) -> Self {
        let id = graph.register(name, true);
        Self {
            id,
            first_valid,
            size,
            value: RefCell::new(value),
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn first_valid(&self) -> usize {
        self.first_valid
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the up-to-date value, running `compute` first if the node
    /// is dirty.
    ///
    /// `compute` receives the previous value and must pull every upstream
    /// node it reads. Pulling this node from inside its own `compute`
    /// panics on the `RefCell` borrow.
    pub fn get<'a>(&'a self, graph: &DependencyGraph, compute: impl FnOnce(&mut T)) -> Ref<'a, T> {
        if !graph.is_valid(self.id) {
            let mut value = self.value.borrow_mut();
            compute(&mut *value);
            drop(value);
            graph.mark_recomputed(self.id);
        }
        self.value.borrow()
    }

    /// Assigns a root value and invalidates every dependent.
    pub fn set(&self, graph: &DependencyGraph, value: T) {
        *self.value.borrow_mut() = value;
        graph.mark_assigned(self.id);
    }

    /// Edits a root value in place and invalidates every dependent.
    pub fn update(&self, graph: &DependencyGraph, edit: impl FnOnce(&mut T)) {
        edit(&mut *self.value.borrow_mut());
        graph.mark_assigned(self.id);
    }
}

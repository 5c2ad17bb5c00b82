//! Node storage for the character trie.
//!
//! Nodes live in a single arena and refer to each other by [`NodeId`]. The
//! arena owns every node; parent and sibling links are plain indices used for
//! navigation only. Nodes are never removed, so an id stays valid for the
//! lifetime of the arena that issued it.

use std::fmt;

/// Handle to a node inside a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The root node is always the first node allocated.
    pub const ROOT: NodeId = NodeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single position in the trie.
#[derive(Debug, Clone)]
pub struct TrieNode {
    value: char,
    is_root: bool,
    is_terminus: bool,
    weight: Option<f32>,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    prior_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

impl TrieNode {
    /// Value stored at the root. Doubles as the "no preceding character" key
    /// when looking up transition weights.
    pub const ROOT_VALUE: char = '\0';

    fn root() -> Self {
        Self {
            value: Self::ROOT_VALUE,
            is_root: true,
            is_terminus: false,
            weight: None,
            parent: None,
            first_child: None,
            prior_sibling: None,
            next_sibling: None,
        }
    }

    fn child(parent: NodeId, value: char, weight: Option<f32>) -> Self {
        Self {
            value,
            is_root: false,
            is_terminus: false,
            weight,
            parent: Some(parent),
            first_child: None,
            prior_sibling: None,
            next_sibling: None,
        }
    }

    /// Character held by this node.
    pub fn value(&self) -> char {
        self.value
    }

    /// Whether this node is the root of its trie.
    pub fn is_root(&self) -> bool {
        self.is_root
    }

    /// Whether a complete term ends at this node.
    pub fn is_terminus(&self) -> bool {
        self.is_terminus
    }

    /// Ordering weight, present only on nodes built by a weighted factory.
    pub fn weight(&self) -> Option<f32> {
        self.weight
    }

    /// Parent link; `None` only for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Head of this node's sibling-ordered child chain.
    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child
    }

    /// Previous node in the parent's child chain.
    pub fn prior_sibling(&self) -> Option<NodeId> {
        self.prior_sibling
    }

    /// Next node in the parent's child chain.
    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling
    }
}

/// Outcome of probing one sibling while scanning a child chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// The sibling holds the value being looked for.
    Found,
    /// The value may still appear further down the chain.
    Continue,
    /// The value would sort before this sibling; it cannot appear later.
    Stop,
}

/// Where a scan over a child chain ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// An existing child matched.
    Existing(NodeId),
    /// The parent has no children yet.
    Empty,
    /// A new child belongs immediately before this sibling.
    Before(NodeId),
    /// A new child belongs after the last sibling of the chain.
    After(NodeId),
}

/// Arena that owns every node of one trie.
#[derive(Debug, Clone)]
pub struct NodeArena {
    nodes: Vec<TrieNode>,
}

impl NodeArena {
    /// Creates an arena holding only a root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::root()],
        }
    }

    /// Id of the root node.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// An arena always holds its root, so it is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Borrow a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different arena and is out of range.
    pub fn node(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id.index()]
    }

    /// Returns `None` for ids this arena never issued.
    pub fn get(&self, id: NodeId) -> Option<&TrieNode> {
        self.nodes.get(id.index())
    }

    /// Marks a node as the end of a term. Returns `true` if it was not
    /// already a terminus.
    pub fn mark_terminus(&mut self, id: NodeId) -> bool {
        let node = &mut self.nodes[id.index()];
        let newly_marked = !node.is_terminus;
        node.is_terminus = true;
        newly_marked
    }

    /// Iterates over the children of `parent` in sibling order.
    pub fn children(&self, parent: NodeId) -> Children<'_> {
        Children {
            arena: self,
            next: self.node(parent).first_child,
        }
    }

    /// Scans the child chain of `parent`, asking `probe` about each sibling
    /// in order until it reports [`Probe::Found`] or [`Probe::Stop`].
    pub fn scan_children<F>(&self, parent: NodeId, mut probe: F) -> Slot
    where
        F: FnMut(&TrieNode) -> Probe,
    {
        let mut current = match self.node(parent).first_child {
            Some(first) => first,
            None => return Slot::Empty,
        };
        loop {
            let sibling = self.node(current);
            match probe(sibling) {
                Probe::Found => return Slot::Existing(current),
                Probe::Stop => return Slot::Before(current),
                Probe::Continue => match sibling.next_sibling {
                    Some(next) => current = next,
                    None => return Slot::After(current),
                },
            }
        }
    }

    /// Allocates a child of `parent` and splices it into the child chain at
    /// `slot`. An [`Slot::Existing`] slot is returned unchanged.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        slot: Slot,
        value: char,
        weight: Option<f32>,
    ) -> NodeId {
        let id = match slot {
            Slot::Existing(id) => return id,
            Slot::Empty => {
                let id = self.alloc(parent, value, weight);
                self.nodes[parent.index()].first_child = Some(id);
                id
            }
            Slot::After(last) => {
                let id = self.alloc(parent, value, weight);
                self.nodes[last.index()].next_sibling = Some(id);
                self.nodes[id.index()].prior_sibling = Some(last);
                id
            }
            Slot::Before(next) => {
                let id = self.alloc(parent, value, weight);
                let prior = self.nodes[next.index()].prior_sibling;
                {
                    let node = &mut self.nodes[id.index()];
                    node.prior_sibling = prior;
                    node.next_sibling = Some(next);
                }
                self.nodes[next.index()].prior_sibling = Some(id);
                match prior {
                    Some(prior) => self.nodes[prior.index()].next_sibling = Some(id),
                    None => self.nodes[parent.index()].first_child = Some(id),
                }
                id
            }
        };

        tracing::trace!(node = %id, parent = %parent, value = %value, "node allocated");
        id
    }

    fn alloc(&mut self, parent: NodeId, value: char, weight: Option<f32>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(TrieNode::child(parent, value, weight));
        id
    }

    /// Rebuilds the term ending at `id` by walking parent links.
    pub fn term(&self, id: NodeId) -> String {
        let mut chars = Vec::new();
        let mut current = self.node(id);
        while let Some(parent) = current.parent {
            chars.push(current.value);
            current = self.node(parent);
        }
        chars.iter().rev().collect()
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node's children in sibling order.
#[derive(Debug, Clone)]
pub struct Children<'a> {
    arena: &'a NodeArena,
    next: Option<NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.arena.node(current).next_sibling;
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(arena: &NodeArena, parent: NodeId) -> String {
        arena.children(parent).map(|id| arena.node(id).value()).collect()
    }

    #[test]
    fn test_new_arena_has_root() {
        let arena = NodeArena::new();
        let root = arena.node(arena.root());
        assert!(root.is_root());
        assert!(!root.is_terminus());
        assert_eq!(root.parent(), None);
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.children(arena.root()).count(), 0);
    }

    #[test]
    fn test_insert_into_every_slot_kind() {
        let mut arena = NodeArena::new();
        let root = arena.root();

        let m = arena.insert_child(root, Slot::Empty, 'm', None);
        let z = arena.insert_child(root, Slot::After(m), 'z', None);
        let a = arena.insert_child(root, Slot::Before(m), 'a', None);
        let p = arena.insert_child(root, Slot::Before(z), 'p', None);

        assert_eq!(values(&arena, root), "ampz");
        assert_eq!(arena.node(root).first_child(), Some(a));
        assert_eq!(arena.node(a).prior_sibling(), None);
        assert_eq!(arena.node(p).prior_sibling(), Some(m));
        assert_eq!(arena.node(p).next_sibling(), Some(z));
        assert_eq!(arena.node(z).prior_sibling(), Some(p));
        assert_eq!(arena.node(z).next_sibling(), None);
    }

    #[test]
    fn test_existing_slot_is_idempotent() {
        let mut arena = NodeArena::new();
        let root = arena.root();
        let a = arena.insert_child(root, Slot::Empty, 'a', None);
        let again = arena.insert_child(root, Slot::Existing(a), 'a', None);
        assert_eq!(a, again);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_scan_stops_early() {
        let mut arena = NodeArena::new();
        let root = arena.root();
        let b = arena.insert_child(root, Slot::Empty, 'b', None);
        let d = arena.insert_child(root, Slot::After(b), 'd', None);

        let mut probed = 0;
        let slot = arena.scan_children(root, |sibling| {
            probed += 1;
            if sibling.value() < 'c' {
                Probe::Continue
            } else {
                Probe::Stop
            }
        });
        assert_eq!(slot, Slot::Before(d));
        assert_eq!(probed, 2);
        assert_eq!(arena.scan_children(root, |_| Probe::Continue), Slot::After(d));
        assert_eq!(arena.scan_children(b, |_| Probe::Found), Slot::Empty);
    }

    #[test]
    fn test_term_reconstruction() {
        let mut arena = NodeArena::new();
        let root = arena.root();
        let c = arena.insert_child(root, Slot::Empty, 'c', None);
        let a = arena.insert_child(c, Slot::Empty, 'a', None);
        let t = arena.insert_child(a, Slot::Empty, 't', None);
        assert_eq!(arena.term(t), "cat");
        assert_eq!(arena.term(root), "");
        assert!(arena.mark_terminus(t));
        assert!(!arena.mark_terminus(t));
    }
}

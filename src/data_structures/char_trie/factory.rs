//! Node construction policies.
//!
//! A [`NodeFactory`] decides the left-to-right order of a node's children. The
//! sibling chain itself lives in [`NodeArena`]; a factory only answers, for
//! each sibling visited during a scan, whether the wanted value is here, may
//! still come later, or would have to sit before it. Lookup and insertion are
//! shared across policies and both stop at the first sibling that is "past"
//! the wanted value.

use std::fmt;

use super::node::{NodeArena, NodeId, Probe, Slot, TrieNode};
use super::weight_table::WeightTable;

/// Ordering policy for the children of every node in a trie.
pub trait NodeFactory: fmt::Debug + Send + Sync {
    /// Weight a new child holding `value` would carry under `parent`, if this
    /// policy weighs nodes at all.
    fn weight_for(&self, arena: &NodeArena, parent: NodeId, value: char) -> Option<f32>;

    /// Compares the wanted child against one sibling of the chain.
    fn probe(&self, sibling: &TrieNode, value: char, weight: Option<f32>) -> Probe;

    /// Finds where `value` is, or would be, in the child chain of `parent`.
    fn locate(&self, arena: &NodeArena, parent: NodeId, value: char) -> Slot {
        let weight = self.weight_for(arena, parent, value);
        arena.scan_children(parent, |sibling| self.probe(sibling, value, weight))
    }

    /// Returns the child of `parent` holding `value`, if there is one.
    fn get_child(&self, arena: &NodeArena, parent: NodeId, value: char) -> Option<NodeId> {
        match self.locate(arena, parent, value) {
            Slot::Existing(id) => Some(id),
            _ => None,
        }
    }

    /// Returns the child of `parent` holding `value`, creating it in order
    /// if it does not exist yet. An existing child is returned untouched.
    fn add_child(&self, arena: &mut NodeArena, parent: NodeId, value: char) -> NodeId {
        let weight = self.weight_for(arena, parent, value);
        let slot = arena.scan_children(parent, |sibling| self.probe(sibling, value, weight));
        arena.insert_child(parent, slot, value, weight)
    }

    /// Like [`NodeFactory::add_child`], then marks the child as a terminus.
    fn add_child_terminus(&self, arena: &mut NodeArena, parent: NodeId, value: char) -> NodeId {
        let id = self.add_child(arena, parent, value);
        self.convert_to_terminus(arena, id);
        id
    }

    /// Marks an existing node as the end of a term without moving it.
    /// Returns `true` if the node was not a terminus before.
    fn convert_to_terminus(&self, arena: &mut NodeArena, node: NodeId) -> bool {
        arena.mark_terminus(node)
    }
}

/// Orders children by ascending character value.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalNodeFactory;

impl NodeFactory for LexicalNodeFactory {
    fn weight_for(&self, _arena: &NodeArena, _parent: NodeId, _value: char) -> Option<f32> {
        None
    }

    fn probe(&self, sibling: &TrieNode, value: char, _weight: Option<f32>) -> Probe {
        match value.cmp(&sibling.value()) {
            std::cmp::Ordering::Greater => Probe::Continue,
            std::cmp::Ordering::Equal => Probe::Found,
            std::cmp::Ordering::Less => Probe::Stop,
        }
    }
}

/// Orders children by descending transition weight.
///
/// Children of equal weight keep their insertion order. The weight of a
/// child is looked up from the table using its parent's value, or
/// [`WeightTable::ROOT`] for children of the root.
#[derive(Debug, Clone, Default)]
pub struct WeightedNodeFactory {
    table: WeightTable,
}

impl WeightedNodeFactory {
    /// Creates a factory ordering children by the weights in `table`.
    pub fn new(table: WeightTable) -> Self {
        Self { table }
    }

    /// The table this factory consults.
    pub fn table(&self) -> &WeightTable {
        &self.table
    }
}

impl NodeFactory for WeightedNodeFactory {
    fn weight_for(&self, arena: &NodeArena, parent: NodeId, value: char) -> Option<f32> {
        let parent = arena.node(parent);
        let preceding = if parent.is_root() {
            WeightTable::ROOT
        } else {
            parent.value()
        };
        Some(self.table.weight(preceding, value))
    }

    fn probe(&self, sibling: &TrieNode, value: char, weight: Option<f32>) -> Probe {
        let weight = weight.unwrap_or(WeightTable::MIN_WEIGHT);
        let sibling_weight = sibling.weight().unwrap_or(WeightTable::MIN_WEIGHT);
        if weight <= sibling_weight {
            if value == sibling.value() {
                Probe::Found
            } else {
                Probe::Continue
            }
        } else {
            Probe::Stop
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child_values(arena: &NodeArena, parent: NodeId) -> String {
        arena.children(parent).map(|id| arena.node(id).value()).collect()
    }

    #[test]
    fn test_lexical_children_sorted() {
        let factory = LexicalNodeFactory;
        let mut arena = NodeArena::new();
        let root = arena.root();
        for c in "qwertyuiop".chars() {
            factory.add_child(&mut arena, root, c);
        }
        assert_eq!(child_values(&arena, root), "eiopqrtuwy");
        assert!(factory.get_child(&arena, root, 'w').is_some());
        assert!(factory.get_child(&arena, root, 'a').is_none());
        assert!(factory.get_child(&arena, root, 'z').is_none());
    }

    #[test]
    fn test_add_child_is_idempotent() {
        let factory = LexicalNodeFactory;
        let mut arena = NodeArena::new();
        let root = arena.root();
        let first = factory.add_child(&mut arena, root, 'a');
        let second = factory.add_child(&mut arena, root, 'a');
        assert_eq!(first, second);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_convert_to_terminus_keeps_position() {
        let factory = LexicalNodeFactory;
        let mut arena = NodeArena::new();
        let root = arena.root();
        factory.add_child(&mut arena, root, 'a');
        let b = factory.add_child(&mut arena, root, 'b');
        factory.add_child(&mut arena, root, 'c');

        assert!(factory.convert_to_terminus(&mut arena, b));
        assert!(!factory.convert_to_terminus(&mut arena, b));
        assert!(arena.node(b).is_terminus());
        assert_eq!(child_values(&arena, root), "abc");
    }

    #[test]
    fn test_add_child_terminus() {
        let factory = LexicalNodeFactory;
        let mut arena = NodeArena::new();
        let root = arena.root();
        let x = factory.add_child_terminus(&mut arena, root, 'x');
        assert!(arena.node(x).is_terminus());
        assert_eq!(factory.add_child_terminus(&mut arena, root, 'x'), x);
    }

    fn weighted_factory() -> WeightedNodeFactory {
        let table = WeightTable::from_pairs([
            (WeightTable::ROOT, 't', 0.16),
            (WeightTable::ROOT, 'a', 0.11),
            (WeightTable::ROOT, 'o', 0.07),
            ('t', 'h', 0.35),
            ('t', 'o', 0.12),
        ])
        .unwrap();
        WeightedNodeFactory::new(table)
    }

    #[test]
    fn test_weighted_children_descending() {
        let factory = weighted_factory();
        let mut arena = NodeArena::new();
        let root = arena.root();
        for c in "oazta".chars() {
            factory.add_child(&mut arena, root, c);
        }
        // 'z' is unknown to the table and weighs the minimum.
        assert_eq!(child_values(&arena, root), "taoz");

        let t = factory.get_child(&arena, root, 't').unwrap();
        assert_eq!(arena.node(t).weight(), Some(0.16));
        factory.add_child(&mut arena, t, 'o');
        factory.add_child(&mut arena, t, 'h');
        assert_eq!(child_values(&arena, t), "ho");
    }

    #[test]
    fn test_weighted_ties_keep_insertion_order() {
        let factory = weighted_factory();
        let mut arena = NodeArena::new();
        let root = arena.root();
        for c in "qxbt".chars() {
            factory.add_child(&mut arena, root, c);
        }
        assert_eq!(child_values(&arena, root), "tqxb");
        assert!(factory.get_child(&arena, root, 'x').is_some());
        assert!(factory.get_child(&arena, root, 'y').is_none());
    }

    #[test]
    fn test_weighted_lookup_uses_parent_value() {
        let factory = weighted_factory();
        let mut arena = NodeArena::new();
        let root = arena.root();
        // Under the root 'o' weighs 0.07; under 't' it weighs 0.12.
        let o = factory.add_child(&mut arena, root, 'o');
        let t = factory.add_child(&mut arena, root, 't');
        let to = factory.add_child(&mut arena, t, 'o');
        assert_eq!(arena.node(o).weight(), Some(0.07));
        assert_eq!(arena.node(to).weight(), Some(0.12));
    }
}

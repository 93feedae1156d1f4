// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::fmt;

use crate::skiplist::level_generator::LevelGenerator;

/// A stable handle to a node in a list's arena. Handles are only meaningful
/// for the list that produced them, and a handle to a deleted node may be
/// reused by a later insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One cell of the list: an element plus its forward links, one per level.
///
/// Only the first `height` links count. The link array may be longer than
/// that after a [`Node::set_next`] beyond the height, but such slots are
/// invisible to [`Node::next`] until the node grows into them.
#[derive(Debug, Clone)]
pub struct Node<T> {
    value: Option<T>,
    height: usize,
    links: Vec<Option<NodeId>>,
}

impl<T> Node<T> {
    pub(crate) fn new(value: T, height: usize) -> Self {
        Node {
            value: Some(value),
            height,
            links: vec![None; height],
        }
    }

    /// The routing-only node at the front of every list.
    pub(crate) fn head(height: usize) -> Self {
        Node {
            value: None,
            height,
            links: vec![None; height],
        }
    }

    /// The stored element, `None` for the head.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_head(&self) -> bool {
        self.value.is_none()
    }

    /// The next node at `level`, or `None` past the end of the lane or when
    /// `level` is not below this node's height.
    #[inline]
    pub fn next(&self, level: usize) -> Option<NodeId> {
        if level >= self.height {
            return None;
        }
        self.links.get(level).copied().flatten()
    }

    /// Point this node at `next` on `level`. The link array is extended with
    /// empty slots when `level` is past its end; the height is not changed.
    pub(crate) fn set_next(&mut self, level: usize, next: Option<NodeId>) {
        if level >= self.links.len() {
            self.links.resize(level + 1, None);
        }
        self.links[level] = next;
    }

    /// Add one empty level on top.
    pub(crate) fn grow(&mut self) {
        self.height += 1;
        // a slot may already exist from an earlier `set_next`
        if self.links.len() < self.height {
            self.links.resize(self.height, None);
        } else {
            self.links[self.height - 1] = None;
        }
    }

    /// Flip a coin and grow on heads. Returns whether the node grew.
    pub(crate) fn maybe_grow<G: LevelGenerator + ?Sized>(&mut self, generator: &mut G) -> bool {
        if generator.flip() {
            self.grow();
            return true;
        }
        false
    }

    /// Drop every level at or above `height`.
    pub(crate) fn trim(&mut self, height: usize) {
        debug_assert!(height <= self.height, "trim can only shrink a node");
        self.links.truncate(height);
        self.height = height;
    }

    pub(crate) fn into_value(self) -> Option<T> {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skiplist::level_generator::tests::ScriptedLevelGenerator;

    #[test]
    fn test_node_next_out_of_range() {
        let mut node = Node::new(5, 2);
        node.set_next(1, Some(NodeId(3)));

        assert_eq!(node.value(), Some(&5));
        assert_eq!(node.height(), 2);
        assert_eq!(node.next(0), None);
        assert_eq!(node.next(1), Some(NodeId(3)));
        assert_eq!(node.next(2), None);
        assert_eq!(node.next(usize::MAX), None);
    }

    #[test]
    fn test_node_set_next_past_height() {
        let mut node = Node::new("a", 1);
        node.set_next(3, Some(NodeId(9)));

        // capacity only, the slot stays hidden
        assert_eq!(node.height(), 1);
        assert_eq!(node.next(3), None);

        // growing into the slot must not resurrect the stale link
        node.grow();
        node.grow();
        node.grow();
        assert_eq!(node.height(), 4);
        assert_eq!(node.next(3), None);
    }

    #[test]
    fn test_node_grow_and_trim() {
        let mut node = Node::new(1u64, 1);
        node.grow();
        node.set_next(1, Some(NodeId(2)));
        assert_eq!(node.height(), 2);
        assert_eq!(node.next(1), Some(NodeId(2)));

        node.trim(1);
        assert_eq!(node.height(), 1);
        assert_eq!(node.next(1), None);

        node.grow();
        assert_eq!(node.next(1), None);
    }

    #[test]
    fn test_node_maybe_grow() {
        let mut generator = ScriptedLevelGenerator::new(&[false, true]);
        let mut node = Node::new(1u64, 1);

        assert!(!node.maybe_grow(&mut generator));
        assert_eq!(node.height(), 1);
        assert!(node.maybe_grow(&mut generator));
        assert_eq!(node.height(), 2);
    }

    #[test]
    fn test_head_has_no_value() {
        let head: Node<u64> = Node::head(3);
        assert!(head.is_head());
        assert_eq!(head.value(), None);
        assert_eq!(head.height(), 3);
        assert!((0..3).all(|level| head.next(level).is_none()));
    }
}

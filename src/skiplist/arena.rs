// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::ops::{
    Index,
    IndexMut,
};

use crate::skiplist::node::{
    Node,
    NodeId,
};

/// Owns every node of one list. Links between nodes are [`NodeId`]s into
/// this arena, so no node owns another and unlinking is just rewriting
/// handles. Released slots are recycled by later allocations.
#[derive(Debug, Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn alloc(&mut self, node: Node<T>) -> NodeId {
        match self.free.pop() {
            | Some(idx) => {
                self.slots[idx] = Some(node);
                NodeId(idx)
            },
            | None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            },
        }
    }

    /// Take the node out of the arena. The caller must already have unlinked
    /// it from every level.
    pub(crate) fn release(&mut self, id: NodeId) -> Option<Node<T>> {
        let node = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        Some(node)
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Number of live nodes, the head included.
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

/// Links are only ever rewritten to live nodes, so a miss here is a broken
/// list rather than a recoverable condition.
impl<T> Index<NodeId> for Arena<T> {
    type Output = Node<T>;

    #[inline]
    fn index(&self, id: NodeId) -> &Self::Output {
        match self.get(id) {
            | Some(node) => node,
            | None => panic!("dangling node id {}", id),
        }
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match self.get_mut(id) {
            | Some(node) => node,
            | None => panic!("dangling node id {}", id),
        }
    }
}

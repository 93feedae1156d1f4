// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

//! A skiplist which gives ordered insertion, lookup and deletion in expected
//! logarithmic time without any rebalancing.
//!
//! SkipLists use a probabilistic distribution of nodes over the internal
//! levels, whereby the lowest level (level 0) contains all the nodes, and each
//! level `n > 0` will contain a random subset of the nodes on level `n - 1`.
//! A coin decides, via a [`LevelGenerator`], how tall each new node is.
//!
//! The height of the whole list follows its size: it is kept at or above
//! `ceil(log2(size))`. When an insert pushes the size over a power of two, a
//! single pass over the top lane flips a coin for every node on it and links
//! the winners into a new top level. When a delete drops the size back under
//! a power of two, a single pass truncates every node down to the new
//! height. Both passes are linear in the size, but they only happen once per
//! doubling or halving, so they amortize to constant work per operation.
//! Everything else is expected `O(log n)`.
//!
//! Nodes live in an arena owned by the list and refer to each other by
//! [`NodeId`]. Mutation needs `&mut self`; the list has no interior locking.

mod arena;
pub mod level_generator;
pub mod node;
mod validate;


use std::{
    borrow::Borrow,
    cmp::Ordering,
};

use tracing::{
    debug,
    instrument,
    trace,
};

use crate::{
    config::{
        Config,
        DEFAULT_INITIAL_HEIGHT,
    },
    errs::SkipListError,
    skiplist::{
        arena::Arena,
        level_generator::{
            GeometricalLevelGenerator,
            LevelGenerator,
        },
        node::{
            Node,
            NodeId,
        },
    },
    stats::Stats,
};

/// `ceil(log2(n))`, with 0 for an empty or single element list.
#[inline]
pub(crate) fn max_height(n: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    (usize::BITS - (n - 1).leading_zeros()) as usize
}

#[derive(Debug, Clone)]
pub struct SkipList<T, G = GeometricalLevelGenerator> {
    arena: Arena<T>,
    head: NodeId,
    size: usize,
    /// always equal to the head's height
    height: usize,
    /// height the list was built with, kept until the first element arrives
    initial_height: usize,
    generator: G,
    stats: Stats,
}

impl<T: Ord> SkipList<T> {
    /// An empty list with a single level and a fair coin.
    pub fn new() -> Self {
        Self::with_height(DEFAULT_INITIAL_HEIGHT)
    }

    /// An empty list starting with `height` levels. A height of 0 falls back
    /// to 1.
    pub fn with_height(height: usize) -> Self {
        Self::with_generator(height, GeometricalLevelGenerator::default())
    }

    pub fn with_config(config: Config) -> Result<Self, SkipListError> {
        let generator = match config.seed() {
            | Some(seed) => GeometricalLevelGenerator::seeded(config.probability(), seed)?,
            | None => GeometricalLevelGenerator::new(config.probability())?,
        };
        Ok(Self::with_generator(config.initial_height(), generator))
    }
}

impl<T: Ord> Default for SkipList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, G> SkipList<T, G> {
    /// Number of elements.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of levels, always at least 1.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The routing-only entry node. Follow its links with [`SkipList::node`].
    pub fn head(&self) -> &Node<T> {
        &self.arena[self.head]
    }

    /// Resolve a link. Returns `None` for handles this list does not hold.
    pub fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.arena.get(id)
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }
}

impl<T: Ord, G: LevelGenerator> SkipList<T, G> {
    /// An empty list starting with `height` levels, drawing its coin flips
    /// from `generator`. A height of 0 falls back to 1.
    pub fn with_generator(height: usize, generator: G) -> Self {
        let height = height.max(DEFAULT_INITIAL_HEIGHT);
        let mut arena = Arena::new();
        let head = arena.alloc(Node::head(height));
        SkipList {
            arena,
            head,
            size: 0,
            height,
            initial_height: height,
            generator,
            stats: Stats::default(),
        }
    }

    #[instrument(level = "trace", skip_all, fields(size = self.size, height = self.height))]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// The first node with a key equal to `key` met on the way down.
    #[instrument(level = "trace", skip_all, fields(size = self.size, height = self.height))]
    pub fn get<Q>(&self, key: &Q) -> Option<&Node<T>>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|id| &self.arena[id])
    }

    /// Insert `value` with a random height. Equal keys are kept; the new
    /// node goes in front of the existing ones.
    #[instrument(level = "trace", skip_all, fields(size = self.size, height = self.height))]
    pub fn insert(&mut self, value: T) -> NodeId {
        // only levels no node occupies yet, so nothing else moves
        self.raise_height(max_height(self.size));

        let crumbs = self.breadcrumbs(&value);
        let height = self.generator.random(self.height);
        let id = self.link(value, height, &crumbs);
        self.settle_after_insert();
        id
    }

    /// Insert `value` with exactly `height` levels. The height is not capped
    /// by the size of the list: if it is taller than the list, the list is
    /// raised to match so the node is reachable on every level.
    #[instrument(level = "trace", skip_all, fields(size = self.size, height = self.height))]
    pub fn insert_with_height(&mut self, value: T, height: usize) -> Result<NodeId, SkipListError> {
        if height == 0 {
            return Err(SkipListError::ZeroHeight);
        }
        self.raise_height(height);

        let crumbs = self.breadcrumbs(&value);
        let id = self.link(value, height, &crumbs);
        self.settle_after_insert();
        Ok(id)
    }

    /// Remove one element equal to `key` and return it. With duplicates,
    /// which one goes is unspecified. Missing keys are a no-op.
    #[instrument(level = "trace", skip_all, fields(size = self.size, height = self.height))]
    pub fn delete<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut crumbs = vec![self.head; self.height];
        let mut cur = self.head;
        let mut found = None;

        for level in (0..self.height).rev() {
            found = None;
            while let Some(next) = self.arena[cur].next(level) {
                match self.cmp_at(next, key) {
                    | Ordering::Less => cur = next,
                    | Ordering::Equal => {
                        crumbs[level] = cur;
                        found = Some(next);
                        break;
                    },
                    | Ordering::Greater => break,
                }
            }
        }

        // only a match on level 0 counts
        let target = found?;
        for (level, &crumb) in crumbs.iter().enumerate().take(self.arena[target].height()) {
            debug_assert_eq!(self.arena[crumb].next(level), Some(target));
            let after = self.arena[target].next(level);
            self.arena[crumb].set_next(level, after);
        }

        let node = self.arena.release(target)?;
        self.stats.record_release();
        trace!(id = %target, height = node.height(), "released node");

        self.size -= 1;
        let ceiling = max_height(self.size).max(DEFAULT_INITIAL_HEIGHT);
        if self.height > 1 && ceiling < self.height {
            self.trim(ceiling);
        }

        node.into_value()
    }

    fn find<Q>(&self, key: &Q) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cur = self.head;
        for level in (0..self.height).rev() {
            while let Some(next) = self.arena[cur].next(level) {
                match self.cmp_at(next, key) {
                    | Ordering::Less => cur = next,
                    | Ordering::Equal => return Some(next),
                    | Ordering::Greater => break,
                }
            }
        }
        None
    }

    /// The last node before the insertion point on every level, indexed by
    /// level. The insertion point is in front of the first key not less than
    /// `key`.
    fn breadcrumbs<Q>(&self, key: &Q) -> Vec<NodeId>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut crumbs = vec![self.head; self.height];
        let mut cur = self.head;
        for level in (0..self.height).rev() {
            while let Some(next) = self.arena[cur].next(level) {
                if self.cmp_at(next, key) != Ordering::Less {
                    break;
                }
                cur = next;
            }
            crumbs[level] = cur;
        }
        crumbs
    }

    /// Compare the node behind a link with `key`. The head is never the
    /// target of a link; it orders first if it ever is.
    #[inline]
    fn cmp_at<Q>(&self, id: NodeId, key: &Q) -> Ordering
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.arena[id].value() {
            | Some(value) => value.borrow().cmp(key),
            | None => Ordering::Less,
        }
    }

    /// Allocate a node and splice it in after the breadcrumb on each of its
    /// levels. `crumbs` must cover at least `height` levels.
    fn link(&mut self, value: T, height: usize, crumbs: &[NodeId]) -> NodeId {
        let id = self.arena.alloc(Node::new(value, height));
        self.stats.record_alloc();
        trace!(%id, height, "allocated node");

        for (level, &crumb) in crumbs.iter().enumerate().take(height) {
            let after = self.arena[crumb].next(level);
            self.arena[id].set_next(level, after);
            self.arena[crumb].set_next(level, Some(id));
        }
        id
    }

    fn settle_after_insert(&mut self) {
        self.size += 1;
        while self.height < max_height(self.size) {
            self.grow();
        }
    }

    /// Give the head more empty levels. Element nodes are untouched.
    fn raise_height(&mut self, height: usize) {
        if height <= self.height {
            return;
        }
        debug!(from = self.height, to = height, "raising skiplist height");
        let head = &mut self.arena[self.head];
        while head.height() < height {
            head.grow();
        }
        self.height = height;
    }

    /// Add one level to the list. Every node on the current top lane gets a
    /// coin flip, and the winners are chained together on the new level.
    fn grow(&mut self) {
        let top = self.height - 1;
        debug!(from = self.height, size = self.size, "growing skiplist");

        self.arena[self.head].grow();
        let mut last = self.head;
        let mut cur = self.arena[self.head].next(top);
        while let Some(id) = cur {
            if self.arena[id].maybe_grow(&mut self.generator) {
                self.arena[last].set_next(top + 1, Some(id));
                last = id;
            }
            cur = self.arena[id].next(top);
        }

        self.height += 1;
        self.stats.record_grow();
    }

    /// Cut every node down to `height` levels. Any node taller than that is
    /// on lane `height - 1`, so walking that one lane visits all of them.
    fn trim(&mut self, height: usize) {
        debug!(from = self.height, to = height, size = self.size, "trimming skiplist");

        let lane = height - 1;
        let mut cur = Some(self.head);
        while let Some(id) = cur {
            let node = &mut self.arena[id];
            cur = node.next(lane);
            if node.height() > height {
                node.trim(height);
            }
        }

        self.height = height;
        self.stats.record_trim();
    }
}

// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::collections::HashMap;

use tracing::instrument;

use crate::{
    config::DEFAULT_INITIAL_HEIGHT,
    errs::SkipListError,
    skiplist::{
        max_height,
        node::NodeId,
        SkipList,
    },
};

impl<T: Ord, G> SkipList<T, G> {
    /// Walk every lane and check the structure end to end:
    ///
    /// - the head is exactly as tall as the list, and no node is taller
    /// - level 0 holds `size` nodes in non-decreasing order
    /// - every link on level `L` targets a node at least `L + 1` tall, and
    ///   the lane visits exactly the nodes of level 0 that are that tall
    /// - the height is at least `ceil(log2(size))`, and 1 when empty; a list
    ///   that never held an element keeps the height it was built with
    ///
    /// This is linear in the size and meant for tests and debugging.
    #[instrument(level = "debug", skip_all, fields(size = self.size, height = self.height))]
    pub fn validate(&self) -> Result<(), SkipListError> {
        let head = &self.arena[self.head];
        if head.height() != self.height {
            return Err(SkipListError::HeadHeightMismatch {
                head: head.height(),
                list: self.height,
            });
        }

        let untouched = self.stats.nodes_allocated() == 0 && self.height == self.initial_height;
        if self.size == 0 && self.height != DEFAULT_INITIAL_HEIGHT && !untouched {
            return Err(SkipListError::EmptyListTooTall(self.height));
        }
        let target = max_height(self.size);
        if self.height < target {
            return Err(SkipListError::HeightBelowTarget {
                height: self.height,
                target,
                size: self.size,
            });
        }

        let base = self.base_lane()?;
        let positions: HashMap<NodeId, usize> =
            base.iter().enumerate().map(|(pos, &id)| (id, pos)).collect();
        for level in 1..self.height {
            self.check_lane(level, &base, &positions)?;
        }
        Ok(())
    }

    /// Level 0 in order.
    fn base_lane(&self) -> Result<Vec<NodeId>, SkipListError> {
        let mut lane = Vec::with_capacity(self.size);
        let mut prev: Option<&T> = None;
        let mut cur = self.arena[self.head].next(0);

        while let Some(id) = cur {
            // a cycle would never end, and a lane can't outgrow the arena
            if lane.len() >= self.arena.live() {
                return Err(SkipListError::SizeMismatch {
                    expected: self.size,
                    found: lane.len() + 1,
                });
            }

            let node = self
                .arena
                .get(id)
                .ok_or(SkipListError::DanglingLink { level: 0 })?;
            if node.height() > self.height {
                return Err(SkipListError::NodeTooTall {
                    position: lane.len(),
                    height: node.height(),
                    list: self.height,
                });
            }

            let value = node.value();
            if let (Some(prev), Some(value)) = (prev, value) {
                if prev > value {
                    return Err(SkipListError::Unsorted {
                        position: lane.len(),
                    });
                }
            }
            prev = value;

            lane.push(id);
            cur = node.next(0);
        }

        if lane.len() != self.size {
            return Err(SkipListError::SizeMismatch {
                expected: self.size,
                found: lane.len(),
            });
        }
        Ok(lane)
    }

    fn check_lane(
        &self,
        level: usize,
        base: &[NodeId],
        positions: &HashMap<NodeId, usize>,
    ) -> Result<(), SkipListError> {
        let mut expected = base
            .iter()
            .enumerate()
            .filter(|(_, id)| self.arena[**id].height() > level);

        let mut cur = self.arena[self.head].next(level);
        while let Some(id) = cur {
            if !positions.contains_key(&id) {
                return Err(SkipListError::DanglingLink { level });
            }
            let node = &self.arena[id];
            if node.height() <= level {
                return Err(SkipListError::ShortLink {
                    level,
                    height: node.height(),
                });
            }
            match expected.next() {
                | Some((_, &want)) if want == id => {},
                | Some((position, _)) => return Err(SkipListError::SkippedNode { level, position }),
                // every tall node is on level 0, so this lane went backwards
                | None => {
                    return Err(SkipListError::SkippedNode {
                        level,
                        position: positions[&id],
                    })
                },
            }
            cur = node.next(level);
        }

        match expected.next() {
            | Some((position, _)) => Err(SkipListError::SkippedNode { level, position }),
            | None => Ok(()),
        }
    }
}

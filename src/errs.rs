// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkipListError {
    #[error("coin probability must be in (0, 1), got {0}")]
    InvalidProbability(f64),
    #[error("explicit node height must be non-zero")]
    ZeroHeight,

    // structural audit failures, see `SkipList::validate`
    #[error("head height {head} does not match list height {list}")]
    HeadHeightMismatch { head: usize, list: usize },
    #[error("node at position {position} has height {height} above list height {list}")]
    NodeTooTall {
        position: usize,
        height: usize,
        list: usize,
    },
    #[error("level 0 is out of order at position {position}")]
    Unsorted { position: usize },
    #[error("link at level {level} targets a node of height {height}")]
    ShortLink { level: usize, height: usize },
    #[error("link at level {level} skips over an eligible node at position {position}")]
    SkippedNode { level: usize, position: usize },
    #[error("link at level {level} points at a released node")]
    DanglingLink { level: usize },
    #[error("size is {expected} but level 0 holds {found} nodes")]
    SizeMismatch { expected: usize, found: usize },
    #[error("height {height} is below the target {target} for size {size}")]
    HeightBelowTarget {
        height: usize,
        target: usize,
        size: usize,
    },
    #[error("empty list has height {0}, expected 1")]
    EmptyListTooTall(usize),
}

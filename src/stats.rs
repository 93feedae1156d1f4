// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use getset::CopyGetters;

/// Counters for the expensive or allocating paths of a single list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Stats {
    /// full-list passes that added a level
    grow_passes: usize,
    /// full-list passes that removed levels
    trim_passes: usize,
    nodes_allocated: usize,
    nodes_released: usize,
}

impl Stats {
    pub(crate) fn record_grow(&mut self) {
        self.grow_passes += 1;
    }

    pub(crate) fn record_trim(&mut self) {
        self.trim_passes += 1;
    }

    pub(crate) fn record_alloc(&mut self) {
        self.nodes_allocated += 1;
    }

    pub(crate) fn record_release(&mut self) {
        self.nodes_released += 1;
    }
}

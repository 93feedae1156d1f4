// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

/// Defaults and construction options for a list.
pub mod config;
pub mod errs;
/// A probabilistic [`skip list`] with size-driven height management.
///
/// [`skip list`]: https://en.wikipedia.org/wiki/Skip_list
pub mod skiplist;
pub mod stats;

pub use crate::{
    config::Config,
    errs::SkipListError,
    skiplist::{
        level_generator::{
            GeometricalLevelGenerator,
            LevelGenerator,
        },
        node::{
            Node,
            NodeId,
        },
        SkipList,
    },
    stats::Stats,
};

// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use rand::prelude::*;

use crate::{
    config::DEFAULT_PROBABILITY,
    errs::SkipListError,
};

/// Upon the insertion of a new node in the list, the node is replicated to
/// higher levels with a certain probability as determined by a
/// `LevelGenerator`. The same coin decides which nodes join a new top level
/// when the whole list grows.
pub trait LevelGenerator {
    /// One coin flip. `true` promotes a node by one level.
    fn flip(&mut self) -> bool;

    /// Generate a random node height in the range `[1, max]`.
    ///
    /// Starts at 1 and keeps flipping while the coin comes up heads, so the
    /// heights are geometrically distributed. A `max` of 0 is treated as 1.
    fn random(&mut self, max: usize) -> usize {
        let mut h = 1;
        while h < max && self.flip() {
            h += 1;
        }
        h
    }
}

/// A level generator which will produce geometrically distributed heights.
///
/// The probability of generating height `n` is `p` times the probability of
/// generating height `n-1`, truncated at the maximum passed to
/// [`LevelGenerator::random`].
#[derive(Debug, Clone)]
pub struct GeometricalLevelGenerator {
    p: f64,
    rng: SmallRng, // Fast generator
}

impl GeometricalLevelGenerator {
    /// Create a new generator with `p` as the probability that a given node
    /// is present in the next level, seeded from the os.
    pub fn new(p: f64) -> Result<Self, SkipListError> {
        Self::with_rng(p, SmallRng::from_entropy())
    }

    /// Same as [`GeometricalLevelGenerator::new`] with a fixed seed, so the
    /// shape of a list is reproducible.
    pub fn seeded(p: f64, seed: u64) -> Result<Self, SkipListError> {
        Self::with_rng(p, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(p: f64, rng: SmallRng) -> Result<Self, SkipListError> {
        // also rejects NaN
        if !(p > 0.0 && p < 1.0) {
            return Err(SkipListError::InvalidProbability(p));
        }
        Ok(GeometricalLevelGenerator { p, rng })
    }

    pub fn probability(&self) -> f64 {
        self.p
    }
}

impl Default for GeometricalLevelGenerator {
    /// A fair coin seeded from the os.
    fn default() -> Self {
        GeometricalLevelGenerator {
            p: DEFAULT_PROBABILITY,
            rng: SmallRng::from_entropy(),
        }
    }
}

impl LevelGenerator for GeometricalLevelGenerator {
    fn flip(&mut self) -> bool {
        self.rng.gen_bool(self.p)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;

    use super::*;

    /// Replays a fixed sequence of flips, then answers `false` forever.
    #[derive(Debug, Default)]
    pub(crate) struct ScriptedLevelGenerator {
        flips: VecDeque<bool>,
    }

    impl ScriptedLevelGenerator {
        pub(crate) fn new(flips: &[bool]) -> Self {
            ScriptedLevelGenerator {
                flips: flips.iter().copied().collect(),
            }
        }

        pub(crate) fn push(&mut self, flips: &[bool]) {
            self.flips.extend(flips.iter().copied());
        }
    }

    impl LevelGenerator for ScriptedLevelGenerator {
        fn flip(&mut self) -> bool {
            self.flips.pop_front().unwrap_or(false)
        }
    }

    #[test]
    fn invalid_p_0() {
        assert_eq!(
            GeometricalLevelGenerator::new(0.0).unwrap_err(),
            SkipListError::InvalidProbability(0.0)
        );
    }

    #[test]
    fn invalid_p_1() {
        assert!(GeometricalLevelGenerator::new(1.0).is_err());
        assert!(GeometricalLevelGenerator::new(f64::NAN).is_err());
    }

    #[test]
    fn new() {
        let generator = GeometricalLevelGenerator::new(0.5).unwrap();
        assert_eq!(generator.probability(), 0.5);
    }

    #[test]
    fn random_stays_in_range() {
        let mut generator = GeometricalLevelGenerator::seeded(0.9, 42).unwrap();
        for max in 0..16 {
            for _ in 0..100 {
                let h = generator.random(max);
                assert!(h >= 1);
                assert!(h <= max.max(1));
            }
        }
    }

    #[test]
    fn seeded_is_reproducible() {
        let mut a = GeometricalLevelGenerator::seeded(0.5, 7).unwrap();
        let mut b = GeometricalLevelGenerator::seeded(0.5, 7).unwrap();
        let left: Vec<usize> = (0..64).map(|_| a.random(32)).collect();
        let right: Vec<usize> = (0..64).map(|_| b.random(32)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn scripted_heights() {
        let mut generator = ScriptedLevelGenerator::new(&[true, true, false, true]);
        // two heads then a tail
        assert_eq!(generator.random(8), 3);
        // one head, then the script runs dry
        assert_eq!(generator.random(8), 2);
        assert_eq!(generator.random(8), 1);
    }

    #[test]
    fn fair_coin_is_roughly_fair() {
        let mut generator = GeometricalLevelGenerator::seeded(0.5, 1234).unwrap();
        let heads = (0..10_000).filter(|_| generator.flip()).count();
        assert!((4_000..6_000).contains(&heads), "heads: {}", heads);
    }
}

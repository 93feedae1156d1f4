// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use getset::CopyGetters;

/// A fair coin. Every node reaches the next level half of the time.
pub const DEFAULT_PROBABILITY: f64 = 0.5;

/// Lists start with a single level and grow with their size.
pub const DEFAULT_INITIAL_HEIGHT: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Config {
    /// number of levels the head starts with
    initial_height: usize,
    /// chance that a coin flip promotes a node one level
    probability: f64,
    /// fixed rng seed, `None` seeds from the os
    seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            initial_height: DEFAULT_INITIAL_HEIGHT,
            probability: DEFAULT_PROBABILITY,
            seed: None,
        }
    }
}

impl Config {
    /// A height of zero falls back to [`DEFAULT_INITIAL_HEIGHT`].
    pub fn with_initial_height(mut self, height: usize) -> Self {
        self.initial_height = height.max(DEFAULT_INITIAL_HEIGHT);
        self
    }

    /// The probability is checked when the list is built, not here.
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.initial_height(), 1);
        assert_eq!(config.probability(), 0.5);
        assert_eq!(config.seed(), None);
    }

    #[test]
    fn test_config_zero_height_falls_back() {
        let config = Config::default().with_initial_height(0);
        assert_eq!(config.initial_height(), DEFAULT_INITIAL_HEIGHT);

        let config = Config::default().with_initial_height(4).with_seed(7);
        assert_eq!(config.initial_height(), 4);
        assert_eq!(config.seed(), Some(7));
    }
}

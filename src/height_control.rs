use crate::map::SkipListMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Height cap used by `Default`-constructed maps.
pub const DEFAULT_MAX_HEIGHT: usize = 32;

/// Upgrade probability used by `Default`-constructed maps. 0.5 and 0.25 are
/// the usual choices.
pub const DEFAULT_UPGRADE_PROBABILITY: f64 = 0.5;

/// Used to generate the height for any given node when inserting data.
///
/// The randomness behind the skip list goes through this trait, so a seeded
/// generator yields a fully reproducible structure in tests.
pub trait HeightControl {
    /// Largest height `get_height` may return.
    fn max_height(&self) -> usize;

    /// Draws the height for the next inserted node, in `0..=max_height()`.
    fn get_height(&mut self) -> usize;
}

pub struct GeometricalGenerator {
    upgrade_probability_: f64,
    max_height_: usize,
    rng_: StdRng,
}

impl GeometricalGenerator {
    pub fn new(max_height: usize, upgrade_probability: f64) -> GeometricalGenerator {
        Self::from_rng(max_height, upgrade_probability, StdRng::from_entropy())
    }

    /// Deterministic variant: the same seed and the same draw sequence give
    /// the same heights.
    pub fn with_seed(
        max_height: usize,
        upgrade_probability: f64,
        seed: u64,
    ) -> GeometricalGenerator {
        Self::from_rng(
            max_height,
            upgrade_probability,
            StdRng::seed_from_u64(seed),
        )
    }

    fn from_rng(max_height: usize, upgrade_probability: f64, rng: StdRng) -> GeometricalGenerator {
        assert!(upgrade_probability > 0.0);
        assert!(upgrade_probability < 1.0);
        assert!(max_height > 0);

        GeometricalGenerator {
            upgrade_probability_: upgrade_probability,
            max_height_: max_height,
            rng_: rng,
        }
    }
}

impl HeightControl for GeometricalGenerator {
    #[inline(always)]
    fn max_height(&self) -> usize {
        self.max_height_
    }

    fn get_height(&mut self) -> usize {
        // Simulates a random variate with geometric distribution. The idea is
        // that we are modelling the number of upgrades until the first
        // failure, truncated at the height cap.
        let mut h = 0;

        while h < self.max_height_ {
            let throw: f64 = self.rng_.gen();
            if throw >= self.upgrade_probability_ {
                return h;
            }

            h += 1;
        }

        h
    }
}

impl<K, V> Default for SkipListMap<K, V> {
    #[inline(always)]
    fn default() -> Self {
        let generator =
            GeometricalGenerator::new(DEFAULT_MAX_HEIGHT, DEFAULT_UPGRADE_PROBABILITY);
        Self::new(Box::new(generator))
    }
}

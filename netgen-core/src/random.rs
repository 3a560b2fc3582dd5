//! Seeded random sources driving the generators.

use rand::{Rng, SeedableRng, distributions::Standard};
use rand_chacha::ChaCha8Rng;

/// Seed used when no explicit seed has been configured.
pub const DEFAULT_SEED: u64 = 0x5EED_CAFE;

/// A reseedable stream of uniform draws.
///
/// Implementations must reproduce an identical sequence for a fixed seed and
/// call sequence; the generators depend on that for reproducible
/// topologies. A source carries mutable state and must not be shared between
/// concurrent generation runs.
pub trait RandomSource {
    /// Restarts the stream from `seed`.
    fn set_seed(&mut self, seed: u64);

    /// Draws an integer uniformly from `[0, bound)`. A zero bound yields 0.
    fn next_int(&mut self, bound: usize) -> usize;

    /// Draws a float uniformly from `[0, 1)`.
    fn next_double(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn set_seed(&mut self, seed: u64) {
        (**self).set_seed(seed);
    }

    fn next_int(&mut self, bound: usize) -> usize {
        (**self).next_int(bound)
    }

    fn next_double(&mut self) -> f64 {
        (**self).next_double()
    }
}

/// [`RandomSource`] backed by [`ChaCha8Rng`].
///
/// The generator is portable and value-stable, and integer draws are sampled
/// over `u64` whatever the pointer width, so a seed yields the same sequence
/// on every platform.
///
/// # Examples
/// ```
/// use netgen_core::{RandomSource, SeededRandom};
///
/// let mut a = SeededRandom::new(7);
/// let mut b = SeededRandom::new(7);
/// let draws: Vec<_> = (0..4).map(|_| a.next_int(10)).collect();
/// assert!(draws.iter().all(|&d| d < 10));
/// assert_eq!(draws, (0..4).map(|_| b.next_int(10)).collect::<Vec<_>>());
/// ```
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    /// Creates a source positioned at the start of the stream for `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RandomSource for SeededRandom {
    fn set_seed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    fn next_int(&mut self, bound: usize) -> usize {
        let Ok(wide) = u64::try_from(bound) else {
            return 0;
        };
        if wide == 0 {
            return 0;
        }
        usize::try_from(self.rng.gen_range(0..wide)).unwrap_or(0)
    }

    fn next_double(&mut self) -> f64 {
        self.rng.sample(Standard)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn reseeding_restarts_the_stream() {
        let mut source = SeededRandom::new(11);
        let first: Vec<_> = (0..8).map(|_| source.next_int(1_000)).collect();
        source.next_double();
        source.set_seed(11);
        let second: Vec<_> = (0..8).map(|_| source.next_int(1_000)).collect();
        assert_eq!(first, second);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(97)]
    fn next_int_stays_below_bound(#[case] bound: usize) {
        let mut source = SeededRandom::default();
        assert!((0..256).all(|_| source.next_int(bound) < bound));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn bounds_beyond_u32_are_sampled_in_full() {
        let mut source = SeededRandom::new(9);
        let bound = 1_usize << 40;
        let draws: Vec<_> = (0..64).map(|_| source.next_int(bound)).collect();
        assert!(draws.iter().all(|&d| d < bound));
        assert!(draws.iter().any(|&d| d > usize::try_from(u32::MAX).unwrap_or(0)));
    }

    #[test]
    fn streams_match_the_underlying_generator() {
        let mut source = SeededRandom::new(21);
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for bound in [2_usize, 10, 1_000, 65_536] {
            let expected = rng.gen_range(0..bound as u64);
            assert_eq!(source.next_int(bound) as u64, expected);
        }
        let expected: f64 = rng.sample(Standard);
        assert_eq!(source.next_double().to_bits(), expected.to_bits());
    }

    #[test]
    fn zero_bound_yields_zero() {
        assert_eq!(SeededRandom::default().next_int(0), 0);
    }

    #[test]
    fn next_double_is_in_unit_interval() {
        let mut source = SeededRandom::new(3);
        assert!((0..256).map(|_| source.next_double()).all(|d| (0.0..1.0).contains(&d)));
    }

    #[test]
    fn boxed_sources_delegate() {
        let mut boxed: Box<dyn RandomSource> = Box::new(SeededRandom::new(5));
        let mut plain = SeededRandom::new(5);
        assert_eq!(boxed.next_int(50), plain.next_int(50));
    }
}

//! Seeded uniform white noise.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// White noise in [-1, 1]. Deterministic for a given seed.
#[derive(Debug, Clone)]
pub struct WhiteNoise {
    rng: Pcg32,
    seed: u64,
}

impl WhiteNoise {
    pub fn new(seed: u64) -> Self {
        WhiteNoise {
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    #[inline]
    pub fn next_sample(&mut self) -> f64 {
        self.rng.random_range(-1.0..=1.0)
    }

    /// Restart the stream from its seed.
    pub fn reset(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_in_range() {
        let mut n = WhiteNoise::new(7);
        for _ in 0..100_000 {
            let s = n.next_sample();
            assert!((-1.0..=1.0).contains(&s), "noise out of range: {s}");
        }
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = WhiteNoise::new(42);
        let mut b = WhiteNoise::new(42);
        for _ in 0..1000 {
            assert_eq!(a.next_sample().to_bits(), b.next_sample().to_bits());
        }
    }

    #[test]
    fn different_seeds_differ() {
        let mut a = WhiteNoise::new(1);
        let mut b = WhiteNoise::new(2);
        let same = (0..1000)
            .filter(|_| a.next_sample() == b.next_sample())
            .count();
        assert!(same < 10, "{same} identical samples");
    }

    #[test]
    fn reset_replays_stream() {
        let mut n = WhiteNoise::new(9);
        let first: Vec<f64> = (0..64).map(|_| n.next_sample()).collect();
        n.reset();
        let again: Vec<f64> = (0..64).map(|_| n.next_sample()).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn roughly_zero_mean() {
        let mut n = WhiteNoise::new(3);
        let mean: f64 = (0..100_000).map(|_| n.next_sample()).sum::<f64>() / 100_000.0;
        assert!(mean.abs() < 0.02, "mean {mean}");
    }
}

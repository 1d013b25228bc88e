//! Dance-proportional source selection for onlookers.
//!
//! Each worker's dance contributes a weight proportional to the quality of
//! its source. Onlookers sample a worker with those probabilities, with
//! replacement, so strong sources attract more exploitation while weaker
//! ones still get visited.
//!
//! # Cleaning
//!
//! Qualities are sanitized before normalization: every non-finite value
//! (NaN, `±inf`) contributes `0`, and the absolute value of what remains
//! is used as the weight. When every weight is zero (a flat landscape)
//! the distribution falls back to uniform.
//!
//! # Reference
//!
//! Karaboga, D. (2005). "An Idea Based on Honey Bee Swarm for Numerical
//! Optimization", Technical Report TR06, Erciyes University.

use rand::Rng;

/// Selection distribution built from one round of worker dances.
#[derive(Debug, Clone, PartialEq)]
pub struct Choreography {
    probabilities: Vec<f64>,
    uniform: bool,
}

impl Choreography {
    /// Builds the distribution from the workers' dance qualities.
    pub fn from_dances(qualities: &[f64]) -> Self {
        let n = qualities.len();
        let weights: Vec<f64> = qualities.iter().map(|&q| clean(q)).collect();

        // Scale by the maximum first so the sum cannot overflow.
        let max = weights.iter().copied().fold(0.0_f64, f64::max);
        if max <= 0.0 {
            return Self::uniform(n);
        }
        let scaled: Vec<f64> = weights.iter().map(|w| w / max).collect();
        let total: f64 = scaled.iter().sum();

        Self {
            probabilities: scaled.iter().map(|w| w / total).collect(),
            uniform: false,
        }
    }

    /// Equal probability for each of `n` sources.
    pub fn uniform(n: usize) -> Self {
        let p = if n == 0 { 0.0 } else { 1.0 / n as f64 };
        Self {
            probabilities: vec![p; n],
            uniform: true,
        }
    }

    /// Selection probability of each source, in dance order.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Whether the flat-landscape fallback is in effect.
    pub fn is_uniform(&self) -> bool {
        self.uniform
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Samples a source index.
    ///
    /// Returns `None` when there is nothing to choose from.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        let n = self.probabilities.len();
        if n == 0 {
            return None;
        }
        if self.uniform {
            return Some(rng.random_range(0..n));
        }

        let threshold = rng.random_range(0.0..1.0);
        let mut cumulative = 0.0;
        for (i, &p) in self.probabilities.iter().enumerate() {
            cumulative += p;
            if cumulative > threshold {
                return Some(i);
            }
        }

        // Rounding left the cumulative sum just below the threshold.
        self.probabilities.iter().rposition(|&p| p > 0.0)
    }
}

/// Weight contributed by one dance.
fn clean(quality: f64) -> f64 {
    if quality.is_finite() {
        quality.abs()
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_proportional_probabilities() {
        let c = Choreography::from_dances(&[1.0, 3.0]);
        assert!(!c.is_uniform());
        assert!((c.probabilities()[0] - 0.25).abs() < 1e-12);
        assert!((c.probabilities()[1] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_all_zero_falls_back_to_uniform() {
        let c = Choreography::from_dances(&[0.0, 0.0, 0.0, 0.0]);
        assert!(c.is_uniform());
        for &p in c.probabilities() {
            assert!((p - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn test_non_finite_contributes_nothing() {
        let c = Choreography::from_dances(&[f64::NEG_INFINITY, f64::NAN, 2.0, f64::INFINITY]);
        assert_eq!(c.probabilities(), &[0.0, 0.0, 1.0, 0.0]);

        let flat = Choreography::from_dances(&[f64::NEG_INFINITY, f64::NAN]);
        assert!(flat.is_uniform());
    }

    #[test]
    fn test_negative_qualities_use_magnitude() {
        let c = Choreography::from_dances(&[-1.0, 1.0]);
        assert!((c.probabilities()[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_huge_qualities_do_not_overflow() {
        let c = Choreography::from_dances(&[f64::MAX, f64::MAX]);
        assert!((c.probabilities()[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_sample_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(Choreography::from_dances(&[]).sample(&mut rng).is_none());
    }

    #[test]
    fn test_sample_never_picks_zero_weight() {
        let mut rng = StdRng::seed_from_u64(42);
        let c = Choreography::from_dances(&[0.0, 5.0, 0.0]);
        for _ in 0..1000 {
            assert_eq!(c.sample(&mut rng), Some(1));
        }
    }

    #[test]
    fn test_sample_frequencies_follow_weights() {
        let mut rng = StdRng::seed_from_u64(42);
        let c = Choreography::from_dances(&[1.0, 9.0]);
        let hits = (0..10_000)
            .filter(|_| c.sample(&mut rng) == Some(1))
            .count();
        assert!(hits > 8_500 && hits < 9_500, "got {hits} hits");
    }

    proptest! {
        #[test]
        fn prop_probabilities_normalized(
            qualities in prop::collection::vec(-1e6f64..1e6, 1..50)
        ) {
            let c = Choreography::from_dances(&qualities);
            let sum: f64 = c.probabilities().iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-9);
            prop_assert!(c.probabilities().iter().all(|&p| p >= 0.0));
        }
    }
}

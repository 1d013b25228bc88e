//! Core trait definitions for the bee colony.
//!
//! [`AbcProblem`] is the contract between the generic colony engine and a
//! domain that knows how to build, perturb and score candidate solutions.
//! [`Objective`] is the read-only scoring view every bee shares.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;

/// Defines an optimization problem for the bee colony.
///
/// The colony never inspects solutions; it only asks the problem to
/// create them, perturb them and score them.
///
/// # Thread Safety
///
/// `AbcProblem` must be `Send + Sync` because candidate evaluation may run
/// in parallel using rayon.
///
/// # Implementing
///
/// ```
/// use biscuit_abc::abc::AbcProblem;
/// use rand::Rng;
///
/// struct Ones(usize);
///
/// impl AbcProblem for Ones {
///     type Solution = Vec<bool>;
///     type Error = std::convert::Infallible;
///
///     fn generate<R: Rng>(&self, rng: &mut R) -> Result<Vec<bool>, Self::Error> {
///         Ok((0..self.0).map(|_| rng.random_bool(0.5)).collect())
///     }
///
///     fn mutate<R: Rng>(&self, bits: &Vec<bool>, rng: &mut R) -> Result<Vec<bool>, Self::Error> {
///         let mut next = bits.clone();
///         let i = rng.random_range(0..next.len());
///         next[i] = !next[i];
///         Ok(next)
///     }
///
///     fn evaluate(&self, bits: &Vec<bool>) -> f64 {
///         bits.iter().filter(|&&b| b).count() as f64
///     }
/// }
/// ```
pub trait AbcProblem: Send + Sync {
    /// The candidate solution type.
    type Solution: Clone + Send + Sync;

    /// Error raised when the problem's own data is unusable.
    ///
    /// Such errors abort the run.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Creates a fresh random candidate.
    ///
    /// Must be callable any number of times with independent results.
    fn generate<R: Rng>(&self, rng: &mut R) -> Result<Self::Solution, Self::Error>;

    /// Produces a neighbor of `solution` by changing a single component.
    ///
    /// Must return a new candidate and leave `solution` untouched.
    fn mutate<R: Rng>(
        &self,
        solution: &Self::Solution,
        rng: &mut R,
    ) -> Result<Self::Solution, Self::Error>;

    /// Scores a candidate. Higher is better unless the colony minimizes.
    fn evaluate(&self, solution: &Self::Solution) -> f64;

    /// Whether a candidate satisfies the problem's constraints.
    ///
    /// Infeasible candidates score zero. The default accepts everything.
    fn is_feasible(&self, _solution: &Self::Solution) -> bool {
        true
    }

    /// Called at the end of each generation with the best quality so far.
    ///
    /// The default implementation is a no-op.
    fn on_generation(&self, _generation: usize, _best_quality: f64) {}
}

/// Shared, read-only evaluation function used by every bee.
///
/// Wraps the problem's [`evaluate`](AbcProblem::evaluate) so that the
/// colony always maximizes: infeasible candidates score `0.0` and the
/// score is negated when minimizing.
#[derive(Debug)]
pub struct Objective<'p, P> {
    problem: &'p P,
    minimize: bool,
    evaluations: AtomicUsize,
}

impl<'p, P: AbcProblem> Objective<'p, P> {
    /// Creates the objective for `problem`.
    pub fn new(problem: &'p P, minimize: bool) -> Self {
        Self {
            problem,
            minimize,
            evaluations: AtomicUsize::new(0),
        }
    }

    /// Scores a candidate in the colony's maximizing convention.
    pub fn score(&self, solution: &P::Solution) -> f64 {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        if !self.problem.is_feasible(solution) {
            return 0.0;
        }
        let value = self.problem.evaluate(solution);
        if self.minimize {
            -value
        } else {
            value
        }
    }

    /// Converts an internal quality back to the caller's objective value.
    pub fn to_objective(&self, quality: f64) -> f64 {
        if self.minimize {
            -quality
        } else {
            quality
        }
    }

    /// Number of times [`score`](Self::score) has been called.
    pub fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::Relaxed)
    }

    /// The underlying problem.
    pub fn problem(&self) -> &'p P {
        self.problem
    }

    /// Whether the caller's objective is minimized.
    pub fn minimizes(&self) -> bool {
        self.minimize
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Small problems shared by the colony's unit tests.

    use super::*;
    use std::convert::Infallible;

    /// Vector of small integers; quality is the sum, mutation changes one entry.
    pub struct SumProblem {
        pub len: usize,
        pub max: u32,
    }

    impl AbcProblem for SumProblem {
        type Solution = Vec<u32>;
        type Error = Infallible;

        fn generate<R: Rng>(&self, rng: &mut R) -> Result<Vec<u32>, Infallible> {
            Ok((0..self.len).map(|_| rng.random_range(0..=self.max)).collect())
        }

        fn mutate<R: Rng>(&self, v: &Vec<u32>, rng: &mut R) -> Result<Vec<u32>, Infallible> {
            let mut next = v.clone();
            let i = rng.random_range(0..next.len());
            next[i] = rng.random_range(0..=self.max);
            Ok(next)
        }

        fn evaluate(&self, v: &Vec<u32>) -> f64 {
            v.iter().map(|&x| x as f64).sum()
        }
    }

    /// Every candidate scores zero.
    pub struct FlatProblem;

    impl AbcProblem for FlatProblem {
        type Solution = u32;
        type Error = Infallible;

        fn generate<R: Rng>(&self, rng: &mut R) -> Result<u32, Infallible> {
            Ok(rng.random_range(0..100))
        }

        fn mutate<R: Rng>(&self, _x: &u32, rng: &mut R) -> Result<u32, Infallible> {
            Ok(rng.random_range(0..100))
        }

        fn evaluate(&self, _x: &u32) -> f64 {
            0.0
        }
    }
}

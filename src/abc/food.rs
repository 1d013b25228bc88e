//! Food sources: candidate solutions with a memoized quality and a visit budget.

use std::cell::OnceCell;

use rand::Rng;

use super::types::{AbcProblem, Objective};
use crate::error::{AbcError, Result};

/// A candidate solution held by a bee.
///
/// The quality is computed lazily the first time a bee dances on the
/// source and is cached for the rest of the source's life. The location
/// is never modified; exploring produces a new `Food`.
#[derive(Debug, Clone)]
pub struct Food<S> {
    location: S,
    quality: OnceCell<f64>,
    quantity: u32,
}

impl<S> Food<S> {
    /// Creates an unevaluated source with `quantity` remaining visits.
    pub fn new(location: S, quantity: u32) -> Self {
        Self {
            location,
            quality: OnceCell::new(),
            quantity,
        }
    }

    /// The candidate solution.
    pub fn location(&self) -> &S {
        &self.location
    }

    /// Consumes the source, returning the candidate solution.
    pub fn into_location(self) -> S {
        self.location
    }

    /// Remaining visits.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Quality if the source has already been evaluated.
    pub fn cached_quality(&self) -> Option<f64> {
        self.quality.get().copied()
    }

    /// Returns the quality, evaluating the location on first use.
    pub fn quality<P>(&self, objective: &Objective<'_, P>) -> f64
    where
        P: AbcProblem<Solution = S>,
    {
        *self.quality.get_or_init(|| objective.score(&self.location))
    }

    /// Whether at least one visit remains.
    pub fn has_food(&self) -> bool {
        self.quantity > 0
    }

    /// Whether every visit has been used up.
    pub fn is_exhausted(&self) -> bool {
        self.quantity == 0
    }

    /// Records one unit of food brought back to the hive.
    ///
    /// Callers check [`has_food`](Self::has_food) first.
    pub fn deposit(&mut self) {
        self.quantity = self.quantity.saturating_sub(1);
    }

    /// Overwrites the remaining visits with the count shared by every bee
    /// exploiting this source.
    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    /// Produces a neighboring source with a fresh visit budget.
    ///
    /// # Errors
    ///
    /// Returns [`AbcError::Problem`] if the perturbation fails.
    pub fn explore<P, R>(&self, problem: &P, rng: &mut R, quantum: u32) -> Result<Self>
    where
        P: AbcProblem<Solution = S>,
        R: Rng,
    {
        let neighbor = problem
            .mutate(&self.location, rng)
            .map_err(AbcError::problem)?;
        Ok(Self::new(neighbor, quantum))
    }

    /// Generates a brand-new random source.
    ///
    /// # Errors
    ///
    /// Returns [`AbcError::Problem`] if generation fails.
    pub fn generate<P, R>(problem: &P, rng: &mut R, quantum: u32) -> Result<Self>
    where
        P: AbcProblem<Solution = S>,
        R: Rng,
    {
        let location = problem.generate(rng).map_err(AbcError::problem)?;
        Ok(Self::new(location, quantum))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abc::types::testing::SumProblem;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_quality_is_memoized() {
        let problem = SumProblem { len: 4, max: 9 };
        let objective = Objective::new(&problem, false);
        let food = Food::new(vec![1, 2, 3, 4], 5);

        assert!(food.cached_quality().is_none());
        let first = food.quality(&objective);
        let second = food.quality(&objective);

        assert_eq!(first, second);
        assert!((first - 10.0).abs() < 1e-12);
        assert_eq!(objective.evaluations(), 1);
        assert_eq!(food.cached_quality(), Some(first));
    }

    #[test]
    fn test_deposit_and_exhaustion() {
        let mut food = Food::new(0u32, 2);
        assert!(food.has_food());
        food.deposit();
        assert_eq!(food.quantity(), 1);
        assert!(!food.is_exhausted());
        food.deposit();
        assert!(food.is_exhausted());
        assert!(!food.has_food());
        food.deposit();
        assert_eq!(food.quantity(), 0);
    }

    #[test]
    fn test_explore_leaves_original_untouched() {
        let problem = SumProblem { len: 6, max: 9 };
        let objective = Objective::new(&problem, false);
        let mut rng = StdRng::seed_from_u64(3);
        let food = Food::new(vec![0; 6], 1);
        food.quality(&objective);

        let neighbor = food.explore(&problem, &mut rng, 4).unwrap();

        assert_eq!(food.location(), &vec![0; 6]);
        assert_eq!(neighbor.quantity(), 4);
        assert!(neighbor.cached_quality().is_none());
        let changed = neighbor
            .location()
            .iter()
            .zip(food.location())
            .filter(|(a, b)| a != b)
            .count();
        assert!(changed <= 1);
    }
}

//! Bee colony execution engine.
//!
//! [`AbcRunner`] drives a [`ColonySession`] for the configured generation
//! budget and packages the best-known source into an [`AbcResult`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

use super::config::AbcConfig;
use super::session::ColonySession;
use super::types::AbcProblem;
use crate::error::Result;

/// Result of a bee colony run.
#[derive(Debug, Clone)]
pub struct AbcResult<S> {
    /// Best solution found during the entire run.
    ///
    /// Infeasible candidates score 0, so when minimizing an objective that
    /// is positive on every feasible candidate this can be infeasible.
    /// Check it with the problem's own feasibility test.
    pub best: S,

    /// Quality of `best` in the colony's maximizing convention.
    pub best_quality: f64,

    /// Objective value of `best` as the caller defined it
    /// (equal to `best_quality` unless minimizing).
    pub best_objective: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether the run stopped early because the best stopped improving.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best quality after initialization and after each generation.
    pub quality_history: Vec<f64>,

    /// Total number of objective evaluations.
    pub evaluations: usize,
}

/// Executes the bee colony loop.
pub struct AbcRunner;

impl AbcRunner {
    /// Runs the colony to completion.
    ///
    /// # Errors
    ///
    /// Returns [`AbcError::InvalidConfig`](crate::AbcError::InvalidConfig)
    /// before the loop starts if the configuration is unusable, and
    /// [`AbcError::Problem`](crate::AbcError::Problem) if the problem fails
    /// to generate or perturb a candidate. No partial result is returned
    /// on failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use biscuit_abc::abc::{AbcConfig, AbcProblem, AbcRunner};
    /// use rand::Rng;
    ///
    /// struct Peak;
    /// impl AbcProblem for Peak {
    ///     type Solution = i32;
    ///     type Error = std::convert::Infallible;
    ///     fn generate<R: Rng>(&self, rng: &mut R) -> Result<i32, Self::Error> {
    ///         Ok(rng.random_range(-50..50))
    ///     }
    ///     fn mutate<R: Rng>(&self, x: &i32, rng: &mut R) -> Result<i32, Self::Error> {
    ///         Ok(x + rng.random_range(-2..=2))
    ///     }
    ///     fn evaluate(&self, x: &i32) -> f64 {
    ///         1.0 / (1.0 + ((x - 7) * (x - 7)) as f64)
    ///     }
    /// }
    ///
    /// let config = AbcConfig::default()
    ///     .with_population_size(20)
    ///     .with_visit_quantum(20)
    ///     .with_max_generations(500)
    ///     .with_seed(1);
    /// let result = AbcRunner::run(&Peak, &config).unwrap();
    /// assert_eq!(result.best, 7);
    /// ```
    pub fn run<P: AbcProblem>(problem: &P, config: &AbcConfig) -> Result<AbcResult<P::Solution>> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the colony with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the colony
    /// stops before the next generation and returns the best source found
    /// so far.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub fn run_with_cancel<P: AbcProblem>(
        problem: &P,
        config: &AbcConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AbcResult<P::Solution>> {
        let mut session = ColonySession::new(problem, config)?;

        info!(
            population = config.population_size,
            generations = config.max_generations,
            visit_quantum = config.visit_quantum,
            "bee colony started"
        );

        let mut quality_history = Vec::with_capacity(config.max_generations + 1);
        quality_history.push(session.best_quality());

        let mut stagnation_counter = 0usize;
        let mut stagnated = false;
        let mut cancelled = false;

        for _ in 0..config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let previous = session.best_quality();
            let stats = session.step()?;
            quality_history.push(stats.best_quality);

            if stats.best_quality > previous {
                stagnation_counter = 0;
            } else {
                stagnation_counter += 1;
            }

            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        let generations = session.generation();
        let evaluations = session.objective().evaluations();
        let best_quality = session.best_quality();
        let best_objective = session.objective().to_objective(best_quality);

        info!(
            generations,
            best_quality, evaluations, stagnated, cancelled, "bee colony finished"
        );

        Ok(AbcResult {
            best: session.into_best().into_location(),
            best_quality,
            best_objective,
            generations,
            stagnated,
            cancelled,
            quality_history,
            evaluations,
        })
    }
}

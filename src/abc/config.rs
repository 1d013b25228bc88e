//! Bee colony configuration.
//!
//! [`AbcConfig`] holds the colony layout and the parameters of the
//! generational loop.

use crate::error::{AbcError, Result};

/// Configuration for the Artificial Bee Colony.
///
/// The population is split into three role groups: workers (one per food
/// source), scouts (which look for brand-new sources) and onlookers (the
/// remainder, which exploit sources advertised by workers).
///
/// # Defaults
///
/// ```
/// use biscuit_abc::abc::AbcConfig;
///
/// let config = AbcConfig::default();
/// assert_eq!(config.population_size, 10);
/// assert_eq!(config.resolved_workers(), 5);
/// assert_eq!(config.onlookers(), 4);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use biscuit_abc::abc::AbcConfig;
///
/// let config = AbcConfig::default()
///     .with_population_size(50)
///     .with_scouts(2)
///     .with_visit_quantum(1)
///     .with_max_generations(100)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct AbcConfig {
    /// Total number of bees. Constant for the whole run.
    pub population_size: usize,

    /// Number of worker bees, i.e. number of food sources.
    ///
    /// `None` uses half the population.
    pub workers: Option<usize>,

    /// Number of bees that start the run as scouts.
    pub scouts: usize,

    /// Number of generations before termination.
    pub max_generations: usize,

    /// Remaining-visits budget given to every new food source.
    ///
    /// A source whose budget drops to zero is abandoned and its worker
    /// becomes a scout.
    pub visit_quantum: u32,

    /// Whether the objective should be minimized instead of maximized.
    ///
    /// The engine always maximizes internally; minimization negates the
    /// objective before any bee sees it. Infeasible candidates keep a score
    /// of 0, so they outrank feasible ones whose objective is positive.
    pub minimize: bool,

    /// Number of generations without improvement before stopping.
    ///
    /// Set to 0 to disable early stopping (the default).
    pub stagnation_limit: usize,

    /// Whether to evaluate a phase's candidates in parallel using rayon.
    ///
    /// Has no effect unless the `parallel` feature is enabled.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for AbcConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            workers: None,
            scouts: 1,
            max_generations: 1000,
            visit_quantum: 5,
            minimize: false,
            stagnation_limit: 0,
            parallel: true,
            seed: None,
        }
    }
}

impl AbcConfig {
    /// Sets the total population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of workers explicitly.
    pub fn with_workers(mut self, n: usize) -> Self {
        self.workers = Some(n);
        self
    }

    /// Sets the number of initial scouts.
    pub fn with_scouts(mut self, n: usize) -> Self {
        self.scouts = n;
        self
    }

    /// Sets the generation budget.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the visit quantum of new food sources.
    pub fn with_visit_quantum(mut self, quantum: u32) -> Self {
        self.visit_quantum = quantum;
        self
    }

    /// Minimize the objective instead of maximizing it.
    pub fn with_minimize(mut self, minimize: bool) -> Self {
        self.minimize = minimize;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for quick exploration: small colony, short budget.
    ///
    /// - Population: 20, Generations: 100, Visit quantum: 3
    pub fn fast() -> Self {
        Self {
            population_size: 20,
            max_generations: 100,
            visit_quantum: 3,
            ..Self::default()
        }
    }

    /// Preset for thorough search on a full roll.
    ///
    /// - Population: 50, Generations: 1000, Visit quantum: 5, Stagnation limit: 200
    pub fn thorough() -> Self {
        Self {
            population_size: 50,
            max_generations: 1000,
            visit_quantum: 5,
            stagnation_limit: 200,
            ..Self::default()
        }
    }

    /// Number of workers after applying the half-population default.
    pub fn resolved_workers(&self) -> usize {
        self.workers.unwrap_or(self.population_size / 2)
    }

    /// Number of onlookers: everything that is neither worker nor scout.
    pub fn onlookers(&self) -> usize {
        self.population_size
            .saturating_sub(self.resolved_workers())
            .saturating_sub(self.scouts)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AbcError::InvalidConfig`] if the colony cannot be formed.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(AbcError::invalid_config(
                "population_size must be at least 2",
            ));
        }
        let workers = self.resolved_workers();
        if workers == 0 {
            return Err(AbcError::invalid_config("at least one worker is required"));
        }
        if workers + self.scouts > self.population_size {
            return Err(AbcError::invalid_config(format!(
                "workers ({workers}) + scouts ({}) exceed population_size ({})",
                self.scouts, self.population_size
            )));
        }
        if self.max_generations == 0 {
            return Err(AbcError::invalid_config(
                "max_generations must be at least 1",
            ));
        }
        if self.visit_quantum == 0 {
            return Err(AbcError::invalid_config("visit_quantum must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AbcConfig::default();
        assert_eq!(config.population_size, 10);
        assert!(config.workers.is_none());
        assert_eq!(config.scouts, 1);
        assert_eq!(config.max_generations, 1000);
        assert_eq!(config.visit_quantum, 5);
        assert!(!config.minimize);
        assert_eq!(config.stagnation_limit, 0);
        assert!(config.parallel);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = AbcConfig::default()
            .with_population_size(30)
            .with_workers(10)
            .with_scouts(3)
            .with_max_generations(250)
            .with_visit_quantum(2)
            .with_minimize(true)
            .with_stagnation_limit(40)
            .with_parallel(false)
            .with_seed(42);

        assert_eq!(config.population_size, 30);
        assert_eq!(config.resolved_workers(), 10);
        assert_eq!(config.scouts, 3);
        assert_eq!(config.onlookers(), 17);
        assert_eq!(config.max_generations, 250);
        assert_eq!(config.visit_quantum, 2);
        assert!(config.minimize);
        assert_eq!(config.stagnation_limit, 40);
        assert!(!config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_ok() {
        assert!(AbcConfig::default().validate().is_ok());
        assert!(AbcConfig::fast().validate().is_ok());
        assert!(AbcConfig::thorough().validate().is_ok());
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = AbcConfig::default().with_population_size(1);
        assert!(matches!(
            config.validate(),
            Err(AbcError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_validate_roles_exceed_population() {
        let config = AbcConfig::default()
            .with_population_size(4)
            .with_workers(3)
            .with_scouts(2);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_workers() {
        let config = AbcConfig::default().with_workers(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = AbcConfig::default().with_max_generations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_visit_quantum() {
        let config = AbcConfig::default().with_visit_quantum(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_no_onlookers_is_valid() {
        let config = AbcConfig::default()
            .with_population_size(2)
            .with_scouts(1);
        assert_eq!(config.resolved_workers(), 1);
        assert_eq!(config.onlookers(), 0);
        assert!(config.validate().is_ok());
    }
}

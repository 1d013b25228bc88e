//! The colony loop, one generation at a time.
//!
//! # Algorithm
//!
//! Every generation runs three phases in a fixed order:
//!
//! 1. **Workers**: a worker whose source was emptied by onlookers becomes a
//!    scout. The others dance, explore one neighbor, and either move to it
//!    if it is strictly better or bring food home. A worker whose source
//!    runs dry while bringing food home becomes a scout.
//! 2. **Onlookers**: each onlooker picks a worker with probability
//!    proportional to its dance (see [`Choreography`]), explores around the
//!    borrowed source and either keeps the improvement or brings food home
//!    from the worker's source, releasing it once exhausted.
//! 3. **Scouts**: every scout finds a brand-new random source and rejoins
//!    the colony as a worker.
//!
//! A worker exhausted by onlookers is scouted during the *next*
//! generation, when its worker phase notices the empty source.
//!
//! All random draws come from the session's single RNG in bee order;
//! only the evaluations of a phase may run in parallel. A fixed seed
//! therefore reproduces the same run with or without the `parallel`
//! feature.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use super::bee::{BeeId, Onlooker, Scout, Worker};
use super::config::AbcConfig;
use super::food::Food;
use super::hive::Hive;
use super::selection::Choreography;
use super::types::{AbcProblem, Objective};
use crate::error::{AbcError, Result};

/// Counters describing one generation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GenerationStats {
    /// 1-based generation number.
    pub generation: usize,
    /// Best quality known at the end of the generation.
    pub best_quality: f64,
    /// Accepted neighbors, by workers and onlookers.
    pub improvements: usize,
    /// Workers that abandoned their source and became scouts.
    pub abandoned: usize,
    /// Scouts that found a new source and became workers.
    pub recruited: usize,
    /// Whether onlookers chose uniformly because every dance was flat.
    pub flat_landscape: bool,
}

/// A running colony: population, shared RNG and best-known source.
///
/// Sessions are independent of each other; two sessions built with the
/// same seed and configuration evolve identically.
pub struct ColonySession<'p, P: AbcProblem> {
    config: AbcConfig,
    objective: Objective<'p, P>,
    rng: StdRng,
    hive: Hive<P::Solution>,
    best: Food<P::Solution>,
    generation: usize,
}

impl<'p, P: AbcProblem> ColonySession<'p, P> {
    /// Validates `config`, builds the hive and sends every worker to a
    /// fresh random source.
    ///
    /// # Errors
    ///
    /// Returns [`AbcError::InvalidConfig`] for an unusable configuration
    /// and [`AbcError::Problem`] if the initial sources cannot be generated.
    pub fn new(problem: &'p P, config: &AbcConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        let objective = Objective::new(problem, config.minimize);
        let quantum = config.visit_quantum;

        let n_workers = config.resolved_workers();
        let n_onlookers = config.onlookers();
        let mut ids = (0u32..).map(BeeId);

        let mut workers = Vec::with_capacity(n_workers);
        for id in ids.by_ref().take(n_workers) {
            workers.push(Worker::new(id, Food::generate(problem, &mut rng, quantum)?));
        }
        let onlookers: Vec<Onlooker<P::Solution>> =
            ids.by_ref().take(n_onlookers).map(Onlooker::new).collect();
        let scouts: Vec<Scout<P::Solution>> =
            ids.by_ref().take(config.scouts).map(Scout::new).collect();

        evaluate_each(&mut workers, config.parallel, |w: &Worker<P::Solution>| {
            w.dance(&objective);
        });

        let mut best: Option<&Food<P::Solution>> = None;
        for worker in &workers {
            let quality = worker.dance(&objective);
            if best.is_none_or(|b| quality > b.quality(&objective)) {
                best = Some(worker.food());
            }
        }
        let best = best
            .cloned()
            .ok_or_else(|| AbcError::invalid_config("at least one worker is required"))?;

        debug!(
            workers = n_workers,
            onlookers = n_onlookers,
            scouts = config.scouts,
            best_quality = best.quality(&objective),
            "colony initialized"
        );

        Ok(Self {
            config: config.clone(),
            hive: Hive::new(workers, onlookers, scouts),
            objective,
            rng,
            best,
            generation: 0,
        })
    }

    /// Runs one full generation: workers, onlookers, scouts.
    ///
    /// # Errors
    ///
    /// Returns [`AbcError::Problem`] if the problem fails to generate or
    /// perturb a candidate. The session should not be used afterwards.
    pub fn step(&mut self) -> Result<GenerationStats> {
        self.generation += 1;
        let mut stats = GenerationStats {
            generation: self.generation,
            ..GenerationStats::default()
        };

        self.worker_phase(&mut stats)?;
        self.onlooker_phase(&mut stats)?;
        self.scout_phase(&mut stats)?;

        stats.best_quality = self.best_quality();
        self.objective
            .problem()
            .on_generation(self.generation, stats.best_quality);

        trace!(
            generation = stats.generation,
            best_quality = stats.best_quality,
            improvements = stats.improvements,
            abandoned = stats.abandoned,
            recruited = stats.recruited,
            "generation complete"
        );
        Ok(stats)
    }

    fn worker_phase(&mut self, stats: &mut GenerationStats) -> Result<()> {
        let problem = self.objective.problem();
        let objective = &self.objective;
        let quantum = self.config.visit_quantum;

        let mut active = Vec::with_capacity(self.hive.workers().len());
        let mut leaving = Vec::new();
        for worker in self.hive.take_workers() {
            if worker.should_leave() {
                leaving.push(worker.leave_food_point());
            } else {
                active.push(worker);
            }
        }

        let mut neighbors = active
            .iter()
            .map(|worker| worker.look_around(problem, &mut self.rng, quantum))
            .collect::<Result<Vec<_>>>()?;

        evaluate_each(&mut active, self.config.parallel, |w: &Worker<P::Solution>| {
            w.dance(objective);
        });
        evaluate_each(&mut neighbors, self.config.parallel, |food: &Food<P::Solution>| {
            food.quality(objective);
        });

        let mut staying = Vec::with_capacity(active.len());
        for (mut worker, neighbor) in active.into_iter().zip(neighbors) {
            let candidate = neighbor.quality(objective);
            if candidate > worker.dance(objective) {
                improve_best(&mut self.best, &neighbor, candidate);
                worker.go_to_food(neighbor);
                stats.improvements += 1;
                staying.push(worker);
            } else {
                worker.bring_food();
                if worker.should_leave() {
                    leaving.push(worker.leave_food_point());
                } else {
                    staying.push(worker);
                }
            }
        }

        for scout in &leaving {
            debug!(bee = %scout.id(), generation = self.generation, "worker abandoned its source");
        }
        stats.abandoned = leaving.len();
        self.hive.extend_workers(staying);
        self.hive.extend_scouts(leaving);
        Ok(())
    }

    fn onlooker_phase(&mut self, stats: &mut GenerationStats) -> Result<()> {
        let problem = self.objective.problem();
        let objective = &self.objective;
        let quantum = self.config.visit_quantum;
        let (workers, onlookers) = self.hive.foragers_mut();

        if onlookers.is_empty() {
            return Ok(());
        }
        if workers.is_empty() {
            debug!(generation = self.generation, "no worker is dancing, onlookers rest");
            return Ok(());
        }

        let dances: Vec<f64> = workers.iter().map(|w| w.dance(objective)).collect();
        let choreography = Choreography::from_dances(&dances);
        if choreography.is_uniform() {
            stats.flat_landscape = true;
            debug!(
                generation = self.generation,
                workers = workers.len(),
                "flat landscape, onlookers choose sources uniformly"
            );
        }

        let mut choices = Vec::with_capacity(onlookers.len());
        for onlooker in onlookers.iter_mut() {
            let Some(source) = choreography.sample(&mut self.rng) else {
                choices.push(None);
                continue;
            };
            onlooker.choose_preferred_source(workers[source].food());
            let neighbor = onlooker.look_around(problem, &mut self.rng, quantum)?;
            choices.push(neighbor.map(|food| (source, food)));
        }

        evaluate_each(
            &mut choices,
            self.config.parallel,
            |choice: &Option<(usize, Food<P::Solution>)>| {
                if let Some((_, food)) = choice {
                    food.quality(objective);
                }
            },
        );

        // Visits left on each worker's source, shared by every onlooker on it.
        let mut remaining: Vec<u32> = workers.iter().map(|w| w.food().quantity()).collect();

        for (onlooker, choice) in onlookers.iter_mut().zip(choices) {
            let Some((source, neighbor)) = choice else {
                continue;
            };
            if let Some(food) = onlooker.food_mut() {
                food.set_quantity(remaining[source]);
            }

            let candidate = neighbor.quality(objective);
            let current = onlooker.dance(objective).unwrap_or(f64::NEG_INFINITY);
            if candidate > current {
                improve_best(&mut self.best, &neighbor, candidate);
                onlooker.go_to_food(neighbor);
                stats.improvements += 1;
            } else {
                onlooker.bring_food();
                remaining[source] = onlooker.food().map_or(0, Food::quantity);
                if onlooker.should_leave() {
                    onlooker.leave_food_point();
                }
            }
        }

        for (worker, left) in workers.iter_mut().zip(remaining) {
            worker.food_mut().set_quantity(left);
        }
        Ok(())
    }

    fn scout_phase(&mut self, stats: &mut GenerationStats) -> Result<()> {
        let problem = self.objective.problem();
        let objective = &self.objective;
        let quantum = self.config.visit_quantum;

        let mut recruited = Vec::new();
        let mut searching = Vec::new();
        for mut scout in self.hive.take_scouts() {
            scout.find_new_food(problem, &mut self.rng, quantum)?;
            match scout.convert_to_worker() {
                Ok(worker) => recruited.push(worker),
                Err(scout) => searching.push(scout),
            }
        }

        evaluate_each(&mut recruited, self.config.parallel, |w: &Worker<P::Solution>| {
            w.dance(objective);
        });
        for worker in &recruited {
            improve_best(&mut self.best, worker.food(), worker.dance(objective));
            debug!(bee = %worker.id(), generation = self.generation, "scout found a new source");
        }

        stats.recruited = recruited.len();
        self.hive.extend_workers(recruited);
        self.hive.extend_scouts(searching);
        Ok(())
    }

    /// Best-known source.
    pub fn best(&self) -> &Food<P::Solution> {
        &self.best
    }

    /// Quality of the best-known source, in the colony's maximizing convention.
    pub fn best_quality(&self) -> f64 {
        self.best.quality(&self.objective)
    }

    /// Consumes the session, returning the best-known source.
    pub fn into_best(self) -> Food<P::Solution> {
        self.best
    }

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn hive(&self) -> &Hive<P::Solution> {
        &self.hive
    }

    pub fn objective(&self) -> &Objective<'p, P> {
        &self.objective
    }

    pub fn config(&self) -> &AbcConfig {
        &self.config
    }
}

/// Replaces `best` if `candidate` is strictly better.
fn improve_best<S: Clone>(best: &mut Food<S>, candidate: &Food<S>, quality: f64) -> bool {
    let current = best.cached_quality().unwrap_or(f64::NEG_INFINITY);
    if quality > current {
        *best = candidate.clone();
        true
    } else {
        false
    }
}

/// Runs `f` on every item, in parallel when requested and available.
#[cfg(feature = "parallel")]
fn evaluate_each<T, F>(items: &mut [T], parallel: bool, f: F)
where
    T: Send,
    F: Fn(&T) + Sync + Send,
{
    use rayon::prelude::*;

    if parallel {
        items.par_iter_mut().for_each(|item| f(item));
    } else {
        items.iter().for_each(f);
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_each<T, F>(items: &mut [T], _parallel: bool, f: F)
where
    T: Send,
    F: Fn(&T) + Sync + Send,
{
    items.iter().for_each(f);
}

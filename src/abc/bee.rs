//! Bee roles and their transitions.
//!
//! Each role is its own type carrying the shared payload (identity and
//! food) explicitly. Transitions consume one role and return another, so
//! a bee can never be in two roles at once:
//!
//! ```text
//! Scout --find_new_food + convert_to_worker--> Worker
//! Worker --leave_food_point--> Scout
//! Onlooker: borrows a worker's source, never changes role
//! ```

use std::fmt;

use rand::Rng;

use super::food::Food;
use super::types::{AbcProblem, Objective};
use crate::error::Result;

/// Opaque bee label, used for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeeId(pub u32);

impl fmt::Display for BeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bee-{}", self.0)
    }
}

/// The three mutually exclusive roles of a bee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// Searches for a brand-new random source.
    Scout,
    /// Owns a source, exploits it and advertises it.
    Worker,
    /// Exploits sources advertised by workers.
    Onlooker,
}

/// A bee looking for a new food source.
#[derive(Debug, Clone)]
pub struct Scout<S> {
    id: BeeId,
    food: Option<Food<S>>,
}

impl<S> Scout<S> {
    /// Creates a scout with no food.
    pub fn new(id: BeeId) -> Self {
        Self { id, food: None }
    }

    /// Identity kept across role changes.
    pub fn id(&self) -> BeeId {
        self.id
    }

    /// The source held, if any.
    pub fn food(&self) -> Option<&Food<S>> {
        self.food.as_ref()
    }

    /// Locates a brand-new random source with `quantum` visits.
    ///
    /// # Errors
    ///
    /// Propagates a generation failure from the problem.
    pub fn find_new_food<P, R>(&mut self, problem: &P, rng: &mut R, quantum: u32) -> Result<()>
    where
        P: AbcProblem<Solution = S>,
        R: Rng,
    {
        self.food = Some(Food::generate(problem, rng, quantum)?);
        Ok(())
    }

    /// Becomes a worker on the source found by [`find_new_food`](Self::find_new_food).
    ///
    /// A scout that has not found anything is handed back unchanged.
    pub fn convert_to_worker(self) -> std::result::Result<Worker<S>, Self> {
        match self.food {
            Some(food) => Ok(Worker::new(self.id, food)),
            None => Err(self),
        }
    }
}

/// A bee attached to its own food source.
#[derive(Debug, Clone)]
pub struct Worker<S> {
    id: BeeId,
    food: Food<S>,
}

impl<S> Worker<S> {
    /// Creates a worker on `food`.
    pub fn new(id: BeeId, food: Food<S>) -> Self {
        Self { id, food }
    }

    /// Identity kept across role changes.
    pub fn id(&self) -> BeeId {
        self.id
    }

    /// The source being exploited.
    pub fn food(&self) -> &Food<S> {
        &self.food
    }

    pub(crate) fn food_mut(&mut self) -> &mut Food<S> {
        &mut self.food
    }

    /// Whether the source has run out of visits.
    pub fn should_leave(&self) -> bool {
        self.food.is_exhausted()
    }

    /// Advertises the source, evaluating it if needed.
    pub fn dance<P>(&self, objective: &Objective<'_, P>) -> f64
    where
        P: AbcProblem<Solution = S>,
    {
        self.food.quality(objective)
    }

    /// Proposes a neighbor of the current source.
    ///
    /// # Errors
    ///
    /// Propagates a perturbation failure from the problem.
    pub fn look_around<P, R>(&self, problem: &P, rng: &mut R, quantum: u32) -> Result<Food<S>>
    where
        P: AbcProblem<Solution = S>,
        R: Rng,
    {
        self.food.explore(problem, rng, quantum)
    }

    /// Replaces the source with a better one.
    pub fn go_to_food(&mut self, food: Food<S>) {
        self.food = food;
    }

    /// Brings one unit of food back to the hive.
    pub fn bring_food(&mut self) {
        self.food.deposit();
    }

    /// Abandons the source and becomes a scout with the same identity.
    pub fn leave_food_point(self) -> Scout<S> {
        Scout::new(self.id)
    }
}

/// A bee that follows the workers' dances.
#[derive(Debug, Clone)]
pub struct Onlooker<S> {
    id: BeeId,
    food: Option<Food<S>>,
}

impl<S: Clone> Onlooker<S> {
    /// Creates an onlooker with no food.
    pub fn new(id: BeeId) -> Self {
        Self { id, food: None }
    }

    /// Identity kept across role changes.
    pub fn id(&self) -> BeeId {
        self.id
    }

    /// The source held, if any.
    pub fn food(&self) -> Option<&Food<S>> {
        self.food.as_ref()
    }

    /// Attaches a copy of the chosen worker's source.
    pub fn choose_preferred_source(&mut self, source: &Food<S>) {
        self.food = Some(source.clone());
    }

    /// Whether the onlooker has no source or an exhausted one.
    pub fn should_leave(&self) -> bool {
        self.food.as_ref().is_none_or(Food::is_exhausted)
    }

    /// Quality of the attached source, `None` if it holds nothing.
    pub fn dance<P>(&self, objective: &Objective<'_, P>) -> Option<f64>
    where
        P: AbcProblem<Solution = S>,
    {
        self.food.as_ref().map(|food| food.quality(objective))
    }

    /// Proposes a neighbor of the attached source.
    ///
    /// # Errors
    ///
    /// Propagates a perturbation failure from the problem.
    pub fn look_around<P, R>(
        &self,
        problem: &P,
        rng: &mut R,
        quantum: u32,
    ) -> Result<Option<Food<S>>>
    where
        P: AbcProblem<Solution = S>,
        R: Rng,
    {
        self.food
            .as_ref()
            .map(|food| food.explore(problem, rng, quantum))
            .transpose()
    }

    /// Keeps an improved source.
    pub fn go_to_food(&mut self, food: Food<S>) {
        self.food = Some(food);
    }

    /// Brings one unit of food back to the hive, if there is any left.
    pub fn bring_food(&mut self) {
        if let Some(food) = self.food.as_mut().filter(|food| food.has_food()) {
            food.deposit();
        }
    }

    /// Drops the attached source. The onlooker stays an onlooker.
    pub fn leave_food_point(&mut self) {
        self.food = None;
    }

    pub(crate) fn food_mut(&mut self) -> Option<&mut Food<S>> {
        self.food.as_mut()
    }
}

/// Borrowed, role-tagged view of any bee in the hive.
#[derive(Debug)]
pub enum Bee<'a, S> {
    Scout(&'a Scout<S>),
    Worker(&'a Worker<S>),
    Onlooker(&'a Onlooker<S>),
}

impl<'a, S> Bee<'a, S> {
    /// Identity kept across role changes.
    pub fn id(&self) -> BeeId {
        match self {
            Bee::Scout(b) => b.id,
            Bee::Worker(b) => b.id,
            Bee::Onlooker(b) => b.id,
        }
    }

    /// Role of the viewed bee.
    pub fn role(&self) -> Role {
        match self {
            Bee::Scout(_) => Role::Scout,
            Bee::Worker(_) => Role::Worker,
            Bee::Onlooker(_) => Role::Onlooker,
        }
    }

    /// The food currently held, if any.
    pub fn food(&self) -> Option<&'a Food<S>> {
        match self {
            Bee::Scout(b) => b.food.as_ref(),
            Bee::Worker(b) => Some(&b.food),
            Bee::Onlooker(b) => b.food.as_ref(),
        }
    }
}

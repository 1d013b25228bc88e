//! The hive: the colony split into three disjoint role groups.
//!
//! The hive has no behavior of its own. The colony loop takes a group out
//! at the start of a phase, decides every bee's fate, and hands the
//! results back once the phase is over, so no group is ever modified
//! while it is being iterated.

use super::bee::{Bee, Onlooker, Scout, Worker};

/// Population container partitioned by role.
#[derive(Debug, Clone)]
pub struct Hive<S> {
    workers: Vec<Worker<S>>,
    onlookers: Vec<Onlooker<S>>,
    scouts: Vec<Scout<S>>,
}

impl<S> Default for Hive<S> {
    fn default() -> Self {
        Self {
            workers: Vec::new(),
            onlookers: Vec::new(),
            scouts: Vec::new(),
        }
    }
}

impl<S> Hive<S> {
    /// Creates a hive from its three groups.
    pub fn new(
        workers: Vec<Worker<S>>,
        onlookers: Vec<Onlooker<S>>,
        scouts: Vec<Scout<S>>,
    ) -> Self {
        Self {
            workers,
            onlookers,
            scouts,
        }
    }

    /// Employed bees, each tied to a food source.
    pub fn workers(&self) -> &[Worker<S>] {
        &self.workers
    }

    /// Bees waiting in the hive to follow a dance.
    pub fn onlookers(&self) -> &[Onlooker<S>] {
        &self.onlookers
    }

    /// Bees searching for a new source.
    pub fn scouts(&self) -> &[Scout<S>] {
        &self.scouts
    }

    /// Bees without a guaranteed food source: scouts then onlookers.
    pub fn unemployed(&self) -> impl Iterator<Item = Bee<'_, S>> {
        self.scouts
            .iter()
            .map(Bee::Scout)
            .chain(self.onlookers.iter().map(Bee::Onlooker))
    }

    /// Every bee in the hive.
    pub fn bees(&self) -> impl Iterator<Item = Bee<'_, S>> {
        self.workers.iter().map(Bee::Worker).chain(self.unemployed())
    }

    /// Total population.
    pub fn len(&self) -> usize {
        self.workers.len() + self.onlookers.len() + self.scouts.len()
    }

    /// Whether the hive holds no bees.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Group sizes as `(workers, onlookers, scouts)`.
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.workers.len(), self.onlookers.len(), self.scouts.len())
    }

    /// Workers and onlookers borrowed together for the onlooker phase.
    pub(crate) fn foragers_mut(&mut self) -> (&mut [Worker<S>], &mut [Onlooker<S>]) {
        (&mut self.workers, &mut self.onlookers)
    }

    /// Removes the whole worker group for a phase.
    pub(crate) fn take_workers(&mut self) -> Vec<Worker<S>> {
        std::mem::take(&mut self.workers)
    }

    /// Removes the whole scout group for a phase.
    pub(crate) fn take_scouts(&mut self) -> Vec<Scout<S>> {
        std::mem::take(&mut self.scouts)
    }

    pub(crate) fn extend_workers(&mut self, workers: impl IntoIterator<Item = Worker<S>>) {
        self.workers.extend(workers);
    }

    pub(crate) fn extend_scouts(&mut self, scouts: impl IntoIterator<Item = Scout<S>>) {
        self.scouts.extend(scouts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abc::bee::{BeeId, Role};
    use crate::abc::food::Food;

    fn sample_hive() -> Hive<u32> {
        Hive::new(
            vec![
                Worker::new(BeeId(0), Food::new(1, 2)),
                Worker::new(BeeId(1), Food::new(2, 2)),
            ],
            vec![Onlooker::new(BeeId(2))],
            vec![Scout::new(BeeId(3))],
        )
    }

    #[test]
    fn test_counts_and_len() {
        let hive = sample_hive();
        assert_eq!(hive.counts(), (2, 1, 1));
        assert_eq!(hive.len(), 4);
        assert!(!hive.is_empty());
        assert!(Hive::<u32>::default().is_empty());
    }

    #[test]
    fn test_unemployed_is_scouts_and_onlookers() {
        let hive = sample_hive();
        let roles: Vec<Role> = hive.unemployed().map(|b| b.role()).collect();
        assert_eq!(roles, vec![Role::Scout, Role::Onlooker]);
    }

    #[test]
    fn test_every_bee_listed_once() {
        let hive = sample_hive();
        let mut ids: Vec<BeeId> = hive.bees().map(|b| b.id()).collect();
        ids.sort();
        assert_eq!(ids, vec![BeeId(0), BeeId(1), BeeId(2), BeeId(3)]);
    }

    #[test]
    fn test_moves_conserve_population() {
        let mut hive = sample_hive();
        let workers = hive.take_workers();
        assert_eq!(hive.counts(), (0, 1, 1));

        let (stay, leave): (Vec<_>, Vec<_>) =
            workers.into_iter().partition(|w| w.id() == BeeId(0));
        hive.extend_workers(stay);
        hive.extend_scouts(leave.into_iter().map(Worker::leave_food_point));

        assert_eq!(hive.counts(), (1, 1, 2));
        assert_eq!(hive.len(), 4);
    }
}

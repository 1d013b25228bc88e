//! Biscuit arrangements.

use rand::Rng;

use super::biscuit::Catalog;
use super::defect::DefectMap;

/// A sequence of biscuits laid end to end along a roll.
///
/// Each slot is either a biscuit type (an index into the [`Catalog`]) or a
/// one-unit gap of unused dough. A biscuit starts where the previous slot
/// ends, so positions are implicit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roll {
    length: u32,
    slots: Vec<Option<usize>>,
}

impl Roll {
    /// An empty roll of the given length.
    pub fn new(length: u32) -> Self {
        Self {
            length,
            slots: Vec::new(),
        }
    }

    /// A roll with the given slots.
    pub fn from_slots(length: u32, slots: Vec<Option<usize>>) -> Self {
        Self { length, slots }
    }

    /// Fills a roll left to right with uniformly drawn biscuit types.
    ///
    /// With `check_defects`, a drawn biscuit that would cover too many
    /// defects is replaced by the largest type that is valid there, or by a
    /// one-unit gap if none is. At the end of the roll the largest valid
    /// type that still fits is placed and filling stops.
    pub fn fill_random<R: Rng>(
        length: u32,
        catalog: &Catalog,
        defects: &DefectMap,
        check_defects: bool,
        rng: &mut R,
    ) -> Self {
        let mut roll = Self::new(length);
        if catalog.is_empty() {
            return roll;
        }
        let by_size = catalog.by_size_desc();
        let valid_at = |start: u32, index: usize| -> bool {
            catalog.get(index).is_some_and(|b| {
                start.checked_add(b.size).is_some_and(|end| {
                    end <= length
                        && (!check_defects
                            || b.accepts(&defects.counts_between(start as f64, end as f64)))
                })
            })
        };
        let largest_valid = |start: u32| by_size.iter().copied().find(|&i| valid_at(start, i));

        let mut position = 0u32;
        while position < length {
            let drawn = rng.random_range(0..catalog.len());
            let size = catalog.get(drawn).map_or(1, |b| b.size);

            if position.checked_add(size).is_none_or(|end| end > length) {
                if check_defects {
                    if let Some(fit) = largest_valid(position) {
                        roll.slots.push(Some(fit));
                    }
                }
                break;
            }

            if valid_at(position, drawn) {
                roll.slots.push(Some(drawn));
                position += size;
            } else if let Some(fit) = largest_valid(position) {
                roll.slots.push(Some(fit));
                position += catalog.get(fit).map_or(1, |b| b.size);
            } else {
                roll.slots.push(None);
                position += 1;
            }
        }
        roll
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn slots(&self) -> &[Option<usize>] {
        &self.slots
    }

    /// Slot indices holding a biscuit.
    pub fn biscuit_slots(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|_| i))
            .collect()
    }

    /// Placed biscuits as `(start, type index)`.
    ///
    /// A type unknown to `catalog` is skipped and counts as a gap.
    pub fn placements(&self, catalog: &Catalog) -> Vec<(u32, usize)> {
        let mut position = 0u32;
        let mut placed = Vec::with_capacity(self.slots.len());
        for slot in &self.slots {
            match slot.and_then(|i| catalog.get(i).map(|b| (i, b.size))) {
                Some((index, size)) => {
                    placed.push((position, index));
                    position = position.saturating_add(size);
                }
                None => position = position.saturating_add(1),
            }
        }
        placed
    }

    pub fn number_of_biscuits(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Total length of dough used, gaps included. Saturates at `u32::MAX`.
    pub fn dough_length(&self, catalog: &Catalog) -> u32 {
        self.slots
            .iter()
            .map(|slot| slot.and_then(|i| catalog.get(i)).map_or(1, |b| b.size))
            .fold(0u32, u32::saturating_add)
    }

    /// Sale value of every biscuit on the roll.
    pub fn total_price(&self, catalog: &Catalog) -> u32 {
        self.slots
            .iter()
            .filter_map(|slot| slot.and_then(|i| catalog.get(i)))
            .map(|b| b.value)
            .fold(0u32, u32::saturating_add)
    }

    /// Whether the arrangement fits on the roll.
    pub fn fits(&self, catalog: &Catalog) -> bool {
        self.dough_length(catalog) <= self.length
    }

    /// Whether every biscuit stays within its defect tolerance.
    ///
    /// Unknown biscuit types fail the check.
    pub fn check_tolerance(&self, catalog: &Catalog, defects: &DefectMap) -> bool {
        let mut position = 0u32;
        for slot in &self.slots {
            let Some(index) = slot else {
                position = position.saturating_add(1);
                continue;
            };
            let Some(biscuit) = catalog.get(*index) else {
                return false;
            };
            let Some(end) = position.checked_add(biscuit.size) else {
                return false;
            };
            if !biscuit.accepts(&defects.counts_between(position as f64, end as f64)) {
                return false;
            }
            position = end;
        }
        true
    }

    /// Number of biscuits of each catalog type.
    pub fn type_counts(&self, catalog: &Catalog) -> Vec<usize> {
        let mut counts = vec![0; catalog.len()];
        for index in self.slots.iter().flatten() {
            if let Some(count) = counts.get_mut(*index) {
                *count += 1;
            }
        }
        counts
    }

    /// A copy of this roll with the biscuit in `slot` replaced by `biscuit`.
    ///
    /// Returns `None` if `slot` is out of range.
    pub fn with_biscuit_at(&self, slot: usize, biscuit: usize) -> Option<Self> {
        let mut next = self.clone();
        *next.slots.get_mut(slot)? = Some(biscuit);
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::{Biscuit, Defect};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalog() -> Catalog {
        Catalog::standard()
    }

    #[test]
    fn test_pricing_and_lengths() {
        // 8 + gap + 5 + 2
        let roll = Roll::from_slots(20, vec![Some(0), None, Some(1), Some(3)]);
        let catalog = catalog();
        assert_eq!(roll.total_price(&catalog), 12 + 8 + 1);
        assert_eq!(roll.dough_length(&catalog), 16);
        assert_eq!(roll.number_of_biscuits(), 3);
        assert_eq!(roll.biscuit_slots(), vec![0, 2, 3]);
        assert_eq!(roll.placements(&catalog), vec![(0, 0), (9, 1), (14, 3)]);
        assert_eq!(roll.type_counts(&catalog), vec![1, 1, 0, 1]);
        assert!(roll.fits(&catalog));
    }

    #[test]
    fn test_overflow_does_not_fit() {
        let roll = Roll::from_slots(10, vec![Some(0), Some(0)]);
        assert!(!roll.fits(&catalog()));
    }

    #[test]
    fn test_tolerance_uses_biscuit_positions() {
        let catalog = Catalog::new(vec![Biscuit::new(2, 1, [("a", 0)])]).unwrap();
        let defects = DefectMap::new(vec![Defect::new(3.0, "a")]);

        // Biscuits cover (0,2) and (2,4): the second covers the defect.
        let roll = Roll::from_slots(10, vec![Some(0), Some(0)]);
        assert!(!roll.check_tolerance(&catalog, &defects));

        // A gap shifts the second biscuit onto (3,5): the defect sits on its edge.
        let shifted = Roll::from_slots(10, vec![Some(0), None, Some(0)]);
        assert!(shifted.check_tolerance(&catalog, &defects));
    }

    #[test]
    fn test_unknown_type_fails_tolerance() {
        let roll = Roll::from_slots(10, vec![Some(9)]);
        assert!(!roll.check_tolerance(&catalog(), &DefectMap::default()));
        assert_eq!(roll.total_price(&catalog()), 0);
    }

    #[test]
    fn test_fill_random_is_valid_and_fits() {
        let catalog = catalog();
        let defects = DefectMap::new(
            (0..100)
                .map(|i| Defect::new(i as f64 * 4.7 + 0.3, ["a", "b", "c"][i % 3]))
                .collect(),
        );
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let roll = Roll::fill_random(500, &catalog, &defects, true, &mut rng);
            assert!(roll.fits(&catalog));
            assert!(roll.check_tolerance(&catalog, &defects));
            assert!(roll.dough_length(&catalog) > 490);
        }
    }

    #[test]
    fn test_fill_random_unchecked_fits() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(9);
        let roll = Roll::fill_random(100, &catalog, &DefectMap::default(), false, &mut rng);
        assert!(roll.fits(&catalog));
        assert!(roll.number_of_biscuits() > 0);
    }

    #[test]
    fn test_oversized_type_never_fits() {
        let catalog = Catalog::new(vec![
            Biscuit::new(u32::MAX, 1, [("a", 1)]),
            Biscuit::new(2, 1, [("a", 1)]),
        ])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        for check_defects in [true, false] {
            for _ in 0..50 {
                let roll =
                    Roll::fill_random(10, &catalog, &DefectMap::default(), check_defects, &mut rng);
                assert!(roll.fits(&catalog));
                assert_eq!(roll.type_counts(&catalog)[0], 0);
            }
        }

        let huge = Roll::from_slots(10, vec![Some(1), Some(0), Some(0)]);
        assert!(!huge.fits(&catalog));
        assert_eq!(huge.dough_length(&catalog), u32::MAX);
        assert!(!huge.check_tolerance(&catalog, &DefectMap::default()));
        assert_eq!(huge.placements(&catalog).len(), 3);
    }

    #[test]
    fn test_with_biscuit_at() {
        let roll = Roll::from_slots(20, vec![Some(0), Some(1)]);
        let changed = roll.with_biscuit_at(1, 3).unwrap();
        assert_eq!(changed.slots(), &[Some(0), Some(3)]);
        assert_eq!(roll.slots(), &[Some(0), Some(1)]);
        assert!(roll.with_biscuit_at(5, 0).is_none());
    }
}

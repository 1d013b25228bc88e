//! Value-first greedy baseline.
//!
//! Biscuit types are taken in decreasing order of value. Each type is cut
//! at every free position, scanning left to right, where it fits entirely
//! on free dough and tolerates the defects it covers. Cheaper types then
//! fill what is left.
//!
//! The result is a quick lower bound to compare the colony against, and a
//! valid roll in the same representation the colony works with.

use super::biscuit::Catalog;
use super::defect::DefectMap;
use super::roll::Roll;

/// Builds the greedy arrangement for a roll of `length` units.
pub fn arrange(length: u32, catalog: &Catalog, defects: &DefectMap) -> Roll {
    let mut used = vec![false; length as usize];
    let mut placed: Vec<(u32, usize, u32)> = Vec::new();

    for index in catalog.by_value_desc() {
        let Some(biscuit) = catalog.get(index) else {
            continue;
        };
        let size = biscuit.size;
        if size == 0 || size > length {
            continue;
        }

        let mut start = 0u32;
        while let Some(end) = start.checked_add(size).filter(|&end| end <= length) {
            let span = start as usize..end as usize;
            let free = used[span.clone()].iter().all(|u| !u);
            if free && biscuit.accepts(&defects.counts_between(start as f64, end as f64)) {
                used[span].iter_mut().for_each(|u| *u = true);
                placed.push((start, index, size));
                start += size;
            } else {
                start += 1;
            }
        }
    }

    placed.sort_unstable_by_key(|&(start, _, _)| start);

    let mut slots = Vec::new();
    let mut cursor = 0u32;
    for (start, index, size) in placed {
        slots.extend(std::iter::repeat_n(None, (start - cursor) as usize));
        slots.push(Some(index));
        cursor = start + size;
    }
    Roll::from_slots(length, slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::{Biscuit, Defect};

    #[test]
    fn test_clean_roll_uses_most_valuable_type() {
        let catalog = Catalog::standard();
        let roll = arrange(20, &catalog, &DefectMap::default());
        // Two 8-unit biscuits, then a 4-unit one in the remaining space.
        assert_eq!(roll.slots(), &[Some(0), Some(0), Some(2)]);
        assert_eq!(roll.total_price(&catalog), 12 + 12 + 6);
    }

    #[test]
    fn test_skips_defective_stretch() {
        let catalog = Catalog::new(vec![Biscuit::new(3, 5, [("a", 0)])]).unwrap();
        let defects = DefectMap::new(vec![Defect::new(1.5, "a")]);
        let roll = arrange(8, &catalog, &defects);

        // (0,3) and (1,4) cover the defect; the first biscuit starts at 2.
        assert_eq!(roll.slots(), &[None, None, Some(0), Some(0)]);
        assert_eq!(roll.placements(&catalog), vec![(2, 0), (5, 0)]);
        assert!(roll.check_tolerance(&catalog, &defects));
    }

    #[test]
    fn test_result_is_valid_on_dense_defects() {
        let catalog = Catalog::standard();
        let defects = DefectMap::new(
            (0..200)
                .map(|i| Defect::new(i as f64 * 2.5 + 0.1, ["a", "b", "c"][i % 3]))
                .collect(),
        );
        let roll = arrange(500, &catalog, &defects);
        assert!(roll.fits(&catalog));
        assert!(roll.check_tolerance(&catalog, &defects));
    }
}

//! Roll arrangement as a bee colony problem.

use rand::Rng;

use super::biscuit::Catalog;
use super::defect::DefectMap;
use super::roll::Roll;
use super::RollError;
use crate::abc::AbcProblem;

/// Arrange biscuits on one roll to maximize the sale value.
///
/// - Sources are random fills that avoid defects where they can.
/// - The neighborhood swaps a single placed biscuit for a different type,
///   keeping its slot.
/// - An arrangement that overflows the roll or covers too many defects
///   scores zero.
///
/// # Examples
///
/// ```
/// use biscuit_abc::abc::{AbcConfig, AbcRunner};
/// use biscuit_abc::roll::{Catalog, DefectMap, RollProblem};
///
/// let defects = DefectMap::from_csv_str("x,class\n10.5,a\n42.0,b\n").unwrap();
/// let problem = RollProblem::new(100, Catalog::standard(), defects).unwrap();
/// let config = AbcConfig::default().with_max_generations(20).with_seed(3);
///
/// let result = AbcRunner::run(&problem, &config).unwrap();
/// assert!(problem.is_valid(&result.best));
/// ```
#[derive(Debug, Clone)]
pub struct RollProblem {
    length: u32,
    catalog: Catalog,
    defects: DefectMap,
}

impl RollProblem {
    /// Creates the problem for a roll of `length` units.
    ///
    /// # Errors
    ///
    /// Returns [`RollError::ZeroLength`] for an empty roll.
    pub fn new(length: u32, catalog: Catalog, defects: DefectMap) -> Result<Self, RollError> {
        if length == 0 {
            return Err(RollError::ZeroLength);
        }
        Ok(Self {
            length,
            catalog,
            defects,
        })
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn defects(&self) -> &DefectMap {
        &self.defects
    }

    /// Whether `roll` fits and respects every biscuit's tolerance.
    pub fn is_valid(&self, roll: &Roll) -> bool {
        roll.length() == self.length
            && roll.fits(&self.catalog)
            && roll.check_tolerance(&self.catalog, &self.defects)
    }
}

impl AbcProblem for RollProblem {
    type Solution = Roll;
    type Error = RollError;

    fn generate<R: Rng>(&self, rng: &mut R) -> Result<Roll, RollError> {
        Ok(Roll::fill_random(
            self.length,
            &self.catalog,
            &self.defects,
            true,
            rng,
        ))
    }

    fn mutate<R: Rng>(&self, roll: &Roll, rng: &mut R) -> Result<Roll, RollError> {
        let placed = roll.biscuit_slots();
        if placed.is_empty() {
            return Ok(roll.clone());
        }
        let slot = placed[rng.random_range(0..placed.len())];
        let current = roll.slots()[slot].unwrap_or(0);
        if current >= self.catalog.len() {
            return Err(RollError::UnknownBiscuit { index: current });
        }

        // Uniform over the other types.
        let types = self.catalog.len();
        let replacement = if types == 1 {
            current
        } else {
            let drawn = rng.random_range(0..types - 1);
            if drawn >= current {
                drawn + 1
            } else {
                drawn
            }
        };

        Ok(roll
            .with_biscuit_at(slot, replacement)
            .unwrap_or_else(|| roll.clone()))
    }

    fn evaluate(&self, roll: &Roll) -> f64 {
        f64::from(roll.total_price(&self.catalog))
    }

    fn is_feasible(&self, roll: &Roll) -> bool {
        self.is_valid(roll)
    }
}

//! Biscuit types and the catalog they are drawn from.

use std::collections::BTreeMap;

use super::defect::DefectCounts;
use super::RollError;

/// A biscuit type: its footprint on the roll, its sale value and how many
/// defects of each class it tolerates.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Biscuit {
    pub size: u32,
    pub value: u32,
    pub tolerance: BTreeMap<String, u32>,
}

impl Biscuit {
    /// Creates a biscuit type.
    pub fn new<K>(size: u32, value: u32, tolerance: impl IntoIterator<Item = (K, u32)>) -> Self
    where
        K: Into<String>,
    {
        Self {
            size,
            value,
            tolerance: tolerance.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Whether the defects under the biscuit stay within its tolerance.
    ///
    /// A defect class missing from the tolerance table is not tolerated.
    pub fn accepts(&self, defects: &DefectCounts<'_>) -> bool {
        defects
            .iter()
            .all(|(class, &count)| count <= self.tolerance.get(*class).copied().unwrap_or(0))
    }
}

/// The biscuit types available for an arrangement, indexed by position.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Catalog {
    types: Vec<Biscuit>,
}

impl Catalog {
    /// Creates a catalog.
    ///
    /// # Errors
    ///
    /// Rejects an empty catalog and zero-size biscuits, which could never
    /// advance along the roll.
    pub fn new(types: Vec<Biscuit>) -> Result<Self, RollError> {
        if types.is_empty() {
            return Err(RollError::EmptyCatalog);
        }
        if let Some(index) = types.iter().position(|b| b.size == 0) {
            return Err(RollError::ZeroSizeBiscuit { index });
        }
        Ok(Self { types })
    }

    /// The four production biscuit types, largest first.
    pub fn standard() -> Self {
        Self {
            types: vec![
                Biscuit::new(8, 12, [("a", 5), ("b", 4), ("c", 4)]),
                Biscuit::new(5, 8, [("a", 2), ("b", 3), ("c", 2)]),
                Biscuit::new(4, 6, [("a", 4), ("b", 2), ("c", 3)]),
                Biscuit::new(2, 1, [("a", 1), ("b", 2), ("c", 1)]),
            ],
        }
    }

    pub fn get(&self, index: usize) -> Option<&Biscuit> {
        self.types.get(index)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Biscuit> {
        self.types.iter()
    }

    /// Type indices ordered by decreasing size (ties keep catalog order).
    pub fn by_size_desc(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.types.len()).collect();
        order.sort_by(|&a, &b| self.types[b].size.cmp(&self.types[a].size));
        order
    }

    /// Type indices ordered by decreasing value (ties keep catalog order).
    pub fn by_value_desc(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.types.len()).collect();
        order.sort_by(|&a, &b| self.types[b].value.cmp(&self.types[a].value));
        order
    }
}

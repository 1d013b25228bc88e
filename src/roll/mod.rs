//! Biscuit arrangement on a defective dough roll.
//!
//! A roll is a one-dimensional strip of fixed length carrying defects of
//! several classes at known positions. Biscuits of a few types are cut
//! from the roll one after another; each type has a size, a value and a
//! per-class tolerance for the defects it may cover. The goal is the most
//! valuable arrangement whose biscuits all stay within tolerance.
//!
//! This module supplies the domain side of the bee colony:
//!
//! - [`Catalog`] / [`Biscuit`]: the biscuit types
//! - [`DefectMap`]: defects sorted by position, loadable from CSV
//! - [`Roll`]: an arrangement, with random filling, pricing and checks
//! - [`RollProblem`]: the [`AbcProblem`](crate::abc::AbcProblem) binding
//! - [`greedy`]: a value-first greedy baseline

mod biscuit;
mod defect;
pub mod greedy;
mod problem;
#[allow(clippy::module_inception)]
mod roll;

pub use biscuit::{Biscuit, Catalog};
pub use defect::{Defect, DefectCounts, DefectMap};
pub use problem::RollProblem;
pub use roll::Roll;

use thiserror::Error;

/// Errors raised by the roll domain.
#[derive(Debug, Error)]
pub enum RollError {
    #[error("failed to read defect file: {0}")]
    Io(#[from] std::io::Error),

    #[error("defect file has no '{column}' column")]
    MissingColumn { column: &'static str },

    #[error("malformed defect on line {line}: {reason}")]
    MalformedDefect { line: usize, reason: String },

    #[error("biscuit catalog is empty")]
    EmptyCatalog,

    #[error("biscuit type {index} has zero size")]
    ZeroSizeBiscuit { index: usize },

    #[error("roll refers to unknown biscuit type {index}")]
    UnknownBiscuit { index: usize },

    #[error("roll length must be at least 1")]
    ZeroLength,
}

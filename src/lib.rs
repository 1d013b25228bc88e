//! Artificial Bee Colony optimization for biscuit arrangements.
//!
//! The crate has two layers:
//!
//! - [`abc`]: a generic Artificial Bee Colony engine. Workers exploit food
//!   sources, onlookers follow their dances, scouts replace abandoned
//!   sources. Any domain plugs in through [`abc::AbcProblem`].
//! - [`roll`]: the biscuit domain. Biscuits of several types are cut from
//!   a fixed-length dough roll with defects; each type tolerates only so
//!   many defects of each class. [`roll::RollProblem`] binds it to the
//!   colony.
//!
//! # Example
//!
//! ```
//! use biscuit_abc::abc::{AbcConfig, AbcRunner};
//! use biscuit_abc::roll::{Catalog, DefectMap, RollProblem};
//!
//! let defects = DefectMap::from_csv_str("x,class\n3.5,a\n17.2,c\n18.9,c\n").unwrap();
//! let problem = RollProblem::new(60, Catalog::standard(), defects).unwrap();
//!
//! let config = AbcConfig::default()
//!     .with_population_size(20)
//!     .with_max_generations(50)
//!     .with_seed(42);
//! let result = AbcRunner::run(&problem, &config).unwrap();
//! assert!(result.best_quality > 0.0);
//! ```

pub mod abc;
pub mod error;
pub mod roll;

pub use error::{AbcError, Result};

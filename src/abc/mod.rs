//! Artificial Bee Colony (ABC).
//!
//! A population-based metaheuristic in which bees share the work of
//! exploring and exploiting food sources (candidate solutions). Users plug
//! their domain in by implementing [`AbcProblem`].
//!
//! # Roles
//!
//! - **Workers** own one source each, probe its neighborhood and advertise
//!   its quality by dancing.
//! - **Onlookers** pick advertised sources with probability proportional
//!   to their dance and probe around them.
//! - **Scouts** replace abandoned sources with brand-new random ones.
//!
//! Every source carries a visit budget; once it is spent the source is
//! abandoned and its worker becomes a scout. This is the colony's balance
//! between exploitation and exploration.
//!
//! # Key Types
//!
//! - [`AbcConfig`]: Colony layout and loop parameters
//! - [`AbcRunner`]: Executes the generational loop
//! - [`ColonySession`]: Step-by-step control over one colony
//! - [`AbcResult`]: Final optimization result with statistics
//!
//! # References
//!
//! - Karaboga, D. (2005). "An Idea Based on Honey Bee Swarm for Numerical
//!   Optimization", Technical Report TR06, Erciyes University.
//! - Karaboga, D. & Basturk, B. (2007). "A powerful and efficient algorithm
//!   for numerical function optimization: artificial bee colony (ABC)
//!   algorithm", *Journal of Global Optimization* 39(3), 459-471.

mod bee;
mod config;
mod food;
mod hive;
mod runner;
mod selection;
mod session;
mod types;

pub use bee::{Bee, BeeId, Onlooker, Role, Scout, Worker};
pub use config::AbcConfig;
pub use food::Food;
pub use hive::Hive;
pub use runner::{AbcResult, AbcRunner};
pub use selection::Choreography;
pub use session::{ColonySession, GenerationStats};
pub use types::{AbcProblem, Objective};

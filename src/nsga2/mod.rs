//! Reference NSGA-II driver.
//!
//! Composes the four operators from [`crate::operators`] into an elitist
//! multi-objective loop: tournament mating, crossover, mutation, duplicate
//! filtering against the current population, then rank-and-crowding
//! survival over parents and offspring combined.
//!
//! # Key Types
//!
//! - [`Nsga2`]: the driver, generic over its four operators
//! - [`Nsga2Config`]: population size, generations, mating attempts, seed
//! - [`Nsga2Result`]: final population, its Pareto front and run statistics
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II",
//!   IEEE Transactions on Evolutionary Computation, 6(2), 182-197

mod config;
pub mod pareto;
mod runner;
mod selection;
mod survival;

pub use config::Nsga2Config;
pub use runner::{GenerationStats, Nsga2, Nsga2Result};
pub use selection::{binary_tournament, SurvivalInfo};
pub use survival::rank_and_crowding;

//! Population data layout.
//!
//! - [`Individual`]: one row of `n_var` genotype slots plus its evaluation
//! - [`Population`]: ordered rows with a fixed column count
//! - [`Group`] ([`MatingGroup`] / [`OffspringGroup`]): the
//!   `(slots, matings, n_var)` view exchanged with crossover operators
//!
//! The split keeps "how many individuals" apart from "what is inside one
//! individual": operators loop over matings and positions and never see
//! the population size they were drawn from.

mod group;
mod individual;
mod matrix;

pub use group::{Group, MatingGroup, OffspringGroup};
pub use individual::Individual;
pub use matrix::Population;

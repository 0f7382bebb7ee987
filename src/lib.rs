//! Representation-agnostic operators for multi-objective evolutionary
//! optimization.
//!
//! The crate supplies the variation and initialization operators an
//! NSGA-II-style optimizer needs, written against an abstract genotype so
//! the same operators serve strings, symbol vectors or any other ordered
//! encoding:
//!
//! - **Sampling**: uniform random initial populations over an alphabet.
//! - **Crossover**: uniform two-parent, two-child recombination with
//!   complementary offspring.
//! - **Mutation**: whole-sequence reorder, single-point substitution, or
//!   no change, chosen per row.
//! - **Duplicate elimination**: pluggable genotype equality used to filter
//!   offspring.
//!
//! A reference driver in [`nsga2`] composes them into a complete
//! elitist multi-objective loop.
//!
//! # Architecture
//!
//! - [`genotype`]: the capability interface operators depend on
//! - [`problem`]: descriptor (shape + representation parameters) and the
//!   evaluation contract
//! - [`population`]: rows, populations and mating groups
//! - [`operators`]: the four operator traits and their implementations
//! - [`random`]: explicit, seedable random context
//! - [`nsga2`]: the reference driver
//!
//! Operators keep no state between calls and never read a process-global
//! generator; every call receives its random source from the caller.

pub mod error;
pub mod genotype;
pub mod nsga2;
pub mod operators;
pub mod population;
pub mod problem;
pub mod random;

pub use error::{OperatorError, Result};
pub use genotype::Genotype;
pub use operators::{
    Crossover, DescriptorOf, DuplicateElimination, ElementwiseEquality, GenotypeEquality,
    LengthPolicy, Mutation, MutationOutcome, NoDuplicateElimination, ReorderSubstituteMutation,
    Sampling, UniformCrossover, UniformSampling,
};
pub use population::{Group, Individual, MatingGroup, OffspringGroup, Population};
pub use problem::{
    evaluate_checked, Alphabet, Evaluation, Problem, ProblemDescriptor, ProblemDescriptorBuilder,
    RepresentationParams,
};

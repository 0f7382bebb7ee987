//! The four pluggable operators.
//!
//! Every operator works on whole batches ([`Population`] or
//! [`MatingGroup`]) in one call and receives the run's random generator
//! explicitly. None of them keeps state between calls.
//!
//! # Traits
//!
//! - [`Sampling`]: descriptor → initial population
//! - [`Crossover`]: mating group → offspring group, fixed arity
//! - [`Mutation`]: population → population of the same shape
//! - [`DuplicateElimination`]: pairwise genotype equality
//!
//! # Provided implementations
//!
//! - [`UniformSampling`]: i.i.d. uniform symbols per position
//! - [`UniformCrossover`]: per-position fair coin, two complementary children
//! - [`ReorderSubstituteMutation`]: shuffle / point substitution / no-op
//! - [`GenotypeEquality`], [`ElementwiseEquality`], [`NoDuplicateElimination`]

mod crossover;
mod duplicates;
mod mutation;
mod sampling;

pub use crossover::{LengthPolicy, UniformCrossover};
pub use duplicates::{ElementwiseEquality, GenotypeEquality, NoDuplicateElimination};
pub use mutation::{MutationOutcome, ReorderSubstituteMutation};
pub use sampling::UniformSampling;

use crate::error::{OperatorError, Result};
use crate::genotype::Genotype;
use crate::population::{Individual, MatingGroup, OffspringGroup, Population};
use crate::problem::ProblemDescriptor;
use rand::Rng;

/// Shorthand for the descriptor type matching a genotype.
pub type DescriptorOf<G> = ProblemDescriptor<<G as Genotype>::Element>;

/// Produces an initial population.
pub trait Sampling<G: Genotype>: Send + Sync {
    /// Returns a population of shape `(n_samples, problem.n_var())`.
    ///
    /// No duplicate avoidance happens here.
    fn sample<R: Rng>(
        &self,
        problem: &DescriptorOf<G>,
        n_samples: usize,
        rng: &mut R,
    ) -> Result<Population<G>>;
}

/// Recombines parents into offspring.
///
/// Arity is fixed at construction: every mating carries
/// [`n_parents`](Crossover::n_parents) members in, and
/// [`n_offsprings`](Crossover::n_offsprings) come out. The mating and
/// variable dimensions of the output equal those of the input.
pub trait Crossover<G: Genotype>: Send + Sync {
    fn n_parents(&self) -> usize;

    fn n_offsprings(&self) -> usize;

    fn crossover<R: Rng>(
        &self,
        problem: &DescriptorOf<G>,
        parents: &MatingGroup<G>,
        rng: &mut R,
    ) -> Result<OffspringGroup<G>>;

    /// Checks the group's slot count and column count against this operator
    /// and the descriptor.
    fn check_arity(&self, problem: &DescriptorOf<G>, parents: &MatingGroup<G>) -> Result<()> {
        if parents.n_slots() != self.n_parents() {
            return Err(OperatorError::ParentCount {
                expected: self.n_parents(),
                found: parents.n_slots(),
            });
        }
        if parents.n_var() != problem.n_var() {
            return Err(OperatorError::VariableCount {
                expected: problem.n_var(),
                found: parents.n_var(),
            });
        }
        Ok(())
    }
}

/// Perturbs each row independently.
///
/// Row `i` of the output corresponds to row `i` of the input.
pub trait Mutation<G: Genotype>: Send + Sync {
    fn mutate<R: Rng>(
        &self,
        problem: &DescriptorOf<G>,
        population: Population<G>,
        rng: &mut R,
    ) -> Result<Population<G>>;
}

/// Decides genotype equality between two rows.
///
/// Implementations must be symmetric, and reflexive unless they exist to
/// switch filtering off ([`NoDuplicateElimination`]). The driver uses the
/// predicate to reject offspring; whether it then re-mates is driver policy.
pub trait DuplicateElimination<G: Genotype>: Send + Sync {
    fn is_equal(&self, a: &Individual<G>, b: &Individual<G>) -> bool;

    /// Drops every candidate equal to a row in `existing`, and every
    /// candidate equal to an earlier candidate. Survivors keep their order.
    ///
    /// ```
    /// use u_moea::{DuplicateElimination, GenotypeEquality, Population};
    ///
    /// let pop = |w: &[&str]| Population::from_genotypes(w.iter().map(|s| s.to_string()).collect());
    /// let existing = pop(&["aa"]);
    /// let candidates = pop(&["ab", "aa", "ab", "bb"]);
    ///
    /// let kept = GenotypeEquality.eliminate_duplicates(candidates, &[&existing]);
    /// assert_eq!(kept.genotypes(0), vec!["ab", "bb"]);
    /// ```
    fn eliminate_duplicates(
        &self,
        candidates: Population<G>,
        existing: &[&Population<G>],
    ) -> Population<G> {
        let n_var = candidates.n_var();
        let mut kept: Vec<Individual<G>> = Vec::with_capacity(candidates.len());
        for cand in candidates {
            let seen = existing
                .iter()
                .flat_map(|pop| pop.iter())
                .chain(kept.iter())
                .any(|other| self.is_equal(&cand, other));
            if !seen {
                kept.push(cand);
            }
        }
        Population::from_checked(n_var, kept)
    }
}

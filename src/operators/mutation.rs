//! Reorder / point-substitution / no-op mutation.

use super::{DescriptorOf, Mutation};
use crate::error::{OperatorError, Result};
use crate::genotype::Genotype;
use crate::population::{Individual, Population};
use crate::problem::Alphabet;
use crate::random::map_owned;
use rand::seq::SliceRandom;
use rand::Rng;

/// Which branch a mutation call took for one individual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationOutcome {
    /// Sub-elements were shuffled; the multiset is preserved.
    Reordered,
    /// Each sub-element was independently resampled with probability `1/len`.
    Substituted,
    /// The individual was returned untouched.
    Unchanged,
}

/// Three-way mutation: reorder, point substitution, or no-op.
///
/// Per individual one selector `r ∈ [0, 1)` is drawn:
///
/// - `r < reorder`: apply a uniformly random permutation to the sub-elements
/// - `r < reorder + substitute`: replace each sub-element with probability
///   `1/len` by a uniform draw from the alphabet (≈ one change per call)
/// - otherwise: leave the individual unchanged
///
/// Exactly one branch fires per individual. Rows with several variables
/// apply the chosen branch to every variable. A changed row loses its
/// evaluation; an unchanged row is returned as-is, evaluation included.
///
/// Requires the descriptor's `alphabet`.
///
/// ```
/// use u_moea::ReorderSubstituteMutation;
///
/// let m = ReorderSubstituteMutation::default();
/// assert!((m.reorder_probability() - 0.4).abs() < 1e-12);
/// assert!((m.substitute_probability() - 0.4).abs() < 1e-12);
///
/// assert!(ReorderSubstituteMutation::with_probabilities(0.7, 0.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReorderSubstituteMutation {
    reorder: f64,
    substitute: f64,
}

impl Default for ReorderSubstituteMutation {
    fn default() -> Self {
        Self {
            reorder: 0.4,
            substitute: 0.4,
        }
    }
}

impl ReorderSubstituteMutation {
    /// The 0.4 / 0.4 / 0.2 split.
    pub fn new() -> Self {
        Self::default()
    }

    /// Custom branch probabilities; the no-op branch takes the remainder.
    pub fn with_probabilities(reorder: f64, substitute: f64) -> Result<Self> {
        for (name, p) in [("reorder", reorder), ("substitute", substitute)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(OperatorError::InvalidProbability(format!(
                    "{name} probability {p} is outside [0, 1]"
                )));
            }
        }
        if reorder + substitute > 1.0 + 1e-12 {
            return Err(OperatorError::InvalidProbability(format!(
                "reorder + substitute = {} exceeds 1",
                reorder + substitute
            )));
        }
        Ok(Self {
            reorder,
            substitute,
        })
    }

    pub fn reorder_probability(&self) -> f64 {
        self.reorder
    }

    pub fn substitute_probability(&self) -> f64 {
        self.substitute
    }

    pub fn unchanged_probability(&self) -> f64 {
        (1.0 - self.reorder - self.substitute).max(0.0)
    }

    /// Picks the branch for one selector draw.
    fn branch(&self, r: f64) -> MutationOutcome {
        if r < self.reorder {
            MutationOutcome::Reordered
        } else if r < self.reorder + self.substitute {
            MutationOutcome::Substituted
        } else {
            MutationOutcome::Unchanged
        }
    }

    /// Mutates a single genotype and reports the branch taken.
    pub fn mutate_genotype<G, R>(
        &self,
        genotype: &G,
        alphabet: &Alphabet<G::Element>,
        rng: &mut R,
    ) -> (G, MutationOutcome)
    where
        G: Genotype,
        R: Rng,
    {
        let outcome = self.branch(rng.random::<f64>());
        let next = apply_branch(outcome, genotype, alphabet, rng);
        (next, outcome)
    }

    /// Mutates one row and reports the branch taken.
    pub fn mutate_individual<G, R>(
        &self,
        individual: Individual<G>,
        alphabet: &Alphabet<G::Element>,
        rng: &mut R,
    ) -> (Individual<G>, MutationOutcome)
    where
        G: Genotype,
        R: Rng,
    {
        let outcome = self.branch(rng.random::<f64>());
        if outcome == MutationOutcome::Unchanged {
            return (individual, outcome);
        }
        let variables = individual
            .variables()
            .iter()
            .map(|g| apply_branch(outcome, g, alphabet, rng))
            .collect();
        (Individual::new(variables), outcome)
    }
}

fn apply_branch<G, R>(
    outcome: MutationOutcome,
    genotype: &G,
    alphabet: &Alphabet<G::Element>,
    rng: &mut R,
) -> G
where
    G: Genotype,
    R: Rng,
{
    match outcome {
        MutationOutcome::Reordered => {
            let mut elements = genotype.elements();
            elements.shuffle(rng);
            G::from_elements(elements)
        }
        MutationOutcome::Substituted => {
            let n = genotype.len();
            if n == 0 {
                return genotype.clone();
            }
            let p = 1.0 / n as f64;
            let mut next = genotype.clone();
            for i in 0..n {
                if rng.random_bool(p) {
                    next = next.with_value_at(i, alphabet.sample(rng));
                }
            }
            next
        }
        MutationOutcome::Unchanged => genotype.clone(),
    }
}

impl<G: Genotype> Mutation<G> for ReorderSubstituteMutation {
    fn mutate<R: Rng>(
        &self,
        problem: &DescriptorOf<G>,
        population: Population<G>,
        rng: &mut R,
    ) -> Result<Population<G>> {
        let alphabet = problem.require_alphabet()?;
        if population.n_var() != problem.n_var() {
            return Err(OperatorError::VariableCount {
                expected: problem.n_var(),
                found: population.n_var(),
            });
        }
        for ind in &population {
            problem.check_individual(ind)?;
        }

        let n_var = population.n_var();
        let mutated = map_owned(rng, population.into_individuals(), |row, unit_rng| {
            self.mutate_individual(row, alphabet, unit_rng).0
        });
        Population::from_individuals(n_var, mutated)
    }
}

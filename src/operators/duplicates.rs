//! Genotype-equality predicates for offspring filtering.

use super::DuplicateElimination;
use crate::genotype::Genotype;
use crate::population::Individual;

/// Equality through the genotype's own `PartialEq`.
///
/// Two rows are equal when they have the same number of variables and
/// every variable compares equal. Objective values are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenotypeEquality;

impl<G: Genotype + PartialEq> DuplicateElimination<G> for GenotypeEquality {
    fn is_equal(&self, a: &Individual<G>, b: &Individual<G>) -> bool {
        a.variables() == b.variables()
    }
}

/// Equality through the capability interface only.
///
/// Compares lengths, then sub-elements position by position. Works for
/// genotypes that do not implement `PartialEq` themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementwiseEquality;

impl<G: Genotype> DuplicateElimination<G> for ElementwiseEquality {
    fn is_equal(&self, a: &Individual<G>, b: &Individual<G>) -> bool {
        a.n_var() == b.n_var()
            && a.variables().iter().zip(b.variables()).all(|(x, y)| {
                x.len() == y.len() && (0..x.len()).all(|i| x.value_at(i) == y.value_at(i))
            })
    }
}

/// Never reports two rows as equal; disables duplicate filtering.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDuplicateElimination;

impl<G: Genotype> DuplicateElimination<G> for NoDuplicateElimination {
    fn is_equal(&self, _a: &Individual<G>, _b: &Individual<G>) -> bool {
        false
    }
}

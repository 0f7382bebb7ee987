//! Fixed-width row collections.

use super::individual::Individual;
use crate::error::{OperatorError, Result};
use crate::genotype::Genotype;

/// An ordered collection of rows sharing one column count `n_var`.
///
/// Row order carries no optimization meaning, but operators that map a
/// population to a population preserve it: row `i` in is row `i` out.
///
/// ```
/// use u_moea::{Individual, Population};
///
/// let pop = Population::from_genotypes(vec!["ab".to_string(), "ba".to_string()]);
/// assert_eq!(pop.shape(), (2, 1));
/// assert_eq!(pop.get(1).unwrap().genotype(), "ba");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Population<G> {
    n_var: usize,
    individuals: Vec<Individual<G>>,
}

impl<G: Genotype> Population<G> {
    /// An empty population whose rows will carry `n_var` variables.
    pub fn new(n_var: usize) -> Self {
        Self {
            n_var,
            individuals: Vec::new(),
        }
    }

    /// Builds a population, rejecting rows of the wrong width.
    pub fn from_individuals(n_var: usize, individuals: Vec<Individual<G>>) -> Result<Self> {
        check_width(n_var, &individuals)?;
        Ok(Self { n_var, individuals })
    }

    pub(crate) fn from_checked(n_var: usize, individuals: Vec<Individual<G>>) -> Self {
        debug_assert!(individuals.iter().all(|ind| ind.n_var() == n_var));
        Self { n_var, individuals }
    }

    /// A single-variable population, one row per genotype.
    pub fn from_genotypes(genotypes: Vec<G>) -> Self {
        Self {
            n_var: 1,
            individuals: genotypes.into_iter().map(Individual::single).collect(),
        }
    }

    /// `(rows, n_var)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.individuals.len(), self.n_var)
    }

    pub fn n_var(&self) -> usize {
        self.n_var
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Individual<G>> {
        self.individuals.get(i)
    }

    pub fn get_mut(&mut self, i: usize) -> Option<&mut Individual<G>> {
        self.individuals.get_mut(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Individual<G>> {
        self.individuals.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Individual<G>> {
        self.individuals.iter_mut()
    }

    pub fn individuals(&self) -> &[Individual<G>] {
        &self.individuals
    }

    pub fn into_individuals(self) -> Vec<Individual<G>> {
        self.individuals
    }

    /// Appends one row.
    pub fn push(&mut self, individual: Individual<G>) -> Result<()> {
        check_width(self.n_var, std::slice::from_ref(&individual))?;
        self.individuals.push(individual);
        Ok(())
    }

    /// Appends all rows of `other`.
    pub fn extend(&mut self, other: Population<G>) -> Result<()> {
        if other.n_var != self.n_var {
            return Err(OperatorError::VariableCount {
                expected: self.n_var,
                found: other.n_var,
            });
        }
        self.individuals.extend(other.individuals);
        Ok(())
    }

    /// A new population holding clones of the rows at `indices`, in that order.
    ///
    /// # Panics
    /// Panics if any index is out of range.
    pub fn select(&self, indices: &[usize]) -> Population<G> {
        Population {
            n_var: self.n_var,
            individuals: indices.iter().map(|&i| self.individuals[i].clone()).collect(),
        }
    }

    /// Keeps only the first `len` rows.
    pub fn truncate(&mut self, len: usize) {
        self.individuals.truncate(len);
    }

    /// The genotypes of column `j`, one per row.
    ///
    /// # Panics
    /// Panics if `j >= self.n_var()`.
    pub fn genotypes(&self, j: usize) -> Vec<&G> {
        self.individuals.iter().map(|ind| ind.variable(j)).collect()
    }
}

impl<'a, G> IntoIterator for &'a Population<G> {
    type Item = &'a Individual<G>;
    type IntoIter = std::slice::Iter<'a, Individual<G>>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}

impl<G> IntoIterator for Population<G> {
    type Item = Individual<G>;
    type IntoIter = std::vec::IntoIter<Individual<G>>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.into_iter()
    }
}

pub(crate) fn check_width<G: Genotype>(n_var: usize, rows: &[Individual<G>]) -> Result<()> {
    match rows.iter().find(|ind| ind.n_var() != n_var) {
        Some(bad) => Err(OperatorError::VariableCount {
            expected: n_var,
            found: bad.n_var(),
        }),
        None => Ok(()),
    }
}

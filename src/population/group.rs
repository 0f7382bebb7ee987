//! Three-dimensional parent and offspring groups.

use super::individual::Individual;
use super::matrix::{check_width, Population};
use crate::error::{OperatorError, Result};
use crate::genotype::Genotype;

/// A three-dimensional view `(n_slots, n_matings, n_var)`.
///
/// Slot `k` of mating `i` is the `k`-th parent (or offspring) of the `i`-th
/// independent mating event. Storage is slot-major: each slot is a
/// [`Population`] with one row per mating, so operator code indexes matings
/// without knowing the population size they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<G> {
    n_var: usize,
    slots: Vec<Population<G>>,
}

/// Parents handed to a crossover: `n_parents` slots.
pub type MatingGroup<G> = Group<G>;

/// Children produced by a crossover: `n_offsprings` slots.
pub type OffspringGroup<G> = Group<G>;

impl<G: Genotype> Group<G> {
    /// Builds a group from a list of matings, each listing its members in
    /// slot order.
    ///
    /// ```
    /// use u_moea::{Individual, MatingGroup};
    ///
    /// let ind = |s: &str| Individual::single(s.to_string());
    /// let group = MatingGroup::from_matings(1, vec![
    ///     vec![ind("aa"), ind("bb")],
    ///     vec![ind("cc"), ind("dd")],
    ///     vec![ind("ee"), ind("ff")],
    /// ]).unwrap();
    /// assert_eq!(group.shape(), (2, 3, 1));
    /// assert_eq!(group.mating(2)[1].genotype(), "ff");
    /// ```
    pub fn from_matings(n_var: usize, matings: Vec<Vec<Individual<G>>>) -> Result<Self> {
        let n_slots = matings.first().map_or(0, Vec::len);
        let mut slots: Vec<Vec<Individual<G>>> = (0..n_slots)
            .map(|_| Vec::with_capacity(matings.len()))
            .collect();

        for (mating, members) in matings.into_iter().enumerate() {
            if members.len() != n_slots {
                return Err(OperatorError::RaggedGroup {
                    mating,
                    expected: n_slots,
                    found: members.len(),
                });
            }
            check_width(n_var, &members)?;
            for (slot, member) in slots.iter_mut().zip(members) {
                slot.push(member);
            }
        }

        let slots = slots
            .into_iter()
            .map(|rows| Population::from_individuals(n_var, rows))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { n_var, slots })
    }

    /// Builds a group from per-slot populations of equal length.
    pub fn from_slots(n_var: usize, slots: Vec<Population<G>>) -> Result<Self> {
        let n_matings = slots.first().map_or(0, Population::len);
        for (k, slot) in slots.iter().enumerate() {
            if slot.n_var() != n_var {
                return Err(OperatorError::VariableCount {
                    expected: n_var,
                    found: slot.n_var(),
                });
            }
            if slot.len() != n_matings {
                return Err(OperatorError::SlotLength {
                    slot: k,
                    expected: n_matings,
                    found: slot.len(),
                });
            }
        }
        Ok(Self { n_var, slots })
    }

    /// `(n_slots, n_matings, n_var)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.n_slots(), self.n_matings(), self.n_var)
    }

    pub fn n_slots(&self) -> usize {
        self.slots.len()
    }

    pub fn n_matings(&self) -> usize {
        self.slots.first().map_or(0, Population::len)
    }

    pub fn n_var(&self) -> usize {
        self.n_var
    }

    /// All rows in slot `k`, one per mating.
    ///
    /// # Panics
    /// Panics if `k >= self.n_slots()`.
    pub fn slot(&self, k: usize) -> &Population<G> {
        &self.slots[k]
    }

    /// The members of mating `i` in slot order.
    ///
    /// # Panics
    /// Panics if `i >= self.n_matings()`.
    pub fn mating(&self, i: usize) -> Vec<&Individual<G>> {
        self.slots
            .iter()
            .map(|slot| &slot.individuals()[i])
            .collect()
    }

    /// Flattens slot-major: every mating's slot 0, then every mating's slot 1, ...
    pub fn into_population(self) -> Population<G> {
        let rows = self
            .slots
            .into_iter()
            .flat_map(Population::into_individuals)
            .collect();
        // Widths were checked on construction.
        Population::from_checked(self.n_var, rows)
    }
}

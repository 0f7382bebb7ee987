//! A single population row.

use crate::genotype::Genotype;
use crate::problem::Evaluation;

/// One row of a population: `n_var` genotype slots plus the evaluation
/// attached by the driver once the row has been evaluated.
///
/// Operators create new rows or replace slot values; they never write to
/// the evaluation. A row whose genotype changes is returned unevaluated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual<G> {
    variables: Vec<G>,
    evaluation: Option<Evaluation>,
}

impl<G: Genotype> Individual<G> {
    /// An unevaluated row with the given variables.
    pub fn new(variables: Vec<G>) -> Self {
        Self {
            variables,
            evaluation: None,
        }
    }

    /// An unevaluated single-variable row.
    pub fn single(genotype: G) -> Self {
        Self::new(vec![genotype])
    }

    pub fn n_var(&self) -> usize {
        self.variables.len()
    }

    pub fn variables(&self) -> &[G] {
        &self.variables
    }

    /// The genotype in column `j`.
    ///
    /// # Panics
    /// Panics if `j >= self.n_var()`.
    pub fn variable(&self, j: usize) -> &G {
        &self.variables[j]
    }

    /// The genotype in the first column; the common single-variable case.
    ///
    /// # Panics
    /// Panics if the row has no variables.
    pub fn genotype(&self) -> &G {
        &self.variables[0]
    }

    pub fn into_variables(self) -> Vec<G> {
        self.variables
    }

    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }

    pub fn is_evaluated(&self) -> bool {
        self.evaluation.is_some()
    }

    /// Objective values, if evaluated.
    pub fn objectives(&self) -> Option<&[f64]> {
        self.evaluation.as_ref().map(|e| e.objectives.as_slice())
    }

    /// Constraint values, if evaluated.
    pub fn constraints(&self) -> Option<&[f64]> {
        self.evaluation.as_ref().map(|e| e.constraints.as_slice())
    }

    /// Attaches an evaluation. Called by the driver after evaluation.
    pub fn set_evaluation(&mut self, evaluation: Evaluation) {
        self.evaluation = Some(evaluation);
    }

    pub fn with_evaluation(mut self, evaluation: Evaluation) -> Self {
        self.set_evaluation(evaluation);
        self
    }
}

//! The evaluation contract between a problem and the driver.

use super::descriptor::ProblemDescriptor;
use crate::error::{OperatorError, Result};
use crate::genotype::Genotype;
use crate::nsga2::GenerationStats;
use crate::population::Individual;

/// Objective and constraint values for one individual.
///
/// All objectives are **minimized**. Constraints follow the `g(x) <= 0`
/// convention: a positive value is a violation of that size.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    pub objectives: Vec<f64>,
    pub constraints: Vec<f64>,
}

impl Evaluation {
    /// An unconstrained evaluation.
    pub fn new(objectives: Vec<f64>) -> Self {
        Self {
            objectives,
            constraints: Vec::new(),
        }
    }

    pub fn with_constraints(objectives: Vec<f64>, constraints: Vec<f64>) -> Self {
        Self {
            objectives,
            constraints,
        }
    }

    /// Total constraint violation: the sum of the positive constraint values.
    pub fn constraint_violation(&self) -> f64 {
        self.constraints.iter().map(|&c| c.max(0.0)).sum()
    }

    pub fn is_feasible(&self) -> bool {
        self.constraint_violation() <= 0.0
    }
}

/// A multi-objective problem: descriptor plus evaluation function.
///
/// `evaluate` must be a pure function of the genotype values. To maximize
/// an objective, return its negation.
///
/// # Thread Safety
///
/// `Problem` must be `Send + Sync` because the driver may evaluate rows in
/// parallel with rayon when the `parallel` feature is enabled.
///
/// ```
/// use u_moea::{Alphabet, Evaluation, Problem, ProblemDescriptor, Result};
///
/// struct CountA {
///     desc: ProblemDescriptor<char>,
/// }
///
/// impl Problem for CountA {
///     type Genotype = String;
///     fn descriptor(&self) -> &ProblemDescriptor<char> { &self.desc }
///     fn evaluate(&self, vars: &[String]) -> Result<Evaluation> {
///         let a = vars[0].chars().filter(|&c| c == 'a').count();
///         Ok(Evaluation::new(vec![-(a as f64)]))
///     }
/// }
///
/// let p = CountA {
///     desc: ProblemDescriptor::builder()
///         .with_alphabet(Alphabet::lowercase())
///         .with_length(3)
///         .build()
///         .unwrap(),
/// };
/// assert_eq!(p.evaluate(&["aba".to_string()]).unwrap().objectives, vec![-2.0]);
/// ```
pub trait Problem: Send + Sync {
    /// The genotype held in each decision-variable slot.
    type Genotype: Genotype;

    fn descriptor(&self) -> &ProblemDescriptor<<Self::Genotype as Genotype>::Element>;

    /// Maps one row of decision variables to objectives and constraints.
    fn evaluate(&self, variables: &[Self::Genotype]) -> Result<Evaluation>;

    /// Called by the driver at the end of each generation.
    ///
    /// The default implementation is a no-op.
    fn on_generation(&self, _stats: &GenerationStats) {}
}

/// Evaluates `individual`, checking the row shape before the call and the
/// objective and constraint counts after it.
pub fn evaluate_checked<P: Problem>(
    problem: &P,
    individual: &Individual<P::Genotype>,
) -> Result<Evaluation> {
    let desc = problem.descriptor();
    desc.check_individual(individual)?;

    let eval = problem.evaluate(individual.variables())?;
    if eval.objectives.len() != desc.n_obj() {
        return Err(OperatorError::ObjectiveCount {
            expected: desc.n_obj(),
            found: eval.objectives.len(),
        });
    }
    if eval.constraints.len() != desc.n_constr() {
        return Err(OperatorError::ConstraintCount {
            expected: desc.n_constr(),
            found: eval.constraints.len(),
        });
    }
    Ok(eval)
}

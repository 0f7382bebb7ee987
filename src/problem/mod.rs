//! Problem definition.
//!
//! - [`ProblemDescriptor`]: immutable search-space shape (variables,
//!   objectives, constraints) plus representation parameters
//! - [`Alphabet`]: symbol domain for sequence genotypes
//! - [`Problem`]: the evaluation contract consumed by the driver
//!
//! All objectives are minimized. A maximizing objective is negated by the
//! problem's own `evaluate`, never by an operator.

mod alphabet;
mod descriptor;
mod types;

pub use alphabet::Alphabet;
pub use descriptor::{ProblemDescriptor, ProblemDescriptorBuilder, RepresentationParams};
pub use types::{evaluate_checked, Evaluation, Problem};

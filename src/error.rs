//! Error type shared by every operator and the reference driver.

use thiserror::Error;

/// Errors reported synchronously by operators and the driver.
///
/// Variants fall into two families: structural precondition violations
/// (a row or group has the wrong shape) and configuration errors (the
/// representation or driver settings cannot support the request). Use
/// [`is_configuration`](OperatorError::is_configuration) to tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperatorError {
    /// An individual carries the wrong number of decision variables.
    #[error("expected {expected} decision variables per individual, found {found}")]
    VariableCount { expected: usize, found: usize },

    /// A genotype's structural length differs from the descriptor's fixed length.
    #[error("expected genotype length {expected}, found {found}")]
    GenotypeLength { expected: usize, found: usize },

    /// A mating group has the wrong number of parent slots for the operator.
    #[error("operator expects {expected} parents per mating, found {found}")]
    ParentCount { expected: usize, found: usize },

    /// Matings inside one group do not all have the same number of members.
    #[error("mating {mating} has {found} members, expected {expected}")]
    RaggedGroup {
        mating: usize,
        expected: usize,
        found: usize,
    },

    /// One slot of a group holds a different number of matings than slot 0.
    #[error("slot {slot} holds {found} matings, expected {expected}")]
    SlotLength {
        slot: usize,
        expected: usize,
        found: usize,
    },

    /// An alphabet was built from no symbols.
    #[error("alphabet must contain at least one symbol")]
    EmptyAlphabet,

    /// An alphabet lists the same symbol twice.
    #[error("alphabet symbol at index {index} is a duplicate")]
    DuplicateSymbol { index: usize },

    /// A probability parameter lies outside `[0, 1]` or the set does not sum to at most 1.
    #[error("invalid probability: {0}")]
    InvalidProbability(String),

    /// Evaluation produced the wrong number of objectives.
    #[error("evaluation returned {found} objectives, expected {expected}")]
    ObjectiveCount { expected: usize, found: usize },

    /// Evaluation produced the wrong number of constraints.
    #[error("evaluation returned {found} constraints, expected {expected}")]
    ConstraintCount { expected: usize, found: usize },

    /// The problem descriptor is inconsistent.
    #[error("invalid problem descriptor: {0}")]
    InvalidDescriptor(String),

    /// An operator needs a representation parameter the descriptor does not carry.
    #[error("representation parameter `{0}` is required by this operator")]
    MissingParameter(&'static str),

    /// Two parents of one mating differ in structural length.
    #[error("parents of mating {mating} differ in genotype length ({left} vs {right})")]
    LengthMismatch {
        mating: usize,
        left: usize,
        right: usize,
    },

    /// The driver configuration was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The objective evaluation failed for a reason of its own.
    #[error("evaluation failed: {0}")]
    Evaluation(String),
}

impl OperatorError {
    /// Returns `true` for representation and configuration errors, `false`
    /// for structural precondition violations.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            OperatorError::InvalidDescriptor(_)
                | OperatorError::MissingParameter(_)
                | OperatorError::LengthMismatch { .. }
                | OperatorError::InvalidConfig(_)
                | OperatorError::InvalidProbability(_)
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OperatorError>;

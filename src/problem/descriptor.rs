//! The immutable problem descriptor.
//!
//! [`ProblemDescriptor`] fixes the search-space shape for a run: how many
//! decision variables each individual carries, how many objectives and
//! constraints evaluation reports, and the representation parameters
//! (alphabet, fixed length) that operators read. It is built once through
//! [`ProblemDescriptorBuilder`] and only read afterwards.

use super::alphabet::Alphabet;
use crate::error::{OperatorError, Result};
use crate::genotype::Genotype;
use crate::population::Individual;

/// Representation-specific settings read by the operators.
///
/// Both fields are optional because not every operator needs them;
/// operators that do call [`ProblemDescriptor::require_alphabet`] or
/// [`ProblemDescriptor::require_length`] and fail with
/// [`OperatorError::MissingParameter`] otherwise.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "E: Clone + serde::Serialize",
        deserialize = "E: Clone + PartialEq + serde::Deserialize<'de>"
    ))
)]
pub struct RepresentationParams<E> {
    /// Symbol domain for each sub-element.
    pub alphabet: Option<Alphabet<E>>,
    /// Fixed structural length shared by all genotypes.
    pub length: Option<usize>,
}

impl<E> Default for RepresentationParams<E> {
    fn default() -> Self {
        Self {
            alphabet: None,
            length: None,
        }
    }
}

/// Search-space shape and representation metadata.
///
/// ```
/// use u_moea::{Alphabet, ProblemDescriptor};
///
/// let desc = ProblemDescriptor::builder()
///     .with_n_obj(2)
///     .with_alphabet(Alphabet::lowercase())
///     .with_length(10)
///     .build()
///     .unwrap();
///
/// assert_eq!(desc.n_var(), 1);
/// assert_eq!(desc.n_obj(), 2);
/// assert_eq!(desc.n_constr(), 0);
/// assert_eq!(desc.length(), Some(10));
/// ```
///
/// With the `serde` feature, deserializing goes through
/// [`ProblemDescriptorBuilder::build`], so invalid shapes are rejected.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "DescriptorFields<E>",
        into = "DescriptorFields<E>",
        bound(
            serialize = "E: Clone + serde::Serialize",
            deserialize = "E: Clone + PartialEq + serde::Deserialize<'de>"
        )
    )
)]
pub struct ProblemDescriptor<E> {
    n_var: usize,
    n_obj: usize,
    n_constr: usize,
    representation: RepresentationParams<E>,
}

/// Unvalidated wire form of [`ProblemDescriptor`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(bound(
    serialize = "E: Clone + serde::Serialize",
    deserialize = "E: Clone + PartialEq + serde::Deserialize<'de>"
))]
struct DescriptorFields<E> {
    n_var: usize,
    n_obj: usize,
    #[serde(default)]
    n_constr: usize,
    #[serde(default)]
    representation: RepresentationParams<E>,
}

#[cfg(feature = "serde")]
impl<E: Clone + PartialEq> TryFrom<DescriptorFields<E>> for ProblemDescriptor<E> {
    type Error = OperatorError;

    fn try_from(fields: DescriptorFields<E>) -> Result<Self> {
        ProblemDescriptorBuilder {
            n_var: fields.n_var,
            n_obj: fields.n_obj,
            n_constr: fields.n_constr,
            representation: fields.representation,
        }
        .build()
    }
}

#[cfg(feature = "serde")]
impl<E> From<ProblemDescriptor<E>> for DescriptorFields<E> {
    fn from(desc: ProblemDescriptor<E>) -> Self {
        Self {
            n_var: desc.n_var,
            n_obj: desc.n_obj,
            n_constr: desc.n_constr,
            representation: desc.representation,
        }
    }
}

impl<E: Clone + PartialEq> ProblemDescriptor<E> {
    /// Starts a builder with `n_var = 1`, `n_obj = 1`, `n_constr = 0`.
    pub fn builder() -> ProblemDescriptorBuilder<E> {
        ProblemDescriptorBuilder::default()
    }

    pub fn n_var(&self) -> usize {
        self.n_var
    }

    pub fn n_obj(&self) -> usize {
        self.n_obj
    }

    pub fn n_constr(&self) -> usize {
        self.n_constr
    }

    pub fn representation(&self) -> &RepresentationParams<E> {
        &self.representation
    }

    pub fn alphabet(&self) -> Option<&Alphabet<E>> {
        self.representation.alphabet.as_ref()
    }

    pub fn length(&self) -> Option<usize> {
        self.representation.length
    }

    /// The alphabet, or a configuration error naming the missing parameter.
    pub fn require_alphabet(&self) -> Result<&Alphabet<E>> {
        self.alphabet()
            .ok_or(OperatorError::MissingParameter("alphabet"))
    }

    /// The fixed length, or a configuration error naming the missing parameter.
    pub fn require_length(&self) -> Result<usize> {
        self.length().ok_or(OperatorError::MissingParameter("length"))
    }

    /// Checks that `individual` has `n_var` variables and, when a fixed
    /// length is configured, that every genotype has that length.
    pub fn check_individual<G>(&self, individual: &Individual<G>) -> Result<()>
    where
        G: Genotype<Element = E>,
    {
        if individual.n_var() != self.n_var {
            return Err(OperatorError::VariableCount {
                expected: self.n_var,
                found: individual.n_var(),
            });
        }
        if let Some(expected) = self.length() {
            for g in individual.variables() {
                if g.len() != expected {
                    return Err(OperatorError::GenotypeLength {
                        expected,
                        found: g.len(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Builder for [`ProblemDescriptor`].
#[derive(Debug, Clone)]
pub struct ProblemDescriptorBuilder<E> {
    n_var: usize,
    n_obj: usize,
    n_constr: usize,
    representation: RepresentationParams<E>,
}

impl<E> Default for ProblemDescriptorBuilder<E> {
    fn default() -> Self {
        Self {
            n_var: 1,
            n_obj: 1,
            n_constr: 0,
            representation: RepresentationParams::default(),
        }
    }
}

impl<E: Clone + PartialEq> ProblemDescriptorBuilder<E> {
    /// Sets the number of decision variables per individual.
    pub fn with_n_var(mut self, n: usize) -> Self {
        self.n_var = n;
        self
    }

    /// Sets the number of objectives.
    pub fn with_n_obj(mut self, n: usize) -> Self {
        self.n_obj = n;
        self
    }

    /// Sets the number of inequality constraints (`g(x) <= 0`).
    pub fn with_n_constr(mut self, n: usize) -> Self {
        self.n_constr = n;
        self
    }

    pub fn with_alphabet(mut self, alphabet: Alphabet<E>) -> Self {
        self.representation.alphabet = Some(alphabet);
        self
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.representation.length = Some(length);
        self
    }

    /// Validates and freezes the descriptor.
    pub fn build(self) -> Result<ProblemDescriptor<E>> {
        if self.n_var == 0 {
            return Err(OperatorError::InvalidDescriptor(
                "n_var must be at least 1".into(),
            ));
        }
        if self.n_obj == 0 {
            return Err(OperatorError::InvalidDescriptor(
                "n_obj must be at least 1".into(),
            ));
        }
        if self.representation.length == Some(0) {
            return Err(OperatorError::InvalidDescriptor(
                "length must be positive".into(),
            ));
        }
        Ok(ProblemDescriptor {
            n_var: self.n_var,
            n_obj: self.n_obj,
            n_constr: self.n_constr,
            representation: self.representation,
        })
    }
}

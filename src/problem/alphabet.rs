//! Symbol domains for sequence genotypes.

use crate::error::{OperatorError, Result};
use rand::Rng;

/// A non-empty, duplicate-free, ordered set of symbols.
///
/// Sampling and point substitution draw uniformly from it.
///
/// ```
/// use u_moea::Alphabet;
///
/// let dna = Alphabet::from_chars("ACGT").unwrap();
/// assert_eq!(dna.len(), 4);
/// assert!(dna.contains(&'G'));
/// assert!(Alphabet::<char>::new(vec![]).is_err());
/// ```
///
/// With the `serde` feature an alphabet serializes as its symbol list, and
/// deserializing runs the same checks as [`Alphabet::new`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "Vec<E>",
        into = "Vec<E>",
        bound(
            serialize = "E: Clone + serde::Serialize",
            deserialize = "E: Clone + PartialEq + serde::Deserialize<'de>"
        )
    )
)]
pub struct Alphabet<E> {
    symbols: Vec<E>,
}

impl<E: Clone + PartialEq> Alphabet<E> {
    /// Builds an alphabet, rejecting empty or repeated symbol lists.
    pub fn new(symbols: Vec<E>) -> Result<Self> {
        if symbols.is_empty() {
            return Err(OperatorError::EmptyAlphabet);
        }
        for (index, s) in symbols.iter().enumerate() {
            if symbols[..index].contains(s) {
                return Err(OperatorError::DuplicateSymbol { index });
            }
        }
        Ok(Self { symbols })
    }

    /// The symbols in declaration order.
    pub fn symbols(&self) -> &[E] {
        &self.symbols
    }

    /// Number of symbols. Always at least 1.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always `false`; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, symbol: &E) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn index_of(&self, symbol: &E) -> Option<usize> {
        self.symbols.iter().position(|s| s == symbol)
    }

    /// Draws one symbol uniformly at random.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> E {
        self.symbols[rng.random_range(0..self.symbols.len())].clone()
    }
}

impl<E: Clone + PartialEq> TryFrom<Vec<E>> for Alphabet<E> {
    type Error = OperatorError;

    fn try_from(symbols: Vec<E>) -> Result<Self> {
        Self::new(symbols)
    }
}

impl<E> From<Alphabet<E>> for Vec<E> {
    fn from(alphabet: Alphabet<E>) -> Self {
        alphabet.symbols
    }
}

impl Alphabet<char> {
    /// The 26 lowercase ASCII letters `a..=z`.
    pub fn lowercase() -> Self {
        Self {
            symbols: ('a'..='z').collect(),
        }
    }

    /// Builds an alphabet from the characters of `s`.
    pub fn from_chars(s: &str) -> Result<Self> {
        Self::new(s.chars().collect())
    }
}

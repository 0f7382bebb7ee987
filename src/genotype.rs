//! The genotype capability interface.
//!
//! Operators never look inside a genotype beyond what [`Genotype`] exposes:
//! a length, indexed access to sub-elements, and construction of a new value
//! from elements. Anything with that shape (strings, symbol vectors, encoded
//! trees flattened to a sequence) can flow through sampling, crossover,
//! mutation and duplicate elimination unchanged.

use std::fmt::Debug;

/// A decision-variable value of opaque internal structure.
///
/// Values are immutable snapshots: [`with_value_at`](Genotype::with_value_at)
/// returns a new genotype and leaves `self` untouched, so a parent row can
/// never alias an offspring row.
///
/// # Implementing
///
/// ```
/// use u_moea::Genotype;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Route(Vec<u16>);
///
/// impl Genotype for Route {
///     type Element = u16;
///     fn len(&self) -> usize { self.0.len() }
///     fn value_at(&self, i: usize) -> u16 { self.0[i] }
///     fn with_value_at(&self, i: usize, v: u16) -> Self {
///         let mut next = self.0.clone();
///         next[i] = v;
///         Route(next)
///     }
///     fn from_elements(elements: Vec<u16>) -> Self { Route(elements) }
/// }
///
/// let r = Route(vec![3, 1, 2]);
/// assert_eq!(r.with_value_at(0, 9).elements(), vec![9, 1, 2]);
/// assert_eq!(r.value_at(0), 3);
/// ```
pub trait Genotype: Clone + Debug + Send + Sync {
    /// One ordered sub-element (a character, a gene, a node label).
    type Element: Clone + PartialEq + Debug + Send + Sync;

    /// Number of sub-elements.
    fn len(&self) -> usize;

    /// Returns `true` if the genotype has no sub-elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the sub-element at position `i`.
    ///
    /// # Panics
    /// Panics if `i >= self.len()`. Operators check lengths before indexing.
    fn value_at(&self, i: usize) -> Self::Element;

    /// Returns a copy of `self` with position `i` replaced by `value`.
    ///
    /// # Panics
    /// Panics if `i >= self.len()`.
    fn with_value_at(&self, i: usize, value: Self::Element) -> Self;

    /// Builds a genotype from its ordered sub-elements.
    fn from_elements(elements: Vec<Self::Element>) -> Self;

    /// Returns all sub-elements in order.
    fn elements(&self) -> Vec<Self::Element> {
        (0..self.len()).map(|i| self.value_at(i)).collect()
    }
}

impl Genotype for String {
    type Element = char;

    fn len(&self) -> usize {
        self.chars().count()
    }

    fn value_at(&self, i: usize) -> char {
        self.chars().nth(i).unwrap_or_else(|| {
            panic!(
                "index {i} out of range for genotype of length {}",
                Genotype::len(self)
            )
        })
    }

    fn with_value_at(&self, i: usize, value: char) -> Self {
        let mut chars: Vec<char> = self.chars().collect();
        chars[i] = value;
        chars.into_iter().collect()
    }

    fn from_elements(elements: Vec<char>) -> Self {
        elements.into_iter().collect()
    }

    fn elements(&self) -> Vec<char> {
        self.chars().collect()
    }
}

impl<T> Genotype for Vec<T>
where
    T: Clone + PartialEq + Debug + Send + Sync,
{
    type Element = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn value_at(&self, i: usize) -> T {
        self[i].clone()
    }

    fn with_value_at(&self, i: usize, value: T) -> Self {
        let mut next = self.clone();
        next[i] = value;
        next
    }

    fn from_elements(elements: Vec<T>) -> Self {
        elements
    }

    fn elements(&self) -> Vec<T> {
        self.clone()
    }
}

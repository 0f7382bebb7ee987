//! Uniform random initialization over an alphabet.

use super::{DescriptorOf, Sampling};
use crate::error::Result;
use crate::genotype::Genotype;
use crate::population::{Individual, Population};
use rand::Rng;

/// Uniform sampling over a fixed-length symbol sequence.
///
/// Each position of each variable is drawn independently and uniformly
/// from the descriptor's alphabet. Requires both `alphabet` and `length`.
///
/// ```
/// use u_moea::{Alphabet, ProblemDescriptor, Sampling, UniformSampling};
/// use u_moea::random::create_rng;
///
/// let desc = ProblemDescriptor::builder()
///     .with_alphabet(Alphabet::lowercase())
///     .with_length(10)
///     .build()
///     .unwrap();
/// let mut rng = create_rng(42);
///
/// let pop: u_moea::Population<String> = UniformSampling.sample(&desc, 11, &mut rng).unwrap();
/// assert_eq!(pop.shape(), (11, 1));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformSampling;

impl<G: Genotype> Sampling<G> for UniformSampling {
    fn sample<R: Rng>(
        &self,
        problem: &DescriptorOf<G>,
        n_samples: usize,
        rng: &mut R,
    ) -> Result<Population<G>> {
        let alphabet = problem.require_alphabet()?;
        let length = problem.require_length()?;
        let n_var = problem.n_var();

        let rows = (0..n_samples)
            .map(|_| {
                let variables = (0..n_var)
                    .map(|_| {
                        let elements = (0..length).map(|_| alphabet.sample(rng)).collect();
                        G::from_elements(elements)
                    })
                    .collect();
                Individual::new(variables)
            })
            .collect();

        Population::from_individuals(n_var, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OperatorError;
    use crate::problem::{Alphabet, ProblemDescriptor};
    use crate::random::create_rng;

    fn lowercase(length: usize) -> ProblemDescriptor<char> {
        ProblemDescriptor::builder()
            .with_n_obj(2)
            .with_alphabet(Alphabet::lowercase())
            .with_length(length)
            .build()
            .unwrap()
    }

    #[test]
    fn test_shape_and_domain() {
        let desc = lowercase(10);
        let mut rng = create_rng(42);
        let pop: Population<String> = UniformSampling.sample(&desc, 11, &mut rng).unwrap();
        assert_eq!(pop.shape(), (11, 1));
        for ind in &pop {
            let g = ind.genotype();
            assert_eq!(g.chars().count(), 10);
            assert!(g.chars().all(|c| c.is_ascii_lowercase()), "foreign symbol in {g}");
            assert!(!ind.is_evaluated());
        }
    }

    #[test]
    fn test_reproducible_with_seed() {
        let desc = lowercase(8);
        let a: Population<String> = UniformSampling.sample(&desc, 5, &mut create_rng(9)).unwrap();
        let b: Population<String> = UniformSampling.sample(&desc, 5, &mut create_rng(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_reinvocable_with_different_sizes() {
        let desc = lowercase(4);
        let mut rng = create_rng(3);
        let small: Population<String> = UniformSampling.sample(&desc, 2, &mut rng).unwrap();
        let large: Population<String> = UniformSampling.sample(&desc, 30, &mut rng).unwrap();
        let none: Population<String> = UniformSampling.sample(&desc, 0, &mut rng).unwrap();
        assert_eq!(small.len(), 2);
        assert_eq!(large.len(), 30);
        assert!(none.is_empty());
    }

    #[test]
    fn test_multi_variable_rows() {
        let desc = ProblemDescriptor::builder()
            .with_n_var(3)
            .with_alphabet(Alphabet::new(vec![0u8, 1]).unwrap())
            .with_length(6)
            .build()
            .unwrap();
        let mut rng = create_rng(5);
        let pop: Population<Vec<u8>> = UniformSampling.sample(&desc, 4, &mut rng).unwrap();
        assert_eq!(pop.shape(), (4, 3));
        for ind in &pop {
            for g in ind.variables() {
                assert_eq!(g.len(), 6);
                assert!(g.iter().all(|&b| b <= 1));
            }
        }
    }

    #[test]
    fn test_positions_roughly_uniform() {
        let desc = ProblemDescriptor::builder()
            .with_alphabet(Alphabet::from_chars("ab").unwrap())
            .with_length(20)
            .build()
            .unwrap();
        let mut rng = create_rng(11);
        let pop: Population<String> = UniformSampling.sample(&desc, 500, &mut rng).unwrap();
        let a_count: usize = pop
            .iter()
            .map(|ind| ind.genotype().chars().filter(|&c| c == 'a').count())
            .sum();
        let share = a_count as f64 / 10_000.0;
        assert!((share - 0.5).abs() < 0.03, "share of 'a' was {share}");
    }

    #[test]
    fn test_missing_parameters() {
        let no_alpha = ProblemDescriptor::<char>::builder()
            .with_length(3)
            .build()
            .unwrap();
        let no_len = ProblemDescriptor::builder()
            .with_alphabet(Alphabet::lowercase())
            .build()
            .unwrap();
        let mut rng = create_rng(0);
        let err = Sampling::<String>::sample(&UniformSampling, &no_alpha, 1, &mut rng).unwrap_err();
        assert_eq!(err, OperatorError::MissingParameter("alphabet"));
        let err = Sampling::<String>::sample(&UniformSampling, &no_len, 1, &mut rng).unwrap_err();
        assert_eq!(err, OperatorError::MissingParameter("length"));
    }
}

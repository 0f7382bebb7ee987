//! Uniform two-parent crossover.

use super::{Crossover, DescriptorOf};
use crate::error::{OperatorError, Result};
use crate::genotype::Genotype;
use crate::population::{Individual, MatingGroup, OffspringGroup};
use crate::random::map_partitioned;
use rand::Rng;

/// How [`UniformCrossover`] treats parents of different structural length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthPolicy {
    /// Parents must share one length (and match the descriptor's fixed
    /// `length`, when set). Anything else is a configuration error.
    #[default]
    Strict,

    /// The loop bound is `min(len(a), len(b))` per mating. Each child keeps
    /// the tail of the parent occupying the same slot.
    Shortest,
}

/// Uniform crossover: two parents in, two complementary children out.
///
/// # Algorithm
///
/// For each mating and each position independently, flip a fair coin.
/// On heads child A takes parent A's value and child B takes parent B's;
/// on tails the assignment is swapped. At every position the two children
/// together hold exactly the two parents' values.
///
/// Each mating draws from its own forked generator, so matings are
/// independent of each other and of the order they run in.
///
/// # Complexity
/// O(n_matings · n_var · length)
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformCrossover {
    policy: LengthPolicy,
}

impl UniformCrossover {
    /// Uniform crossover with [`LengthPolicy::Strict`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_length_policy(mut self, policy: LengthPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn length_policy(&self) -> LengthPolicy {
        self.policy
    }

    /// Loop bound for one pair of parent genotypes.
    fn position_bound(
        &self,
        mating: usize,
        a: usize,
        b: usize,
        fixed: Option<usize>,
    ) -> Result<usize> {
        match self.policy {
            LengthPolicy::Strict => {
                if a != b {
                    return Err(OperatorError::LengthMismatch {
                        mating,
                        left: a,
                        right: b,
                    });
                }
                if let Some(expected) = fixed {
                    if a != expected {
                        return Err(OperatorError::GenotypeLength { expected, found: a });
                    }
                }
                Ok(a)
            }
            LengthPolicy::Shortest => Ok(a.min(b)),
        }
    }
}

impl<G: Genotype> Crossover<G> for UniformCrossover {
    fn n_parents(&self) -> usize {
        2
    }

    fn n_offsprings(&self) -> usize {
        2
    }

    fn crossover<R: Rng>(
        &self,
        problem: &DescriptorOf<G>,
        parents: &MatingGroup<G>,
        rng: &mut R,
    ) -> Result<OffspringGroup<G>> {
        self.check_arity(problem, parents)?;

        let fixed = problem.length();
        let n_var = problem.n_var();
        let (first, second) = (parents.slot(0), parents.slot(1));

        let children = map_partitioned(
            rng,
            parents.n_matings(),
            |i, unit_rng| -> Result<Vec<Individual<G>>> {
                let (pa, pb) = (&first.individuals()[i], &second.individuals()[i]);
                let mut vars_a = Vec::with_capacity(n_var);
                let mut vars_b = Vec::with_capacity(n_var);

                for (ga, gb) in pa.variables().iter().zip(pb.variables()) {
                    let bound = self.position_bound(i, ga.len(), gb.len(), fixed)?;
                    let mut ca = ga.elements();
                    let mut cb = gb.elements();
                    for pos in 0..bound {
                        // Heads keeps the slot's own parent value; tails swaps.
                        if !unit_rng.random_bool(0.5) {
                            std::mem::swap(&mut ca[pos], &mut cb[pos]);
                        }
                    }
                    vars_a.push(G::from_elements(ca));
                    vars_b.push(G::from_elements(cb));
                }

                Ok(vec![Individual::new(vars_a), Individual::new(vars_b)])
            },
        );

        let matings = children.into_iter().collect::<Result<Vec<_>>>()?;
        OffspringGroup::from_matings(n_var, matings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::Population;
    use crate::problem::{Alphabet, ProblemDescriptor};
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn desc(length: Option<usize>) -> ProblemDescriptor<char> {
        let b = ProblemDescriptor::builder()
            .with_n_obj(2)
            .with_alphabet(Alphabet::lowercase());
        let b = match length {
            Some(n) => b.with_length(n),
            None => b,
        };
        b.build().unwrap()
    }

    fn group(pairs: &[(&str, &str)]) -> MatingGroup<String> {
        let matings = pairs
            .iter()
            .map(|(a, b)| {
                vec![
                    Individual::single(a.to_string()),
                    Individual::single(b.to_string()),
                ]
            })
            .collect();
        MatingGroup::from_matings(1, matings).unwrap()
    }

    fn complementary(pa: &str, pb: &str, ca: &str, cb: &str) -> bool {
        pa.chars()
            .zip(pb.chars())
            .zip(ca.chars().zip(cb.chars()))
            .all(|((a, b), (x, y))| (x == a && y == b) || (x == b && y == a))
    }

    #[test]
    fn test_shape() {
        let d = desc(Some(4));
        let parents = group(&[("aaaa", "bbbb"), ("cccc", "dddd"), ("eeee", "ffff")]);
        let off = UniformCrossover::new()
            .crossover(&d, &parents, &mut create_rng(42))
            .unwrap();
        assert_eq!(off.shape(), (2, 3, 1));
        assert!(off.slot(0).iter().all(|ind| !ind.is_evaluated()));
    }

    #[test]
    fn test_children_are_complementary() {
        let d = desc(Some(10));
        let parents = group(&[("abcdefghij", "klmnopqrst")]);
        let mut rng = create_rng(7);
        for _ in 0..50 {
            let off = UniformCrossover::new().crossover(&d, &parents, &mut rng).unwrap();
            let m = off.mating(0);
            assert!(complementary(
                "abcdefghij",
                "klmnopqrst",
                m[0].genotype(),
                m[1].genotype()
            ));
        }
    }

    #[test]
    fn test_coin_is_fair() {
        let d = desc(Some(20));
        let parents = group(&[("aaaaaaaaaaaaaaaaaaaa", "bbbbbbbbbbbbbbbbbbbb")]);
        let mut rng = create_rng(42);
        let mut from_a = 0usize;
        let trials = 500;
        for _ in 0..trials {
            let off = UniformCrossover::new().crossover(&d, &parents, &mut rng).unwrap();
            let child = off.slot(0).get(0).unwrap().genotype();
            from_a += child.chars().filter(|&c| c == 'a').count();
        }
        let share = from_a as f64 / (trials * 20) as f64;
        assert!((share - 0.5).abs() < 0.03, "share inherited from parent A: {share}");
    }

    #[test]
    fn test_strict_rejects_length_mismatch() {
        let d = desc(None);
        let parents = group(&[("abc", "abc"), ("abcd", "abc")]);
        let err = UniformCrossover::new()
            .crossover(&d, &parents, &mut create_rng(1))
            .unwrap_err();
        assert_eq!(
            err,
            OperatorError::LengthMismatch {
                mating: 1,
                left: 4,
                right: 3
            }
        );
        assert!(err.is_configuration());
    }

    #[test]
    fn test_strict_checks_descriptor_length() {
        let d = desc(Some(5));
        let parents = group(&[("abc", "def")]);
        let err = UniformCrossover::new()
            .crossover(&d, &parents, &mut create_rng(1))
            .unwrap_err();
        assert_eq!(
            err,
            OperatorError::GenotypeLength {
                expected: 5,
                found: 3
            }
        );
    }

    #[test]
    fn test_shortest_keeps_own_tail() {
        let d = desc(None);
        let parents = group(&[("abcxyz", "def")]);
        let cx = UniformCrossover::new().with_length_policy(LengthPolicy::Shortest);
        let mut rng = create_rng(3);
        for _ in 0..20 {
            let off = cx.crossover(&d, &parents, &mut rng).unwrap();
            let m = off.mating(0);
            let (ca, cb) = (m[0].genotype(), m[1].genotype());
            assert_eq!(ca.chars().count(), 6);
            assert_eq!(cb.chars().count(), 3);
            assert!(ca.ends_with("xyz"));
            assert!(complementary("abc", "def", &ca[..3], cb));
        }
    }

    #[test]
    fn test_rejects_three_parents() {
        let d = desc(None);
        let ind = |s: &str| Individual::single(s.to_string());
        let parents =
            MatingGroup::from_matings(1, vec![vec![ind("a"), ind("b"), ind("c")]]).unwrap();
        let err = UniformCrossover::new()
            .crossover(&d, &parents, &mut create_rng(1))
            .unwrap_err();
        assert_eq!(
            err,
            OperatorError::ParentCount {
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_multi_variable_rows() {
        let d = ProblemDescriptor::builder()
            .with_n_var(2)
            .with_length(3)
            .build()
            .unwrap();
        let a = Individual::new(vec![vec![0u8, 0, 0], vec![1u8, 1, 1]]);
        let b = Individual::new(vec![vec![2u8, 2, 2], vec![3u8, 3, 3]]);
        let parents = MatingGroup::from_matings(2, vec![vec![a, b]]).unwrap();
        let off = UniformCrossover::new()
            .crossover(&d, &parents, &mut create_rng(4))
            .unwrap();
        assert_eq!(off.shape(), (2, 1, 2));
        let m = off.mating(0);
        for pos in 0..3 {
            let pair = (m[0].variable(0)[pos], m[1].variable(0)[pos]);
            assert!(pair == (0, 2) || pair == (2, 0));
            let pair = (m[0].variable(1)[pos], m[1].variable(1)[pos]);
            assert!(pair == (1, 3) || pair == (3, 1));
        }
    }

    #[test]
    fn test_empty_group() {
        let d = desc(None);
        let parents = MatingGroup::from_slots(
            1,
            vec![Population::<String>::new(1), Population::new(1)],
        )
        .unwrap();
        let off = UniformCrossover::new()
            .crossover(&d, &parents, &mut create_rng(1))
            .unwrap();
        assert_eq!(off.n_matings(), 0);
    }

    proptest! {
        #[test]
        fn prop_complementary_and_shaped(
            pairs in prop::collection::vec(("[a-z]{8}", "[a-z]{8}"), 1..12),
            seed in any::<u64>(),
        ) {
            let d = desc(Some(8));
            let refs: Vec<(&str, &str)> = pairs.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
            let parents = group(&refs);
            let off = UniformCrossover::new()
                .crossover(&d, &parents, &mut create_rng(seed))
                .unwrap();

            prop_assert_eq!(off.n_matings(), pairs.len());
            prop_assert_eq!(off.n_var(), 1);
            for (i, (a, b)) in pairs.iter().enumerate() {
                let m = off.mating(i);
                prop_assert!(complementary(a, b, m[0].genotype(), m[1].genotype()));
            }
        }
    }
}

//! NSGA-II evolutionary loop.
//!
//! [`Nsga2`] wires the four operators into the generational cycle:
//! sampling (once) → tournament → crossover → mutation → duplicate
//! filtering → evaluation → rank-and-crowding survival → repeat.

use super::config::Nsga2Config;
use super::selection::{binary_tournament, SurvivalInfo};
use super::survival::rank_and_crowding;
use crate::error::{OperatorError, Result};
use crate::genotype::Genotype;
use crate::operators::{
    Crossover, DescriptorOf, DuplicateElimination, GenotypeEquality, Mutation,
    ReorderSubstituteMutation, Sampling, UniformCrossover, UniformSampling,
};
use crate::population::{Individual, MatingGroup, Population};
use crate::problem::{evaluate_checked, Evaluation, Problem};
use crate::random::rng_from_seed;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Per-generation statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// 0 for the initial population, then 1, 2, ...
    pub generation: usize,

    /// Rows alive after survival.
    pub population_size: usize,

    /// Feasible rank-0 rows after survival.
    pub front_size: usize,

    /// Offspring accepted this generation.
    pub offspring: usize,

    /// Offspring rejected as duplicates this generation.
    pub duplicates_rejected: usize,

    /// Mating rounds needed to collect the offspring.
    pub mating_rounds: usize,

    /// Cumulative objective evaluations.
    pub evaluations: usize,
}

/// Result of a driver run.
#[derive(Debug, Clone)]
pub struct Nsga2Result<G> {
    /// The final population after the last survival step.
    pub population: Population<G>,

    /// Feasible, non-dominated members of the final population.
    pub front: Population<G>,

    /// Generations executed after the initial population.
    pub generations: usize,

    /// Total objective evaluations.
    pub evaluations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Whether the run stopped on the wall-clock limit.
    pub timed_out: bool,

    /// Statistics for the initial population and each generation.
    pub history: Vec<GenerationStats>,
}

/// The reference NSGA-II driver, parameterized by its operators.
///
/// # Usage
///
/// ```ignore
/// let driver = Nsga2::standard();
/// let config = Nsga2Config::default().with_population_size(11).with_seed(42);
/// let result = driver.run(&problem, &config)?;
/// for ind in &result.front {
///     println!("{:?} {:?}", ind.genotype(), ind.objectives());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Nsga2<S, C, M, D> {
    pub sampling: S,
    pub crossover: C,
    pub mutation: M,
    pub duplicates: D,
}

impl Nsga2<UniformSampling, UniformCrossover, ReorderSubstituteMutation, GenotypeEquality> {
    /// Uniform sampling, uniform crossover, reorder/substitute mutation and
    /// genotype-equality duplicate elimination.
    pub fn standard() -> Self {
        Self::new(
            UniformSampling,
            UniformCrossover::new(),
            ReorderSubstituteMutation::new(),
            GenotypeEquality,
        )
    }
}

impl<S, C, M, D> Nsga2<S, C, M, D> {
    pub fn new(sampling: S, crossover: C, mutation: M, duplicates: D) -> Self {
        Self {
            sampling,
            crossover,
            mutation,
            duplicates,
        }
    }

    /// Runs the optimization.
    pub fn run<P>(&self, problem: &P, config: &Nsga2Config) -> Result<Nsga2Result<P::Genotype>>
    where
        P: Problem,
        S: Sampling<P::Genotype>,
        C: Crossover<P::Genotype>,
        M: Mutation<P::Genotype>,
        D: DuplicateElimination<P::Genotype>,
    {
        self.run_with_cancel(problem, config, None)
    }

    /// Runs the optimization with an optional cancellation token.
    ///
    /// If `cancel` is set to `true`, the driver stops before the next
    /// generation and returns the current population.
    pub fn run_with_cancel<P>(
        &self,
        problem: &P,
        config: &Nsga2Config,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<Nsga2Result<P::Genotype>>
    where
        P: Problem,
        S: Sampling<P::Genotype>,
        C: Crossover<P::Genotype>,
        M: Mutation<P::Genotype>,
        D: DuplicateElimination<P::Genotype>,
    {
        config.validate().map_err(OperatorError::InvalidConfig)?;
        if self.crossover.n_parents() == 0 || self.crossover.n_offsprings() == 0 {
            return Err(OperatorError::InvalidConfig(format!(
                "crossover arity must be positive, got {} parents and {} offsprings",
                self.crossover.n_parents(),
                self.crossover.n_offsprings()
            )));
        }

        let desc = problem.descriptor();
        let pop_size = config.population_size;
        let n_offsprings = config.offspring_count();
        let mut rng = rng_from_seed(config.seed);
        let started = Instant::now();

        tracing::info!(
            population_size = pop_size,
            n_offsprings,
            max_generations = config.max_generations,
            n_var = desc.n_var(),
            n_obj = desc.n_obj(),
            "starting NSGA-II run"
        );

        // 1. Initial population
        let mut initial = self.initial_population(desc, config, &mut rng)?;
        let mut evaluations = evaluate_pending(problem, &mut initial, config.parallel)?;
        let (mut population, mut infos) = rank_and_crowding(&initial, pop_size)?;

        let mut history = Vec::new();
        history.push(GenerationStats {
            generation: 0,
            population_size: population.len(),
            front_size: front_size(&infos),
            offspring: 0,
            duplicates_rejected: 0,
            mating_rounds: 0,
            evaluations,
        });

        let mut generations = 0;
        let mut cancelled = false;
        let mut timed_out = false;

        // 2. Generational loop
        for gen in 1..=config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if let Some(limit) = config.time_limit_ms {
                if started.elapsed().as_millis() as u64 >= limit {
                    timed_out = true;
                    break;
                }
            }

            let mating = self.mate(desc, &population, &infos, n_offsprings, config, &mut rng)?;
            let mut offspring = mating.offspring;
            evaluations += evaluate_pending(problem, &mut offspring, config.parallel)?;
            let accepted = offspring.len();

            let mut merged = population;
            merged.extend(offspring)?;
            (population, infos) = rank_and_crowding(&merged, pop_size)?;

            let stats = GenerationStats {
                generation: gen,
                population_size: population.len(),
                front_size: front_size(&infos),
                offspring: accepted,
                duplicates_rejected: mating.rejected,
                mating_rounds: mating.rounds,
                evaluations,
            };
            tracing::debug!(
                generation = stats.generation,
                front_size = stats.front_size,
                offspring = stats.offspring,
                duplicates_rejected = stats.duplicates_rejected,
                evaluations = stats.evaluations,
                "generation complete"
            );
            problem.on_generation(&stats);
            history.push(stats);
            generations = gen;
        }

        let front_idx: Vec<usize> = infos
            .iter()
            .enumerate()
            .filter(|(_, info)| info.rank == 0 && info.violation <= 0.0)
            .map(|(i, _)| i)
            .collect();
        let front = population.select(&front_idx);

        tracing::info!(
            generations,
            evaluations,
            front_size = front.len(),
            cancelled,
            timed_out,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "NSGA-II run finished"
        );

        Ok(Nsga2Result {
            population,
            front,
            generations,
            evaluations,
            cancelled,
            timed_out,
            history,
        })
    }

    /// Samples `population_size` rows, resampling to replace duplicates for
    /// at most `max_mating_attempts` rounds.
    fn initial_population<G, R>(
        &self,
        desc: &DescriptorOf<G>,
        config: &Nsga2Config,
        rng: &mut R,
    ) -> Result<Population<G>>
    where
        G: Genotype,
        S: Sampling<G>,
        D: DuplicateElimination<G>,
        R: Rng,
    {
        let target = config.population_size;
        let sampled = self.sampling.sample(desc, target, rng)?;
        let mut population = self.duplicates.eliminate_duplicates(sampled, &[]);

        let mut rounds = 1;
        while population.len() < target && rounds < config.max_mating_attempts {
            let extra = self.sampling.sample(desc, target - population.len(), rng)?;
            let extra = self.duplicates.eliminate_duplicates(extra, &[&population]);
            population.extend(extra)?;
            rounds += 1;
        }
        if population.len() < target {
            tracing::warn!(
                sampled = population.len(),
                target,
                "could not sample enough unique individuals"
            );
        }
        Ok(population)
    }

    /// Produces up to `n_offsprings` offspring that are unique with respect
    /// to the population and to each other.
    fn mate<G, R>(
        &self,
        desc: &DescriptorOf<G>,
        population: &Population<G>,
        infos: &[SurvivalInfo],
        n_offsprings: usize,
        config: &Nsga2Config,
        rng: &mut R,
    ) -> Result<MatingOutcome<G>>
    where
        G: Genotype,
        C: Crossover<G>,
        M: Mutation<G>,
        D: DuplicateElimination<G>,
        R: Rng,
    {
        let mut offspring = Population::new(desc.n_var());
        let mut rejected = 0;
        let mut rounds = 0;

        while offspring.len() < n_offsprings && rounds < config.max_mating_attempts {
            rounds += 1;
            let needed = n_offsprings - offspring.len();
            let n_matings = needed.div_ceil(self.crossover.n_offsprings());

            let mut matings: Vec<Vec<Individual<G>>> = Vec::with_capacity(n_matings);
            for _ in 0..n_matings {
                let mut members = Vec::with_capacity(self.crossover.n_parents());
                for _ in 0..self.crossover.n_parents() {
                    let idx = binary_tournament(infos, rng);
                    members.push(population.individuals()[idx].clone());
                }
                matings.push(members);
            }
            let parents = MatingGroup::from_matings(desc.n_var(), matings)?;

            let children = self.crossover.crossover(desc, &parents, rng)?.into_population();
            let children = self.mutation.mutate(desc, children, rng)?;
            let produced = children.len();

            let mut unique = self
                .duplicates
                .eliminate_duplicates(children, &[population, &offspring]);
            rejected += produced - unique.len();
            unique.truncate(needed);
            offspring.extend(unique)?;
        }

        if offspring.len() < n_offsprings {
            tracing::warn!(
                produced = offspring.len(),
                requested = n_offsprings,
                rounds,
                "mating attempts exhausted before enough unique offspring were found"
            );
        }

        Ok(MatingOutcome {
            offspring,
            rejected,
            rounds,
        })
    }
}

struct MatingOutcome<G> {
    offspring: Population<G>,
    rejected: usize,
    rounds: usize,
}

fn front_size(infos: &[SurvivalInfo]) -> usize {
    infos
        .iter()
        .filter(|info| info.rank == 0 && info.violation <= 0.0)
        .count()
}

/// Evaluates every row that has no evaluation yet; returns how many were evaluated.
fn evaluate_pending<P: Problem>(
    problem: &P,
    population: &mut Population<P::Genotype>,
    parallel: bool,
) -> Result<usize> {
    let pending: Vec<usize> = population
        .iter()
        .enumerate()
        .filter(|(_, ind)| !ind.is_evaluated())
        .map(|(i, _)| i)
        .collect();

    let rows = population.individuals();
    let evaluate = |&i: &usize| evaluate_checked(problem, &rows[i]);

    #[cfg(feature = "parallel")]
    let results: Vec<Result<Evaluation>> = if parallel {
        use rayon::prelude::*;
        pending.par_iter().map(&evaluate).collect()
    } else {
        pending.iter().map(&evaluate).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let results: Vec<Result<Evaluation>> = {
        let _ = parallel;
        pending.iter().map(&evaluate).collect()
    };

    for (&i, result) in pending.iter().zip(results) {
        let eval = result?;
        if let Some(ind) = population.get_mut(i) {
            ind.set_evaluation(eval);
        }
    }
    Ok(pending.len())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::NoDuplicateElimination;
    use crate::problem::{Alphabet, ProblemDescriptor};
    use std::sync::atomic::AtomicUsize;

    // ---- Letter counts: maximize 'a' and 'b' (minimize their negations) ----

    struct LetterCounts {
        desc: ProblemDescriptor<char>,
        calls: AtomicUsize,
    }

    impl LetterCounts {
        fn new(length: usize) -> Self {
            Self {
                desc: ProblemDescriptor::builder()
                    .with_n_obj(2)
                    .with_alphabet(Alphabet::lowercase())
                    .with_length(length)
                    .build()
                    .unwrap(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    fn count(s: &str, c: char) -> f64 {
        s.chars().filter(|&x| x == c).count() as f64
    }

    impl Problem for LetterCounts {
        type Genotype = String;

        fn descriptor(&self) -> &ProblemDescriptor<char> {
            &self.desc
        }

        fn evaluate(&self, vars: &[String]) -> Result<Evaluation> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(Evaluation::new(vec![-count(&vars[0], 'a'), -count(&vars[0], 'b')]))
        }
    }

    fn config() -> Nsga2Config {
        Nsga2Config::default()
            .with_population_size(20)
            .with_max_generations(30)
            .with_seed(42)
            .with_parallel(false)
    }

    #[test]
    fn test_runs_and_reports() {
        let problem = LetterCounts::new(10);
        let result = Nsga2::standard().run(&problem, &config()).unwrap();

        assert_eq!(result.generations, 30);
        assert_eq!(result.history.len(), 31);
        assert_eq!(result.population.len(), 20);
        assert!(!result.front.is_empty());
        assert!(!result.cancelled);
        assert!(!result.timed_out);
        assert_eq!(result.evaluations, problem.calls.load(Ordering::Relaxed));
    }

    #[test]
    fn test_population_is_unique() {
        let problem = LetterCounts::new(10);
        let result = Nsga2::standard().run(&problem, &config()).unwrap();
        let rows = result.population.individuals();
        for i in 0..rows.len() {
            for j in (i + 1)..rows.len() {
                assert_ne!(rows[i].genotype(), rows[j].genotype());
            }
        }
    }

    #[test]
    fn test_front_is_non_dominated() {
        let problem = LetterCounts::new(10);
        let result = Nsga2::standard().run(&problem, &config()).unwrap();
        let objs: Vec<&[f64]> = result.front.iter().map(|i| i.objectives().unwrap()).collect();
        for a in &objs {
            for b in &objs {
                assert!(!crate::nsga2::pareto::dominates(a, b));
            }
        }
    }

    #[test]
    fn test_extremes_never_regress() {
        let problem = LetterCounts::new(10);
        let driver = Nsga2::standard();
        let short = driver
            .run(&problem, &config().with_max_generations(5))
            .unwrap();
        let long = driver
            .run(&problem, &config().with_max_generations(40))
            .unwrap();
        let best_a = |pop: &Population<String>| {
            pop.iter()
                .map(|i| count(i.genotype(), 'a'))
                .fold(0.0, f64::max)
        };
        assert!(best_a(&long.population) >= best_a(&short.population));
    }

    #[test]
    fn test_reproducible_with_seed() {
        let problem = LetterCounts::new(8);
        let a = Nsga2::standard().run(&problem, &config()).unwrap();
        let b = Nsga2::standard().run(&problem, &config()).unwrap();
        assert_eq!(a.population, b.population);
    }

    #[test]
    fn test_custom_offspring_count() {
        let problem = LetterCounts::new(10);
        let cfg = config().with_n_offsprings(5).with_max_generations(3);
        let result = Nsga2::standard().run(&problem, &cfg).unwrap();
        for stats in &result.history[1..] {
            assert!(stats.offspring <= 5);
        }
        assert_eq!(result.population.len(), 20);
    }

    #[test]
    fn test_tiny_domain_exhausts_mating() {
        // Only 4 distinct genotypes exist over {a, b}^2, fewer than the population.
        let mut problem = LetterCounts::new(2);
        problem.desc = ProblemDescriptor::builder()
            .with_n_obj(2)
            .with_alphabet(Alphabet::from_chars("ab").unwrap())
            .with_length(2)
            .build()
            .unwrap();
        let cfg = Nsga2Config::default()
            .with_population_size(6)
            .with_max_generations(3)
            .with_max_mating_attempts(4)
            .with_seed(1)
            .with_parallel(false);
        let result = Nsga2::standard().run(&problem, &cfg).unwrap();
        assert!(result.population.len() <= 4);
        assert_eq!(result.generations, 3);
        let accepted: usize = result.history.iter().map(|s| s.offspring).sum();
        assert!(result.history[0].population_size + accepted <= 4);
        assert!(result.history[1..].iter().all(|s| s.mating_rounds <= 4));
    }

    #[test]
    fn test_without_duplicate_elimination() {
        let problem = LetterCounts::new(10);
        let driver = Nsga2::new(
            UniformSampling,
            UniformCrossover::new(),
            ReorderSubstituteMutation::new(),
            NoDuplicateElimination,
        );
        let result = driver.run(&problem, &config()).unwrap();
        assert!(result.history[1..].iter().all(|s| s.duplicates_rejected == 0));
        assert!(result.history[1..].iter().all(|s| s.offspring == 20));
    }

    #[test]
    fn test_invalid_config() {
        let problem = LetterCounts::new(10);
        let err = Nsga2::standard()
            .run(&problem, &config().with_population_size(1))
            .unwrap_err();
        assert!(matches!(err, OperatorError::InvalidConfig(_)));
    }

    #[test]
    fn test_zero_offspring_crossover_rejected() {
        struct Barren;

        impl Crossover<String> for Barren {
            fn n_parents(&self) -> usize {
                2
            }
            fn n_offsprings(&self) -> usize {
                0
            }
            fn crossover<R: Rng>(
                &self,
                _problem: &DescriptorOf<String>,
                _parents: &MatingGroup<String>,
                _rng: &mut R,
            ) -> Result<crate::population::OffspringGroup<String>> {
                unreachable!("arity is checked before mating")
            }
        }

        let problem = LetterCounts::new(10);
        let driver = Nsga2::new(
            UniformSampling,
            Barren,
            ReorderSubstituteMutation::new(),
            GenotypeEquality,
        );
        let err = driver.run(&problem, &config()).unwrap_err();
        assert!(matches!(err, OperatorError::InvalidConfig(_)));
        assert_eq!(problem.calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_time_limit_stops_run() {
        let problem = LetterCounts::new(10);
        let cfg = config()
            .with_population_size(50)
            .with_max_generations(100_000)
            .with_time_limit_ms(1);
        let result = Nsga2::standard().run(&problem, &cfg).unwrap();
        assert!(result.timed_out);
        assert!(!result.cancelled);
        assert!(result.generations < 100_000);
        assert_eq!(result.history.len(), result.generations + 1);
        assert_eq!(result.population.len(), 50);
    }

    #[test]
    fn test_cancellation() {
        let problem = LetterCounts::new(10);
        let cancel = Arc::new(AtomicBool::new(true));
        let result = Nsga2::standard()
            .run_with_cancel(&problem, &config(), Some(cancel))
            .unwrap();
        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert_eq!(result.history.len(), 1);
    }

    #[test]
    fn test_on_generation_called() {
        struct Counting {
            inner: LetterCounts,
            seen: AtomicUsize,
        }

        impl Problem for Counting {
            type Genotype = String;
            fn descriptor(&self) -> &ProblemDescriptor<char> {
                self.inner.descriptor()
            }
            fn evaluate(&self, vars: &[String]) -> Result<Evaluation> {
                self.inner.evaluate(vars)
            }
            fn on_generation(&self, stats: &GenerationStats) {
                assert!(stats.generation >= 1);
                self.seen.fetch_add(1, Ordering::Relaxed);
            }
        }

        let problem = Counting {
            inner: LetterCounts::new(10),
            seen: AtomicUsize::new(0),
        };
        let result = Nsga2::standard()
            .run(&problem, &config().with_max_generations(7))
            .unwrap();
        assert_eq!(result.generations, 7);
        assert_eq!(problem.seen.load(Ordering::Relaxed), 7);
    }

    #[test]
    fn test_evaluation_error_propagates() {
        struct Failing(ProblemDescriptor<char>);

        impl Problem for Failing {
            type Genotype = String;
            fn descriptor(&self) -> &ProblemDescriptor<char> {
                &self.0
            }
            fn evaluate(&self, _vars: &[String]) -> Result<Evaluation> {
                Err(OperatorError::Evaluation("simulator offline".into()))
            }
        }

        let problem = Failing(LetterCounts::new(4).desc);
        let err = Nsga2::standard().run(&problem, &config()).unwrap_err();
        assert_eq!(err, OperatorError::Evaluation("simulator offline".into()));
    }
}

//! Maximizes the number of 'a' and 'b' characters in a 10-letter word.
//!
//! The two goals compete for the same positions, so the Pareto front is the
//! trade-off line between "all a" and "all b".
//!
//! Run with `RUST_LOG=u_moea=debug cargo run --example letter_counts` to see
//! per-generation statistics.

use tracing_subscriber::EnvFilter;
use u_moea::nsga2::{Nsga2, Nsga2Config};
use u_moea::{Alphabet, Evaluation, Problem, ProblemDescriptor, Result};

struct LetterCounts {
    desc: ProblemDescriptor<char>,
}

impl LetterCounts {
    fn new() -> Result<Self> {
        let desc = ProblemDescriptor::builder()
            .with_n_var(1)
            .with_n_obj(2)
            .with_alphabet(Alphabet::lowercase())
            .with_length(10)
            .build()?;
        Ok(Self { desc })
    }
}

fn count(word: &str, letter: char) -> f64 {
    word.chars().filter(|&c| c == letter).count() as f64
}

impl Problem for LetterCounts {
    type Genotype = String;

    fn descriptor(&self) -> &ProblemDescriptor<char> {
        &self.desc
    }

    fn evaluate(&self, variables: &[String]) -> Result<Evaluation> {
        let word = &variables[0];
        Ok(Evaluation::new(vec![-count(word, 'a'), -count(word, 'b')]))
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("u_moea=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let problem = LetterCounts::new()?;
    let config = Nsga2Config::default()
        .with_population_size(11)
        .with_max_generations(100)
        .with_seed(1);

    let result = Nsga2::standard().run(&problem, &config)?;

    println!(
        "{} generations, {} evaluations, front of {}",
        result.generations,
        result.evaluations,
        result.front.len()
    );
    let mut front: Vec<_> = result.front.iter().collect();
    front.sort_by(|a, b| a.genotype().cmp(b.genotype()));
    for ind in front {
        if let Some(objs) = ind.objectives() {
            println!("  {}  a={} b={}", ind.genotype(), -objs[0], -objs[1]);
        }
    }
    Ok(())
}

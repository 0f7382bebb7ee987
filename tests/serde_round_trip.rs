//! Serialization of run inputs and outputs.
#![cfg(feature = "serde")]

use u_moea::nsga2::{GenerationStats, Nsga2Config};
use u_moea::{Alphabet, Evaluation, Individual, Population, ProblemDescriptor};

#[test]
fn config_round_trip() {
    let config = Nsga2Config::default()
        .with_population_size(11)
        .with_n_offsprings(6)
        .with_seed(42)
        .with_time_limit_ms(500);
    let json = serde_json::to_string(&config).unwrap();
    let back: Nsga2Config = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn population_round_trip_keeps_evaluations() {
    let rows = vec![
        Individual::single("aabb".to_string())
            .with_evaluation(Evaluation::with_constraints(vec![-2.0, -2.0], vec![0.5])),
        Individual::single("abcd".to_string()),
    ];
    let pop = Population::from_individuals(1, rows).unwrap();
    let json = serde_json::to_string(&pop).unwrap();
    let back: Population<String> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, pop);
    assert!(back.get(0).unwrap().is_evaluated());
    assert!(!back.get(1).unwrap().is_evaluated());
}

#[test]
fn stats_round_trip() {
    let stats = GenerationStats {
        generation: 3,
        population_size: 11,
        front_size: 4,
        offspring: 11,
        duplicates_rejected: 2,
        mating_rounds: 2,
        evaluations: 44,
    };
    let json = serde_json::to_string(&stats).unwrap();
    assert_eq!(serde_json::from_str::<GenerationStats>(&json).unwrap(), stats);
}

#[test]
fn descriptor_from_config_file() {
    let json = r#"{
        "n_var": 1,
        "n_obj": 2,
        "representation": { "alphabet": ["a", "b", "c"], "length": 10 }
    }"#;
    let desc: ProblemDescriptor<char> = serde_json::from_str(json).unwrap();
    assert_eq!(desc.n_constr(), 0);
    assert_eq!(desc.alphabet(), Some(&Alphabet::from_chars("abc").unwrap()));
}

#[test]
fn invalid_descriptor_rejected_before_use() {
    let json = r#"{
        "n_var": 1,
        "n_obj": 2,
        "representation": { "alphabet": [], "length": 10 }
    }"#;
    let err = serde_json::from_str::<ProblemDescriptor<char>>(json).unwrap_err();
    assert!(err.to_string().contains("alphabet"));
}

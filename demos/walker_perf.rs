//! Quick walker performance test

use std::collections::BTreeMap;
use std::time::Instant;

use mutant_walker::{
    SearchWalker, Walker,
    schema::{GeneticConfig, SamplingConfig, SearchMethod, WalkerConfig},
};

fn main() {
    println!("=== Walker Performance Test ===\n");

    let seeds: Vec<String> = [
        "ACGTTGCAACGTTGCAACGTTGCAACGTTGCAACGTTGCA",
        "GGGCCCAAATTTGGGCCCAAATTTGGGCCCAAATTTGGGC",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    // GC content stands in for a trained model
    let gc = |seqs: &[String], _target: &str| -> Vec<f64> {
        seqs.iter()
            .map(|s| s.chars().filter(|c| matches!(c, 'G' | 'C')).count() as f64 / s.len() as f64)
            .collect()
    };

    for sampling_limit in [100, 1000, 5000] {
        println!("Sampling limit: {}", sampling_limit);

        let config = WalkerConfig {
            model_name: "gc_content".to_string(),
            random_seed: Some(42),
            method: SearchMethod::Sampling(SamplingConfig {
                sampling_limit,
                max_trials: sampling_limit * 10,
                n_parents: 10,
            }),
            ..Default::default()
        };
        let counts = BTreeMap::from([(0, 5), (4, 5), (9, 5)]);

        let start = Instant::now();
        let mut walker = SearchWalker::from_config(config).unwrap().with_oracle(gc);
        let records = walker.generate_mutants(&seeds, &counts).unwrap();
        let elapsed = start.elapsed();

        let best = records
            .iter()
            .map(|r| r.model_score)
            .fold(f64::NEG_INFINITY, f64::max);

        println!("  Records:        {}", records.len());
        println!("  Elapsed:        {:.2}s", elapsed.as_secs_f64());
        println!("  Best score:     {:.4}", best);
        println!();
    }

    for generations in [10, 100] {
        println!("Genetic generations: {}", generations);

        let config = WalkerConfig {
            model_name: "gc_content".to_string(),
            random_seed: Some(42),
            method: SearchMethod::Genetic(GeneticConfig {
                n_possible_parents: 2,
                n_parents: 2,
            }),
            ..Default::default()
        };
        let counts = BTreeMap::from([(generations, 5)]);

        let start = Instant::now();
        let mut walker = SearchWalker::from_config(config).unwrap().with_oracle(gc);
        let records = walker.generate_mutants(&seeds, &counts).unwrap();
        let elapsed = start.elapsed();

        println!("  Records:        {}", records.len());
        println!("  Elapsed:        {:.2}s", elapsed.as_secs_f64());
        println!("  Best score:     {:.4}", records[0].model_score);
        println!();
    }
}

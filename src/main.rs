//! Mutant Walker CLI - Run a random-walk search from JSON configuration.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use mutant_walker::{
    schema::WalkerConfig,
    search::{GenerationCounts, SearchWalker, Walker},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--example" {
        print_example_config();
        return;
    }

    if args.len() < 4 {
        eprintln!("Usage: {} <config.json> <seeds.txt> <counts>", args[0]);
        eprintln!();
        eprintln!("Walk from seed sequences using random scores (no model).");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to walker configuration file");
        eprintln!("  seeds.txt    One seed sequence per line");
        eprintln!("  counts       Records per generation, e.g. 0:5,2:10");
        eprintln!();
        eprintln!("Example configuration is printed with the --example flag.");
        std::process::exit(1);
    }

    let config_path = PathBuf::from(&args[1]);
    let seeds_path = PathBuf::from(&args[2]);

    // Load configuration
    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let config: WalkerConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    // Load seeds
    let seeds_str = fs::read_to_string(&seeds_path).unwrap_or_else(|e| {
        eprintln!("Error reading seeds file: {}", e);
        std::process::exit(1);
    });
    let seeds = parse_seeds(&seeds_str);

    if let Some(bad) = seeds.iter().find(|s| !config.alphabet.is_valid_sequence(s)) {
        eprintln!("Seed {} has symbols outside the alphabet", bad);
        std::process::exit(1);
    }

    let counts = parse_counts(&args[3]).unwrap_or_else(|e| {
        eprintln!("Error parsing counts: {}", e);
        std::process::exit(1);
    });

    let mut walker = SearchWalker::from_config(config).unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    });

    let start = Instant::now();
    let records = walker.generate_mutants(&seeds, &counts).unwrap_or_else(|e| {
        eprintln!("Walk failed: {}", e);
        std::process::exit(1);
    });

    eprintln!(
        "{} records from {} seeds in {:.2}s",
        records.len(),
        seeds.len(),
        start.elapsed().as_secs_f32()
    );
    println!("{}", serde_json::to_string_pretty(&records).unwrap());
}

/// One sequence per line; blank lines and `#` comments are skipped.
fn parse_seeds(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Parse `generation:count` pairs separated by commas.
fn parse_counts(text: &str) -> Result<GenerationCounts, String> {
    let mut counts = GenerationCounts::new();
    for pair in text.split(',').filter(|p| !p.trim().is_empty()) {
        let (generation, count) = pair
            .split_once(':')
            .ok_or_else(|| format!("expected generation:count, got {:?}", pair))?;
        let generation: usize = generation
            .trim()
            .parse()
            .map_err(|e| format!("bad generation {:?}: {}", generation, e))?;
        let count: usize = count
            .trim()
            .parse()
            .map_err(|e| format!("bad count {:?}: {}", count, e))?;
        counts.insert(generation, count);
    }
    Ok(counts)
}

fn print_example_config() {
    let config = WalkerConfig {
        random_seed: Some(42),
        ..Default::default()
    };

    println!("Example configuration (config.json):");
    println!("{}", serde_json::to_string_pretty(&config).unwrap());
}

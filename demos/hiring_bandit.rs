use std::path::PathBuf;

use clap::Parser;
use decision_kit::{
    Bandit,
    simulation::{BernoulliArms, simulate},
};
use rand::SeedableRng;
use serde::Deserialize;

/// Simulate hiring rounds with an epsilon-greedy bandit
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON file holding `[{"name": ..., "success_probability": ...}]`
    #[arg(short, long, value_name = "FILE")]
    candidates: Option<PathBuf>,

    /// Number of hiring rounds to simulate
    #[arg(short, long, default_value_t = 50)]
    rounds: usize,

    /// Exploration rate
    #[arg(short, long, default_value_t = 0.1)]
    epsilon: f64,

    /// Random seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
}

#[derive(Deserialize)]
struct CandidateRate {
    name: String,
    success_probability: f64,
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let candidates: Vec<CandidateRate> = match &args.candidates {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => [("Alice", 0.6), ("Bob", 0.4), ("Chloe", 0.75)]
            .into_iter()
            .map(|(name, p)| CandidateRate {
                name: name.to_string(),
                success_probability: p,
            })
            .collect(),
    };

    let mut pool = BernoulliArms::new(
        candidates
            .iter()
            .map(|c| (c.name.clone(), c.success_probability)),
    )?;
    let mut bandit = Bandit::epsilon_greedy(pool.arms().cloned(), args.epsilon)?;
    let mut rng = rand::rngs::StdRng::seed_from_u64(args.seed);

    let report = simulate(&mut bandit, &mut pool, args.rounds, &mut rng)?;

    for round in report.rounds() {
        let outcome = if round.is_success() { "Success" } else { "Fail" };
        println!("Round {}: Hired {} -> {outcome}", round.round, round.arm);
    }

    println!("\n=== Hiring Results ===");
    for (name, summary) in report.summaries() {
        println!(
            "{name}: Hired {} times, Success rate: {:.2}",
            summary.trials,
            summary.success_rate()
        );
    }

    if let Some((name, rate)) = report.best_arm() {
        println!("\nBest candidate to hire: {name} with observed success rate {rate:.2}");
    }

    Ok(())
}

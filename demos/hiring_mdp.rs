use std::path::PathBuf;

use clap::Parser;
use decision_kit::mdp::{Candidate, CandidateRanking};

/// Rank hiring candidates by long-term expected reward
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON file holding a list of candidates
    #[arg(short, long, value_name = "FILE")]
    candidates: Option<PathBuf>,

    /// Discount factor for the long-term strategy
    #[arg(short, long, default_value_t = 0.9)]
    discount: f64,

    /// Number of value-iteration sweeps
    #[arg(short, long, default_value_t = 100)]
    iterations: usize,
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let candidates: Vec<Candidate> = match &args.candidates {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => vec![
            Candidate::new("Alice", 0.6),
            Candidate::new("Bob", 0.8).with_rewards(8.0, -2.0),
            Candidate::new("Chloe", 0.5).with_rewards(16.0, 0.0),
        ],
    };

    let ranking = CandidateRanking::solve(candidates, args.discount, args.iterations)?;

    println!("=== Long-Term Expected Rewards ===");
    for (candidate, value) in ranking.iter() {
        println!("{}: Expected Long-Term Reward = {value:.2}", candidate.name);
    }
    println!(
        "\nOptimal candidate to hire (long-term strategy): {}",
        ranking.best().name
    );

    Ok(())
}

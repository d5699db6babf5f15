use decision_kit::{
    Bandit,
    simulation::{BernoulliArms, simulate},
};
use rand::SeedableRng;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // Equal observed rates go to the driver listed first
    let drivers = vec!["A", "B", "C"];
    let mut true_rates = BernoulliArms::new([("A", 0.7), ("B", 0.5), ("C", 0.3)])?;
    let mut bandit = Bandit::epsilon_greedy(drivers, 0.1)?;
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);

    let report = simulate(&mut bandit, &mut true_rates, 1000, &mut rng)?;

    let trials: Vec<String> = report
        .summaries()
        .map(|(driver, s)| format!("{driver}: {}", s.trials))
        .collect();
    let successes: Vec<String> = report
        .summaries()
        .map(|(driver, s)| format!("{driver}: {}", s.total_reward))
        .collect();
    println!("Trials: {{{}}}", trials.join(", "));
    println!("Successes: {{{}}}", successes.join(", "));

    Ok(())
}

//! Bandit simulations against Bernoulli arms.

use decision_kit::prelude::*;
use rand::SeedableRng;

#[test]
fn test_driver_assignment_finds_best_driver() {
    let mut bandit = Bandit::epsilon_greedy(vec!["A", "B", "C"], 0.1).unwrap();
    let mut drivers = BernoulliArms::new([("A", 0.7), ("B", 0.5), ("C", 0.3)]).unwrap();
    let mut rng = rand::rngs::StdRng::seed_from_u64(2024);

    let report = simulate(&mut bandit, &mut drivers, 2000, &mut rng).unwrap();

    let trials: usize = report.summaries().map(|(_, s)| s.trials).sum();
    assert_eq!(trials, 2000);
    assert_eq!(report.rounds().len(), 2000);

    // Most rounds go to the best driver, whose observed rate nears the true one
    assert!(report.summary(&"A").unwrap().trials > 1000);
    assert!((report.success_rate(&"A").unwrap() - 0.7).abs() < 0.06);

    // Report totals agree with what the policy learned
    for (arm, summary) in report.summaries() {
        let (pulls, mean) = bandit.policy().arm_stats(arm).unwrap_or((0, 0.0));
        assert_eq!(pulls, summary.trials);
        assert!((mean - summary.success_rate()).abs() < 1e-12);
    }
}

#[test]
fn test_hiring_rounds_are_recorded_in_order() {
    let mut bandit = Bandit::epsilon_greedy(vec!["Ann", "Ben"], 0.5).unwrap();
    let mut candidates = BernoulliArms::new([("Ann", 0.9), ("Ben", 0.2)]).unwrap();
    let mut rng = rand::rngs::StdRng::seed_from_u64(8);

    let report = simulate(&mut bandit, &mut candidates, 50, &mut rng).unwrap();
    for (i, outcome) in report.rounds().iter().enumerate() {
        assert_eq!(outcome.round, i + 1);
        assert!(outcome.reward == 0.0 || outcome.reward == 1.0);
        assert_eq!(outcome.is_success(), outcome.reward == 1.0);
    }

    let successes: f64 = report.summaries().map(|(_, s)| s.total_reward).sum();
    assert_eq!(successes, report.total_reward());
}

#[test]
fn test_same_seed_same_report() {
    let run = |seed| {
        let mut bandit = Bandit::epsilon_greedy(vec![1, 2, 3], 0.2).unwrap();
        let mut arms = BernoulliArms::new([(1, 0.2), (2, 0.6), (3, 0.4)]).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        simulate(&mut bandit, &mut arms, 300, &mut rng).unwrap()
    };
    assert_eq!(run(99), run(99));
}

#[test]
fn test_unknown_arm_in_source_is_an_error() {
    let mut bandit = Bandit::epsilon_greedy(vec!["A", "B"], 0.0).unwrap();
    let mut arms = BernoulliArms::new([("B", 0.5)]).unwrap();
    let mut rng = rand::rngs::StdRng::seed_from_u64(1);

    // Greedy with no data picks "A", which the source does not know
    let result = simulate(&mut bandit, &mut arms, 5, &mut rng);
    assert!(matches!(result, Err(DecisionError::ArmNotFound { .. })));
}

#[test]
fn test_report_serializes() {
    let mut bandit = Bandit::epsilon_greedy(vec!["A".to_string()], 0.0).unwrap();
    let mut arms = BernoulliArms::new([("A".to_string(), 1.0)]).unwrap();
    let mut rng = rand::rngs::StdRng::seed_from_u64(1);

    let report = simulate(&mut bandit, &mut arms, 2, &mut rng).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["arms"]["A"]["trials"], 2);
    assert_eq!(json["rounds"][1]["round"], 2);
}

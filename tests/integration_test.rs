//! Integration tests for configuration and the candidate-ranking model.

use approx::assert_abs_diff_eq;
use decision_kit::mdp::MdpConfig;
use decision_kit::prelude::*;

const MACHINE_JSON: &str = r#"{
    "states": ["Idle", "Active", "Breakdown"],
    "actions": ["Assign", "Maintain", "Rest"],
    "rewards": [
        {"state": "Idle", "action": "Assign", "reward": 0},
        {"state": "Active", "action": "Assign", "reward": 10},
        {"state": "Active", "action": "Maintain", "reward": -5},
        {"state": "Breakdown", "action": "Maintain", "reward": -5},
        {"state": "Breakdown", "action": "Rest", "reward": -20}
    ],
    "transitions": [
        {"state": "Idle", "action": "Assign", "outcomes": [{"next_state": "Active", "probability": 1.0}]},
        {"state": "Active", "action": "Assign", "outcomes": [
            {"next_state": "Active", "probability": 0.7},
            {"next_state": "Breakdown", "probability": 0.3}
        ]},
        {"state": "Active", "action": "Maintain", "outcomes": [{"next_state": "Idle", "probability": 1.0}]},
        {"state": "Breakdown", "action": "Maintain", "outcomes": [{"next_state": "Idle", "probability": 1.0}]}
    ],
    "discount": 0.9,
    "max_iterations": 10
}"#;

#[test]
fn test_machine_from_json_config() {
    let config: MdpConfig<String, String> = serde_json::from_str(MACHINE_JSON).unwrap();
    let problem = config.into_problem().unwrap();
    let values = solve(&problem);

    assert_abs_diff_eq!(
        values.get(&"Active".to_string()).unwrap(),
        38.644_380_565_731_75,
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(
        values.get(&"Idle".to_string()).unwrap(),
        32.934_037_433_378_1,
        epsilon = 1e-9
    );
}

#[test]
fn test_config_json_round_trip_preserves_solution() {
    let config: MdpConfig<String, String> = serde_json::from_str(MACHINE_JSON).unwrap();
    let problem = config.into_problem().unwrap();

    let json = serde_json::to_string(&MdpConfig::from(&problem)).unwrap();
    let reparsed: MdpConfig<String, String> = serde_json::from_str(&json).unwrap();
    let again = reparsed.into_problem().unwrap();

    assert_eq!(solve(&problem), solve(&again));
}

#[test]
fn test_value_table_serializes_as_ordered_map() {
    let problem = MdpProblem::builder()
        .states(["A".to_string(), "B".to_string()])
        .actions(["go".to_string()])
        .reward("A".into(), "go".into(), 10.0)
        .transition("A".into(), "go".into(), [("B".into(), 1.0)])
        .max_iterations(3)
        .build()
        .unwrap();
    let values = solve(&problem);

    let json = serde_json::to_string(&values).unwrap();
    assert_eq!(json, r#"{"A":10.0,"B":0.0}"#);

    let back: ValueTable<String> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, values);
}

#[test]
fn test_config_rejects_unknown_action() {
    let json = r#"{
        "states": ["A"],
        "actions": ["go"],
        "rewards": [{"state": "A", "action": "fly", "reward": 1}]
    }"#;
    let config: MdpConfig<String, String> = serde_json::from_str(json).unwrap();
    assert!(matches!(
        config.into_problem(),
        Err(DecisionError::UnknownAction { .. })
    ));
}

#[test]
fn test_candidate_ranking_end_to_end() {
    let candidates: Vec<Candidate> = serde_json::from_str(
        r#"[
            {"name": "Alice", "success_probability": 0.6},
            {"name": "Bruno", "success_probability": 0.8, "reward_success": 8, "reward_failure": -2},
            {"name": "Chen", "success_probability": 0.5, "reward_success": 16}
        ]"#,
    )
    .unwrap();

    // Expected rewards: Alice 6.0, Bruno 6.0, Chen 8.0
    let ranking = CandidateRanking::solve(candidates, 0.9, 100).unwrap();
    assert_eq!(ranking.best().name, "Chen");

    let tail = 0.9 * 8.0 * (1.0 - 0.9_f64.powi(99)) / (1.0 - 0.9);
    assert_abs_diff_eq!(ranking.value_of("Chen").unwrap(), 8.0 + tail, epsilon = 1e-9);
    assert_abs_diff_eq!(ranking.value_of("Alice").unwrap(), 6.0 + tail, epsilon = 1e-9);
    assert_abs_diff_eq!(ranking.best_value(), ranking.value_of("Chen").unwrap());
    assert_eq!(ranking.value_of("Nobody"), None);
}

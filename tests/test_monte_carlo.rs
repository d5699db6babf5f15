use decision_kit::monte_carlo::{PurchaseModel, PurchaseWeights};

#[test]
fn test_seeded_runs_are_reproducible() {
    let model = PurchaseModel::default();
    let first = model.simulate(1_000, 42).unwrap();
    let second = model.simulate(1_000, 42).unwrap();
    assert_eq!(first, second);

    let other = model.simulate(1_000, 43).unwrap();
    assert_ne!(first, other);
}

#[test]
fn test_purchase_rate_matches_mean_probability() {
    let simulation = PurchaseModel::default().simulate(20_000, 7).unwrap();
    let mean_probability = simulation
        .buyers()
        .iter()
        .map(|b| b.purchase_probability)
        .sum::<f64>()
        / simulation.len() as f64;

    // Expected probability:
    // 0.4 * E[income] / 1e5 + 0.3 * E[age factor] + 0.2 * 0.5 + 0.1 * E[car factor]
    let income = 0.4 * 0.55;
    let age = 0.3 * (0.8 * 26.0 / 53.0 + 0.4 * 27.0 / 53.0);
    let car = 0.1 * (0.4 * 0.3 + 0.6 * 1.0);
    let expected = income + age + 0.2 * 0.5 + car;

    assert!((mean_probability - expected).abs() < 0.01);
    assert!((simulation.purchase_rate() - expected).abs() < 0.015);
}

#[test]
fn test_car_ownership_share() {
    let simulation = PurchaseModel::default().simulate(20_000, 3).unwrap();
    let owners = simulation.buyers().iter().filter(|b| b.owns_car).count();
    assert!((owners as f64 / 20_000.0 - 0.4).abs() < 0.015);
}

#[test]
fn test_certain_purchase() {
    let model = PurchaseModel {
        weights: PurchaseWeights {
            income: 0.0,
            age: 0.0,
            need: 0.0,
            car: 1.0,
        },
        car_ownership_probability: 0.0,
        ..PurchaseModel::default()
    };
    let simulation = model.simulate(500, 1).unwrap();
    assert_eq!(simulation.purchase_rate(), 1.0);
}

#[test]
fn test_model_from_partial_json() {
    let model: PurchaseModel =
        serde_json::from_str(r#"{"car_ownership_probability": 0.1, "age_range": [30, 40]}"#)
            .unwrap();
    assert_eq!(model.car_ownership_probability, 0.1);
    assert_eq!(model.age_range, (30, 40));
    assert_eq!(model.income_range, (10_000, 100_000));

    let simulation = model.simulate(300, 5).unwrap();
    assert!(simulation.buyers().iter().all(|b| (30..=40).contains(&b.age)));
}

use decision_kit::mdp::{MdpProblem, ValueIteration};

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let problem = MdpProblem::builder()
        .states(["Idle", "Active", "Breakdown"])
        .actions(["Assign", "Maintain", "Rest"])
        .reward("Idle", "Assign", 0.0)
        .reward("Active", "Assign", 10.0)
        .reward("Active", "Maintain", -5.0)
        .reward("Breakdown", "Maintain", -5.0)
        .reward("Breakdown", "Rest", -20.0)
        .transition("Idle", "Assign", [("Active", 1.0)])
        .transition("Active", "Assign", [("Active", 0.7), ("Breakdown", 0.3)])
        .transition("Active", "Maintain", [("Idle", 1.0)])
        .transition("Breakdown", "Maintain", [("Idle", 1.0)])
        .discount(0.9)
        .max_iterations(10)
        .build()?;

    let solution = ValueIteration::new(&problem).run();
    println!("State Values: {}", solution.values);

    println!("\nGreedy policy after {} sweeps:", solution.iterations);
    for (state, action) in &solution.policy {
        println!("  {state}: {action}");
    }

    Ok(())
}

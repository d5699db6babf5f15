use clap::Parser;
use decision_kit::monte_carlo::PurchaseModel;

/// Monte Carlo estimate of the probability of buying a car
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of people to simulate
    #[arg(short, long, default_value_t = 10_000)]
    simulations: usize,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let simulation = PurchaseModel::default().simulate(args.simulations, args.seed)?;

    println!(
        "{:>4} {:>7} {:>4} {:>11} {:>8} {:>8} {:>8}",
        "", "income", "age", "current_car", "car_need", "prob_buy", "purchase"
    );
    for (i, buyer) in simulation.head(10).iter().enumerate() {
        println!(
            "{i:>4} {:>7} {:>4} {:>11} {:>8.2} {:>8.2} {:>8}",
            buyer.income,
            buyer.age,
            u8::from(buyer.owns_car),
            buyer.car_need,
            buyer.purchase_probability,
            buyer.purchased
        );
    }

    println!(
        "\nEstimated probability of buying a car: {:.2}%",
        simulation.purchase_rate() * 100.0
    );

    Ok(())
}

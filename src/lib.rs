//! decision-kit: classical sequential decision-making algorithms.
//!
//! - [`mdp`]: finite Markov decision processes solved by synchronous value
//!   iteration, plus a candidate-ranking model built on top of it.
//! - [`Bandit`] with the [`policies`] module: epsilon-greedy and random
//!   multi-armed bandit policies over running-average reward estimates.
//! - [`simulation`]: round-by-round bandit simulation against Bernoulli arms.
//! - [`monte_carlo`]: a seeded Monte Carlo purchase-probability simulation.
//!
//! # Quick Start
//!
//! ```
//! use decision_kit::Bandit;
//! use decision_kit::simulation::{BernoulliArms, simulate};
//! use rand::SeedableRng;
//!
//! let mut bandit = Bandit::epsilon_greedy(vec!["A", "B", "C"], 0.1).unwrap();
//! let mut drivers = BernoulliArms::new([("A", 0.7), ("B", 0.5), ("C", 0.3)]).unwrap();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//!
//! let report = simulate(&mut bandit, &mut drivers, 1000, &mut rng).unwrap();
//! assert_eq!(report.rounds().len(), 1000);
//! ```

mod bandit;
mod error;
pub mod mdp;
pub mod monte_carlo;
pub mod policies;
pub mod simulation;

// Re-export main types
pub use bandit::{Bandit, BanditBuilder};
pub use error::{DecisionError, Result};

// Re-export IndexSet for users implementing custom policies
pub use indexmap::IndexSet;

/// Prelude module for convenient imports.
///
/// # Examples
///
/// ```
/// use decision_kit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::mdp::{
        Candidate, CandidateRanking, MdpConfig, MdpProblem, Solution, ValueIteration, ValueTable,
        solve,
    };
    pub use crate::monte_carlo::{PurchaseModel, PurchaseSimulation};
    pub use crate::policies::{EpsilonGreedy, Policy, Random};
    pub use crate::simulation::{BernoulliArms, RewardSource, SimulationReport, simulate};
    pub use crate::{Bandit, DecisionError, Result};
    // IndexSet is available for custom policy implementations
    pub use indexmap::IndexSet;
}

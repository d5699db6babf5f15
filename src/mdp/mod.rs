//! Finite Markov decision processes solved by value iteration
//!
//! A problem is a finite state set, a finite action set, a partial reward
//! function and a partial transition model. [`solve`] runs synchronous
//! Bellman sweeps over it and returns a [`ValueTable`].
//!
//! ```
//! use decision_kit::mdp::{MdpProblem, solve};
//!
//! let problem = MdpProblem::builder()
//!     .states(["A", "B"])
//!     .actions(["go"])
//!     .reward("A", "go", 10.0)
//!     .transition("A", "go", [("B", 1.0)])
//!     .discount(0.9)
//!     .max_iterations(10)
//!     .build()
//!     .unwrap();
//!
//! let values = solve(&problem);
//! assert_eq!(values.get(&"A"), Some(10.0));
//! assert_eq!(values.get(&"B"), Some(0.0));
//! ```

pub mod candidates;
mod config;
mod problem;
mod value_iteration;
mod value_table;

pub use candidates::{Candidate, CandidateRanking};
pub use config::{MdpConfig, Outcome, RewardEntry, TransitionEntry};
pub use problem::{DEFAULT_DISCOUNT, DEFAULT_MAX_ITERATIONS, MdpBuilder, MdpProblem};
pub use value_iteration::{Solution, Sweeps, ValueIteration, solve};
pub use value_table::ValueTable;

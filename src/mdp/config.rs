//! Serializable, list-form description of an MDP.
//!
//! Map keys in JSON must be strings, so rewards and transitions are written
//! as entry lists rather than maps keyed by `(state, action)`.

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::problem::{DEFAULT_DISCOUNT, DEFAULT_MAX_ITERATIONS, MdpProblem};
use crate::error::Result;

/// Immediate reward for one `(state, action)` pair
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardEntry<S, A> {
    pub state: S,
    pub action: A,
    pub reward: f64,
}

/// One possible next state and its probability
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Outcome<S> {
    pub next_state: S,
    pub probability: f64,
}

/// Next-state distribution for one `(state, action)` pair
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionEntry<S, A> {
    pub state: S,
    pub action: A,
    pub outcomes: Vec<Outcome<S>>,
}

/// Configuration for an [`MdpProblem`]
///
/// ```
/// use decision_kit::mdp::MdpConfig;
///
/// let config: MdpConfig<String, String> = serde_json::from_str(r#"{
///     "states": ["A", "B"],
///     "actions": ["go"],
///     "rewards": [{"state": "A", "action": "go", "reward": 10.0}],
///     "transitions": [
///         {"state": "A", "action": "go", "outcomes": [{"next_state": "B", "probability": 1.0}]}
///     ]
/// }"#).unwrap();
/// let problem = config.into_problem().unwrap();
/// assert_eq!(problem.discount(), 0.9);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MdpConfig<S, A> {
    pub states: Vec<S>,
    #[serde(default)]
    pub actions: Vec<A>,
    #[serde(default)]
    pub rewards: Vec<RewardEntry<S, A>>,
    #[serde(default)]
    pub transitions: Vec<TransitionEntry<S, A>>,
    #[serde(default = "default_discount")]
    pub discount: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
}

fn default_discount() -> f64 {
    DEFAULT_DISCOUNT
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

impl<S, A> MdpConfig<S, A>
where
    S: Clone + Eq + Hash + Debug,
    A: Clone + Eq + Hash + Debug,
{
    /// Validate the configuration and turn it into a problem
    pub fn into_problem(self) -> Result<MdpProblem<S, A>> {
        let mut builder = MdpProblem::builder()
            .states(self.states)
            .actions(self.actions)
            .discount(self.discount)
            .max_iterations(self.max_iterations);
        if let Some(tolerance) = self.tolerance {
            builder = builder.tolerance(tolerance);
        }
        for entry in self.rewards {
            builder = builder.reward(entry.state, entry.action, entry.reward);
        }
        for entry in self.transitions {
            builder = builder.transition(
                entry.state,
                entry.action,
                entry
                    .outcomes
                    .into_iter()
                    .map(|o| (o.next_state, o.probability)),
            );
        }
        builder.build()
    }
}

impl<S, A> From<&MdpProblem<S, A>> for MdpConfig<S, A>
where
    S: Clone + Eq + Hash + Debug,
    A: Clone + Eq + Hash + Debug,
{
    fn from(problem: &MdpProblem<S, A>) -> Self {
        let state = |i: usize| problem.states().get_index(i).cloned();
        let action = |i: usize| problem.actions().get_index(i).cloned();

        // Entries are emitted in declaration order so the output is stable
        let mut rewards = Vec::new();
        let mut transitions = Vec::new();
        for s in 0..problem.states().len() {
            for a in 0..problem.actions().len() {
                let (Some(st), Some(ac)) = (state(s), action(a)) else {
                    continue;
                };
                if let Some(&reward) = problem.rewards_by_index().get(&(s, a)) {
                    rewards.push(RewardEntry {
                        state: st.clone(),
                        action: ac.clone(),
                        reward,
                    });
                }
                if let Some(outcomes) = problem.transitions_by_index().get(&(s, a)) {
                    transitions.push(TransitionEntry {
                        state: st,
                        action: ac,
                        outcomes: outcomes
                            .iter()
                            .filter_map(|&(next, probability)| {
                                state(next).map(|next_state| Outcome {
                                    next_state,
                                    probability,
                                })
                            })
                            .collect(),
                    });
                }
            }
        }

        MdpConfig {
            states: problem.states().iter().cloned().collect(),
            actions: problem.actions().iter().cloned().collect(),
            rewards,
            transitions,
            discount: problem.discount(),
            max_iterations: problem.max_iterations(),
            tolerance: problem.tolerance(),
        }
    }
}

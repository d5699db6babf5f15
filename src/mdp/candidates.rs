//! Long-term ranking of hiring candidates by value iteration.
//!
//! Each candidate is a state. After hiring candidate `i` the decision maker
//! may go on to consider any candidate `j`, so
//!
//! `V(i) = E[reward of i] + γ · max_j V(j)`
//!
//! which is a finite MDP with one deterministic action per target candidate.

use serde::{Deserialize, Serialize};

use super::problem::MdpProblem;
use super::value_iteration::solve;
use crate::error::{DecisionError, Result};

fn default_reward_success() -> f64 {
    10.0
}

/// A candidate with a hidden probability of being a successful hire
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub success_probability: f64,
    #[serde(default = "default_reward_success")]
    pub reward_success: f64,
    #[serde(default)]
    pub reward_failure: f64,
}

impl Candidate {
    /// Creates a candidate with reward 10 on success and 0 on failure
    pub fn new(name: impl Into<String>, success_probability: f64) -> Self {
        Self {
            name: name.into(),
            success_probability,
            reward_success: default_reward_success(),
            reward_failure: 0.0,
        }
    }

    /// Replaces the success and failure rewards
    #[must_use]
    pub fn with_rewards(mut self, reward_success: f64, reward_failure: f64) -> Self {
        self.reward_success = reward_success;
        self.reward_failure = reward_failure;
        self
    }

    /// Expected reward from hiring this candidate once
    pub fn expected_reward(&self) -> f64 {
        self.success_probability * self.reward_success
            + (1.0 - self.success_probability) * self.reward_failure
    }
}

/// Candidates with their long-term expected rewards
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateRanking {
    candidates: Vec<Candidate>,
    values: Vec<f64>,
    best: usize,
}

impl CandidateRanking {
    /// Rank candidates by running `iterations` Bellman sweeps
    pub fn solve(candidates: Vec<Candidate>, discount: f64, iterations: usize) -> Result<Self> {
        if candidates.is_empty() {
            return Err(DecisionError::EmptyProblem {
                message: "no candidates".into(),
            });
        }

        let n = candidates.len();
        let mut builder = MdpProblem::builder()
            .states(0..n)
            .actions(0..n)
            .discount(discount)
            .max_iterations(iterations);
        for (i, candidate) in candidates.iter().enumerate() {
            let reward = candidate.expected_reward();
            for j in 0..n {
                builder = builder.reward(i, j, reward).transition(i, j, [(j, 1.0)]);
            }
        }
        let table = solve(&builder.build()?);

        let values: Vec<f64> = (0..n).map(|i| table.get(&i).unwrap_or(0.0)).collect();
        let best = table.best_state().map_or(0, |(i, _)| *i);
        Ok(Self {
            candidates,
            values,
            best,
        })
    }

    /// Iterates over candidates and their long-term values, in input order
    pub fn iter(&self) -> impl Iterator<Item = (&Candidate, f64)> {
        self.candidates.iter().zip(self.values.iter().copied())
    }

    /// Long-term value of the first candidate with the given name
    pub fn value_of(&self, name: &str) -> Option<f64> {
        self.iter()
            .find(|(c, _)| c.name == name)
            .map(|(_, value)| value)
    }

    /// The optimal candidate to hire (the first one on ties)
    pub fn best(&self) -> &Candidate {
        &self.candidates[self.best]
    }

    /// Long-term value of the optimal candidate
    pub fn best_value(&self) -> f64 {
        self.values[self.best]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_expected_reward() {
        let c = Candidate::new("Ada", 0.7);
        assert_relative_eq!(c.expected_reward(), 7.0);

        let c = Candidate::new("Bob", 0.25).with_rewards(20.0, -4.0);
        assert_relative_eq!(c.expected_reward(), 0.25 * 20.0 - 0.75 * 4.0);
    }

    #[test]
    fn test_single_sweep_is_immediate_reward() {
        let ranking = CandidateRanking::solve(
            vec![Candidate::new("Ada", 0.7), Candidate::new("Bob", 0.4)],
            0.9,
            1,
        )
        .unwrap();
        assert_relative_eq!(ranking.value_of("Ada").unwrap(), 7.0);
        assert_relative_eq!(ranking.value_of("Bob").unwrap(), 4.0);
        assert_eq!(ranking.best().name, "Ada");
    }

    #[test]
    fn test_converges_to_closed_form() {
        let candidates = vec![
            Candidate::new("Ada", 0.7),
            Candidate::new("Bob", 0.5).with_rewards(30.0, -5.0),
            Candidate::new("Cy", 0.9),
        ];
        let ranking = CandidateRanking::solve(candidates.clone(), 0.9, 500).unwrap();

        let best_reward = candidates
            .iter()
            .map(Candidate::expected_reward)
            .fold(f64::NEG_INFINITY, f64::max);
        let tail = 0.9 * best_reward / (1.0 - 0.9);
        for (candidate, value) in ranking.iter() {
            assert_relative_eq!(
                value,
                candidate.expected_reward() + tail,
                epsilon = 1e-9
            );
        }
        // 0.5 * 30 - 0.5 * 5 = 12.5
        assert_eq!(ranking.best().name, "Bob");
    }

    #[test]
    fn test_empty_candidates() {
        assert!(matches!(
            CandidateRanking::solve(Vec::new(), 0.9, 10),
            Err(DecisionError::EmptyProblem { .. })
        ));
    }
}

use super::{Policy, Random};
use crate::error::{DecisionError, Result};
use indexmap::IndexSet;
use rand::Rng;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::trace;

/// Epsilon-greedy policy - explores with probability epsilon, exploits otherwise
///
/// Exploitation picks the arm with the highest running mean reward. Arms that
/// were never pulled have a mean of 0, and ties go to the arm that comes
/// first in the bandit's arm order.
#[derive(Clone)]
pub struct EpsilonGreedy<A> {
    epsilon: f64,
    arm_stats: HashMap<A, ArmStats>,
}

impl<A> std::fmt::Debug for EpsilonGreedy<A>
where
    A: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EpsilonGreedy")
            .field("epsilon", &self.epsilon)
            .field("arm_stats", &self.arm_stats)
            .finish()
    }
}

#[derive(Clone, Debug, Default)]
struct ArmStats {
    pulls: usize,
    total_reward: f64,
}

impl ArmStats {
    fn average_reward(&self) -> f64 {
        if self.pulls == 0 {
            0.0
        } else {
            self.total_reward / self.pulls as f64
        }
    }
}

fn check_epsilon(epsilon: f64) -> Result<()> {
    if (0.0..=1.0).contains(&epsilon) {
        Ok(())
    } else {
        Err(DecisionError::invalid(format!(
            "epsilon must be between 0 and 1, got {epsilon}"
        )))
    }
}

impl<A> EpsilonGreedy<A>
where
    A: Clone + Eq + Hash,
{
    /// Creates a new EpsilonGreedy policy with the given epsilon
    pub fn new(epsilon: f64) -> Result<Self> {
        check_epsilon(epsilon)?;
        Ok(Self {
            epsilon,
            arm_stats: HashMap::new(),
        })
    }

    /// Gets the epsilon value
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Sets the epsilon value
    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
        check_epsilon(epsilon)?;
        self.epsilon = epsilon;
        Ok(())
    }

    /// Gets the pull count and mean reward for a specific arm
    pub fn arm_stats(&self, arm: &A) -> Option<(usize, f64)> {
        self.arm_stats
            .get(arm)
            .map(|s| (s.pulls, s.average_reward()))
    }

    /// Probability that [`Policy::select`] returns each arm
    ///
    /// Every arm gets `epsilon / n` from exploration and the greedy arm gets
    /// the remaining `1 - epsilon` on top.
    pub fn selection_probabilities(&self, arms: &IndexSet<A>) -> HashMap<A, f64> {
        if arms.is_empty() {
            return HashMap::new();
        }
        let explore = self.epsilon / arms.len() as f64;
        let mut probabilities: HashMap<A, f64> =
            arms.iter().map(|arm| (arm.clone(), explore)).collect();
        if let Some(best) = self.find_best_arm(arms) {
            if let Some(p) = probabilities.get_mut(&best) {
                *p += 1.0 - self.epsilon;
            }
        }
        probabilities
    }

    /// Find the arm with highest average reward, the first one on ties
    fn find_best_arm(&self, arms: &IndexSet<A>) -> Option<A> {
        let mut best: Option<(&A, f64)> = None;
        for arm in arms {
            let reward = self.arm_stats.get(arm).map_or(0.0, |s| s.average_reward());
            let replace = match best {
                None => true,
                Some((_, b)) => reward > b,
            };
            if replace {
                best = Some((arm, reward));
            }
        }
        best.map(|(arm, _)| arm.clone())
    }
}

impl<A> Policy<A> for EpsilonGreedy<A>
where
    A: Clone + Eq + Hash,
{
    fn update(&mut self, decision: &A, reward: f64) {
        let stats = self.arm_stats.entry(decision.clone()).or_default();
        stats.pulls += 1;
        stats.total_reward += reward;
    }

    fn select(&self, arms: &IndexSet<A>, rng: &mut dyn rand::RngCore) -> Option<A> {
        if arms.is_empty() {
            return None;
        }

        // Explore with probability epsilon
        let r: f64 = rng.random();
        if r < self.epsilon {
            trace!(draw = r, epsilon = self.epsilon, "explore");
            Random::draw(arms, rng)
        } else {
            trace!(draw = r, epsilon = self.epsilon, "exploit");
            self.find_best_arm(arms)
        }
    }

    fn expectations(&self, arms: &IndexSet<A>) -> HashMap<A, f64> {
        // Arms without data have an expectation of 0.0
        arms.iter()
            .map(|arm| {
                let expected_reward = self
                    .arm_stats
                    .get(arm)
                    .map_or(0.0, |stats| stats.average_reward());
                (arm.clone(), expected_reward)
            })
            .collect()
    }

    fn reset_arm(&mut self, arm: &A) {
        self.arm_stats.remove(arm);
    }

    fn reset(&mut self) {
        self.arm_stats.clear();
    }
}

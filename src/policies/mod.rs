mod epsilon_greedy;
mod random;

use std::collections::HashMap;

use indexmap::IndexSet;

pub use epsilon_greedy::EpsilonGreedy;
pub use random::Random;

/// Core trait for bandit learning policies
///
/// Note: This trait uses `dyn rand::RngCore` instead of a generic parameter
/// to stay object-safe, so a `Box<dyn Policy<A>>` can drive a bandit.
pub trait Policy<A> {
    /// Update the policy with the observed reward for one decision
    fn update(&mut self, decision: &A, reward: f64);

    /// Select an arm from the available arms using a random source
    ///
    /// Returns `None` only when `arms` is empty.
    fn select(&self, arms: &IndexSet<A>, rng: &mut dyn rand::RngCore) -> Option<A>;

    /// The policy's current score for each arm
    fn expectations(&self, arms: &IndexSet<A>) -> HashMap<A, f64>;

    /// Reset statistics for a specific arm (e.g., when arm is removed/re-added)
    fn reset_arm(&mut self, arm: &A);

    /// Reset all statistics
    fn reset(&mut self);
}

impl<A, P> Policy<A> for Box<P>
where
    P: Policy<A> + ?Sized,
{
    fn update(&mut self, decision: &A, reward: f64) {
        (**self).update(decision, reward);
    }

    fn select(&self, arms: &IndexSet<A>, rng: &mut dyn rand::RngCore) -> Option<A> {
        (**self).select(arms, rng)
    }

    fn expectations(&self, arms: &IndexSet<A>) -> HashMap<A, f64> {
        (**self).expectations(arms)
    }

    fn reset_arm(&mut self, arm: &A) {
        (**self).reset_arm(arm);
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}

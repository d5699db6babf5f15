use crate::error::{DecisionError, Result};
use crate::policies::{EpsilonGreedy, Policy, Random};
use indexmap::IndexSet;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// A multi-armed bandit with a specific policy
///
/// The `Bandit` struct maintains an ordered set of arms and uses a policy to
/// make decisions. Arm order matters: it is the tie-breaking order of greedy
/// policies.
#[derive(Clone, Debug)]
pub struct Bandit<A, P> {
    arms: IndexSet<A>,
    policy: P,
}

impl<A, P> Bandit<A, P>
where
    A: Clone + Eq + Hash + Debug,
    P: Policy<A>,
{
    /// Creates a new bandit with the given arms and policy
    pub fn new<I>(arms: I, policy: P) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
    {
        let arms: IndexSet<A> = arms.into_iter().collect();

        if arms.is_empty() {
            return Err(DecisionError::NoArmsAvailable);
        }

        Ok(Self { arms, policy })
    }

    /// Fit the bandit with observed decisions and rewards (batch update)
    pub fn fit(&mut self, decisions: &[A], rewards: &[f64]) -> Result<()> {
        if decisions.len() != rewards.len() {
            return Err(DecisionError::DimensionMismatch {
                message: format!(
                    "Mismatched dimensions: decisions={}, rewards={}",
                    decisions.len(),
                    rewards.len()
                ),
            });
        }

        self.validate_decisions(decisions)?;

        for (decision, reward) in decisions.iter().zip(rewards) {
            self.policy.update(decision, *reward);
        }
        Ok(())
    }

    /// Incrementally fit the bandit (alias for fit)
    pub fn partial_fit(&mut self, decisions: &[A], rewards: &[f64]) -> Result<()> {
        self.fit(decisions, rewards)
    }

    /// Choose the next arm
    pub fn predict(&self, rng: &mut dyn rand::RngCore) -> Result<A> {
        self.policy
            .select(&self.arms, rng)
            .ok_or(DecisionError::NoArmsAvailable)
    }

    /// Get the policy's current score for every arm
    pub fn predict_expectations(&self) -> HashMap<A, f64> {
        self.policy.expectations(&self.arms)
    }

    /// Gets the available arms
    pub fn arms(&self) -> &IndexSet<A> {
        &self.arms
    }

    /// Gets the number of arms
    pub fn n_arms(&self) -> usize {
        self.arms.len()
    }

    /// Check if an arm exists in the bandit
    pub fn has_arm(&self, arm: &A) -> bool {
        self.arms.contains(arm)
    }

    /// Gets a reference to the policy
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Gets a mutable reference to the policy
    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }

    /// Add a new arm to the bandit
    pub fn add_arm(&mut self, arm: A) -> Result<()> {
        if self.arms.contains(&arm) {
            return Err(DecisionError::ArmAlreadyExists {
                arm: format!("{arm:?}"),
            });
        }
        self.policy.reset_arm(&arm);
        self.arms.insert(arm);
        Ok(())
    }

    /// Remove an arm from the bandit
    pub fn remove_arm(&mut self, arm: &A) -> Result<()> {
        if !self.arms.shift_remove(arm) {
            return Err(DecisionError::ArmNotFound {
                arm: format!("{arm:?}"),
            });
        }
        Ok(())
    }

    /// Validate that all decisions correspond to valid arms
    fn validate_decisions(&self, decisions: &[A]) -> Result<()> {
        match decisions.iter().find(|d| !self.arms.contains(*d)) {
            Some(unknown) => Err(DecisionError::ArmNotFound {
                arm: format!("{unknown:?}"),
            }),
            None => Ok(()),
        }
    }
}

// Convenience constructors for common policies
impl<A> Bandit<A, EpsilonGreedy<A>>
where
    A: Clone + Eq + Hash + Debug,
{
    /// Create an epsilon-greedy bandit
    pub fn epsilon_greedy<I>(arms: I, epsilon: f64) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
    {
        Self::new(arms, EpsilonGreedy::new(epsilon)?)
    }
}

impl<A> Bandit<A, Random>
where
    A: Clone + Eq + Hash + Debug,
{
    /// Create a random bandit
    pub fn random<I>(arms: I) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
    {
        Self::new(arms, Random)
    }
}

/// Builder for creating bandits with a fluent API
pub struct BanditBuilder<A, P> {
    arms: Option<IndexSet<A>>,
    policy: Option<P>,
}

impl<A, P> Default for BanditBuilder<A, P> {
    fn default() -> Self {
        Self {
            arms: None,
            policy: None,
        }
    }
}

impl<A, P> BanditBuilder<A, P>
where
    A: Clone + Eq + Hash + Debug,
    P: Policy<A>,
{
    /// Set the arms for the bandit
    pub fn arms<I>(mut self, arms: I) -> Self
    where
        I: IntoIterator<Item = A>,
    {
        self.arms = Some(arms.into_iter().collect());
        self
    }

    /// Set the policy for the bandit
    pub fn policy(mut self, policy: P) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Build the bandit
    pub fn build(self) -> Result<Bandit<A, P>> {
        let arms = self.arms.ok_or(DecisionError::BuilderError {
            message: "Arms not specified".into(),
        })?;

        let policy = self.policy.ok_or(DecisionError::BuilderError {
            message: "Policy not specified".into(),
        })?;

        Bandit::new(arms, policy)
    }
}

impl<A, P> Bandit<A, P> {
    /// Create a new builder for constructing a bandit
    pub fn builder() -> BanditBuilder<A, P> {
        BanditBuilder::default()
    }
}

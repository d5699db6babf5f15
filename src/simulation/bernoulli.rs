use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;
use rand::Rng;

use super::RewardSource;
use crate::error::{DecisionError, Result};

/// Arms that pay 1.0 with a hidden success rate and 0.0 otherwise
#[derive(Clone, Debug)]
pub struct BernoulliArms<A> {
    rates: IndexMap<A, f64>,
}

impl<A> BernoulliArms<A>
where
    A: Clone + Eq + Hash + Debug,
{
    /// Creates the arms from `(arm, success rate)` pairs
    ///
    /// Rates must lie in `[0, 1]`.
    pub fn new<I>(rates: I) -> Result<Self>
    where
        I: IntoIterator<Item = (A, f64)>,
    {
        let rates: IndexMap<A, f64> = rates.into_iter().collect();
        if rates.is_empty() {
            return Err(DecisionError::NoArmsAvailable);
        }
        if let Some((arm, rate)) = rates.iter().find(|(_, r)| !(0.0..=1.0).contains(*r)) {
            return Err(DecisionError::invalid(format!(
                "success rate of {arm:?} must be between 0 and 1, got {rate}"
            )));
        }
        Ok(Self { rates })
    }

    /// Gets the hidden success rate of an arm
    pub fn rate(&self, arm: &A) -> Option<f64> {
        self.rates.get(arm).copied()
    }

    /// Arms in declaration order
    pub fn arms(&self) -> impl Iterator<Item = &A> {
        self.rates.keys()
    }

    /// The arm with the highest true success rate
    pub fn best_arm(&self) -> Option<&A> {
        let mut best: Option<(&A, f64)> = None;
        for (arm, &rate) in &self.rates {
            if best.is_none_or(|(_, b)| rate > b) {
                best = Some((arm, rate));
            }
        }
        best.map(|(arm, _)| arm)
    }
}

impl<A> RewardSource<A> for BernoulliArms<A>
where
    A: Clone + Eq + Hash + Debug,
{
    fn pull(&mut self, arm: &A, rng: &mut dyn rand::RngCore) -> Result<f64> {
        let rate = self.rate(arm).ok_or_else(|| DecisionError::ArmNotFound {
            arm: format!("{arm:?}"),
        })?;
        Ok(if rng.random::<f64>() < rate { 1.0 } else { 0.0 })
    }
}

//! Round-by-round bandit simulation against a reward source
//!
//! Each round the bandit predicts an arm, the source pays a reward for it
//! and the bandit is fitted with that single observation.

mod bernoulli;

use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, trace};

use crate::bandit::Bandit;
use crate::error::Result;
use crate::policies::Policy;

pub use bernoulli::BernoulliArms;

/// Something that pays a reward when an arm is pulled
pub trait RewardSource<A> {
    /// Pull `arm` once and return the observed reward
    fn pull(&mut self, arm: &A, rng: &mut dyn rand::RngCore) -> Result<f64>;
}

/// What happened in one simulated round
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoundOutcome<A> {
    /// 1-based round number
    pub round: usize,
    pub arm: A,
    pub reward: f64,
}

impl<A> RoundOutcome<A> {
    /// Whether the round paid a positive reward
    pub fn is_success(&self) -> bool {
        self.reward > 0.0
    }
}

/// Observed totals for one arm
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ArmSummary {
    pub trials: usize,
    pub total_reward: f64,
}

impl ArmSummary {
    /// Mean observed reward, 0 for an arm that was never tried
    pub fn success_rate(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.total_reward / self.trials as f64
        }
    }
}

/// Full record of a simulation run
#[derive(Clone, Debug, Serialize)]
pub struct SimulationReport<A> {
    rounds: Vec<RoundOutcome<A>>,
    arms: IndexMap<A, ArmSummary>,
}

impl<A> PartialEq for SimulationReport<A>
where
    A: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.rounds == other.rounds && self.arms == other.arms
    }
}

impl<A> SimulationReport<A>
where
    A: Clone + Eq + Hash,
{
    /// Outcomes in round order
    pub fn rounds(&self) -> &[RoundOutcome<A>] {
        &self.rounds
    }

    /// Per-arm totals for every arm of the bandit, in arm order
    pub fn summaries(&self) -> impl Iterator<Item = (&A, &ArmSummary)> {
        self.arms.iter()
    }

    /// Totals for one arm
    pub fn summary(&self, arm: &A) -> Option<&ArmSummary> {
        self.arms.get(arm)
    }

    /// Observed success rate of one arm
    pub fn success_rate(&self, arm: &A) -> Option<f64> {
        self.summary(arm).map(ArmSummary::success_rate)
    }

    /// Sum of all rewards collected
    pub fn total_reward(&self) -> f64 {
        self.rounds.iter().map(|r| r.reward).sum()
    }

    /// Arm with the best observed success rate, the first one on ties
    pub fn best_arm(&self) -> Option<(&A, f64)> {
        let mut best: Option<(&A, f64)> = None;
        for (arm, summary) in &self.arms {
            let rate = summary.success_rate();
            if best.is_none_or(|(_, b)| rate > b) {
                best = Some((arm, rate));
            }
        }
        best
    }
}

/// Run `rounds` rounds of predict, pull and fit
///
/// Arms added to the bandit by the caller beforehand are all reported, even
/// those never tried.
pub fn simulate<A, P, R>(
    bandit: &mut Bandit<A, P>,
    source: &mut R,
    rounds: usize,
    rng: &mut dyn rand::RngCore,
) -> Result<SimulationReport<A>>
where
    A: Clone + Eq + Hash + Debug,
    P: Policy<A>,
    R: RewardSource<A> + ?Sized,
{
    let mut arms: IndexMap<A, ArmSummary> = bandit
        .arms()
        .iter()
        .map(|arm| (arm.clone(), ArmSummary::default()))
        .collect();
    let mut outcomes = Vec::with_capacity(rounds);

    for round in 1..=rounds {
        let arm = bandit.predict(rng)?;
        let reward = source.pull(&arm, rng)?;
        bandit.fit(std::slice::from_ref(&arm), &[reward])?;
        trace!(round, arm = ?arm, reward, "bandit round");

        let summary = arms.entry(arm.clone()).or_default();
        summary.trials += 1;
        summary.total_reward += reward;
        outcomes.push(RoundOutcome { round, arm, reward });
    }

    let report = SimulationReport {
        rounds: outcomes,
        arms,
    };
    debug!(
        rounds,
        total_reward = report.total_reward(),
        best = ?report.best_arm().map(|(arm, _)| arm),
        "bandit simulation finished"
    );
    Ok(report)
}

use std::collections::HashMap;
use std::hash::Hash;

use indexmap::IndexSet;
use rand::Rng;

use super::Policy;

/// Uniform baseline that ignores every observed reward
///
/// Used on its own as the reference point a learning policy should beat in
/// a [`simulate`](crate::simulation::simulate) run, and by
/// [`EpsilonGreedy`](super::EpsilonGreedy) for its exploration draws.
#[derive(Clone, Copy, Debug, Default)]
pub struct Random;

impl Random {
    /// Draw one arm uniformly, `None` when there are no arms
    pub fn draw<A: Clone>(arms: &IndexSet<A>, rng: &mut dyn rand::RngCore) -> Option<A> {
        if arms.is_empty() {
            return None;
        }
        arms.get_index(rng.random_range(0..arms.len())).cloned()
    }
}

impl<A> Policy<A> for Random
where
    A: Clone + Eq + Hash,
{
    fn update(&mut self, _decision: &A, _reward: f64) {}

    fn select(&self, arms: &IndexSet<A>, rng: &mut dyn rand::RngCore) -> Option<A> {
        Self::draw(arms, rng)
    }

    /// Every arm's chance of being picked, `1 / n`
    fn expectations(&self, arms: &IndexSet<A>) -> HashMap<A, f64> {
        let share = 1.0 / arms.len().max(1) as f64;
        arms.iter().map(|arm| (arm.clone(), share)).collect()
    }

    fn reset_arm(&mut self, _arm: &A) {}

    fn reset(&mut self) {}
}

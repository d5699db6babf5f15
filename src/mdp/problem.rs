use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexSet;

use crate::error::{DecisionError, Result};

/// Default discount factor when none is given to the builder.
pub const DEFAULT_DISCOUNT: f64 = 0.9;

/// Default number of Bellman sweeps when none is given to the builder.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// A finite Markov decision process ready to be solved.
///
/// States and actions keep their declaration order, which is also the order
/// of the resulting value table and the tie-breaking order for greedy
/// actions. Rewards and transitions are partial: a missing reward is 0 and a
/// missing transition entry means the action is unavailable in that state.
///
/// Problems are built with [`MdpProblem::builder`], which checks structure
/// (every key names a declared state and action) but deliberately leaves
/// numbers alone: a discount `>= 1` or negative probabilities are accepted
/// and simply produce whatever the arithmetic produces.
#[derive(Clone, Debug)]
pub struct MdpProblem<S, A> {
    states: IndexSet<S>,
    actions: IndexSet<A>,
    rewards: HashMap<(usize, usize), f64>,
    transitions: HashMap<(usize, usize), Vec<(usize, f64)>>,
    discount: f64,
    max_iterations: usize,
    tolerance: Option<f64>,
}

impl<S, A> MdpProblem<S, A>
where
    S: Clone + Eq + Hash + Debug,
    A: Clone + Eq + Hash + Debug,
{
    /// Create a new builder for constructing a problem
    pub fn builder() -> MdpBuilder<S, A> {
        MdpBuilder::default()
    }

    /// Gets the declared states, in order
    pub fn states(&self) -> &IndexSet<S> {
        &self.states
    }

    /// Gets the declared actions, in order
    pub fn actions(&self) -> &IndexSet<A> {
        &self.actions
    }

    /// Immediate reward for taking `action` in `state`, 0 when undefined
    pub fn reward(&self, state: &S, action: &A) -> f64 {
        match (
            self.states.get_index_of(state),
            self.actions.get_index_of(action),
        ) {
            (Some(s), Some(a)) => self.reward_at(s, a),
            _ => 0.0,
        }
    }

    /// Next-state distribution for `(state, action)`, `None` when the action
    /// is unavailable in that state
    pub fn transitions(&self, state: &S, action: &A) -> Option<Vec<(&S, f64)>> {
        let s = self.states.get_index_of(state)?;
        let a = self.actions.get_index_of(action)?;
        self.outcomes_at(s, a).map(|outcomes| {
            outcomes
                .iter()
                .filter_map(|&(next, p)| self.states.get_index(next).map(|n| (n, p)))
                .collect()
        })
    }

    /// Actions with a transition entry in `state`, in declaration order
    pub fn available_actions(&self, state: &S) -> Vec<&A> {
        let Some(s) = self.states.get_index_of(state) else {
            return Vec::new();
        };
        self.actions
            .iter()
            .enumerate()
            .filter(|(a, _)| self.transitions.contains_key(&(s, *a)))
            .map(|(_, action)| action)
            .collect()
    }

    /// Gets the discount factor
    pub fn discount(&self) -> f64 {
        self.discount
    }

    /// Gets the number of Bellman sweeps to run
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Gets the early-stop tolerance, if any
    pub fn tolerance(&self) -> Option<f64> {
        self.tolerance
    }

    pub(crate) fn reward_at(&self, state: usize, action: usize) -> f64 {
        self.rewards.get(&(state, action)).copied().unwrap_or(0.0)
    }

    pub(crate) fn outcomes_at(&self, state: usize, action: usize) -> Option<&[(usize, f64)]> {
        self.transitions.get(&(state, action)).map(Vec::as_slice)
    }

    pub(crate) fn rewards_by_index(&self) -> &HashMap<(usize, usize), f64> {
        &self.rewards
    }

    pub(crate) fn transitions_by_index(&self) -> &HashMap<(usize, usize), Vec<(usize, f64)>> {
        &self.transitions
    }
}

/// Builder for [`MdpProblem`] with a fluent API
///
/// Later rewards or transitions for the same `(state, action)` pair replace
/// earlier ones.
#[derive(Clone, Debug)]
pub struct MdpBuilder<S, A> {
    states: Vec<S>,
    actions: Vec<A>,
    rewards: Vec<(S, A, f64)>,
    transitions: Vec<(S, A, Vec<(S, f64)>)>,
    discount: f64,
    max_iterations: usize,
    tolerance: Option<f64>,
}

impl<S, A> Default for MdpBuilder<S, A> {
    fn default() -> Self {
        Self {
            states: Vec::new(),
            actions: Vec::new(),
            rewards: Vec::new(),
            transitions: Vec::new(),
            discount: DEFAULT_DISCOUNT,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: None,
        }
    }
}

impl<S, A> MdpBuilder<S, A>
where
    S: Clone + Eq + Hash + Debug,
    A: Clone + Eq + Hash + Debug,
{
    /// Declare the states of the problem
    pub fn states<I>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        self.states.extend(states);
        self
    }

    /// Declare the actions of the problem
    pub fn actions<I>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = A>,
    {
        self.actions.extend(actions);
        self
    }

    /// Set the immediate reward for taking `action` in `state`
    pub fn reward(mut self, state: S, action: A, reward: f64) -> Self {
        self.rewards.push((state, action, reward));
        self
    }

    /// Set the next-state distribution for taking `action` in `state`
    pub fn transition<I>(mut self, state: S, action: A, outcomes: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
    {
        self.transitions
            .push((state, action, outcomes.into_iter().collect()));
        self
    }

    /// Set the discount factor
    pub fn discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    /// Set the number of Bellman sweeps
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Stop early once a sweep changes no value by `tolerance` or more
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// Build the problem
    pub fn build(self) -> Result<MdpProblem<S, A>> {
        let states: IndexSet<S> = self.states.into_iter().collect();
        if states.is_empty() {
            return Err(DecisionError::EmptyProblem {
                message: "no states declared".into(),
            });
        }
        if self.max_iterations == 0 {
            return Err(DecisionError::invalid("max_iterations must be positive"));
        }
        let actions: IndexSet<A> = self.actions.into_iter().collect();

        let state_index = |state: &S| {
            states
                .get_index_of(state)
                .ok_or_else(|| DecisionError::UnknownState {
                    state: format!("{state:?}"),
                })
        };
        let action_index = |action: &A| {
            actions
                .get_index_of(action)
                .ok_or_else(|| DecisionError::UnknownAction {
                    action: format!("{action:?}"),
                })
        };

        let mut rewards = HashMap::with_capacity(self.rewards.len());
        for (state, action, reward) in &self.rewards {
            rewards.insert((state_index(state)?, action_index(action)?), *reward);
        }

        let mut transitions = HashMap::with_capacity(self.transitions.len());
        for (state, action, outcomes) in &self.transitions {
            let key = (state_index(state)?, action_index(action)?);
            let outcomes = outcomes
                .iter()
                .map(|(next, p)| Ok((state_index(next)?, *p)))
                .collect::<Result<Vec<_>>>()?;
            transitions.insert(key, outcomes);
        }

        Ok(MdpProblem {
            states,
            actions,
            rewards,
            transitions,
            discount: self.discount,
            max_iterations: self.max_iterations,
            tolerance: self.tolerance,
        })
    }
}

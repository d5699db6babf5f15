use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;
use tracing::{debug, trace};

use super::problem::MdpProblem;
use super::value_table::{ValueTable, nan_max};

/// Solve a problem by value iteration and return the state values.
///
/// Runs `problem.max_iterations()` synchronous Bellman sweeps starting from
/// an all-zero table, or fewer if the problem has a tolerance and a sweep
/// changes no value by at least that much.
pub fn solve<S, A>(problem: &MdpProblem<S, A>) -> ValueTable<S>
where
    S: Clone + Eq + Hash + Debug,
    A: Clone + Eq + Hash + Debug,
{
    ValueIteration::new(problem).run().values
}

/// Outcome of a full value-iteration run
#[derive(Clone, Debug)]
pub struct Solution<S, A> {
    /// Final state values
    pub values: ValueTable<S>,
    /// Greedy action for every state that has one
    pub policy: IndexMap<S, A>,
    /// Number of sweeps performed
    pub iterations: usize,
    /// Largest value change in the last sweep, NaN if any value became NaN
    pub final_delta: f64,
    /// Whether the tolerance stopped iteration early (always false without one)
    pub converged: bool,
}

impl<S, A> PartialEq for Solution<S, A>
where
    S: Eq + Hash,
    A: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
            && self.policy == other.policy
            && self.iterations == other.iterations
            && self.final_delta == other.final_delta
            && self.converged == other.converged
    }
}

/// Synchronous value-iteration solver over a borrowed [`MdpProblem`]
///
/// Every sweep computes a fresh table from the complete previous one:
///
/// `V'(s) = max_a [ R(s,a) + γ Σ p·V(s') ]`
///
/// over the actions that have a transition entry in `s`. A state with no
/// such action gets 0.
#[derive(Debug)]
pub struct ValueIteration<'a, S, A> {
    problem: &'a MdpProblem<S, A>,
}

impl<S, A> Clone for ValueIteration<'_, S, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, A> Copy for ValueIteration<'_, S, A> {}

impl<'a, S, A> ValueIteration<'a, S, A>
where
    S: Clone + Eq + Hash + Debug,
    A: Clone + Eq + Hash + Debug,
{
    /// Creates a solver for the given problem
    pub fn new(problem: &'a MdpProblem<S, A>) -> Self {
        Self { problem }
    }

    /// The all-zero starting table
    pub fn initial_values(&self) -> ValueTable<S> {
        ValueTable::zeros(self.problem.states())
    }

    /// One Bellman sweep over `values`
    ///
    /// States missing from `values` are read as 0.
    pub fn sweep(&self, values: &ValueTable<S>) -> ValueTable<S> {
        let prev = self.dense(values);
        ValueTable::from_values(self.problem.states(), &self.backup_all(&prev))
    }

    /// Action value `Q(state, action)` under `values`, `None` when the
    /// action is unavailable in `state`
    pub fn q_value(&self, values: &ValueTable<S>, state: &S, action: &A) -> Option<f64> {
        let s = self.problem.states().get_index_of(state)?;
        let a = self.problem.actions().get_index_of(action)?;
        self.action_value(s, a, &self.dense(values))
    }

    /// Greedy action for every state with at least one available action
    ///
    /// Ties go to the action declared first.
    pub fn greedy_policy(&self, values: &ValueTable<S>) -> IndexMap<S, A> {
        let prev = self.dense(values);
        let mut policy = IndexMap::new();
        for (s, state) in self.problem.states().iter().enumerate() {
            if let Some((a, _)) = self.best_action(s, &prev) {
                if let Some(action) = self.problem.actions().get_index(a) {
                    policy.insert(state.clone(), action.clone());
                }
            }
        }
        policy
    }

    /// Endless iterator over successive tables, starting with the result of
    /// the first sweep
    pub fn sweeps(&self) -> Sweeps<'a, S, A> {
        Sweeps {
            solver: *self,
            current: vec![0.0; self.problem.states().len()],
        }
    }

    /// Run value iteration as configured by the problem
    pub fn run(&self) -> Solution<S, A> {
        let tolerance = self.problem.tolerance();
        let mut values = vec![0.0; self.problem.states().len()];
        let mut iterations = 0;
        let mut final_delta = 0.0;
        let mut converged = false;

        while iterations < self.problem.max_iterations() {
            let next = self.backup_all(&values);
            final_delta = max_abs_diff(&values, &next);
            values = next;
            iterations += 1;
            trace!(iteration = iterations, delta = final_delta, "bellman sweep");

            // NaN deltas never compare below the tolerance
            if tolerance.is_some_and(|tol| final_delta < tol) {
                converged = true;
                break;
            }
        }

        debug!(
            states = values.len(),
            iterations,
            final_delta,
            converged,
            "value iteration finished"
        );

        let values = ValueTable::from_values(self.problem.states(), &values);
        let policy = self.greedy_policy(&values);
        Solution {
            values,
            policy,
            iterations,
            final_delta,
            converged,
        }
    }

    fn dense(&self, values: &ValueTable<S>) -> Vec<f64> {
        self.problem
            .states()
            .iter()
            .map(|s| values.get(s).unwrap_or(0.0))
            .collect()
    }

    fn backup_all(&self, prev: &[f64]) -> Vec<f64> {
        (0..prev.len())
            .map(|s| self.best_action(s, prev).map_or(0.0, |(_, q)| q))
            .collect()
    }

    /// Highest action value in `state`; the first candidate is kept unless a
    /// later one is strictly greater
    fn best_action(&self, state: usize, prev: &[f64]) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for a in 0..self.problem.actions().len() {
            let Some(q) = self.action_value(state, a, prev) else {
                continue;
            };
            let replace = match best {
                None => true,
                Some((_, b)) => q > b,
            };
            if replace {
                best = Some((a, q));
            }
        }
        best
    }

    fn action_value(&self, state: usize, action: usize, prev: &[f64]) -> Option<f64> {
        let outcomes = self.problem.outcomes_at(state, action)?;
        let gamma = self.problem.discount();
        Some(
            outcomes
                .iter()
                .fold(self.problem.reward_at(state, action), |q, &(next, p)| {
                    q + gamma * p * prev[next]
                }),
        )
    }
}

/// Iterator returned by [`ValueIteration::sweeps`]
#[derive(Clone, Debug)]
pub struct Sweeps<'a, S, A> {
    solver: ValueIteration<'a, S, A>,
    current: Vec<f64>,
}

impl<S, A> Iterator for Sweeps<'_, S, A>
where
    S: Clone + Eq + Hash + Debug,
    A: Clone + Eq + Hash + Debug,
{
    type Item = ValueTable<S>;

    fn next(&mut self) -> Option<Self::Item> {
        self.current = self.solver.backup_all(&self.current);
        Some(ValueTable::from_values(
            self.solver.problem.states(),
            &self.current,
        ))
    }
}

fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, nan_max)
}

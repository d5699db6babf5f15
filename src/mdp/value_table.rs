use std::fmt;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Estimated value of every state, in state declaration order.
///
/// `Display` renders the table like a map literal and honours a precision
/// if one is given, e.g. `format!("{:.2}", table)` gives
/// `{Idle: 0.00, Active: 10.00}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "S: Serialize",
    deserialize = "S: Deserialize<'de> + Eq + Hash"
))]
pub struct ValueTable<S> {
    values: IndexMap<S, f64>,
}

impl<S> ValueTable<S>
where
    S: Clone + Eq + Hash,
{
    /// A table assigning 0 to every state
    pub fn zeros(states: &IndexSet<S>) -> Self {
        Self {
            values: states.iter().map(|s| (s.clone(), 0.0)).collect(),
        }
    }

    pub(crate) fn from_values(states: &IndexSet<S>, values: &[f64]) -> Self {
        Self {
            values: states.iter().cloned().zip(values.iter().copied()).collect(),
        }
    }

    /// Gets the value of a state
    pub fn get(&self, state: &S) -> Option<f64> {
        self.values.get(state).copied()
    }

    /// Iterates over `(state, value)` pairs in state order
    pub fn iter(&self) -> impl Iterator<Item = (&S, f64)> {
        self.values.iter().map(|(s, v)| (s, *v))
    }

    /// Number of states in the table
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table has no states
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest absolute difference between this table and `other`
    ///
    /// States missing from `other` count as an infinite difference. A NaN
    /// difference makes the result NaN.
    pub fn max_delta(&self, other: &ValueTable<S>) -> f64 {
        self.values
            .iter()
            .map(|(s, v)| other.get(s).map_or(f64::INFINITY, |o| (v - o).abs()))
            .fold(0.0, nan_max)
    }

    /// State with the highest value (the first one on ties)
    pub fn best_state(&self) -> Option<(&S, f64)> {
        let mut best: Option<(&S, f64)> = None;
        for (state, value) in self.iter() {
            let replace = match best {
                None => true,
                Some((_, b)) => value > b,
            };
            if replace {
                best = Some((state, value));
            }
        }
        best
    }

    /// Borrows the underlying ordered map
    pub fn as_map(&self) -> &IndexMap<S, f64> {
        &self.values
    }

    /// Consumes the table, returning the underlying ordered map
    pub fn into_map(self) -> IndexMap<S, f64> {
        self.values
    }
}

/// `f64::max` that keeps NaN instead of discarding it
pub(crate) fn nan_max(max: f64, x: f64) -> f64 {
    if max.is_nan() || x.is_nan() {
        f64::NAN
    } else {
        max.max(x)
    }
}

impl<S> PartialEq for ValueTable<S>
where
    S: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<S> fmt::Display for ValueTable<S>
where
    S: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (state, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match f.precision() {
                Some(precision) => write!(f, "{state}: {value:.precision$}")?,
                None => write!(f, "{state}: {value}")?,
            }
        }
        write!(f, "}}")
    }
}

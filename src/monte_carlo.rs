//! Monte Carlo estimate of how likely a person is to buy a car
//!
//! Synthetic people are drawn at random, a purchase probability is computed
//! from their features and a uniform draw decides whether they buy. The
//! fraction of buyers estimates the purchase rate.

use rand::distr::{Bernoulli, Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DecisionError, Result};

/// Weights of the purchase-probability terms
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PurchaseWeights {
    pub income: f64,
    pub age: f64,
    pub need: f64,
    pub car: f64,
}

impl Default for PurchaseWeights {
    fn default() -> Self {
        Self {
            income: 0.4,
            age: 0.3,
            need: 0.2,
            car: 0.1,
        }
    }
}

/// Parameters of the synthetic population and the purchase model
///
/// Ranges are inclusive `(low, high)` pairs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchaseModel {
    pub income_range: (u32, u32),
    pub age_range: (u32, u32),
    pub car_ownership_probability: f64,
    /// Income that maps to an income factor of 1
    pub income_scale: f64,
    pub prime_age_range: (u32, u32),
    pub prime_age_factor: f64,
    pub other_age_factor: f64,
    pub car_owner_factor: f64,
    pub no_car_factor: f64,
    pub weights: PurchaseWeights,
}

impl Default for PurchaseModel {
    fn default() -> Self {
        Self {
            income_range: (10_000, 100_000),
            age_range: (18, 70),
            car_ownership_probability: 0.4,
            income_scale: 100_000.0,
            prime_age_range: (25, 50),
            prime_age_factor: 0.8,
            other_age_factor: 0.4,
            car_owner_factor: 0.3,
            no_car_factor: 1.0,
            weights: PurchaseWeights::default(),
        }
    }
}

/// One simulated person
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Buyer {
    pub income: u32,
    pub age: u32,
    pub owns_car: bool,
    /// Urgency of needing a car, in `[0, 1)`
    pub car_need: f64,
    pub purchase_probability: f64,
    pub purchased: bool,
}

impl PurchaseModel {
    /// Check ranges and probabilities
    pub fn validate(&self) -> Result<()> {
        for (name, (low, high)) in [
            ("income_range", self.income_range),
            ("age_range", self.age_range),
            ("prime_age_range", self.prime_age_range),
        ] {
            if low > high {
                return Err(DecisionError::invalid(format!(
                    "{name} is empty: ({low}, {high})"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.car_ownership_probability) {
            return Err(DecisionError::invalid(format!(
                "car_ownership_probability must be between 0 and 1, got {}",
                self.car_ownership_probability
            )));
        }
        if self.income_scale.is_nan() || self.income_scale <= 0.0 {
            return Err(DecisionError::invalid("income_scale must be positive"));
        }
        Ok(())
    }

    /// Purchase probability for one person, clipped to `[0, 1]`
    pub fn purchase_probability(
        &self,
        income: u32,
        age: u32,
        owns_car: bool,
        car_need: f64,
    ) -> f64 {
        let (prime_low, prime_high) = self.prime_age_range;
        let age_factor = if (prime_low..=prime_high).contains(&age) {
            self.prime_age_factor
        } else {
            self.other_age_factor
        };
        let car_factor = if owns_car {
            self.car_owner_factor
        } else {
            self.no_car_factor
        };
        let income_factor = f64::from(income) / self.income_scale;

        let w = &self.weights;
        (income_factor * w.income + age_factor * w.age + car_need * w.need + car_factor * w.car)
            .clamp(0.0, 1.0)
    }

    /// Simulate `n` people with a seeded generator
    ///
    /// The same model, `n` and `seed` always give the same result.
    pub fn simulate(&self, n: usize, seed: u64) -> Result<PurchaseSimulation> {
        self.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let income = Uniform::new_inclusive(self.income_range.0, self.income_range.1)
            .map_err(|e| DecisionError::invalid(format!("income_range: {e}")))?;
        let age = Uniform::new_inclusive(self.age_range.0, self.age_range.1)
            .map_err(|e| DecisionError::invalid(format!("age_range: {e}")))?;
        let owns_car = Bernoulli::new(self.car_ownership_probability)
            .map_err(|e| DecisionError::invalid(format!("car_ownership_probability: {e}")))?;

        let buyers: Vec<Buyer> = (0..n)
            .map(|_| {
                let income = income.sample(&mut rng);
                let age = age.sample(&mut rng);
                let owns_car = owns_car.sample(&mut rng);
                let car_need: f64 = rng.random();
                let purchase_probability =
                    self.purchase_probability(income, age, owns_car, car_need);
                let purchased = rng.random::<f64>() < purchase_probability;
                Buyer {
                    income,
                    age,
                    owns_car,
                    car_need,
                    purchase_probability,
                    purchased,
                }
            })
            .collect();

        let simulation = PurchaseSimulation { buyers };
        debug!(
            people = n,
            seed,
            purchase_rate = simulation.purchase_rate(),
            "purchase simulation finished"
        );
        Ok(simulation)
    }
}

/// Result of a purchase simulation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseSimulation {
    buyers: Vec<Buyer>,
}

impl PurchaseSimulation {
    /// All simulated people
    pub fn buyers(&self) -> &[Buyer] {
        &self.buyers
    }

    /// The first `n` simulated people
    pub fn head(&self, n: usize) -> &[Buyer] {
        &self.buyers[..n.min(self.buyers.len())]
    }

    /// Number of simulated people
    pub fn len(&self) -> usize {
        self.buyers.len()
    }

    /// Whether nobody was simulated
    pub fn is_empty(&self) -> bool {
        self.buyers.is_empty()
    }

    /// Fraction of people who bought, 0 when nobody was simulated
    pub fn purchase_rate(&self) -> f64 {
        if self.buyers.is_empty() {
            return 0.0;
        }
        let bought = self.buyers.iter().filter(|b| b.purchased).count();
        bought as f64 / self.buyers.len() as f64
    }
}

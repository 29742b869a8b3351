//! Solver configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DrayageError, Result};
use crate::optimizer::{
    CheapestInsertionOptimizer, ExactOptimizer, LocalSearchOptimizer, NearestNeighborOptimizer,
    RouteOptimizer, RuinRecreateOptimizer,
};

/// Which route optimizer to run on the derived matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Greedy multi-depot nearest neighbor.
    NearestNeighbor,
    /// Cheapest insertion over all trucks.
    CheapestInsertion,
    /// Cheapest insertion improved by local search.
    #[default]
    LocalSearch,
    /// Exact dynamic programming, small instances only.
    Exact,
    /// Seeded ruin-and-recreate.
    RuinRecreate,
}

impl Strategy {
    /// All strategies, in documentation order.
    pub const ALL: [Strategy; 5] = [
        Strategy::NearestNeighbor,
        Strategy::CheapestInsertion,
        Strategy::LocalSearch,
        Strategy::Exact,
        Strategy::RuinRecreate,
    ];

    /// Kebab-case name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::NearestNeighbor => "nearest-neighbor",
            Strategy::CheapestInsertion => "cheapest-insertion",
            Strategy::LocalSearch => "local-search",
            Strategy::Exact => "exact",
            Strategy::RuinRecreate => "ruin-recreate",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = DrayageError;

    fn from_str(s: &str) -> Result<Self> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| DrayageError::InvalidConfig(format!("unknown strategy `{s}`")))
    }
}

/// Settings for one solving run.
///
/// Missing fields take their defaults when deserialized, so a config file
/// only needs the values it changes.
///
/// # Examples
///
/// ```
/// use u_drayage::config::{SolverConfig, Strategy};
///
/// let config = SolverConfig::default()
///     .with_strategy(Strategy::RuinRecreate)
///     .with_seed(7)
///     .with_iterations(100);
/// assert_eq!(config.build_optimizer().name(), "ruin-recreate");
///
/// let parsed: SolverConfig = serde_json::from_str(r#"{"strategy": "exact"}"#).unwrap();
/// assert_eq!(parsed.strategy, Strategy::Exact);
/// assert_eq!(parsed.seed, 42);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Optimizer to run.
    pub strategy: Strategy,
    /// Seed for randomized strategies.
    pub seed: u64,
    /// Ruin-and-recreate iterations.
    pub iterations: usize,
    /// Fraction of requests removed per ruin step, in (0, 1].
    pub ruin_fraction: f64,
    /// Largest request count the exact strategy accepts.
    pub exact_limit: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            seed: 42,
            iterations: 500,
            ruin_fraction: 0.3,
            exact_limit: 10,
        }
    }
}

impl SolverConfig {
    /// Sets the strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the ruin-and-recreate iteration count.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the ruin fraction.
    pub fn with_ruin_fraction(mut self, ruin_fraction: f64) -> Self {
        self.ruin_fraction = ruin_fraction;
        self
    }

    /// Sets the exact-search request limit.
    ///
    /// Values above [`MAX_EXACT_REQUESTS`](crate::optimizer::MAX_EXACT_REQUESTS)
    /// are capped. Exact search takes
    /// time and memory exponential in the request count: at the ceiling it
    /// runs about 43 million partition steps and keeps under 2 MiB of
    /// tables per truck.
    pub fn with_exact_limit(mut self, exact_limit: usize) -> Self {
        self.exact_limit = exact_limit;
        self
    }

    /// Reads a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| DrayageError::InvalidConfig(e.to_string()))
    }

    /// Instantiates the configured optimizer.
    pub fn build_optimizer(&self) -> Box<dyn RouteOptimizer> {
        match self.strategy {
            Strategy::NearestNeighbor => Box::new(NearestNeighborOptimizer),
            Strategy::CheapestInsertion => Box::new(CheapestInsertionOptimizer),
            Strategy::LocalSearch => Box::new(LocalSearchOptimizer),
            Strategy::Exact => Box::new(ExactOptimizer::new(self.exact_limit)),
            Strategy::RuinRecreate => Box::new(RuinRecreateOptimizer::new(
                self.iterations,
                self.ruin_fraction,
                self.seed,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.strategy, Strategy::LocalSearch);
        assert_eq!(config.seed, 42);
        assert_eq!(config.iterations, 500);
        assert_eq!(config.exact_limit, 10);
        assert!((config.ruin_fraction - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_strategy_names_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.as_str().parse::<Strategy>(), Ok(strategy));
            assert_eq!(strategy.to_string(), strategy.as_str());
            let optimizer = SolverConfig::default().with_strategy(strategy).build_optimizer();
            assert_eq!(optimizer.name(), strategy.as_str());
        }
    }

    #[test]
    fn test_unknown_strategy() {
        assert_eq!(
            "simulated-annealing".parse::<Strategy>(),
            Err(DrayageError::InvalidConfig(
                "unknown strategy `simulated-annealing`".into()
            ))
        );
    }

    #[test]
    fn test_exact_limit_capped_on_build() {
        let config = SolverConfig::default()
            .with_strategy(Strategy::Exact)
            .with_exact_limit(64);
        assert_eq!(config.exact_limit, 64);
        assert_eq!(ExactOptimizer::new(config.exact_limit).limit(), 16);
    }

    #[test]
    fn test_partial_json() {
        let config = SolverConfig::from_json(r#"{"strategy": "ruin-recreate", "iterations": 9}"#)
            .expect("valid json");
        assert_eq!(config.strategy, Strategy::RuinRecreate);
        assert_eq!(config.iterations, 9);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            SolverConfig::from_json(r#"{"strategy": "fastest"}"#),
            Err(DrayageError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_serialized_strategy_is_kebab_case() {
        let json = serde_json::to_string(&SolverConfig::default()).expect("serializable");
        assert!(json.contains(r#""strategy":"local-search""#));
    }
}

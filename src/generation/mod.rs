//! # Generation Module
//!
//! The loot generation engine: filter predicates, the budget-driven
//! selector, placeholder templating, and display aggregation.
//!
//! Generation is a pure function of its inputs. A [`LootGenerator`] reads a
//! catalog by reference, draws through an injected [`RandomSource`], and
//! returns a fresh list every call.

pub mod filter;
pub mod loot;
pub mod random;
pub mod selector;
pub mod summary;
pub mod templater;

pub use filter::*;
pub use loot::*;
pub use random::*;
pub use selector::*;
pub use summary::*;
pub use templater::*;

use crate::{LootError, LootResult, Points};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a drawn item costs against the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetPolicy {
    /// Charge the catalog point value; materials only change the reported
    /// value. The sum of base values never exceeds the budget.
    BaseCost,
    /// Charge the material-adjusted value. The sum of final values never
    /// exceeds the budget, but cheap materials can stretch it past the sum
    /// of base values.
    ModifiedCost,
    /// Charge the larger of the base and material-adjusted values, so both
    /// the base and the final sums stay within the budget.
    #[default]
    MaxCost,
}

impl BudgetPolicy {
    pub const ALL: [BudgetPolicy; 3] = [Self::BaseCost, Self::ModifiedCost, Self::MaxCost];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BaseCost => "base-cost",
            Self::ModifiedCost => "modified-cost",
            Self::MaxCost => "max-cost",
        }
    }

    /// Points charged for an entry with catalog value `base` and resolved
    /// value `resolved`.
    ///
    /// # Examples
    ///
    /// ```
    /// use loot_generator::{BudgetPolicy, Points};
    ///
    /// let base = Points::from_whole(10);
    /// let resolved = Points::from_whole(15);
    /// assert_eq!(BudgetPolicy::BaseCost.cost(base, resolved), base);
    /// assert_eq!(BudgetPolicy::ModifiedCost.cost(base, resolved), resolved);
    /// assert_eq!(BudgetPolicy::MaxCost.cost(resolved, base), resolved);
    /// ```
    pub fn cost(self, base: Points, resolved: Points) -> Points {
        match self {
            Self::BaseCost => base,
            Self::ModifiedCost => resolved.max(Points::MIN_POSITIVE),
            Self::MaxCost => base.max(resolved),
        }
    }
}

impl fmt::Display for BudgetPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetPolicy {
    type Err = LootError;

    /// Accepts `base-cost` style names, with `_` or `-` separators.
    fn from_str(s: &str) -> LootResult<Self> {
        let name = s.trim().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str().eq_ignore_ascii_case(&name))
            .ok_or_else(|| LootError::InvalidFilter(format!("unknown budget policy: {:?}", s)))
    }
}

/// Configuration for loot generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation; `None` draws from entropy
    pub seed: Option<u64>,
    pub budget_policy: BudgetPolicy,
}

impl GenerationConfig {
    /// Creates an unseeded configuration charging the larger of base and
    /// resolved values.
    ///
    /// # Examples
    ///
    /// ```
    /// use loot_generator::{BudgetPolicy, GenerationConfig};
    ///
    /// let config = GenerationConfig::new();
    /// assert!(config.seed.is_none());
    /// assert_eq!(config.budget_policy, BudgetPolicy::MaxCost);
    /// ```
    pub fn new() -> Self {
        Self {
            seed: None,
            budget_policy: BudgetPolicy::default(),
        }
    }

    /// Creates a seeded configuration for reproducible runs.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::new()
        }
    }
}

/// Utility functions for generation.
pub mod utils {
    use super::*;

    /// Creates a random number generator from the config, seeded when the
    /// config carries a seed.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

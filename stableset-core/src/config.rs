//! Caller defaults for the high-level solver handle.

use crate::{DuplicatePolicy, Strategy};

/// Defaults applied by callers that do not pass a policy or strategy on each
/// call.
///
/// # Examples
/// ```
/// use stableset_core::{DuplicatePolicy, SolverConfig, Strategy};
///
/// let config = SolverConfig::default().with_strategy(Strategy::EXACT);
/// assert_eq!(config.strategy, Strategy::EXACT);
/// assert_eq!(config.duplicate_policy, DuplicatePolicy::DEFAULT);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SolverConfig {
    /// Strategy forwarded to the engine by `solve`.
    pub strategy: Strategy,
    /// Policy applied by `add_edge`.
    pub duplicate_policy: DuplicatePolicy,
}

impl SolverConfig {
    /// Replace the strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Replace the duplicate-edge policy.
    #[must_use]
    pub const fn with_duplicate_policy(mut self, duplicate_policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = duplicate_policy;
        self
    }
}

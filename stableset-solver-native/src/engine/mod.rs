//! `NativeEngine` implementation of the stable set engine seam.
//!
//! Dispatches on the strategy selector and times each run itself.

use std::time::Instant;

use log::debug;
use stableset_core::{EngineError, EngineOutput, Instance, StableSetEngine, Strategy};

use crate::{exact, greedy};

/// Configuration for [`NativeEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct NativeEngineConfig {
    /// Upper bound on branch-and-bound nodes for [`Strategy::EXACT`]. `None`
    /// searches until optimality is proven.
    ///
    /// The search recurses once per candidate vertex and keeps a candidate
    /// list per level, so an unbounded run on a large instance needs stack
    /// depth linear and memory quadratic in the vertex count. Set a limit for
    /// graphs beyond a few thousand vertices.
    pub node_limit: Option<u64>,
    /// Upper bound on local search passes for [`Strategy::GREEDY_STRONG`].
    pub local_search_rounds: usize,
}

impl Default for NativeEngineConfig {
    fn default() -> Self {
        Self {
            node_limit: None,
            local_search_rounds: 100,
        }
    }
}

/// In-process engine implementing the greedy and exact strategies.
///
/// # Examples
/// ```
/// use stableset_core::{GraphBuilder, Strategy, VertexId, solve};
/// use stableset_core::DuplicatePolicy;
/// use stableset_solver_native::NativeEngine;
///
/// # fn main() -> Result<(), stableset_core::StableSetError> {
/// let mut builder = GraphBuilder::new();
/// builder.add_vertex(5)?;
/// builder.add_vertex(3)?;
/// builder.add_edge(VertexId::new(0), VertexId::new(1), DuplicatePolicy::Reject)?;
/// let instance = builder.build()?;
///
/// let result = solve(&NativeEngine::new(), &instance, Strategy::EXACT)?;
/// assert_eq!(result.vertices(), &[VertexId::new(0)]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct NativeEngine {
    config: NativeEngineConfig,
}

impl NativeEngine {
    /// Construct an engine using default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct an engine with explicit configuration.
    #[must_use]
    pub const fn with_config(config: NativeEngineConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &NativeEngineConfig {
        &self.config
    }
}

impl StableSetEngine for NativeEngine {
    fn run(&self, instance: &Instance, strategy: Strategy) -> Result<EngineOutput, EngineError> {
        let started_at = Instant::now();
        let vertices = match strategy {
            Strategy::GREEDY_GWMIN => greedy::gwmin(instance),
            Strategy::GREEDY_GWMAX => greedy::gwmax(instance),
            Strategy::GREEDY_GWMIN2 => greedy::gwmin2(instance),
            Strategy::GREEDY_STRONG => greedy::strong(instance, self.config.local_search_rounds),
            Strategy::EXACT => {
                let outcome = exact::branch_and_bound(instance, self.config.node_limit);
                if outcome.truncated {
                    debug!("exact strategy returned an unproven incumbent");
                }
                outcome.vertices
            }
            other => return Err(EngineError::UnsupportedStrategy(other)),
        };
        let elapsed = started_at.elapsed();
        debug!(
            "native strategy {strategy} chose {} vertices in {elapsed:?}",
            vertices.len()
        );
        Ok(EngineOutput::feasible(vertices).with_elapsed(elapsed))
    }
}

#[cfg(test)]
mod tests;

//! Test-only graph fixtures and scripted engines used by unit and behaviour
//! tests.

use crate::{
    DuplicatePolicy, EngineError, EngineOutput, GraphBuilder, Instance, StableSetEngine, Strategy,
    VertexId, Weight,
};

/// Builder holding `weights.len()` vertices with the given weights and the
/// listed edges, added under [`DuplicatePolicy::Reject`].
///
/// # Panics
/// Panics if a weight is negative or an edge is invalid; fixtures are
/// expected to be well formed.
///
/// # Examples
/// ```rust
/// use stableset_core::test_support::weighted_graph;
///
/// let builder = weighted_graph(&[2, 3], &[(0, 1)]);
/// assert_eq!(builder.number_of_edges(), 1);
/// ```
#[must_use]
#[expect(
    clippy::expect_used,
    reason = "fixtures fail loudly on malformed input"
)]
pub fn weighted_graph(weights: &[Weight], edges: &[(usize, usize)]) -> GraphBuilder {
    let mut builder = GraphBuilder::new();
    for &weight in weights {
        builder.add_vertex(weight).expect("fixture weight");
    }
    for &(u, v) in edges {
        builder
            .add_edge(VertexId::new(u), VertexId::new(v), DuplicatePolicy::Reject)
            .expect("fixture edge");
    }
    builder
}

/// The 4-cycle `0-1-3-2-0` weighted `10, 20, 15, 25`.
///
/// Both maximum-weight stable sets, `{0, 3}` and `{1, 2}`, weigh 35.
#[must_use]
pub fn four_cycle() -> GraphBuilder {
    weighted_graph(&[10, 20, 15, 25], &[(0, 1), (1, 3), (3, 2), (2, 0)])
}

/// The triangle `0-1-2` weighted `5, 3, 7`; the optimum is `{2}`.
#[must_use]
pub fn triangle() -> GraphBuilder {
    weighted_graph(&[5, 3, 7], &[(0, 1), (1, 2), (2, 0)])
}

/// Engine that returns the same output for every call.
#[derive(Debug, Clone)]
pub struct ScriptedEngine {
    output: EngineOutput,
}

impl ScriptedEngine {
    /// Engine replaying `output`.
    #[must_use]
    pub const fn new(output: EngineOutput) -> Self {
        Self { output }
    }
}

impl StableSetEngine for ScriptedEngine {
    fn run(&self, _instance: &Instance, _strategy: Strategy) -> Result<EngineOutput, EngineError> {
        Ok(self.output.clone())
    }
}

/// Engine that rejects every strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingEngine;

impl StableSetEngine for FailingEngine {
    fn run(&self, _instance: &Instance, strategy: Strategy) -> Result<EngineOutput, EngineError> {
        Err(EngineError::UnsupportedStrategy(strategy))
    }
}

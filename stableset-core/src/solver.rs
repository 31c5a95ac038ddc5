//! The external engine seam and the invoker that wraps it.

use std::time::{Duration, Instant};

use log::debug;

use crate::error::{ProtocolError, StableSetError};
use crate::{EngineError, Instance, SolveResult, Strategy, VertexId};

/// Raw output of an engine before the invoker verifies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOutput {
    /// Whether the engine found a stable set.
    pub feasible: bool,
    /// Selected vertices.
    pub vertices: Vec<VertexId>,
    /// Time the engine measured itself, if it reports one.
    pub elapsed: Option<Duration>,
}

impl EngineOutput {
    /// A feasible output without a self-reported time.
    #[must_use]
    pub const fn feasible(vertices: Vec<VertexId>) -> Self {
        Self {
            feasible: true,
            vertices,
            elapsed: None,
        }
    }

    /// An infeasible output without a self-reported time.
    #[must_use]
    pub const fn infeasible() -> Self {
        Self {
            feasible: false,
            vertices: Vec::new(),
            elapsed: None,
        }
    }

    /// Attach the engine's own timing.
    #[must_use]
    pub const fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = Some(elapsed);
        self
    }
}

/// An optimisation engine computing a maximum-weight stable set.
///
/// Implementations return [`EngineError`] when the engine itself fails and
/// an infeasible [`EngineOutput`] when it legitimately finds nothing. The
/// strategy is engine-defined; unknown values should be reported as
/// [`EngineError::UnsupportedStrategy`] rather than panicking.
/// Engines must be `Send + Sync` to operate safely across threads.
pub trait StableSetEngine: Send + Sync {
    /// Solve `instance` with the engine variant selected by `strategy`.
    fn run(&self, instance: &Instance, strategy: Strategy) -> Result<EngineOutput, EngineError>;
}

/// Run `engine` on `instance` and turn its output into a verified
/// [`SolveResult`].
///
/// The call is synchronous and never retried. Elapsed wall-clock time is
/// measured around the call and used unless the engine reports its own.
///
/// # Errors
/// `ExternalSolverFailure` when the engine fails; `ProtocolViolation` when
/// its output is inconsistent (vertices on an infeasible result, ids out of
/// range, repeated or adjacent vertices).
///
/// # Examples
/// ```
/// use stableset_core::{EngineError, EngineOutput, GraphBuilder, Instance};
/// use stableset_core::{StableSetEngine, Strategy, VertexId, solve};
///
/// struct FirstVertex;
///
/// impl StableSetEngine for FirstVertex {
///     fn run(&self, instance: &Instance, _: Strategy) -> Result<EngineOutput, EngineError> {
///         let picked = (0..instance.number_of_vertices()).take(1).map(VertexId::new);
///         Ok(EngineOutput::feasible(picked.collect()))
///     }
/// }
///
/// # fn main() -> Result<(), stableset_core::StableSetError> {
/// let mut builder = GraphBuilder::new();
/// builder.add_vertex(3)?;
/// let instance = builder.build()?;
/// let result = solve(&FirstVertex, &instance, Strategy::DEFAULT)?;
/// assert_eq!(result.vertices(), &[VertexId::new(0)]);
/// # Ok(())
/// # }
/// ```
pub fn solve<E>(
    engine: &E,
    instance: &Instance,
    strategy: Strategy,
) -> Result<SolveResult, StableSetError>
where
    E: StableSetEngine + ?Sized,
{
    let started_at = Instant::now();
    let output = engine.run(instance, strategy)?;
    let measured = started_at.elapsed();
    let solve_time = output.elapsed.unwrap_or(measured);

    if !output.feasible {
        if !output.vertices.is_empty() {
            return Err(ProtocolError::InfeasibleWithVertices {
                count: output.vertices.len(),
            }
            .into());
        }
        debug!("strategy {strategy} found no stable set in {solve_time:?}");
        return Ok(SolveResult::infeasible(solve_time));
    }

    instance.check_stable_set(&output.vertices)?;
    debug!(
        "strategy {strategy} selected {} of {} vertices in {solve_time:?}",
        output.vertices.len(),
        instance.number_of_vertices()
    );
    Ok(SolveResult::feasible(output.vertices, solve_time))
}

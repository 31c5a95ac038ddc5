//! `StableSolver`: one scoped object for the whole builder → instance →
//! result chain.

use log::debug;
use stableset_core::{
    DuplicatePolicy, Phase, SolveResult, SolverConfig, StableSetError, Strategy, VertexId, Weight,
};

use crate::ledger::{BuilderHandle, ResourceLedger};

/// High-level handle over the C boundary.
///
/// Mutations chain through `Result<&mut Self, _>`, `build` freezes the graph
/// and `solve` runs the configured strategy. Every native resource is held in
/// a [`ResourceLedger`], released by [`dispose`](Self::dispose) or when the
/// handle goes out of scope, including on error paths. The handle goes
/// through the same exported calls a C host would use.
///
/// # Examples
/// ```
/// use stableset_core::{Strategy, VertexId};
/// use stableset_ffi::StableSolver;
///
/// # fn main() -> Result<(), stableset_core::StableSetError> {
/// let mut solver = StableSolver::new()?;
/// solver
///     .add_vertices(3)?
///     .set_weight(VertexId::new(0), 5)?
///     .set_weight(VertexId::new(1), 3)?
///     .set_weight(VertexId::new(2), 7)?
///     .add_edge(VertexId::new(0), VertexId::new(1))?
///     .add_edge(VertexId::new(1), VertexId::new(2))?
///     .add_edge(VertexId::new(2), VertexId::new(0))?
///     .build()?;
///
/// let result = solver.solve_with(Strategy::EXACT)?;
/// assert_eq!(result.vertices(), &[VertexId::new(2)]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct StableSolver {
    ledger: ResourceLedger,
    config: SolverConfig,
    phase: Phase,
}

impl StableSolver {
    /// Create a handle with default configuration.
    ///
    /// # Errors
    /// `ResourceExhausted` if the builder cannot be allocated.
    pub fn new() -> Result<Self, StableSetError> {
        Self::with_config(SolverConfig::default())
    }

    /// Create a handle with explicit configuration.
    ///
    /// # Errors
    /// `ResourceExhausted` if the builder cannot be allocated.
    pub fn with_config(config: SolverConfig) -> Result<Self, StableSetError> {
        let mut ledger = ResourceLedger::new();
        ledger.track_builder(BuilderHandle::create()?);
        Ok(Self {
            ledger,
            config,
            phase: Phase::Building,
        })
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Number of vertices added so far.
    ///
    /// # Errors
    /// `InvalidState` after disposal.
    pub fn number_of_vertices(&self) -> Result<usize, StableSetError> {
        self.ledger
            .builder()
            .ok_or(StableSetError::InvalidState {
                operation: "count vertices",
                phase: self.phase,
            })?
            .number_of_vertices()
    }

    /// Append `count` vertices of weight 1.
    ///
    /// # Errors
    /// `InvalidState` after `build` or disposal.
    pub fn add_vertices(&mut self, count: usize) -> Result<&mut Self, StableSetError> {
        self.builder("add vertices")?.add_vertices(count)?;
        Ok(self)
    }

    /// Append a vertex and return its id.
    ///
    /// # Errors
    /// `InvalidArgument` for a negative weight; `InvalidState` after `build`
    /// or disposal.
    pub fn add_vertex(&mut self, weight: Weight) -> Result<VertexId, StableSetError> {
        self.builder("add a vertex")?.add_vertex(weight)
    }

    /// Overwrite a vertex weight.
    ///
    /// # Errors
    /// `NotFound`, `InvalidArgument` or `InvalidState` as for the builder.
    pub fn set_weight(
        &mut self,
        vertex: VertexId,
        weight: Weight,
    ) -> Result<&mut Self, StableSetError> {
        self.builder("set a weight")?.set_weight(vertex, weight)?;
        Ok(self)
    }

    /// Add an edge under the configured duplicate policy.
    ///
    /// # Errors
    /// `NotFound`, `InvalidArgument`, `AlreadyExists` or `InvalidState` as
    /// for the builder.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> Result<&mut Self, StableSetError> {
        let policy = self.config.duplicate_policy;
        self.add_edge_with(u, v, policy)
    }

    /// Add an edge under an explicit duplicate policy.
    ///
    /// # Errors
    /// `NotFound`, `InvalidArgument`, `AlreadyExists` or `InvalidState` as
    /// for the builder.
    pub fn add_edge_with(
        &mut self,
        u: VertexId,
        v: VertexId,
        policy: DuplicatePolicy,
    ) -> Result<&mut Self, StableSetError> {
        self.builder("add an edge")?.add_edge(u, v, policy)?;
        Ok(self)
    }

    /// Make every vertex weigh 1.
    ///
    /// # Errors
    /// `InvalidState` after `build` or disposal.
    pub fn set_unweighted(&mut self) -> Result<&mut Self, StableSetError> {
        self.builder("set unweighted")?.set_unweighted()?;
        Ok(self)
    }

    /// Freeze the graph. The builder stays tracked until disposal.
    ///
    /// # Errors
    /// `InvalidState` if already built or disposed.
    pub fn build(&mut self) -> Result<&mut Self, StableSetError> {
        let instance = self.builder("build")?.build()?;
        self.ledger.track_instance(instance);
        self.phase = Phase::Built;
        debug!("solver handle built its instance");
        Ok(self)
    }

    /// Solve with the configured strategy.
    ///
    /// # Errors
    /// `InvalidState` before `build` or after disposal;
    /// `ExternalSolverFailure` or `ProtocolViolation` when the engine fails.
    pub fn solve(&mut self) -> Result<SolveResult, StableSetError> {
        let strategy = self.config.strategy;
        self.solve_with(strategy)
    }

    /// Solve with an explicit strategy. The previous result buffer, if any,
    /// is released first.
    ///
    /// # Errors
    /// `InvalidState` before `build` or after disposal;
    /// `ExternalSolverFailure` or `ProtocolViolation` when the engine fails.
    pub fn solve_with(&mut self, strategy: Strategy) -> Result<SolveResult, StableSetError> {
        let invalid = StableSetError::InvalidState {
            operation: "solve",
            phase: self.phase,
        };
        if !self.phase.can_solve() {
            return Err(invalid);
        }
        let buffer = self.ledger.instance().ok_or(invalid)?.solve(strategy)?;
        let result = buffer.extract();
        self.ledger.track_result(buffer);
        self.phase = Phase::Solved;
        result
    }

    /// Release every native resource now. Calling it again does nothing.
    pub fn dispose(&mut self) {
        let released = self.ledger.release_all();
        if !released.is_empty() {
            debug!("solver handle disposed {} resources", released.len());
        }
        self.phase = Phase::Released;
    }

    fn builder(&mut self, operation: &'static str) -> Result<&mut BuilderHandle, StableSetError> {
        let phase = self.phase;
        self.ledger
            .builder_mut()
            .ok_or(StableSetError::InvalidState { operation, phase })
    }
}

#[cfg(test)]
mod tests;

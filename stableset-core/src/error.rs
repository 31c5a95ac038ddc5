//! Error taxonomy shared by the builder, the invoker and the C boundary.

use thiserror::Error;

use crate::{Phase, Strategy, VertexId};

/// Errors returned by every fallible operation in the engine.
///
/// Keep this type small: it crosses every layer and the workspace enables
/// `clippy::result_large_err`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StableSetError {
    /// Malformed input such as a negative weight or a self-loop.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ArgumentError),
    /// A referenced vertex does not exist.
    #[error("vertex {vertex} does not exist (the graph has {len} vertices)")]
    NotFound {
        /// The id as supplied by the caller.
        vertex: i64,
        /// Number of vertices at the time of the call.
        len: usize,
    },
    /// The edge is already present and the policy was `Reject`.
    #[error("edge ({u}, {v}) already exists")]
    AlreadyExists {
        /// First endpoint.
        u: VertexId,
        /// Second endpoint.
        v: VertexId,
    },
    /// The operation is not valid in the current lifecycle phase.
    #[error("cannot {operation} while {phase}")]
    InvalidState {
        /// Name of the rejected operation.
        operation: &'static str,
        /// Phase the chain was in.
        phase: Phase,
    },
    /// Allocation failed at the boundary.
    #[error("resource exhausted while allocating {what}")]
    ResourceExhausted {
        /// What was being allocated.
        what: &'static str,
    },
    /// The boundary returned an internally inconsistent result.
    #[error("boundary protocol violated: {0}")]
    ProtocolViolation(#[from] ProtocolError),
    /// The external engine itself reported a failure.
    #[error("external solver failed: {0}")]
    ExternalSolverFailure(#[from] EngineError),
}

/// Fieldless classification of [`StableSetError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`StableSetError::InvalidArgument`].
    InvalidArgument,
    /// See [`StableSetError::NotFound`].
    NotFound,
    /// See [`StableSetError::AlreadyExists`].
    AlreadyExists,
    /// See [`StableSetError::InvalidState`].
    InvalidState,
    /// See [`StableSetError::ResourceExhausted`].
    ResourceExhausted,
    /// See [`StableSetError::ProtocolViolation`].
    ProtocolViolation,
    /// See [`StableSetError::ExternalSolverFailure`].
    ExternalSolverFailure,
}

impl StableSetError {
    /// Classify the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::ResourceExhausted { .. } => ErrorKind::ResourceExhausted,
            Self::ProtocolViolation(_) => ErrorKind::ProtocolViolation,
            Self::ExternalSolverFailure(_) => ErrorKind::ExternalSolverFailure,
        }
    }

    pub(crate) const fn invalid_state(operation: &'static str, phase: Phase) -> Self {
        Self::InvalidState { operation, phase }
    }
}

/// Detail for [`StableSetError::InvalidArgument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// A vertex count was negative.
    #[error("vertex count must be non-negative, got {0}")]
    NegativeCount(i64),
    /// A vertex weight was negative.
    #[error("vertex weight must be non-negative, got {0}")]
    NegativeWeight(i64),
    /// Both endpoints of an edge were the same vertex.
    #[error("self-loop on vertex {0} cannot appear in a stable set instance")]
    SelfLoop(VertexId),
    /// The duplicate policy selector was not 0, 1 or 2.
    #[error("unknown duplicate policy {0}")]
    UnknownDuplicatePolicy(i32),
    /// The graph would exceed the id range of the boundary.
    #[error("graph cannot hold more than {max} vertices")]
    TooManyVertices {
        /// Largest representable vertex count.
        max: usize,
    },
    /// A required output location was null.
    #[error("output location for {0} is null")]
    NullOutput(&'static str),
}

/// Detail for [`StableSetError::ProtocolViolation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// The reported vertex count was negative.
    #[error("negative vertex count {0}")]
    NegativeCount(i32),
    /// A non-zero count came with a null buffer.
    #[error("{count} vertices reported without a buffer")]
    CountWithoutBuffer {
        /// Reported count.
        count: i32,
    },
    /// A buffer came with a zero count.
    #[error("buffer supplied for an empty vertex set")]
    BufferWithoutCount,
    /// An infeasible result carried vertices.
    #[error("infeasible result carried {count} vertices")]
    InfeasibleWithVertices {
        /// Reported count.
        count: usize,
    },
    /// A negative entry was found inside the counted range.
    #[error("negative vertex id {value} at position {position}")]
    NegativeVertex {
        /// Position within the buffer.
        position: usize,
        /// Offending value.
        value: i32,
    },
    /// A vertex id outside the instance was returned.
    #[error("vertex {vertex} is outside an instance of {len} vertices")]
    VertexOutOfRange {
        /// Offending id.
        vertex: VertexId,
        /// Number of vertices in the instance.
        len: usize,
    },
    /// The same vertex appeared twice.
    #[error("vertex {0} returned more than once")]
    DuplicateVertex(VertexId),
    /// Two returned vertices are adjacent.
    #[error("returned vertices {u} and {v} are adjacent")]
    NotStable {
        /// First endpoint.
        u: VertexId,
        /// Second endpoint.
        v: VertexId,
    },
    /// The solve time was negative or not a number.
    #[error("solve time is not a non-negative duration")]
    InvalidSolveTime,
}

/// Failure reported by an external engine, as opposed to an infeasible
/// result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The engine does not implement the requested strategy.
    #[error("strategy {0} is not supported")]
    UnsupportedStrategy(Strategy),
    /// The engine panicked while solving.
    #[error("engine panicked")]
    Panicked,
    /// Any other engine-specific failure.
    #[error("{0}")]
    Failed(String),
}

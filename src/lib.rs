//! Facade crate for the stable set engine.
//!
//! This crate re-exports the core lifecycle types and exposes the native
//! engine and the C boundary behind feature flags.

#![forbid(unsafe_code)]

pub use stableset_core::{
    ArgumentError, DEFAULT_WEIGHT, DuplicatePolicy, EdgeInsertion, EngineError, EngineOutput,
    ErrorKind, GraphBuilder, Instance, Objective, Phase, ProtocolError, SolveResult, SolverConfig,
    StableSetEngine, StableSetError, Strategy, VertexId, Weight, solve,
};

#[cfg(feature = "solver-native")]
pub use stableset_solver_native::{NativeEngine, NativeEngineConfig};

#[cfg(feature = "ffi")]
pub use stableset_ffi::{
    BuilderHandle, InstanceHandle, Resource, ResourceLedger, ResultBuffer, StableSolver,
    StableSolverResult,
};

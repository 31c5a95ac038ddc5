//! Core domain types for the stable set engine.
//!
//! A caller accumulates vertices, weights and edges in a [`GraphBuilder`],
//! freezes it once into an immutable [`Instance`], and hands the instance to
//! an external [`StableSetEngine`] through [`solve`]. The invoker times the
//! call, verifies the engine's output and returns an owned [`SolveResult`].
//!
//! Constructors and mutators return `Result` so malformed input, lifecycle
//! misuse and misbehaving engines surface early as a [`StableSetError`].
//!
//! # Examples
//!
//! ```
//! use stableset_core::{DuplicatePolicy, GraphBuilder, VertexId};
//!
//! # fn main() -> Result<(), stableset_core::StableSetError> {
//! let mut builder = GraphBuilder::new();
//! builder.add_vertices(3)?;
//! builder.add_edge(VertexId::new(0), VertexId::new(1), DuplicatePolicy::Reject)?;
//! let instance = builder.build()?;
//! assert_eq!(instance.number_of_vertices(), 3);
//! assert!(instance.are_adjacent(VertexId::new(1), VertexId::new(0)));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod config;
mod error;
mod instance;
mod lifecycle;
mod policy;
mod result;
mod solver;
mod strategy;
mod vertex;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use builder::{EdgeInsertion, GraphBuilder};
pub use config::SolverConfig;
pub use error::{ArgumentError, EngineError, ErrorKind, ProtocolError, StableSetError};
pub use instance::Instance;
pub use lifecycle::Phase;
pub use policy::DuplicatePolicy;
pub use result::SolveResult;
pub use solver::{EngineOutput, StableSetEngine, solve};
pub use strategy::Strategy;
pub use vertex::{DEFAULT_WEIGHT, Objective, VertexId, Weight};

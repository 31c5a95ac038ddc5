//! C boundary for the stable set engine.
//!
//! The crate builds as a `cdylib` exporting the functions declared in
//! `include/stableset.h`: a builder is created, filled and frozen into an
//! instance, the instance is solved into a [`StableSolverResult`], and every
//! handle and buffer is handed back through the cleanup calls. Handles are
//! opaque tokens into process-wide registries, so releasing twice or
//! releasing a foreign handle is a harmless no-op, and panics never unwind
//! into the caller.
//!
//! Rust hosts use the same boundary through owned wrappers:
//! [`BuilderHandle`], [`InstanceHandle`] and [`ResultBuffer`] release their
//! resource exactly once, [`ResourceLedger`] sequences the releases of one
//! chain, and [`StableSolver`] wraps the whole lifecycle in one scoped
//! object.
//!
//! # Examples
//!
//! ```
//! use stableset_ffi::abi::{
//!     cleanup, create_instance_builder, instance_add_edge, instance_add_vertex,
//!     instance_build, solve_checked,
//! };
//! use stableset_ffi::{STATUS_OK, StableSolverResult};
//!
//! let builder = create_instance_builder();
//! assert_eq!(instance_add_vertex(builder, 4), STATUS_OK);
//! assert_eq!(instance_add_vertex(builder, 6), STATUS_OK);
//! assert_eq!(instance_add_edge(builder, 0, 1, 0), STATUS_OK);
//! let instance = instance_build(builder);
//!
//! let mut result = StableSolverResult::EMPTY;
//! let status = unsafe { solve_checked(instance, 1, &raw mut result) };
//! assert_eq!(status, STATUS_OK);
//! assert_eq!(result.number_of_vertices, 1);
//!
//! cleanup(builder, instance, result);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod abi;
mod handle;
mod ledger;
mod raw;
mod registry;
mod status;

pub use abi::{last_error_message, take_last_error};
pub use handle::StableSolver;
pub use ledger::{BuilderHandle, InstanceHandle, Resource, ResourceLedger, ResultBuffer};
pub use raw::StableSolverResult;
pub use status::{
    STATUS_ALREADY_EXISTS, STATUS_EXTERNAL_SOLVER_FAILURE, STATUS_INVALID_ARGUMENT,
    STATUS_INVALID_STATE, STATUS_NOT_FOUND, STATUS_OK, STATUS_PANIC, STATUS_PROTOCOL_VIOLATION,
    STATUS_RESOURCE_EXHAUSTED, Status, kind_for, stableset_status_message, status_for,
    status_message,
};

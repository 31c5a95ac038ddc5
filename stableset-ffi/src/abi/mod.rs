//! The exported C functions.
//!
//! Handles are opaque tokens into process-wide registries and are never
//! dereferenced. Every function runs its body under `catch_unwind`, records
//! the structured error of a failed call for [`take_last_error`] and
//! [`last_error_message`], and reports the outcome as a status code, a null
//! handle or an all-zero result, as its signature allows.

mod last_error;

use std::ffi::{c_int, c_void};
use std::panic::{self, AssertUnwindSafe};
use std::ptr;
use std::sync::{Arc, LazyLock};

use log::{debug, error, trace, warn};
use stableset_core::{
    ArgumentError, DuplicatePolicy, EngineError, GraphBuilder, Phase, StableSetError, Strategy,
    VertexId, Weight,
};
use stableset_solver_native::NativeEngine;

use crate::raw::{self, StableSolverResult};
use crate::registry::{BUILDERS, INSTANCES};
use crate::status::{STATUS_OK, STATUS_PANIC, Status, status_for};

pub use last_error::{last_error_message, take_last_error};

/// Opaque builder handle as seen from C.
pub type InstanceBuilderHandle = *mut c_void;
/// Opaque instance handle as seen from C.
pub type InstanceHandler = *mut c_void;

/// Largest vertex count whose ids still fit the `int` used at the boundary.
pub const MAX_VERTICES: usize = c_int::MAX.unsigned_abs() as usize;

static ENGINE: LazyLock<NativeEngine> = LazyLock::new(NativeEngine::new);

/// Create an empty builder. Returns null if the builder cannot be allocated.
#[unsafe(no_mangle)]
pub extern "C" fn create_instance_builder() -> InstanceBuilderHandle {
    handle_call("create a builder", || BUILDERS.insert(GraphBuilder::new()))
}

/// Append `number_of_vertices` vertices of weight 1.
#[unsafe(no_mangle)]
pub extern "C" fn instance_add_vertices(
    handle: InstanceBuilderHandle,
    number_of_vertices: c_int,
) -> Status {
    status_call("add vertices", || {
        with_builder(handle, "add vertices", |builder| {
            let count = usize::try_from(number_of_vertices)
                .map_err(|_| ArgumentError::NegativeCount(i64::from(number_of_vertices)))?;
            ensure_capacity(builder, count)?;
            builder.add_vertices(count)
        })
    })
}

/// Append one vertex of the given weight. Its id is the previous vertex
/// count, see [`builder_number_of_vertices`].
#[unsafe(no_mangle)]
pub extern "C" fn instance_add_vertex(handle: InstanceBuilderHandle, weight: Weight) -> Status {
    status_call("add a vertex", || {
        with_builder(handle, "add a vertex", |builder| {
            ensure_capacity(builder, 1)?;
            builder.add_vertex(weight).map(drop)
        })
    })
}

/// Overwrite the weight of an existing vertex.
#[unsafe(no_mangle)]
pub extern "C" fn instance_set_weight(
    handle: InstanceBuilderHandle,
    vertex_id: c_int,
    weight: Weight,
) -> Status {
    status_call("set a weight", || {
        with_builder(handle, "set a weight", |builder| {
            let vertex = vertex_arg(builder, vertex_id)?;
            builder.set_weight(vertex, weight)
        })
    })
}

/// Add the edge `{vertex_id_1, vertex_id_2}`. `check_duplicate` is `0` to
/// store duplicates, `1` to skip them and `2` to reject them.
#[unsafe(no_mangle)]
pub extern "C" fn instance_add_edge(
    handle: InstanceBuilderHandle,
    vertex_id_1: c_int,
    vertex_id_2: c_int,
    check_duplicate: c_int,
) -> Status {
    status_call("add an edge", || {
        with_builder(handle, "add an edge", |builder| {
            let policy = DuplicatePolicy::try_from(check_duplicate)?;
            let u = vertex_arg(builder, vertex_id_1)?;
            let v = vertex_arg(builder, vertex_id_2)?;
            builder.add_edge(u, v, policy).map(drop)
        })
    })
}

/// Make every vertex weigh 1. Idempotent.
#[unsafe(no_mangle)]
pub extern "C" fn instance_set_unweighted(handle: InstanceBuilderHandle) -> Status {
    status_call("set unweighted", || {
        with_builder(handle, "set unweighted", GraphBuilder::set_unweighted)
    })
}

/// Number of vertices in the builder, or a negative status.
#[unsafe(no_mangle)]
pub extern "C" fn builder_number_of_vertices(handle: InstanceBuilderHandle) -> c_int {
    count_call("count vertices", || {
        with_builder(handle, "count vertices", |builder| {
            Ok(builder.number_of_vertices())
        })
    })
}

/// Freeze the builder into a new instance. The builder becomes inert but
/// must still be released. Returns null on failure, including a second
/// build.
#[unsafe(no_mangle)]
pub extern "C" fn instance_build(handle: InstanceBuilderHandle) -> InstanceHandler {
    handle_call("build", || {
        let instance = with_builder(handle, "build", GraphBuilder::build)?;
        INSTANCES.insert(Arc::new(instance))
    })
}

/// Number of vertices in the instance, or a negative status.
#[unsafe(no_mangle)]
pub extern "C" fn instance_number_of_vertices(instance: InstanceHandler) -> c_int {
    count_call("count vertices", || {
        let shared = INSTANCES
            .get(instance.addr())
            .ok_or_else(|| released("count vertices"))?;
        Ok(shared.number_of_vertices())
    })
}

/// Solve `instance` with strategy `type_`.
///
/// Returns the all-zero result on any failure, which cannot be told apart
/// from an infeasible solve; prefer [`solve_checked`].
#[unsafe(no_mangle)]
pub extern "C" fn solve(instance: InstanceHandler, type_: c_int) -> StableSolverResult {
    call("solve", || solve_raw(instance, type_)).unwrap_or(StableSolverResult::EMPTY)
}

/// Solve `instance` with strategy `type_`, writing the result to `out`.
///
/// `out` receives the all-zero result whenever the status is not OK.
///
/// # Safety
/// `out` must be null or valid for writing one [`StableSolverResult`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn solve_checked(
    instance: InstanceHandler,
    type_: c_int,
    out: *mut StableSolverResult,
) -> Status {
    let outcome = call("solve", || {
        if out.is_null() {
            return Err(ArgumentError::NullOutput("the solve result").into());
        }
        solve_raw(instance, type_)
    });
    if out.is_null() {
        return outcome.err().unwrap_or(STATUS_OK);
    }
    let (result, status) = match outcome {
        Ok(result) => (result, STATUS_OK),
        Err(status) => (StableSolverResult::EMPTY, status),
    };
    // SAFETY: `out` is non-null and the caller guarantees it is writable.
    unsafe { out.write(result) };
    status
}

/// Release a builder and an instance. Either may be null; unknown and
/// already released handles are ignored.
#[unsafe(no_mangle)]
pub extern "C" fn cleanup_graph(handle: InstanceBuilderHandle, instance: InstanceHandler) {
    absorb("cleanup_graph", || {
        release_instance(instance);
        release_builder(handle);
    });
}

/// Release the vertex buffer of a result. Empty, foreign and already
/// released buffers are ignored.
#[unsafe(no_mangle)]
pub extern "C" fn cleanup_result(result: StableSolverResult) {
    absorb("cleanup_result", || raw::release_buffer(result.vertices));
}

/// Release a result buffer, an instance and a builder, in that order. Any
/// subset may be null or already released.
#[unsafe(no_mangle)]
pub extern "C" fn cleanup(
    handle: InstanceBuilderHandle,
    instance: InstanceHandler,
    result: StableSolverResult,
) {
    absorb("cleanup", || {
        raw::release_buffer(result.vertices);
        release_instance(instance);
        release_builder(handle);
    });
}

fn solve_raw(
    instance: InstanceHandler,
    type_: c_int,
) -> Result<StableSolverResult, StableSetError> {
    let shared = INSTANCES
        .get(instance.addr())
        .ok_or_else(|| released("solve"))?;
    let result = stableset_core::solve(&*ENGINE, &shared, Strategy::from_raw(type_))?;
    StableSolverResult::export(&result)
}

fn with_builder<R>(
    handle: InstanceBuilderHandle,
    operation: &'static str,
    f: impl FnOnce(&mut GraphBuilder) -> Result<R, StableSetError>,
) -> Result<R, StableSetError> {
    BUILDERS
        .with(handle.addr(), f)
        .unwrap_or_else(|| Err(released(operation)))
}

/// Null, unknown and released handles all read as a released chain.
const fn released(operation: &'static str) -> StableSetError {
    StableSetError::InvalidState {
        operation,
        phase: Phase::Released,
    }
}

fn vertex_arg(builder: &GraphBuilder, id: c_int) -> Result<VertexId, StableSetError> {
    usize::try_from(id)
        .map(VertexId::new)
        .map_err(|_| StableSetError::NotFound {
            vertex: i64::from(id),
            len: builder.number_of_vertices(),
        })
}

fn ensure_capacity(builder: &GraphBuilder, extra: usize) -> Result<(), StableSetError> {
    let fits = builder
        .number_of_vertices()
        .checked_add(extra)
        .is_some_and(|total| total <= MAX_VERTICES);
    if fits || !builder.phase().accepts_mutations() {
        Ok(())
    } else {
        Err(ArgumentError::TooManyVertices { max: MAX_VERTICES }.into())
    }
}

fn call<T>(
    operation: &'static str,
    body: impl FnOnce() -> Result<T, StableSetError>,
) -> Result<T, Status> {
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => {
            debug!("{operation} failed: {err}");
            let status = status_for(err.kind());
            last_error::record(err);
            Err(status)
        }
        Err(_) => {
            error!("panic caught at the boundary during {operation}");
            last_error::record(EngineError::Panicked.into());
            Err(STATUS_PANIC)
        }
    }
}

fn status_call(
    operation: &'static str,
    body: impl FnOnce() -> Result<(), StableSetError>,
) -> Status {
    call(operation, body).err().unwrap_or(STATUS_OK)
}

fn count_call(
    operation: &'static str,
    body: impl FnOnce() -> Result<usize, StableSetError>,
) -> c_int {
    call(operation, body).map_or_else(
        |status| status,
        |count| c_int::try_from(count).unwrap_or(c_int::MAX),
    )
}

fn handle_call(
    operation: &'static str,
    body: impl FnOnce() -> Result<usize, StableSetError>,
) -> *mut c_void {
    call(operation, body).map_or_else(|_| ptr::null_mut(), ptr::without_provenance_mut)
}

fn absorb(operation: &'static str, body: impl FnOnce()) {
    if panic::catch_unwind(AssertUnwindSafe(body)).is_err() {
        error!("panic caught at the boundary during {operation}");
    }
}

fn release_builder(handle: InstanceBuilderHandle) {
    if handle.is_null() {
        return;
    }
    if BUILDERS.remove(handle.addr()).is_some() {
        trace!("released builder {:#x}", handle.addr());
    } else {
        warn!("ignoring release of unknown or already released builder");
    }
}

fn release_instance(instance: InstanceHandler) {
    if instance.is_null() {
        return;
    }
    if INSTANCES.remove(instance.addr()).is_some() {
        trace!("released instance {:#x}", instance.addr());
    } else {
        warn!("ignoring release of unknown or already released instance");
    }
}

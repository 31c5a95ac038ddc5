//! Owned handles over the C boundary and the ledger that releases them.
//!
//! Each handle type owns exactly one native resource. Releasing consumes the
//! handle, and dropping an unreleased handle releases it, so a resource can
//! be neither used after release nor released twice.

use std::ffi::c_int;
use std::num::NonZeroUsize;
use std::ptr;

use log::{debug, trace};
use stableset_core::{
    ArgumentError, DuplicatePolicy, EngineError, SolveResult, StableSetError, Strategy, VertexId,
    Weight,
};

use crate::abi::{self, InstanceBuilderHandle, InstanceHandler};
use crate::raw::StableSolverResult;
use crate::status::{STATUS_INVALID_STATE, STATUS_OK, STATUS_RESOURCE_EXHAUSTED, Status};

/// Owned builder created through `create_instance_builder`.
#[derive(Debug)]
pub struct BuilderHandle {
    token: NonZeroUsize,
}

impl BuilderHandle {
    /// Create an empty builder.
    ///
    /// # Errors
    /// `ResourceExhausted` if the builder cannot be allocated.
    pub fn create() -> Result<Self, StableSetError> {
        let raw = abi::create_instance_builder();
        NonZeroUsize::new(raw.addr())
            .map(|token| Self { token })
            .ok_or_else(|| failure(STATUS_RESOURCE_EXHAUSTED))
    }

    /// The raw handle, valid until this value is released.
    #[must_use]
    pub fn as_raw(&self) -> InstanceBuilderHandle {
        ptr::without_provenance_mut(self.token.get())
    }

    /// Number of vertices added so far.
    ///
    /// # Errors
    /// Any failure reported by the boundary.
    pub fn number_of_vertices(&self) -> Result<usize, StableSetError> {
        let count = abi::builder_number_of_vertices(self.as_raw());
        usize::try_from(count).map_err(|_| failure(count))
    }

    /// Append `count` vertices of weight 1.
    ///
    /// # Errors
    /// `InvalidArgument` if the ids would not fit the boundary's `int`;
    /// otherwise as `instance_add_vertices`.
    pub fn add_vertices(&mut self, count: usize) -> Result<(), StableSetError> {
        let boundary_count = c_int::try_from(count).map_err(|_| too_many())?;
        check(abi::instance_add_vertices(self.as_raw(), boundary_count))
    }

    /// Append a vertex and return its id.
    ///
    /// # Errors
    /// As `instance_add_vertex`.
    pub fn add_vertex(&mut self, weight: Weight) -> Result<VertexId, StableSetError> {
        check(abi::instance_add_vertex(self.as_raw(), weight))?;
        let len = self.number_of_vertices()?;
        Ok(VertexId::new(len.saturating_sub(1)))
    }

    /// Overwrite a vertex weight.
    ///
    /// # Errors
    /// As `instance_set_weight`.
    pub fn set_weight(&mut self, vertex: VertexId, weight: Weight) -> Result<(), StableSetError> {
        let id = self.boundary_id(vertex)?;
        check(abi::instance_set_weight(self.as_raw(), id, weight))
    }

    /// Add the edge `{u, v}` under `policy`.
    ///
    /// # Errors
    /// As `instance_add_edge`.
    pub fn add_edge(
        &mut self,
        u: VertexId,
        v: VertexId,
        policy: DuplicatePolicy,
    ) -> Result<(), StableSetError> {
        let u_id = self.boundary_id(u)?;
        let v_id = self.boundary_id(v)?;
        check(abi::instance_add_edge(
            self.as_raw(),
            u_id,
            v_id,
            policy.as_raw(),
        ))
    }

    /// Make every vertex weigh 1.
    ///
    /// # Errors
    /// As `instance_set_unweighted`.
    pub fn set_unweighted(&mut self) -> Result<(), StableSetError> {
        check(abi::instance_set_unweighted(self.as_raw()))
    }

    /// Freeze the builder. The builder stays owned and must still be
    /// released.
    ///
    /// # Errors
    /// `InvalidState` on a second build.
    pub fn build(&mut self) -> Result<InstanceHandle, StableSetError> {
        let raw = abi::instance_build(self.as_raw());
        NonZeroUsize::new(raw.addr())
            .map(|token| InstanceHandle { token })
            .ok_or_else(|| failure(STATUS_INVALID_STATE))
    }

    /// Release the builder now.
    pub fn release(self) {
        drop(self);
    }

    fn boundary_id(&self, vertex: VertexId) -> Result<c_int, StableSetError> {
        c_int::try_from(vertex.get()).map_err(|_| StableSetError::NotFound {
            vertex: i64::try_from(vertex.get()).unwrap_or(i64::MAX),
            len: self.number_of_vertices().unwrap_or_default(),
        })
    }
}

impl Drop for BuilderHandle {
    fn drop(&mut self) {
        abi::cleanup_graph(self.as_raw(), ptr::null_mut());
    }
}

/// Owned instance produced by [`BuilderHandle::build`].
#[derive(Debug)]
pub struct InstanceHandle {
    token: NonZeroUsize,
}

impl InstanceHandle {
    /// The raw handle, valid until this value is released.
    #[must_use]
    pub fn as_raw(&self) -> InstanceHandler {
        ptr::without_provenance_mut(self.token.get())
    }

    /// Number of vertices in the frozen graph.
    ///
    /// # Errors
    /// Any failure reported by the boundary.
    pub fn number_of_vertices(&self) -> Result<usize, StableSetError> {
        let count = abi::instance_number_of_vertices(self.as_raw());
        usize::try_from(count).map_err(|_| failure(count))
    }

    /// Solve with `strategy` through `solve_checked`.
    ///
    /// # Errors
    /// `ExternalSolverFailure` or `ProtocolViolation` when the engine fails;
    /// an infeasible solve is not an error.
    pub fn solve(&self, strategy: Strategy) -> Result<ResultBuffer, StableSetError> {
        let mut layout = StableSolverResult::EMPTY;
        // SAFETY: `layout` is a live local.
        let status =
            unsafe { abi::solve_checked(self.as_raw(), strategy.as_raw(), &raw mut layout) };
        check(status)?;
        Ok(ResultBuffer { raw: layout })
    }

    /// Release the instance now.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for InstanceHandle {
    fn drop(&mut self) {
        abi::cleanup_graph(ptr::null_mut(), self.as_raw());
    }
}

/// Owned result layout whose vertex buffer belongs to the library.
#[derive(Debug)]
pub struct ResultBuffer {
    raw: StableSolverResult,
}

// SAFETY: the buffer behind `raw.vertices` is exclusively owned by this value
// and the release path goes through the synchronised buffer registry.
unsafe impl Send for ResultBuffer {}

impl ResultBuffer {
    /// The raw layout, valid until this value is released.
    #[must_use]
    pub const fn as_raw(&self) -> &StableSolverResult {
        &self.raw
    }

    /// Copy the result into an owned [`SolveResult`].
    ///
    /// # Errors
    /// `ProtocolViolation` if the layout is inconsistent.
    pub fn extract(&self) -> Result<SolveResult, StableSetError> {
        // SAFETY: `raw` came from `solve_checked` and its buffer stays live
        // until `self` is released.
        unsafe { self.raw.extract() }
    }

    /// Release the vertex buffer now.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for ResultBuffer {
    fn drop(&mut self) {
        abi::cleanup_result(self.raw);
    }
}

/// A resource released by [`ResourceLedger::release_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// A result vertex buffer.
    ResultBuffer,
    /// An instance.
    Instance,
    /// A builder.
    Builder,
}

/// Tracks the live builder, instance and result buffer of one chain and
/// releases exactly the live ones, result first and builder last.
///
/// Dropping the ledger releases whatever is still live.
///
/// # Examples
/// ```
/// use stableset_ffi::{BuilderHandle, Resource, ResourceLedger};
///
/// # fn main() -> Result<(), stableset_core::StableSetError> {
/// let mut ledger = ResourceLedger::new();
/// ledger.track_builder(BuilderHandle::create()?);
/// assert_eq!(ledger.release_all(), vec![Resource::Builder]);
/// assert!(ledger.release_all().is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ResourceLedger {
    result: Option<ResultBuffer>,
    instance: Option<InstanceHandle>,
    builder: Option<BuilderHandle>,
}

impl ResourceLedger {
    /// An empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            result: None,
            instance: None,
            builder: None,
        }
    }

    /// Track `builder`, releasing any builder tracked before.
    pub fn track_builder(&mut self, builder: BuilderHandle) {
        self.builder = Some(builder);
    }

    /// Track `instance`, releasing any instance tracked before.
    pub fn track_instance(&mut self, instance: InstanceHandle) {
        self.instance = Some(instance);
    }

    /// Track `result`, releasing any result buffer tracked before.
    pub fn track_result(&mut self, result: ResultBuffer) {
        self.result = Some(result);
    }

    /// The live builder, if any.
    #[must_use]
    pub const fn builder(&self) -> Option<&BuilderHandle> {
        self.builder.as_ref()
    }

    /// The live builder, mutably.
    pub const fn builder_mut(&mut self) -> Option<&mut BuilderHandle> {
        self.builder.as_mut()
    }

    /// The live instance, if any.
    #[must_use]
    pub const fn instance(&self) -> Option<&InstanceHandle> {
        self.instance.as_ref()
    }

    /// The live result buffer, if any.
    #[must_use]
    pub const fn result(&self) -> Option<&ResultBuffer> {
        self.result.as_ref()
    }

    /// Whether nothing is live.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.result.is_none() && self.instance.is_none() && self.builder.is_none()
    }

    /// Release every live resource, result first and builder last, and
    /// report what was released. Calling it again releases nothing.
    pub fn release_all(&mut self) -> Vec<Resource> {
        let mut released = Vec::with_capacity(3);
        if let Some(result) = self.result.take() {
            result.release();
            released.push(Resource::ResultBuffer);
        }
        if let Some(instance) = self.instance.take() {
            instance.release();
            released.push(Resource::Instance);
        }
        if let Some(builder) = self.builder.take() {
            builder.release();
            released.push(Resource::Builder);
        }
        if !released.is_empty() {
            debug!("ledger released {released:?}");
        }
        released
    }
}

impl Drop for ResourceLedger {
    fn drop(&mut self) {
        let released = self.release_all();
        trace!("ledger dropped after releasing {} resources", released.len());
    }
}

/// Turn a status into a `Result`, recovering the structured error recorded
/// by the failing call.
pub(crate) fn check(status: Status) -> Result<(), StableSetError> {
    if status == STATUS_OK {
        Ok(())
    } else {
        Err(failure(status))
    }
}

fn failure(status: Status) -> StableSetError {
    abi::take_last_error().unwrap_or_else(|| {
        EngineError::Failed(format!("boundary call failed with status {status}")).into()
    })
}

fn too_many() -> StableSetError {
    ArgumentError::TooManyVertices {
        max: abi::MAX_VERTICES,
    }
    .into()
}

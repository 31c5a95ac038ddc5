//! The raw result layout shared with C and its safe conversion.

use std::ffi::{c_double, c_int};
use std::ptr;
use std::time::Duration;

use log::{trace, warn};
use stableset_core::{ArgumentError, ProtocolError, SolveResult, StableSetError, VertexId};

use crate::abi::MAX_VERTICES;
use crate::registry::BUFFERS;

/// Result of a solve as laid out for C callers.
///
/// `number_of_vertices` is authoritative: exactly that many ids are readable
/// through `vertices`. A non-empty buffer is owned by the library and must be
/// handed back through `cleanup_result` or `cleanup`. An empty result carries
/// a null `vertices` pointer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StableSolverResult {
    /// `1` if a stable set was found, `0` otherwise.
    pub is_feasible: c_int,
    /// Number of ids in `vertices`.
    pub number_of_vertices: c_int,
    /// Selected vertex ids, or null when empty.
    pub vertices: *mut c_int,
    /// Elapsed solve time in seconds.
    pub solve_time: c_double,
}

impl StableSolverResult {
    /// The all-zero result, also returned by `solve` on failure.
    pub const EMPTY: Self = Self {
        is_feasible: 0,
        number_of_vertices: 0,
        vertices: ptr::null_mut(),
        solve_time: 0.0,
    };

    /// Whether the feasibility flag is set.
    #[must_use]
    pub const fn is_feasible(&self) -> bool {
        self.is_feasible != 0
    }

    /// Lay `result` out for C, moving its ids into a library-owned buffer.
    ///
    /// # Errors
    /// `InvalidArgument` if the set does not fit the `int` count;
    /// `ResourceExhausted` if the buffer cannot be allocated or registered.
    pub(crate) fn export(result: &SolveResult) -> Result<Self, StableSetError> {
        let ids = result
            .vertices()
            .iter()
            .map(|&v| c_int::try_from(v.get()))
            .collect::<Result<Vec<c_int>, _>>()
            .map_err(|_| too_many())?;
        let number_of_vertices = c_int::try_from(ids.len()).map_err(|_| too_many())?;
        let vertices = if ids.is_empty() {
            ptr::null_mut()
        } else {
            let len = ids.len();
            let raw = Box::into_raw(ids.into_boxed_slice()).cast::<c_int>();
            if let Err(err) = BUFFERS.insert_at(raw.addr(), len) {
                // SAFETY: `raw` came from `Box::into_raw` above with length
                // `len` and was never shared.
                drop(unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(raw, len)) });
                return Err(err);
            }
            raw
        };
        Ok(Self {
            is_feasible: c_int::from(result.is_feasible()),
            number_of_vertices,
            vertices,
            solve_time: result.solve_time().as_secs_f64(),
        })
    }

    /// Copy the counted ids into an owned [`SolveResult`].
    ///
    /// The count is consulted before the pointer and no sentinel is ever
    /// scanned for. The buffer is left untouched and still has to be
    /// released.
    ///
    /// # Errors
    /// `ProtocolViolation` when the count and pointer disagree, the count or
    /// an id is negative, an infeasible result carries ids, or the time is
    /// not a non-negative number.
    ///
    /// # Safety
    /// If `vertices` is non-null it must point to at least
    /// `number_of_vertices` readable, initialised `int`s that stay valid for
    /// the duration of the call.
    pub unsafe fn extract(&self) -> Result<SolveResult, StableSetError> {
        let count = usize::try_from(self.number_of_vertices)
            .map_err(|_| ProtocolError::NegativeCount(self.number_of_vertices))?;
        let raw: &[c_int] = match (count, self.vertices.is_null()) {
            (0, true) => &[],
            (0, false) => return Err(ProtocolError::BufferWithoutCount.into()),
            (_, true) => {
                return Err(ProtocolError::CountWithoutBuffer {
                    count: self.number_of_vertices,
                }
                .into());
            }
            // SAFETY: the caller guarantees `count` readable ints.
            (_, false) => unsafe { std::slice::from_raw_parts(self.vertices, count) },
        };
        if !self.is_feasible() && !raw.is_empty() {
            return Err(ProtocolError::InfeasibleWithVertices { count }.into());
        }
        let vertices = raw
            .iter()
            .enumerate()
            .map(|(position, &value)| {
                usize::try_from(value)
                    .map(VertexId::new)
                    .map_err(|_| ProtocolError::NegativeVertex { position, value })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let solve_time = Duration::try_from_secs_f64(self.solve_time)
            .map_err(|_| ProtocolError::InvalidSolveTime)?;
        Ok(if self.is_feasible() {
            SolveResult::feasible(vertices, solve_time)
        } else {
            SolveResult::infeasible(solve_time)
        })
    }
}

/// Free a buffer produced by [`StableSolverResult::export`]. Null, unknown and
/// already released buffers are ignored.
pub(crate) fn release_buffer(vertices: *mut c_int) {
    if vertices.is_null() {
        return;
    }
    let Some(len) = BUFFERS.remove(vertices.addr()) else {
        warn!("ignoring release of unknown or already released result buffer");
        return;
    };
    // SAFETY: the registry entry proves `vertices` was produced by
    // `Box::into_raw` on a slice of `len` ints and has not been freed.
    drop(unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(vertices, len)) });
    trace!("released result buffer of {len} vertices");
}

fn too_many() -> StableSetError {
    ArgumentError::TooManyVertices { max: MAX_VERTICES }.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn raw(
        is_feasible: c_int,
        count: c_int,
        vertices: *mut c_int,
        time: f64,
    ) -> StableSolverResult {
        StableSolverResult {
            is_feasible,
            number_of_vertices: count,
            vertices,
            solve_time: time,
        }
    }

    #[rstest]
    fn export_then_extract_preserves_the_set() {
        let result = SolveResult::feasible(
            vec![VertexId::new(3), VertexId::new(0)],
            Duration::from_millis(250),
        );
        let exported = StableSolverResult::export(&result).expect("export should succeed");
        // SAFETY: `exported` was produced by `export` and is still live.
        let extracted = unsafe { exported.extract() }.expect("extract should succeed");
        release_buffer(exported.vertices);
        assert_eq!(extracted, result);
    }

    #[rstest]
    fn empty_results_carry_no_buffer() {
        let empty = SolveResult::feasible(Vec::new(), Duration::ZERO);
        let exported = StableSolverResult::export(&empty).expect("export should succeed");
        assert!(exported.vertices.is_null());
        assert_eq!(exported.number_of_vertices, 0);
        assert!(exported.is_feasible());
    }

    #[rstest]
    fn releasing_twice_is_a_no_op() {
        let result = SolveResult::feasible(vec![VertexId::new(1)], Duration::ZERO);
        let exported = StableSolverResult::export(&result).expect("export should succeed");
        release_buffer(exported.vertices);
        release_buffer(exported.vertices);
        assert!(!BUFFERS.contains(exported.vertices.addr()));
    }

    #[rstest]
    fn foreign_buffers_are_never_freed() {
        let mut local = [1, 2];
        release_buffer(local.as_mut_ptr());
        assert_eq!(local, [1, 2]);
    }

    #[rstest]
    #[case(raw(1, -1, ptr::null_mut(), 0.0), ProtocolError::NegativeCount(-1))]
    #[case(raw(1, 2, ptr::null_mut(), 0.0), ProtocolError::CountWithoutBuffer { count: 2 })]
    #[case(raw(1, 0, ptr::NonNull::dangling().as_ptr(), 0.0), ProtocolError::BufferWithoutCount)]
    #[case(raw(1, 0, ptr::null_mut(), -1.0), ProtocolError::InvalidSolveTime)]
    #[case(raw(1, 0, ptr::null_mut(), f64::NAN), ProtocolError::InvalidSolveTime)]
    fn inconsistent_layouts_are_protocol_violations(
        #[case] layout: StableSolverResult,
        #[case] expected: ProtocolError,
    ) {
        // SAFETY: no case both reports a positive count and a non-null
        // pointer, so nothing is read.
        let err = unsafe { layout.extract() }.expect_err("layout should be rejected");
        assert_eq!(err, StableSetError::ProtocolViolation(expected));
    }

    #[rstest]
    fn counted_range_is_read_without_sentinel_scanning() {
        // The trailing -1 lies outside the counted range and must be ignored.
        let mut buffer = [4, 7, -1];
        let layout = raw(1, 2, buffer.as_mut_ptr(), 0.5);
        // SAFETY: `buffer` holds at least two ints.
        let result = unsafe { layout.extract() }.expect("extract should succeed");
        assert_eq!(result.vertices(), &[VertexId::new(4), VertexId::new(7)]);
    }

    #[rstest]
    fn negative_ids_inside_the_count_are_rejected() {
        let mut buffer = [4, -1];
        let layout = raw(1, 2, buffer.as_mut_ptr(), 0.0);
        // SAFETY: `buffer` holds two ints.
        let err = unsafe { layout.extract() }.expect_err("layout should be rejected");
        assert_eq!(
            err,
            StableSetError::ProtocolViolation(ProtocolError::NegativeVertex {
                position: 1,
                value: -1
            })
        );
    }

    #[rstest]
    fn infeasible_results_must_be_empty() {
        let mut buffer = [0];
        let layout = raw(0, 1, buffer.as_mut_ptr(), 0.0);
        // SAFETY: `buffer` holds one int.
        let err = unsafe { layout.extract() }.expect_err("layout should be rejected");
        assert_eq!(
            err,
            StableSetError::ProtocolViolation(ProtocolError::InfeasibleWithVertices { count: 1 })
        );
    }
}

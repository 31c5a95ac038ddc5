//! Integer status codes returned across the C boundary.

use std::ffi::{CStr, c_char, c_int};

use stableset_core::ErrorKind;

/// Status code returned by every fallible exported function.
pub type Status = c_int;

/// The call succeeded.
pub const STATUS_OK: Status = 0;
/// Malformed input such as a negative count, a negative weight or a
/// self-loop.
pub const STATUS_INVALID_ARGUMENT: Status = -1;
/// A referenced vertex does not exist.
pub const STATUS_NOT_FOUND: Status = -2;
/// Duplicate edge under the reject policy.
pub const STATUS_ALREADY_EXISTS: Status = -3;
/// Wrong lifecycle phase, or a null, unknown or released handle.
pub const STATUS_INVALID_STATE: Status = -4;
/// Allocation failed.
pub const STATUS_RESOURCE_EXHAUSTED: Status = -5;
/// The engine returned an inconsistent result.
pub const STATUS_PROTOCOL_VIOLATION: Status = -6;
/// The engine itself failed.
pub const STATUS_EXTERNAL_SOLVER_FAILURE: Status = -7;
/// A panic was caught at the boundary.
pub const STATUS_PANIC: Status = -100;

/// Status code for an error class.
#[must_use]
pub const fn status_for(kind: ErrorKind) -> Status {
    match kind {
        ErrorKind::InvalidArgument => STATUS_INVALID_ARGUMENT,
        ErrorKind::NotFound => STATUS_NOT_FOUND,
        ErrorKind::AlreadyExists => STATUS_ALREADY_EXISTS,
        ErrorKind::InvalidState => STATUS_INVALID_STATE,
        ErrorKind::ResourceExhausted => STATUS_RESOURCE_EXHAUSTED,
        ErrorKind::ProtocolViolation => STATUS_PROTOCOL_VIOLATION,
        ErrorKind::ExternalSolverFailure => STATUS_EXTERNAL_SOLVER_FAILURE,
    }
}

/// Error class for a non-OK status. A caught panic is an engine failure;
/// `STATUS_OK` and unknown codes map to `None`.
#[must_use]
pub const fn kind_for(status: Status) -> Option<ErrorKind> {
    match status {
        STATUS_INVALID_ARGUMENT => Some(ErrorKind::InvalidArgument),
        STATUS_NOT_FOUND => Some(ErrorKind::NotFound),
        STATUS_ALREADY_EXISTS => Some(ErrorKind::AlreadyExists),
        STATUS_INVALID_STATE => Some(ErrorKind::InvalidState),
        STATUS_RESOURCE_EXHAUSTED => Some(ErrorKind::ResourceExhausted),
        STATUS_PROTOCOL_VIOLATION => Some(ErrorKind::ProtocolViolation),
        STATUS_EXTERNAL_SOLVER_FAILURE | STATUS_PANIC => Some(ErrorKind::ExternalSolverFailure),
        _ => None,
    }
}

/// Static description of a status code.
#[must_use]
pub const fn status_message(status: Status) -> &'static CStr {
    match status {
        STATUS_OK => c"success",
        STATUS_INVALID_ARGUMENT => c"invalid argument",
        STATUS_NOT_FOUND => c"vertex not found",
        STATUS_ALREADY_EXISTS => c"edge already exists",
        STATUS_INVALID_STATE => c"invalid lifecycle state or handle",
        STATUS_RESOURCE_EXHAUSTED => c"resource exhausted",
        STATUS_PROTOCOL_VIOLATION => c"engine protocol violation",
        STATUS_EXTERNAL_SOLVER_FAILURE => c"external solver failure",
        STATUS_PANIC => c"panic caught at the boundary",
        _ => c"unknown status",
    }
}

/// Static, NUL-terminated description of `status`. The pointer is valid
/// for the lifetime of the library and must not be freed.
#[unsafe(no_mangle)]
pub extern "C" fn stableset_status_message(status: Status) -> *const c_char {
    status_message(status).as_ptr()
}

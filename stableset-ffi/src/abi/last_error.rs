//! Per-thread record of the most recent boundary failure.

use std::cell::RefCell;
use std::ffi::c_char;
use std::ptr;

use stableset_core::StableSetError;

thread_local! {
    static LAST_ERROR: RefCell<Option<StableSetError>> = const { RefCell::new(None) };
}

pub(crate) fn record(err: StableSetError) {
    LAST_ERROR.set(Some(err));
}

/// Take the structured error behind the calling thread's most recent
/// non-OK status, leaving nothing recorded.
#[must_use]
pub fn take_last_error() -> Option<StableSetError> {
    LAST_ERROR.take()
}

/// Copy the calling thread's most recent error message into `buffer` as a
/// NUL-terminated string, truncating to `capacity - 1` bytes.
///
/// Returns the full message length in bytes, excluding the terminator, so a
/// caller can retry with a larger buffer; `0` means nothing is recorded.
/// A null `buffer` or zero `capacity` only reports the length. The record is
/// kept.
///
/// # Safety
/// A non-null `buffer` must be valid for writes of `capacity` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn last_error_message(buffer: *mut c_char, capacity: usize) -> usize {
    let message = LAST_ERROR
        .with_borrow(|last| last.as_ref().map(ToString::to_string))
        .unwrap_or_default();
    let bytes = message.as_bytes();
    if buffer.is_null() || capacity == 0 {
        return bytes.len();
    }
    let copied = bytes.len().min(capacity.saturating_sub(1));
    // SAFETY: the caller guarantees `capacity` writable bytes and
    // `copied < capacity`, leaving room for the terminator.
    unsafe {
        ptr::copy_nonoverlapping(bytes.as_ptr().cast::<c_char>(), buffer, copied);
        buffer.add(copied).write(0);
    }
    bytes.len()
}

#![cfg(unix)]

//! POSIX file-descriptor guards.
//!
//! [`CloseFd`] configures the core owner for file descriptors: `close(2)` as
//! the release operation, `-1` as the sentinel, and "non-negative" as the
//! liveness predicate — descriptor `0` is stdin and perfectly live, while
//! any negative value is dead whether or not it equals the sentinel. Failed
//! cleanup closes are reported at debug level through `tracing` instead of
//! being dropped on the floor.
//!
//! The acquisition helpers ([`dup`], [`pipe`]) return descriptors already
//! wrapped in [`ScopedFd`] guards, so there is no window in which a raw
//! descriptor can leak past an early return.
//!
//! # Example
//!
//! ```
//! let (read_end, write_end) = clasp_fd::pipe().expect("pipe(2)");
//! assert!(read_end.is_valid());
//! assert!(write_end.is_valid());
//! // Both ends close when the guards drop.
//! ```

use std::io;

use clasp_core::{ClosePolicy, Scoped};
use libc::c_int;

/// Close policy for POSIX file descriptors.
///
/// Bound to `close(2)` with sentinel `-1`. Any negative descriptor fails the
/// liveness predicate, so guards never pass garbage values to the kernel.
pub struct CloseFd;

// SAFETY: `close(2)` accepts any `c_int`; an already-closed or nonsense
// descriptor fails with `EBADF` rather than invoking undefined behavior.
unsafe impl ClosePolicy for CloseFd {
    type Close = unsafe extern "C" fn(c_int) -> c_int;

    const CLOSE: Self::Close = libc::close;
    const SENTINEL: c_int = -1;

    fn is_live(fd: &c_int) -> bool {
        *fd >= 0
    }

    fn discarded(fd: c_int, rc: c_int) {
        if rc != 0 {
            tracing::debug!(fd, rc, "close(2) failed during cleanup");
        }
    }
}

/// A file descriptor owned by a scope.
pub type ScopedFd = Scoped<CloseFd>;

/// Errors from the descriptor acquisition helpers.
#[derive(Debug, thiserror::Error)]
pub enum FdError {
    /// `dup(2)` failed.
    #[error("dup(2) failed: {0}")]
    Dup(#[source] io::Error),

    /// `pipe(2)` failed.
    #[error("pipe(2) failed: {0}")]
    Pipe(#[source] io::Error),
}

/// Duplicates the descriptor held by `fd` into a new guard.
///
/// The duplicate shares the open file description but is a distinct
/// descriptor with its own owner; the two guards release independently.
///
/// # Errors
///
/// Returns [`FdError::Dup`] when `dup(2)` reports a failure (including when
/// `fd` is an Empty guard, since the kernel rejects its sentinel).
pub fn dup(fd: &ScopedFd) -> Result<ScopedFd, FdError> {
    // SAFETY: `dup(2)` accepts any descriptor value and reports failures
    // through its return value.
    let duplicate = unsafe { libc::dup(fd.get()) };
    if duplicate < 0 {
        return Err(FdError::Dup(io::Error::last_os_error()));
    }
    Ok(ScopedFd::new(duplicate))
}

/// Creates a pipe and returns its (read, write) ends as owned guards.
///
/// # Errors
///
/// Returns [`FdError::Pipe`] when `pipe(2)` reports a failure.
pub fn pipe() -> Result<(ScopedFd, ScopedFd), FdError> {
    let mut ends: [c_int; 2] = [-1; 2];
    // SAFETY: `ends` is a valid two-element buffer for `pipe(2)` to fill.
    let rc = unsafe { libc::pipe(ends.as_mut_ptr()) };
    if rc != 0 {
        return Err(FdError::Pipe(io::Error::last_os_error()));
    }
    Ok((ScopedFd::new(ends[0]), ScopedFd::new(ends[1])))
}

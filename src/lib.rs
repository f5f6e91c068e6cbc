//! Scoped, move-only ownership for raw OS handles.
//!
//! Configure a [`ClosePolicy`] once per handle domain — release operation
//! plus sentinel — and let [`Scoped`] guarantee the release runs exactly
//! once on every scope exit. See `clasp_core` for the primitives and
//! [`fd`] for the POSIX file-descriptor adapter.

pub use clasp_core::*;

/// POSIX file-descriptor guards.
#[cfg(unix)]
pub use clasp_fd as fd;

/// Re-export of the common types for easy access.
pub mod prelude {
    pub use clasp_core::prelude::*;

    #[cfg(unix)]
    pub use clasp_fd::{CloseFd, ScopedFd};
}

//! Scoped ownership primitives for raw handles.
//!
//! Pairing every acquire with exactly one release across early returns and
//! unwinding is the error-prone part of working with raw OS handles. This
//! crate centralizes that bookkeeping: a [`ClosePolicy`] names the release
//! operation and the sentinel "no resource" value once per handle domain,
//! and [`Scoped`] guarantees the release operation runs exactly once for
//! every handle it owns, on every exit path.
//!
//! - [`signature`] - release-operation shapes and the handle/result resolver
//! - [`policy`] - compile-time configuration: release operation, sentinel,
//!   liveness predicate, diagnostics hook
//! - [`scoped`] - the move-only owner
//!
//! # Example
//!
//! ```
//! use clasp_core::{ClosePolicy, Scoped};
//!
//! fn release(slot: u32) -> bool { slot != 0 }
//!
//! struct SlotPolicy;
//!
//! // SAFETY: `release` is a safe function and accepts every `u32`.
//! unsafe impl ClosePolicy for SlotPolicy {
//!     type Close = fn(u32) -> bool;
//!
//!     const CLOSE: Self::Close = release;
//!     const SENTINEL: u32 = 0;
//! }
//!
//! fn use_slot() -> u32 {
//!     let slot = Scoped::<SlotPolicy>::new(7);
//!     if slot.get() > 5 {
//!         return slot.get(); // `release(7)` runs here
//!     }
//!     slot.get() // ... or here
//! }
//!
//! assert_eq!(use_slot(), 7);
//! ```

/// Compile-time owner configuration.
pub mod policy;

/// The move-only scoped owner.
pub mod scoped;

/// Release-operation shapes and the handle/result resolver.
pub mod signature;

pub use policy::{ClosePolicy, HandleOf, OutputOf};
pub use scoped::Scoped;
pub use signature::CloseFn;

/// Re-export of the common types for easy access.
pub mod prelude {
    pub use crate::policy::{ClosePolicy, HandleOf, OutputOf};
    pub use crate::scoped::Scoped;
    pub use crate::signature::CloseFn;
}

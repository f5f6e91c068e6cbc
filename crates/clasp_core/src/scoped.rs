//! The scoped owner.
//!
//! [`Scoped`] wraps exactly one raw handle and guarantees its release
//! operation runs exactly once, automatically, however the owning scope ends
//! — normal return, early return, or unwinding. It is a bookkeeping layer
//! only: it performs no retries, introduces no failures of its own, and
//! never validates the handles callers store into it.
//!
//! # State machine
//!
//! An owner is always in exactly one of two states:
//!
//! - **Empty** — holds the policy's sentinel; dropping releases nothing.
//! - **Owning(h)** — holds a non-sentinel handle `h`; dropping, [`reset`],
//!   and [`clear`] release `h` (unless the policy's liveness predicate
//!   rejects it), while [`detach`] hands `h` back without releasing.
//!
//! [`reset`]: Scoped::reset
//! [`clear`]: Scoped::clear
//! [`detach`]: Scoped::detach
//!
//! # Ownership transfer
//!
//! Owners are move-only. Assigning into an existing owner drops its previous
//! value first, which releases the previously held handle; the source is
//! consumed by the move and can no longer be touched. There is no `Clone`:
//! two owners releasing the same handle value would defeat the
//! release-exactly-once guarantee.
//!
//! ```compile_fail
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
//! fn consume(owner: Scoped<SlotPolicy>) {}
//!
//! let owner = Scoped::<SlotPolicy>::new(7);
//! consume(owner);
//! consume(owner); // owners move; there is no second copy to consume
//! ```

use core::fmt;
use core::mem;

use crate::policy::{ClosePolicy, HandleOf, OutputOf};
use crate::signature::CloseFn;

/// Owns one raw handle and releases it exactly once on scope exit.
///
/// The policy type parameter `P` fixes the release operation, the sentinel,
/// and the liveness predicate at compile time; an owner is exactly one
/// handle wide at runtime.
///
/// # Example
///
/// ```
/// use clasp_core::{ClosePolicy, Scoped};
///
/// fn release(slot: u32) -> bool { slot != 0 }
///
/// struct SlotPolicy;
///
/// // SAFETY: `release` is a safe function and accepts every `u32`.
/// unsafe impl ClosePolicy for SlotPolicy {
///     type Close = fn(u32) -> bool;
///
///     const CLOSE: Self::Close = release;
///     const SENTINEL: u32 = 0;
/// }
///
/// let mut slot = Scoped::<SlotPolicy>::new(7);
/// assert!(slot.is_valid());
/// assert_eq!(slot.get(), 7);
///
/// // Hand the handle back out; the owner is Empty afterwards and the
/// // caller is responsible for releasing `raw`.
/// let raw = slot.detach();
/// assert_eq!(raw, 7);
/// assert!(!slot.is_valid());
/// ```
#[must_use = "dropping an owner releases its handle immediately"]
pub struct Scoped<P: ClosePolicy> {
    handle: HandleOf<P>,
}

impl<P: ClosePolicy> Scoped<P> {
    /// Creates an Empty owner holding the sentinel.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            handle: P::SENTINEL,
        }
    }

    /// Takes ownership of a pre-acquired handle.
    ///
    /// `handle` is stored as-is: it is not compared against the sentinel and
    /// the liveness predicate is not consulted. The caller attests the
    /// handle was acquired correctly; a sentinel or dead value simply
    /// produces an owner that will never release.
    #[must_use]
    pub fn new(handle: HandleOf<P>) -> Self {
        Self { handle }
    }

    /// Returns the stored raw handle value.
    ///
    /// Purely an observer: ownership stays with this owner, and the value is
    /// returned whether or not it is live.
    #[must_use]
    pub fn get(&self) -> HandleOf<P> {
        self.handle
    }

    /// Returns `true` iff the stored handle is non-sentinel and live.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.handle != P::SENTINEL && P::is_live(&self.handle)
    }

    /// Releases the currently owned handle, then stores `handle`.
    ///
    /// The previous handle is released only if it is non-sentinel and live;
    /// its release result goes to the policy's
    /// [`discarded`](ClosePolicy::discarded) hook. The new handle is stored
    /// without being validated or released.
    pub fn reset(&mut self, handle: HandleOf<P>) {
        self.release_current();
        self.handle = handle;
    }

    /// Releases the currently owned handle and becomes Empty.
    pub fn clear(&mut self) {
        self.reset(P::SENTINEL);
    }

    /// Returns the stored handle and becomes Empty WITHOUT releasing.
    ///
    /// Ownership transfers to the caller, who becomes responsible for the
    /// eventual release.
    #[must_use = "the detached handle must be released by the caller"]
    pub fn detach(&mut self) -> HandleOf<P> {
        mem::replace(&mut self.handle, P::SENTINEL)
    }

    /// Invokes the release operation on the stored handle and returns its
    /// result, WITHOUT updating the owner's state.
    ///
    /// This is the low-level escape hatch for callers that need the release
    /// result: the owner still reports the same handle afterwards, and its
    /// automatic cleanup will happily release that handle a second time.
    /// Follow up with [`detach`](Self::detach) (or [`reset`](Self::reset))
    /// to restore consistency.
    ///
    /// # Safety
    ///
    /// The stored handle must be one the release operation is sound to
    /// consume right now — in particular it must not already have been
    /// released, and the caller must prevent the double release that occurs
    /// if the owner is later dropped, `reset`, or `clear`ed while still
    /// reporting this handle.
    pub unsafe fn close(&self) -> OutputOf<P> {
        // SAFETY: the caller upholds this method's contract.
        unsafe { P::CLOSE.invoke(self.handle) }
    }

    /// Releases the stored handle if it is non-sentinel and live.
    fn release_current(&mut self) {
        if self.is_valid() {
            // SAFETY: the policy attests that invoking the release operation
            // once on a stored handle is sound, and every mutation path
            // replaces the handle immediately after this call.
            let output = unsafe { P::CLOSE.invoke(self.handle) };
            P::discarded(self.handle, output);
        }
    }
}

impl<P: ClosePolicy> Default for Scoped<P> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<P: ClosePolicy> Drop for Scoped<P> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Structural comparison against a raw handle value; no ownership implied.
impl<P: ClosePolicy> PartialEq<HandleOf<P>> for Scoped<P> {
    fn eq(&self, other: &HandleOf<P>) -> bool {
        self.handle == *other
    }
}

impl<P: ClosePolicy> fmt::Debug for Scoped<P>
where
    HandleOf<P>: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scoped")
            .field("handle", &self.handle)
            .field("valid", &self.is_valid())
            .finish()
    }
}

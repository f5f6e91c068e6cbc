//! Compile-time owner configuration.
//!
//! A [`ClosePolicy`] fixes, once per handle domain, everything a
//! [`Scoped`](crate::Scoped) owner needs to know: the release operation, the
//! sentinel value meaning "no resource", an optional secondary liveness
//! predicate, and an optional hook for results the automatic release paths
//! would otherwise drop. Owners carry no per-instance configuration — the
//! policy is a zero-sized type parameter, so the whole contract is resolved
//! at compile time.

use crate::signature::CloseFn;

/// The handle type of a policy's release operation.
pub type HandleOf<P> = <<P as ClosePolicy>::Close as CloseFn>::Handle;

/// The result type of a policy's release operation.
pub type OutputOf<P> = <<P as ClosePolicy>::Close as CloseFn>::Output;

/// Compile-time configuration for a family of scoped owners.
///
/// The two required items are the explicit configuration pair: the release
/// operation ([`CLOSE`](Self::CLOSE)) and the sentinel
/// ([`SENTINEL`](Self::SENTINEL)). The operation's handle and result types
/// are derived from its declared shape by [`CloseFn`], so a policy never
/// restates them.
///
/// # Safety
///
/// Implementations attest that invoking [`CLOSE`](Self::CLOSE) once on any
/// handle value a caller stores into an owner of this policy is sound. This
/// is what lets [`Scoped::new`](crate::Scoped::new) stay a safe constructor
/// even when the release operation is a foreign `unsafe` function.
///
/// # Example
///
/// ```
/// use clasp_core::{ClosePolicy, Scoped};
///
/// fn release(slot: u32) -> bool {
///     // Report whether the slot was actually in use.
///     slot != 0
/// }
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
/// let slot = Scoped::<SlotPolicy>::new(7);
/// assert!(slot.is_valid());
/// // Dropping `slot` calls `release(7)` and discards the `bool`.
/// ```
pub unsafe trait ClosePolicy {
    /// The declared shape of the release operation.
    ///
    /// Must be a single-parameter function-pointer type; any other arity has
    /// no [`CloseFn`] implementation and fails to type-check.
    type Close: CloseFn;

    /// The release operation bound to owners of this policy.
    const CLOSE: Self::Close;

    /// The handle value meaning "no resource is held."
    ///
    /// Owners never invoke the release operation on this value.
    const SENTINEL: HandleOf<Self>;

    /// Secondary liveness test applied before an owner releases a handle.
    ///
    /// Some handle representations have values that are dead without being
    /// equal to the sentinel — negative descriptors other than `-1`, or null
    /// pointers where the sentinel is a distinguished non-null value. Owners
    /// treat such handles as not owned: they are stored and observable, but
    /// never released. The default accepts everything; sentinel equality is
    /// always checked separately.
    fn is_live(_handle: &HandleOf<Self>) -> bool {
        true
    }

    /// Receives results the automatic release paths would otherwise drop.
    ///
    /// `reset`, `clear`, and `Drop` invoke the release operation but have
    /// nowhere to surface its result; they hand it here instead. The default
    /// does nothing, keeping cleanup silent. Override to record failed
    /// releases — see `clasp_fd`'s policy for a `tracing`-based hook.
    fn discarded(_handle: HandleOf<Self>, _output: OutputOf<Self>) {}
}

//! Release-operation shapes.
//!
//! [`CloseFn`] is the compile-time bridge between a release operation's
//! declared shape and the types the rest of the crate works with: it exposes
//! the operation's single parameter type as [`Handle`](CloseFn::Handle) and
//! its result type as [`Output`](CloseFn::Output), together with one uniform
//! invocation point.
//!
//! The trait is implemented for function-pointer types of exactly one
//! parameter, in every safety/ABI qualification a release operation shows up
//! with in practice: plain Rust functions, `unsafe` functions, and the
//! `extern "C"` pair used by foreign APIs. On 32-bit x86 Windows, where
//! `extern "system"` is a genuinely distinct ABI, the `extern "system"` pair
//! is covered as well; everywhere else `"system"` is an alias for `"C"` and
//! the `extern "C"` implementations already apply.
//!
//! A shape with any other arity has no implementation, so binding a
//! mis-declared release operation into a policy is rejected while
//! type-checking, never at runtime:
//!
//! ```compile_fail
//! fn resolves<F: clasp_core::CloseFn>() {}
//! resolves::<fn(i32, i32) -> i32>();
//! ```
//!
//! Closures are intentionally not supported. A release operation is bound
//! into a [`ClosePolicy`](crate::ClosePolicy) as an associated `const`, so it
//! must be a pure function *value* with a nameable type; captured state has
//! no place in that contract.

/// A release operation's call shape.
///
/// Implementations exist only for single-parameter function-pointer types;
/// see the [module documentation](self) for the covered qualifications.
pub trait CloseFn: Copy {
    /// The result type of the release operation.
    type Output;

    /// The handle type the release operation consumes.
    type Handle: Copy + PartialEq;

    /// Invokes the release operation on `handle` and returns its result.
    ///
    /// # Safety
    ///
    /// For the `unsafe` function-pointer shapes this forwards the pointee's
    /// own contract: `handle` must be a value the operation is sound to
    /// consume. The safe shapes impose no requirements of their own.
    unsafe fn invoke(self, handle: Self::Handle) -> Self::Output;
}

impl<R, H: Copy + PartialEq> CloseFn for fn(H) -> R {
    type Output = R;
    type Handle = H;

    unsafe fn invoke(self, handle: H) -> R {
        self(handle)
    }
}

impl<R, H: Copy + PartialEq> CloseFn for unsafe fn(H) -> R {
    type Output = R;
    type Handle = H;

    unsafe fn invoke(self, handle: H) -> R {
        // SAFETY: `invoke` carries the pointee's contract; see the trait docs.
        unsafe { self(handle) }
    }
}

impl<R, H: Copy + PartialEq> CloseFn for extern "C" fn(H) -> R {
    type Output = R;
    type Handle = H;

    unsafe fn invoke(self, handle: H) -> R {
        self(handle)
    }
}

impl<R, H: Copy + PartialEq> CloseFn for unsafe extern "C" fn(H) -> R {
    type Output = R;
    type Handle = H;

    unsafe fn invoke(self, handle: H) -> R {
        // SAFETY: `invoke` carries the pointee's contract; see the trait docs.
        unsafe { self(handle) }
    }
}

// `extern "system"` is only a distinct ABI on 32-bit x86 Windows (stdcall);
// on every other target it aliases `extern "C"` and these would be duplicate
// implementations.
#[cfg(all(windows, target_arch = "x86"))]
impl<R, H: Copy + PartialEq> CloseFn for extern "system" fn(H) -> R {
    type Output = R;
    type Handle = H;

    unsafe fn invoke(self, handle: H) -> R {
        self(handle)
    }
}

#[cfg(all(windows, target_arch = "x86"))]
impl<R, H: Copy + PartialEq> CloseFn for unsafe extern "system" fn(H) -> R {
    type Output = R;
    type Handle = H;

    unsafe fn invoke(self, handle: H) -> R {
        // SAFETY: `invoke` carries the pointee's contract; see the trait docs.
        unsafe { self(handle) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn negate(value: i32) -> i32 {
        -value
    }

    unsafe fn negate_unchecked(value: i32) -> i32 {
        -value
    }

    unsafe extern "C" fn negate_foreign(value: i32) -> i32 {
        -value
    }

    extern "C" fn double_foreign(value: i32) -> i32 {
        value * 2
    }

    fn resolves_to<F, H, R>()
    where
        F: CloseFn<Handle = H, Output = R>,
        H: Copy + PartialEq,
    {
    }

    #[test]
    fn resolves_every_supported_shape() {
        resolves_to::<fn(i32) -> u64, i32, u64>();
        resolves_to::<unsafe fn(i32) -> u64, i32, u64>();
        resolves_to::<extern "C" fn(*mut u8) -> i32, *mut u8, i32>();
        resolves_to::<unsafe extern "C" fn(i32) -> i32, i32, i32>();
    }

    #[test]
    fn invoke_forwards_to_the_pointee() {
        let plain: fn(i32) -> i32 = negate;
        // SAFETY: `negate` is a safe function.
        assert_eq!(unsafe { plain.invoke(3) }, -3);

        let unchecked: unsafe fn(i32) -> i32 = negate_unchecked;
        // SAFETY: `negate_unchecked` has no preconditions.
        assert_eq!(unsafe { unchecked.invoke(4) }, -4);

        let foreign: unsafe extern "C" fn(i32) -> i32 = negate_foreign;
        // SAFETY: `negate_foreign` has no preconditions.
        assert_eq!(unsafe { foreign.invoke(5) }, -5);

        let safe_foreign: extern "C" fn(i32) -> i32 = double_foreign;
        // SAFETY: `double_foreign` is a safe function.
        assert_eq!(unsafe { safe_foreign.invoke(6) }, 12);
    }
}

/// Like [`panic!`], but meant for contract violations (undefined behavior for the caller) which might be worth using [`core::hint::unreachable_unchecked`] on in the future.
macro_rules! ub {
    ( $($tt:tt)* ) => {{
        // SAFETY: ✔️ currently a no-op, see `maybe_eventually_sometimes_unreachable`
        unsafe { $crate::_macros::maybe_eventually_sometimes_unreachable() };
        panic!($($tt)*);
    }};
}



/// ### Safety
///
/// In the future, this may be equivalent to [`core::hint::unreachable_unchecked`] in some builds.
pub unsafe fn maybe_eventually_sometimes_unreachable() {}

//! [`Relocate`]: how live elements change address when a [`Vector`](crate::Vector) grows or shifts

use crate::util::drop::InPlaceOnDrop;

/// Capability marker consulted whenever live elements must move to another slot.
///
/// A bitwise move of a Rust value can't fail, so the default is to relocate by move.  A type may instead declare that
/// moving it "may fail" (e.g. it mirrors a C++ type with a throwing move constructor, or its relocation is observable
/// and must be all-or-nothing) while offering a copy.  Such types are relocated by copy: the originals stay live until
/// every copy has been made, so a panicking copy leaves the source untouched.
///
/// | `NOTHROW_MOVE`    | `COPY`        | [`relocation`]        |
/// | ------------------| --------------| ----------------------|
/// | `true`            | *any*         | [`Relocation::Move`]
/// | `false`           | `None`        | [`Relocation::Move`] (no usable copy)
/// | `false`           | `Some(copy)`  | [`Relocation::Copy`]
///
/// ## Examples
/// ```
/// use ivector::{relocate_by_copy, relocate_by_move, Relocation, relocate::relocation};
///
/// #[derive(Clone)] struct Journaled(u32);
/// relocate_by_copy!(Journaled);
///
/// struct Plain(u32);
/// relocate_by_move!(Plain);
///
/// assert_eq!(relocation::<Journaled>(), Relocation::Copy);
/// assert_eq!(relocation::<Plain>(),     Relocation::Move);
/// ```
pub trait Relocate : Sized {
    /// `true` if moving a `Self` to a new address is guaranteed to succeed.
    const NOTHROW_MOVE : bool = true;

    /// Copy construction, if `Self` offers one.
    const COPY : Option<fn(&Self) -> Self> = None;
}

/// The strategy chosen by [`relocation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)] pub enum Relocation {
    /// Bitwise move: infallible, the source slot becomes uninitialized.
    Move,
    /// Copy construction: may panic, the source stays live until retired.
    Copy,
}

/// Move if moving can't fail or there's no copy, otherwise copy.
pub fn relocation<T: Relocate>() -> Relocation {
    match copy_fn::<T>() {
        None    => Relocation::Move,
        Some(_) => Relocation::Copy,
    }
}

pub(crate) fn copy_fn<T: Relocate>() -> Option<fn(&T) -> T> {
    if T::NOTHROW_MOVE { None } else { T::COPY }
}

/// Transfer `n` live elements from `src` into uninitialized `dst` per [`relocation`].
///
/// *   [`Relocation::Move`]: `src[..n]` is left uninitialized.  Never panics.
/// *   [`Relocation::Copy`]: `src[..n]` is left live (see [`retire`]).  If a copy panics, the copies already made are dropped, leaving `dst[..n]` uninitialized.
///
/// ## Safety
/// *   `src[..n]` must be live elements
/// *   `dst[..n]` must be valid for writes, uninitialized, and not overlap `src[..n]`
pub(crate) unsafe fn transfer<T: Relocate>(src: *mut T, n: usize, dst: *mut T) {
    match copy_fn::<T>() {
        // SAFETY: ✔️ non-overlapping and valid per documented preconditions
        None        => unsafe { core::ptr::copy_nonoverlapping(src, dst, n) },
        // SAFETY: ✔️ same preconditions
        Some(copy)  => unsafe { copy_n(src, n, dst, copy) },
    }
}

/// Destroy the sources of a completed [`transfer`].  No-op for [`Relocation::Move`], which already left them uninitialized.
///
/// ## Safety
/// *   `src[..n]` must be the sources of a completed [`transfer`], not otherwise dropped
pub(crate) unsafe fn retire<T: Relocate>(src: *mut T, n: usize) {
    if copy_fn::<T>().is_some() {
        // SAFETY: ✔️ `src[..n]` is still live after a copy transfer, and nothing else will drop it
        unsafe { core::ptr::slice_from_raw_parts_mut(src, n).drop_in_place() };
    }
}

/// Copy construct `dst[..n]` from `src[..n]`, dropping the partial result on panic.
///
/// ## Safety
/// *   `src[..n]` must be live elements
/// *   `dst[..n]` must be valid for writes, uninitialized, and not overlap `src[..n]`
unsafe fn copy_n<T>(src: *const T, n: usize, dst: *mut T, copy: fn(&T) -> T) {
    let mut partial = InPlaceOnDrop::<[T]>::default();
    for i in 0 .. n {
        // SAFETY: ✔️ `i < n`, so `src.add(i)` is live and `dst.add(i)` is writable per documented preconditions
        unsafe { dst.add(i).write(copy(&*src.add(i))) };
        // SAFETY: ✔️ `dst[..=i]` is now initialized, and dropped exactly once if a later copy panics
        unsafe { partial.set(core::ptr::slice_from_raw_parts_mut(dst, i+1)) };
    }
    partial.forget();
}

/// Mark types as relocated by (infallible) move.
///
/// ```
/// struct Handle(u32);
/// ivector::relocate_by_move!(Handle);
/// ```
#[macro_export] macro_rules! relocate_by_move {
    ( $($ty:ty),* $(,)? ) => { $( impl $crate::Relocate for $ty {} )* };
}

/// Mark [`Clone`] types as having a move that may fail: relocate them by copy instead.
///
/// ```
/// #[derive(Clone)] struct Journaled(u32);
/// ivector::relocate_by_copy!(Journaled);
/// ```
#[macro_export] macro_rules! relocate_by_copy {
    ( $($ty:ty),* $(,)? ) => { $(
        impl $crate::Relocate for $ty {
            const NOTHROW_MOVE : bool = false;
            const COPY : Option<fn(&Self) -> Self> = Some(<Self as Clone>::clone);
        }
    )* };
}

relocate_by_move! {
    (), bool, char,
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    f32, f64,
    alloc::string::String,
}

impl<T: ?Sized>                 Relocate for &T {}
impl<T: ?Sized>                 Relocate for &mut T {}
impl<T: ?Sized>                 Relocate for *const T {}
impl<T: ?Sized>                 Relocate for *mut T {}
impl<T: ?Sized>                 Relocate for alloc::boxed::Box<T> {}
impl<T: ?Sized>                 Relocate for alloc::rc::Rc<T> {}
impl<T: ?Sized>                 Relocate for alloc::sync::Arc<T> {}
impl<T>                         Relocate for alloc::vec::Vec<T> {}
impl<T>                         Relocate for crate::Vector<T> {}
impl<T>                         Relocate for core::mem::MaybeUninit<T> {}
impl<T: Relocate> Relocate for Option<T> {
    const NOTHROW_MOVE : bool = T::NOTHROW_MOVE;
    const COPY : Option<fn(&Self) -> Self> = match T::COPY {
        Some(_) => Some(|o: &Self| o.as_ref().map(copy_part)),
        None    => None,
    };
}

impl<T: Relocate, const N: usize> Relocate for [T; N] {
    const NOTHROW_MOVE : bool = T::NOTHROW_MOVE;
    const COPY : Option<fn(&Self) -> Self> = match T::COPY {
        Some(_) => Some(|a: &Self| core::array::from_fn(|i| copy_part(&a[i]))),
        None    => None,
    };
}

impl<A: Relocate, B: Relocate> Relocate for (A, B) {
    const NOTHROW_MOVE : bool = A::NOTHROW_MOVE && B::NOTHROW_MOVE;
    const COPY : Option<fn(&Self) -> Self> = match (A::COPY, B::COPY) {
        (Some(_), Some(_))  => Some(|(a, b): &Self| (copy_part(a), copy_part(b))),
        _                   => None,
    };
}

impl<A: Relocate, B: Relocate, C: Relocate> Relocate for (A, B, C) {
    const NOTHROW_MOVE : bool = A::NOTHROW_MOVE && B::NOTHROW_MOVE && C::NOTHROW_MOVE;
    const COPY : Option<fn(&Self) -> Self> = match (A::COPY, B::COPY, C::COPY) {
        (Some(_), Some(_), Some(_)) => Some(|(a, b, c): &Self| (copy_part(a), copy_part(b), copy_part(c))),
        _                           => None,
    };
}

/// Copy one part of a composite whose `COPY` is only offered when every part has one.
/// Composites drop finished parts if a later part's copy panics.
fn copy_part<T: Relocate>(part: &T) -> T {
    match T::COPY {
        Some(copy)  => copy(part),
        None        => unreachable!("composite `COPY` offered without a `COPY` for every part"),
    }
}



#[cfg(test)] use crate::util::drop::{Tester, CopyTester};

#[test] fn policy() {
    assert_eq!(relocation::<u32>(),                         Relocation::Move);
    assert_eq!(relocation::<alloc::string::String>(),       Relocation::Move);
    assert_eq!(relocation::<Tester>(),                      Relocation::Move);
    assert_eq!(relocation::<CopyTester>(),                  Relocation::Copy);
    assert_eq!(relocation::<Option<u8>>(),                  Relocation::Move);
    assert_eq!(relocation::<Option<CopyTester>>(),          Relocation::Copy);
    assert_eq!(relocation::<[CopyTester; 2]>(),             Relocation::Copy);
    assert_eq!(relocation::<(CopyTester, CopyTester)>(),    Relocation::Copy);
    assert_eq!(relocation::<(CopyTester, u8)>(),            Relocation::Move); // `u8` offers no copy
}

#[test] fn no_copy_means_move() {
    struct Fragile;
    impl Relocate for Fragile { const NOTHROW_MOVE : bool = false; }
    assert_eq!(relocation::<Fragile>(), Relocation::Move);
}

#[test] fn copy_n_rolls_back() {
    use core::mem::MaybeUninit;

    let src = [CopyTester::new(1), CopyTester::new(2), CopyTester::new(3)];
    CopyTester::fail_after(2);
    let mut dst = [const { MaybeUninit::<CopyTester>::uninit() }; 3];
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        // SAFETY: ✔️ `src` is live, `dst` is uninitialized and disjoint
        unsafe { transfer(src.as_ptr().cast_mut(), 3, dst.as_mut_ptr().cast()) }
    }));
    CopyTester::fail_after(usize::MAX);
    assert!(result.is_err());

    // the two copies made before the panic were dropped, the sources are untouched
    assert!(Tester::counts().starts_with(&[0, 1, 1, 1]));
    drop(src);
    assert!(Tester::counts().starts_with(&[0, 0, 0, 0]));
}

#[test] fn composite_copies_every_part() {
    let src = (Some(CopyTester::new(1)), [CopyTester::new(2), CopyTester::new(3)]);
    let before = Tester::copies();
    let copy = match <(Option<CopyTester>, [CopyTester; 2])>::COPY { Some(copy) => copy, None => panic!("expected a copy") };
    let dst = copy(&src);
    assert_eq!(Tester::copies() - before, 3);
    assert_eq!(dst, src);
    assert!(Tester::counts().starts_with(&[0, 2, 2, 2]));

    CopyTester::fail_after(1);
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| copy(&src)));
    CopyTester::fail_after(usize::MAX);
    assert!(result.is_err());
    assert!(Tester::counts().starts_with(&[0, 2, 2, 2])); // the finished part was dropped
    drop((src, dst));
    assert!(Tester::counts().starts_with(&[0, 0, 0, 0]));
}

#[test] fn composite_growth_copies() {
    let mut v = crate::Vector::<Option<CopyTester>>::new();
    for id in 1 ..= 4 { v.push(Some(CopyTester::new(id))) }
    assert_eq!(Tester::copies(), 3); // 1 → 2 → 4 relocates 1 + 2 elements
    assert!(v.iter().map(|o| o.as_ref().map(CopyTester::get)).eq([Some(1), Some(2), Some(3), Some(4)]));
    drop(v);
    assert!(Tester::counts().starts_with(&[0, 0, 0, 0, 0]));
}

use crate::bug;
use crate::error::AllocError;
use crate::raw::RawStorage;
use crate::relocate::{self, Relocate};
use crate::util::drop::InPlaceOnDrop;

use core::mem::MaybeUninit;



/// Contiguous growable array: one [`RawStorage`] plus a count of how many leading slots are live.
///
/// *   Slots `[0, len)` always hold live elements, slots `[len, capacity)` are never read or dropped.
/// *   Growth never reallocates in place: a fresh [`RawStorage`] is allocated, elements are transferred per the
///     [`Relocate`] policy, and the old block is swapped out.
/// *   Unrequested growth from capacity `c` allocates <code>max(1, 2c)</code>.
///
/// | Operation                                     | Panic safety  |
/// | ----------------------------------------------| --------------|
/// | [`reserve`](Self::reserve)                    | strong
/// | [`push`](Self::push) / [`emplace_back`](Self::emplace_back) | strong
/// | [`emplace`](Self::emplace) / [`insert`](Self::insert) when reallocating | strong
/// | [`emplace`](Self::emplace) / [`insert`](Self::insert) when shifting     | basic
/// | [`erase`](Self::erase)                        | basic
/// | [`resize`](Self::resize)                      | basic
/// | [`clone_from`](Clone::clone_from) when reallocating | strong
/// | [`clone_from`](Clone::clone_from) when reusing the buffer | basic
///
/// ## Examples
/// ```
/// use ivector::Vector;
/// let mut v = Vector::new();
/// v.push(1);
/// v.push(2);
/// assert_eq!(v, [1, 2]);
///
/// v.insert(1, 3);
/// assert_eq!(v, [1, 3, 2]);
///
/// v.erase(0);
/// assert_eq!(v, [3, 2]);
///
/// v.resize(4);
/// assert_eq!(v, [3, 2, 0, 0]);
/// ```
pub struct Vector<T> {
    pub(super) storage: RawStorage<T>,
    pub(super) len:     usize,
}

impl<T> Drop for Vector<T> { fn drop(&mut self) { self.clear() } }

impl<T> Default for Vector<T> { fn default() -> Self { Self::new() } }

impl<T> Vector<T> {
    /// An empty vector with capacity 0.  Doesn't allocate.
    pub const fn new() -> Self { Self { storage: RawStorage::new(), len: 0 } }

    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> { Ok(Self { storage: RawStorage::try_with_capacity(capacity)?, len: 0 }) }
    #[track_caller] pub fn with_capacity(capacity: usize) -> Self { Self::try_with_capacity(capacity).unwrap_or_else(|err| err.raise()) }

    /// `len` default-constructed elements, with exactly `len` capacity.
    ///
    /// If [`T::default`](Default::default) panics, the elements constructed so far are dropped.
    #[track_caller] pub fn with_len(len: usize) -> Self where T : Default {
        let mut v = Self::with_capacity(len);
        // SAFETY: ✔️ `v.len < len == v.capacity()`
        while v.len < len { unsafe { v.push_within_capacity_unchecked(T::default()) }; }
        v
    }

    #[inline(always)] pub fn as_ptr(&self) -> *const T { self.storage.base().as_ptr() }
    #[inline(always)] pub fn as_mut_ptr(&mut self) -> *mut T { self.storage.base().as_ptr() }
    // SAFETY: ✔️ `[0, len)` are live, `base()` is aligned and non-null even when unallocated
    #[inline(always)] pub fn as_slice(&self) -> &[T] { unsafe { core::slice::from_raw_parts(self.as_ptr(), self.len) } }
    // SAFETY: ✔️ `[0, len)` are live, `base()` is aligned and non-null even when unallocated
    #[inline(always)] pub fn as_mut_slice(&mut self) -> &mut [T] { unsafe { core::slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) } }
    #[inline(always)] pub fn capacity(&self) -> usize { self.storage.capacity() }
    #[inline(always)] pub fn is_empty(&self) -> bool { self.len() == 0 }
    #[inline(always)] pub fn len(&self) -> usize { self.len }
    #[inline(always)] pub fn raw_storage(&self) -> &RawStorage<T> { &self.storage }
    #[inline(always)] pub fn spare_capacity_mut(&mut self) -> &mut [MaybeUninit<T>] { let len = self.len; &mut self.storage.as_uninit_slice_mut()[len..] }

    /// ### Safety
    /// *   Slots `[0, new_len)` must be live, and any previously live slots `[new_len, len)` are forgotten rather than dropped
    #[track_caller] pub unsafe fn set_len(&mut self, new_len: usize) {
        if new_len > self.capacity() { bug::ub::set_len_past_capacity(new_len, self.capacity()) }
        self.len = new_len;
    }

    /// Take the contents, leaving `self` empty with capacity 0.  O(1).
    pub fn take(&mut self) -> Self { core::mem::take(self) }

    /// Exchange contents (storage and length) with `other`.  O(1), no element is touched.
    pub fn swap(&mut self, other: &mut Self) {
        self.storage.swap(&mut other.storage);
        core::mem::swap(&mut self.len, &mut other.len);
    }

    pub fn clear(&mut self) { self.truncate(0) }

    pub fn truncate(&mut self, len: usize) {
        if let Some(to_drop) = self.len.checked_sub(len) {
            // SAFETY: ✔️ `len <= self.len`, so the slice covers live slots `[len, self.len)`
            let to_drop = core::ptr::slice_from_raw_parts_mut(unsafe { self.as_mut_ptr().add(len) }, to_drop);
            self.len = len;
            // SAFETY: ✔️ those slots are no longer counted as live, so they're dropped exactly once
            unsafe { to_drop.drop_in_place() };
        }
    }

    pub fn pop(&mut self) -> Option<T> {
        let idx_to_pop = self.len.checked_sub(1)?;
        self.len = idx_to_pop;
        // SAFETY: ✔️ slot `idx_to_pop` was live, and is no longer counted as such
        unsafe { Some(self.as_mut_ptr().add(idx_to_pop).read()) }
    }

    /// Drop the last element.
    ///
    /// ## Failure Modes
    /// *   Panics if empty (a contract violation rather than a recoverable error)
    #[track_caller] pub fn pop_back(&mut self) {
        if self.len == 0 { bug::ub::pop_back_empty() }
        self.truncate(self.len - 1);
    }

    pub fn push_within_capacity(&mut self, value: T) -> Result<(), T> {
        if self.len < self.capacity() {
            // SAFETY: ✔️ just checked `len < capacity`
            unsafe { self.push_within_capacity_unchecked(value) };
            Ok(())
        } else {
            Err(value)
        }
    }

    /// ### Safety
    /// *   `self.len() < self.capacity()`
    pub(super) unsafe fn push_within_capacity_unchecked(&mut self, value: T) -> &mut T {
        debug_assert!(self.len < self.capacity());
        let len = self.len;
        // SAFETY: ✔️ slot `len` is within capacity and uninitialized
        let slot = unsafe { self.as_mut_ptr().add(len) };
        // SAFETY: ✔️ see above
        unsafe { slot.write(value) };
        self.len = len + 1;
        // SAFETY: ✔️ slot `len` was just initialized
        unsafe { &mut *slot }
    }

    /// Capacity to grow to when full: <code>max(1, 2 × capacity)</code>.
    pub(super) fn grown_capacity(&self) -> Result<usize, AllocError> {
        match self.capacity() {
            0 => Ok(1),
            c => c.checked_mul(2).ok_or(AllocError::CapacityOverflow { requested: usize::MAX }),
        }
    }

    /// Allocate the block a full vector grows into.
    #[track_caller] pub(super) fn grown_storage(&self) -> RawStorage<T> {
        self.grown_capacity().and_then(RawStorage::try_with_capacity).unwrap_or_else(|err| err.raise())
    }
}

impl<T: Relocate> Vector<T> {
    /// Ensure <code>[capacity](Self::capacity)\(\) >= new_capacity</code>.  Allocates exactly `new_capacity` if growing.
    ///
    /// Note that unlike [`alloc::vec::Vec::reserve`], `new_capacity` is the total capacity, not an additional count.
    ///
    /// ## Failure Modes
    /// *   Returns <code>[Err]\(...\)</code> on capacity overflow or if out of memory, leaving `self` unchanged
    /// *   If a [`Relocation::Copy`](crate::Relocation::Copy) panics, the partial copies are dropped and `self` is left unchanged
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<(), AllocError> {
        if new_capacity <= self.capacity() { return Ok(()) }
        let fresh = RawStorage::try_with_capacity(new_capacity)?;
        // SAFETY: ✔️ `fresh` holds `new_capacity > capacity >= len` slots
        unsafe { self.adopt(fresh, None) };
        Ok(())
    }

    #[track_caller] pub fn reserve(&mut self, new_capacity: usize) { self.try_reserve(new_capacity).unwrap_or_else(|err| err.raise()) }

    /// Ensure room for `additional` more elements, growing by at least <code>max(1, 2c)</code> if growth is needed at all.
    pub(super) fn try_reserve_additional(&mut self, additional: usize) -> Result<(), AllocError> {
        let needed = self.len.checked_add(additional).ok_or(AllocError::CapacityOverflow { requested: usize::MAX })?;
        if needed <= self.capacity() { return Ok(()) }
        let grown = self.grown_capacity().unwrap_or(needed);
        self.try_reserve(needed.max(grown))
    }

    /// Resize to `new_len`, dropping excess elements or appending default-constructed ones.
    ///
    /// Grows to exactly `new_len` capacity if needed.  If [`T::default`](Default::default) panics, the elements
    /// constructed before it remain.
    #[track_caller] pub fn resize(&mut self, new_len: usize) where T : Default { self.resize_with(new_len, T::default) }

    #[track_caller] pub fn resize_with<F: FnMut() -> T>(&mut self, new_len: usize, mut f: F) {
        if new_len <= self.len { return self.truncate(new_len) }
        self.reserve(new_len);
        // SAFETY: ✔️ `len < new_len <= capacity`
        while self.len < new_len { unsafe { self.push_within_capacity_unchecked(f()) }; }
    }

    #[track_caller] pub fn push(&mut self, value: T) { self.emplace_back(move || value); }

    /// Append the result of `make`, constructed directly in its final slot.
    ///
    /// When full, `make` runs before any existing element is relocated: if it panics, `self` is left unchanged.
    #[track_caller] pub fn emplace_back<F: FnOnce() -> T>(&mut self, make: F) -> &mut T {
        let len = self.len;
        if len < self.capacity() {
            let value = make();
            // SAFETY: ✔️ `len < capacity`
            return unsafe { self.push_within_capacity_unchecked(value) }
        }

        let fresh = self.grown_storage();
        // SAFETY: ✔️ `fresh` holds `max(1, 2 × len) > len` slots
        unsafe { fresh.base().as_ptr().add(len).write(make()) };
        // SAFETY: ✔️ slot `len` of `fresh` was just initialized, and `fresh` has room for `len + 1`
        unsafe { self.adopt(fresh, Some(len)) };
        // SAFETY: ✔️ slot `len` is live
        unsafe { &mut *self.as_mut_ptr().add(len) }
    }

    /// Transfer every live element into `fresh`, around an already constructed element at index `gap` (if any), then
    /// swap `fresh` in and retire the old block.
    ///
    /// If a copy panics, everything constructed in `fresh` (including the `gap` element) is dropped, and `self` is unchanged.
    ///
    /// ### Safety
    /// *   `fresh.capacity() >= self.len() + gap.is_some() as usize`
    /// *   If `gap` is <code>[Some]\(at\)</code>: `at <= self.len()`, slot `at` of `fresh` is live, and every other slot is uninitialized
    pub(super) unsafe fn adopt(&mut self, mut fresh: RawStorage<T>, gap: Option<usize>) {
        let len = self.len;
        let src = self.as_mut_ptr();
        let dst = fresh.base().as_ptr();
        let (head, skip) = match gap { Some(at) => (at, 1), None => (len, 0) };
        debug_assert!(head <= len);
        debug_assert!(len + skip <= fresh.capacity());

        // SAFETY: ✔️ slot `head` of `fresh` is live when `skip == 1`, and otherwise we guard nothing
        let placed = unsafe { InPlaceOnDrop::new(if skip == 1 { dst.add(head) } else { core::ptr::null_mut() }) };
        // SAFETY: ✔️ `src[..head]` is live, `dst[..head]` is uninitialized and in a different allocation
        unsafe { relocate::transfer(src, head, dst) };
        // SAFETY: ✔️ `dst[..head]` was just initialized
        let prefix = unsafe { InPlaceOnDrop::new(core::ptr::slice_from_raw_parts_mut(dst, head)) };
        // SAFETY: ✔️ `src[head..len]` is live, `dst[head+skip..len+skip]` is uninitialized and in a different allocation
        unsafe { relocate::transfer(src.add(head), len - head, dst.add(head + skip)) };
        prefix.forget();
        placed.forget();

        self.storage.swap(&mut fresh);
        self.len = len + skip;
        // SAFETY: ✔️ `fresh` now holds the transferred sources - dropped here if they were copied, already uninitialized if moved
        unsafe { relocate::retire(fresh.base().as_ptr(), len) };
    }
}



#[cfg(test)] use crate::util::drop::{CopyTester, Tester};
#[cfg(test)] use std::panic::{catch_unwind, AssertUnwindSafe};

#[test] fn scenario() {
    let mut v = Vector::<i32>::new();
    v.push(1);
    v.push(2);
    assert_eq!(v.as_slice(), [1, 2]);
    assert_eq!(v.len(), 2);

    assert_eq!(v.insert(1, 3), 1);
    assert_eq!(v.as_slice(), [1, 3, 2]);
    assert_eq!(v.len(), 3);

    assert_eq!(v.erase(0), 0);
    assert_eq!(v.as_slice(), [3, 2]);
    assert_eq!(v.len(), 2);

    v.resize(4);
    assert_eq!(v.as_slice(), [3, 2, 0, 0]);
    assert_eq!(v.len(), 4);
}

#[test] fn new_is_unallocated() {
    let v = Vector::<u64>::new();
    assert_eq!((v.len(), v.capacity()), (0, 0));
    assert!(v.raw_storage().as_ptr().is_null());
    assert!(v.as_slice().is_empty());
}

#[test] fn growth_doubles_from_one() {
    let mut v = Vector::<u32>::new();
    let mut capacities = std::vec::Vec::new();
    for i in 0 .. 17 {
        v.push(i);
        if capacities.last() != Some(&v.capacity()) { capacities.push(v.capacity()) }
    }
    assert_eq!(capacities, [1, 2, 4, 8, 16, 32]);
    assert!(v.iter().copied().eq(0 .. 17));
}

#[test] fn growth_after_reserve() {
    let mut v = Vector::<u32>::new();
    v.reserve(3);
    assert_eq!(v.capacity(), 3);
    v.extend([1, 2, 3]);
    assert_eq!(v.capacity(), 3);
    v.push(4);
    assert_eq!(v.capacity(), 6);
}

#[test] fn reserve_never_shrinks() {
    let mut v = Vector::<u8>::with_capacity(10);
    v.reserve(4);
    assert_eq!(v.capacity(), 10);
    v.reserve(11);
    assert_eq!(v.capacity(), 11);
}

#[test] fn try_reserve_overflow_leaves_self() {
    let mut v = Vector::<u64>::from([1, 2, 3]);
    let err = v.try_reserve(usize::MAX).unwrap_err();
    assert_eq!(err, AllocError::CapacityOverflow { requested: usize::MAX });
    assert_eq!(v.as_slice(), [1, 2, 3]);
    assert_eq!(v.capacity(), 3);
}

#[test] fn with_len() {
    let v = Vector::<Tester>::with_len(5);
    assert_eq!((v.len(), v.capacity()), (5, 5));
    assert_eq!(Tester::counts()[0], 5);
    drop(v);
    assert_eq!(Tester::counts()[0], 0);
}

#[test] fn resize() {
    let mut v = Vector::<Tester>::new();
    v.push(Tester::new(1));
    v.push(Tester::new(2));
    v.push(Tester::new(3));
    v.resize(1);
    assert_eq!(v.len(), 1);
    assert!(Tester::counts().starts_with(&[0, 1, 0, 0]));

    v.resize(4);
    assert_eq!((v.len(), v.capacity()), (4, 4));
    assert!(Tester::counts().starts_with(&[3, 1, 0, 0]));

    drop(v);
    assert!(Tester::counts().starts_with(&[0, 0, 0, 0]));
}

#[test] fn resize_with_panic_keeps_constructed() {
    let mut v = Vector::<Tester>::new();
    let mut n = 0;
    let result = catch_unwind(AssertUnwindSafe(|| v.resize_with(5, || { n += 1; if n == 4 { panic!("fourth") } Tester::new(9) })));
    assert!(result.is_err());
    assert_eq!(v.len(), 3);
    assert_eq!(v.capacity(), 5);
    assert_eq!(Tester::counts()[9], 3);
    drop(v);
    assert_eq!(Tester::counts()[9], 0);
}

#[test] fn pop() {
    let mut v = Vector::from([1, 2]);
    assert_eq!(v.pop(), Some(2));
    assert_eq!(v.pop(), Some(1));
    assert_eq!(v.pop(), None);
    assert_eq!(v.capacity(), 2);
}

#[test] fn pop_back() {
    let mut v = Vector::<Tester>::new();
    v.push(Tester::new(4));
    v.push(Tester::new(5));
    v.pop_back();
    assert_eq!(v.len(), 1);
    assert!(Tester::counts().starts_with(&[0, 0, 0, 0, 1, 0]));
}

#[test] #[should_panic = "pop_back() called on an empty Vector"] fn pop_back_empty() {
    Vector::<u8>::new().pop_back();
}

#[test] fn emplace_back_returns_element() {
    let mut v = Vector::<u32>::with_capacity(1);
    *v.emplace_back(|| 1) += 10;
    *v.emplace_back(|| 2) += 20;
    assert_eq!(v.as_slice(), [11, 22]);
}

#[test] fn emplace_back_panic_is_strong() {
    for capacity in [2, 3] { // full (reallocating), then room to spare (in place)
        let mut v = Vector::<Tester>::with_capacity(capacity);
        v.push(Tester::new(1));
        v.push(Tester::new(2));
        let ptr = v.as_ptr();

        let result = catch_unwind(AssertUnwindSafe(|| { v.emplace_back(|| panic!("constructor failed")); }));
        assert!(result.is_err());
        assert_eq!((v.len(), v.capacity(), v.as_ptr()), (2, capacity, ptr));
        assert_eq!(v[0].get(), 1);
        assert_eq!(v[1].get(), 2);
        assert!(Tester::counts().starts_with(&[0, 1, 1, 0]));
    }
    assert!(Tester::counts().starts_with(&[0, 0, 0, 0]));
}

#[test] fn growth_moves_when_nothrow() {
    let mut v = Vector::<Tester>::new();
    for i in 0 .. 32 { v.push(Tester::new(i)) }
    assert_eq!(Tester::copies(), 0);
}

#[test] fn growth_copies_when_move_may_fail() {
    let mut v = Vector::<CopyTester>::new();
    v.push(CopyTester::new(1)); // cap 0 → 1: nothing to relocate
    assert_eq!(Tester::copies(), 0);
    v.push(CopyTester::new(2)); // cap 1 → 2: 1 copy
    assert_eq!(Tester::copies(), 1);
    v.push(CopyTester::new(3)); // cap 2 → 4: 2 copies
    assert_eq!(Tester::copies(), 3);
    v.push(CopyTester::new(4)); // in place
    assert_eq!(Tester::copies(), 3);
    v.reserve(10);              // 4 copies
    assert_eq!(Tester::copies(), 7);

    assert!(Tester::counts().starts_with(&[0, 1, 1, 1, 1, 0]));
    assert!(v.iter().map(CopyTester::get).eq([1, 2, 3, 4]));
}

#[test] fn growth_copy_panic_is_strong() {
    let mut v = Vector::<CopyTester>::new();
    for i in 1 ..= 4 { v.push(CopyTester::new(i)) }
    assert_eq!(v.capacity(), 4);
    let ptr = v.as_ptr();

    CopyTester::fail_after(2);
    let result = catch_unwind(AssertUnwindSafe(|| v.push(CopyTester::new(5))));
    assert!(result.is_err());
    assert_eq!((v.len(), v.capacity(), v.as_ptr()), (4, 4, ptr));
    assert!(v.iter().map(CopyTester::get).eq([1, 2, 3, 4]));
    // partial copies and the new element were all dropped
    assert!(Tester::counts().starts_with(&[0, 1, 1, 1, 1, 0]));

    CopyTester::fail_after(0);
    let result = catch_unwind(AssertUnwindSafe(|| v.reserve(100)));
    assert!(result.is_err());
    assert_eq!((v.len(), v.capacity()), (4, 4));
    assert!(Tester::counts().starts_with(&[0, 1, 1, 1, 1, 0]));
}

#[test] fn take_and_swap() {
    let mut a = Vector::<Tester>::new();
    a.push(Tester::new(1));
    a.push(Tester::new(2));

    let mut b = a.take();
    assert_eq!((a.len(), a.capacity()), (0, 0));
    assert_eq!(b.len(), 2);

    let mut c = Vector::<Tester>::new();
    c.push(Tester::new(3));
    b.swap(&mut c);
    assert!(b.iter().map(|t| t.get()).eq([3]));
    assert!(c.iter().map(|t| t.get()).eq([1, 2]));

    let d = core::mem::take(&mut c);
    assert!(c.is_empty());
    assert!(Tester::counts().starts_with(&[0, 1, 1, 1, 0]));
    drop((a, b, c, d));
    assert!(Tester::counts().starts_with(&[0, 0, 0, 0, 0]));
}

#[test] fn zst() {
    let mut v = Vector::<()>::new();
    for _ in 0 .. 100 { v.push(()) }
    v.insert(50, ());
    v.erase(0);
    assert_eq!(v.len(), 100);
    assert!(v.capacity() >= 100);
}

#[test] fn spare_capacity() {
    let mut v = Vector::<u8>::with_capacity(4);
    v.push(1);
    assert_eq!(v.spare_capacity_mut().len(), 3);
    v.spare_capacity_mut()[0].write(2);
    // SAFETY: ✔️ slot 1 was just written
    unsafe { v.set_len(2) };
    assert_eq!(v.as_slice(), [1, 2]);
}

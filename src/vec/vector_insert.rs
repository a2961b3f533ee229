use crate::bug;
use crate::relocate::{self, Relocate};
use crate::vec::Vector;



impl<T: Relocate> Vector<T> {
    #[track_caller] pub fn insert(&mut self, pos: usize, value: T) -> usize { self.emplace(pos, move || value) }

    /// Insert the result of `make` at index `pos`, shifting `[pos, len)` one slot right.  Returns the index of the
    /// inserted element (always `pos`).
    ///
    /// *   Full: `make` constructs directly into the new block before anything is relocated.  Strong guarantee.
    /// *   Room at the end: identically to [`emplace_back`](Self::emplace_back).
    /// *   Room, `pos < len`: `make` builds a temporary, the tail shifts back to front, and the temporary is assigned
    ///     into `pos`.  A panicking [`Relocation::Copy`](crate::Relocation::Copy) leaves every slot live, but possibly
    ///     shifted.
    ///
    /// ## Failure Modes
    /// *   Panics if `pos > len()` (a contract violation)
    #[track_caller] pub fn emplace<F: FnOnce() -> T>(&mut self, pos: usize, make: F) -> usize {
        let len = self.len;
        if pos > len { bug::ub::insert_out_of_bounds(pos, len) }

        if len == self.capacity() {
            let fresh = self.grown_storage();
            // SAFETY: ✔️ `pos <= len < max(1, 2 × len)`
            unsafe { fresh.base().as_ptr().add(pos).write(make()) };
            // SAFETY: ✔️ slot `pos` of `fresh` was just initialized, and `fresh` has room for `len + 1`
            unsafe { self.adopt(fresh, Some(pos)) };
            return pos;
        }

        let value = make();
        if pos == len {
            // SAFETY: ✔️ `len < capacity`
            unsafe { self.push_within_capacity_unchecked(value) };
            return pos;
        }

        match relocate::copy_fn::<T>() {
            None => {
                let base = self.as_mut_ptr();
                // SAFETY: ✔️ `[pos, len)` is live and `len < capacity`, so `[pos+1, len+1)` is in bounds
                unsafe { core::ptr::copy(base.add(pos), base.add(pos + 1), len - pos) };
                // SAFETY: ✔️ slot `pos` was bitwise moved out of, and is rewritten without dropping
                unsafe { base.add(pos).write(value) };
                self.len = len + 1;
            },
            Some(copy) => {
                let last = copy(&self.as_slice()[len - 1]);
                // SAFETY: ✔️ `len < capacity`
                unsafe { self.push_within_capacity_unchecked(last) };
                let slots = self.as_mut_slice();
                for i in (pos + 1 .. len).rev() {
                    let shifted = copy(&slots[i - 1]);
                    slots[i] = shifted;
                }
                slots[pos] = value;
            },
        }
        pos
    }

    /// Drop the element at `pos`, shifting `[pos+1, len)` one slot left.  Returns `pos`, now the index of the former
    /// successor (or `len()` if the last element was erased).
    ///
    /// Under [`Relocation::Copy`](crate::Relocation::Copy), a panicking copy leaves every slot live (basic guarantee).
    ///
    /// ## Failure Modes
    /// *   Panics if `pos >= len()` (a contract violation)
    #[track_caller] pub fn erase(&mut self, pos: usize) -> usize {
        let len = self.len;
        if pos >= len { bug::ub::erase_out_of_bounds(pos, len) }

        match relocate::copy_fn::<T>() {
            None => {
                let base = self.as_mut_ptr();
                // SAFETY: ✔️ `pos < len`, so slot `pos` is live
                let erased = unsafe { base.add(pos).read() };
                // SAFETY: ✔️ `[pos+1, len)` is live, and slot `pos` was just moved out of
                unsafe { core::ptr::copy(base.add(pos + 1), base.add(pos), len - pos - 1) };
                self.len = len - 1;
                drop(erased);
            },
            Some(copy) => {
                let slots = self.as_mut_slice();
                for i in pos .. len - 1 {
                    let shifted = copy(&slots[i + 1]);
                    slots[i] = shifted;
                }
                self.truncate(len - 1);
            },
        }
        pos
    }

    /// Like [`erase`](Self::erase), but returns the element instead of dropping it.
    #[track_caller] pub fn remove(&mut self, pos: usize) -> T {
        let len = self.len;
        if pos >= len { bug::ub::erase_out_of_bounds(pos, len) }

        match relocate::copy_fn::<T>() {
            None => {
                let base = self.as_mut_ptr();
                // SAFETY: ✔️ `pos < len`, so slot `pos` is live
                let removed = unsafe { base.add(pos).read() };
                // SAFETY: ✔️ `[pos+1, len)` is live, and slot `pos` was just moved out of
                unsafe { core::ptr::copy(base.add(pos + 1), base.add(pos), len - pos - 1) };
                self.len = len - 1;
                removed
            },
            Some(copy) => {
                let removed = copy(&self.as_slice()[pos]);
                self.erase(pos);
                removed
            },
        }
    }
}



#[cfg(test)] use crate::util::drop::{CopyTester, Tester};
#[cfg(test)] use std::panic::{catch_unwind, AssertUnwindSafe};

#[cfg(test)] fn testers(ids: &[u8]) -> Vector<Tester> { ids.iter().map(|&id| Tester::new(id)).collect() }
#[cfg(test)] fn ids(v: &Vector<Tester>) -> std::vec::Vec<u8> { v.iter().map(|t| t.get()).collect() }

#[test] fn insert_positions() {
    let mut v = Vector::<u32>::with_capacity(8);
    assert_eq!(v.insert(0, 2), 0);
    assert_eq!(v.insert(0, 1), 0);
    assert_eq!(v.insert(2, 4), 2);
    assert_eq!(v.insert(2, 3), 2);
    assert_eq!(v.as_slice(), [1, 2, 3, 4]);
    assert_eq!(v.capacity(), 8);
}

#[test] fn insert_reallocating() {
    let mut v = Vector::<u32>::from([1, 2, 4]);
    assert_eq!(v.capacity(), 3);
    assert_eq!(v.insert(2, 3), 2);
    assert_eq!(v.as_slice(), [1, 2, 3, 4]);
    assert_eq!(v.capacity(), 6);

    let mut v = Vector::<u32>::new();
    assert_eq!(v.insert(0, 7), 0);
    assert_eq!((v.len(), v.capacity()), (1, 1));
}

#[test] fn insert_then_erase_restores() {
    for capacity in [5, 16] {
        for pos in 0 ..= 5 {
            let mut v = Vector::<Tester>::with_capacity(capacity);
            for id in 1 ..= 5 { v.push(Tester::new(id)) }
            v.insert(pos, Tester::new(9));
            assert_eq!(v[pos].get(), 9);
            assert_eq!(v.erase(pos), pos);
            assert_eq!(ids(&v), [1, 2, 3, 4, 5]);
            assert!(Tester::counts().starts_with(&[0, 1, 1, 1, 1, 1, 0, 0, 0, 0]));
        }
    }
}

#[test] fn insert_then_erase_restores_copy_policy() {
    for capacity in [3, 8] {
        for pos in 0 ..= 3 {
            let mut v = Vector::<CopyTester>::with_capacity(capacity);
            for id in 1 ..= 3 { v.push(CopyTester::new(id)) }
            v.insert(pos, CopyTester::new(9));
            assert_eq!(v[pos].get(), 9);
            v.erase(pos);
            assert!(v.iter().map(CopyTester::get).eq([1, 2, 3]));
            assert!(Tester::counts().starts_with(&[0, 1, 1, 1, 0, 0, 0, 0, 0, 0]));
        }
    }
}

#[test] fn shifting_insert_copies_when_move_may_fail() {
    let mut v = Vector::<CopyTester>::with_capacity(4);
    for id in 1 ..= 3 { v.push(CopyTester::new(id)) }
    let before = Tester::copies();
    v.insert(0, CopyTester::new(0));
    assert_eq!(Tester::copies() - before, 3); // construct the new last slot, then copy-assign 2
    assert!(v.iter().map(CopyTester::get).eq([0, 1, 2, 3]));
}

#[test] fn erase_returns_successor() {
    let mut v = testers(&[1, 2, 3]);
    let pos = v.erase(1);
    assert_eq!(v[pos].get(), 3);
    assert_eq!(v.erase(1), 1);
    assert_eq!(v.len(), 1);
    assert!(Tester::counts().starts_with(&[0, 1, 0, 0]));
}

#[test] fn erase_copy_policy() {
    let mut v = Vector::<CopyTester>::new();
    for id in 1 ..= 4 { v.push(CopyTester::new(id)) }
    let before = Tester::copies();
    v.erase(1);
    assert_eq!(Tester::copies() - before, 2);
    assert!(v.iter().map(CopyTester::get).eq([1, 3, 4]));
    assert_eq!(v.capacity(), 4);
    assert!(Tester::counts().starts_with(&[0, 1, 0, 1, 1, 0]));
}

#[test] fn erase_copy_panic_is_basic() {
    let mut v = Vector::<CopyTester>::new();
    for id in 1 ..= 4 { v.push(CopyTester::new(id)) }
    CopyTester::fail_after(1);
    let result = catch_unwind(AssertUnwindSafe(|| v.erase(0)));
    assert!(result.is_err());
    // first shift landed, the rest didn't: still 4 live elements, nothing leaked or doubly dropped
    assert_eq!(v.len(), 4);
    assert!(v.iter().map(CopyTester::get).eq([2, 2, 3, 4]));
    drop(v);
    assert!(Tester::counts().starts_with(&[0, 0, 0, 0, 0]));
}

#[test] fn insert_copy_panic_is_basic() {
    let mut v = Vector::<CopyTester>::with_capacity(8);
    for id in 1 ..= 4 { v.push(CopyTester::new(id)) }
    CopyTester::fail_after(2); // new last slot copied, one shift copied, then the next shift fails
    let result = catch_unwind(AssertUnwindSafe(|| v.insert(0, CopyTester::new(9))));
    assert!(result.is_err());
    // every slot stays live, the tail is partially shifted and the new value was dropped
    assert_eq!((v.len(), v.capacity()), (5, 8));
    assert!(v.iter().map(CopyTester::get).eq([1, 2, 3, 3, 4]));
    assert!(Tester::counts().starts_with(&[0, 1, 1, 2, 1, 0, 0, 0, 0, 0]));
    drop(v);
    assert!(Tester::counts().iter().all(|&n| n == 0));
}

#[test] fn remove() {
    let mut v = testers(&[1, 2, 3]);
    let removed = v.remove(0);
    assert_eq!(removed.get(), 1);
    assert_eq!(ids(&v), [2, 3]);
    drop((removed, v));

    let mut v = Vector::<CopyTester>::new();
    for id in 4 ..= 6 { v.push(CopyTester::new(id)) }
    assert_eq!(v.remove(2).get(), 6);
    assert!(v.iter().map(CopyTester::get).eq([4, 5]));
    drop(v);
    assert!(Tester::counts().iter().all(|&n| n == 0));
}

#[test] fn emplace_panic_reallocating_is_strong() {
    let mut v = testers(&[1, 2]);
    assert_eq!(v.capacity(), 2);
    let ptr = v.as_ptr();
    let result = catch_unwind(AssertUnwindSafe(|| v.emplace(1, || panic!("constructor failed"))));
    assert!(result.is_err());
    assert_eq!((v.len(), v.capacity(), v.as_ptr()), (2, 2, ptr));
    assert_eq!(ids(&v), [1, 2]);
}

#[test] fn emplace_panic_shifting_is_strong() {
    let mut v = Vector::<Tester>::with_capacity(4);
    v.push(Tester::new(1));
    v.push(Tester::new(2));
    let result = catch_unwind(AssertUnwindSafe(|| v.emplace(0, || panic!("constructor failed"))));
    assert!(result.is_err());
    assert_eq!((v.len(), v.capacity()), (2, 4));
    assert_eq!(ids(&v), [1, 2]);
}

#[test] fn emplace_copy_panic_reallocating_is_strong() {
    let mut v = Vector::<CopyTester>::new();
    for id in 1 ..= 4 { v.push(CopyTester::new(id)) }
    CopyTester::fail_after(3); // prefix [1, 2] copied, suffix [3] copied, then [4] fails
    let result = catch_unwind(AssertUnwindSafe(|| v.insert(2, CopyTester::new(9))));
    assert!(result.is_err());
    assert_eq!((v.len(), v.capacity()), (4, 4));
    assert!(v.iter().map(CopyTester::get).eq([1, 2, 3, 4]));
    assert!(Tester::counts().starts_with(&[0, 1, 1, 1, 1, 0, 0, 0, 0, 0]));
}

#[test] #[should_panic = "insertion position 4 is past the end"] fn insert_out_of_bounds() {
    Vector::<u8>::from([1, 2, 3]).insert(4, 0);
}

#[test] #[should_panic = "erase position 3 is not a live element"] fn erase_out_of_bounds() {
    Vector::<u8>::from([1, 2, 3]).erase(3);
}

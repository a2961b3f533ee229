use crate::vec::Vector;



impl<T: Clone> Clone for Vector<T> {
    /// Deep copy with exactly `len()` capacity.
    fn clone(&self) -> Self {
        let mut v = Self::with_capacity(self.len());
        // SAFETY: ✔️ `v` has room for all of `self`
        for value in self.iter() { unsafe { v.push_within_capacity_unchecked(value.clone()) }; }
        v
    }

    /// Copy assignment.
    ///
    /// *   `source` doesn't fit: copy it in full and swap the copy in (strong guarantee: on panic, `self` is unchanged)
    /// *   `source` fits: [`clone_from`](Clone::clone_from) over the common prefix, then drop or copy construct the tail in place (basic guarantee)
    fn clone_from(&mut self, source: &Self) {
        if source.len() > self.capacity() {
            let mut copy = source.clone();
            self.swap(&mut copy);
            return;
        }

        let common = self.len().min(source.len());
        for (dst, src) in self[..common].iter_mut().zip(&source[..common]) { dst.clone_from(src) }

        if source.len() <= self.len() {
            self.truncate(source.len());
        } else {
            // SAFETY: ✔️ `self.len() < source.len() <= self.capacity()` for every push
            for value in &source[common..] { unsafe { self.push_within_capacity_unchecked(value.clone()) }; }
        }
    }
}



#[cfg(test)] use crate::util::drop::Tester;
#[cfg(test)] use std::panic::{catch_unwind, AssertUnwindSafe};

#[cfg(test)] fn testers(ids: &[u8]) -> Vector<Tester> { ids.iter().map(|&id| Tester::new(id)).collect() }
#[cfg(test)] fn ids(v: &Vector<Tester>) -> std::vec::Vec<u8> { v.iter().map(|t| t.get()).collect() }

#[test] fn clone_is_exact_and_deep() {
    let mut a = Vector::<u32>::with_capacity(16);
    a.extend([1, 2, 3]);
    let mut b = a.clone();
    assert_eq!(b.capacity(), 3);
    assert_eq!(a, b);

    b.push(4);
    b[0] = 10;
    assert_eq!(a.as_slice(), [1, 2, 3]);
    assert_eq!(b.as_slice(), [10, 2, 3, 4]);

    a.erase(0);
    assert_eq!(b.as_slice(), [10, 2, 3, 4]);
}

#[test] fn clone_from_reallocating() {
    let mut dst = testers(&[1]);
    let src = testers(&[2, 3, 4]);
    dst.clone_from(&src);
    assert_eq!(ids(&dst), [2, 3, 4]);
    assert_eq!(dst.capacity(), 3);
    assert!(Tester::counts().starts_with(&[0, 0, 2, 2, 2, 0]));
}

#[test] fn clone_from_shorter_source_reuses_buffer() {
    let mut dst = Vector::<Tester>::with_capacity(8);
    for id in [1, 1, 1, 1] { dst.push(Tester::new(id)) }
    let ptr = dst.as_ptr();
    let src = testers(&[2, 3]);

    dst.clone_from(&src);
    assert_eq!(ids(&dst), [2, 3]);
    assert_eq!((dst.capacity(), dst.as_ptr()), (8, ptr));
    assert!(Tester::counts().starts_with(&[0, 0, 2, 2, 0]));
}

#[test] fn clone_from_longer_source_reuses_buffer() {
    let mut dst = Vector::<Tester>::with_capacity(8);
    dst.push(Tester::new(1));
    let ptr = dst.as_ptr();
    let src = testers(&[2, 3, 4]);

    dst.clone_from(&src);
    assert_eq!(ids(&dst), [2, 3, 4]);
    assert_eq!((dst.capacity(), dst.as_ptr()), (8, ptr));
    assert!(Tester::counts().starts_with(&[0, 0, 2, 2, 2, 0]));
}

#[test] fn clone_from_reallocating_panic_is_strong() {
    let mut dst = testers(&[1, 1]);
    let src = testers(&[2, 3, 4]);
    Tester::fail_after(1);
    let result = catch_unwind(AssertUnwindSafe(|| dst.clone_from(&src)));
    assert!(result.is_err());
    assert_eq!(ids(&dst), [1, 1]);
    assert_eq!(dst.capacity(), 2);
    assert!(Tester::counts().starts_with(&[0, 2, 1, 1, 1, 0]));
}

#[test] fn clone_from_empty() {
    let mut dst = testers(&[1, 2]);
    dst.clone_from(&Vector::new());
    assert!(dst.is_empty());
    assert_eq!(dst.capacity(), 2);
    assert!(Tester::counts().starts_with(&[0, 0, 0]));
}

use crate::raw::RawStorage;
use crate::relocate::Relocate;
use crate::vec::Vector;

use core::iter::FusedIterator;
use core::mem::ManuallyDrop;



impl<T: Relocate> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut v = Self::new();
        v.extend(iter);
        v
    }
}

impl<T: Relocate> Extend<T> for Vector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.try_reserve_additional(iter.size_hint().0).unwrap_or_else(|err| err.raise());
        for item in iter { self.push(item) }
    }
}

impl<'a, T: Copy + Relocate + 'a> Extend<&'a T> for Vector<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.try_reserve_additional(iter.size_hint().0).unwrap_or_else(|err| err.raise());
        for item in iter { self.push(*item) }
    }
}

impl<T: Clone + Relocate> Vector<T> {
    /// Append clones of `slice`, growing (amortized) at most once.
    ///
    /// If a clone panics, the clones appended so far remain.
    #[track_caller] pub fn extend_from_slice(&mut self, slice: &[T]) {
        self.try_reserve_additional(slice.len()).unwrap_or_else(|err| err.raise());
        // SAFETY: ✔️ room for all of `slice` was just reserved
        for value in slice.iter() { unsafe { self.push_within_capacity_unchecked(value.clone()) }; }
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
    fn from(array: [T; N]) -> Self {
        let mut v = Self::with_capacity(N);
        // SAFETY: ✔️ `v` has room for all `N`
        for value in array { unsafe { v.push_within_capacity_unchecked(value) }; }
        v
    }
}

impl<T: Clone> From<&[T]> for Vector<T> {
    fn from(slice: &[T]) -> Self {
        let mut v = Self::with_capacity(slice.len());
        // SAFETY: ✔️ `v` has room for all of `slice`
        for value in slice.iter() { unsafe { v.push_within_capacity_unchecked(value.clone()) }; }
        v
    }
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        let mut v = ManuallyDrop::new(self);
        let storage = core::mem::take(&mut v.storage);
        IntoIter { storage, front: 0, back: v.len }
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter { self.as_slice().iter() }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;
    fn into_iter(self) -> Self::IntoIter { self.as_mut_slice().iter_mut() }
}

/// [`Vector`] converted into an iterator (e.g. the result of <code>vector.[into_iter](Vector::into_iter)\(\)</code>)
pub struct IntoIter<T> {
    storage:    RawStorage<T>,
    front:      usize,
    back:       usize,
}

impl<T> IntoIter<T> {
    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: ✔️ slots `[front, back)` are live and within the block
        unsafe { core::slice::from_raw_parts(self.storage.base().as_ptr().add(self.front), self.back - self.front) }
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // SAFETY: ✔️ slots `[front, back)` are live and within the block
        let to_drop = core::ptr::slice_from_raw_parts_mut(unsafe { self.storage.base().as_ptr().add(self.front) }, self.back - self.front);
        self.front = self.back;
        // SAFETY: ✔️ those slots were never yielded, and are no longer considered live
        unsafe { to_drop.drop_in_place() };
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back { return None }
        // SAFETY: ✔️ slot `front` is live, and is no longer considered such
        let item = unsafe { self.storage.base().as_ptr().add(self.front).read() };
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back { return None }
        self.back -= 1;
        // SAFETY: ✔️ slot `back` was live, and is no longer considered such
        Some(unsafe { self.storage.base().as_ptr().add(self.back).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}



#[cfg(test)] use crate::util::drop::Tester;

#[test] fn collect_and_extend() {
    let mut v : Vector<u32> = (1 ..= 3).collect();
    assert_eq!(v, [1, 2, 3]);
    v.extend(&[4, 5]);
    v.extend_from_slice(&[6]);
    assert_eq!(v, [1, 2, 3, 4, 5, 6]);
    assert_eq!(Vector::from(&[7, 8][..]), [7, 8]);
}

#[test] fn extend_grows_amortized() {
    let mut v = Vector::<u8>::with_capacity(4);
    v.extend([1, 2, 3, 4]);
    v.extend([5]);
    assert_eq!(v.capacity(), 8);
    v.extend_from_slice(&[0; 20]);
    assert_eq!(v.capacity(), 25);
}

#[test] fn borrowed_iteration() {
    let mut v = Vector::from([1, 2, 3]);
    for x in &mut v { *x *= 2 }
    let mut sum = 0;
    for x in &v { sum += x }
    assert_eq!(sum, 12);
}

#[test] fn into_iter() {
    let v = Vector::from([Tester::new(1), Tester::new(2), Tester::new(3), Tester::new(4)]);
    let mut i = v.into_iter();
    assert_eq!(i.len(), 4);
    assert_eq!(i.next().map(|t| t.get()), Some(1));
    assert_eq!(i.next_back().map(|t| t.get()), Some(4));
    assert_eq!(i.as_slice().len(), 2);
    assert!(Tester::counts().starts_with(&[0, 0, 1, 1, 0]));
    drop(i);
    assert!(Tester::counts().starts_with(&[0, 0, 0, 0, 0]));
}

#[test] fn into_iter_exhausted() {
    let mut i = Vector::from([1, 2]).into_iter();
    assert_eq!(i.next(), Some(1));
    assert_eq!(i.next_back(), Some(2));
    assert_eq!(i.next(), None);
    assert_eq!(i.next_back(), None);
    assert_eq!(i.size_hint(), (0, Some(0)));
}

use crate::vec::Vector;

use core::ops::{Index, IndexMut};
use core::slice::SliceIndex;



impl<T, I: SliceIndex<[T]>> Index<I> for Vector<T> {
    type Output = I::Output;
    fn index(&self, index: I) -> &I::Output { self.as_slice().index(index) }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for Vector<T> {
    fn index_mut(&mut self, index: I) -> &mut I::Output { self.as_mut_slice().index_mut(index) }
}



#[test] fn index() {
    let mut v = Vector::from([1, 2, 3, 4]);
    v[1] = 20;
    assert_eq!(v[1], 20);
    assert_eq!(v[2..], [3, 4]);
    v[..2].reverse();
    assert_eq!(v, [20, 1, 3, 4]);
}

#[test] #[should_panic] fn index_past_len() {
    let mut v = Vector::<u8>::with_capacity(8);
    v.push(1);
    let _ = v[1];
}

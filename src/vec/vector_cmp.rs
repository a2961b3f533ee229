use crate::vec::Vector;

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};



impl<T: Eq>     Eq     for Vector<T> {}
impl<T: Ord>    Ord    for Vector<T> { fn cmp(&self, other: &Self) -> Ordering { self.as_slice().cmp(other.as_slice()) } }
impl<T: Hash>   Hash   for Vector<T> { fn hash<H: Hasher>(&self, state: &mut H) { self.as_slice().hash(state) } }

impl<T: PartialEq>  PartialEq  for Vector<T> { fn eq(&self, other: &Self) -> bool { self.as_slice() == other.as_slice() } }
impl<T: PartialOrd> PartialOrd for Vector<T> { fn partial_cmp(&self, other: &Self) -> Option<Ordering> { self.as_slice().partial_cmp(other.as_slice()) } }

impl<T: PartialEq, const N: usize>  PartialEq<[T; N]>   for Vector<T> { fn eq(&self, other: &[T; N])   -> bool { self.as_slice() == other } }
impl<T: PartialEq>                  PartialEq<[T]>      for Vector<T> { fn eq(&self, other: &[T])      -> bool { self.as_slice() == other } }
impl<T: PartialEq>                  PartialEq<&[T]>     for Vector<T> { fn eq(&self, other: &&[T])     -> bool { self.as_slice() == *other } }



#[test] fn compare() {
    let a = Vector::from([1, 2, 3]);
    let b = Vector::from([1, 2, 4]);
    assert!(a < b);
    assert_ne!(a, b);
    assert_eq!(a.cmp(&a.clone()), Ordering::Equal);
    assert_eq!(a, [1, 2, 3]);
    assert_eq!(a, &[1, 2, 3][..]);

    let mut shorter = a.clone();
    shorter.pop_back();
    assert!(shorter < a);
}

use crate::vec::Vector;

use core::borrow::{Borrow, BorrowMut};
use core::ops::{Deref, DerefMut};



// (Auto)Derefs

impl<T> Deref           for Vector<T> { fn deref(&self)             -> &[T]         { self.as_slice()     } type Target = [T]; }
impl<T> DerefMut        for Vector<T> { fn deref_mut(&mut self)     -> &mut [T]     { self.as_mut_slice() } }
impl<T> AsMut<[T]>      for Vector<T> { fn as_mut(&mut self)        -> &mut [T]     { self } }
impl<T> AsMut<Self>     for Vector<T> { fn as_mut(&mut self)        -> &mut Self    { self } }
impl<T> AsRef<[T]>      for Vector<T> { fn as_ref(&self)            -> &[T]         { self } }
impl<T> AsRef<Self>     for Vector<T> { fn as_ref(&self)            -> &Self        { self } }
impl<T> Borrow<[T]>     for Vector<T> { fn borrow(&self)            -> &[T]         { self } }
impl<T> BorrowMut<[T]>  for Vector<T> { fn borrow_mut(&mut self)    -> &mut [T]     { self } }

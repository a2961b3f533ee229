use crate::error::AllocError;
use crate::raw::RawStorage;
use crate::vec::Vector;

use bytemuck::Zeroable;



impl<T: Zeroable> Vector<T> {
    /// `len` zeroed elements, with exactly `len` capacity, from a single zeroing allocation.
    ///
    /// ## Examples
    /// ```
    /// use ivector::Vector;
    /// let v = Vector::<u32>::try_zeroed(4).unwrap();
    /// assert_eq!(v, [0, 0, 0, 0]);
    /// ```
    pub fn try_zeroed(len: usize) -> Result<Self, AllocError> {
        // `T: Zeroable`, so every zeroed slot is already a live `T`
        Ok(Self { storage: RawStorage::try_with_capacity_zeroed(len)?, len })
    }

    #[track_caller] pub fn zeroed(len: usize) -> Self { Self::try_zeroed(len).unwrap_or_else(|err| err.raise()) }
}



#[test] fn zeroed() {
    let v = Vector::<(u8, u64, [i16; 3])>::zeroed(32);
    assert_eq!((v.len(), v.capacity()), (32, 32));
    assert!(v.iter().all(|e| *e == (0, 0, [0; 3])));

    let v = Vector::<Option<core::num::NonZeroU32>>::zeroed(3);
    assert_eq!(v, [None, None, None]);

    let v = Vector::<f32>::zeroed(0);
    assert!(v.raw_storage().as_ptr().is_null());
}

#[test] fn zeroed_then_grow() {
    let mut v = Vector::<u16>::zeroed(2);
    v.push(7);
    assert_eq!(v, [0, 0, 7]);
    assert_eq!(v.capacity(), 4);
}

use crate::error::AllocError;

use core::alloc::Layout;
use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;
use core::mem::MaybeUninit;
use core::ptr::NonNull;



/// An owned block of uninitialized memory with room for exactly `capacity` `T`s.
///
/// [`RawStorage`] never constructs, reads, or drops a `T`.  Whoever sits on top of it (typically [`Vector`](crate::Vector))
/// decides which slots are live, and must have dropped them before the block is released.
///
/// ## Notable Properties
/// | Property          | Behavior                                                                  |
/// | ------------------| --------------------------------------------------------------------------|
/// | Zero capacity     | no allocation, <code>[as_ptr](Self::as_ptr)\(\)</code> is null
/// | Zero-sized `T`    | no allocation, a dangling (well aligned) block of any capacity
/// | Capacity          | fixed at allocation - grow by allocating a new block and [swap](Self::swap)ping
/// | Copying           | unsupported: there's no [`Clone`], only moves and [swap](Self::swap)s
/// | Drop              | frees the block, never the elements
///
pub struct RawStorage<T> {
    data:       Option<NonNull<T>>,
    capacity:   usize,
    _phantom:   PhantomData<T>,
}

// SAFETY: ✔️ T is Send, and we own the block exclusively
unsafe impl<T: Send> Send for RawStorage<T> {}
// SAFETY: ✔️ T is Sync, and &RawStorage only hands out *const / shared views
unsafe impl<T: Sync> Sync for RawStorage<T> {}

impl<T> Drop for RawStorage<T> {
    fn drop(&mut self) {
        let Some(data) = self.data else { return };
        let Ok(layout) = Layout::array::<T>(self.capacity) else { return };
        if layout.size() == 0 { return }
        // SAFETY: ✔️ `data` was allocated by the global allocator with exactly this `layout`, and is never touched again
        unsafe { alloc::alloc::dealloc(data.as_ptr().cast(), layout) };
    }
}

impl<T> Default for RawStorage<T> { fn default() -> Self { Self::new() } }

impl<T> Debug for RawStorage<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawStorage")
            .field("data", &self.as_ptr())
            .field("capacity", &self.capacity)
        .finish()
    }
}

impl<T> RawStorage<T> {
    /// An empty block: null, zero capacity, no allocation.
    pub const fn new() -> Self { Self { data: None, capacity: 0, _phantom: PhantomData } }

    /// Allocate room for `capacity` uninitialized `T`s.
    ///
    /// ## Failure Modes
    /// *   Returns <code>[Err]\([AllocError::CapacityOverflow]\)</code> if `capacity` `T`s would exceed [`isize::MAX`] bytes
    /// *   Returns <code>[Err]\([AllocError::OutOfMemory]\)</code> if the global allocator fails
    ///
    /// ## Examples
    /// ```
    /// use ivector::RawStorage;
    /// let empty = RawStorage::<u32>::try_with_capacity(0).unwrap();
    /// assert!(empty.as_ptr().is_null());
    ///
    /// let four = RawStorage::<u32>::try_with_capacity(4).unwrap();
    /// assert_eq!(four.capacity(), 4);
    /// ```
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> { Self::try_allocate(capacity, false) }

    /// Allocate room for `capacity` `T`s, with every byte of the block zeroed.
    ///
    /// The slots still aren't considered live: zeroed bytes are only a valid `T` if `T` says so (e.g. [`bytemuck::Zeroable`]).
    pub fn try_with_capacity_zeroed(capacity: usize) -> Result<Self, AllocError> { Self::try_allocate(capacity, true) }

    /// Allocate room for `capacity` uninitialized `T`s.
    ///
    /// ## Failure Modes
    /// *   Panics on capacity overflow
    /// *   Calls [`alloc::alloc::handle_alloc_error`] if out of memory
    #[track_caller] pub fn with_capacity(capacity: usize) -> Self { Self::try_with_capacity(capacity).unwrap_or_else(|err| err.raise()) }

    fn try_allocate(capacity: usize, zeroed: bool) -> Result<Self, AllocError> {
        if capacity == 0 { return Ok(Self::new()) }
        let layout = Layout::array::<T>(capacity).map_err(|_| AllocError::CapacityOverflow { requested: capacity })?;
        let data = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            // SAFETY: ✔️ `layout` has a nonzero size (checked above) and was validated by `Layout::array`
            let alloc = unsafe { if zeroed { alloc::alloc::alloc_zeroed(layout) } else { alloc::alloc::alloc(layout) } };
            NonNull::new(alloc.cast()).ok_or(AllocError::OutOfMemory { layout })?
        };
        Ok(Self { data: Some(data), capacity, _phantom: PhantomData })
    }

    #[inline(always)] pub fn capacity(&self) -> usize { self.capacity }

    /// The start of the block, or null if <code>[capacity](Self::capacity)\(\) == 0</code>.
    #[inline(always)] pub fn as_ptr(&self) -> *const T { self.data.map_or(core::ptr::null(), |data| data.as_ptr()) }

    /// The start of the block, or null if <code>[capacity](Self::capacity)\(\) == 0</code>.
    #[inline(always)] pub fn as_mut_ptr(&mut self) -> *mut T { self.data.map_or(core::ptr::null_mut(), |data| data.as_ptr()) }

    /// The start of the block, or a dangling (but aligned) pointer if unallocated.  Valid for zero-length reads and writes either way.
    #[inline(always)] pub(crate) fn base(&self) -> NonNull<T> { self.data.unwrap_or(NonNull::dangling()) }

    /// Pointer to slot `offset`.
    ///
    /// ## Safety
    /// *   `offset <= capacity()` (one-past-the-end is allowed, but mustn't be dereferenced)
    #[inline(always)] pub unsafe fn slot(&self, offset: usize) -> *const T {
        debug_assert!(offset <= self.capacity, "offset {offset} out of bounds of a block with capacity {}", self.capacity);
        // SAFETY: ✔️ `offset <= capacity` per documented preconditions, so this stays within (or one past) the allocation
        unsafe { self.base().as_ptr().add(offset) }
    }

    /// Pointer to slot `offset`.
    ///
    /// ## Safety
    /// *   `offset <= capacity()` (one-past-the-end is allowed, but mustn't be dereferenced)
    #[inline(always)] pub unsafe fn slot_mut(&mut self, offset: usize) -> *mut T {
        debug_assert!(offset <= self.capacity, "offset {offset} out of bounds of a block with capacity {}", self.capacity);
        // SAFETY: ✔️ `offset <= capacity` per documented preconditions, so this stays within (or one past) the allocation
        unsafe { self.base().as_ptr().add(offset) }
    }

    pub fn as_uninit_slice(&self) -> &[MaybeUninit<T>] {
        // SAFETY: ✔️ `base()` is aligned, non-null, and valid for `capacity` slots.  Any bytes are a valid `MaybeUninit<T>`.
        unsafe { core::slice::from_raw_parts(self.base().as_ptr().cast(), self.capacity) }
    }

    pub fn as_uninit_slice_mut(&mut self) -> &mut [MaybeUninit<T>] {
        // SAFETY: ✔️ `base()` is aligned, non-null, and valid for `capacity` slots, which `&mut self` borrows exclusively.
        unsafe { core::slice::from_raw_parts_mut(self.base().as_ptr().cast(), self.capacity) }
    }

    /// Exchange blocks with `other` in O(1).  No slot is touched.
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.data,     &mut other.data);
        core::mem::swap(&mut self.capacity, &mut other.capacity);
    }
}



#[test] fn empty() {
    let s = RawStorage::<u32>::new();
    assert_eq!(s.capacity(), 0);
    assert!(s.as_ptr().is_null());
    assert!(s.as_uninit_slice().is_empty());

    let s = RawStorage::<u32>::with_capacity(0);
    assert_eq!(s.capacity(), 0);
    assert!(s.as_ptr().is_null());
}

#[test] fn allocate() {
    let mut s = RawStorage::<u32>::with_capacity(8);
    assert_eq!(s.capacity(), 8);
    assert!(!s.as_ptr().is_null());
    assert_eq!(s.as_ptr() as usize % core::mem::align_of::<u32>(), 0);
    assert_eq!(s.as_uninit_slice_mut().len(), 8);

    for (i, slot) in s.as_uninit_slice_mut().iter_mut().enumerate() { slot.write(i as u32); }
    // SAFETY: ✔️ every slot was just written, `7 <= capacity`
    let last = unsafe { *s.slot(7) };
    assert_eq!(last, 7);
    // SAFETY: ✔️ one-past-the-end is allowed
    let end = unsafe { s.slot(8) };
    assert_eq!(end as usize - s.as_ptr() as usize, 8 * core::mem::size_of::<u32>());
}

#[test] fn zeroed() {
    let s = RawStorage::<u64>::try_with_capacity_zeroed(16).unwrap();
    // SAFETY: ✔️ the block was zeroed, and 0 is a valid u64
    assert!(s.as_uninit_slice().iter().all(|slot| unsafe { slot.assume_init_read() } == 0));
}

#[test] fn zst() {
    let s = RawStorage::<()>::with_capacity(usize::MAX);
    assert_eq!(s.capacity(), usize::MAX);
    assert!(!s.as_ptr().is_null());
}

#[test] fn capacity_overflow() {
    let err = RawStorage::<u64>::try_with_capacity(usize::MAX / 4).unwrap_err();
    assert_eq!(err, AllocError::CapacityOverflow { requested: usize::MAX / 4 });
}

#[test] fn swap_and_take() {
    let mut a = RawStorage::<u16>::with_capacity(3);
    let mut b = RawStorage::<u16>::new();
    let a_ptr = a.as_ptr();

    a.swap(&mut b);
    assert_eq!((a.capacity(), b.capacity()), (0, 3));
    assert!(a.as_ptr().is_null());
    assert_eq!(b.as_ptr(), a_ptr);

    let c = core::mem::take(&mut b);
    assert_eq!(c.capacity(), 3);
    assert_eq!(c.as_ptr(), a_ptr);
    assert_eq!(b.capacity(), 0);
    assert!(b.as_ptr().is_null());
}

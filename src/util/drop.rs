#![allow(dead_code)] // some used for test code

#[cfg(test)] use core::marker::PhantomData;
use core::ptr::NonNull;



/// Drops `*ptr` (often a partially constructed `[T]`) if unwinding, unless [forgotten](Self::forget) first.
pub struct InPlaceOnDrop<T: ?Sized>(Option<NonNull<T>>);

impl<T: ?Sized> InPlaceOnDrop<T> {
    /// ### Safety
    /// *   `*to_drop_on_drop` (if non-null) must be live, and dropped by nothing else unless this guard is forgotten
    pub unsafe fn new(to_drop_on_drop: *mut T) -> Self { Self(NonNull::new(to_drop_on_drop)) }
    pub fn forget(self) { core::mem::forget(self) }

    /// ### Safety
    /// *   Same as [`InPlaceOnDrop::new`]
    pub unsafe fn set(&mut self, to_drop_on_drop: *mut T) { self.0 = NonNull::new(to_drop_on_drop) }
}

impl<T: ?Sized> core::ops::Drop for InPlaceOnDrop<T> {
    fn drop(&mut self) {
        if let Some(to_drop) = self.0 {
            // SAFETY: ✔️ `to_drop` is live and exclusively ours to drop per `new` / `set` preconditions
            unsafe { core::ptr::drop_in_place(to_drop.as_ptr()) }
        }
    }
}

impl<T: ?Sized> Default for InPlaceOnDrop<T> {
    fn default() -> Self { Self(None) }
}



#[cfg(test)] std::thread_local! {
    static TESTER_COUNTS    : [core::cell::Cell<usize>; 256] = [(); 256].map(|_| core::cell::Cell::new(0));
    static TESTER_COPIES    : core::cell::Cell<usize> = const { core::cell::Cell::new(0) };
    static TESTER_FAIL_IN   : core::cell::Cell<usize> = const { core::cell::Cell::new(usize::MAX) };
}

/// Counts live instances per `data` value: catches leaks and double drops.
#[cfg(test)] #[derive(Debug)] pub struct Tester {
    data: u8,
    _phantom: PhantomData<*const ()>,
}

#[cfg(test)] impl Tester {
    pub fn new(data: u8) -> Self { TESTER_COUNTS.with(|tc| tc[data as usize].set(tc[data as usize].get() + 1)); Self { data, _phantom: PhantomData } }
    pub fn get(&self) -> u8 { self.data }
    pub fn counts() -> [usize; 256] { TESTER_COUNTS.with(|tc| tc.clone().map(|c| c.get())) }

    /// Copies made (by [`Clone`]) on this thread so far.
    pub fn copies() -> usize { TESTER_COPIES.with(|c| c.get()) }

    /// Let `n` more [`Clone`]s succeed, then panic on the next one (`usize::MAX` to disarm).
    pub fn fail_after(n: usize) { TESTER_FAIL_IN.with(|f| f.set(n)) }

    fn copy(&self) -> Self {
        TESTER_FAIL_IN.with(|f| match f.get() {
            usize::MAX  => {},
            0           => { f.set(usize::MAX); panic!("Tester::clone({}) failed on purpose", self.data) },
            n           => f.set(n - 1),
        });
        TESTER_COPIES.with(|c| c.set(c.get() + 1));
        Self::new(self.data)
    }
}

#[cfg(test)] impl core::ops::Deref for Tester {
    type Target = u8;
    fn deref(&self) -> &u8 { &self.data }
}

#[cfg(test)] impl Drop for Tester {
    fn drop(&mut self) {
        let data = self.data as usize;
        TESTER_COUNTS.with(|tc| tc[data].set(tc[data].get().checked_sub(1).expect("count went negative, a util::drop::Tester was presumably dropped multiple times")))
    }
}

#[cfg(test)] impl Clone for Tester {
    fn clone(&self) -> Self { self.copy() }
}

#[cfg(test)] impl Default for Tester {
    fn default() -> Self { Self::new(0) }
}

#[cfg(test)] impl PartialEq for Tester { fn eq(&self, other: &Self) -> bool { self.data == other.data } }

#[cfg(test)] crate::relocate_by_move!(Tester);



/// A [`Tester`] whose move "may fail": relocated by copy.
#[cfg(test)] #[derive(Clone, Debug, Default, PartialEq)] pub struct CopyTester(pub Tester);

#[cfg(test)] impl CopyTester {
    pub fn new(data: u8) -> Self { Self(Tester::new(data)) }
    pub fn get(&self) -> u8 { self.0.get() }
    pub fn fail_after(n: usize) { Tester::fail_after(n) }
}

#[cfg(test)] crate::relocate_by_copy!(CopyTester);

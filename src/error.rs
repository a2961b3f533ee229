//! [`AllocError`] (and any future error types)

use core::alloc::Layout;
use core::fmt::{self, Display, Formatter};



/// A [`RawStorage`](crate::RawStorage) block couldn't be acquired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)] pub enum AllocError {
    /// `requested` elements can't be described by a [`Layout`] (the byte size would exceed [`isize::MAX`]), or growth overflowed [`usize`].
    CapacityOverflow { requested: usize },

    /// The global allocator returned null for `layout`.
    OutOfMemory { layout: Layout },
}

impl AllocError {
    /// Panic (capacity overflow) or defer to [`alloc::alloc::handle_alloc_error`] (out of memory).
    #[track_caller] pub(crate) fn raise(self) -> ! {
        match self {
            AllocError::CapacityOverflow { .. } => panic!("{self}"),
            AllocError::OutOfMemory { layout }  => alloc::alloc::handle_alloc_error(layout),
        }
    }
}

impl Display for AllocError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AllocError::CapacityOverflow { requested }  => write!(f, "capacity overflow: {requested} elements requested"),
            AllocError::OutOfMemory { layout }          => write!(f, "out of memory: failed to allocate {} bytes with {} byte alignment", layout.size(), layout.align()),
        }
    }
}

#[cfg(feature = "std")] impl std::error::Error for AllocError { fn description(&self) -> &str { "failed to allocate raw storage" } }

#[cfg(feature = "std")] impl From<AllocError> for std::io::Error {
    fn from(err: AllocError) -> Self {
        match err {
            AllocError::CapacityOverflow { .. } => std::io::Error::new(std::io::ErrorKind::OutOfMemory, err),
            AllocError::OutOfMemory { .. }      => std::io::Error::from(std::io::ErrorKind::OutOfMemory),
        }
    }
}



#[test] fn display() {
    use alloc::string::ToString;
    let err = AllocError::CapacityOverflow { requested: usize::MAX };
    assert_eq!(err.to_string(), std::format!("capacity overflow: {} elements requested", usize::MAX));

    let err = AllocError::OutOfMemory { layout: Layout::new::<[u8; 8]>() };
    assert_eq!(err.to_string(), "out of memory: failed to allocate 8 bytes with 1 byte alignment");
}

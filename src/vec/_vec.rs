//! [`Vector`]: size-tracked dynamic array on top of [`RawStorage`](crate::RawStorage)

mod vector;                 pub use vector::*;
mod vector_bytemuck;
mod vector_clone;
mod vector_cmp;
mod vector_deref;
mod vector_fmt;
mod vector_index;
mod vector_insert;
mod vector_io;
mod vector_iter;            pub use vector_iter::*;

#![doc = include_str!("../Readme.md")]
#![no_std]

#![forbid(unreachable_patterns)] // often indicates e.g. a typoed "constant" in a match statement
#![forbid(unsafe_op_in_unsafe_fn)]
#![deny(non_snake_case)] // often indicates e.g. a typoed "constant" in a match statement
#![warn(clippy::undocumented_unsafe_blocks)]
#![cfg_attr(not(feature = "default"), allow(dead_code, unused_imports))] // suppress noisy "dead code" warnings in non-default build configs

extern crate alloc;
#[cfg(any(feature = "std", doc, test))] extern crate std;


#[macro_use] mod _macros;

#[path = "raw/_raw.rs"                  ] pub mod raw;
#[path = "util/_util.rs"                ] mod util;
#[path = "vec/_vec.rs"                  ] pub mod vec;

#[doc(hidden)] pub mod bug;
pub mod error;
pub mod relocate;

pub use raw::RawStorage;
pub use relocate::{Relocate, Relocation};
pub use vec::Vector;

//! Raw, capacity-only storage blocks (no element lifetimes)

mod storage;                pub use storage::*;

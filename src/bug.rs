//! Bug reporting panics

/// Report caller bugs that would be Undefined Behavior in an unchecked container
pub mod ub {
    #[track_caller] #[inline(never)] pub fn pop_back_empty() -> ! {
        ub!("bug: undefined behavior: pop_back() called on an empty Vector");
    }

    #[track_caller] #[inline(never)] pub fn insert_out_of_bounds(pos: usize, len: usize) -> ! {
        ub!("bug: undefined behavior: insertion position {pos} is past the end of a Vector of length {len}");
    }

    #[track_caller] #[inline(never)] pub fn erase_out_of_bounds(pos: usize, len: usize) -> ! {
        ub!("bug: undefined behavior: erase position {pos} is not a live element of a Vector of length {len}");
    }

    #[track_caller] #[inline(never)] pub fn set_len_past_capacity(len: usize, capacity: usize) -> ! {
        ub!("bug: undefined behavior: length {len} exceeds capacity {capacity}");
    }
}

//! Reading the engine's bit-packed cell buffer.
//!
//! Cells are stored row-major, one bit each, with cell `i` at bit `i % 8` of byte `i / 8`:
//!
//! ```notrust
//!  byte 0               byte 1
//!  7 6 5 4 3 2 1 0      15 14 13 12 11 10 9 8
//! ```

/// Number of bytes needed to hold `n` cells
pub const fn packed_len(n: usize) -> usize {
    n.div_ceil(8)
}

/// Whether the cell at linear index `i` is alive. Indices past the end of `cells` read as dead.
pub fn is_alive(i: usize, cells: &[u8]) -> bool {
    let byte = i / 8;
    let mask = 1u8 << (i % 8);

    cells.get(byte).is_some_and(|b| b & mask != 0)
}

#![no_std]
pub mod bits;
pub mod globals;

/// One scan line's worth of sense bits. Bit `n` is sense line `n`; 1 means pressed.
pub type RowBits = u32;

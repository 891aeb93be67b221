/// Quiet scan cycles required before a pending snapshot is committed.
pub const DEBOUNCE_DEFAULT: u8 = 5;

/// Pause after changing the active scan line before the sense lines are read.
pub const SETTLE_US_DEFAULT: u32 = 30;

/// Pause at the end of a scan cycle that is still debouncing.
pub const DEBOUNCE_DELAY_US_DEFAULT: u32 = 1000;

/// Width of [`crate::RowBits`].
pub const MAX_SENSE_LINES: usize = 32;

/// Scan line indices are reported as `u8`.
pub const MAX_SCAN_LINES: usize = 256;

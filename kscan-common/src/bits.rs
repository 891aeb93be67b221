use crate::RowBits;

/// Number of pressed keys in a row.
#[inline]
pub fn bitpop(bits: RowBits) -> u32 {
    bits.count_ones()
}

/// Index of the highest set bit; 0 when no bit is set.
///
/// Used to find the highest active layer in a layer state word.
///
/// # Example
///
/// ```
/// use kscan_common::bits::biton32;
///
/// assert_eq!(biton32(0), 0);
/// assert_eq!(biton32(0b1), 0);
/// assert_eq!(biton32(0b1010), 3);
/// ```
#[inline]
pub fn biton32(bits: u32) -> u8 {
    if bits == 0 {
        0
    } else {
        bits.ilog2() as u8
    }
}

#[cfg(test)]
#[path = "bits_test.rs"]
mod test;

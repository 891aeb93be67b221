//! The debounced key bitmap read by the key interpreter.

use core::fmt;

use kscan_common::{bits, RowBits};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MatrixState<const ROWS: usize> {
    bits: [RowBits; ROWS],
    /// Number of sense lines; only the lowest `cols` bits of a row are meaningful.
    cols: u8,
}

impl<const ROWS: usize> MatrixState<ROWS> {
    pub const fn new(cols: u8) -> Self {
        Self {
            bits: [0; ROWS],
            cols,
        }
    }

    pub fn rows(&self) -> usize {
        ROWS
    }

    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    pub fn is_pressed(&self, scan_index: usize, sense_index: usize) -> bool {
        sense_index < RowBits::BITS as usize && self.row(scan_index) & (1 << sense_index) != 0
    }

    pub fn row(&self, scan_index: usize) -> RowBits {
        self.bits.get(scan_index).copied().unwrap_or(0)
    }

    pub fn count_pressed(&self) -> u32 {
        self.bits.iter().map(|&r| bits::bitpop(r)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = RowBits> + '_ {
        self.bits.iter().copied()
    }

    pub(crate) fn as_array(&self) -> &[RowBits; ROWS] {
        &self.bits
    }

    pub(crate) fn as_mut_array(&mut self) -> &mut [RowBits; ROWS] {
        &mut self.bits
    }

    /// Keys that differ between `self` and `newer`, as `(scan, sense, is_down)` with `is_down`
    /// taken from `newer`.
    pub fn diff<'a>(
        &'a self,
        newer: &'a MatrixState<ROWS>,
    ) -> impl Iterator<Item = (usize, usize, bool)> + 'a {
        self.bits
            .iter()
            .zip(newer.bits.iter())
            .enumerate()
            .flat_map(|(scan, (&old, &new))| {
                let flipped = old ^ new;
                (0..RowBits::BITS as usize)
                    .filter(move |b| flipped & (1 << b) != 0)
                    .map(move |b| (scan, b, new & (1 << b) != 0))
            })
    }
}

/// One row as `0`/`1` characters, sense line 0 first.
pub fn format_row(bits: RowBits, width: usize) -> heapless::String<32> {
    let mut s = heapless::String::new();
    for i in 0..width.min(RowBits::BITS as usize) {
        let _ = s.push(if bits & (1 << i) != 0 { '1' } else { '0' });
    }
    s
}

impl<const ROWS: usize> fmt::Display for MatrixState<ROWS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.view(ROWS), f)
    }
}

/// The dump of only the first `rows` scan lines of a [`MatrixState`].
pub struct MatrixView<'a, const ROWS: usize> {
    state: &'a MatrixState<ROWS>,
    rows: usize,
}

impl<const ROWS: usize> MatrixState<ROWS> {
    pub fn view(&self, rows: usize) -> MatrixView<'_, ROWS> {
        MatrixView {
            state: self,
            rows: rows.min(ROWS),
        }
    }
}

impl<const ROWS: usize> fmt::Display for MatrixView<'_, ROWS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cols = self.state.cols();
        write!(f, "r/c ")?;
        for i in 0..cols {
            write!(f, "{:X}", i & 0xf)?;
        }
        writeln!(f)?;
        for (i, &row) in self.state.bits[..self.rows].iter().enumerate() {
            writeln!(f, "{:02X}: {}", i, format_row(row, cols))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "matrix_test.rs"]
mod test;

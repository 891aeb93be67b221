//! Whole-matrix debounce.
//!
//! A single counter covers the entire matrix: any flip anywhere restarts the quiet period, and
//! only once the whole matrix has been quiet for `threshold` scans is the pending snapshot
//! copied, in full, into the committed one. A key pressed while another is bouncing is delayed
//! until both settle.

use kscan_common::RowBits;

use crate::matrix::MatrixState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceState {
    /// No flip seen for at least `threshold` scans; committed equals pending.
    Settled,
    /// A flip was seen within the last `threshold` scans.
    Debouncing,
}

#[derive(Debug)]
pub struct Debouncer<const ROWS: usize> {
    /// Latest raw reading.
    pending: [RowBits; ROWS],
    committed: MatrixState<ROWS>,
    /// Committed state as it was before the last update.
    previous: MatrixState<ROWS>,
    counter: u8,
    threshold: u8,
    changed: bool,
}

impl<const ROWS: usize> Debouncer<ROWS> {
    pub const fn new(threshold: u8, cols: u8) -> Self {
        Self {
            pending: [0; ROWS],
            committed: MatrixState::new(cols),
            previous: MatrixState::new(cols),
            counter: 0,
            threshold,
            changed: false,
        }
    }

    /// Feed one full-matrix raw sample. Returns true if the committed state changed.
    pub fn update(&mut self, raw: &[RowBits; ROWS]) -> bool {
        self.previous = self.committed;
        self.changed = false;

        let mut flipped = false;
        for (pending, &raw) in self.pending.iter_mut().zip(raw.iter()) {
            if *pending != raw {
                *pending = raw;
                flipped = true;
            }
        }

        if flipped {
            if self.counter != 0 {
                crate::debug!("bounce! {}", self.counter);
            }
            self.counter = self.threshold;
            if self.counter == 0 {
                self.commit();
            }
        } else if self.counter != 0 {
            self.counter -= 1;
            if self.counter == 0 {
                self.commit();
            }
        }

        self.changed
    }

    fn commit(&mut self) {
        if *self.committed.as_array() != self.pending {
            *self.committed.as_mut_array() = self.pending;
            self.changed = true;
        }
    }

    pub fn state(&self) -> DebounceState {
        if self.counter == 0 {
            DebounceState::Settled
        } else {
            DebounceState::Debouncing
        }
    }

    /// True when the last update ended settled and changed the committed state.
    pub fn has_changed(&self) -> bool {
        self.changed
    }

    pub fn committed(&self) -> &MatrixState<ROWS> {
        &self.committed
    }

    pub fn pending(&self) -> &[RowBits; ROWS] {
        &self.pending
    }

    /// Keys whose committed state changed in the last update.
    pub fn changes(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.previous.diff(&self.committed)
    }

    pub fn counter(&self) -> u8 {
        self.counter
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }
}

#[cfg(test)]
#[path = "debounce_test.rs"]
mod test;

use embedded_hal::delay::DelayNs;
use kscan_common::RowBits;

use crate::{
    config::{ConfigError, MatrixConfig, Orientation},
    debounce::{DebounceState, Debouncer},
    line_driver::LineDriver,
    matrix::{format_row, MatrixState},
    sampler,
    sequencer::SelectSequencer,
};

/// A committed key change in the interpreter's `(row, column)` terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanKey {
    row: u8,
    col: u8,
    is_down: bool,
}

impl ScanKey {
    pub const fn new(row: u8, col: u8, is_down: bool) -> Self {
        Self { row, col, is_down }
    }

    pub fn row(&self) -> usize {
        self.row as usize
    }

    pub fn column(&self) -> usize {
        self.col as usize
    }

    pub fn is_down(&self) -> bool {
        self.is_down
    }
}

/// Samples the whole matrix once per [`Self::scan`] and debounces the result.
///
/// Exactly one caller owns the scanner; a scan is a bounded, blocking pass over every scan line.
pub struct MatrixScanner<'c, D: LineDriver, Y: DelayNs, const ROWS: usize> {
    config: &'c MatrixConfig<ROWS>,
    sequencer: SelectSequencer<'c, ROWS>,
    debouncer: Debouncer<ROWS>,
    driver: D,
    delay: Y,
    raw: [RowBits; ROWS],
}

impl<'c, D: LineDriver, Y: DelayNs, const ROWS: usize> MatrixScanner<'c, D, Y, ROWS> {
    pub fn new(config: &'c MatrixConfig<ROWS>, driver: D, delay: Y) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            sequencer: SelectSequencer::new(config),
            debouncer: Debouncer::new(config.debounce, config.sense_count() as u8),
            driver,
            delay,
            raw: [0; ROWS],
        })
    }

    /// Configure the lines. Call once before the first scan.
    pub fn init(&mut self) {
        self.sequencer.init(&mut self.driver);
        crate::info!(
            "matrix {}x{} debounce {}",
            ROWS,
            self.config.sense_count(),
            self.config.debounce
        );
    }

    /// Sample every scan line and run one debounce cycle. Returns true if the committed state
    /// changed.
    pub fn scan(&mut self) -> bool {
        for (i, raw) in self.raw.iter_mut().enumerate() {
            self.sequencer.activate(i, &mut self.driver, &mut self.delay);
            *raw = sampler::sample(&mut self.driver, self.config.sense_lines);
        }
        self.sequencer.deactivate_all(&mut self.driver);

        let changed = self.debouncer.update(&self.raw);

        if self.debouncer.state() == DebounceState::Debouncing && self.config.debounce_delay_us != 0
        {
            self.delay.delay_us(self.config.debounce_delay_us);
        }

        changed
    }

    /// True when the last scan committed a new state. False while debouncing.
    pub fn has_changed_since_last_scan(&self) -> bool {
        self.debouncer.has_changed()
    }

    pub fn is_pressed(&self, scan_index: usize, sense_index: usize) -> bool {
        self.debouncer.committed().is_pressed(scan_index, sense_index)
    }

    pub fn row(&self, scan_index: usize) -> RowBits {
        self.debouncer.committed().row(scan_index)
    }

    pub fn count_pressed(&self) -> u32 {
        self.debouncer.committed().count_pressed()
    }

    pub fn matrix(&self) -> &MatrixState<ROWS> {
        self.debouncer.committed()
    }

    pub fn debouncer(&self) -> &Debouncer<ROWS> {
        &self.debouncer
    }

    pub fn rows(&self) -> usize {
        ROWS
    }

    pub fn cols(&self) -> usize {
        self.config.sense_count()
    }

    /// Keys whose committed state changed in the last scan, in interpreter coordinates.
    pub fn changes(&self) -> impl Iterator<Item = ScanKey> + '_ {
        let orientation = self.config.orientation;
        self.debouncer
            .changes()
            .map(move |(scan, sense, is_down)| match orientation {
                Orientation::RowIsScan => ScanKey::new(scan as u8, sense as u8, is_down),
                Orientation::ColIsScan => ScanKey::new(sense as u8, scan as u8, is_down),
            })
    }

    /// Log the committed matrix, one row per line.
    pub fn log_matrix(&self) {
        for (i, row) in self.matrix().iter().enumerate() {
            crate::debug!("{}: {}", i, format_row(row, self.cols()).as_str());
        }
    }

    pub fn release(self) -> (D, Y) {
        (self.driver, self.delay)
    }
}

#[cfg(test)]
#[path = "key_scanner_test.rs"]
mod test;

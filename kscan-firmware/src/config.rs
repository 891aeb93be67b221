//! Static description of a switch matrix: which lines select, which lines sense, and the
//! debounce timing. Built once at startup; never changed afterwards.

use kscan_common::globals;

use crate::line_driver::{LineId, Level};

/// One line of a select code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Select {
    pub line: LineId,
    pub level: Level,
}
impl Select {
    pub const fn low(line: LineId) -> Self {
        Self {
            line,
            level: Level::Low,
        }
    }

    pub const fn high(line: LineId) -> Self {
        Self {
            line,
            level: Level::High,
        }
    }
}

/// One addressable row, or demultiplexed column.
///
/// A directly wired row has a single [`Select`]; a demultiplexer needs a code across several
/// lines. Select lines not named in the code stay at the [`Idle`] level while it is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanLine {
    pub select: &'static [Select],
}
impl ScanLine {
    pub const fn new(select: &'static [Select]) -> Self {
        Self { select }
    }

    fn same_code(&self, other: &ScanLine) -> bool {
        self.select.len() == other.select.len()
            && self.select.iter().all(|s| other.select.contains(s))
    }
}

/// An input read while a scan line is active. Always active-low: electrically low means pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SenseLine {
    pub line: LineId,
}
impl SenseLine {
    pub const fn new(line: LineId) -> Self {
        Self { line }
    }
}

/// The inactive state of every select line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Idle {
    /// High-impedance.
    Release,
    DriveHigh,
    DriveLow,
}

/// How a `(scan, sense)` pair maps to the key interpreter's `(row, column)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    RowIsScan,
    ColIsScan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    NoScanLines,
    TooManyScanLines,
    NoSenseLines,
    TooManySenseLines,
    EmptySelectCode(u8),
    UnknownSelectLine(u8),
    DuplicateSelectCode(u8, u8),
    DuplicateSenseLine(u8),
    SenseLineUsedForSelect(u8),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoScanLines => write!(f, "no scan lines"),
            Self::TooManyScanLines => {
                write!(f, "more than {} scan lines", globals::MAX_SCAN_LINES)
            }
            Self::NoSenseLines => write!(f, "no sense lines"),
            Self::TooManySenseLines => write!(
                f,
                "more than {} sense lines",
                globals::MAX_SENSE_LINES
            ),
            Self::EmptySelectCode(i) => write!(f, "scan line {i} has an empty select code"),
            Self::UnknownSelectLine(i) => write!(
                f,
                "scan line {i} selects a line missing from the select lines"
            ),
            Self::DuplicateSelectCode(i, j) => {
                write!(f, "scan lines {i} and {j} have the same select code")
            }
            Self::DuplicateSenseLine(line) => write!(f, "line {line} sensed twice"),
            Self::SenseLineUsedForSelect(line) => {
                write!(f, "line {line} is used to both sense and select")
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MatrixConfig<const ROWS: usize> {
    /// Scan order. Index `i` is row `i` of the committed snapshot.
    pub scan_lines: [ScanLine; ROWS],
    /// Sense line `n` is bit `n` of every row.
    pub sense_lines: &'static [SenseLine],
    /// Every line that takes part in a select code.
    pub select_lines: &'static [LineId],
    pub idle: Idle,
    pub orientation: Orientation,
    /// Quiet scan cycles required before committing. 0 commits every change immediately.
    pub debounce: u8,
    /// Pause after activating a scan line before sampling.
    pub settle_us: u32,
    /// Pause at the end of a cycle that is still debouncing. 0 disables.
    pub debounce_delay_us: u32,
}

impl<const ROWS: usize> MatrixConfig<ROWS> {
    /// A row-scanned matrix with default timing.
    pub const fn new(
        scan_lines: [ScanLine; ROWS],
        sense_lines: &'static [SenseLine],
        select_lines: &'static [LineId],
        idle: Idle,
    ) -> Self {
        Self {
            scan_lines,
            sense_lines,
            select_lines,
            idle,
            orientation: Orientation::RowIsScan,
            debounce: globals::DEBOUNCE_DEFAULT,
            settle_us: globals::SETTLE_US_DEFAULT,
            debounce_delay_us: 0,
        }
    }

    pub const fn orientation(mut self, value: Orientation) -> Self {
        self.orientation = value;
        self
    }

    pub const fn debounce(mut self, value: u8) -> Self {
        self.debounce = value;
        self
    }

    pub const fn settle_us(mut self, value: u32) -> Self {
        self.settle_us = value;
        self
    }

    pub const fn debounce_delay_us(mut self, value: u32) -> Self {
        self.debounce_delay_us = value;
        self
    }

    pub fn sense_count(&self) -> usize {
        self.sense_lines.len()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if ROWS == 0 {
            return Err(ConfigError::NoScanLines);
        }
        if ROWS > globals::MAX_SCAN_LINES {
            return Err(ConfigError::TooManyScanLines);
        }
        if self.sense_lines.is_empty() {
            return Err(ConfigError::NoSenseLines);
        }
        if self.sense_lines.len() > globals::MAX_SENSE_LINES {
            return Err(ConfigError::TooManySenseLines);
        }

        for (i, sense) in self.sense_lines.iter().enumerate() {
            if self.sense_lines[..i].contains(sense) {
                return Err(ConfigError::DuplicateSenseLine(sense.line));
            }
            if self.select_lines.contains(&sense.line) {
                return Err(ConfigError::SenseLineUsedForSelect(sense.line));
            }
        }

        for (i, scan) in self.scan_lines.iter().enumerate() {
            if scan.select.is_empty() {
                return Err(ConfigError::EmptySelectCode(i as u8));
            }
            if scan
                .select
                .iter()
                .any(|s| !self.select_lines.contains(&s.line))
            {
                return Err(ConfigError::UnknownSelectLine(i as u8));
            }
            if let Some(j) = self.scan_lines[..i].iter().position(|o| o.same_code(scan)) {
                return Err(ConfigError::DuplicateSelectCode(j as u8, i as u8));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod test;

//! Frosty Flake controller: 18 columns selected through two 74HC42 4-to-10 demultiplexers,
//! 8 rows sensed.
//!
//! Each column is a code across six port lines; the lines not in a code are held low.

use kscan_common::globals;
use kscan_firmware::{Idle, LineId, MatrixConfig, Orientation, ScanLine, Select, SenseLine};

use crate::avr::{pin, Port, Port::*};

pub const COLS: usize = 18;
pub const ROWS: usize = 8;

const SETTLE_US: u32 = 3;
const DEBOUNCE_DELAY_US: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Revision {
    R20140521,
    R20130602,
}

impl Revision {
    pub const ALL: [Revision; 2] = [Revision::R20140521, Revision::R20130602];

    pub fn config(self) -> &'static MatrixConfig<COLS> {
        match self {
            Revision::R20140521 => &REV_20140521,
            Revision::R20130602 => &REV_20130602,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Revision::R20140521 => "frosty-flake",
            Revision::R20130602 => "frosty-flake-20130602",
        }
    }

    /// The port driving the demultiplexer inputs.
    pub fn select_port(self) -> Port {
        match self {
            Revision::R20140521 => D,
            Revision::R20130602 => B,
        }
    }
}

macro_rules! code {
    ($port:ident: $($bit:literal)*) => {
        ScanLine {
            select: &[$(Select::high(pin($port, $bit))),*],
        }
    };
}

macro_rules! rows {
    ($($port:ident $bit:literal),*) => {
        &[$(SenseLine { line: pin($port, $bit) }),*]
    };
}

static REV_20140521: MatrixConfig<COLS> = MatrixConfig {
    scan_lines: [
        code!(D: 0 1 5),
        code!(D: 3 4 5 6),
        code!(D: 0 1 4),
        code!(D: 0 3 5 6),
        code!(D: 0 1 3),
        code!(D: 0 1 3 4 5),
        code!(D: 3 5 6),
        code!(D: 5 6),
        code!(D: 4 5 6),
        code!(D: 0 5 6),
        code!(D: 0 4 5 6),
        code!(D: 1 5 6),
        code!(D: 0 3 4 5 6),
        code!(D: 1 3 5 6),
        code!(D: 0 1 6),
        code!(D: 0 1 3 4),
        code!(D: 0 1 3 5),
        code!(D: 0 1 4 5),
    ],
    sense_lines: rows!(C 7, B 5, B 4, B 6, B 1, B 0, B 3, B 2),
    select_lines: &[
        pin(D, 0),
        pin(D, 1),
        pin(D, 3),
        pin(D, 4),
        pin(D, 5),
        pin(D, 6),
    ],
    idle: Idle::DriveLow,
    orientation: Orientation::ColIsScan,
    debounce: globals::DEBOUNCE_DEFAULT,
    settle_us: SETTLE_US,
    debounce_delay_us: DEBOUNCE_DELAY_US,
};

static REV_20130602: MatrixConfig<COLS> = MatrixConfig {
    scan_lines: [
        code!(B: 2 3 4 5),
        code!(B: 1 2 5 6),
        code!(B: 3 4 5),
        code!(B: 1 4 5 6),
        code!(B: 1 2 3 4),
        code!(B: 1 2 3 4 5),
        code!(B: 1 5 6),
        code!(B: 5 6),
        code!(B: 2 5 6),
        code!(B: 3 5 6),
        code!(B: 1 3 5 6),
        code!(B: 2 3 5 6),
        code!(B: 1 2 3 5 6),
        code!(B: 4 5 6),
        code!(B: 3 4 6),
        code!(B: 1 3 4 5),
        code!(B: 1 3 4),
        code!(B: 3 4),
    ],
    sense_lines: rows!(C 2, D 0, D 1, C 7, D 5, D 6, D 2, D 4),
    select_lines: &[
        pin(B, 1),
        pin(B, 2),
        pin(B, 3),
        pin(B, 4),
        pin(B, 5),
        pin(B, 6),
    ],
    idle: Idle::DriveLow,
    orientation: Orientation::ColIsScan,
    debounce: globals::DEBOUNCE_DEFAULT,
    settle_us: SETTLE_US,
    debounce_delay_us: DEBOUNCE_DELAY_US,
};

/// The select code of `column` as a port mask: bit n set when pin n is driven high.
pub fn column_mask(revision: Revision, column: usize) -> Option<u8> {
    let scan = revision.config().scan_lines.get(column)?;
    Some(
        scan.select
            .iter()
            .fold(0, |mask, s| mask | crate::avr::mask(s.line)),
    )
}

/// Every select line of `revision` as a port mask.
pub fn select_mask(revision: Revision) -> u8 {
    revision
        .config()
        .select_lines
        .iter()
        .fold(0, |mask, &line: &LineId| mask | crate::avr::mask(line))
}

#[cfg(test)]
#[path = "frosty_flake_test.rs"]
mod test;

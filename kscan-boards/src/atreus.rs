//! Atreus: 4 rows by 11 columns, rows selected directly, columns sensed.
//!
//! Three wirings exist. The A-Star Micro and Teensy 2.0 builds hold unselected rows high and
//! differ in row order and column pins. The Jou build releases unselected rows to Hi-Z.

use kscan_common::globals;
use kscan_firmware::{Idle, LineId, MatrixConfig, Orientation, ScanLine, Select, SenseLine};

use crate::avr::{pin, Port::*};

pub const ROWS: usize = 4;
pub const COLS: usize = 11;

const SETTLE_US: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Wiring {
    AStar,
    Teensy,
    Jou,
}

impl Wiring {
    pub const ALL: [Wiring; 3] = [Wiring::AStar, Wiring::Teensy, Wiring::Jou];

    pub fn config(self) -> &'static MatrixConfig<ROWS> {
        match self {
            Wiring::AStar => &A_STAR,
            Wiring::Teensy => &TEENSY,
            Wiring::Jou => &JOU,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Wiring::AStar => "atreus",
            Wiring::Teensy => "atreus-teensy",
            Wiring::Jou => "atreus-jou",
        }
    }
}

macro_rules! row {
    ($port:ident $bit:literal) => {
        ScanLine {
            select: &[Select::low(pin($port, $bit))],
        }
    };
}

macro_rules! cols {
    ($($port:ident $bit:literal),*) => {
        &[$(SenseLine { line: pin($port, $bit) }),*]
    };
}

const PORTD_ROWS: &[LineId] = &[pin(D, 0), pin(D, 1), pin(D, 2), pin(D, 3)];

static A_STAR: MatrixConfig<ROWS> = MatrixConfig {
    scan_lines: [row!(D 0), row!(D 1), row!(D 3), row!(D 2)],
    sense_lines: cols!(B 7, D 6, F 7, F 6, B 6, D 4, E 6, B 4, B 5, C 6, D 7),
    select_lines: PORTD_ROWS,
    idle: Idle::DriveHigh,
    orientation: Orientation::RowIsScan,
    debounce: globals::DEBOUNCE_DEFAULT,
    settle_us: SETTLE_US,
    debounce_delay_us: globals::DEBOUNCE_DELAY_US_DEFAULT,
};

static TEENSY: MatrixConfig<ROWS> = MatrixConfig {
    scan_lines: [row!(D 0), row!(D 1), row!(D 2), row!(D 3)],
    sense_lines: cols!(F 6, F 5, F 4, B 7, B 6, B 5, B 4, B 3, B 2, B 1, B 0),
    select_lines: PORTD_ROWS,
    idle: Idle::DriveHigh,
    orientation: Orientation::RowIsScan,
    debounce: globals::DEBOUNCE_DEFAULT,
    settle_us: SETTLE_US,
    debounce_delay_us: globals::DEBOUNCE_DELAY_US_DEFAULT,
};

static JOU: MatrixConfig<ROWS> = MatrixConfig {
    scan_lines: [row!(B 4), row!(D 5), row!(B 0), row!(B 2)],
    sense_lines: cols!(E 6, C 6, D 4, D 0, D 3, B 3, F 4, F 5, F 6, F 7, B 1),
    select_lines: &[pin(B, 4), pin(D, 5), pin(B, 0), pin(B, 2)],
    idle: Idle::Release,
    orientation: Orientation::RowIsScan,
    debounce: globals::DEBOUNCE_DEFAULT,
    settle_us: SETTLE_US,
    debounce_delay_us: globals::DEBOUNCE_DELAY_US_DEFAULT,
};

#[cfg(test)]
#[path = "atreus_test.rs"]
mod test;

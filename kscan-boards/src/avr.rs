//! Line addressing for AVR GPIO ports: bits 7-3 are the port, bits 2-0 the pin.
//!
//! A register-level [`kscan_firmware::LineDriver`] splits a [`LineId`] back into its port
//! (`DDRx`/`PORTx`/`PINx`) and bit mask with [`port`] and [`mask`].

use core::fmt;

use kscan_firmware::LineId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Port {
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
}

impl Port {
    fn from_u8(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::B),
            2 => Some(Self::C),
            3 => Some(Self::D),
            4 => Some(Self::E),
            5 => Some(Self::F),
            _ => None,
        }
    }

    fn letter(self) -> char {
        match self {
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
            Self::F => 'F',
        }
    }
}

pub const fn pin(port: Port, bit: u8) -> LineId {
    ((port as u8) << 3) | (bit & 7)
}

pub fn port(line: LineId) -> Option<Port> {
    Port::from_u8(line >> 3)
}

pub fn bit(line: LineId) -> u8 {
    line & 7
}

pub fn mask(line: LineId) -> u8 {
    1 << bit(line)
}

/// Displays a line as its pin name, e.g. `PD3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinName(pub LineId);

impl fmt::Display for PinName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match port(self.0) {
            Some(p) => write!(f, "P{}{}", p.letter(), bit(self.0)),
            None => write!(f, "?{}", self.0),
        }
    }
}

#[cfg(test)]
#[path = "avr_test.rs"]
mod test;

//! Electrical control of individual matrix lines.
//!
//! The scanner never touches registers or HAL pins directly; it addresses lines by [`LineId`]
//! through a [`LineDriver`]. A board supplies the driver, so one engine can target different pin
//! mappings and board revisions.

use embedded_hal::digital::{InputPin, OutputPin};

/// Logical address of a physical I/O line. The meaning of the number belongs to the
/// [`LineDriver`] implementation.
pub type LineId = u8;

/// A driven logic level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

pub trait LineDriver {
    /// Make `line` an input with its pull-up enabled.
    fn set_input_pullup(&mut self, line: LineId);

    fn drive_low(&mut self, line: LineId);

    fn drive_high(&mut self, line: LineId);

    /// Put `line` in its high-impedance state.
    fn release(&mut self, line: LineId);

    /// Instantaneous level of `line`; `true` when electrically low.
    fn is_low(&mut self, line: LineId) -> bool;

    fn drive(&mut self, line: LineId, level: Level) {
        match level {
            Level::Low => self.drive_low(line),
            Level::High => self.drive_high(line),
        }
    }
}

impl<T: LineDriver + ?Sized> LineDriver for &mut T {
    #[inline]
    fn set_input_pullup(&mut self, line: LineId) {
        T::set_input_pullup(self, line)
    }

    #[inline]
    fn drive_low(&mut self, line: LineId) {
        T::drive_low(self, line)
    }

    #[inline]
    fn drive_high(&mut self, line: LineId) {
        T::drive_high(self, line)
    }

    #[inline]
    fn release(&mut self, line: LineId) {
        T::release(self, line)
    }

    #[inline]
    fn is_low(&mut self, line: LineId) -> bool {
        T::is_low(self, line)
    }
}

/// [`LineDriver`] over fixed-direction `embedded-hal` pins.
///
/// Addresses `0..OUTPUT_N` are the output pins, `OUTPUT_N..OUTPUT_N + INPUT_N` the input pins.
/// Input pins must already be configured with their pull-up by the HAL. `release` drives an
/// output high, which is the deselected level of an active-low matrix (and high-impedance on
/// an open-drain pin).
pub struct GpioLines<I: InputPin, O: OutputPin, const INPUT_N: usize, const OUTPUT_N: usize> {
    input_pins: [I; INPUT_N],
    output_pins: [O; OUTPUT_N],
}

impl<I: InputPin, O: OutputPin, const INPUT_N: usize, const OUTPUT_N: usize>
    GpioLines<I, O, INPUT_N, OUTPUT_N>
{
    pub fn new(input_pins: [I; INPUT_N], output_pins: [O; OUTPUT_N]) -> Self {
        Self {
            input_pins,
            output_pins,
        }
    }

    /// Address of output pin `n`.
    pub const fn output(n: usize) -> LineId {
        n as LineId
    }

    /// Address of input pin `n`.
    pub const fn input(n: usize) -> LineId {
        (OUTPUT_N + n) as LineId
    }

    pub fn into_pins(self) -> ([I; INPUT_N], [O; OUTPUT_N]) {
        (self.input_pins, self.output_pins)
    }

    fn output_pin(&mut self, line: LineId) -> Option<&mut O> {
        let pin = self.output_pins.get_mut(line as usize);
        if pin.is_none() {
            crate::warn!("line {} is not an output", line);
        }
        pin
    }

    fn input_pin(&mut self, line: LineId) -> Option<&mut I> {
        (line as usize)
            .checked_sub(OUTPUT_N)
            .and_then(|i| self.input_pins.get_mut(i))
    }
}

impl<I: InputPin, O: OutputPin, const INPUT_N: usize, const OUTPUT_N: usize> LineDriver
    for GpioLines<I, O, INPUT_N, OUTPUT_N>
{
    fn set_input_pullup(&mut self, line: LineId) {
        if (line as usize) < OUTPUT_N {
            // outputs can't change direction; deselect instead
            self.release(line);
        }
    }

    fn drive_low(&mut self, line: LineId) {
        if let Some(pin) = self.output_pin(line) {
            let _ = pin.set_low();
        }
    }

    fn drive_high(&mut self, line: LineId) {
        if let Some(pin) = self.output_pin(line) {
            let _ = pin.set_high();
        }
    }

    fn release(&mut self, line: LineId) {
        self.drive_high(line);
    }

    fn is_low(&mut self, line: LineId) -> bool {
        match self.input_pin(line) {
            Some(pin) => pin.is_low().unwrap_or(false),
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "line_driver_test.rs"]
mod test;

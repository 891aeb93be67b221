use embedded_hal::delay::DelayNs;

use crate::{
    config::{Idle, MatrixConfig},
    line_driver::LineDriver,
};

/// Activates scan lines one at a time.
///
/// Every select line is returned to the idle state before the next code is applied, so at most
/// one scan line is ever active.
pub struct SelectSequencer<'c, const ROWS: usize> {
    config: &'c MatrixConfig<ROWS>,
}

impl<'c, const ROWS: usize> SelectSequencer<'c, ROWS> {
    pub fn new(config: &'c MatrixConfig<ROWS>) -> Self {
        Self { config }
    }

    /// Put every select line in its idle state and every sense line in input-with-pullup.
    pub fn init(&self, driver: &mut impl LineDriver) {
        self.deactivate_all(driver);
        for sense in self.config.sense_lines {
            driver.set_input_pullup(sense.line);
        }
    }

    pub fn deactivate_all(&self, driver: &mut impl LineDriver) {
        for &line in self.config.select_lines {
            match self.config.idle {
                Idle::Release => driver.release(line),
                Idle::DriveHigh => driver.drive_high(line),
                Idle::DriveLow => driver.drive_low(line),
            }
        }
    }

    /// Deactivate all scan lines, apply the select code of `index` and wait for the sense lines
    /// to settle.
    pub fn activate(&self, index: usize, driver: &mut impl LineDriver, delay: &mut impl DelayNs) {
        let Some(scan) = self.config.scan_lines.get(index) else {
            crate::warn!("no scan line {}", index);
            return;
        };

        self.deactivate_all(driver);
        for select in scan.select {
            driver.drive(select.line, select.level);
        }

        if self.config.settle_us != 0 {
            delay.delay_us(self.config.settle_us);
        }
    }
}

#[cfg(test)]
#[path = "sequencer_test.rs"]
mod test;

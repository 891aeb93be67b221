use kscan_common::RowBits;

use crate::{config::SenseLine, line_driver::LineDriver};

/// Read every sense line while a scan line is active. Low reads as pressed.
pub fn sample(driver: &mut impl LineDriver, sense_lines: &[SenseLine]) -> RowBits {
    sense_lines
        .iter()
        .enumerate()
        .fold(0, |bits, (i, sense)| {
            if driver.is_low(sense.line) {
                bits | (1 << i)
            } else {
                bits
            }
        })
}

#[cfg(test)]
#[path = "sampler_test.rs"]
mod test;

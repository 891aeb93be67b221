//! Layer indicator LEDs.
//!
//! This belongs to the caller: the main loop reads the interpreter's layer state and passes it
//! to [`LayerIndicator::show_layer`]. The matrix scanner never calls into it.

use embedded_hal::{delay::DelayNs, pwm::SetDutyCycle};
use kscan_common::bits::biton32;

/// Brightness the Atreus Jou build runs its LEDs at, out of 255.
pub const DEFAULT_BRIGHTNESS: u8 = 10;

const CYCLE_MS: u32 = 75;

/// LED `n` lights for layer `n + 1`; layer 0 shows nothing.
pub struct LayerIndicator<P: SetDutyCycle, const N: usize> {
    leds: [P; N],
    brightness: u8,
}

impl<P: SetDutyCycle, const N: usize> LayerIndicator<P, N> {
    pub fn new(leds: [P; N], brightness: u8) -> Self {
        Self { leds, brightness }
    }

    /// Turn every LED off.
    pub fn init(&mut self) {
        for i in 0..N {
            self.off(i);
        }
    }

    pub fn on(&mut self, index: usize) {
        if let Some(led) = self.leds.get_mut(index) {
            let duty = led.max_duty_cycle() as u32 * self.brightness as u32 / 255;
            let _ = led.set_duty_cycle(duty as u16);
        }
    }

    pub fn off(&mut self, index: usize) {
        if let Some(led) = self.leds.get_mut(index) {
            let _ = led.set_duty_cycle_fully_off();
        }
    }

    /// Light the LED of the highest active layer in `layer_state`.
    pub fn show_layer(&mut self, layer_state: u32) {
        self.init();
        let layer = biton32(layer_state) as usize;
        if layer != 0 {
            self.on(layer - 1);
        }
    }

    /// Start-up animation: each LED on in turn.
    pub fn cycle(&mut self, delay: &mut impl DelayNs) {
        for i in 0..N {
            self.on(i);
            delay.delay_ms(CYCLE_MS);
            self.off(i);
        }
    }

    pub fn release(self) -> [P; N] {
        self.leds
    }
}

#[cfg(test)]
#[path = "indicator_test.rs"]
mod test;

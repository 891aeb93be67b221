extern crate std;

use embedded_hal::delay::DelayNs;

use crate::switch_test_stub::{Op, OpLog};

/// Records delays instead of waiting.
#[derive(Default, Clone)]
pub struct DelayStub {
    total_ns: u64,
    calls: usize,
    log: Option<OpLog>,
}
impl DelayStub {
    pub fn with_log(log: OpLog) -> Self {
        Self {
            log: Some(log),
            ..Default::default()
        }
    }

    pub fn total_us(&self) -> u64 {
        self.total_ns / 1000
    }

    pub fn calls(&self) -> usize {
        self.calls
    }

    pub fn clear(&mut self) {
        self.total_ns = 0;
        self.calls = 0;
    }
}

impl DelayNs for DelayStub {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
        self.calls += 1;
        if let Some(log) = &self.log {
            log.push(Op::Delay(ns));
        }
    }

    fn delay_us(&mut self, us: u32) {
        self.delay_ns(us.saturating_mul(1000));
    }
}

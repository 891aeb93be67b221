#![no_std]
pub mod config;
pub mod debounce;
pub mod key_scanner;
pub mod line_driver;
pub mod matrix;
pub mod sampler;
pub mod sequencer;

#[cfg(any(test, feature = "test-utils"))]
pub mod delay_test_stub;
#[cfg(any(test, feature = "test-utils"))]
pub mod switch_test_stub;

#[macro_use]
mod macros;

pub use config::{ConfigError, Idle, MatrixConfig, Orientation, ScanLine, Select, SenseLine};
pub use debounce::{DebounceState, Debouncer};
pub use key_scanner::{MatrixScanner, ScanKey};
pub use kscan_common::RowBits;
pub use line_driver::{GpioLines, Level, LineDriver, LineId};
pub use matrix::{MatrixState, MatrixView};

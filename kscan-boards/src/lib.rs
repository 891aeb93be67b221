#![no_std]
pub mod atreus;
pub mod avr;
pub mod frosty_flake;
pub mod indicator;

pub use kscan_firmware::*;

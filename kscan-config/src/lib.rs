pub mod boards;
pub mod simulate;
pub mod trace;

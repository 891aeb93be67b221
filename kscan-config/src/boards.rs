//! The board tables compiled into the firmware, looked up by name.

use std::fmt::Write;

use kscan_boards::{atreus, avr::PinName, frosty_flake, ConfigError, Level, MatrixConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Board {
    Atreus(atreus::Wiring),
    FrostyFlake(frosty_flake::Revision),
}

impl Board {
    pub fn all() -> impl Iterator<Item = Board> {
        atreus::Wiring::ALL
            .into_iter()
            .map(Board::Atreus)
            .chain(frosty_flake::Revision::ALL.into_iter().map(Board::FrostyFlake))
    }

    pub fn find(name: &str) -> Option<Board> {
        Self::all().find(|b| b.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Board::Atreus(w) => w.name(),
            Board::FrostyFlake(r) => r.name(),
        }
    }

    /// `(scan lines, sense lines)`
    pub fn shape(self) -> (usize, usize) {
        match self {
            Board::Atreus(w) => shape(w.config()),
            Board::FrostyFlake(r) => shape(r.config()),
        }
    }

    pub fn validate(self) -> Result<(), ConfigError> {
        match self {
            Board::Atreus(w) => w.config().validate(),
            Board::FrostyFlake(r) => r.config().validate(),
        }
    }

    pub fn describe(self) -> String {
        match self {
            Board::Atreus(w) => describe(w.config()),
            Board::FrostyFlake(r) => describe(r.config()),
        }
    }
}

fn shape<const ROWS: usize>(config: &MatrixConfig<ROWS>) -> (usize, usize) {
    (ROWS, config.sense_count())
}

fn level(level: Level) -> char {
    match level {
        Level::Low => 'L',
        Level::High => 'H',
    }
}

/// Human readable listing of a matrix table, one line per scan and sense line.
pub fn describe<const ROWS: usize>(config: &MatrixConfig<ROWS>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "orientation: {:?}, idle: {:?}",
        config.orientation, config.idle
    );
    let _ = writeln!(
        out,
        "debounce: {}, settle: {}us, debounce delay: {}us",
        config.debounce, config.settle_us, config.debounce_delay_us
    );

    out.push_str("select:");
    for &line in config.select_lines {
        let _ = write!(out, " {}", PinName(line));
    }
    out.push('\n');

    out.push_str("scan:\n");
    for (i, scan) in config.scan_lines.iter().enumerate() {
        let _ = write!(out, "  {i:2}:");
        for s in scan.select {
            let _ = write!(out, " {}={}", PinName(s.line), level(s.level));
        }
        out.push('\n');
    }

    out.push_str("sense:\n");
    for (i, sense) in config.sense_lines.iter().enumerate() {
        let _ = writeln!(out, "  {i:2}: {}", PinName(sense.line));
    }
    out
}

#[cfg(test)]
#[path = "boards_test.rs"]
mod test;

//! Raw sample traces.
//!
//! One scan cycle per line, a value per scan line, separated by commas or whitespace. Values
//! are hex (`0x1f`), binary (`0b0101`) or decimal. Everything after `#` is ignored, as are
//! blank lines.

use std::{fs, path::Path};

use anyhow::{anyhow, Context, Result};
use kscan_common::RowBits;

pub type Cycle = Vec<RowBits>;

pub fn parse_value(text: &str) -> Result<RowBits> {
    let lower = text.to_ascii_lowercase();
    let parsed = if let Some(hex) = lower.strip_prefix("0x") {
        RowBits::from_str_radix(hex, 16)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        RowBits::from_str_radix(bin, 2)
    } else {
        lower.parse()
    };
    parsed.map_err(|err| anyhow!("invalid value \"{text}\": {err}"))
}

pub fn parse_line(line: &str) -> Result<Option<Cycle>> {
    let line = match line.find('#') {
        Some(i) => &line[..i],
        None => line,
    };
    let cycle = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|v| !v.is_empty())
        .map(parse_value)
        .collect::<Result<Cycle>>()?;
    Ok((!cycle.is_empty()).then_some(cycle))
}

pub fn parse_trace(src: &str) -> Result<Vec<Cycle>> {
    let mut cycles = Vec::new();
    for (i, line) in src.lines().enumerate() {
        if let Some(cycle) = parse_line(line).with_context(|| format!("line {}", i + 1))? {
            cycles.push(cycle);
        }
    }
    log::debug!("parsed {} cycles", cycles.len());
    Ok(cycles)
}

pub fn read_trace(path: &Path) -> Result<Vec<Cycle>> {
    let src = fs::read_to_string(path)
        .with_context(|| format!("failed to read \"{}\"", path.display()))?;
    parse_trace(&src).with_context(|| format!("in \"{}\"", path.display()))
}

#[cfg(test)]
#[path = "trace_test.rs"]
mod test;

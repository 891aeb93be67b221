//! Replays a raw sample trace through the firmware's [`Debouncer`].

use std::fmt::Write;

use anyhow::{bail, Context, Result};
use kscan_common::{globals::MAX_SENSE_LINES, RowBits};
use kscan_firmware::{matrix::format_row, DebounceState, Debouncer};

use crate::trace::Cycle;

/// Largest matrix the simulator handles, in scan lines.
pub const MAX_ROWS: usize = 32;

/// Keys that changed on one commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Index of the cycle whose sample completed the commit, from 0.
    pub cycle: usize,
    /// `(scan, sense, is_down)`
    pub changes: Vec<(usize, usize, bool)>,
}

#[derive(Debug)]
pub struct Simulation {
    rows: usize,
    cols: usize,
    cycles: usize,
    debouncer: Debouncer<MAX_ROWS>,
    commits: Vec<Commit>,
}

impl Simulation {
    pub fn new(threshold: u8, rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || rows > MAX_ROWS {
            bail!("rows must be between 1 and {MAX_ROWS}, not {rows}");
        }
        if cols == 0 || cols > MAX_SENSE_LINES {
            bail!("cols must be between 1 and {MAX_SENSE_LINES}, not {cols}");
        }
        Ok(Self {
            rows,
            cols,
            cycles: 0,
            debouncer: Debouncer::new(threshold, cols as u8),
            commits: Vec::new(),
        })
    }

    /// Size a simulation to fit `trace` where `rows` or `cols` are not given.
    pub fn for_trace(
        threshold: u8,
        rows: Option<usize>,
        cols: Option<usize>,
        trace: &[Cycle],
    ) -> Result<Self> {
        let rows = rows.unwrap_or_else(|| trace.iter().map(Vec::len).max().unwrap_or(1));
        let cols = cols.unwrap_or_else(|| {
            let all = trace.iter().flatten().fold(0, |acc, &v| acc | v);
            (RowBits::BITS - all.leading_zeros()).max(1) as usize
        });
        Self::new(threshold, rows, cols)
    }

    /// Feed one cycle of samples, missing scan lines reading as all up. Returns true when the
    /// committed state changed.
    pub fn step(&mut self, cycle: &[RowBits]) -> Result<bool> {
        let index = self.cycles;
        if cycle.len() > self.rows {
            bail!(
                "cycle {index} has {} values but the matrix has {} rows",
                cycle.len(),
                self.rows
            );
        }
        let mut raw = [0; MAX_ROWS];
        for (i, &v) in cycle.iter().enumerate() {
            if self.cols < RowBits::BITS as usize && v >> self.cols != 0 {
                bail!(
                    "cycle {index} row {i}: {v:#x} has bits beyond column {}",
                    self.cols - 1
                );
            }
            raw[i] = v;
        }

        self.cycles += 1;
        let changed = self.debouncer.update(&raw);
        log::debug!(
            "cycle {index}: {:?} counter {}",
            self.debouncer.state(),
            self.debouncer.counter()
        );
        if changed {
            let changes: Vec<_> = self.debouncer.changes().collect();
            log::info!("cycle {index}: commit {} keys changed", changes.len());
            self.commits.push(Commit {
                cycle: index,
                changes,
            });
        }
        Ok(changed)
    }

    pub fn run(&mut self, trace: &[Cycle]) -> Result<()> {
        for cycle in trace {
            self.step(cycle)?;
        }
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cycles(&self) -> usize {
        self.cycles
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn debouncer(&self) -> &Debouncer<MAX_ROWS> {
        &self.debouncer
    }

    pub fn is_pressed(&self, scan: usize, sense: usize) -> bool {
        scan < self.rows && sense < self.cols && self.debouncer.committed().is_pressed(scan, sense)
    }

    /// The last cycle's debounce state and pending samples.
    pub fn state_line(&self) -> String {
        let mut out = format!(
            "cycle {}: {} counter={} pending",
            self.cycles.saturating_sub(1),
            match self.debouncer.state() {
                DebounceState::Settled => "settled",
                DebounceState::Debouncing => "debouncing",
            },
            self.debouncer.counter(),
        );
        for &row in &self.debouncer.pending()[..self.rows] {
            let _ = write!(out, " {}", format_row(row, self.cols));
        }
        out
    }

    /// The committed matrix, laid out as the firmware's matrix dump.
    pub fn dump(&self) -> String {
        self.debouncer.committed().view(self.rows).to_string()
    }
}

/// Run `trace` through a debouncer with `threshold`, sizing the matrix from the trace unless
/// given.
pub fn simulate(
    trace: &[Cycle],
    threshold: u8,
    rows: Option<usize>,
    cols: Option<usize>,
) -> Result<Simulation> {
    let mut sim = Simulation::for_trace(threshold, rows, cols, trace)
        .context("cannot size the simulated matrix")?;
    sim.run(trace)?;
    Ok(sim)
}

#[cfg(test)]
#[path = "simulate_test.rs"]
mod test;

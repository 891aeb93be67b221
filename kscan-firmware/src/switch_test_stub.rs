extern crate alloc;
extern crate std;

use alloc::vec;
use core::cell::RefCell;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};
use std::rc::Rc;
use std::vec::Vec;

use crate::{
    config::{Idle, MatrixConfig},
    line_driver::{Level, LineDriver, LineId},
    RowBits,
};

/// Something a [`SwitchBoard`] or [`crate::delay_test_stub::DelayStub`] was asked to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    Pullup(LineId),
    Drive(LineId, Level),
    Release(LineId),
    Read(LineId),
    Delay(u32),
}

#[derive(Default, Clone)]
pub struct OpLog(Rc<RefCell<Vec<Op>>>);
impl OpLog {
    pub fn push(&self, op: Op) {
        self.0.borrow_mut().push(op);
    }

    pub fn take(&self) -> Vec<Op> {
        core::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineState {
    Floating,
    PullUp,
    High,
    Low,
}

/// A simulated switch matrix wired the way a [`MatrixConfig`] describes it.
///
/// A scan line counts as active when every select line is at the level its code asks for, and
/// every other select line is at the idle level. A sense line reads low when an active scan line
/// has its switch closed. Sense lines that were never given a pull-up read high.
pub struct SwitchBoard<'c, const ROWS: usize> {
    config: &'c MatrixConfig<ROWS>,
    lines: [LineState; 256],
    switches: [RowBits; ROWS],
    max_active: usize,
    reads: usize,
    log: Option<OpLog>,
}

impl<'c, const ROWS: usize> SwitchBoard<'c, ROWS> {
    pub fn new(config: &'c MatrixConfig<ROWS>) -> Self {
        Self {
            config,
            lines: [LineState::Floating; 256],
            switches: [0; ROWS],
            max_active: 0,
            reads: 0,
            log: None,
        }
    }

    pub fn with_log(config: &'c MatrixConfig<ROWS>, log: OpLog) -> Self {
        Self {
            log: Some(log),
            ..Self::new(config)
        }
    }

    pub fn down(&mut self, scan: usize, sense: usize) {
        self.switches[scan] |= 1 << sense;
    }

    pub fn up(&mut self, scan: usize, sense: usize) {
        self.switches[scan] &= !(1 << sense);
    }

    pub fn set_switches(&mut self, switches: [RowBits; ROWS]) {
        self.switches = switches;
    }

    pub fn line(&self, line: LineId) -> LineState {
        self.lines[line as usize]
    }

    /// Most scan lines seen active at once while a sense line was read.
    pub fn max_active(&self) -> usize {
        self.max_active
    }

    pub fn reads(&self) -> usize {
        self.reads
    }

    pub fn active_scan_lines(&self) -> Vec<usize> {
        (0..ROWS).filter(|&i| self.is_active(i)).collect()
    }

    fn idle_state(&self) -> LineState {
        match self.config.idle {
            Idle::Release => LineState::Floating,
            Idle::DriveHigh => LineState::High,
            Idle::DriveLow => LineState::Low,
        }
    }

    fn is_active(&self, index: usize) -> bool {
        let code = self.config.scan_lines[index].select;
        let idle = self.idle_state();
        self.config.select_lines.iter().all(|&line| {
            let want = match code.iter().find(|s| s.line == line) {
                Some(s) if s.level == Level::High => LineState::High,
                Some(_) => LineState::Low,
                None => idle,
            };
            self.lines[line as usize] == want
        })
    }

    fn set(&mut self, line: LineId, state: LineState, op: Op) {
        self.lines[line as usize] = state;
        if let Some(log) = &self.log {
            log.push(op);
        }
    }
}

impl<const ROWS: usize> LineDriver for SwitchBoard<'_, ROWS> {
    fn set_input_pullup(&mut self, line: LineId) {
        self.set(line, LineState::PullUp, Op::Pullup(line));
    }

    fn drive_low(&mut self, line: LineId) {
        self.set(line, LineState::Low, Op::Drive(line, Level::Low));
    }

    fn drive_high(&mut self, line: LineId) {
        self.set(line, LineState::High, Op::Drive(line, Level::High));
    }

    fn release(&mut self, line: LineId) {
        self.set(line, LineState::Floating, Op::Release(line));
    }

    fn is_low(&mut self, line: LineId) -> bool {
        if let Some(log) = &self.log {
            log.push(Op::Read(line));
        }
        self.reads += 1;

        let active = self.active_scan_lines();
        self.max_active = self.max_active.max(active.len());

        if self.lines[line as usize] != LineState::PullUp {
            return false;
        }
        let Some(sense) = self.config.sense_lines.iter().position(|s| s.line == line) else {
            return false;
        };
        active
            .iter()
            .any(|&scan| self.switches[scan] & (1 << sense) != 0)
    }
}

/// `embedded-hal` pins joined by a grid of switches, for exercising [`crate::GpioLines`].
///
/// Input `i` reads low while a closed switch joins it to an output driven low. Input levels are
/// worked out when read; outputs that were never driven float.
#[derive(Clone)]
pub struct PinGrid(Rc<RefCell<Grid>>);

struct Grid {
    inputs: usize,
    /// Driven level of each output, `Some(true)` for high.
    outputs: Vec<Option<bool>>,
    /// Closed switches as `(input, output)`.
    closed: Vec<(usize, usize)>,
}

impl Grid {
    fn input_is_low(&self, input: usize) -> bool {
        self.closed
            .iter()
            .any(|&(i, o)| i == input && self.outputs[o] == Some(false))
    }
}

impl PinGrid {
    pub fn new(inputs: usize, outputs: usize) -> Self {
        Self(Rc::new(RefCell::new(Grid {
            inputs,
            outputs: vec![None; outputs],
            closed: Vec::new(),
        })))
    }

    pub fn input_pins<const N: usize>(&self) -> [GridPin; N] {
        assert!(N <= self.0.borrow().inputs);
        core::array::from_fn(|i| GridPin {
            grid: self.clone(),
            side: Side::Input(i),
        })
    }

    pub fn output_pins<const N: usize>(&self) -> [GridPin; N] {
        assert!(N <= self.0.borrow().outputs.len());
        core::array::from_fn(|o| GridPin {
            grid: self.clone(),
            side: Side::Output(o),
        })
    }

    pub fn down(&self, input: usize, output: usize) {
        let mut grid = self.0.borrow_mut();
        if !grid.closed.contains(&(input, output)) {
            grid.closed.push((input, output));
        }
    }

    pub fn up(&self, input: usize, output: usize) {
        self.0.borrow_mut().closed.retain(|&s| s != (input, output));
    }

    /// Level an output was last driven to; `None` if never driven.
    pub fn output_level(&self, output: usize) -> Option<bool> {
        self.0.borrow().outputs[output]
    }

    pub fn input_is_low(&self, input: usize) -> bool {
        self.0.borrow().input_is_low(input)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Input(usize),
    Output(usize),
}

/// One pin of a [`PinGrid`].
#[derive(Clone)]
pub struct GridPin {
    grid: PinGrid,
    side: Side,
}

impl core::fmt::Debug for GridPin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("GridPin").field(&self.side).finish()
    }
}

impl GridPin {
    pub fn side(&self) -> Side {
        self.side
    }

    fn drive(&mut self, high: bool) -> Result<(), ErrorKind> {
        match self.side {
            Side::Output(o) => {
                self.grid.0.borrow_mut().outputs[o] = Some(high);
                Ok(())
            }
            Side::Input(_) => Err(ErrorKind::Other),
        }
    }
}

impl ErrorType for GridPin {
    type Error = ErrorKind;
}

impl InputPin for GridPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        match self.side {
            Side::Input(i) => Ok(self.grid.input_is_low(i)),
            Side::Output(o) => self
                .grid
                .output_level(o)
                .map(|high| !high)
                .ok_or(ErrorKind::Other),
        }
    }
}

impl OutputPin for GridPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true)
    }
}

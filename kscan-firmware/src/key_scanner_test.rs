extern crate std;

use std::vec::Vec;

use super::*;

use crate::{
    config::{Idle, ScanLine, Select, SenseLine},
    delay_test_stub::DelayStub,
    line_driver::GpioLines,
    switch_test_stub::{GridPin, PinGrid, SwitchBoard},
};

static SENSE: [SenseLine; 5] = [
    SenseLine::new(10),
    SenseLine::new(11),
    SenseLine::new(12),
    SenseLine::new(13),
    SenseLine::new(14),
];
static SELECT: [u8; 3] = [0, 1, 2];
static R0: [Select; 1] = [Select::low(0)];
static R1: [Select; 1] = [Select::low(1)];
static R2: [Select; 1] = [Select::low(2)];

static ROWS3: MatrixConfig<3> = MatrixConfig::new(
    [ScanLine::new(&R0), ScanLine::new(&R1), ScanLine::new(&R2)],
    &SENSE,
    &SELECT,
    Idle::DriveHigh,
)
.debounce(3)
.settle_us(40);

macro_rules! setup {
    ($config:expr, $scanner:ident $b:block) => {{
        let board = SwitchBoard::new(&$config);
        let mut $scanner = MatrixScanner::new(&$config, board, DelayStub::default()).unwrap();
        $scanner.init();
        $b
    }};
}

macro_rules! board {
    ($scanner:ident) => {
        $scanner.driver
    };
}

#[test]
fn nothing_pressed_stays_empty() {
    setup!(ROWS3, scanner {
        for _ in 0..50 {
            assert!(!scanner.scan());
            assert_eq!(scanner.count_pressed(), 0);
        }
        assert_eq!(scanner.debouncer().state(), DebounceState::Settled);
    });
}

#[test]
fn two_keys_on_different_scan_lines() {
    setup!(ROWS3, scanner {
        board!(scanner).down(0, 4);
        board!(scanner).down(2, 1);

        let changed: Vec<bool> = (0..5).map(|_| scanner.scan()).collect();
        assert_eq!(changed, [false, false, false, true, false]);

        for scan in 0..3 {
            for sense in 0..5 {
                assert_eq!(
                    scanner.is_pressed(scan, sense),
                    matches!((scan, sense), (0, 4) | (2, 1)),
                    "({scan},{sense})"
                );
            }
        }
        assert_eq!(scanner.row(0), 0b10000);
        assert_eq!(scanner.row(1), 0);
        assert_eq!(scanner.row(2), 0b00010);
        assert_eq!(scanner.count_pressed(), 2);
    });
}

#[test]
fn one_scan_line_active_at_a_time() {
    setup!(ROWS3, scanner {
        board!(scanner).set_switches([0b11111; 3]);
        for _ in 0..5 {
            scanner.scan();
        }
        assert_eq!(board!(scanner).max_active(), 1);
        assert!(board!(scanner).active_scan_lines().is_empty());
        // every key pressed reads back every key, no more
        assert_eq!(scanner.count_pressed(), 15);
    });
}

#[test]
fn has_changed_only_on_commit() {
    setup!(ROWS3, scanner {
        board!(scanner).down(1, 0);
        scanner.scan();
        assert!(!scanner.has_changed_since_last_scan());
        assert_eq!(scanner.debouncer().state(), DebounceState::Debouncing);
        scanner.scan();
        scanner.scan();
        assert!(!scanner.has_changed_since_last_scan());
        assert!(!scanner.is_pressed(1, 0));

        assert!(scanner.scan());
        assert!(scanner.has_changed_since_last_scan());
        assert!(scanner.is_pressed(1, 0));

        assert!(!scanner.scan());
        assert!(!scanner.has_changed_since_last_scan());
    });
}

#[test]
fn bounce_during_debounce_delays_commit() {
    setup!(ROWS3, scanner {
        board!(scanner).down(0, 0);
        scanner.scan();
        scanner.scan();
        // another key bounces before the first settles
        board!(scanner).down(2, 3);
        scanner.scan();
        board!(scanner).up(2, 3);
        scanner.scan();
        board!(scanner).down(2, 3);
        scanner.scan();
        assert_eq!(scanner.count_pressed(), 0);

        scanner.scan();
        scanner.scan();
        assert_eq!(scanner.count_pressed(), 0);
        assert!(scanner.scan());
        assert_eq!(scanner.count_pressed(), 2);
    });
}

#[test]
fn settle_and_debounce_delays() {
    static DELAYED: MatrixConfig<3> = MatrixConfig::new(
        [ScanLine::new(&R0), ScanLine::new(&R1), ScanLine::new(&R2)],
        &SENSE,
        &SELECT,
        Idle::DriveHigh,
    )
    .debounce(2)
    .settle_us(50)
    .debounce_delay_us(1000);

    setup!(DELAYED, scanner {
        scanner.scan();
        assert_eq!(scanner.delay.total_us(), 150);
        scanner.delay.clear();

        board!(scanner).down(0, 0);
        scanner.scan();
        assert_eq!(scanner.delay.total_us(), 1150);
        scanner.delay.clear();
        scanner.scan();
        assert_eq!(scanner.delay.total_us(), 1150);
        scanner.delay.clear();

        // commit ends the debounce pause
        assert!(scanner.scan());
        assert_eq!(scanner.delay.total_us(), 150);
    });
}

#[test]
fn changes_as_scan_keys() {
    static COLS: MatrixConfig<3> = MatrixConfig::new(
        [ScanLine::new(&R0), ScanLine::new(&R1), ScanLine::new(&R2)],
        &SENSE,
        &SELECT,
        Idle::DriveHigh,
    )
    .debounce(0)
    .orientation(Orientation::ColIsScan);

    setup!(ROWS3, scanner {
        board!(scanner).down(2, 4);
        for _ in 0..4 {
            scanner.scan();
        }
        let keys: Vec<ScanKey> = scanner.changes().collect();
        assert_eq!(keys, [ScanKey::new(2, 4, true)]);
        assert_eq!(keys[0].row(), 2);
        assert_eq!(keys[0].column(), 4);
    });

    setup!(COLS, scanner {
        board!(scanner).down(2, 4);
        assert!(scanner.scan());
        assert_eq!(scanner.changes().collect::<Vec<_>>(), [ScanKey::new(4, 2, true)]);

        board!(scanner).up(2, 4);
        assert!(scanner.scan());
        let keys: Vec<ScanKey> = scanner.changes().collect();
        assert_eq!(keys, [ScanKey::new(4, 2, false)]);
        assert!(!keys[0].is_down());
    });
}

#[test]
fn scan_key_high_rows_keep_direction() {
    let key = ScanKey::new(200, 31, false);
    assert_eq!(key.row(), 200);
    assert_eq!(key.column(), 31);
    assert!(!key.is_down());
    assert_ne!(key, ScanKey::new(200, 31, true));
}

#[test]
fn demultiplexed_columns() {
    static LINES: [u8; 3] = [0, 1, 2];
    static C0: [Select; 2] = [Select::high(0), Select::high(1)];
    static C1: [Select; 2] = [Select::high(1), Select::high(2)];
    static C2: [Select; 1] = [Select::high(2)];
    static C3: [Select; 3] = [Select::high(0), Select::high(1), Select::high(2)];
    static DEMUX: MatrixConfig<4> = MatrixConfig::new(
        [
            ScanLine::new(&C0),
            ScanLine::new(&C1),
            ScanLine::new(&C2),
            ScanLine::new(&C3),
        ],
        &SENSE,
        &LINES,
        Idle::DriveLow,
    )
    .debounce(0);

    setup!(DEMUX, scanner {
        board!(scanner).down(1, 2);
        board!(scanner).down(3, 0);
        assert!(scanner.scan());
        assert_eq!(scanner.row(0), 0);
        assert_eq!(scanner.row(1), 0b100);
        assert_eq!(scanner.row(2), 0);
        assert_eq!(scanner.row(3), 0b001);
        assert_eq!(board!(scanner).max_active(), 1);
    });
}

#[test]
fn gpio_lines_end_to_end() {
    type Lines = GpioLines<GridPin, GridPin, 2, 2>;
    static GPIO_SENSE: [SenseLine; 2] = [
        SenseLine::new(Lines::input(0)),
        SenseLine::new(Lines::input(1)),
    ];
    static GPIO_SELECT: [u8; 2] = [Lines::output(0), Lines::output(1)];
    static O0: [Select; 1] = [Select::low(Lines::output(0))];
    static O1: [Select; 1] = [Select::low(Lines::output(1))];
    static GPIO: MatrixConfig<2> = MatrixConfig::new(
        [ScanLine::new(&O0), ScanLine::new(&O1)],
        &GPIO_SENSE,
        &GPIO_SELECT,
        Idle::DriveHigh,
    )
    .debounce(1);

    let grid = PinGrid::new(2, 2);
    let lines = Lines::new(grid.input_pins(), grid.output_pins());

    let mut scanner = MatrixScanner::new(&GPIO, lines, DelayStub::default()).unwrap();
    scanner.init();

    grid.down(1, 0);
    assert!(!scanner.scan());
    assert!(scanner.scan());
    assert!(scanner.is_pressed(0, 1));
    assert_eq!(scanner.count_pressed(), 1);

    let (_, delay) = scanner.release();
    assert!(delay.calls() > 0);
    assert_eq!(grid.output_level(0), Some(true));
    assert_eq!(grid.output_level(1), Some(true));
}

#[test]
fn invalid_config_is_rejected() {
    static EMPTY: [Select; 0] = [];
    static BAD: MatrixConfig<2> = MatrixConfig::new(
        [ScanLine::new(&R0), ScanLine::new(&EMPTY)],
        &SENSE,
        &SELECT,
        Idle::DriveHigh,
    );

    let board = SwitchBoard::new(&BAD);
    assert!(matches!(
        MatrixScanner::new(&BAD, board, DelayStub::default()),
        Err(ConfigError::EmptySelectCode(1))
    ));
}

#[test]
fn shape_and_dump() {
    setup!(ROWS3, scanner {
        assert_eq!(scanner.rows(), 3);
        assert_eq!(scanner.cols(), 5);
        board!(scanner).down(1, 1);
        for _ in 0..4 {
            scanner.scan();
        }
        scanner.log_matrix();
        assert_eq!(
            std::format!("{}", scanner.matrix()),
            "r/c 01234\n00: 00000\n01: 01000\n02: 00000\n"
        );
    });
}

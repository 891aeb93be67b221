use super::*;

extern crate std;

use std::vec::Vec;

use kscan_firmware::{
    delay_test_stub::DelayStub, switch_test_stub::SwitchBoard, MatrixScanner, ScanKey,
};

#[test]
fn revisions_validate() {
    for rev in Revision::ALL {
        let config = rev.config();
        assert_eq!(config.validate(), Ok(()), "{}", rev.name());
        assert_eq!(config.sense_count(), ROWS);
        assert_eq!(config.debounce, kscan_common::globals::DEBOUNCE_DEFAULT);
        assert_eq!(config.orientation, Orientation::ColIsScan);
    }
}

#[test]
fn demux_masks() {
    assert_eq!(select_mask(Revision::R20140521), 0b0111_1011);
    assert_eq!(select_mask(Revision::R20130602), 0b0111_1110);

    let masks: Vec<u8> = (0..COLS)
        .map(|c| column_mask(Revision::R20140521, c).unwrap())
        .collect();
    assert_eq!(masks[0], 0b0010_0011);
    assert_eq!(masks[1], 0b0111_1000);
    assert_eq!(masks[17], 0b0011_0011);

    let masks: Vec<u8> = (0..COLS)
        .map(|c| column_mask(Revision::R20130602, c).unwrap())
        .collect();
    assert_eq!(masks[0], 0b0011_1100);
    assert_eq!(masks[7], 0b0110_0000);
    assert_eq!(masks[17], 0b0001_1000);

    assert_eq!(column_mask(Revision::R20130602, COLS), None);

    for rev in Revision::ALL {
        let all = select_mask(rev);
        for c in 0..COLS {
            let mask = column_mask(rev, c).unwrap();
            assert_eq!(mask & !all, 0, "{} col {c}", rev.name());
        }
        assert!(rev
            .config()
            .select_lines
            .iter()
            .all(|&l| crate::avr::port(l) == Some(rev.select_port())));
    }
}

#[test]
fn column_scan_reports_row_col() {
    for rev in Revision::ALL {
        let config = rev.config();
        let mut board = SwitchBoard::new(config);
        board.down(7, 3);
        board.down(17, 0);

        let mut scanner = MatrixScanner::new(config, board, DelayStub::default()).unwrap();
        scanner.init();

        let debounce = config.debounce as usize;
        for _ in 0..debounce {
            assert!(!scanner.scan());
            assert_eq!(scanner.count_pressed(), 0);
        }
        assert!(scanner.scan());
        assert!(scanner.is_pressed(7, 3));
        assert!(scanner.is_pressed(17, 0));
        assert_eq!(scanner.count_pressed(), 2);
        assert_eq!(
            scanner.changes().collect::<Vec<_>>(),
            [ScanKey::new(3, 7, true), ScanKey::new(0, 17, true)]
        );

        let (board, delay) = scanner.release();
        assert_eq!(board.max_active(), 1);
        // every scan that ended debouncing paused once
        let scans = debounce as u64 + 1;
        assert_eq!(
            delay.total_us(),
            scans * SETTLE_US as u64 * COLS as u64 + debounce as u64 * DEBOUNCE_DELAY_US as u64
        );
    }
}

#[test]
fn contact_bounce_commits_once() {
    use kscan_firmware::{Debouncer, RowBits};

    let config = Revision::R20140521.config();
    let mut debouncer = Debouncer::<COLS>::new(config.debounce, ROWS as u8);

    let mut down = [0; COLS];
    down[7] = 1 << 3;
    let up: [RowBits; COLS] = [0; COLS];

    let mut commits = 0;
    for i in 0..6 {
        commits += debouncer.update(if i % 2 == 0 { &down } else { &up }) as usize;
    }
    assert_eq!(commits, 0);

    for _ in 0..=config.debounce {
        commits += debouncer.update(&down) as usize;
    }
    assert_eq!(commits, 1);
    assert!(debouncer.committed().is_pressed(7, 3));
    assert_eq!(debouncer.committed().count_pressed(), 1);
}

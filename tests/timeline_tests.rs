use chrono::Local;
use punchtrack::core::timeline::build_timeline;
use punchtrack::models::segment::{SegmentKind, SegmentPosition};
use punchtrack::models::worklog::WorkLog;

mod common;
use common::{TEST_USER, at};

fn completed(id: i64, start: &str, end: &str) -> WorkLog {
    let mut row = WorkLog::open(TEST_USER, at("2025-09-01", start));
    row.close(at("2025-09-01", end)).expect("close row");
    row.id = id;
    row
}

fn open(id: i64, start: &str) -> WorkLog {
    let mut row = WorkLog::open(TEST_USER, at("2025-09-01", start));
    row.id = id;
    row
}

#[test]
fn test_empty_day_has_no_segments() {
    let tl = build_timeline(&[], Local::now());
    assert!(tl.segments.is_empty());
    assert_eq!(tl.total_work_ms, 0);
    assert_eq!(tl.total_break_ms, 0);
    assert!(!tl.has_active_session);
}

#[test]
fn test_single_session_is_only() {
    let logs = vec![completed(1, "09:00", "12:00")];
    let tl = build_timeline(&logs, Local::now());

    assert_eq!(tl.segments.len(), 1);
    assert_eq!(tl.segments[0].kind, SegmentKind::Work);
    assert_eq!(tl.segments[0].position, SegmentPosition::Only);
    assert_eq!(tl.total_work_ms, 3 * 3_600_000);
    assert_eq!(tl.total_break_ms, 0);
}

#[test]
fn test_breaks_are_inferred_from_gaps() {
    let logs = vec![
        completed(1, "09:00", "12:00"),
        completed(2, "13:00", "15:00"),
        completed(3, "15:30", "17:30"),
    ];
    let tl = build_timeline(&logs, Local::now());

    // work, break, work, break, work
    assert_eq!(tl.segments.len(), 5);
    assert!(tl.segments[1].is_break());
    assert!(tl.segments[3].is_break());
    assert_eq!(tl.segments[1].duration_ms, 60 * 60_000);
    assert_eq!(tl.segments[3].duration_ms, 30 * 60_000);

    assert_eq!(tl.total_work_ms, 7 * 3_600_000);
    assert_eq!(tl.total_break_ms, 90 * 60_000);

    // Work + breaks tile the span exactly: punch-in 09:00, punch-out 17:30.
    let span = (at("2025-09-01", "17:30") - at("2025-09-01", "09:00")).num_milliseconds();
    assert_eq!(tl.total_work_ms + tl.total_break_ms, span);
}

#[test]
fn test_positions_assigned_among_work_segments_only() {
    let logs = vec![
        completed(1, "09:00", "10:00"),
        completed(2, "11:00", "12:00"),
        completed(3, "13:00", "14:00"),
    ];
    let tl = build_timeline(&logs, Local::now());

    let positions: Vec<_> = tl.work_segments().map(|s| s.position).collect();
    assert_eq!(
        positions,
        vec![
            SegmentPosition::First,
            SegmentPosition::Middle,
            SegmentPosition::Last
        ]
    );
    // Break segments report a fixed middle position.
    assert!(tl
        .break_segments()
        .all(|s| s.position == SegmentPosition::Middle));
}

#[test]
fn test_active_session_measured_up_to_now() {
    let now = at("2025-09-01", "16:00");
    let logs = vec![completed(1, "09:00", "12:00"), open(2, "13:00")];
    let tl = build_timeline(&logs, now);

    assert!(tl.has_active_session);
    let active = tl.work_segments().last().expect("active segment");
    assert!(active.is_active);
    assert_eq!(active.end, None);
    assert_eq!(active.duration_ms, 3 * 3_600_000);
    assert_eq!(active.position, SegmentPosition::Last);
    assert_eq!(active.position.label(true), "active");
}

#[test]
fn test_break_segments_carry_flanking_row_ids() {
    let logs = vec![completed(4, "09:00", "12:00"), completed(9, "13:00", "17:00")];
    let tl = build_timeline(&logs, Local::now());

    let brk = tl.break_segments().next().expect("break segment");
    assert_eq!(brk.log_id, None);
    assert_eq!(brk.previous_log_id, Some(4));
    assert_eq!(brk.next_log_id, Some(9));
}

#[test]
fn test_adjacent_sessions_produce_no_break() {
    let logs = vec![completed(1, "09:00", "12:00"), completed(2, "12:00", "17:00")];
    let tl = build_timeline(&logs, Local::now());

    assert_eq!(tl.break_segments().count(), 0);
    assert_eq!(tl.total_break_ms, 0);
}

#[test]
fn test_rows_are_sorted_before_building() {
    let logs = vec![completed(2, "13:00", "17:00"), completed(1, "09:00", "12:00")];
    let tl = build_timeline(&logs, Local::now());

    let first = tl.work_segments().next().expect("first segment");
    assert_eq!(first.log_id, Some(1));
    assert_eq!(first.position, SegmentPosition::First);
}

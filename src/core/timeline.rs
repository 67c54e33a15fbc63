//! Timeline builder: rebuild a day's ordered work/break segments from its
//! worklog rows.
//!
//! Pure function of its inputs: callers pass `now` explicitly so an active
//! session can be measured without the builder reading the clock. Segments
//! are derived on every read and never cached across mutations.

use crate::models::segment::{Segment, SegmentKind, SegmentPosition};
use crate::models::worklog::WorkLog;
use chrono::{DateTime, Local};

#[derive(Debug, Default, Clone)]
pub struct DayTimeline {
    pub segments: Vec<Segment>,
    pub total_work_ms: i64,
    pub total_break_ms: i64,
    pub has_active_session: bool,
}

impl DayTimeline {
    pub fn work_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.is_work())
    }

    pub fn break_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.is_break())
    }
}

/// Build the interleaved work/break timeline for one calendar day.
///
/// Input rows must all belong to the same local calendar date. They are
/// re-sorted by punch-in defensively. One work segment is produced per row
/// (`end = punch_out`, or `now` while active); a break segment is inferred
/// for every positive gap between a row's punch-out and the next row's
/// punch-in.
pub fn build_timeline(logs: &[WorkLog], now: DateTime<Local>) -> DayTimeline {
    if logs.is_empty() {
        return DayTimeline::default();
    }

    let mut sorted = logs.to_vec();
    sorted.sort_by_key(|l| l.punch_in);

    let mut segments: Vec<Segment> = Vec::new();

    for (i, log) in sorted.iter().enumerate() {
        segments.push(Segment {
            kind: SegmentKind::Work,
            start: log.punch_in,
            end: log.punch_out,
            duration_ms: log.duration_ms(now),
            position: SegmentPosition::Only, // fixed up below
            is_active: log.is_active(),
            log_id: Some(log.id),
            previous_log_id: None,
            next_log_id: None,
        });

        // Infer the break to the next row. An open session has no punch-out,
        // so nothing can follow it.
        if let (Some(out), Some(next)) = (log.punch_out, sorted.get(i + 1)) {
            let gap_ms = (next.punch_in - out).num_milliseconds();
            if gap_ms > 0 {
                segments.push(Segment {
                    kind: SegmentKind::Break,
                    start: out,
                    end: Some(next.punch_in),
                    duration_ms: gap_ms,
                    position: SegmentPosition::Middle,
                    is_active: false,
                    log_id: None,
                    previous_log_id: Some(log.id),
                    next_log_id: Some(next.id),
                });
            }
        }
    }

    // Positions are assigned among work segments only.
    let work_count = segments.iter().filter(|s| s.is_work()).count();
    let mut work_idx = 0;
    for seg in &mut segments {
        if !seg.is_work() {
            continue;
        }
        seg.position = if work_count == 1 {
            SegmentPosition::Only
        } else if work_idx == 0 {
            SegmentPosition::First
        } else if work_idx == work_count - 1 {
            SegmentPosition::Last
        } else {
            SegmentPosition::Middle
        };
        work_idx += 1;
    }

    let total_work_ms = segments
        .iter()
        .filter(|s| s.is_work())
        .map(|s| s.duration_ms)
        .sum();
    let total_break_ms = segments
        .iter()
        .filter(|s| s.is_break())
        .map(|s| s.duration_ms)
        .sum();
    let has_active_session = segments.iter().any(|s| s.is_work() && s.is_active);

    DayTimeline {
        segments,
        total_work_ms,
        total_break_ms,
        has_active_session,
    }
}

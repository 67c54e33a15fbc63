use chrono::{DateTime, Local};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Work,
    Break,
}

/// Position of a work segment within its day. Assigned among work segments
/// only; break segments always report `Middle`, since their merge role
/// follows structurally from their neighbors and is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentPosition {
    First,
    Middle,
    Last,
    Only,
}

impl SegmentPosition {
    pub fn label(self, is_active: bool) -> &'static str {
        match self {
            SegmentPosition::Only => "only session",
            SegmentPosition::First => "first session",
            SegmentPosition::Middle => "middle session",
            SegmentPosition::Last => {
                if is_active {
                    "active"
                } else {
                    "last session"
                }
            }
        }
    }
}

/// A derived work or break interval. Segments are rebuilt from the worklog
/// rows on every read and are never persisted; break segments in particular
/// have no identity of their own and are addressed by the ids of the two
/// work rows flanking them.
#[derive(Debug, Clone, Serialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub start: DateTime<Local>,
    pub end: Option<DateTime<Local>>, // None while the session is running
    pub duration_ms: i64,
    pub position: SegmentPosition,
    pub is_active: bool,
    /// Work segments: id of the backing worklog row.
    pub log_id: Option<i64>,
    /// Break segments: ids of the flanking work rows.
    pub previous_log_id: Option<i64>,
    pub next_log_id: Option<i64>,
}

impl Segment {
    pub fn is_work(&self) -> bool {
        self.kind == SegmentKind::Work
    }

    pub fn is_break(&self) -> bool {
        self.kind == SegmentKind::Break
    }
}

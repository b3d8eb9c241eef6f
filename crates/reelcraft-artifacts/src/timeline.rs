use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ItemKind
// ---------------------------------------------------------------------------

/// The kind of element placed on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Video,
    Subtitle,
    Image,
    Audio,
}

// ---------------------------------------------------------------------------
// Position / Size
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

// ---------------------------------------------------------------------------
// TimelineItem
// ---------------------------------------------------------------------------

/// One placed element: a clip, still, subtitle, or audio track with a time
/// span in seconds. `end > start` always holds after constraint enforcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineItem {
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub start: f64,
    pub end: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
}

impl TimelineItem {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// The timed composition: an ordered sequence of placed elements plus the
/// one-line story summary the generator produced alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    pub story_summary: String,
    pub timeline: Vec<TimelineItem>,
}

impl Timeline {
    /// Latest end time over all items, 0 when empty.
    pub fn max_end(&self) -> f64 {
        self.timeline.iter().map(|it| it.end).fold(0.0, f64::max)
    }

    /// Whether any item of the given kind is present.
    pub fn has_kind(&self, kind: ItemKind) -> bool {
        self.timeline.iter().any(|it| it.kind == kind)
    }

    /// Sort items by `(start, end)` ascending. Total order on floats via
    /// `total_cmp`, so NaN inputs cannot panic the sort.
    pub fn sort_items(&mut self) {
        self.timeline.sort_by(|a, b| {
            a.start
                .total_cmp(&b.start)
                .then_with(|| a.end.total_cmp(&b.end))
        });
    }
}

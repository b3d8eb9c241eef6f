//! Deterministic constraint enforcement for timeline candidates.
//!
//! Pure, local repair: no generative calls, no errors. A candidate that is
//! already valid passes through unchanged, so enforcement is idempotent and
//! safe to reapply after every generative production or repair.

use reelcraft_artifacts::{AnalysisInput, ItemKind, Position, Size, Timeline, TimelineItem};

/// Minimum duration of a video item, seconds.
pub const MIN_VIDEO_SECS: f64 = 3.0;
/// Maximum duration of a video item, seconds.
pub const MAX_VIDEO_SECS: f64 = 7.0;

const DEFAULT_IMAGE_POSITION: Position = Position { x: 100, y: 100 };
const DEFAULT_IMAGE_SIZE: Size = Size {
    width: 600,
    height: 600,
};

/// Repair `timeline` so that every invariant holds:
/// video durations within `[3, 7]`, at least one image and one audio item
/// whenever the analysis has the corresponding asset, items sorted by
/// `(start, end)`, and no item extending past `target_secs`.
///
/// Step order matters: clamping can move ends past the target, and the
/// synthesized items anchor to the post-clamp maximum end, so the final
/// sort-and-clip pass runs last.
pub fn enforce_constraints(
    mut timeline: Timeline,
    analysis: &AnalysisInput,
    target_secs: f64,
) -> Timeline {
    // 1. Clamp video durations by moving `end` only; `start` never moves.
    for item in &mut timeline.timeline {
        if item.kind == ItemKind::Video {
            let duration = item.duration();
            if duration < MIN_VIDEO_SECS {
                item.end = item.start + MIN_VIDEO_SECS;
            } else if duration > MAX_VIDEO_SECS {
                item.end = item.start + MAX_VIDEO_SECS;
            }
        }
    }

    let current_end = timeline.max_end();

    // 2. Synthesize an image item from the first image asset if none exists.
    //    A missing asset category is not an error; the item is simply omitted.
    if !timeline.has_kind(ItemKind::Image) {
        if let Some(filename) = analysis.first_image() {
            timeline.timeline.push(TimelineItem {
                kind: ItemKind::Image,
                filename: Some(filename.to_string()),
                text: None,
                start: (current_end - MIN_VIDEO_SECS).max(0.0),
                end: current_end.max(MIN_VIDEO_SECS),
                position: Some(DEFAULT_IMAGE_POSITION),
                size: Some(DEFAULT_IMAGE_SIZE),
            });
        }
    }

    // 3. Synthesize a full-length audio bed from the first audio asset.
    if !timeline.has_kind(ItemKind::Audio) {
        if let Some(filename) = analysis.first_audio() {
            timeline.timeline.push(TimelineItem {
                kind: ItemKind::Audio,
                filename: Some(filename.to_string()),
                text: None,
                start: 0.0,
                end: target_secs,
                position: None,
                size: None,
            });
        }
    }

    // 4. Restore ordering.
    timeline.sort_items();

    // 5. Clip anything extending past the target duration.
    for item in &mut timeline.timeline {
        if item.start > target_secs {
            item.start = target_secs - 0.1;
        }
        if item.end > target_secs {
            item.end = target_secs;
        }
    }

    timeline
}

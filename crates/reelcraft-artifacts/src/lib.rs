//! Serde data model for the Reelcraft composer.
//!
//! Three families of types live here:
//! - `AnalysisInput` — the read-only media analysis supplied by the ingestion
//!   side (image/audio asset lists plus opaque content segments).
//! - Generative artifacts — `Scenes`, `StoryIdea`, `Storyline`, `Timeline`,
//!   each produced by one generative stage.
//! - `FunEvaluation` — the engagement scorecard consumed by the quality gate.
//!
//! Field names match the wire schema exactly; every artifact round-trips
//! through `serde_json`.

mod analysis;
mod evaluation;
mod story;
mod timeline;

pub use analysis::{AnalysisInput, MediaAsset};
pub use evaluation::{FunDimension, FunEvaluation, Verdict, WeakSpot};
pub use story::{SceneItem, Scenes, StoryIdea, Storyline};
pub use timeline::{ItemKind, Position, Size, Timeline, TimelineItem};

//! The Reelcraft composition pipeline.
//!
//! Converts a media analysis into a timed short-video composition through a
//! chain of generative stages reconciled against hard structural invariants:
//! duration planning, scene summarization, story ideation, storyline writing,
//! timeline drafting, deterministic constraint enforcement, length
//! reconciliation, an engagement quality gate, and a single punch-up rewrite
//! when the gate rejects.

pub mod config;
pub mod duration;
pub mod enforcer;
pub mod events;
pub mod gate;
pub mod orchestrator;
pub mod prompts;
pub mod punch_up;
pub mod reconcile;
pub mod retry;
pub mod state;

pub use config::PipelineConfig;
pub use duration::{split_duration, DurationSplit};
pub use enforcer::enforce_constraints;
pub use events::{EventEmitter, RunEvent};
pub use gate::{gate_accepts, FUN_THRESHOLD};
pub use orchestrator::{Orchestrator, RunInput, RunOutput};
pub use punch_up::punch_up_timeline;
pub use reconcile::{covered_duration, reconcile_length, LENGTH_SLACK_SECS};
pub use retry::{generate_with_retry, BackoffPolicy};
pub use state::TimelineState;

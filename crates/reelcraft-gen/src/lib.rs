//! Generative capability boundary for the Reelcraft composer.
//!
//! Provides the `ArtifactGenerator` trait, `DynGenerator` wrapper, typed
//! deserialization into artifacts (`generate_typed`), per-stage JSON schemas,
//! and an OpenAI chat-completions adapter using structured output.

mod openai;
mod schema;
mod stage;

pub use openai::OpenAiGenerator;
pub use schema::{
    fun_evaluation_schema, scenes_schema, story_idea_schema, storyline_schema, timeline_schema,
};
pub use stage::{generate_typed, ArtifactGenerator, DynGenerator, GenRequest, StageKind};

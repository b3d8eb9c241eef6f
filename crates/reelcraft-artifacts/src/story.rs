use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Scenes
// ---------------------------------------------------------------------------

/// One summarized content segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneItem {
    pub scene_id: u32,
    pub summary: String,
    pub highlight: String,
}

/// Scene summaries distilled from the analysis segments. Produced once per
/// run, immutable afterward.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenes {
    #[serde(default)]
    pub scenes: Vec<SceneItem>,
}

// ---------------------------------------------------------------------------
// StoryIdea
// ---------------------------------------------------------------------------

/// The editorial plan: tone, three-act beats, key message, second budgets
/// per act, promotion targets, and the intended image/video time ratio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryIdea {
    pub tone: String,
    pub opening: String,
    pub development: String,
    pub closing: String,
    pub key_message: String,
    pub opening_sec: i64,
    pub development_sec: i64,
    pub closing_sec: i64,
    pub target_subjects: Vec<String>,
    pub image_ratio: f64,
    pub video_ratio: f64,
}

// ---------------------------------------------------------------------------
// Storyline
// ---------------------------------------------------------------------------

/// Story summary plus the ordered beats of the flow. Read-only context for
/// every later stage, including repairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Storyline {
    pub story_summary: String,
    pub story_flow: Vec<String>,
}

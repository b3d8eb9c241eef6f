use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// The evaluator's overall call on a timeline candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Borderline,
    Fail,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Pass => "pass",
            Verdict::Borderline => "borderline",
            Verdict::Fail => "fail",
        }
    }
}

// ---------------------------------------------------------------------------
// FunDimension / WeakSpot
// ---------------------------------------------------------------------------

/// Score, short reason, and improvement suggestions for one dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunDimension {
    pub score: u8,
    pub reason: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// A timeline span where engagement drops, with the diagnosed issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeakSpot {
    pub start: f64,
    pub end: f64,
    pub issue: String,
}

// ---------------------------------------------------------------------------
// FunEvaluation
// ---------------------------------------------------------------------------

/// The engagement scorecard for one timeline candidate: eight scored
/// dimensions, weak spans, and the top actions to apply. Produced once per
/// candidate; the quality gate reads only `overall_score` and `verdict`,
/// the punch-up repairer reads `weak_spots` and `top_actions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunEvaluation {
    pub overall_score: u8,
    pub verdict: Verdict,
    pub hook_strength: FunDimension,
    pub pacing: FunDimension,
    pub novelty: FunDimension,
    pub clarity: FunDimension,
    pub emotional_impact: FunDimension,
    pub cta_effectiveness: FunDimension,
    pub visual_variety: FunDimension,
    pub sound_alignment: FunDimension,
    #[serde(default)]
    pub weak_spots: Vec<WeakSpot>,
    #[serde(default)]
    pub top_actions: Vec<String>,
}

//! The engagement quality gate.

use reelcraft_artifacts::{FunEvaluation, Verdict};

/// Minimum overall score for a timeline to pass the gate.
pub const FUN_THRESHOLD: u8 = 4;

/// Pure accept/reject predicate over an evaluation.
///
/// Rejects when the overall score is below [`FUN_THRESHOLD`] or the verdict
/// is anything but `pass`. Borderline verdicts are rejections.
pub fn gate_accepts(eval: &FunEvaluation) -> bool {
    eval.overall_score >= FUN_THRESHOLD && eval.verdict == Verdict::Pass
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelcraft_artifacts::FunDimension;

    fn dim() -> FunDimension {
        FunDimension {
            score: 4,
            reason: "fine".into(),
            suggestions: vec![],
        }
    }

    fn eval(overall: u8, verdict: Verdict) -> FunEvaluation {
        FunEvaluation {
            overall_score: overall,
            verdict,
            hook_strength: dim(),
            pacing: dim(),
            novelty: dim(),
            clarity: dim(),
            emotional_impact: dim(),
            cta_effectiveness: dim(),
            visual_variety: dim(),
            sound_alignment: dim(),
            weak_spots: vec![],
            top_actions: vec![],
        }
    }

    // 1. Boundary: score 4 with pass verdict is accepted
    #[test]
    fn accepts_at_threshold_with_pass() {
        assert!(gate_accepts(&eval(4, Verdict::Pass)));
    }

    // 2. Score below threshold is rejected even with pass verdict
    #[test]
    fn rejects_below_threshold() {
        assert!(!gate_accepts(&eval(3, Verdict::Pass)));
    }

    // 3. Borderline and fail verdicts are rejected regardless of score
    #[test]
    fn rejects_non_pass_verdicts() {
        assert!(!gate_accepts(&eval(5, Verdict::Borderline)));
        assert!(!gate_accepts(&eval(5, Verdict::Fail)));
    }

    // 4. Top score with pass verdict is accepted
    #[test]
    fn accepts_top_score() {
        assert!(gate_accepts(&eval(5, Verdict::Pass)));
    }
}

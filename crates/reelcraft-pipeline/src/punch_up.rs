//! Punch-up: a single directed generative rewrite after a gate rejection.

use reelcraft_artifacts::{AnalysisInput, FunEvaluation, StoryIdea, Storyline, Timeline};
use reelcraft_gen::{generate_typed, timeline_schema, DynGenerator, GenRequest, StageKind};
use reelcraft_types::Result;

use crate::config::PipelineConfig;
use crate::prompts;
use crate::retry::generate_with_retry;

/// Request one generative rewrite of `timeline` directed at the evaluator's
/// findings: hook the first 0-3 seconds, tighten pacing, balance visual
/// sources, land a call-to-action subtitle at the end, and approach the
/// story plan's image/video ratio.
///
/// Returns a full replacement timeline. The caller must re-run constraint
/// enforcement and length reconciliation on it before acceptance; the result
/// is not re-evaluated — the repair branch is single-shot.
pub async fn punch_up_timeline(
    timeline: &Timeline,
    storyline: &Storyline,
    story_idea: &StoryIdea,
    analysis: &AnalysisInput,
    eval: &FunEvaluation,
    generator: &DynGenerator,
    config: &PipelineConfig,
) -> Result<Timeline> {
    let prompt = prompts::punch_up_prompt(
        &serde_json::to_string(timeline)?,
        &serde_json::to_string(storyline)?,
        &serde_json::to_string(story_idea)?,
        &serde_json::to_string(analysis.sample_segments(config.punch_up_segment_sample))?,
        eval.overall_score,
        eval.verdict.as_str(),
        &serde_json::to_string(&eval.top_actions)?,
        &serde_json::to_string(&eval.weak_spots)?,
    );

    tracing::info!(
        overall_score = eval.overall_score,
        weak_spots = eval.weak_spots.len(),
        "punching up rejected timeline"
    );

    let request = GenRequest::new(
        StageKind::Repair,
        prompts::REPAIR_SYSTEM,
        prompt,
        timeline_schema(),
    );
    generate_with_retry(
        || generate_typed(generator, &request),
        config.max_attempts,
        &config.backoff,
        request.stage.as_str(),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reelcraft_artifacts::{FunDimension, Verdict, WeakSpot};
    use reelcraft_gen::ArtifactGenerator;
    use reelcraft_types::ReelcraftError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::sync::Mutex;

    fn dim() -> FunDimension {
        FunDimension {
            score: 2,
            reason: "weak".into(),
            suggestions: vec![],
        }
    }

    fn rejection() -> FunEvaluation {
        FunEvaluation {
            overall_score: 2,
            verdict: Verdict::Fail,
            hook_strength: dim(),
            pacing: dim(),
            novelty: dim(),
            clarity: dim(),
            emotional_impact: dim(),
            cta_effectiveness: dim(),
            visual_variety: dim(),
            sound_alignment: dim(),
            weak_spots: vec![WeakSpot {
                start: 0.0,
                end: 3.0,
                issue: "weak hook".into(),
            }],
            top_actions: vec!["open on the drone shot".into()],
        }
    }

    fn story_idea() -> StoryIdea {
        StoryIdea {
            tone: "bright".into(),
            opening: "o".into(),
            development: "d".into(),
            closing: "c".into(),
            key_message: "k".into(),
            opening_sec: 6,
            development_sec: 18,
            closing_sec: 6,
            target_subjects: vec![],
            image_ratio: 0.3,
            video_ratio: 0.7,
        }
    }

    fn timeline() -> Timeline {
        Timeline {
            story_summary: "draft".into(),
            timeline: vec![],
        }
    }

    fn storyline() -> Storyline {
        Storyline {
            story_summary: "s".into(),
            story_flow: vec![],
        }
    }

    /// Records the prompts it receives and replies with a canned timeline.
    struct RecordingGenerator {
        calls: Arc<AtomicUsize>,
        prompts: Arc<Mutex<Vec<String>>>,
        fail_first: bool,
    }

    #[async_trait]
    impl ArtifactGenerator for RecordingGenerator {
        async fn generate(&self, request: &GenRequest) -> Result<serde_json::Value> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(request.prompt.clone());
            if self.fail_first && n == 0 {
                return Err(ReelcraftError::SchemaError {
                    stage: "repair".into(),
                    message: "garbled".into(),
                });
            }
            Ok(serde_json::json!({
                "story_summary": "punched up",
                "timeline": [{"type": "subtitle", "text": "Follow for more!", "start": 28.0, "end": 30.0}]
            }))
        }

        fn name(&self) -> &str {
            "recording"
        }

        fn default_model(&self) -> &str {
            "test"
        }
    }

    fn recorder(fail_first: bool) -> (DynGenerator, Arc<AtomicUsize>, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let generator = DynGenerator::new(RecordingGenerator {
            calls: calls.clone(),
            prompts: prompts.clone(),
            fail_first,
        });
        (generator, calls, prompts)
    }

    // 1. One rewrite request carrying the evaluator's findings
    #[tokio::test]
    async fn single_directed_rewrite() {
        let (generator, calls, prompts) = recorder(false);
        let out = punch_up_timeline(
            &timeline(),
            &storyline(),
            &story_idea(),
            &AnalysisInput::default(),
            &rejection(),
            &generator,
            &PipelineConfig::default(),
        )
        .await
        .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(out.story_summary, "punched up");

        let prompt = prompts.lock().unwrap()[0].clone();
        assert!(prompt.contains("overall_score=2"));
        assert!(prompt.contains("verdict=fail"));
        assert!(prompt.contains("weak hook"));
        assert!(prompt.contains("open on the drone shot"));
    }

    // 2. Schema-invalid rewrite is retried with the identical prompt
    #[tokio::test]
    async fn schema_failure_retries_identical_request() {
        let (generator, calls, prompts) = recorder(true);
        let out = punch_up_timeline(
            &timeline(),
            &storyline(),
            &story_idea(),
            &AnalysisInput::default(),
            &rejection(),
            &generator,
            &PipelineConfig {
                backoff: crate::BackoffPolicy::None,
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(out.timeline.len(), 1);
        let prompts = prompts.lock().unwrap();
        assert_eq!(prompts[0], prompts[1]);
    }
}

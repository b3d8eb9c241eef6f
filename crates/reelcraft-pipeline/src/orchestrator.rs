//! The orchestrator: wires the generative stages, deterministic repairs, and
//! the quality gate into one run.
//!
//! Stage results live in named locals of a single typed flow instead of being
//! threaded through nested closures; the timeline candidate's progress is
//! tracked explicitly by [`TimelineState`]. A run is the unit of cancellation:
//! dropping the returned future cancels at the next generative call and no
//! further results are applied. Nothing is cached across runs.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use reelcraft_artifacts::{
    AnalysisInput, FunEvaluation, Scenes, StoryIdea, Storyline, Timeline,
};
use reelcraft_gen::{
    fun_evaluation_schema, generate_typed, scenes_schema, story_idea_schema, storyline_schema,
    timeline_schema, DynGenerator, GenRequest, StageKind,
};
use reelcraft_types::{ReelcraftError, Result};

use crate::config::PipelineConfig;
use crate::duration::split_duration;
use crate::enforcer::enforce_constraints;
use crate::events::{EventEmitter, RunEvent};
use crate::gate::gate_accepts;
use crate::prompts;
use crate::punch_up::punch_up_timeline;
use crate::reconcile::reconcile_length;
use crate::retry::generate_with_retry;
use crate::state::TimelineState;

// ---------------------------------------------------------------------------
// RunInput / RunOutput
// ---------------------------------------------------------------------------

/// Boundary input: the analysis, the target duration in seconds, and the
/// free-form editorial instruction.
#[derive(Debug, Clone, Deserialize)]
pub struct RunInput {
    pub analysis: AnalysisInput,
    pub duration: u32,
    pub instruction: String,
}

/// Boundary output: every produced artifact plus the final timeline, ready
/// for a downstream renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutput {
    pub scenes: Scenes,
    pub story_idea: StoryIdea,
    pub storyline: Storyline,
    pub fun_evaluation: FunEvaluation,
    pub timeline: Timeline,
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Drives a full composition run against a generative capability.
pub struct Orchestrator {
    generator: DynGenerator,
    config: PipelineConfig,
    events: EventEmitter,
}

impl Orchestrator {
    pub fn new(generator: DynGenerator) -> Self {
        Self {
            generator,
            config: PipelineConfig::default(),
            events: EventEmitter::default(),
        }
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// The run's event stream. Subscribe before calling [`run`](Self::run).
    pub fn events(&self) -> &EventEmitter {
        &self.events
    }

    /// Execute one composition run.
    ///
    /// Generative failures abort the whole run after retries; no partial
    /// output is ever returned.
    pub async fn run(&self, input: &RunInput) -> Result<RunOutput> {
        if input.duration == 0 {
            return Err(ReelcraftError::InvalidInput(
                "duration must be at least 1 second".into(),
            ));
        }

        let run_id = uuid::Uuid::new_v4().to_string();
        let started = Instant::now();
        self.events.emit(RunEvent::RunStarted {
            run_id: run_id.clone(),
            target_secs: input.duration,
            started_at: chrono::Utc::now(),
        });
        tracing::info!(run_id = %run_id, duration = input.duration, "run started");

        match self.run_inner(input).await {
            Ok(output) => {
                let duration_ms = started.elapsed().as_millis() as u64;
                self.events.emit(RunEvent::RunCompleted {
                    run_id: run_id.clone(),
                    duration_ms,
                });
                tracing::info!(run_id = %run_id, duration_ms, "run completed");
                Ok(output)
            }
            Err(e) => {
                self.events.emit(RunEvent::RunFailed {
                    run_id: run_id.clone(),
                    error: e.to_string(),
                });
                tracing::error!(run_id = %run_id, error = %e, "run failed");
                Err(e)
            }
        }
    }

    async fn run_inner(&self, input: &RunInput) -> Result<RunOutput> {
        let analysis = &input.analysis;
        let target = f64::from(input.duration);

        // Deterministic planning happens before the first suspension point.
        let split = split_duration(input.duration);
        let analysis_json = serde_json::to_string(analysis)?;

        // Scenes — produced once, immutable afterward.
        let scenes: Scenes = self
            .stage(GenRequest::new(
                StageKind::Scenes,
                prompts::SCENES_SYSTEM,
                prompts::scenes_prompt(&analysis_json),
                scenes_schema(),
            ))
            .await?;
        let scenes_json = serde_json::to_string(&scenes.scenes)?;

        // Story idea — consumes the scenes, the act budgets, and the caller's
        // editorial instruction.
        let story_idea: StoryIdea = self
            .stage(GenRequest::new(
                StageKind::StoryIdea,
                prompts::STORY_IDEA_SYSTEM,
                prompts::story_idea_prompt(&scenes_json, input.duration, &split, &input.instruction),
                story_idea_schema(),
            ))
            .await?;
        let story_idea_json = serde_json::to_string(&story_idea)?;

        // Storyline — read-only context for every later stage.
        let storyline: Storyline = self
            .stage(GenRequest::new(
                StageKind::Storyline,
                prompts::STORYLINE_SYSTEM,
                prompts::storyline_prompt(&scenes_json, &story_idea_json),
                storyline_schema(),
            ))
            .await?;
        let storyline_json = serde_json::to_string(&storyline)?;

        // Raw timeline draft.
        let draft: Timeline = self
            .stage(GenRequest::new(
                StageKind::Timeline,
                prompts::TIMELINE_SYSTEM,
                prompts::timeline_prompt(
                    &analysis_json,
                    &storyline_json,
                    input.duration,
                    story_idea.image_ratio,
                    story_idea.video_ratio,
                ),
                timeline_schema(),
            ))
            .await?;
        let mut state = TimelineState::Draft;

        // First repair pass: enforce, then reconcile length.
        let timeline = enforce_constraints(draft, analysis, target);
        state = self.advance(state, TimelineState::ConstraintChecked)?;
        let timeline = reconcile_length(
            timeline,
            analysis,
            input.duration,
            &storyline,
            &self.generator,
            &self.config,
        )
        .await?;
        state = self.advance(state, TimelineState::LengthReconciled)?;

        // Engagement evaluation of the repaired candidate.
        let timeline_json = serde_json::to_string(&timeline)?;
        let fun_evaluation: FunEvaluation = self
            .stage(GenRequest::new(
                StageKind::FunEvaluation,
                prompts::FUN_EVAL_SYSTEM,
                prompts::fun_eval_prompt(&storyline_json, &timeline_json),
                fun_evaluation_schema(),
            ))
            .await?;
        state = self.advance(state, TimelineState::Evaluated)?;

        let accepted = gate_accepts(&fun_evaluation);
        self.events.emit(RunEvent::GateChecked {
            accepted,
            overall_score: fun_evaluation.overall_score,
            verdict: fun_evaluation.verdict.as_str().to_string(),
        });

        let timeline = if accepted {
            state = self.advance(state, TimelineState::Accepted)?;
            timeline
        } else {
            // Single repair cycle: rewrite, then re-enter the same states.
            let punched = punch_up_timeline(
                &timeline,
                &storyline,
                &story_idea,
                analysis,
                &fun_evaluation,
                &self.generator,
                &self.config,
            )
            .await?;
            state = self.advance(state, TimelineState::PunchedUp)?;
            self.events.emit(RunEvent::TimelineRepaired {
                action: "punch_up".into(),
            });

            let repaired = enforce_constraints(punched, analysis, target);
            state = self.advance(state, TimelineState::ConstraintChecked)?;
            let repaired = reconcile_length(
                repaired,
                analysis,
                input.duration,
                &storyline,
                &self.generator,
                &self.config,
            )
            .await?;
            state = self.advance(state, TimelineState::LengthReconciled)?;
            repaired
        };

        let state = self.advance(state, TimelineState::Final)?;
        debug_assert!(state.is_terminal());

        Ok(RunOutput {
            scenes,
            story_idea,
            storyline,
            fun_evaluation,
            timeline,
        })
    }

    /// Issue one generative stage call with retry and event bookkeeping.
    async fn stage<T: DeserializeOwned>(&self, request: GenRequest) -> Result<T> {
        let stage = request.stage.as_str();
        self.events.emit(RunEvent::StageStarted {
            stage: stage.to_string(),
        });
        let started = Instant::now();

        let artifact = generate_with_retry(
            || generate_typed(&self.generator, &request),
            self.config.max_attempts,
            &self.config.backoff,
            stage,
        )
        .await?;

        let duration_ms = started.elapsed().as_millis() as u64;
        self.events.emit(RunEvent::StageCompleted {
            stage: stage.to_string(),
            duration_ms,
        });
        tracing::debug!(stage, duration_ms, "stage completed");
        Ok(artifact)
    }

    fn advance(&self, state: TimelineState, next: TimelineState) -> Result<TimelineState> {
        let next = state.advance(next)?;
        self.events.emit(RunEvent::StateChanged {
            state: next.as_str().to_string(),
        });
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn zero_duration_is_rejected() {
        struct NeverGenerator;

        #[async_trait::async_trait]
        impl reelcraft_gen::ArtifactGenerator for NeverGenerator {
            async fn generate(&self, _request: &GenRequest) -> Result<serde_json::Value> {
                panic!("no generative call expected");
            }
            fn name(&self) -> &str {
                "never"
            }
            fn default_model(&self) -> &str {
                "none"
            }
        }

        let orchestrator = Orchestrator::new(DynGenerator::new(NeverGenerator));
        let err = orchestrator
            .run(&RunInput {
                analysis: AnalysisInput::default(),
                duration: 0,
                instruction: String::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ReelcraftError::InvalidInput(_)));
    }
}

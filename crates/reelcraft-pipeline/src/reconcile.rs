//! Length reconciliation: compare covered duration against the target and
//! expand or trim.

use reelcraft_artifacts::{AnalysisInput, ItemKind, Storyline, Timeline};
use reelcraft_gen::{generate_typed, timeline_schema, DynGenerator, GenRequest, StageKind};
use reelcraft_types::Result;

use crate::config::PipelineConfig;
use crate::enforcer::enforce_constraints;
use crate::prompts;
use crate::retry::generate_with_retry;

/// Slack band around the target, seconds. Inside the band the timeline is
/// returned unchanged, which prevents oscillation between expand and trim
/// on repeated passes.
pub const LENGTH_SLACK_SECS: f64 = 2.0;

/// Sum of durations over video, image, and subtitle items.
///
/// Overlapping items are counted in full, so this is a content-volume proxy
/// rather than wall-clock coverage. The audio bed spans the whole timeline
/// and is excluded.
pub fn covered_duration(timeline: &Timeline) -> f64 {
    timeline
        .timeline
        .iter()
        .filter(|it| {
            matches!(
                it.kind,
                ItemKind::Video | ItemKind::Image | ItemKind::Subtitle
            )
        })
        .map(|it| it.duration())
        .sum()
}

/// Reconcile the timeline's covered duration against `target_secs`.
///
/// - More than [`LENGTH_SLACK_SECS`] short: ask the generative capability to
///   extend the tail (keeping every existing item), then re-enforce
///   constraints on the replacement.
/// - More than the slack over: trim deterministically via the enforcer's
///   sort-and-clip pass.
/// - Inside the band: identity, no generative call.
pub async fn reconcile_length(
    timeline: Timeline,
    analysis: &AnalysisInput,
    target_secs: u32,
    storyline: &Storyline,
    generator: &DynGenerator,
    config: &PipelineConfig,
) -> Result<Timeline> {
    let covered = covered_duration(&timeline);
    let target = f64::from(target_secs);

    if covered < target - LENGTH_SLACK_SECS {
        tracing::info!(covered, target, "timeline short of target, extending tail");
        let storyline_json = serde_json::to_string(storyline)?;
        let segments_json =
            serde_json::to_string(analysis.sample_segments(config.extend_segment_sample))?;
        let prompt = prompts::extend_prompt(covered, target_secs, &storyline_json, &segments_json);
        let request = GenRequest::new(
            StageKind::Repair,
            prompts::REPAIR_SYSTEM,
            prompt,
            timeline_schema(),
        );

        let extended: Timeline = generate_with_retry(
            || generate_typed(generator, &request),
            config.max_attempts,
            &config.backoff,
            request.stage.as_str(),
        )
        .await?;

        // A generative repair is a fresh candidate; invariants hold only
        // after another enforcement pass.
        return Ok(enforce_constraints(extended, analysis, target));
    }

    if covered > target + LENGTH_SLACK_SECS {
        tracing::info!(covered, target, "timeline over target, trimming");
        return Ok(enforce_constraints(timeline, analysis, target));
    }

    Ok(timeline)
}

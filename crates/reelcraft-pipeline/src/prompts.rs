//! Prompt builders for every generative stage.
//!
//! Builders are pure string formatting over pre-serialized artifact JSON;
//! the orchestrator serializes artifacts once and threads the strings in.
//! Prompt wording steers the generator but never replaces the deterministic
//! checks: every structural requirement stated here is re-enforced in code.

use crate::duration::DurationSplit;

pub const SCENES_SYSTEM: &str =
    "You are a video scene analyst. Output only JSON matching the given schema.";

pub const STORY_IDEA_SYSTEM: &str =
    "You are a short-form video scenario planner. Output only JSON matching the given schema.";

pub const STORYLINE_SYSTEM: &str =
    "You are a scenario writer. Output only JSON matching the given schema.";

pub const TIMELINE_SYSTEM: &str =
    "You are a short-form video editor. Output only JSON matching the given schema.";

pub const FUN_EVAL_SYSTEM: &str =
    "You are a short-form video judge. Output only JSON matching the given schema.";

pub const REPAIR_SYSTEM: &str =
    "You are a short-form video editor revising an existing timeline. Output only JSON matching the given schema.";

/// Scene summarization: one scene per analysis segment.
pub fn scenes_prompt(analysis_json: &str) -> String {
    format!(
        "Summarize each segment of the analysis JSON below into the scenes array.\n\
         \n\
         Analysis JSON:\n{analysis_json}\n\
         \n\
         Rules:\n\
         - Fill scene_id (starting at 1), summary, and highlight for every segment.\n\
         - Output JSON only."
    )
}

/// Story ideation: tone, three acts, key message, targets, and cut ratios.
pub fn story_idea_prompt(
    scenes_json: &str,
    duration: u32,
    split: &DurationSplit,
    instruction: &str,
) -> String {
    format!(
        "Build the overall story plan from the scene summaries below.\n\
         \n\
         Scene summaries (JSON array):\n{scenes_json}\n\
         \n\
         Editorial instruction: {instruction}\n\
         \n\
         Requirements:\n\
         - State the tone.\n\
         - One or two sentences each for opening, development, and closing.\n\
         - One sentence for key_message.\n\
         - Extract the main promotion subjects (people, objects, places) into target_subjects.\n\
         - Total video length: {duration} seconds.\n\
         - Act budgets: opening_sec={opening}, development_sec={development}, closing_sec={closing}.\n\
         - Image/video time ratio: image_ratio=0.3, video_ratio=0.7 (sum 1.0).\n\
         - Output JSON only.",
        opening = split.opening_sec,
        development = split.development_sec,
        closing = split.closing_sec,
    )
}

/// Storyline writing: summary plus the ordered flow of beats.
pub fn storyline_prompt(scenes_json: &str, story_idea_json: &str) -> String {
    format!(
        "Write the full story summary and flow from the inputs below.\n\
         \n\
         Scene summaries (JSON array):\n{scenes_json}\n\
         \n\
         Story plan (JSON):\n{story_idea_json}\n\
         \n\
         Output only story_summary (one or two sentences) and story_flow\n\
         (the key beats of opening, development, and closing, in order).\n\
         Output JSON only."
    )
}

/// Raw timeline drafting from the analysis and the storyline.
pub fn timeline_prompt(
    analysis_json: &str,
    storyline_json: &str,
    duration: u32,
    image_ratio: f64,
    video_ratio: f64,
) -> String {
    format!(
        "Build the final timeline from the inputs below.\n\
         \n\
         Analysis JSON:\n{analysis_json}\n\
         \n\
         Story summary and flow (JSON):\n{storyline_json}\n\
         \n\
         Requirements:\n\
         1) Final video length: {duration} seconds.\n\
         2) Include at least one video, subtitle, image, and audio item.\n\
         3) Cut video segments to between 3 and 7 seconds.\n\
         4) Open on place or brand image cuts.\n\
         5) Carry the development on video clips such as interviews and demos.\n\
         6) Close on a group or logo image with the key message.\n\
         7) Budget roughly {image_ratio} of the time to image cuts and {video_ratio} to video cuts.\n\
         8) Fill every field, using defaults where a value is not needed:\n\
            position {{\"x\":0,\"y\":0}}, size {{\"width\":1920,\"height\":1080}},\n\
            and empty strings for absent filename/text.\n\
         9) Output JSON only."
    )
}

/// Engagement evaluation of a storyline/timeline pair.
pub fn fun_eval_prompt(storyline_json: &str, timeline_json: &str) -> String {
    format!(
        "Score the storyline and timeline below for short-form engagement.\n\
         \n\
         Storyline (JSON):\n{storyline_json}\n\
         \n\
         Timeline (JSON):\n{timeline_json}\n\
         \n\
         Dimensions (0-5 each):\n\
         - hook_strength: attention in the first 0-3 seconds\n\
         - pacing: rhythm, cut transitions, breathing room\n\
         - novelty: freshness, twists, the unexpected\n\
         - clarity: message clarity, minimal noise\n\
         - emotional_impact: feeling, empathy, excitement\n\
         - cta_effectiveness: drive toward the next action\n\
         - visual_variety: mix of clips, stills, and subtitles\n\
         - sound_alignment: fit of music, effects, and speech\n\
         \n\
         Also report weak_spots (timeline spans where engagement drops, with\n\
         the issue) and top_actions (the three changes with the biggest\n\
         immediate payoff), then overall_score (0-5) and verdict\n\
         (pass|borderline|fail). Output JSON only."
    )
}

/// Tail extension when the covered duration falls short of the target.
pub fn extend_prompt(
    covered_secs: f64,
    duration: u32,
    storyline_json: &str,
    segments_json: &str,
) -> String {
    format!(
        "The current timeline covers {covered_secs:.1} seconds but the target is\n\
         {duration} seconds. Using the storyline and analysis excerpts below,\n\
         add fitting scenes or lengthen subtitles and images to close the gap.\n\
         \n\
         Storyline (JSON):\n{storyline_json}\n\
         \n\
         Analysis segments (excerpt):\n{segments_json}\n\
         \n\
         Keep every existing item and extend naturally past the current tail.\n\
         Output the full timeline as JSON only."
    )
}

/// Punch-up rewrite directed at the evaluator's findings.
#[allow(clippy::too_many_arguments)]
pub fn punch_up_prompt(
    timeline_json: &str,
    storyline_json: &str,
    story_idea_json: &str,
    segments_json: &str,
    overall_score: u8,
    verdict: &str,
    top_actions_json: &str,
    weak_spots_json: &str,
) -> String {
    format!(
        "Engagement review of the current timeline (summary):\n\
         - overall_score={overall_score}, verdict={verdict}\n\
         - top_actions: {top_actions_json}\n\
         - weak_spots: {weak_spots_json}\n\
         \n\
         Storyline (JSON):\n{storyline_json}\n\
         \n\
         Story plan (tone/targets/ratios, JSON):\n{story_idea_json}\n\
         \n\
         Analysis segments (excerpt):\n{segments_json}\n\
         \n\
         Directions:\n\
         1) Build a strong hook in the first 0-3 seconds (a question, number,\n\
            twist, or bold text).\n\
         2) Improve pacing: keep video items between 3 and 6 seconds and cut\n\
            low-value stretches.\n\
         3) Balance distinct visual sources for variety.\n\
         4) Place a clear call-to-action subtitle in the final 1-2 seconds.\n\
         5) Approximate the image/video time ratio from the story plan.\n\
         \n\
         Current timeline for reference:\n{timeline_json}\n\
         \n\
         Output the full replacement timeline as JSON only."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenes_prompt_embeds_analysis() {
        let p = scenes_prompt("{\"segments\":[]}");
        assert!(p.contains("{\"segments\":[]}"));
        assert!(p.contains("scene_id"));
    }

    #[test]
    fn story_idea_prompt_embeds_budgets_and_instruction() {
        let split = DurationSplit {
            opening_sec: 6,
            development_sec: 18,
            closing_sec: 6,
        };
        let p = story_idea_prompt("[]", 30, &split, "make it bright and upbeat");
        assert!(p.contains("opening_sec=6"));
        assert!(p.contains("development_sec=18"));
        assert!(p.contains("closing_sec=6"));
        assert!(p.contains("30 seconds"));
        assert!(p.contains("make it bright and upbeat"));
    }

    #[test]
    fn timeline_prompt_embeds_ratios() {
        let p = timeline_prompt("{}", "{}", 30, 0.3, 0.7);
        assert!(p.contains("0.3"));
        assert!(p.contains("0.7"));
        assert!(p.contains("between 3 and 7 seconds"));
    }

    #[test]
    fn extend_prompt_reports_gap() {
        let p = extend_prompt(21.5, 30, "{}", "[]");
        assert!(p.contains("21.5 seconds"));
        assert!(p.contains("30 seconds"));
        assert!(p.contains("Keep every existing item"));
    }

    #[test]
    fn punch_up_prompt_carries_review_findings() {
        let p = punch_up_prompt(
            "{}",
            "{}",
            "{}",
            "[]",
            2,
            "fail",
            "[\"tighten the hook\"]",
            "[{\"start\":0.0,\"end\":3.0,\"issue\":\"weak hook\"}]",
        );
        assert!(p.contains("overall_score=2"));
        assert!(p.contains("verdict=fail"));
        assert!(p.contains("tighten the hook"));
        assert!(p.contains("weak hook"));
        assert!(p.contains("call-to-action"));
        assert!(p.contains("between 3 and 6 seconds"));
    }
}
